//! [`Encode`] for standard library types and `yaml_rust2::Yaml`.

use super::{Blueberry, Encode, Encoder};
use crate::{Alias, Mapping, Result, Scalar, ScalarStyle, Sequence};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;
use yaml_rust2::Yaml;

fn plain(text: impl Into<String>) -> Scalar {
    Scalar::new(text).with_style(ScalarStyle::Plain)
}

impl Encode for str {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.scalar(Scalar::new(self));
        Ok(())
    }
}

impl Encode for String {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.as_str().encode(encoder)
    }
}

impl Encode for char {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.scalar(Scalar::new(self.to_string()));
        Ok(())
    }
}

impl Encode for bool {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.scalar(plain(self.to_string()));
        Ok(())
    }
}

macro_rules! encode_integer {
    ($($ty:ty),*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
                    encoder.scalar(plain(self.to_string()));
                    Ok(())
                }
            }
        )*
    };
}

encode_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// YAML 1.1 spells the special floats `.nan`, `.inf` and `-.inf`; finite
// values use the shortest round-trip form (`1.0`, not `1`).
macro_rules! encode_float {
    ($($ty:ty),*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
                    let text = if self.is_nan() {
                        ".nan".to_string()
                    } else if self.is_infinite() {
                        if *self > 0.0 { ".inf" } else { "-.inf" }.to_string()
                    } else {
                        format!("{self:?}")
                    };
                    encoder.scalar(plain(text));
                    Ok(())
                }
            }
        )*
    };
}

encode_float!(f32, f64);

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        match self {
            Some(value) => encoder.accept(value),
            None => {
                encoder.scalar(plain("null"));
                Ok(())
            }
        }
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }

    fn identity(&self) -> Option<usize> {
        (**self).identity()
    }

    fn as_blueberry(&self) -> Option<&dyn Blueberry> {
        (**self).as_blueberry()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }

    fn identity(&self) -> Option<usize> {
        (**self).identity()
    }

    fn as_blueberry(&self) -> Option<&dyn Blueberry> {
        (**self).as_blueberry()
    }
}

impl<T: Encode + ?Sized> Encode for Rc<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }

    fn identity(&self) -> Option<usize> {
        Some(Rc::as_ptr(self).cast::<()>() as usize)
    }

    fn as_blueberry(&self) -> Option<&dyn Blueberry> {
        (**self).as_blueberry()
    }
}

impl<T: Encode + ?Sized> Encode for Arc<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }

    fn identity(&self) -> Option<usize> {
        Some(Arc::as_ptr(self).cast::<()>() as usize)
    }

    fn as_blueberry(&self) -> Option<&dyn Blueberry> {
        (**self).as_blueberry()
    }
}

impl<T: Encode + ?Sized> Encode for RefCell<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.borrow().encode(encoder)
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_sequence(Sequence::new());
        for item in self {
            encoder.accept(item)?;
        }
        encoder.end_sequence();
        Ok(())
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.as_slice().encode(encoder)
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_mapping(Mapping::new());
        for (key, value) in self {
            encoder.entry(key, value)?;
        }
        encoder.end_mapping();
        Ok(())
    }
}

/// Entries come out in the map's iteration order.
impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_mapping(Mapping::new());
        for (key, value) in self {
            encoder.entry(key, value)?;
        }
        encoder.end_mapping();
        Ok(())
    }
}

impl Encode for Yaml {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        match self {
            Yaml::Real(text) => encoder.scalar(plain(text.as_str())),
            Yaml::Integer(value) => encoder.scalar(plain(value.to_string())),
            Yaml::String(text) => encoder.scalar(Scalar::new(text.as_str())),
            Yaml::Boolean(value) => encoder.scalar(plain(value.to_string())),
            Yaml::Array(items) => {
                encoder.start_sequence(Sequence::new());
                for item in items {
                    encoder.accept(item)?;
                }
                encoder.end_sequence();
            }
            Yaml::Hash(entries) => {
                encoder.start_mapping(Mapping::new());
                for (key, value) in entries {
                    encoder.entry(key, value)?;
                }
                encoder.end_mapping();
            }
            Yaml::Alias(id) => encoder.alias(Alias::new(id.to_string())),
            Yaml::Null | Yaml::BadValue => encoder.scalar(plain("null")),
        }
        Ok(())
    }
}
