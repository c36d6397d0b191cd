//! Bookkeeping of values already encoded, for aliasing repeats.

use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Entry {
    path: Vec<usize>,
    anchor: Option<String>,
}

/// Maps value identities to the node first built for them.
///
/// Nodes are addressed by their child-index path from the stream root, so
/// an anchor can be put on a node after it was built: the first time the
/// value repeats.
#[derive(Debug, Default)]
pub struct Registrar {
    entries: HashMap<usize, Entry>,
    anchored: Vec<(Vec<usize>, String)>,
    next_anchor: usize,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that the value `id` is built at `path`.
    pub fn register(&mut self, id: usize, path: Vec<usize>) {
        self.entries.insert(id, Entry { path, anchor: None });
    }

    pub fn is_registered(&self, id: usize) -> bool {
        self.entries.contains_key(&id)
    }

    /// Forget the value `id`, so the next time it is seen it is encoded
    /// again instead of aliased. Anchors already handed out stay.
    pub fn unregister(&mut self, id: usize) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// The anchor of a registered value, naming it on first request.
    pub fn anchor(&mut self, id: usize) -> Option<String> {
        let entry = self.entries.get_mut(&id)?;
        if let Some(anchor) = &entry.anchor {
            return Some(anchor.clone());
        }
        self.next_anchor += 1;
        let anchor = self.next_anchor.to_string();
        entry.anchor = Some(anchor.clone());
        self.anchored.push((entry.path.clone(), anchor.clone()));
        Some(anchor)
    }

    /// Start a new document: identities are forgotten and anchor names
    /// start over, while anchors handed out so far are kept.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.next_anchor = 0;
    }

    /// Every anchor handed out, with the path of the node it belongs to.
    pub fn anchored(&self) -> &[(Vec<usize>, String)] {
        &self.anchored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_is_named_once() {
        let mut registrar = Registrar::new();
        registrar.register(7, vec![0, 0, 1]);
        assert_eq!(registrar.anchor(7).as_deref(), Some("1"));
        assert_eq!(registrar.anchor(7).as_deref(), Some("1"));
        assert_eq!(registrar.anchored(), [(vec![0, 0, 1], "1".to_string())]);
        assert!(registrar.anchor(8).is_none());
    }

    #[test]
    fn test_unregister_keeps_handed_out_anchors() {
        let mut registrar = Registrar::new();
        registrar.register(1, vec![0, 0]);
        registrar.anchor(1);
        assert!(registrar.unregister(1));
        assert!(!registrar.is_registered(1));
        assert!(!registrar.unregister(1));
        assert_eq!(registrar.anchored().len(), 1);
    }

    #[test]
    fn test_reset_restarts_names() {
        let mut registrar = Registrar::new();
        registrar.register(1, vec![0, 0]);
        registrar.anchor(1);
        registrar.reset();
        registrar.register(1, vec![1, 0]);
        assert_eq!(registrar.anchor(1).as_deref(), Some("1"));
        assert_eq!(registrar.anchored().len(), 2);
    }
}
