//! The callback contract for styling nodes while a tree is built.

use crate::{Alias, Document, Mapping, Node, Scalar, Sequence, Sniffer, Stream};

/// A callback that may change a node's style, value or tag as it is built.
///
/// For every node, the styled tree builder calls [`Styler::style`] first and
/// then the hook for the node's kind. All hooks default to doing nothing.
///
/// Hooks receive the node as it sits in the tree being built and must not
/// keep references to it. Changing a node into another kind is not allowed.
pub trait Styler {
    /// Called for every node, before the kind-specific hook.
    fn style(&mut self, _sniffer: &Sniffer, _node: &mut Node) {}

    fn style_alias(&mut self, _sniffer: &Sniffer, _alias: &mut Alias) {}

    fn style_document(&mut self, _sniffer: &Sniffer, _document: &mut Document) {}

    fn style_mapping(&mut self, _sniffer: &Sniffer, _mapping: &mut Mapping) {}

    fn style_scalar(&mut self, _sniffer: &Sniffer, _scalar: &mut Scalar) {}

    fn style_sequence(&mut self, _sniffer: &Sniffer, _sequence: &mut Sequence) {}

    fn style_stream(&mut self, _sniffer: &Sniffer, _stream: &mut Stream) {}
}

impl<S: Styler + ?Sized> Styler for &mut S {
    fn style(&mut self, sniffer: &Sniffer, node: &mut Node) {
        (**self).style(sniffer, node)
    }

    fn style_alias(&mut self, sniffer: &Sniffer, alias: &mut Alias) {
        (**self).style_alias(sniffer, alias)
    }

    fn style_document(&mut self, sniffer: &Sniffer, document: &mut Document) {
        (**self).style_document(sniffer, document)
    }

    fn style_mapping(&mut self, sniffer: &Sniffer, mapping: &mut Mapping) {
        (**self).style_mapping(sniffer, mapping)
    }

    fn style_scalar(&mut self, sniffer: &Sniffer, scalar: &mut Scalar) {
        (**self).style_scalar(sniffer, scalar)
    }

    fn style_sequence(&mut self, sniffer: &Sniffer, sequence: &mut Sequence) {
        (**self).style_sequence(sniffer, sequence)
    }

    fn style_stream(&mut self, sniffer: &Sniffer, stream: &mut Stream) {
        (**self).style_stream(sniffer, stream)
    }
}

impl<S: Styler + ?Sized> Styler for Box<S> {
    fn style(&mut self, sniffer: &Sniffer, node: &mut Node) {
        (**self).style(sniffer, node)
    }

    fn style_alias(&mut self, sniffer: &Sniffer, alias: &mut Alias) {
        (**self).style_alias(sniffer, alias)
    }

    fn style_document(&mut self, sniffer: &Sniffer, document: &mut Document) {
        (**self).style_document(sniffer, document)
    }

    fn style_mapping(&mut self, sniffer: &Sniffer, mapping: &mut Mapping) {
        (**self).style_mapping(sniffer, mapping)
    }

    fn style_scalar(&mut self, sniffer: &Sniffer, scalar: &mut Scalar) {
        (**self).style_scalar(sniffer, scalar)
    }

    fn style_sequence(&mut self, sniffer: &Sniffer, sequence: &mut Sequence) {
        (**self).style_sequence(sniffer, sequence)
    }

    fn style_stream(&mut self, sniffer: &Sniffer, stream: &mut Stream) {
        (**self).style_stream(sniffer, stream)
    }
}

/// A styler that changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStyler;

impl Styler for EmptyStyler {}

/// Run one styler on a node: the generic hook, then the hook for its kind.
pub(crate) fn dispatch(styler: &mut dyn Styler, sniffer: &Sniffer, node: &mut Node) {
    let kind = node.kind();
    styler.style(sniffer, node);
    debug_assert_eq!(node.kind(), kind, "a styler changed the kind of a node");

    match node {
        Node::Alias(alias) => styler.style_alias(sniffer, alias),
        Node::Document(document) => styler.style_document(sniffer, document),
        Node::Mapping(mapping) => styler.style_mapping(sniffer, mapping),
        Node::Scalar(scalar) => styler.style_scalar(sniffer, scalar),
        Node::Sequence(sequence) => styler.style_sequence(sniffer, sequence),
        Node::Stream(stream) => styler.style_stream(sniffer, stream),
    }
}
