use tracing::trace;

use crate::core::NodeId;
use crate::platform::{ScrollDocument, ScrollbarHost};

use super::ScrollbarEngine;

/// Document-level element: root, scrolling root or body.
pub(super) fn is_root_element<D: ScrollDocument + ?Sized>(doc: &D, node: NodeId) -> bool {
    doc.document_element() == Some(node)
        || doc.scrolling_root() == Some(node)
        || doc.body() == Some(node)
}

/// Maps a body candidate to the element that actually scrolls the page.
///
/// The body only counts when its own overflow allows scrolling and its
/// content is taller than the viewport.
pub(super) fn resolve_document_candidate<D: ScrollDocument + ?Sized>(
    doc: &D,
    node: NodeId,
) -> NodeId {
    if doc.body() != Some(node) {
        return node;
    }
    let body_scrolls = doc.overflow(node).allows_scrolling()
        && doc
            .scroll_metrics(node)
            .is_some_and(|metrics| metrics.scroll_height > doc.viewport_size().height);
    if body_scrolls {
        return node;
    }
    doc.scrolling_root()
        .or_else(|| doc.document_element())
        .unwrap_or(node)
}

/// Walks the ancestors of `from` for a marked scroller, checking each
/// ancestor and then its direct children.
pub(super) fn resolve_implicit_scroller<D: ScrollDocument + ?Sized>(
    doc: &D,
    from: NodeId,
) -> Option<NodeId> {
    let mut parent = doc.parent_element(from);
    while let Some(node) = parent {
        if doc.has_scroller_marker(node) {
            return Some(resolve_document_candidate(doc, node));
        }
        if let Some(child) = doc
            .children(node)
            .into_iter()
            .find(|child| doc.has_scroller_marker(*child))
        {
            return Some(resolve_document_candidate(doc, child));
        }
        parent = doc.parent_element(node);
    }
    trace!(from = from.raw(), "no marked scroller; using scrolling root");
    doc.scrolling_root().or_else(|| doc.document_element())
}

impl<H: ScrollbarHost> ScrollbarEngine<H> {
    /// Finds the scroll container an overlay mounted at `from` belongs to.
    #[must_use]
    pub fn resolve_implicit_scroller(&self, from: NodeId) -> Option<NodeId> {
        resolve_implicit_scroller(&self.host, from)
    }
}
