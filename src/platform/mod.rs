//! Host seams the engine drives the outside world through.
//!
//! A browser binding, a native toolkit adapter and the in-memory
//! [`HeadlessHost`] all implement the same traits; the engine never assumes a
//! particular runtime.

mod headless;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    FrameRequestId, NodeId, Orientation, Overflow, ScrollBehavior, ScrollMetrics, Size, TimerId,
};
use crate::render::StageSurface;

pub use headless::{HeadlessHost, HeadlessNode, ScrollWrite};

/// Read/write access to the document holding the scroll target.
pub trait ScrollDocument {
    fn query_selector(&self, selector: &str) -> Option<NodeId>;

    fn parent_element(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Whether the node carries the explicit "this is the scroller" marker.
    fn has_scroller_marker(&self, node: NodeId) -> bool;

    fn body(&self) -> Option<NodeId>;

    fn document_element(&self) -> Option<NodeId>;

    /// The element scrolling the whole viewport, when the document has one.
    fn scrolling_root(&self) -> Option<NodeId>;

    fn overflow(&self, node: NodeId) -> Overflow;

    fn viewport_size(&self) -> Size;

    /// `None` once the node is gone from the document.
    fn scroll_metrics(&self, node: NodeId) -> Option<ScrollMetrics>;

    fn scroll_offset(&self, node: NodeId, orientation: Orientation) -> f64;

    fn scroll_to(
        &mut self,
        node: NodeId,
        orientation: Orientation,
        offset: f64,
        behavior: ScrollBehavior,
    );
}

/// External clock delivering at most one callback per tick.
pub trait FrameScheduler {
    fn request_animation_frame(&mut self) -> FrameRequestId;

    fn cancel_animation_frame(&mut self, id: FrameRequestId);
}

pub trait TimerScheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    fn clear_timeout(&mut self, id: TimerId);
}

/// Notification families the engine listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservedTopic {
    Resize,
    ChildList,
    Scroll,
    ViewportResize,
    Hover,
    PointerDown,
    /// Move/up/cancel listeners installed only while a drag is in flight.
    DragTracking,
    /// Style/class attribute changes of the mount node.
    HostStyle,
}

/// Where a subscription is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservedNode {
    Node(NodeId),
    /// Document-level proxy used when the target is the scrolling root.
    Document,
    Window,
    Stage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub topic: ObservedTopic,
    pub node: ObservedNode,
}

impl Subscription {
    #[must_use]
    pub const fn new(topic: ObservedTopic, node: ObservedNode) -> Self {
        Self { topic, node }
    }

    #[must_use]
    pub const fn on_node(topic: ObservedTopic, node: NodeId) -> Self {
        Self::new(topic, ObservedNode::Node(node))
    }
}

/// Installs and removes native listeners/observers.
pub trait ObserverBackend {
    fn subscribe(&mut self, subscription: Subscription);

    fn unsubscribe(&mut self, subscription: Subscription);
}

/// Everything an engine needs from its host.
pub trait ScrollbarHost:
    ScrollDocument + StageSurface + FrameScheduler + TimerScheduler + ObserverBackend
{
}

impl<T> ScrollbarHost for T where
    T: ScrollDocument + StageSurface + FrameScheduler + TimerScheduler + ObserverBackend
{
}
