use std::collections::VecDeque;
use std::time::Duration;

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::api::{HostEvent, HoverSurface, NodeList, ScrollbarEngine};
use crate::core::{
    FrameRequestId, NodeId, Orientation, Overflow, Rect, ScrollBehavior, ScrollMetrics, Size,
    TimerId,
};
use crate::error::{ScrollbarError, ScrollbarResult};
use crate::render::{StageSurface, ThumbFrame};

use super::{
    FrameScheduler, ObservedNode, ObservedTopic, ObserverBackend, ScrollDocument, Subscription,
    TimerScheduler,
};

/// Upper bound on frames `settle` pumps before giving up on a feedback loop.
const SETTLE_FRAME_LIMIT: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessNode {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub scroller_marker: bool,
    pub overflow: Overflow,
    pub scroll_size: Size,
    pub client_size: Size,
    pub scroll_left: f64,
    pub scroll_top: f64,
}

impl HeadlessNode {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            scroller_marker: false,
            overflow: Overflow::default(),
            scroll_size: Size::default(),
            client_size: Size::default(),
            scroll_left: 0.0,
            scroll_top: 0.0,
        }
    }

    fn max_offset(&self, orientation: Orientation) -> f64 {
        (self.scroll_size.along(orientation) - self.client_size.along(orientation)).max(0.0)
    }
}

/// Scroll write issued through [`ScrollDocument::scroll_to`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollWrite {
    pub node: NodeId,
    pub orientation: Orientation,
    pub offset: f64,
    pub behavior: ScrollBehavior,
}

/// Deterministic in-memory host.
///
/// Models a small document tree, a stage surface, a virtual clock with a
/// frame queue and timers, and the observers the engine installs. Native
/// notifications are queued only when a matching subscription exists, so
/// tests observe the same feedback loops a real host produces (a scroll
/// write comes back as a `Scrolled` event, and so on).
#[derive(Debug)]
pub struct HeadlessHost {
    nodes: IndexMap<NodeId, HeadlessNode>,
    next_node: u64,
    document_element: NodeId,
    body: NodeId,
    scrolling_root: Option<NodeId>,
    viewport: Size,
    selectors: IndexMap<String, NodeId>,

    stage_rect: Rect,
    thumb_min_size_hint: Option<f64>,
    stage_visible: bool,
    thumb_extent: f64,
    thumb_offset: f64,
    captured_pointers: IndexSet<i32>,

    now_ms: u64,
    next_frame: u64,
    pending_frames: VecDeque<FrameRequestId>,
    next_timer: u64,
    timers: IndexMap<TimerId, u64>,

    subscriptions: IndexSet<Subscription>,
    subscribe_calls: usize,
    unsubscribe_calls: usize,
    events: VecDeque<HostEvent>,

    pub scroll_writes: Vec<ScrollWrite>,
    pub thumb_frames: Vec<ThumbFrame>,
    pub visibility_writes: Vec<bool>,
    pub capture_releases: Vec<i32>,
}

impl HeadlessHost {
    /// Creates a document with a root element and an empty body.
    ///
    /// The root element is the scrolling root and its client size is the
    /// viewport.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let document_element = NodeId::from_raw(1);
        let body = NodeId::from_raw(2);
        let mut root = HeadlessNode::new(None);
        root.children.push(body);
        root.client_size = viewport;
        root.scroll_size = viewport;
        let mut body_node = HeadlessNode::new(Some(document_element));
        body_node.client_size = viewport;
        body_node.scroll_size = viewport;

        let mut nodes = IndexMap::new();
        nodes.insert(document_element, root);
        nodes.insert(body, body_node);

        Self {
            nodes,
            next_node: 3,
            document_element,
            body,
            scrolling_root: Some(document_element),
            viewport,
            selectors: IndexMap::new(),
            stage_rect: Rect::default(),
            thumb_min_size_hint: None,
            stage_visible: false,
            thumb_extent: 0.0,
            thumb_offset: 0.0,
            captured_pointers: IndexSet::new(),
            now_ms: 0,
            next_frame: 1,
            pending_frames: VecDeque::new(),
            next_timer: 1,
            timers: IndexMap::new(),
            subscriptions: IndexSet::new(),
            subscribe_calls: 0,
            unsubscribe_calls: 0,
            events: VecDeque::new(),
            scroll_writes: Vec::new(),
            thumb_frames: Vec::new(),
            visibility_writes: Vec::new(),
            capture_releases: Vec::new(),
        }
    }

    /// Appends a new element under `parent`.
    ///
    /// Queues a child-list notification when the parent is observed.
    pub fn add_node(&mut self, parent: NodeId) -> NodeId {
        let id = NodeId::from_raw(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, HeadlessNode::new(Some(parent)));
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        if self.is_observed(ObservedTopic::ChildList, ObservedNode::Node(parent)) {
            let mut added = NodeList::new();
            added.push(id);
            self.events.push_back(HostEvent::ChildrenChanged {
                added,
                removed: NodeList::new(),
            });
        }
        id
    }

    /// Removes a node and its subtree from the document.
    pub fn remove_node(&mut self, node: NodeId) {
        let Some(removed) = self.nodes.shift_remove(&node) else {
            return;
        };
        for child in removed.children {
            self.remove_node(child);
        }
        self.selectors.retain(|_, target| *target != node);
        let Some(parent) = removed.parent else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|child| *child != node);
        }
        if self.is_observed(ObservedTopic::ChildList, ObservedNode::Node(parent)) {
            let mut removed_list = NodeList::new();
            removed_list.push(node);
            self.events.push_back(HostEvent::ChildrenChanged {
                added: NodeList::new(),
                removed: removed_list,
            });
        }
    }

    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&HeadlessNode> {
        self.nodes.get(&node)
    }

    pub fn register_selector(&mut self, selector: impl Into<String>, node: NodeId) {
        self.selectors.insert(selector.into(), node);
    }

    pub fn set_scroller_marker(&mut self, node: NodeId, marked: bool) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.scroller_marker = marked;
        }
    }

    pub fn set_overflow(&mut self, node: NodeId, overflow: Overflow) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.overflow = overflow;
        }
    }

    pub fn set_scrolling_root(&mut self, node: Option<NodeId>) {
        self.scrolling_root = node;
    }

    /// Sets the content size; queues a resize when the node is observed.
    pub fn set_scroll_size(&mut self, node: NodeId, size: Size) {
        let Some(entry) = self.nodes.get_mut(&node) else {
            return;
        };
        entry.scroll_size = size;
        self.clamp_offsets(node);
        self.notify_resize(node);
    }

    /// Sets the visible size; queues a resize when the node is observed.
    pub fn set_client_size(&mut self, node: NodeId, size: Size) {
        let Some(entry) = self.nodes.get_mut(&node) else {
            return;
        };
        entry.client_size = size;
        self.clamp_offsets(node);
        self.notify_resize(node);
    }

    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.viewport = viewport;
        if self.is_observed(ObservedTopic::ViewportResize, ObservedNode::Window) {
            self.events.push_back(HostEvent::ViewportResized);
        }
    }

    /// Simulates the user scrolling the node (wheel, keyboard, touch).
    pub fn user_scroll(&mut self, node: NodeId, orientation: Orientation, offset: f64) {
        self.write_offset(node, orientation, offset);
    }

    pub fn set_stage_rect(&mut self, rect: Rect) {
        self.stage_rect = rect;
    }

    pub fn set_thumb_min_size_hint(&mut self, hint: Option<f64>) {
        self.thumb_min_size_hint = hint;
    }

    /// Queues a style change notification for the mount, if observed.
    pub fn touch_host_style(&mut self) {
        if self
            .subscriptions
            .iter()
            .any(|subscription| subscription.topic == ObservedTopic::HostStyle)
        {
            self.events.push_back(HostEvent::HostStyleChanged);
        }
    }

    /// Moves the pointer onto or off a surface, queueing hover notifications.
    pub fn hover(&mut self, surface: HoverSurface, entered: bool) {
        let observed = self.subscriptions.iter().any(|subscription| {
            subscription.topic == ObservedTopic::Hover
                && match surface {
                    HoverSurface::Stage => subscription.node == ObservedNode::Stage,
                    HoverSurface::Scroller => matches!(subscription.node, ObservedNode::Node(_)),
                }
        });
        if !observed {
            return;
        }
        self.events.push_back(if entered {
            HostEvent::PointerEntered(surface)
        } else {
            HostEvent::PointerLeft(surface)
        });
    }

    /// Drops a pointer capture behind the engine's back.
    pub fn lose_pointer_capture(&mut self, pointer_id: i32) {
        self.captured_pointers.shift_remove(&pointer_id);
    }

    pub fn push_event(&mut self, event: HostEvent) {
        self.events.push_back(event);
    }

    pub fn pop_event(&mut self) -> Option<HostEvent> {
        self.events.pop_front()
    }

    /// Takes the oldest outstanding frame request, as the clock would fire it.
    pub fn take_frame(&mut self) -> Option<FrameRequestId> {
        self.pending_frames.pop_front()
    }

    #[must_use]
    pub fn pending_frame_count(&self) -> usize {
        self.pending_frames.len()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Earliest timer due at or before `deadline_ms`.
    pub fn next_due_timer(&self, deadline_ms: u64) -> Option<(TimerId, u64)> {
        self.timers
            .iter()
            .filter(|(_, due)| **due <= deadline_ms)
            .min_by_key(|(id, due)| (**due, id.0))
            .map(|(id, due)| (*id, *due))
    }

    /// Advances the clock to `due_ms` and removes the timer, as the host would
    /// before invoking its callback.
    pub fn fire_timer(&mut self, id: TimerId, due_ms: u64) -> bool {
        self.now_ms = self.now_ms.max(due_ms);
        self.timers.shift_remove(&id).is_some()
    }

    pub fn set_now_ms(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    #[must_use]
    pub fn is_stage_visible(&self) -> bool {
        self.stage_visible
    }

    #[must_use]
    pub fn thumb_extent(&self) -> f64 {
        self.thumb_extent
    }

    #[must_use]
    pub fn thumb_offset(&self) -> f64 {
        self.thumb_offset
    }

    #[must_use]
    pub fn is_pointer_captured(&self, pointer_id: i32) -> bool {
        self.captured_pointers.contains(&pointer_id)
    }

    #[must_use]
    pub fn active_subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions.iter().copied().collect()
    }

    #[must_use]
    pub fn is_observed(&self, topic: ObservedTopic, node: ObservedNode) -> bool {
        self.subscriptions.contains(&Subscription::new(topic, node))
    }

    #[must_use]
    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls
    }

    #[must_use]
    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls
    }

    fn clamp_offsets(&mut self, node: NodeId) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.scroll_top = entry.scroll_top.min(entry.max_offset(Orientation::Vertical));
            entry.scroll_left = entry
                .scroll_left
                .min(entry.max_offset(Orientation::Horizontal));
        }
    }

    fn notify_resize(&mut self, node: NodeId) {
        if self.is_observed(ObservedTopic::Resize, ObservedNode::Node(node)) {
            self.events.push_back(HostEvent::Resized { node });
        }
    }

    fn write_offset(&mut self, node: NodeId, orientation: Orientation, offset: f64) {
        let Some(entry) = self.nodes.get_mut(&node) else {
            return;
        };
        let clamped = offset.clamp(0.0, entry.max_offset(orientation));
        let slot = match orientation {
            Orientation::Vertical => &mut entry.scroll_top,
            Orientation::Horizontal => &mut entry.scroll_left,
        };
        if *slot == clamped {
            return;
        }
        *slot = clamped;

        let source = if self.scrolling_root == Some(node) {
            ObservedNode::Document
        } else {
            ObservedNode::Node(node)
        };
        if self.is_observed(ObservedTopic::Scroll, source) {
            self.events.push_back(HostEvent::Scrolled);
        }
    }
}

impl ScrollDocument for HeadlessHost {
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.selectors.get(selector).copied()
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|entry| entry.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|entry| entry.children.clone())
            .unwrap_or_default()
    }

    fn has_scroller_marker(&self, node: NodeId) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|entry| entry.scroller_marker)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn document_element(&self) -> Option<NodeId> {
        Some(self.document_element)
    }

    fn scrolling_root(&self) -> Option<NodeId> {
        self.scrolling_root
    }

    fn overflow(&self, node: NodeId) -> Overflow {
        self.nodes
            .get(&node)
            .map(|entry| entry.overflow)
            .unwrap_or_default()
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_metrics(&self, node: NodeId) -> Option<ScrollMetrics> {
        self.nodes
            .get(&node)
            .map(|entry| ScrollMetrics::new(entry.scroll_size, entry.client_size))
    }

    fn scroll_offset(&self, node: NodeId, orientation: Orientation) -> f64 {
        self.nodes.get(&node).map_or(0.0, |entry| match orientation {
            Orientation::Vertical => entry.scroll_top,
            Orientation::Horizontal => entry.scroll_left,
        })
    }

    fn scroll_to(
        &mut self,
        node: NodeId,
        orientation: Orientation,
        offset: f64,
        behavior: ScrollBehavior,
    ) {
        self.scroll_writes.push(ScrollWrite {
            node,
            orientation,
            offset,
            behavior,
        });
        self.write_offset(node, orientation, offset);
    }
}

impl StageSurface for HeadlessHost {
    fn stage_rect(&self) -> Rect {
        self.stage_rect
    }

    fn thumb_min_size_hint(&self) -> Option<f64> {
        self.thumb_min_size_hint
    }

    fn apply_thumb(&mut self, frame: &ThumbFrame) {
        if let Some(extent) = frame.thumb_extent {
            self.thumb_extent = extent;
        }
        if let Some(offset) = frame.thumb_offset {
            self.thumb_offset = offset;
        }
        self.thumb_frames.push(*frame);
    }

    fn set_stage_visible(&mut self, visible: bool) {
        self.stage_visible = visible;
        self.visibility_writes.push(visible);
    }

    fn set_pointer_capture(&mut self, pointer_id: i32) {
        self.captured_pointers.insert(pointer_id);
    }

    fn release_pointer_capture(&mut self, pointer_id: i32) -> ScrollbarResult<()> {
        self.capture_releases.push(pointer_id);
        if self.captured_pointers.shift_remove(&pointer_id) {
            Ok(())
        } else {
            Err(ScrollbarError::PointerCaptureLost { pointer_id })
        }
    }
}

impl FrameScheduler for HeadlessHost {
    fn request_animation_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_frame);
        self.next_frame += 1;
        self.pending_frames.push_back(id);
        id
    }

    fn cancel_animation_frame(&mut self, id: FrameRequestId) {
        self.pending_frames.retain(|pending| *pending != id);
    }
}

impl TimerScheduler for HeadlessHost {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.timers.insert(id, self.now_ms.saturating_add(delay_ms));
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.shift_remove(&id);
    }
}

impl ObserverBackend for HeadlessHost {
    fn subscribe(&mut self, subscription: Subscription) {
        self.subscribe_calls += 1;
        self.subscriptions.insert(subscription);
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.unsubscribe_calls += 1;
        self.subscriptions.shift_remove(&subscription);
    }
}

/// Event-loop driving for engines running on a [`HeadlessHost`].
impl ScrollbarEngine<HeadlessHost> {
    /// Delivers every queued host notification; returns how many were delivered.
    pub fn flush_events(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.host_mut().pop_event() {
            self.dispatch(event);
            delivered += 1;
        }
        delivered
    }

    /// Delivers queued notifications, then fires one animation frame.
    ///
    /// Returns `false` when no frame was pending.
    pub fn flush_frame(&mut self) -> bool {
        self.flush_events();
        let Some(id) = self.host_mut().take_frame() else {
            return false;
        };
        self.on_animation_frame(id);
        self.flush_events();
        true
    }

    /// Pumps frames until the engine stops requesting them.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while frames < SETTLE_FRAME_LIMIT && self.flush_frame() {
            frames += 1;
        }
        frames
    }

    /// Moves the virtual clock forward, firing due timers in order.
    pub fn advance_time(&mut self, millis: u64) {
        let deadline = self.host().now_ms().saturating_add(millis);
        while let Some((id, due)) = self.host().next_due_timer(deadline) {
            if self.host_mut().fire_timer(id, due) {
                trace!(timer = id.0, due, "firing headless timer");
                self.on_timer(id);
                self.flush_events();
            }
        }
        self.host_mut().set_now_ms(deadline);
    }
}
