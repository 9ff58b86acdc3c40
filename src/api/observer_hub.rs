use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::NodeId;
use crate::platform::{
    ObservedNode, ObservedTopic, ObserverBackend, ScrollDocument, ScrollbarHost, Subscription,
};

use super::scroller_resolver::is_root_element;
use super::{InvalidationRequest, ScrollbarEngine};

pub type NodeList = SmallVec<[NodeId; 4]>;

/// Surface a hover notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoverSurface {
    Scroller,
    Stage,
}

/// Notifications the host forwards from its observers and listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The target or one of its direct children changed size.
    Resized { node: NodeId },
    ViewportResized,
    ChildrenChanged { added: NodeList, removed: NodeList },
    Scrolled,
    PointerEntered(HoverSurface),
    PointerLeft(HoverSurface),
    /// Style or class of the mount changed; themed values may differ.
    HostStyleChanged,
}

/// Book-keeping of every subscription the engine installed on its host.
///
/// Subscriptions are grouped by lifetime so each group can be torn down
/// symmetrically: the target group when the target changes, the mount group
/// on detach, the drag group when a gesture ends.
#[derive(Debug, Default)]
pub(super) struct ObserverHub {
    target: IndexSet<Subscription>,
    mount: IndexSet<Subscription>,
    drag: IndexSet<Subscription>,
}

impl ObserverHub {
    pub(super) fn subscriptions(&self) -> impl Iterator<Item = Subscription> + '_ {
        self.mount
            .iter()
            .chain(self.target.iter())
            .chain(self.drag.iter())
            .copied()
    }

    pub(super) fn watch_target<H>(&mut self, host: &mut H, target: NodeId)
    where
        H: ScrollDocument + ObserverBackend + ?Sized,
    {
        let scroll_source = if host.scrolling_root() == Some(target) {
            ObservedNode::Document
        } else {
            ObservedNode::Node(target)
        };
        install(
            &mut self.target,
            host,
            Subscription::new(ObservedTopic::Scroll, scroll_source),
        );
        if is_root_element(&*host, target) {
            install(
                &mut self.target,
                host,
                Subscription::new(ObservedTopic::ViewportResize, ObservedNode::Window),
            );
        }
        install(
            &mut self.target,
            host,
            Subscription::on_node(ObservedTopic::Hover, target),
        );
        install(
            &mut self.target,
            host,
            Subscription::on_node(ObservedTopic::Resize, target),
        );
        for child in host.children(target) {
            install(
                &mut self.target,
                host,
                Subscription::on_node(ObservedTopic::Resize, child),
            );
        }
        install(
            &mut self.target,
            host,
            Subscription::on_node(ObservedTopic::ChildList, target),
        );
        debug!(
            target = target.raw(),
            count = self.target.len(),
            "subscribed to scroll target"
        );
    }

    pub(super) fn unwatch_target<B: ObserverBackend + ?Sized>(&mut self, backend: &mut B) {
        uninstall_all(&mut self.target, backend);
    }

    pub(super) fn watch_children<B: ObserverBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        added: &[NodeId],
        removed: &[NodeId],
    ) {
        for node in added {
            install(
                &mut self.target,
                backend,
                Subscription::on_node(ObservedTopic::Resize, *node),
            );
        }
        for node in removed {
            let subscription = Subscription::on_node(ObservedTopic::Resize, *node);
            if self.target.shift_remove(&subscription) {
                backend.unsubscribe(subscription);
            }
        }
    }

    pub(super) fn watch_mount<B: ObserverBackend + ?Sized>(&mut self, backend: &mut B, mount: NodeId) {
        for subscription in [
            Subscription::new(ObservedTopic::PointerDown, ObservedNode::Stage),
            Subscription::new(ObservedTopic::Hover, ObservedNode::Stage),
            Subscription::on_node(ObservedTopic::HostStyle, mount),
        ] {
            install(&mut self.mount, backend, subscription);
        }
    }

    pub(super) fn unwatch_mount<B: ObserverBackend + ?Sized>(&mut self, backend: &mut B) {
        uninstall_all(&mut self.mount, backend);
    }

    pub(super) fn watch_drag<B: ObserverBackend + ?Sized>(&mut self, backend: &mut B) {
        install(
            &mut self.drag,
            backend,
            Subscription::new(ObservedTopic::DragTracking, ObservedNode::Stage),
        );
    }

    pub(super) fn unwatch_drag<B: ObserverBackend + ?Sized>(&mut self, backend: &mut B) {
        uninstall_all(&mut self.drag, backend);
    }
}

fn install<B: ObserverBackend + ?Sized>(
    group: &mut IndexSet<Subscription>,
    backend: &mut B,
    subscription: Subscription,
) {
    if group.insert(subscription) {
        backend.subscribe(subscription);
    }
}

fn uninstall_all<B: ObserverBackend + ?Sized>(
    group: &mut IndexSet<Subscription>,
    backend: &mut B,
) {
    for subscription in group.drain(..) {
        backend.unsubscribe(subscription);
    }
}

impl<H: ScrollbarHost> ScrollbarEngine<H> {
    /// Normalizes one host notification into render requests and hover flags.
    pub fn dispatch(&mut self, event: HostEvent) {
        if !self.core.live {
            trace!(?event, "ignoring host event after detach");
            return;
        }
        match event {
            HostEvent::Resized { .. } | HostEvent::ViewportResized => {
                self.invalidate(InvalidationRequest::geometry());
            }
            HostEvent::ChildrenChanged { added, removed } => {
                if added.is_empty() && removed.is_empty() {
                    return;
                }
                self.core
                    .hub
                    .watch_children(&mut self.host, &added, &removed);
                self.invalidate(InvalidationRequest::geometry());
            }
            HostEvent::Scrolled => self.invalidate(InvalidationRequest::scroll()),
            HostEvent::PointerEntered(surface) => self.set_hover(surface, true),
            HostEvent::PointerLeft(surface) => self.set_hover(surface, false),
            HostEvent::HostStyleChanged => {
                self.core.style_cache = None;
                self.core.last_render.invalidate_size();
                self.invalidate(InvalidationRequest::geometry());
            }
        }
    }

    fn set_hover(&mut self, surface: HoverSurface, hovered: bool) {
        let flags = &mut self.core.visibility.flags;
        match surface {
            HoverSurface::Scroller => flags.hover_scroller = hovered,
            HoverSurface::Stage => flags.hover_stage = hovered,
        }
        trace!(?surface, hovered, "hover changed");
        self.evaluate_visibility();
    }
}
