use tracing::debug;

use crate::core::{GeometryCache, NodeId, VisibilityFlags};
use crate::platform::ScrollbarHost;

use super::engine_core::LastRender;
use super::scroller_resolver::{resolve_document_candidate, resolve_implicit_scroller};
use super::{InvalidationRequest, ScrollbarEngine, ScrollerReference};

impl<H: ScrollbarHost> ScrollbarEngine<H> {
    /// Lifecycle hook for when the overlay is mounted under `mount`.
    ///
    /// Installs stage/mount listeners and binds the configured scroller.
    pub fn on_attach(&mut self, mount: NodeId) {
        if self.core.live && self.core.mount == Some(mount) {
            return;
        }
        if self.core.live && self.core.mount.is_some() {
            self.on_detach();
        }
        debug!(mount = mount.raw(), "overlay attached");
        self.core.live = true;
        self.core.mount = Some(mount);
        self.core.hub.watch_mount(&mut self.host, mount);
        let reference = self.core.config.scroller.clone();
        self.attach(reference);
    }

    /// Lifecycle hook for when the overlay leaves the document.
    ///
    /// Nothing scheduled before this call runs afterwards.
    pub fn on_detach(&mut self) {
        if !self.core.live {
            return;
        }
        debug!(target = ?self.core.target.map(NodeId::raw), "overlay detached");
        self.core.hub.unwatch_target(&mut self.host);
        self.core.hub.unwatch_mount(&mut self.host);
        self.force_end_drag();
        self.core.visibility.flags = VisibilityFlags::default();
        self.core.live = false;
        self.clear_hide_timer();
        self.core.scheduler.cancel(&mut self.host);
        self.core.mount = None;
    }

    /// Binds the overlay to a scroll target.
    ///
    /// Previous target subscriptions are always torn down first. An
    /// unresolvable reference leaves the engine inert until the next call.
    pub fn attach(&mut self, reference: impl Into<ScrollerReference>) {
        let reference = reference.into();
        self.core.config.scroller = reference.clone();
        if !self.core.live {
            debug!(?reference, "stored scroller reference while detached");
            return;
        }

        self.core.hub.unwatch_target(&mut self.host);
        // its pointer-leave can no longer arrive
        self.core.visibility.flags.hover_scroller = false;
        let resolved = match &reference {
            ScrollerReference::Auto => self
                .core
                .mount
                .and_then(|mount| resolve_implicit_scroller(&self.host, mount)),
            ScrollerReference::Selector(selector) => self
                .host
                .query_selector(selector)
                .map(|node| resolve_document_candidate(&self.host, node)),
            ScrollerReference::Node(node) => Some(resolve_document_candidate(&self.host, *node)),
        };
        self.core.target = resolved;
        self.core.last_render = LastRender::default();

        let Some(target) = resolved else {
            debug!(?reference, "no scroll target resolved; overlay stays inert");
            self.core.geometry =
                GeometryCache::empty(self.core.config.orientation, self.core.geometry.thumb_min_size);
            self.core.progress = 0.0;
            self.evaluate_visibility();
            return;
        };

        debug!(target = target.raw(), ?reference, "bound scroll target");
        self.core.hub.watch_target(&mut self.host, target);
        self.invalidate(InvalidationRequest::geometry());
    }
}
