use tracing::debug;

use crate::core::{
    AutohideMode, AutohidePolicy, GeometryCache, NodeId, Orientation, VisibilityState,
};
use crate::error::ScrollbarResult;
use crate::interaction::{DragSession, InteractionMode};
use crate::platform::{ScrollbarHost, Subscription};

use super::config_validation::{
    validate_autohide_policy, validate_config, validate_scroller_reference,
    validate_thumb_min_size,
};
use super::engine_core::EngineCore;
use super::{InvalidationRequest, RenderStats, ScrollbarConfig, ScrollerReference};

/// Main orchestration facade consumed by host integrations.
///
/// `ScrollbarEngine` owns the geometry cache, render scheduler, drag and
/// autohide state of one overlay, and talks to the outside world only
/// through its host `H`.
pub struct ScrollbarEngine<H: ScrollbarHost> {
    pub(super) host: H,
    pub(super) core: EngineCore,
}

impl<H: ScrollbarHost> ScrollbarEngine<H> {
    /// Creates a live engine with no scroll target yet.
    ///
    /// Call [`on_attach`](Self::on_attach) once the overlay is mounted, or
    /// [`attach`](Self::attach) to bind a target directly.
    pub fn new(host: H, config: ScrollbarConfig) -> ScrollbarResult<Self> {
        validate_config(&config)?;
        debug!(
            orientation = ?config.orientation,
            autohide = ?config.autohide,
            mode = ?config.autohide_mode,
            "create scrollbar engine"
        );
        Ok(Self {
            host,
            core: EngineCore::new(config),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScrollbarConfig {
        &self.core.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.core.live
    }

    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        self.core.target
    }

    #[must_use]
    pub fn mount(&self) -> Option<NodeId> {
        self.core.mount
    }

    #[must_use]
    pub fn geometry(&self) -> GeometryCache {
        self.core.geometry
    }

    /// Progress observed by the latest render pass.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.core.progress
    }

    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.core.target.is_some() && self.core.geometry.is_scrollable()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.core.visibility.visible
    }

    #[must_use]
    pub fn visibility_state(&self) -> VisibilityState {
        self.core.visibility
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.core.drag.mode()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.core.drag.is_dragging()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        self.core.drag.session()
    }

    #[must_use]
    pub fn render_stats(&self) -> RenderStats {
        self.core.scheduler.stats
    }

    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.core.scheduler.has_pending_frame()
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationRequest {
        self.core.scheduler.pending_request()
    }

    /// Subscriptions currently installed on the host, in installation order.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.core.hub.subscriptions().collect()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.core.config.orientation == orientation {
            return;
        }
        debug!(?orientation, "orientation changed");
        self.core.config.orientation = orientation;
        self.core.last_render.invalidate_size();
        self.core.last_render.thumb_offset = None;
        self.invalidate(InvalidationRequest::geometry());
    }

    pub fn set_thumb_min_size(&mut self, size: f64) -> ScrollbarResult<()> {
        validate_thumb_min_size(size)?;
        self.core.config.thumb_min_size = size;
        self.core.last_render.invalidate_size();
        self.invalidate(InvalidationRequest::geometry());
        Ok(())
    }

    pub fn set_autohide(&mut self, policy: AutohidePolicy) -> ScrollbarResult<()> {
        validate_autohide_policy(policy)?;
        if self.core.config.autohide == policy {
            return Ok(());
        }
        debug!(?policy, "autohide policy changed");
        self.core.config.autohide = policy;
        self.core.visibility.policy = policy;
        self.evaluate_visibility();
        Ok(())
    }

    pub fn set_autohide_mode(&mut self, mode: AutohideMode) {
        if self.core.config.autohide_mode == mode {
            return;
        }
        debug!(?mode, "autohide mode changed");
        self.core.config.autohide_mode = mode;
        self.core.visibility.mode = mode;
        self.evaluate_visibility();
    }

    /// Replaces the scroller reference and rebinds when live.
    pub fn set_scroller_reference(
        &mut self,
        reference: impl Into<ScrollerReference>,
    ) -> ScrollbarResult<()> {
        let reference = reference.into();
        validate_scroller_reference(&reference)?;
        self.attach(reference);
        Ok(())
    }

    /// Queues a render for the next frame.
    pub fn invalidate(&mut self, request: InvalidationRequest) {
        if !self.core.live {
            return;
        }
        self.core.scheduler.invalidate(request, &mut self.host);
    }
}
