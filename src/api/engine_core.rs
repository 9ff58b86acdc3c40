use crate::core::{GeometryCache, NodeId, VisibilityState};
use crate::interaction::DragState;

use super::ScrollbarConfig;
use super::observer_hub::ObserverHub;
use super::render_scheduler::RenderScheduler;

/// Values read from the host's themed styles, kept until the styles change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct StyleCache {
    pub(super) thumb_min_size: f64,
}

/// What the surface currently shows, used to skip redundant writes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct LastRender {
    pub(super) thumb_extent: Option<f64>,
    pub(super) thumb_offset: Option<f64>,
}

impl LastRender {
    /// Forces the next pass to rewrite the thumb size.
    pub(super) fn invalidate_size(&mut self) {
        self.thumb_extent = None;
    }
}

/// Internal engine state used by the public facade (`ScrollbarEngine`).
pub(super) struct EngineCore {
    pub(super) config: ScrollbarConfig,
    /// Cleared on detach; every deferred callback checks it first.
    pub(super) live: bool,
    pub(super) mount: Option<NodeId>,
    pub(super) target: Option<NodeId>,
    pub(super) geometry: GeometryCache,
    pub(super) progress: f64,
    pub(super) style_cache: Option<StyleCache>,
    pub(super) last_render: LastRender,
    pub(super) scheduler: RenderScheduler,
    pub(super) drag: DragState,
    pub(super) visibility: VisibilityState,
    pub(super) hub: ObserverHub,
}

impl EngineCore {
    pub(super) fn new(config: ScrollbarConfig) -> Self {
        Self {
            geometry: GeometryCache::empty(config.orientation, config.thumb_min_size),
            visibility: VisibilityState::new(config.autohide, config.autohide_mode),
            config,
            live: true,
            mount: None,
            target: None,
            progress: 0.0,
            style_cache: None,
            last_render: LastRender::default(),
            scheduler: RenderScheduler::default(),
            drag: DragState::default(),
            hub: ObserverHub::default(),
        }
    }
}
