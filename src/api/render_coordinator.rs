use tracing::{trace, warn};

use crate::core::{FrameRequestId, GeometryCache, ScrollBehavior};
use crate::platform::ScrollbarHost;
use crate::render::ThumbFrame;

use super::ScrollbarEngine;
use super::engine_core::StyleCache;

/// Offsets closer than this are treated as the same scroll position.
const SCROLL_EPSILON: f64 = 0.5;

impl<H: ScrollbarHost> ScrollbarEngine<H> {
    /// Clock callback for a frame requested through the host's `FrameScheduler`.
    pub fn on_animation_frame(&mut self, id: FrameRequestId) {
        if !self.core.live {
            trace!(frame = id.0, "ignoring animation frame after detach");
            return;
        }
        let Some(request) = self.core.scheduler.take_frame(id) else {
            return;
        };
        if request.recompute_geometry {
            self.recompute_geometry();
        }
        self.render_pass(request.from_scroll);
    }

    /// Scrolls the target to a normalized position along the configured axis.
    ///
    /// Does nothing when the target already sits at that offset.
    pub fn scroll_to(&mut self, progress: f64, behavior: ScrollBehavior) {
        if !self.core.live {
            return;
        }
        let Some(target) = self.core.target else {
            return;
        };
        let orientation = self.core.geometry.orientation;
        let offset = self.core.geometry.offset_for_progress(progress);
        let current = self.host.scroll_offset(target, orientation);
        if (current - offset).abs() < SCROLL_EPSILON {
            trace!(offset, "scroll target already at offset");
            return;
        }
        trace!(offset, ?behavior, "scroll target");
        self.host.scroll_to(target, orientation, offset, behavior);
    }

    fn thumb_min_size(&mut self) -> f64 {
        if let Some(cache) = self.core.style_cache {
            return cache.thumb_min_size;
        }
        let thumb_min_size = self
            .host
            .thumb_min_size_hint()
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(self.core.config.thumb_min_size);
        self.core.style_cache = Some(StyleCache { thumb_min_size });
        thumb_min_size
    }

    fn recompute_geometry(&mut self) {
        let Some(target) = self.core.target else {
            return;
        };
        let thumb_min_size = self.thumb_min_size();
        let orientation = self.core.config.orientation;
        self.core.geometry = match self.host.scroll_metrics(target) {
            Some(metrics) => GeometryCache::recompute(
                metrics,
                self.host.stage_rect().size(),
                orientation,
                thumb_min_size,
            ),
            None => {
                warn!(target = target.raw(), "scroll target no longer measurable");
                GeometryCache::empty(orientation, thumb_min_size)
            }
        };
        self.core.scheduler.stats.geometry_recomputes += 1;
        trace!(
            scroll = self.core.geometry.scroll_extent,
            client = self.core.geometry.client_extent,
            thumb = self.core.geometry.thumb_extent,
            "recomputed geometry"
        );
    }

    fn render_pass(&mut self, from_scroll: bool) {
        let Some(target) = self.core.target else {
            return;
        };
        self.core.scheduler.stats.render_passes += 1;

        let geometry = self.core.geometry;
        let offset = self.host.scroll_offset(target, geometry.orientation);
        let progress = geometry.progress_for_offset(offset);
        self.core.progress = progress;

        let thumb_extent = geometry.thumb_extent;
        let thumb_offset = geometry.thumb_offset(progress);
        let last = self.core.last_render;
        let extent_changed = last.thumb_extent != Some(thumb_extent);

        let mut frame = ThumbFrame::new(geometry.orientation);
        if extent_changed {
            frame = frame.with_thumb_extent(thumb_extent);
        }
        if geometry.is_scrollable() && (extent_changed || last.thumb_offset != Some(thumb_offset)) {
            frame = frame.with_thumb_offset(thumb_offset);
        }

        if frame.is_empty() {
            self.core.scheduler.stats.skipped_writes += 1;
        } else if let Err(err) = frame.validate() {
            warn!(error = %err, "skipping invalid thumb frame");
        } else {
            self.host.apply_thumb(&frame);
            self.core.scheduler.stats.surface_writes += 1;
            if let Some(extent) = frame.thumb_extent {
                self.core.last_render.thumb_extent = Some(extent);
            }
            if let Some(offset) = frame.thumb_offset {
                self.core.last_render.thumb_offset = Some(offset);
            }
        }

        self.core.visibility.flags.scrolling = from_scroll;
        self.evaluate_visibility();
        self.core.visibility.flags.scrolling = false;
    }
}
