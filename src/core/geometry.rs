use serde::{Deserialize, Serialize};

use super::primitives::{
    PROGRESS_END_SNAP, THUMB_FLOOR_PX, THUMB_MIN_STAGE_RATIO, clamp_progress, nonzero_divisor,
    round2,
};
use super::types::{Orientation, ScrollMetrics, Size};

pub const DEFAULT_THUMB_MIN_SIZE: f64 = 50.0;

/// Measurements and derived travel ranges for one orientation.
///
/// A cache value is always produced whole by [`GeometryCache::recompute`]
/// and swapped in by the engine, so a render pass never observes a
/// half-updated cache.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryCache {
    pub orientation: Orientation,
    pub scroll_extent: f64,
    pub client_extent: f64,
    pub max_scroll_delta: f64,
    pub stage_extent: f64,
    pub thumb_extent: f64,
    pub stage_max_delta: f64,
    pub thumb_min_size: f64,
}

impl Default for GeometryCache {
    fn default() -> Self {
        Self::empty(Orientation::Vertical, DEFAULT_THUMB_MIN_SIZE)
    }
}

impl GeometryCache {
    /// Cache describing a target with nothing to scroll.
    #[must_use]
    pub const fn empty(orientation: Orientation, thumb_min_size: f64) -> Self {
        Self {
            orientation,
            scroll_extent: 0.0,
            client_extent: 0.0,
            max_scroll_delta: 0.0,
            stage_extent: 0.0,
            thumb_extent: 0.0,
            stage_max_delta: 0.0,
            thumb_min_size,
        }
    }

    /// Derives the cache from current target and stage measurements.
    ///
    /// Pure: reads the inputs only.
    #[must_use]
    pub fn recompute(
        metrics: ScrollMetrics,
        stage: Size,
        orientation: Orientation,
        thumb_min_size: f64,
    ) -> Self {
        let scroll_extent = sanitize_extent(metrics.scroll_size().along(orientation)).ceil();
        let client_extent = sanitize_extent(metrics.client_size().along(orientation));
        let stage_extent = sanitize_extent(stage.along(orientation));

        let max_scroll_delta = (scroll_extent - client_extent).max(0.0);
        let overflowing = scroll_extent > client_extent;

        let thumb_extent = if overflowing && stage_extent > 0.0 {
            let proportional = stage_extent * client_extent / nonzero_divisor(scroll_extent);
            let minimum = thumb_min_size.min(stage_extent * THUMB_MIN_STAGE_RATIO);
            round2(proportional.max(minimum))
                .max(THUMB_FLOOR_PX)
                .min(stage_extent)
        } else {
            0.0
        };

        Self {
            orientation,
            scroll_extent,
            client_extent,
            max_scroll_delta,
            stage_extent,
            thumb_extent,
            stage_max_delta: (stage_extent - thumb_extent).max(0.0),
            thumb_min_size,
        }
    }

    /// Target content overflows and the stage has been laid out.
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.scroll_extent > self.client_extent && self.stage_extent > 0.0 && self.thumb_extent > 0.0
    }

    /// Normalized progress for a scroll offset; 0 when there is nothing to scroll.
    #[must_use]
    pub fn progress_for_offset(&self, offset: f64) -> f64 {
        if self.max_scroll_delta <= 0.0 {
            return 0.0;
        }
        let progress = clamp_progress(offset / self.max_scroll_delta);
        if progress > PROGRESS_END_SNAP { 1.0 } else { progress }
    }

    #[must_use]
    pub fn offset_for_progress(&self, progress: f64) -> f64 {
        self.max_scroll_delta * clamp_progress(progress)
    }

    /// Thumb translation along the stage for a given progress.
    #[must_use]
    pub fn thumb_offset(&self, progress: f64) -> f64 {
        round2(clamp_progress(progress) * self.stage_max_delta)
    }

    /// Progress that centers the thumb on a point of the track.
    #[must_use]
    pub fn jump_progress(&self, offset_along_stage: f64) -> f64 {
        clamp_progress(
            (offset_along_stage - self.thumb_extent / 2.0) / nonzero_divisor(self.stage_max_delta),
        )
    }

    /// Progress after moving the pointer `delta` pixels from a gesture start.
    #[must_use]
    pub fn drag_progress(&self, start_progress: f64, delta: f64) -> f64 {
        clamp_progress(start_progress + delta / nonzero_divisor(self.stage_max_delta))
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
