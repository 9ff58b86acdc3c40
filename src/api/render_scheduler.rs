use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::FrameRequestId;
use crate::platform::FrameScheduler;

use super::InvalidationRequest;

/// Counters describing scheduler and render activity since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderStats {
    pub invalidations: u64,
    pub frames_requested: u64,
    pub frames_cancelled: u64,
    pub geometry_recomputes: u64,
    pub render_passes: u64,
    /// Passes that changed the thumb on the surface.
    pub surface_writes: u64,
    /// Passes whose thumb state matched the previous pass.
    pub skipped_writes: u64,
}

/// Collapses any number of invalidations into one pending frame.
#[derive(Debug, Default)]
pub(super) struct RenderScheduler {
    pending_frame: Option<FrameRequestId>,
    pending: InvalidationRequest,
    pub(super) stats: RenderStats,
}

impl RenderScheduler {
    #[must_use]
    pub(super) fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    #[must_use]
    pub(super) fn pending_request(&self) -> InvalidationRequest {
        self.pending
    }

    /// Merges the request and asks the clock for a frame unless one is pending.
    ///
    /// Returns `true` when a new frame was requested.
    pub(super) fn invalidate<C: FrameScheduler + ?Sized>(
        &mut self,
        request: InvalidationRequest,
        clock: &mut C,
    ) -> bool {
        self.stats.invalidations += 1;
        self.pending.merge(request);
        if self.pending_frame.is_some() {
            return false;
        }
        let id = clock.request_animation_frame();
        trace!(frame = id.0, "requested animation frame");
        self.pending_frame = Some(id);
        self.stats.frames_requested += 1;
        true
    }

    /// Claims the accumulated request when `id` is the frame we are waiting for.
    pub(super) fn take_frame(&mut self, id: FrameRequestId) -> Option<InvalidationRequest> {
        if self.pending_frame != Some(id) {
            trace!(frame = id.0, "ignoring stale animation frame");
            return None;
        }
        self.pending_frame = None;
        Some(std::mem::take(&mut self.pending))
    }

    pub(super) fn cancel<C: FrameScheduler + ?Sized>(&mut self, clock: &mut C) {
        if let Some(id) = self.pending_frame.take() {
            clock.cancel_animation_frame(id);
            self.stats.frames_cancelled += 1;
        }
        self.pending = InvalidationRequest::none();
    }
}
