use tracing::{debug, trace};

use crate::core::TimerId;
use crate::platform::ScrollbarHost;

use super::ScrollbarEngine;

impl<H: ScrollbarHost> ScrollbarEngine<H> {
    /// Timer callback for a hide scheduled through the host's `TimerScheduler`.
    pub fn on_timer(&mut self, id: TimerId) {
        if !self.core.live {
            trace!(timer = id.0, "ignoring timer after detach");
            return;
        }
        if self.core.visibility.hide_timer != Some(id) {
            trace!(timer = id.0, "ignoring stale timer");
            return;
        }
        self.core.visibility.hide_timer = None;
        if self.core.visibility.should_hide_on_fire() {
            self.apply_visibility(false);
        } else {
            trace!("hide skipped; bar still in use");
        }
    }

    /// Reveals the bar and, under autohide, schedules its fade.
    pub fn show(&mut self) {
        if !self.core.live || self.core.visibility.visible {
            return;
        }
        self.apply_visibility(true);
        self.start_hide_timer();
    }

    /// Hides the bar unless a drag, stage hover or (mode permitting)
    /// scroller hover keeps it on screen.
    pub fn hide(&mut self) {
        if !self.core.live || self.core.visibility.is_hide_suppressed() {
            return;
        }
        self.clear_hide_timer();
        self.apply_visibility(false);
    }

    /// Re-derives visibility from the current flags and geometry.
    pub(super) fn evaluate_visibility(&mut self) {
        if !self.core.live {
            return;
        }
        self.clear_hide_timer();
        let plan = self.core.visibility.plan(self.is_scrollable());
        if let Some(visible) = plan.apply {
            self.apply_visibility(visible);
        }
        if let Some(delay) = plan.schedule_hide {
            let id = self.host.set_timeout(delay);
            trace!(timer = id.0, delay_ms = delay.as_millis() as u64, "scheduled hide");
            self.core.visibility.hide_timer = Some(id);
        }
    }

    fn start_hide_timer(&mut self) {
        let Some(delay) = self.core.visibility.policy.delay() else {
            return;
        };
        if self.core.visibility.is_hide_suppressed() {
            return;
        }
        self.clear_hide_timer();
        self.core.visibility.hide_timer = Some(self.host.set_timeout(delay));
    }

    pub(super) fn clear_hide_timer(&mut self) {
        if let Some(id) = self.core.visibility.hide_timer.take() {
            self.host.clear_timeout(id);
        }
    }

    fn apply_visibility(&mut self, visible: bool) {
        if self.core.visibility.visible == visible {
            return;
        }
        debug!(visible, "stage visibility changed");
        self.core.visibility.visible = visible;
        self.host.set_stage_visible(visible);
    }
}
