use tracing::{debug, trace};

use crate::core::ScrollBehavior;
use crate::interaction::{DragSession, EventDisposition, PointerInput};
use crate::platform::ScrollbarHost;

use super::ScrollbarEngine;

impl<H: ScrollbarHost> ScrollbarEngine<H> {
    /// Pointer-down on the stage.
    ///
    /// The returned disposition tells the host whether to suppress the
    /// native default action and propagation.
    pub fn pointer_down(&mut self, input: PointerInput) -> EventDisposition {
        if !self.core.live || !self.is_scrollable() {
            trace!(pointer = input.pointer_id, "pointer-down on inert overlay");
            return EventDisposition::untouched();
        }
        let stage_rect = self.host.stage_rect();
        let Some(start) =
            self.core
                .drag
                .begin(input, stage_rect, &self.core.geometry, self.core.progress)
        else {
            trace!(pointer = input.pointer_id, "pointer-down ignored");
            return EventDisposition::untouched();
        };

        debug!(
            pointer = start.session.pointer_id,
            start_progress = start.session.start_progress,
            jump = start.jump_to.is_some(),
            "drag started"
        );
        self.host.set_pointer_capture(input.pointer_id);
        self.core.hub.watch_drag(&mut self.host);
        self.core.visibility.flags.dragging = true;
        self.evaluate_visibility();

        if let Some(progress) = start.jump_to {
            self.scroll_to(progress, ScrollBehavior::Smooth);
        }
        EventDisposition::consumed()
    }

    /// Pointer-move while a drag may be in flight; foreign pointers are ignored.
    pub fn pointer_move(&mut self, input: PointerInput) {
        if !self.core.live {
            return;
        }
        if let Some(progress) = self.core.drag.track(input, &self.core.geometry) {
            self.scroll_to(progress, ScrollBehavior::Instant);
        }
    }

    pub fn pointer_up(&mut self, pointer_id: i32) {
        self.finish_drag(pointer_id);
    }

    pub fn pointer_cancel(&mut self, pointer_id: i32) {
        self.finish_drag(pointer_id);
    }

    fn finish_drag(&mut self, pointer_id: i32) {
        if !self.core.live {
            return;
        }
        let Some(session) = self.core.drag.finish(pointer_id) else {
            trace!(pointer = pointer_id, "pointer release ignored");
            return;
        };
        self.release_drag(session);
        self.evaluate_visibility();
    }

    /// Ends any gesture regardless of pointer id.
    pub(super) fn force_end_drag(&mut self) {
        if let Some(session) = self.core.drag.force_idle() {
            self.release_drag(session);
        }
    }

    fn release_drag(&mut self, session: DragSession) {
        if let Err(err) = self.host.release_pointer_capture(session.pointer_id) {
            debug!(error = %err, "pointer capture already released");
        }
        self.core.hub.unwatch_drag(&mut self.host);
        self.core.visibility.flags.dragging = false;
        debug!(pointer = session.pointer_id, "drag ended");
    }
}
