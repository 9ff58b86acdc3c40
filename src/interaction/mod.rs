use serde::{Deserialize, Serialize};

use crate::core::{GeometryCache, Orientation, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

/// Mouse button reported with a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(u16),
}

/// Part of the stage a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitTarget {
    Thumb,
    Track,
}

/// Pointer event delivered by the host, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub pointer_id: i32,
    pub button: PointerButton,
    pub client_x: f64,
    pub client_y: f64,
    pub hit: HitTarget,
}

impl PointerInput {
    #[must_use]
    pub fn primary(pointer_id: i32, client_x: f64, client_y: f64, hit: HitTarget) -> Self {
        Self {
            pointer_id,
            button: PointerButton::Primary,
            client_x,
            client_y,
            hit,
        }
    }

    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub fn coord(&self, orientation: Orientation) -> f64 {
        orientation.along(self.client_x, self.client_y)
    }
}

/// What the host should do with the native event after the engine handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventDisposition {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventDisposition {
    #[must_use]
    pub const fn untouched() -> Self {
        Self {
            prevent_default: false,
            stop_propagation: false,
        }
    }

    #[must_use]
    pub const fn consumed() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: true,
        }
    }

    #[must_use]
    pub const fn is_consumed(self) -> bool {
        self.prevent_default && self.stop_propagation
    }
}

/// One continuous pointer gesture on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub pointer_id: i32,
    pub start_pointer_coord: f64,
    pub start_progress: f64,
}

/// Result of starting a gesture: where the target should scroll first, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub session: DragSession,
    /// Set when the pointer landed on the track and the thumb must jump.
    pub jump_to: Option<f64>,
}

/// Pointer state machine: `Idle` until a primary press, `Dragging` until the
/// matching release or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    session: Option<DragSession>,
}

impl DragState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.session.is_some() {
            InteractionMode::Dragging
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    /// Starts a gesture; `None` when the press must be ignored.
    pub fn begin(
        &mut self,
        input: PointerInput,
        stage_rect: Rect,
        geometry: &GeometryCache,
        current_progress: f64,
    ) -> Option<DragStart> {
        if input.button != PointerButton::Primary || self.session.is_some() {
            return None;
        }

        let orientation = geometry.orientation;
        let coord = input.coord(orientation);
        let jump_to = match input.hit {
            HitTarget::Thumb => None,
            HitTarget::Track => {
                Some(geometry.jump_progress(coord - stage_rect.start(orientation)))
            }
        };

        let session = DragSession {
            pointer_id: input.pointer_id,
            start_pointer_coord: coord,
            start_progress: jump_to.unwrap_or(current_progress),
        };
        self.session = Some(session);
        Some(DragStart { session, jump_to })
    }

    /// Progress for a move of the tracked pointer; `None` for foreign pointers.
    #[must_use]
    pub fn track(&self, input: PointerInput, geometry: &GeometryCache) -> Option<f64> {
        let session = self.session.filter(|s| s.pointer_id == input.pointer_id)?;
        let delta = input.coord(geometry.orientation) - session.start_pointer_coord;
        Some(geometry.drag_progress(session.start_progress, delta))
    }

    /// Ends the gesture for the tracked pointer.
    pub fn finish(&mut self, pointer_id: i32) -> Option<DragSession> {
        match self.session {
            Some(session) if session.pointer_id == pointer_id => self.session.take(),
            _ => None,
        }
    }

    /// Drops whatever gesture is in flight.
    pub fn force_idle(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{DragState, HitTarget, InteractionMode, PointerButton, PointerInput};
    use crate::core::{GeometryCache, Orientation, Rect, ScrollMetrics, Size};

    fn geometry() -> GeometryCache {
        // thumb 80, stage travel 320
        GeometryCache::recompute(
            ScrollMetrics::new(Size::new(100.0, 2000.0), Size::new(100.0, 400.0)),
            Size::new(10.0, 400.0),
            Orientation::Vertical,
            50.0,
        )
    }

    fn stage() -> Rect {
        Rect::new(90.0, 20.0, 10.0, 400.0)
    }

    #[test]
    fn thumb_press_keeps_current_progress() {
        let mut drag = DragState::default();
        let start = drag
            .begin(
                PointerInput::primary(1, 95.0, 120.0, HitTarget::Thumb),
                stage(),
                &geometry(),
                0.25,
            )
            .expect("drag starts");
        assert_eq!(start.jump_to, None);
        assert_relative_eq!(start.session.start_progress, 0.25);
        assert_eq!(drag.mode(), InteractionMode::Dragging);
    }

    #[test]
    fn track_press_jumps_centered_on_pointer() {
        let mut drag = DragState::default();
        let start = drag
            .begin(
                PointerInput::primary(1, 95.0, 20.0 + 200.0, HitTarget::Track),
                stage(),
                &geometry(),
                0.0,
            )
            .expect("drag starts");
        assert_relative_eq!(start.jump_to.expect("jump"), (200.0 - 40.0) / 320.0);
    }

    #[test]
    fn secondary_button_and_second_press_are_ignored() {
        let mut drag = DragState::default();
        let secondary = PointerInput::primary(1, 0.0, 0.0, HitTarget::Thumb)
            .with_button(PointerButton::Secondary);
        assert!(drag.begin(secondary, stage(), &geometry(), 0.0).is_none());

        let press = PointerInput::primary(1, 0.0, 100.0, HitTarget::Thumb);
        assert!(drag.begin(press, stage(), &geometry(), 0.0).is_some());
        let other = PointerInput::primary(2, 0.0, 100.0, HitTarget::Thumb);
        assert!(drag.begin(other, stage(), &geometry(), 0.0).is_none());
        assert_eq!(drag.session().expect("session").pointer_id, 1);
    }

    #[test]
    fn moves_are_clamped_and_foreign_pointers_ignored() {
        let mut drag = DragState::default();
        let _ = drag.begin(
            PointerInput::primary(7, 0.0, 100.0, HitTarget::Thumb),
            stage(),
            &geometry(),
            0.5,
        );

        let forward = PointerInput::primary(7, 0.0, 100.0 + 32.0, HitTarget::Thumb);
        assert_relative_eq!(drag.track(forward, &geometry()).expect("tracked"), 0.6);

        let far = PointerInput::primary(7, 0.0, 100_000.0, HitTarget::Thumb);
        assert_eq!(drag.track(far, &geometry()), Some(1.0));
        let back = PointerInput::primary(7, 0.0, -100_000.0, HitTarget::Thumb);
        assert_eq!(drag.track(back, &geometry()), Some(0.0));

        let foreign = PointerInput::primary(8, 0.0, 300.0, HitTarget::Thumb);
        assert_eq!(drag.track(foreign, &geometry()), None);
    }

    #[test]
    fn finish_requires_matching_pointer() {
        let mut drag = DragState::default();
        let _ = drag.begin(
            PointerInput::primary(3, 0.0, 0.0, HitTarget::Thumb),
            stage(),
            &geometry(),
            0.0,
        );
        assert!(drag.finish(4).is_none());
        assert!(drag.is_dragging());
        assert!(drag.finish(3).is_some());
        assert_eq!(drag.mode(), InteractionMode::Idle);
    }
}
