mod frame;

pub use frame::ThumbFrame;

use crate::core::Rect;
use crate::error::ScrollbarResult;

/// Contract implemented by the overlay's visual surfaces.
///
/// The stage is the interactive surface spanning the whole track; the thumb
/// lives inside it. Implementations translate these calls into whatever the
/// host toolkit uses (style writes, layer transforms, draw calls).
pub trait StageSurface {
    /// Bounding box of the stage in client coordinates; zero-sized until laid out.
    fn stage_rect(&self) -> Rect;

    /// Themeable minimum thumb size, if the host exposes one.
    fn thumb_min_size_hint(&self) -> Option<f64> {
        None
    }

    fn apply_thumb(&mut self, frame: &ThumbFrame);

    fn set_stage_visible(&mut self, visible: bool);

    fn set_pointer_capture(&mut self, pointer_id: i32);

    /// Fails when the pointer is not (or no longer) captured.
    fn release_pointer_capture(&mut self, pointer_id: i32) -> ScrollbarResult<()>;
}
