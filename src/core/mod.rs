pub mod geometry;
pub mod primitives;
pub mod types;
pub mod visibility;

pub use geometry::{DEFAULT_THUMB_MIN_SIZE, GeometryCache};
pub use primitives::{clamp_progress, nonzero_divisor, round2};
pub use types::{
    FrameRequestId, NodeId, Orientation, Overflow, OverflowStyle, Rect, ScrollBehavior,
    ScrollMetrics, Size, TimerId,
};
pub use visibility::{
    AutohideMode, AutohidePolicy, DEFAULT_AUTOHIDE_DELAY_MS, VisibilityFlags, VisibilityPlan,
    VisibilityState,
};
