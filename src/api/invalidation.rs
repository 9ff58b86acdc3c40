use serde::{Deserialize, Serialize};

/// Coalesced render request consumed by the frame scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationRequest {
    /// Re-measure the target and stage before rendering.
    pub recompute_geometry: bool,
    /// The request came from a scroll notification; feeds the autohide `scrolling` flag.
    pub from_scroll: bool,
}

impl InvalidationRequest {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            recompute_geometry: false,
            from_scroll: false,
        }
    }

    /// Position-only repaint.
    #[must_use]
    pub const fn progress() -> Self {
        Self::none()
    }

    #[must_use]
    pub const fn geometry() -> Self {
        Self {
            recompute_geometry: true,
            from_scroll: false,
        }
    }

    #[must_use]
    pub const fn scroll() -> Self {
        Self {
            recompute_geometry: false,
            from_scroll: true,
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            recompute_geometry: self.recompute_geometry || other.recompute_geometry,
            from_scroll: self.from_scroll || other.from_scroll,
        }
    }

    pub fn merge(&mut self, other: Self) {
        *self = self.union(other);
    }
}
