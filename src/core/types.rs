use serde::{Deserialize, Serialize};

/// Opaque handle to a node owned by the host document.
///
/// The engine never owns nodes; it only remembers handles and asks the host
/// to measure them. A handle whose node was removed simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Scroll axis tracked by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }

    /// Picks the component of a `(x, y)` pair that lies along this axis.
    #[must_use]
    pub const fn along(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Vertical => y,
            Self::Horizontal => x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn along(self, orientation: Orientation) -> f64 {
        orientation.along(self.width, self.height)
    }
}

/// Client-space rectangle, as reported by a bounding-box query.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Leading edge along the axis (`top` for vertical, `left` for horizontal).
    #[must_use]
    pub const fn start(self, orientation: Orientation) -> f64 {
        orientation.along(self.left, self.top)
    }
}

/// Raw scroll measurements of a scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub const fn new(scroll: Size, client: Size) -> Self {
        Self {
            scroll_width: scroll.width,
            scroll_height: scroll.height,
            client_width: client.width,
            client_height: client.height,
        }
    }

    #[must_use]
    pub const fn scroll_size(self) -> Size {
        Size::new(self.scroll_width, self.scroll_height)
    }

    #[must_use]
    pub const fn client_size(self) -> Size {
        Size::new(self.client_width, self.client_height)
    }
}

/// How a programmatic scroll write should be animated by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// Computed `overflow-x`/`overflow-y` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowStyle {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

impl OverflowStyle {
    #[must_use]
    pub const fn allows_scrolling(self) -> bool {
        matches!(self, Self::Auto | Self::Scroll)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Overflow {
    pub x: OverflowStyle,
    pub y: OverflowStyle,
}

impl Overflow {
    #[must_use]
    pub const fn new(x: OverflowStyle, y: OverflowStyle) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn allows_scrolling(self) -> bool {
        self.x.allows_scrolling() || self.y.allows_scrolling()
    }
}

/// Handle of a pending animation-frame request issued by the host clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRequestId(pub u64);

/// Handle of a pending host timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);
