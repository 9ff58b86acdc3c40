use serde::{Deserialize, Serialize};

use crate::core::Orientation;
use crate::error::{ScrollbarError, ScrollbarResult};

/// Surface writes produced by one render pass.
///
/// Only the parts that changed since the previous pass are set, so a
/// surface can apply the frame without diffing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThumbFrame {
    pub orientation: Orientation,
    /// New thumb length along the axis; the cross-axis size is left to styles.
    pub thumb_extent: Option<f64>,
    /// New thumb translation along the axis.
    pub thumb_offset: Option<f64>,
}

impl ThumbFrame {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            thumb_extent: None,
            thumb_offset: None,
        }
    }

    #[must_use]
    pub fn with_thumb_extent(mut self, extent: f64) -> Self {
        self.thumb_extent = Some(extent);
        self
    }

    #[must_use]
    pub fn with_thumb_offset(mut self, offset: f64) -> Self {
        self.thumb_offset = Some(offset);
        self
    }

    pub fn validate(&self) -> ScrollbarResult<()> {
        if let Some(extent) = self.thumb_extent
            && (!extent.is_finite() || extent < 0.0)
        {
            return Err(ScrollbarError::InvalidFrame(format!(
                "thumb extent must be finite and non-negative, got {extent}"
            )));
        }
        if let Some(offset) = self.thumb_offset
            && (!offset.is_finite() || offset < 0.0)
        {
            return Err(ScrollbarError::InvalidFrame(format!(
                "thumb offset must be finite and non-negative, got {offset}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thumb_extent.is_none() && self.thumb_offset.is_none()
    }
}
