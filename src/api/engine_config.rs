use serde::{Deserialize, Serialize};

use crate::core::{
    AutohideMode, AutohidePolicy, DEFAULT_THUMB_MIN_SIZE, NodeId, Orientation,
};
use crate::error::{ScrollbarError, ScrollbarResult};

use super::config_validation::validate_config;

/// How the engine finds the element it mirrors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrollerReference {
    /// Walk up from the mount looking for a marked scroller.
    #[default]
    Auto,
    Selector(String),
    Node(NodeId),
}

impl From<NodeId> for ScrollerReference {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for ScrollerReference {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl From<String> for ScrollerReference {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<Option<NodeId>> for ScrollerReference {
    fn from(node: Option<NodeId>) -> Self {
        node.map_or(Self::Auto, Self::Node)
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep scrollbar setup next to the rest of their
/// theme/layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollbarConfig {
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub scroller: ScrollerReference,
    #[serde(default)]
    pub autohide: AutohidePolicy,
    #[serde(default)]
    pub autohide_mode: AutohideMode,
    /// Fallback minimum thumb length when the surface exposes no themed value.
    #[serde(default = "default_thumb_min_size")]
    pub thumb_min_size: f64,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            scroller: ScrollerReference::Auto,
            autohide: AutohidePolicy::Disabled,
            autohide_mode: AutohideMode::All,
            thumb_min_size: default_thumb_min_size(),
        }
    }
}

impl ScrollbarConfig {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    #[must_use]
    pub fn with_scroller(mut self, scroller: impl Into<ScrollerReference>) -> Self {
        self.scroller = scroller.into();
        self
    }

    /// Enables autohide with the given fade delay.
    #[must_use]
    pub fn with_autohide(mut self, delay_ms: u64) -> Self {
        self.autohide = AutohidePolicy::Enabled { delay_ms };
        self
    }

    #[must_use]
    pub fn with_autohide_policy(mut self, policy: AutohidePolicy) -> Self {
        self.autohide = policy;
        self
    }

    #[must_use]
    pub fn with_autohide_mode(mut self, mode: AutohideMode) -> Self {
        self.autohide_mode = mode;
        self
    }

    #[must_use]
    pub fn with_thumb_min_size(mut self, size: f64) -> Self {
        self.thumb_min_size = size;
        self
    }

    pub fn validate(&self) -> ScrollbarResult<()> {
        validate_config(self)
    }

    pub fn from_json_str(input: &str) -> ScrollbarResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ScrollbarError::InvalidConfig(format!("failed to parse config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string_pretty(&self) -> ScrollbarResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ScrollbarError::InvalidConfig(format!("failed to serialize config json: {e}"))
        })
    }
}

fn default_thumb_min_size() -> f64 {
    DEFAULT_THUMB_MIN_SIZE
}
