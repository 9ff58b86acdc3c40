use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::TimerId;

pub const DEFAULT_AUTOHIDE_DELAY_MS: u64 = 500;

/// Which activity keeps an autohiding bar on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AutohideMode {
    /// Both hovering the scroll target and scrolling it reveal the bar.
    #[default]
    All,
    /// Only hovering the scroll target reveals the bar.
    Hover,
    /// Only scrolling reveals the bar; it fades after each burst.
    Scroll,
}

impl AutohideMode {
    #[must_use]
    pub const fn shows_on_hover(self) -> bool {
        matches!(self, Self::All | Self::Hover)
    }

    #[must_use]
    pub const fn shows_on_scroll(self) -> bool {
        matches!(self, Self::All | Self::Scroll)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AutohidePolicy {
    #[default]
    Disabled,
    Enabled { delay_ms: u64 },
}

impl AutohidePolicy {
    #[must_use]
    pub const fn enabled() -> Self {
        Self::Enabled {
            delay_ms: DEFAULT_AUTOHIDE_DELAY_MS,
        }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    #[must_use]
    pub const fn delay(self) -> Option<Duration> {
        match self {
            Self::Disabled => None,
            Self::Enabled { delay_ms } => Some(Duration::from_millis(delay_ms)),
        }
    }
}

/// Transient activity flags fed by hover, drag and scroll events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityFlags {
    pub hover_scroller: bool,
    pub hover_stage: bool,
    pub dragging: bool,
    /// Set for the single render pass that follows a scroll burst.
    pub scrolling: bool,
}

/// Outcome of one visibility evaluation, applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityPlan {
    /// `Some(true)` shows now, `Some(false)` hides now, `None` keeps the current state.
    pub apply: Option<bool>,
    pub schedule_hide: Option<Duration>,
}

/// Autohide state kept for the whole attached lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityState {
    pub policy: AutohidePolicy,
    pub mode: AutohideMode,
    pub flags: VisibilityFlags,
    pub visible: bool,
    pub hide_timer: Option<TimerId>,
}

impl VisibilityState {
    #[must_use]
    pub fn new(policy: AutohidePolicy, mode: AutohideMode) -> Self {
        Self {
            policy,
            mode,
            ..Self::default()
        }
    }

    /// Some activity currently asks for the bar to be on screen.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        let flags = self.flags;
        flags.hover_stage
            || flags.dragging
            || (flags.scrolling && self.mode.shows_on_scroll())
            || (flags.hover_scroller && self.mode.shows_on_hover())
    }

    /// A hide must not happen while any of these hold, whether scheduled or firing.
    #[must_use]
    pub fn is_hide_suppressed(&self) -> bool {
        let flags = self.flags;
        flags.dragging || flags.hover_stage || (flags.hover_scroller && self.mode.shows_on_hover())
    }

    #[must_use]
    pub fn plan(&self, scrollable: bool) -> VisibilityPlan {
        if !scrollable {
            return VisibilityPlan {
                apply: Some(false),
                schedule_hide: None,
            };
        }
        let Some(delay) = self.policy.delay() else {
            return VisibilityPlan {
                apply: Some(true),
                schedule_hide: None,
            };
        };

        let triggered = self.is_triggered();
        let will_be_visible = triggered || self.visible;
        VisibilityPlan {
            apply: triggered.then_some(true),
            schedule_hide: (will_be_visible && !self.is_hide_suppressed()).then_some(delay),
        }
    }

    /// Fire-time re-check for a queued hide.
    #[must_use]
    pub fn should_hide_on_fire(&self) -> bool {
        self.policy.is_enabled() && !self.is_hide_suppressed()
    }
}
