mod config_validation;
mod drag_controller;
mod engine;
mod engine_config;
mod engine_core;
mod invalidation;
mod lifecycle;
mod observer_hub;
mod render_coordinator;
mod render_scheduler;
mod scroller_resolver;
mod visibility_controller;

pub use engine::ScrollbarEngine;
pub use engine_config::{ScrollbarConfig, ScrollerReference};
pub use invalidation::InvalidationRequest;
pub use observer_hub::{HostEvent, HoverSurface, NodeList};
pub use render_scheduler::RenderStats;
