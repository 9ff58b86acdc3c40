//! overlay-scrollbar: a synthetic scrollbar kept in sync with any scroll container.
//!
//! The crate is the synchronization engine only: geometry, frame-coalesced
//! rendering, drag-to-scroll and autohide. Hosts plug in through the traits
//! in [`platform`] and [`render`]; [`platform::HeadlessHost`] provides an
//! in-memory host for tests and headless use.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod platform;
pub mod render;
pub mod telemetry;

pub use api::{HostEvent, ScrollbarConfig, ScrollbarEngine};
pub use error::{ScrollbarError, ScrollbarResult};
