#![forbid(unsafe_code)]

//! Core: cells, grid geometry, pointer events, and animation primitives.
//!
//! # Role in LockGrid
//! `lockgrid-core` holds the leaf types the pattern lock is built from. It
//! knows nothing about patterns, listeners, or display modes; those live in
//! `lockgrid-widgets`.
//!
//! # Primary responsibilities
//! - **Cell / GridSpec**: value-typed grid positions and range-checked lookup.
//! - **GridGeometry**: pixel ↔ cell mapping with a concentric hit zone.
//! - **Event**: pointer and hover events with coalesced history.
//! - **Animation**: tick-driven tweens and easing curves.
//! - **Clock**: injectable wall-clock for deterministic playback.

pub mod animation;
pub mod cell;
pub mod clock;
pub mod color;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
