#![forbid(unsafe_code)]

//! The pattern lock widget.
//!
//! # Role in LockGrid
//! `lockgrid-widgets` builds the lock on top of `lockgrid-core`: pattern
//! bookkeeping, the gap-filling sequence engine, the pointer state machine,
//! and the display model the host paints from.
//!
//! # Primary responsibilities
//! - **Pattern / VisitLookup**: the ordered cell sequence and O(1) membership.
//! - **SequenceEngine**: hit resolution and gap inference.
//! - **PatternLock**: Down/Move/Up/Cancel handling and lifecycle notifications.
//! - **Display model**: display mode, per-cell animations, demo playback.
//! - **Scene**: a draw-list for the host painter.
//!
//! # How it fits in the system
//! The host feeds [`lockgrid_core::event::Event`]s to
//! [`PatternLock::handle_event`](lock::PatternLock::handle_event), calls
//! [`advance`](lock::PatternLock::advance) once per frame, and paints the
//! [`Scene`](scene::Scene) whenever
//! [`take_redraw`](lock::PatternLock::take_redraw) asks for it.

pub mod cell_state;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod host;
pub mod listener;
pub mod lock;
pub mod pattern;
pub mod persist;
pub mod redraw;
pub mod scene;

pub use config::{ConfigError, LockConfig, LockFlags};
pub use display::{DisplayMode, Palette};
pub use error::LockError;
pub use listener::PatternHandlers;
pub use lock::PatternLock;
pub use pattern::{Pattern, PatternError};
pub use persist::{LockPersistState, Stateful};
pub use redraw::Redraw;
pub use scene::Scene;
