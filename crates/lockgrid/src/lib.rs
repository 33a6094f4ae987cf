#![forbid(unsafe_code)]

//! LockGrid public facade crate.
//!
//! This crate provides the stable, ergonomic surface for hosts embedding a
//! pattern lock. It re-exports the common types from the internal crates
//! and offers a prelude for day-to-day usage.
//!
//! ```
//! use lockgrid::prelude::*;
//!
//! let mut lock = PatternLock::new(LockConfig::default())?;
//! lock.resize(300.0, 300.0, Sides::default());
//! lock.on_pointer(&PointerEvent::down(50.0, 50.0));
//! lock.on_pointer(&PointerEvent::moved(250.0, 250.0));
//! lock.on_pointer(&PointerEvent::up(250.0, 250.0));
//! assert_eq!(lock.pattern_code(), "159");
//! # Ok::<(), lockgrid::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use lockgrid_core::animation::{Animation, Tween};
pub use lockgrid_core::cell::{Cell, GridError, GridSpec};
pub use lockgrid_core::clock::{Clock, ManualClock, SystemClock};
pub use lockgrid_core::color::PackedRgba;
pub use lockgrid_core::event::{
    Event, EventResult, HoverEvent, HoverKind, PointerEvent, PointerKind,
};
pub use lockgrid_core::geometry::{GridGeometry, Point, Rect, Sides};

// --- Widget re-exports -----------------------------------------------------

pub use lockgrid_widgets::host::{AccessibilityProbe, Haptics};
pub use lockgrid_widgets::scene::{Dot, Scene, Segment};
pub use lockgrid_widgets::{
    ConfigError, DisplayMode, LockConfig, LockError, LockFlags, LockPersistState, Palette,
    Pattern, PatternError, PatternHandlers, PatternLock, Redraw, Stateful,
};

pub use web_time::{Duration, Instant};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for LockGrid hosts.
#[derive(Debug)]
pub enum Error {
    /// A lock operation failed.
    Lock(LockError),
    /// A cell lookup failed.
    Grid(GridError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lock(err) => write!(f, "{err}"),
            Self::Grid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lock(err) => Some(err),
            Self::Grid(err) => Some(err),
        }
    }
}

impl From<LockError> for Error {
    fn from(err: LockError) -> Self {
        Self::Lock(err)
    }
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Self {
        Self::Lock(LockError::Pattern(err))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Lock(LockError::Config(err))
    }
}

/// Standard result type for LockGrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DisplayMode, Error, Event, EventResult, LockConfig, Pattern, PatternHandlers,
        PatternLock, PointerEvent, Redraw, Result, Scene, Sides, Stateful,
    };

    pub use crate::{core, widgets};
}

pub use lockgrid_core as core;
pub use lockgrid_widgets as widgets;
