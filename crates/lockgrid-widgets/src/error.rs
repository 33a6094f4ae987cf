#![forbid(unsafe_code)]

//! Umbrella error for lock operations.

use std::fmt;

use lockgrid_core::cell::GridError;

use crate::config::ConfigError;
use crate::pattern::PatternError;

/// Errors returned by [`PatternLock`](crate::lock::PatternLock).
#[derive(Debug)]
pub enum LockError {
    /// Demo playback was requested with no pattern to play.
    EmptyPatternAnimate,
    /// A cell does not belong to the lock's grid.
    Grid(GridError),
    /// A pattern or compact code could not be built.
    Pattern(PatternError),
    /// The configuration failed validation.
    Config(ConfigError),
    /// A persisted blob could not be encoded or decoded.
    #[cfg(feature = "state-persistence")]
    Serialization(serde_json::Error),
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPatternAnimate => {
                write!(f, "a pattern is required to use the animate display mode")
            }
            Self::Grid(err) => write!(f, "grid error: {err}"),
            Self::Pattern(err) => write!(f, "pattern error: {err}"),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            #[cfg(feature = "state-persistence")]
            Self::Serialization(err) => write!(f, "state serialization failed: {err}"),
        }
    }
}

impl std::error::Error for LockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyPatternAnimate => None,
            Self::Grid(err) => Some(err),
            Self::Pattern(err) => Some(err),
            Self::Config(err) => Some(err),
            #[cfg(feature = "state-persistence")]
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<GridError> for LockError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<PatternError> for LockError {
    fn from(err: PatternError) -> Self {
        Self::Pattern(err)
    }
}

impl From<ConfigError> for LockError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "state-persistence")]
impl From<serde_json::Error> for LockError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}
