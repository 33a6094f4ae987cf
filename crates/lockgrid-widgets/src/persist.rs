#![forbid(unsafe_code)]

//! Save and restore of the lock's interactive state.
//!
//! The host calls [`Stateful::save_state`] when its view is torn down and
//! [`Stateful::restore_state`] when it is rebuilt. The saved record holds
//! the pattern as its compact code plus the display mode and the three
//! toggles; animation progress is deliberately not part of it.
//!
//! With the `state-persistence` feature the record is serde-serializable
//! and [`LockPersistState::to_json`] / [`LockPersistState::from_json`]
//! produce an opaque blob.

use crate::display::DisplayMode;
#[cfg(feature = "state-persistence")]
use crate::error::LockError;

/// Identity of a persisted widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub widget_type: &'static str,
    pub instance_id: String,
}

impl StateKey {
    #[must_use]
    pub fn new(widget_type: &'static str, instance_id: impl Into<String>) -> Self {
        Self {
            widget_type,
            instance_id: instance_id.into(),
        }
    }
}

/// A widget whose user-facing state survives a host teardown.
pub trait Stateful {
    type State;
    type Error;

    fn state_key(&self) -> StateKey;

    fn save_state(&self) -> Self::State;

    fn restore_state(&mut self, state: Self::State) -> Result<(), Self::Error>;
}

/// Persistable state for a [`PatternLock`](crate::lock::PatternLock).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct LockPersistState {
    /// Pattern in compact code form.
    pub pattern_code: String,
    pub display_mode: DisplayMode,
    pub input_enabled: bool,
    pub stealth: bool,
    pub haptics: bool,
}

impl Default for LockPersistState {
    fn default() -> Self {
        Self {
            pattern_code: String::new(),
            display_mode: DisplayMode::Correct,
            input_enabled: true,
            stealth: false,
            haptics: true,
        }
    }
}

#[cfg(feature = "state-persistence")]
impl LockPersistState {
    /// Serialize to a JSON blob.
    pub fn to_json(&self) -> Result<String, LockError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a blob produced by [`to_json`](Self::to_json).
    ///
    /// A malformed blob fails with [`LockError::Serialization`].
    pub fn from_json(blob: &str) -> Result<Self, LockError> {
        Ok(serde_json::from_str(blob)?)
    }
}
