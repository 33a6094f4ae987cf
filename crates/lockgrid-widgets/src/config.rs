#![forbid(unsafe_code)]

//! Lock configuration.
//!
//! [`LockConfig`] is a plain struct with defaults and builder methods;
//! [`LockConfig::validate`] checks it before a [`PatternLock`] is built.
//!
//! [`PatternLock`]: crate::lock::PatternLock

use std::fmt;

use lockgrid_core::cell::{DEFAULT_GRID_SIZE, GridError, GridSpec};
use lockgrid_core::geometry::DEFAULT_HIT_FACTOR;
use web_time::Duration;

use crate::display::Palette;

bitflags::bitflags! {
    /// Runtime toggles of the lock.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(
        feature = "state-persistence",
        derive(serde::Serialize, serde::Deserialize)
    )]
    pub struct LockFlags: u8 {
        /// Pointer input is processed.
        const INPUT_ENABLED = 0b001;
        /// Dots stay neutral and no path is drawn.
        const STEALTH       = 0b010;
        /// Each accepted cell fires a haptic tick.
        const HAPTICS       = 0b100;
    }
}

impl Default for LockFlags {
    fn default() -> Self {
        Self::INPUT_ENABLED | Self::HAPTICS
    }
}

/// Errors from [`LockConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The hit factor must lie in `(0, 1]`.
    HitFactor(f32),
    /// Demo playback needs a non-zero per-circle duration.
    ZeroCircleDuration,
    /// Dot sizes must be positive and finite.
    DotSize(f32),
    /// The grid size is not supported.
    Grid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HitFactor(v) => write!(f, "hit factor must be in (0, 1], got {v}"),
            Self::ZeroCircleDuration => write!(f, "per-circle duration must be non-zero"),
            Self::DotSize(v) => write!(f, "dot size must be positive, got {v}"),
            Self::Grid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

/// Configuration for a [`PatternLock`](crate::lock::PatternLock).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct LockConfig {
    /// Cells per side (default: 3).
    pub grid_size: u8,
    /// Fraction of a square that counts as a hit (default: 0.6).
    pub hit_factor: f32,
    /// Dot and path colors.
    pub palette: Palette,
    /// Time per cell in demo playback (default: 700ms).
    pub per_circle: Duration,
    /// Displacement a move batch must exceed before it requests a redraw
    /// (default: 0).
    pub drag_threshold: f32,
    /// Resting dot diameter (default: 12).
    pub dot_size: f32,
    /// Dot diameter at the peak of the activation pulse (default: 28).
    pub dot_size_activated: f32,
    /// Stroke width of the path (default: 3).
    pub path_width: f32,
    /// Initial toggles (default: input enabled, haptics on).
    pub flags: LockFlags,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            hit_factor: DEFAULT_HIT_FACTOR,
            palette: Palette::default(),
            per_circle: Duration::from_millis(700),
            drag_threshold: 0.0,
            dot_size: 12.0,
            dot_size_activated: 28.0,
            path_width: 3.0,
            flags: LockFlags::default(),
        }
    }
}

impl LockConfig {
    #[must_use]
    pub fn grid_size(mut self, size: u8) -> Self {
        self.grid_size = size;
        self
    }

    #[must_use]
    pub fn hit_factor(mut self, factor: f32) -> Self {
        self.hit_factor = factor;
        self
    }

    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn per_circle(mut self, duration: Duration) -> Self {
        self.per_circle = duration;
        self
    }

    #[must_use]
    pub fn drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    #[must_use]
    pub fn dot_sizes(mut self, resting: f32, activated: f32) -> Self {
        self.dot_size = resting;
        self.dot_size_activated = activated;
        self
    }

    #[must_use]
    pub fn path_width(mut self, width: f32) -> Self {
        self.path_width = width;
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: LockFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn stealth(mut self, on: bool) -> Self {
        self.flags.set(LockFlags::STEALTH, on);
        self
    }

    #[must_use]
    pub fn haptics(mut self, on: bool) -> Self {
        self.flags.set(LockFlags::HAPTICS, on);
        self
    }

    /// Check every field; returns the resolved grid on success.
    pub fn validate(&self) -> Result<GridSpec, ConfigError> {
        let grid = GridSpec::new(self.grid_size)?;
        if !(self.hit_factor > 0.0 && self.hit_factor <= 1.0) {
            return Err(ConfigError::HitFactor(self.hit_factor));
        }
        if self.per_circle.is_zero() {
            return Err(ConfigError::ZeroCircleDuration);
        }
        for size in [self.dot_size, self.dot_size_activated] {
            if !(size.is_finite() && size > 0.0) {
                return Err(ConfigError::DotSize(size));
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = LockConfig::default();
        assert_eq!(c.grid_size, 3);
        assert_eq!(c.hit_factor, 0.6);
        assert_eq!(c.per_circle, Duration::from_millis(700));
        assert_eq!(c.drag_threshold, 0.0);
        assert_eq!(c.dot_size, 12.0);
        assert_eq!(c.dot_size_activated, 28.0);
        assert_eq!(c.path_width, 3.0);
        assert!(c.flags.contains(LockFlags::INPUT_ENABLED));
        assert!(c.flags.contains(LockFlags::HAPTICS));
        assert!(!c.flags.contains(LockFlags::STEALTH));
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(LockConfig::default().validate(), Ok(GridSpec::default()));
    }

    #[test]
    fn builder_sets_fields() {
        let c = LockConfig::default()
            .grid_size(4)
            .hit_factor(0.8)
            .stealth(true)
            .haptics(false);
        assert_eq!(c.grid_size, 4);
        assert_eq!(c.hit_factor, 0.8);
        assert!(c.flags.contains(LockFlags::STEALTH));
        assert!(!c.flags.contains(LockFlags::HAPTICS));
    }

    #[test]
    fn rejects_bad_hit_factor() {
        for f in [0.0, -0.5, 1.5, f32::NAN] {
            let err = LockConfig::default().hit_factor(f).validate().unwrap_err();
            assert!(matches!(err, ConfigError::HitFactor(_)));
        }
    }

    #[test]
    fn rejects_zero_duration_and_bad_sizes() {
        assert_eq!(
            LockConfig::default().per_circle(Duration::ZERO).validate(),
            Err(ConfigError::ZeroCircleDuration)
        );
        assert_eq!(
            LockConfig::default().dot_sizes(0.0, 28.0).validate(),
            Err(ConfigError::DotSize(0.0))
        );
    }

    #[test]
    fn rejects_unsupported_grid() {
        assert_eq!(
            LockConfig::default().grid_size(0).validate(),
            Err(ConfigError::Grid(GridError::UnsupportedSize(0)))
        );
    }
}
