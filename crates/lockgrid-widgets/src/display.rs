#![forbid(unsafe_code)]

//! Display modes, color resolution, and demo playback timing.
//!
//! # Demo playback
//!
//! In [`DisplayMode::Animate`] the pattern is replayed from the wall clock,
//! one cell per `D` (the per-circle duration), followed by one extra `D`
//! with the whole pattern lit before the cycle restarts:
//!
//! ```text
//! cycle   = (L + 1) * D
//! elapsed = (now - start) mod cycle
//! shown   = elapsed / D                  lit prefix length, 0..=L
//! t       = (elapsed mod D) / D          progress toward cell `shown`
//! ```
//!
//! Playback is a pure function of elapsed time, so dropped frames never skew
//! it. See [`demo_frame`].

use lockgrid_core::color::PackedRgba;
use web_time::{Duration, Instant};

/// How the current pattern is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum DisplayMode {
    /// Neutral baseline; also used to show an accepted pattern.
    #[default]
    Correct,
    /// A rejected pattern.
    Wrong,
    /// Time-driven replay of the pattern.
    Animate,
}

/// The three colors a dot or path can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Palette {
    pub regular: PackedRgba,
    pub error: PackedRgba,
    pub success: PackedRgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            regular: PackedRgba::WHITE,
            error: PackedRgba::RED,
            success: PackedRgba::GREEN,
        }
    }
}

impl Palette {
    /// Color for a dot or segment.
    ///
    /// Anything not in the pattern, anything in stealth mode, and anything
    /// drawn while the gesture is still in progress uses the regular color.
    /// Otherwise the display mode decides.
    #[must_use]
    pub fn resolve(
        &self,
        part_of_pattern: bool,
        stealth: bool,
        in_progress: bool,
        mode: DisplayMode,
    ) -> PackedRgba {
        if !part_of_pattern || stealth || in_progress {
            return self.regular;
        }
        match mode {
            DisplayMode::Wrong => self.error,
            DisplayMode::Correct | DisplayMode::Animate => self.success,
        }
    }
}

/// Snapshot of demo playback at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoFrame {
    /// Length of the lit prefix of the pattern.
    pub shown: usize,
    /// When the rubber band is travelling from cell `shown - 1` to `shown`,
    /// the fraction of that trip completed, in `[0, 1)`.
    pub progress: Option<f32>,
}

/// Compute the playback frame `elapsed` after the demo started.
///
/// A zero `per_circle` shows the whole pattern statically.
#[must_use]
pub fn demo_frame(elapsed: Duration, pattern_len: usize, per_circle: Duration) -> DemoFrame {
    let d = per_circle.as_nanos();
    if d == 0 || pattern_len == 0 {
        return DemoFrame {
            shown: pattern_len,
            progress: None,
        };
    }

    let cycle = d * (pattern_len as u128 + 1);
    let spot = elapsed.as_nanos() % cycle;
    let shown = (spot / d) as usize;

    let progress = (shown > 0 && shown < pattern_len).then(|| (spot % d) as f32 / d as f32);
    DemoFrame { shown, progress }
}

/// Wall-clock anchor for a running demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoPlayback {
    started: Instant,
}

impl DemoPlayback {
    #[must_use]
    pub fn start(now: Instant) -> Self {
        Self { started: now }
    }

    #[inline]
    #[must_use]
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Frame at `now`. Instants before the start are treated as the start.
    #[must_use]
    pub fn frame(&self, now: Instant, pattern_len: usize, per_circle: Duration) -> DemoFrame {
        let elapsed = now.saturating_duration_since(self.started);
        demo_frame(elapsed, pattern_len, per_circle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration::from_millis(700);

    #[test]
    fn default_mode_is_correct() {
        assert_eq!(DisplayMode::default(), DisplayMode::Correct);
    }

    #[test]
    fn regular_color_wins_outside_pattern() {
        let p = Palette::default();
        for mode in [DisplayMode::Correct, DisplayMode::Wrong, DisplayMode::Animate] {
            assert_eq!(p.resolve(false, false, false, mode), p.regular);
            assert_eq!(p.resolve(true, true, false, mode), p.regular);
            assert_eq!(p.resolve(true, false, true, mode), p.regular);
        }
    }

    #[test]
    fn mode_picks_color_for_finished_pattern() {
        let p = Palette::default();
        assert_eq!(p.resolve(true, false, false, DisplayMode::Wrong), p.error);
        assert_eq!(p.resolve(true, false, false, DisplayMode::Correct), p.success);
        assert_eq!(p.resolve(true, false, false, DisplayMode::Animate), p.success);
    }

    #[test]
    fn playback_starts_empty() {
        let f = demo_frame(Duration::ZERO, 4, D);
        assert_eq!(f.shown, 0);
        assert_eq!(f.progress, None);
    }

    #[test]
    fn half_way_through_each_step() {
        for k in 1..4 {
            let f = demo_frame(D * k as u32 + D / 2, 4, D);
            assert_eq!(f.shown, k);
            let t = f.progress.unwrap();
            assert!((t - 0.5).abs() < 1e-4, "k={k} t={t}");
        }
    }

    #[test]
    fn full_pattern_holds_without_travel() {
        let f = demo_frame(D * 4 + D / 2, 4, D);
        assert_eq!(f.shown, 4);
        assert_eq!(f.progress, None);
    }

    #[test]
    fn cycle_wraps() {
        let f = demo_frame(D * 5 + D / 2, 4, D);
        assert_eq!(f.shown, 0);
        let g = demo_frame(D * 6 + D / 2, 4, D);
        assert_eq!(g.shown, 1);
    }

    #[test]
    fn single_cell_pattern_never_travels() {
        for ms in [0u64, 350, 700, 1050, 1400] {
            assert_eq!(demo_frame(Duration::from_millis(ms), 1, D).progress, None);
        }
    }

    #[test]
    fn zero_duration_shows_everything() {
        let f = demo_frame(Duration::from_secs(3), 5, Duration::ZERO);
        assert_eq!(f.shown, 5);
    }

    #[test]
    fn playback_reads_wall_clock() {
        let t0 = Instant::now();
        let demo = DemoPlayback::start(t0);
        assert_eq!(demo.frame(t0 + D * 2, 3, D).shown, 2);
        assert_eq!(demo.started(), t0);
    }
}
