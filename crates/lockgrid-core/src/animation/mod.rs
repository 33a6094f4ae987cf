#![forbid(unsafe_code)]

//! Tick-driven animation primitives.
//!
//! Animations here are plain state records. Nothing registers callbacks or
//! owns a timer: the owner calls [`Animation::tick`] with the time elapsed
//! since the previous frame and reads [`Animation::value`] back. This keeps
//! every animation deterministic under test and lets a single frame loop
//! drive any number of them on one thread.
//!
//! # Building blocks
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Tween`] | Interpolates `from → to` over a duration with an easing curve |
//! | [`Sequence`] | Runs one animation, then another, carrying overshoot |
//!
//! # Invariants
//!
//! 1. `value()` is always in `[0.0, 1.0]` for [`Tween`] and [`Sequence`].
//! 2. `is_complete()` is monotonic: once complete, further ticks keep it complete.
//! 3. A zero duration completes on the first tick, including `tick(ZERO)`.

mod bezier;

pub use bezier::CubicBezier;

use web_time::Duration;

/// An easing curve mapping linear progress in `[0, 1]` to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current eased progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Time ticked past completion; carried into a following animation.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Easing curves
// ---------------------------------------------------------------------------

const FAST_OUT_SLOW_IN: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);
const LINEAR_OUT_SLOW_IN: CubicBezier = CubicBezier::new(0.0, 0.0, 0.2, 1.0);

#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Material "standard" curve: quick start, long deceleration.
#[must_use]
pub fn fast_out_slow_in(t: f32) -> f32 {
    FAST_OUT_SLOW_IN.eval(t)
}

/// Material "deceleration" curve: full speed start, long deceleration.
#[must_use]
pub fn linear_out_slow_in(t: f32) -> f32 {
    LINEAR_OUT_SLOW_IN.eval(t)
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates a scalar from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Linear tween; set a curve with [`easing`](Self::easing).
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Interpolated value between `from` and `to`.
    #[must_use]
    pub fn current(&self) -> f32 {
        self.from + (self.to - self.from) * self.value()
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn linear_progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.linear_progress()).clamp(0.0, 1.0)
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Sequence
// ---------------------------------------------------------------------------

/// Plays `first` to completion, then `second`.
///
/// Time that overshoots `first` within a single tick is forwarded to
/// `second`, so a long frame never stalls the chain.
#[derive(Debug, Clone)]
pub struct Sequence<A, B> {
    first: A,
    second: B,
}

/// Chain two animations.
#[must_use]
pub fn sequence<A: Animation, B: Animation>(first: A, second: B) -> Sequence<A, B> {
    Sequence { first, second }
}

impl<A: Animation, B: Animation> Sequence<A, B> {
    #[inline]
    pub fn first(&self) -> &A {
        &self.first
    }

    #[inline]
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Whether playback has moved on to the second animation.
    #[inline]
    pub fn in_second(&self) -> bool {
        self.first.is_complete()
    }
}

impl<A: Animation, B: Animation> Animation for Sequence<A, B> {
    fn tick(&mut self, dt: Duration) {
        if !self.first.is_complete() {
            self.first.tick(dt);
            if self.first.is_complete() {
                let carry = self.first.overshoot();
                if !carry.is_zero() {
                    self.second.tick(carry);
                }
            }
            return;
        }
        self.second.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.first.is_complete() && self.second.is_complete()
    }

    fn value(&self) -> f32 {
        if self.first.is_complete() {
            self.second.value()
        } else {
            self.first.value()
        }
    }

    fn overshoot(&self) -> Duration {
        if self.first.is_complete() {
            self.second.overshoot()
        } else {
            Duration::ZERO
        }
    }
}
