#![forbid(unsafe_code)]

//! Cubic Bézier timing curves.
//!
//! A [`CubicBezier`] is the CSS-style timing function with fixed endpoints
//! `(0, 0)` and `(1, 1)` and two control points. Evaluating it means finding
//! the curve parameter whose x equals the input time, then returning that
//! parameter's y. Newton's method converges in a few steps for well-behaved
//! curves; bisection is the fallback when the slope flattens out.

/// A cubic Bézier timing curve through `(0,0)`, `p1`, `p2`, `(1,1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_EPSILON: f32 = 1e-6;
const BISECTION_ITERATIONS: usize = 32;

impl CubicBezier {
    /// Create a curve. Control-point x values are clamped to `[0, 1]` so the
    /// curve stays a function of time.
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: clamp_unit(x1),
            y1,
            x2: clamp_unit(x2),
            y2,
        }
    }

    /// Eased value for time `t` in `[0, 1]` (clamped).
    #[must_use]
    pub fn eval(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = self.solve_parameter(t);
        component(s, self.y1, self.y2)
    }

    fn solve_parameter(&self, x: f32) -> f32 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = component(s, self.x1, self.x2) - x;
            if err.abs() < NEWTON_EPSILON {
                return s;
            }
            let slope = derivative(s, self.x1, self.x2);
            if slope.abs() < NEWTON_EPSILON {
                break;
            }
            s -= err / slope;
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = component(s, self.x1, self.x2);
            if (value - x).abs() < NEWTON_EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

const fn clamp_unit(v: f32) -> f32 {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

/// One coordinate of the curve at parameter `s`.
#[inline]
fn component(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn derivative(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}
