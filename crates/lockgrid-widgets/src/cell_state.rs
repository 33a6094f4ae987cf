#![forbid(unsafe_code)]

//! Per-cell animated visual state.
//!
//! Every cell of the grid carries a [`CellState`] whether or not it is part
//! of the pattern. Activating a cell starts two independent animations:
//!
//! - a size pulse, resting → activated over 96 ms (linear-out-slow-in), then
//!   back over 192 ms (fast-out-slow-in);
//! - a line endpoint that travels from the previous in-progress point to the
//!   cell center over 100 ms (fast-out-slow-in).
//!
//! # Invariants
//!
//! 1. With no pulse running, `size` equals the resting dot size.
//! 2. A completed line animation leaves `line_end` at the cell center; a
//!    cancelled one leaves it unset.
//! 3. Animations only move when [`CellStates::tick`] is called.

use lockgrid_core::animation::{
    Animation, Sequence, Tween, fast_out_slow_in, linear_out_slow_in, sequence,
};
use lockgrid_core::cell::{Cell, GridSpec};
use lockgrid_core::geometry::Point;
use web_time::Duration;

/// Grow phase of the activation pulse.
pub const PULSE_GROW: Duration = Duration::from_millis(96);
/// Shrink phase of the activation pulse.
pub const PULSE_SHRINK: Duration = Duration::from_millis(192);
/// Travel time of the line endpoint.
pub const LINE_TRAVEL: Duration = Duration::from_millis(100);

type SizePulse = Sequence<Tween, Tween>;

#[derive(Debug, Clone, Copy)]
struct LineTravel {
    from: Point,
    to: Point,
    tween: Tween,
}

impl LineTravel {
    fn position(&self) -> Point {
        self.from.lerp(self.to, self.tween.value())
    }
}

/// Visual attributes of one cell.
#[derive(Debug, Clone)]
pub struct CellState {
    pub scale: f32,
    pub translate_y: f32,
    pub alpha: f32,
    pub size: f32,
    /// Where the segment into this cell ends, when it is being animated or
    /// has finished animating.
    pub line_end: Option<Point>,
    resting_size: f32,
    pulse: Option<SizePulse>,
    line: Option<LineTravel>,
}

impl CellState {
    #[must_use]
    pub fn new(dot_size: f32) -> Self {
        Self {
            scale: 1.0,
            translate_y: 0.0,
            alpha: 1.0,
            size: dot_size,
            line_end: None,
            resting_size: dot_size,
            pulse: None,
            line: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_line_animating(&self) -> bool {
        self.line.is_some()
    }

    /// Start the size pulse and the line travel from `from` to `center`.
    pub fn activate(&mut self, from: Point, center: Point, activated_size: f32) {
        let rest = self.resting_size;
        self.pulse = Some(sequence(
            Tween::new(rest, activated_size, PULSE_GROW).easing(linear_out_slow_in),
            Tween::new(activated_size, rest, PULSE_SHRINK).easing(fast_out_slow_in),
        ));
        self.line = Some(LineTravel {
            from,
            to: center,
            tween: Tween::new(0.0, 1.0, LINE_TRAVEL).easing(fast_out_slow_in),
        });
        self.line_end = Some(from);
    }

    fn tick(&mut self, dt: Duration) {
        if let Some(pulse) = &mut self.pulse {
            pulse.tick(dt);
            if pulse.is_complete() {
                self.size = self.resting_size;
                self.pulse = None;
            } else if pulse.in_second() {
                self.size = pulse.second().current();
            } else {
                self.size = pulse.first().current();
            }
        }
        if let Some(line) = &mut self.line {
            line.tween.tick(dt);
            if line.tween.is_complete() {
                self.line_end = Some(line.to);
                self.line = None;
            } else {
                self.line_end = Some(line.position());
            }
        }
    }

    fn cancel_line(&mut self) {
        if self.line.take().is_some() {
            self.line_end = None;
        }
    }
}

/// Animation state for every cell of a grid, indexed by cell id.
#[derive(Debug, Clone)]
pub struct CellStates {
    grid: GridSpec,
    states: Vec<CellState>,
}

impl CellStates {
    #[must_use]
    pub fn new(grid: GridSpec, dot_size: f32) -> Self {
        Self {
            grid,
            states: vec![CellState::new(dot_size); grid.cell_count()],
        }
    }

    /// State of `cell`; `None` for cells of another grid.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&CellState> {
        if !self.grid.contains(cell) {
            return None;
        }
        self.states.get(self.grid.id_of(cell))
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut CellState> {
        if !self.grid.contains(cell) {
            return None;
        }
        self.states.get_mut(self.grid.id_of(cell))
    }

    /// Start the activation animations of `cell`.
    pub fn activate(&mut self, cell: Cell, from: Point, center: Point, activated_size: f32) {
        if let Some(state) = self.get_mut(cell) {
            state.activate(from, center, activated_size);
        }
    }

    /// Advance every running animation by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if dt.is_zero() {
            return;
        }
        for state in &mut self.states {
            state.tick(dt);
        }
    }

    /// Stop in-flight line animations and unset their endpoints.
    pub fn cancel_line_animations(&mut self) {
        for state in &mut self.states {
            state.cancel_line();
        }
    }

    /// Whether any cell still has an animation to play.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.states
            .iter()
            .any(|s| s.is_pulsing() || s.is_line_animating())
    }
}
