#![forbid(unsafe_code)]

//! Pattern sequence engine: hit resolution and gap inference.
//!
//! The engine owns the in-progress [`Pattern`] and its [`VisitLookup`] and
//! keeps the two in sync. [`SequenceEngine::detect_and_add_hit`] turns one
//! pointer sample into zero, one, or two appended cells.
//!
//! # Gap inference
//!
//! A fast drag can cross a cell without a sample ever landing in its hit
//! zone. When the new cell is two steps from the last one along an axis, and
//! the other axis moved by 0 or 2, the midpoint is appended first:
//!
//! ```text
//! (0,0) → (0,2)   fills (0,1)
//! (0,0) → (2,0)   fills (1,0)
//! (0,0) → (2,2)   fills (1,1)
//! (0,0) → (1,2)   fills nothing (knight move)
//! ```
//!
//! # Invariants
//!
//! 1. The pattern never holds a duplicate.
//! 2. `lookup.contains(c) ⇔ pattern.contains(c)` after every engine call.
//! 3. A fill-in cell always precedes the candidate that caused it.

use lockgrid_core::cell::Cell;
use lockgrid_core::geometry::{GridGeometry, Point};

use crate::pattern::{Pattern, VisitLookup};

/// Cells appended by one accepted hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// The cell under the pointer.
    pub hit: Cell,
    /// The inferred intermediate cell, appended before `hit`.
    pub fill_in: Option<Cell>,
}

impl HitOutcome {
    /// Appended cells in pattern order.
    pub fn added(&self) -> impl Iterator<Item = Cell> {
        self.fill_in.into_iter().chain(std::iter::once(self.hit))
    }
}

/// Coordinates of the cell a move from `last` to `candidate` skipped over.
///
/// Returns `last`'s own coordinates when nothing was skipped.
#[must_use]
pub fn gap_fill_target(last: Cell, candidate: Cell) -> (i32, i32) {
    let d_row = i32::from(candidate.row()) - i32::from(last.row());
    let d_column = i32::from(candidate.column()) - i32::from(last.column());

    let mut fill_row = i32::from(last.row());
    let mut fill_column = i32::from(last.column());

    if d_row.abs() == 2 && d_column.abs() != 1 {
        fill_row += d_row.signum();
    }
    if d_column.abs() == 2 && d_row.abs() != 1 {
        fill_column += d_column.signum();
    }
    (fill_row, fill_column)
}

/// Builds the pattern for the current gesture.
#[derive(Debug, Clone)]
pub struct SequenceEngine {
    pattern: Pattern,
    lookup: VisitLookup,
}

impl SequenceEngine {
    #[must_use]
    pub fn new(geometry: &GridGeometry) -> Self {
        Self {
            pattern: Pattern::new(),
            lookup: VisitLookup::new(geometry.grid()),
        }
    }

    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[inline]
    #[must_use]
    pub fn lookup(&self) -> &VisitLookup {
        &self.lookup
    }

    /// Light exactly the first `count` cells of the pattern.
    ///
    /// Demo playback uses this to rebuild the lookup from its progress.
    pub fn light_prefix(&mut self, count: usize) {
        self.lookup.mark_prefix(&self.pattern, count);
    }

    /// Hit-test `point` and work out which cells it would append, without
    /// changing anything.
    ///
    /// Returns `None` when the point misses every hit zone or lands on a cell
    /// that is already visited.
    #[must_use]
    pub fn plan_hit(&self, geometry: &GridGeometry, point: Point) -> Option<HitOutcome> {
        let candidate = geometry.hit(point)?;
        if self.lookup.contains(candidate) {
            return None;
        }

        let fill_in = self.pattern.last().and_then(|last| {
            let (row, column) = gap_fill_target(last, candidate);
            let cell = geometry.grid().of(row, column).ok()?;
            (!self.lookup.contains(cell)).then_some(cell)
        });

        Some(HitOutcome {
            hit: candidate,
            fill_in,
        })
    }

    /// Hit-test `point` and append the resulting cell(s).
    ///
    /// Returns `None` unless the hit cell itself was newly appended, so a
    /// cell already in the pattern never counts twice even while the lookup
    /// shows only a prefix.
    pub fn detect_and_add_hit(
        &mut self,
        geometry: &GridGeometry,
        point: Point,
    ) -> Option<HitOutcome> {
        let outcome = self.plan_hit(geometry, point)?;
        let mut hit_added = false;
        for cell in outcome.added() {
            hit_added |= self.append(cell) && cell == outcome.hit;
        }
        hit_added.then_some(outcome)
    }

    /// Append one cell and mark it visited. Returns whether it was new.
    pub fn append(&mut self, cell: Cell) -> bool {
        if !self.lookup.grid_contains(cell) || !self.pattern.push(cell) {
            return false;
        }
        self.lookup.insert(cell);
        true
    }

    /// Replace the pattern wholesale and mark every cell visited.
    pub fn replace(&mut self, pattern: Pattern) {
        self.lookup.clear();
        for cell in pattern.iter() {
            self.lookup.insert(cell);
        }
        self.pattern = pattern;
    }

    /// Re-mark the lookup from the full pattern.
    pub fn resync_lookup(&mut self) {
        self.light_prefix(self.pattern.len());
    }

    /// Empty the pattern and the lookup. Idempotent.
    pub fn clear(&mut self) {
        self.pattern.clear();
        self.lookup.clear();
    }
}
