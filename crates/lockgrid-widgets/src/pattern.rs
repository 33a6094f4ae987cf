#![forbid(unsafe_code)]

//! Patterns, the visit lookup, and the compact pattern code.
//!
//! A [`Pattern`] is the ordered, duplicate-free list of cells one gesture
//! produced. A [`VisitLookup`] answers "is this cell lit?" in O(1); during
//! normal input it mirrors the pattern's membership exactly, while demo
//! playback rebuilds it from a prefix of the pattern.
//!
//! # Compact code
//!
//! Each cell maps to one symbol, `CODE_ALPHABET[id]`, and a pattern's code is
//! the concatenation in visit order. On the default 3×3 grid the symbols are
//! the keypad digits:
//!
//! ```text
//! 1 2 3
//! 4 5 6
//! 7 8 9
//! ```
//!
//! Larger grids continue with `A-Z` and then `a-n`, which covers the 49 cells
//! of the largest supported grid.

use std::fmt;

use lockgrid_core::cell::{Cell, GridError, GridSpec, MAX_GRID_SIZE};

/// Symbols indexed by cell id.
pub const CODE_ALPHABET: &[u8] = b"123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmn";

const _: () = assert!(CODE_ALPHABET.len() == MAX_GRID_SIZE as usize * MAX_GRID_SIZE as usize);

/// Errors raised when building or decoding a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// A code symbol that names no cell of the grid.
    UnknownSymbol { symbol: char, index: usize },
    /// A cell appears twice.
    DuplicateCell(Cell),
    /// A cell lies outside the grid.
    Grid(GridError),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSymbol { symbol, index } => {
                write!(f, "unknown pattern symbol {symbol:?} at index {index}")
            }
            Self::DuplicateCell(cell) => write!(f, "cell {cell} appears twice in pattern"),
            Self::Grid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GridError> for PatternError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

/// Compact symbol for a cell of `grid`.
///
/// A cell taken from a larger grid fails instead of aliasing another
/// cell's symbol.
pub fn cell_symbol(grid: &GridSpec, cell: Cell) -> Result<char, GridError> {
    let cell = grid.of(i32::from(cell.row()), i32::from(cell.column()))?;
    Ok(char::from(CODE_ALPHABET[grid.id_of(cell)]))
}

/// An ordered sequence of distinct cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    cells: Vec<Cell>,
}

impl Pattern {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from cells, rejecting duplicates.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Result<Self, PatternError> {
        let mut pattern = Self::new();
        for cell in cells {
            if !pattern.push(cell) {
                return Err(PatternError::DuplicateCell(cell));
            }
        }
        Ok(pattern)
    }

    /// Decode a compact code produced by [`to_code`](Self::to_code).
    pub fn from_code(code: &str, grid: &GridSpec) -> Result<Self, PatternError> {
        let mut pattern = Self::new();
        for (index, symbol) in code.chars().enumerate() {
            let id = CODE_ALPHABET
                .iter()
                .position(|&b| char::from(b) == symbol)
                .filter(|&id| id < grid.cell_count())
                .ok_or(PatternError::UnknownSymbol { symbol, index })?;
            let cell = grid.of_id(id as i32)?;
            if !pattern.push(cell) {
                return Err(PatternError::DuplicateCell(cell));
            }
        }
        Ok(pattern)
    }

    /// Compact code: one symbol per cell in visit order.
    ///
    /// Fails with [`PatternError::Grid`] if any cell lies outside `grid`.
    pub fn to_code(&self, grid: &GridSpec) -> Result<String, PatternError> {
        self.cells
            .iter()
            .map(|&c| cell_symbol(grid, c).map_err(PatternError::from))
            .collect()
    }

    /// Append `cell` unless already present. Returns whether it was added.
    pub fn push(&mut self, cell: Cell) -> bool {
        if self.cells.contains(&cell) {
            return false;
        }
        self.cells.push(cell);
        true
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// O(1) membership set over the cells of one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitLookup {
    grid: GridSpec,
    bits: u64,
}

impl VisitLookup {
    #[must_use]
    pub fn new(grid: GridSpec) -> Self {
        Self { grid, bits: 0 }
    }

    #[inline]
    fn bit(&self, cell: Cell) -> u64 {
        1u64 << self.grid.id_of(cell)
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.grid.contains(cell) && self.bits & self.bit(cell) != 0
    }

    /// Whether `cell` belongs to the grid this lookup covers.
    #[inline]
    #[must_use]
    pub fn grid_contains(&self, cell: Cell) -> bool {
        self.grid.contains(cell)
    }

    /// Mark `cell`; cells outside the grid are ignored.
    pub fn insert(&mut self, cell: Cell) {
        if self.grid.contains(cell) {
            self.bits |= self.bit(cell);
        }
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Reset to exactly the first `count` cells of `pattern`.
    pub fn mark_prefix(&mut self, pattern: &Pattern, count: usize) {
        self.clear();
        for cell in pattern.iter().take(count) {
            self.insert(cell);
        }
    }
}
