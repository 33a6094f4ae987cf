#![forbid(unsafe_code)]

//! Cell identity: grid positions and the registry that validates them.
//!
//! A [`Cell`] is a plain `(row, column)` value. It carries no knowledge of the
//! grid it belongs to, so two cells are equal exactly when their coordinates
//! are equal. Range checking and id conversion live on [`GridSpec`], which is
//! the only way to obtain a cell from untrusted coordinates.
//!
//! # Invariants
//!
//! 1. `GridSpec::of(r, c)` succeeds iff `r < size && c < size`.
//! 2. `id = row * size + column`, and `of_id(id(cell)) == cell` for every
//!    cell in range.
//! 3. Out-of-range input is reported, never clamped.

use std::fmt;

/// Smallest supported grid size.
pub const MIN_GRID_SIZE: u8 = 1;

/// Largest supported grid size.
///
/// Bounded so the full cell set fits in a 64-bit visit mask and every cell has
/// a single-symbol compact code.
pub const MAX_GRID_SIZE: u8 = 7;

/// Default grid size (3×3).
pub const DEFAULT_GRID_SIZE: u8 = 3;

/// One position in the lock grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    row: u8,
    column: u8,
}

impl Cell {
    /// Row index (0 = top).
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Column index (0 = left).
    #[inline]
    #[must_use]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Unchecked constructor for callers that already validated the range.
    #[inline]
    pub(crate) const fn new_unchecked(row: u8, column: u8) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Errors raised when resolving cells or building a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Row index outside `[0, size)`.
    RowOutOfRange { row: i32, size: u8 },
    /// Column index outside `[0, size)`.
    ColumnOutOfRange { column: i32, size: u8 },
    /// Linear id outside `[0, size * size)`.
    IdOutOfRange { id: i32, size: u8 },
    /// Grid size outside `[MIN_GRID_SIZE, MAX_GRID_SIZE]`.
    UnsupportedSize(u8),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowOutOfRange { row, size } => {
                write!(f, "row must be in range 0-{}, got {row}", size - 1)
            }
            Self::ColumnOutOfRange { column, size } => {
                write!(f, "column must be in range 0-{}, got {column}", size - 1)
            }
            Self::IdOutOfRange { id, size } => {
                write!(
                    f,
                    "cell id must be in range 0-{}, got {id}",
                    u16::from(*size) * u16::from(*size) - 1
                )
            }
            Self::UnsupportedSize(size) => write!(
                f,
                "grid size must be in range {MIN_GRID_SIZE}-{MAX_GRID_SIZE}, got {size}"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Dimensions of a square lock grid; resolves and validates cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    size: u8,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GridSpec {
    /// Create a grid of `size × size` cells.
    pub fn new(size: u8) -> Result<Self, GridError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(GridError::UnsupportedSize(size));
        }
        Ok(Self { size })
    }

    /// Cells per side.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Resolve `(row, column)` to a cell.
    pub fn of(&self, row: i32, column: i32) -> Result<Cell, GridError> {
        let size = i32::from(self.size);
        if !(0..size).contains(&row) {
            return Err(GridError::RowOutOfRange {
                row,
                size: self.size,
            });
        }
        if !(0..size).contains(&column) {
            return Err(GridError::ColumnOutOfRange {
                column,
                size: self.size,
            });
        }
        Ok(Cell::new_unchecked(row as u8, column as u8))
    }

    /// Resolve a linear id (`row * size + column`) to a cell.
    pub fn of_id(&self, id: i32) -> Result<Cell, GridError> {
        let size = i32::from(self.size);
        if id < 0 || id >= size * size {
            return Err(GridError::IdOutOfRange {
                id,
                size: self.size,
            });
        }
        self.of(id / size, id % size)
    }

    /// Linear id of `cell` in this grid.
    #[inline]
    #[must_use]
    pub fn id_of(&self, cell: Cell) -> usize {
        usize::from(cell.row) * usize::from(self.size) + usize::from(cell.column)
    }

    /// Whether `cell` lies inside this grid.
    #[inline]
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.column < self.size
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |column| Cell::new_unchecked(row, column)))
    }
}
