#![forbid(unsafe_code)]

//! Geometric primitives and grid hit-testing.
//!
//! [`GridGeometry`] maps pixel coordinates onto grid rows and columns. Each
//! cell owns a square of `square_width × square_height`; only a concentric
//! fraction of it (the *hit factor*) accepts hits, so a drag between two
//! neighbouring cells passes through dead space instead of flickering
//! between them.
//!
//! # Invariants
//!
//! 1. Hit zones of different rows (columns) never overlap for `0 < f ≤ 1`
//!    except on their shared edge when `f == 1`, where the lower index wins.
//! 2. `center_of_row(i)` lies inside row `i`'s hit zone for every `f > 0`.
//! 3. A geometry that has not been resized yet has zero-sized squares and
//!    hits nothing outside its padding origin.

use crate::cell::{Cell, GridSpec};

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
        }
    }

    /// Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An integer rectangle used for redraw regions.
///
/// Edges are stored as left/top (inclusive) and right/bottom (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    #[inline]
    #[must_use]
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Round float edges to the nearest pixel.
    #[must_use]
    pub fn rounded(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::from_ltrb(
            left.round() as i32,
            top.round() as i32,
            right.round() as i32,
            bottom.round() as i32,
        )
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Smallest rectangle containing both; an empty side is ignored.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Padding around the grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Default fraction of a cell square that accepts hits.
pub const DEFAULT_HIT_FACTOR: f32 = 0.6;

/// Pixel layout of the grid and the hit-test logic over it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    grid: GridSpec,
    hit_factor: f32,
    padding: Sides,
    square_width: f32,
    square_height: f32,
}

impl GridGeometry {
    /// Create a geometry for `grid` with the given hit factor.
    ///
    /// The geometry starts with zero-sized squares; call
    /// [`resize`](Self::resize) once the content size is known.
    #[must_use]
    pub fn new(grid: GridSpec, hit_factor: f32) -> Self {
        Self {
            grid,
            hit_factor,
            padding: Sides::default(),
            square_width: 0.0,
            square_height: 0.0,
        }
    }

    /// Side of the square a widget occupies given the space offered.
    #[inline]
    #[must_use]
    pub fn measure(width: f32, height: f32) -> f32 {
        width.min(height)
    }

    /// Recompute square sizes for a new widget size.
    pub fn resize(&mut self, width: f32, height: f32, padding: Sides) {
        let n = f32::from(self.grid.size());
        self.padding = padding;
        self.square_width = ((width - padding.horizontal_sum()) / n).max(0.0);
        self.square_height = ((height - padding.vertical_sum()) / n).max(0.0);
    }

    #[inline]
    #[must_use]
    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    #[inline]
    #[must_use]
    pub fn hit_factor(&self) -> f32 {
        self.hit_factor
    }

    #[inline]
    #[must_use]
    pub fn padding(&self) -> Sides {
        self.padding
    }

    #[inline]
    #[must_use]
    pub fn square_width(&self) -> f32 {
        self.square_width
    }

    #[inline]
    #[must_use]
    pub fn square_height(&self) -> f32 {
        self.square_height
    }

    /// Row whose hit zone contains `y`, if any.
    #[must_use]
    pub fn row_for_y(&self, y: f32) -> Option<u8> {
        axis_hit(y, self.padding.top, self.square_height, self.hit_factor, self.grid.size())
    }

    /// Column whose hit zone contains `x`, if any.
    #[must_use]
    pub fn column_for_x(&self, x: f32) -> Option<u8> {
        axis_hit(x, self.padding.left, self.square_width, self.hit_factor, self.grid.size())
    }

    /// Cell whose hit zone contains the point, if any.
    #[must_use]
    pub fn hit(&self, point: Point) -> Option<Cell> {
        let row = self.row_for_y(point.y)?;
        let column = self.column_for_x(point.x)?;
        self.grid.of(i32::from(row), i32::from(column)).ok()
    }

    /// Horizontal pixel center of `column`.
    #[inline]
    #[must_use]
    pub fn center_of_column(&self, column: u8) -> f32 {
        self.padding.left + f32::from(column) * self.square_width + self.square_width / 2.0
    }

    /// Vertical pixel center of `row`.
    #[inline]
    #[must_use]
    pub fn center_of_row(&self, row: u8) -> f32 {
        self.padding.top + f32::from(row) * self.square_height + self.square_height / 2.0
    }

    /// Pixel center of `cell`.
    #[inline]
    #[must_use]
    pub fn center(&self, cell: Cell) -> Point {
        Point::new(self.center_of_column(cell.column()), self.center_of_row(cell.row()))
    }

    /// The full square belonging to `cell`, each edge truncated to a whole
    /// pixel.
    #[must_use]
    pub fn cell_bounds(&self, cell: Cell) -> Rect {
        let c = self.center(cell);
        let hw = self.square_width / 2.0;
        let hh = self.square_height / 2.0;
        Rect::from_ltrb(
            (c.x - hw) as i32,
            (c.y - hh) as i32,
            (c.x + hw) as i32,
            (c.y + hh) as i32,
        )
    }
}

fn axis_hit(coord: f32, padding: f32, square: f32, factor: f32, count: u8) -> Option<u8> {
    let hit_size = square * factor;
    let offset = padding + (square - hit_size) / 2.0;
    (0..count).find(|&i| {
        let start = offset + square * f32::from(i);
        coord >= start && coord <= start + hit_size
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        let mut g = GridGeometry::new(GridSpec::default(), DEFAULT_HIT_FACTOR);
        g.resize(300.0, 300.0, Sides::default());
        g
    }

    #[test]
    fn squares_split_content_evenly() {
        let g = geometry();
        assert_eq!(g.square_width(), 100.0);
        assert_eq!(g.square_height(), 100.0);
    }

    #[test]
    fn padding_shrinks_squares() {
        let mut g = GridGeometry::new(GridSpec::default(), DEFAULT_HIT_FACTOR);
        g.resize(330.0, 360.0, Sides::new(30.0, 15.0, 30.0, 15.0));
        assert_eq!(g.square_width(), 100.0);
        assert_eq!(g.square_height(), 100.0);
        assert_eq!(g.center_of_column(0), 65.0);
        assert_eq!(g.center_of_row(0), 80.0);
    }

    #[test]
    fn hit_zone_is_concentric() {
        let g = geometry();
        // factor 0.6 on a 100px square: zone [20, 80] for row 0.
        assert_eq!(g.row_for_y(20.0), Some(0));
        assert_eq!(g.row_for_y(80.0), Some(0));
        assert_eq!(g.row_for_y(19.9), None);
        assert_eq!(g.row_for_y(80.1), None);
        assert_eq!(g.row_for_y(150.0), Some(1));
        assert_eq!(g.row_for_y(250.0), Some(2));
    }

    #[test]
    fn columns_mirror_rows() {
        let g = geometry();
        assert_eq!(g.column_for_x(50.0), Some(0));
        assert_eq!(g.column_for_x(95.0), None);
        assert_eq!(g.column_for_x(280.0), Some(2));
        assert_eq!(g.column_for_x(290.0), None);
    }

    #[test]
    fn hit_requires_both_axes() {
        let g = geometry();
        assert_eq!(g.hit(Point::new(150.0, 250.0)), g.grid().of(2, 1).ok());
        assert_eq!(g.hit(Point::new(150.0, 95.0)), None);
        assert_eq!(g.hit(Point::new(-5.0, 50.0)), None);
    }

    #[test]
    fn centers_hit_their_own_cell() {
        let g = geometry();
        for cell in g.grid().cells() {
            assert_eq!(g.hit(g.center(cell)), Some(cell));
        }
    }

    #[test]
    fn full_hit_factor_prefers_lower_index_on_shared_edge() {
        let mut g = GridGeometry::new(GridSpec::default(), 1.0);
        g.resize(300.0, 300.0, Sides::default());
        assert_eq!(g.row_for_y(100.0), Some(0));
        assert_eq!(g.row_for_y(100.5), Some(1));
    }

    #[test]
    fn unsized_geometry_hits_only_origin() {
        let g = GridGeometry::new(GridSpec::default(), DEFAULT_HIT_FACTOR);
        assert_eq!(g.hit(Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn measure_takes_smaller_side() {
        assert_eq!(GridGeometry::measure(400.0, 250.0), 250.0);
        assert_eq!(GridGeometry::measure(120.0, 500.0), 120.0);
    }

    #[test]
    fn cell_bounds_cover_square() {
        let g = geometry();
        let cell = g.grid().of(1, 2).unwrap();
        assert_eq!(g.cell_bounds(cell), Rect::from_ltrb(200, 100, 300, 200));
    }

    #[test]
    fn cell_bounds_truncate_fractional_edges() {
        let mut g = GridGeometry::new(GridSpec::default(), DEFAULT_HIT_FACTOR);
        g.resize(100.0, 100.0, Sides::default());
        let cell = g.grid().of(1, 1).unwrap();
        assert_eq!(g.cell_bounds(cell), Rect::from_ltrb(33, 33, 66, 66));
    }

    #[test]
    fn rect_union_ignores_empty() {
        let a = Rect::from_ltrb(10, 10, 20, 20);
        assert_eq!(a.union(&Rect::default()), a);
        assert_eq!(Rect::default().union(&a), a);
        let b = Rect::from_ltrb(5, 15, 12, 40);
        assert_eq!(a.union(&b), Rect::from_ltrb(5, 10, 20, 40));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(100.0, 30.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(50.0, 20.0));
    }
}
