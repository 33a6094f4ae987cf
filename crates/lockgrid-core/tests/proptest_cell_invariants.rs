//! Property-based invariant tests for cell identity and hit-testing.
//!
//! 1. `of_id` and `of` are mutual inverses across every supported grid size
//! 2. Out-of-range input always errors, never clamps
//! 3. A hit always lands on the cell whose square contains the point
//! 4. Hit-testing never panics on arbitrary coordinates

use lockgrid_core::cell::{GridSpec, MAX_GRID_SIZE, MIN_GRID_SIZE};
use lockgrid_core::geometry::{GridGeometry, Point, Sides};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn grid_strategy() -> impl Strategy<Value = GridSpec> {
    (MIN_GRID_SIZE..=MAX_GRID_SIZE).prop_map(|n| GridSpec::new(n).expect("size in range"))
}

fn geometry_strategy() -> impl Strategy<Value = GridGeometry> {
    (grid_strategy(), 0.05f32..=1.0, 30.0f32..2000.0, 0.0f32..40.0).prop_map(
        |(grid, factor, side, pad)| {
            let mut g = GridGeometry::new(grid, factor);
            g.resize(side + 2.0 * pad, side + 2.0 * pad, Sides::all(pad));
            g
        },
    )
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Identity round trip
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn id_round_trips_through_coordinates(grid in grid_strategy(), seed in any::<u16>()) {
        let id = i32::from(seed) % grid.cell_count() as i32;
        let cell = grid.of_id(id).unwrap();
        prop_assert_eq!(grid.id_of(cell), id as usize);
        prop_assert_eq!(grid.of(i32::from(cell.row()), i32::from(cell.column())).unwrap(), cell);
    }

    #[test]
    fn coordinates_round_trip_through_id(grid in grid_strategy(), r in 0i32..7, c in 0i32..7) {
        let n = i32::from(grid.size());
        prop_assume!(r < n && c < n);
        let cell = grid.of(r, c).unwrap();
        prop_assert_eq!(grid.of_id(grid.id_of(cell) as i32).unwrap(), cell);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Out-of-range rejection
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn out_of_range_always_errors(grid in grid_strategy(), r in -50i32..50, c in -50i32..50) {
        let n = i32::from(grid.size());
        let in_range = (0..n).contains(&r) && (0..n).contains(&c);
        prop_assert_eq!(grid.of(r, c).is_ok(), in_range);
    }

    #[test]
    fn out_of_range_ids_error(grid in grid_strategy(), id in -100i32..200) {
        let in_range = id >= 0 && (id as usize) < grid.cell_count();
        prop_assert_eq!(grid.of_id(id).is_ok(), in_range);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3-4. Hit-testing
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hits_land_in_containing_square(g in geometry_strategy(), x in -100f32..2200.0, y in -100f32..2200.0) {
        if let Some(cell) = g.hit(Point::new(x, y)) {
            let c = g.center(cell);
            prop_assert!((x - c.x).abs() <= g.square_width() / 2.0 + 1e-3);
            prop_assert!((y - c.y).abs() <= g.square_height() / 2.0 + 1e-3);
        }
    }

    #[test]
    fn centers_always_hit(g in geometry_strategy()) {
        for cell in g.grid().cells() {
            prop_assert_eq!(g.hit(g.center(cell)), Some(cell));
        }
    }
}
