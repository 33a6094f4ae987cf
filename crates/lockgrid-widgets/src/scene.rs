#![forbid(unsafe_code)]

//! Draw-list handed to the host painter.
//!
//! A [`Scene`] is a flat description of one frame: a dot per cell and the
//! path segments of the pattern. The host turns it into canvas calls; the
//! lock itself never paints.
//!
//! # Path rules
//!
//! - Segments run through the pattern in order and stop at the first cell
//!   that is not lit (only possible during demo playback).
//! - The segment into a cell ends at that cell's animated line endpoint if
//!   one is set, otherwise at its center.
//! - While a gesture is in progress or a demo is playing, a trailing segment
//!   runs from the last lit cell to the in-progress point. It fades in with
//!   distance: `alpha = clamp((dist / square_width - 0.3) * 4, 0, 1)`.
//! - Stealth mode draws no path at all.

use lockgrid_core::cell::Cell;
use lockgrid_core::color::PackedRgba;
use lockgrid_core::geometry::{GridGeometry, Point};

use crate::cell_state::CellStates;
use crate::display::{DisplayMode, Palette};
use crate::pattern::{Pattern, VisitLookup};

/// One dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub cell: Cell,
    pub center: Point,
    pub radius: f32,
    /// Color with the cell's opacity applied.
    pub color: PackedRgba,
    pub lit: bool,
}

/// One straight stroke of the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: PackedRgba,
    pub width: f32,
}

/// Everything the painter needs for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub dots: Vec<Dot>,
    pub segments: Vec<Segment>,
    /// The rubber band toward the pointer, drawn after `segments`.
    pub trailing: Option<Segment>,
}

/// Borrowed view of the lock state a scene is built from.
#[derive(Debug, Clone, Copy)]
pub struct SceneContext<'a> {
    pub geometry: &'a GridGeometry,
    pub pattern: &'a Pattern,
    pub lookup: &'a VisitLookup,
    pub cells: &'a CellStates,
    pub palette: &'a Palette,
    pub mode: DisplayMode,
    pub stealth: bool,
    pub in_progress: bool,
    pub in_progress_point: Point,
    pub path_width: f32,
}

/// Opacity of the trailing segment from `last` to `pointer`.
#[must_use]
pub fn trailing_alpha(pointer: Point, last: Point, square_width: f32) -> f32 {
    if square_width <= 0.0 {
        return 1.0;
    }
    let frac = pointer.distance(last) / square_width;
    ((frac - 0.3) * 4.0).clamp(0.0, 1.0)
}

impl Scene {
    /// Build the frame for `ctx`.
    #[must_use]
    pub fn build(ctx: &SceneContext<'_>) -> Self {
        let color_for =
            |lit: bool| ctx.palette.resolve(lit, ctx.stealth, ctx.in_progress, ctx.mode);

        let dots = ctx
            .geometry
            .grid()
            .cells()
            .filter_map(|cell| {
                let state = ctx.cells.get(cell)?;
                let mut center = ctx.geometry.center(cell);
                center.y += state.translate_y;
                let lit = ctx.lookup.contains(cell);
                Some(Dot {
                    cell,
                    center,
                    radius: state.size * state.scale / 2.0,
                    color: color_for(lit).with_opacity(state.alpha),
                    lit,
                })
            })
            .collect();

        let mut scene = Scene {
            dots,
            segments: Vec::new(),
            trailing: None,
        };
        if ctx.stealth {
            return scene;
        }

        let path_color = color_for(true);
        let mut last: Option<Point> = None;
        for cell in ctx.pattern.iter() {
            if !ctx.lookup.contains(cell) {
                break;
            }
            let center = ctx.geometry.center(cell);
            if let Some(from) = last {
                let to = ctx
                    .cells
                    .get(cell)
                    .and_then(|s| s.line_end)
                    .unwrap_or(center);
                scene.segments.push(Segment {
                    from,
                    to,
                    color: path_color,
                    width: ctx.path_width,
                });
            }
            last = Some(center);
        }

        let trailing_visible = ctx.in_progress || ctx.mode == DisplayMode::Animate;
        if let Some(from) = last.filter(|_| trailing_visible) {
            let alpha = trailing_alpha(
                ctx.in_progress_point,
                from,
                ctx.geometry.square_width(),
            );
            scene.trailing = Some(Segment {
                from,
                to: ctx.in_progress_point,
                color: path_color.with_opacity(alpha),
                width: ctx.path_width,
            });
        }
        scene
    }

    /// Dots that are part of the lit pattern.
    pub fn lit_dots(&self) -> impl Iterator<Item = &Dot> {
        self.dots.iter().filter(|d| d.lit)
    }
}
