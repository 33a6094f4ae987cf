#![forbid(unsafe_code)]

//! The pattern lock widget and its interaction state machine.
//!
//! [`PatternLock`] consumes pointer events, grows a [`Pattern`] through the
//! [`SequenceEngine`], notifies the host through [`PatternHandlers`], and
//! keeps the display model (mode, per-cell animations, demo playback)
//! current. It never paints: the host pulls a [`Redraw`] request and a
//! [`Scene`] each frame.
//!
//! # State machine
//!
//! ```text
//!            Down on cell / Move onto first cell
//!   Idle ───────────────────────────────────────► InProgress
//!    ▲                                               │
//!    └──────────── Up (non-empty) / Cancel ──────────┘
//! ```
//!
//! - **Down** clears the previous pattern first. A hit starts a gesture; a
//!   miss reports "cleared".
//! - **Move** replays every coalesced sample in order, so fast drags never
//!   skip a cell.
//! - **Up** freezes a non-empty pattern and reports it as detected.
//! - **Cancel** always clears and reports "cleared".
//!
//! # Invariants
//!
//! 1. The pattern never holds a duplicate and only holds cells of the grid.
//! 2. Outside demo playback the lit cells are exactly the pattern's cells.
//! 3. Each gesture reports "start" at most once.
//! 4. Input is ignored entirely while disabled.
//! 5. A cell activated while no frames are needed starts its animation at
//!    the activation instant, however long the host stayed idle.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Animate with an empty pattern | `Err(LockError::EmptyPatternAnimate)`, state untouched |
//! | Cell from another grid in `set_pattern` | `Err(LockError::Grid)`, state untouched |
//! | Move after Up without a new Down | Samples ignored, pattern stays frozen |
//! | Events before the first `resize` | Zero-sized squares; nothing hits |

use std::fmt;

use lockgrid_core::cell::{Cell, GridSpec};
use lockgrid_core::clock::{Clock, SystemClock};
use lockgrid_core::event::{Event, EventResult, HoverEvent, PointerEvent, PointerKind};
use lockgrid_core::geometry::{GridGeometry, Point, Rect, Sides};
use web_time::{Duration, Instant};

use crate::cell_state::{CellState, CellStates};
use crate::config::{LockConfig, LockFlags};
use crate::display::{DemoPlayback, DisplayMode};
use crate::engine::SequenceEngine;
use crate::error::LockError;
use crate::host::{AccessibilityProbe, Haptics, NoAccessibility, NoHaptics};
use crate::listener::PatternHandlers;
use crate::pattern::{Pattern, VisitLookup};
use crate::persist::{LockPersistState, StateKey, Stateful};
use crate::redraw::Redraw;
use crate::scene::{Scene, SceneContext};

/// Grid-based gesture lock.
pub struct PatternLock {
    config: LockConfig,
    geometry: GridGeometry,
    engine: SequenceEngine,
    cells: CellStates,
    flags: LockFlags,
    mode: DisplayMode,
    demo: Option<DemoPlayback>,

    // Session
    in_progress: bool,
    in_progress_point: Point,

    // Redraw bookkeeping
    redraw: Redraw,
    move_region: Rect,
    last_advance: Option<Instant>,

    // Collaborators
    handlers: PatternHandlers,
    haptics: Box<dyn Haptics>,
    accessibility: Box<dyn AccessibilityProbe>,
    clock: Box<dyn Clock>,
    persistence_id: Option<String>,
}

impl fmt::Debug for PatternLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternLock")
            .field("grid", &self.geometry.grid().size())
            .field("pattern_len", &self.engine.pattern().len())
            .field("mode", &self.mode)
            .field("in_progress", &self.in_progress)
            .field("flags", &self.flags)
            .finish()
    }
}

impl PatternLock {
    /// Build a lock from a validated configuration.
    pub fn new(config: LockConfig) -> Result<Self, LockError> {
        let grid = config.validate()?;
        let geometry = GridGeometry::new(grid, config.hit_factor);
        Ok(Self {
            engine: SequenceEngine::new(&geometry),
            cells: CellStates::new(grid, config.dot_size),
            flags: config.flags,
            mode: DisplayMode::Correct,
            demo: None,
            in_progress: false,
            in_progress_point: Point::default(),
            redraw: Redraw::None,
            move_region: Rect::default(),
            last_advance: None,
            handlers: PatternHandlers::new(),
            haptics: Box::new(NoHaptics),
            accessibility: Box::new(NoAccessibility),
            clock: Box::new(SystemClock),
            persistence_id: None,
            geometry,
            config,
        })
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: PatternHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    #[must_use]
    pub fn with_haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.haptics = Box::new(haptics);
        self
    }

    #[must_use]
    pub fn with_accessibility(mut self, probe: impl AccessibilityProbe + 'static) -> Self {
        self.accessibility = Box::new(probe);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Distinguish this lock from others in persisted state.
    #[must_use]
    pub fn with_persistence_id(mut self, id: impl Into<String>) -> Self {
        self.persistence_id = Some(id.into());
        self
    }

    pub fn set_handlers(&mut self, handlers: PatternHandlers) {
        self.handlers = handlers;
    }

    // --- Accessors ---

    #[inline]
    #[must_use]
    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn grid(&self) -> GridSpec {
        self.geometry.grid()
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Independent copy of the current pattern.
    #[must_use]
    pub fn pattern(&self) -> Pattern {
        self.engine.pattern().clone()
    }

    /// Compact code of the current pattern.
    #[must_use]
    pub fn pattern_code(&self) -> String {
        // The engine only ever holds cells of this grid.
        self.engine
            .pattern()
            .to_code(&self.geometry.grid())
            .unwrap_or_default()
    }

    /// Cells currently lit.
    #[inline]
    #[must_use]
    pub fn lookup(&self) -> &VisitLookup {
        self.engine.lookup()
    }

    #[inline]
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// End of the rubber band: the last pointer position, or the demo's
    /// travelling point.
    #[inline]
    #[must_use]
    pub fn in_progress_point(&self) -> Point {
        self.in_progress_point
    }

    #[must_use]
    pub fn cell_state(&self, cell: Cell) -> Option<&CellState> {
        self.cells.get(cell)
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> LockFlags {
        self.flags
    }

    #[inline]
    #[must_use]
    pub fn is_input_enabled(&self) -> bool {
        self.flags.contains(LockFlags::INPUT_ENABLED)
    }

    #[inline]
    #[must_use]
    pub fn is_stealth(&self) -> bool {
        self.flags.contains(LockFlags::STEALTH)
    }

    #[inline]
    #[must_use]
    pub fn is_haptics_enabled(&self) -> bool {
        self.flags.contains(LockFlags::HAPTICS)
    }

    // --- Toggles ---

    pub fn enable_input(&mut self) {
        self.flags.insert(LockFlags::INPUT_ENABLED);
    }

    /// Ignore pointer input until re-enabled. The pattern is kept.
    pub fn disable_input(&mut self) {
        self.flags.remove(LockFlags::INPUT_ENABLED);
    }

    pub fn set_stealth(&mut self, on: bool) {
        self.flags.set(LockFlags::STEALTH, on);
        self.redraw.request_full();
    }

    pub fn set_haptics_enabled(&mut self, on: bool) {
        self.flags.set(LockFlags::HAPTICS, on);
    }

    // --- Layout ---

    /// Side of the square the lock occupies within the offered space.
    #[must_use]
    pub fn measure(width: f32, height: f32) -> f32 {
        GridGeometry::measure(width, height)
    }

    /// Recompute the layout after the host resized the widget.
    pub fn resize(&mut self, width: f32, height: f32, padding: Sides) {
        self.geometry.resize(width, height, padding);
        self.redraw.request_full();
    }

    // --- Display ---

    /// Change how the pattern is presented.
    ///
    /// `Animate` restarts demo playback from the first cell and fails when
    /// there is no pattern.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), LockError> {
        if mode == DisplayMode::Animate && self.engine.pattern().is_empty() {
            return Err(LockError::EmptyPatternAnimate);
        }
        self.apply_display_mode(mode);
        Ok(())
    }

    fn apply_display_mode(&mut self, mode: DisplayMode) {
        let was_animating = self.mode == DisplayMode::Animate;
        self.mode = mode;

        match (mode, self.engine.pattern().first()) {
            (DisplayMode::Animate, Some(first)) => {
                let now = self.clock.now();
                self.demo = Some(DemoPlayback::start(now));
                self.in_progress_point = self.geometry.center(first);
                self.engine.light_prefix(0);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    pattern_len = self.engine.pattern().len(),
                    "demo playback started"
                );
            }
            _ => {
                self.demo = None;
                if was_animating {
                    self.engine.resync_lookup();
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(?mode, "display mode changed");
        self.redraw.request_full();
    }

    /// Replace the pattern and present it in `mode`.
    ///
    /// Fails without touching any state if a cell lies outside the grid or
    /// `mode` is `Animate` and `pattern` is empty.
    pub fn set_pattern(&mut self, mode: DisplayMode, pattern: Pattern) -> Result<(), LockError> {
        let grid = self.geometry.grid();
        for cell in pattern.iter() {
            grid.of(i32::from(cell.row()), i32::from(cell.column()))?;
        }
        if mode == DisplayMode::Animate && pattern.is_empty() {
            return Err(LockError::EmptyPatternAnimate);
        }
        self.engine.replace(pattern);
        self.apply_display_mode(mode);
        Ok(())
    }

    /// Discard the pattern without notifying the host.
    pub fn clear_pattern(&mut self) {
        self.reset_pattern();
    }

    fn reset_pattern(&mut self) {
        self.engine.clear();
        self.cells.cancel_line_animations();
        self.mode = DisplayMode::Correct;
        self.demo = None;
        self.redraw.request_full();
    }

    // --- Frame ---

    /// Advance animations and demo playback to `now`.
    ///
    /// Call once per frame before [`scene`](Self::scene).
    pub fn advance(&mut self, now: Instant) {
        let dt = self
            .last_advance
            .map_or(Duration::ZERO, |prev| now.saturating_duration_since(prev));
        self.last_advance = Some(now);

        if self.cells.is_animating() {
            self.cells.tick(dt);
            self.redraw.request_full();
        }

        if let (DisplayMode::Animate, Some(demo)) = (self.mode, self.demo) {
            let len = self.engine.pattern().len();
            let frame = demo.frame(now, len, self.config.per_circle);
            let shown = frame.shown;

            self.engine.light_prefix(shown);

            if let Some(t) = frame.progress {
                let pattern = self.engine.pattern();
                if let (Some(current), Some(next)) = (pattern.get(shown - 1), pattern.get(shown)) {
                    let from = self.geometry.center(current);
                    let to = self.geometry.center(next);
                    self.in_progress_point = from.lerp(to, t);
                }
            }
            self.redraw.request_full();
        }
    }

    /// Advance to the lock's own clock.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.advance(now);
    }

    /// Whether the host should keep scheduling frames.
    #[must_use]
    pub fn needs_frames(&self) -> bool {
        self.mode == DisplayMode::Animate || self.cells.is_animating()
    }

    /// Take the pending redraw request.
    pub fn take_redraw(&mut self) -> Redraw {
        self.redraw.take()
    }

    /// Draw-list for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::build(&SceneContext {
            geometry: &self.geometry,
            pattern: self.engine.pattern(),
            lookup: self.engine.lookup(),
            cells: &self.cells,
            palette: &self.config.palette,
            mode: self.mode,
            stealth: self.is_stealth(),
            in_progress: self.in_progress,
            in_progress_point: self.in_progress_point,
            path_width: self.config.path_width,
        })
    }

    // --- Input ---

    /// Route any event.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Pointer(pointer) => self.on_pointer(pointer),
            Event::Hover(hover) => self.on_hover(hover),
        }
    }

    /// Feed one pointer event through the state machine.
    pub fn on_pointer(&mut self, event: &PointerEvent) -> EventResult {
        if !self.is_input_enabled() {
            return EventResult::Ignored;
        }
        match event.kind {
            PointerKind::Down => self.pointer_down(event.position),
            PointerKind::Move => self.pointer_move(event),
            PointerKind::Up => self.pointer_up(),
            PointerKind::Cancel => self.pointer_cancel(),
        }
        EventResult::Handled
    }

    /// Hover events drive the lock only while touch exploration is on.
    ///
    /// The hover is always reported unhandled so the platform's own
    /// accessibility handling still sees it.
    pub fn on_hover(&mut self, event: &HoverEvent) -> EventResult {
        if self.accessibility.touch_exploration_enabled() {
            let _ = self.on_pointer(&event.as_pointer());
        }
        EventResult::Ignored
    }

    fn pointer_down(&mut self, position: Point) {
        self.reset_pattern();

        let hit = self.detect_and_add_hit(position);
        match hit {
            Some(cell) => {
                self.in_progress = true;
                self.mode = DisplayMode::Correct;
                #[cfg(feature = "tracing")]
                tracing::debug!(row = cell.row(), column = cell.column(), "pattern started");
                self.handlers.notify_start();

                self.redraw.request_region(self.geometry.cell_bounds(cell));
            }
            None => {
                self.in_progress = false;
                #[cfg(feature = "tracing")]
                tracing::debug!("pattern cleared by miss");
                self.handlers.notify_cleared();
            }
        }
        self.in_progress_point = position;
        self.move_region = Rect::default();
    }

    fn pointer_move(&mut self, event: &PointerEvent) {
        if !self.in_progress && !self.engine.pattern().is_empty() {
            return;
        }

        let radius = self.config.path_width;
        let threshold = self.config.drag_threshold;
        let mut batch = Rect::default();
        let mut invalidate_now = false;

        for sample in event.samples() {
            let hit = self.detect_and_add_hit(sample);
            let len = self.engine.pattern().len();
            if hit.is_some() && len == 1 {
                self.in_progress = true;
                #[cfg(feature = "tracing")]
                tracing::debug!("pattern started by move");
                self.handlers.notify_start();
            }

            let dx = (sample.x - self.in_progress_point.x).abs();
            let dy = (sample.y - self.in_progress_point.y).abs();
            if dx > threshold || dy > threshold {
                invalidate_now = true;
            }

            let Some(last) = self.engine.pattern().last().filter(|_| self.in_progress) else {
                continue;
            };
            let lc = self.geometry.center(last);
            let mut left = lc.x.min(sample.x) - radius;
            let mut right = lc.x.max(sample.x) + radius;
            let mut top = lc.y.min(sample.y) - radius;
            let mut bottom = lc.y.max(sample.y) + radius;

            if let Some(cell) = hit {
                let hc = self.geometry.center(cell);
                let half_w = self.geometry.square_width() * 0.5;
                let half_h = self.geometry.square_height() * 0.5;
                left = left.min(hc.x - half_w);
                right = right.max(hc.x + half_w);
                top = top.min(hc.y - half_h);
                bottom = bottom.max(hc.y + half_h);
            }
            batch = batch.union(&Rect::rounded(left, top, right, bottom));
        }
        self.in_progress_point = event.position;

        if invalidate_now {
            self.redraw.request_region(self.move_region.union(&batch));
            self.move_region = batch;
        }
    }

    fn pointer_up(&mut self) {
        if self.engine.pattern().is_empty() {
            return;
        }
        self.in_progress = false;
        self.cells.cancel_line_animations();

        let code = self.pattern_code();
        #[cfg(feature = "tracing")]
        tracing::debug!(len = self.engine.pattern().len(), code = %code, "pattern detected");
        self.handlers.notify_detected(self.engine.pattern(), &code);
        self.redraw.request_full();
    }

    fn pointer_cancel(&mut self) {
        self.in_progress = false;
        self.reset_pattern();
        #[cfg(feature = "tracing")]
        tracing::debug!("pattern cancelled");
        self.handlers.notify_cleared();
    }

    /// Hit-test one sample and append what it produced, notifying per cell.
    ///
    /// Returns the hit cell only if it was newly appended. While demo
    /// playback has the lookup dimmed, a sample over an already recorded
    /// cell is not a hit.
    fn detect_and_add_hit(&mut self, point: Point) -> Option<Cell> {
        let outcome = self.engine.plan_hit(&self.geometry, point)?;
        let mut hit_added = false;

        for cell in outcome.added() {
            if !self.engine.append(cell) {
                continue;
            }
            hit_added |= cell == outcome.hit;
            #[cfg(feature = "tracing")]
            if Some(cell) == outcome.fill_in {
                tracing::trace!(row = cell.row(), column = cell.column(), "gap filled");
            }
            if !self.is_stealth() {
                // Idle hosts stop sending frames; time before this
                // activation must not count against it.
                if !self.needs_frames() {
                    self.last_advance = Some(self.clock.now());
                }
                let center = self.geometry.center(cell);
                self.cells.activate(
                    cell,
                    self.in_progress_point,
                    center,
                    self.config.dot_size_activated,
                );
            }
            let code = self.pattern_code();
            self.handlers.notify_cell_added(self.engine.pattern(), &code);
        }

        if !hit_added {
            return None;
        }
        if self.is_haptics_enabled() {
            self.haptics.cell_entered();
        }
        Some(outcome.hit)
    }
}

impl Stateful for PatternLock {
    type State = LockPersistState;
    type Error = LockError;

    fn state_key(&self) -> StateKey {
        StateKey::new(
            "PatternLock",
            self.persistence_id.as_deref().unwrap_or("default"),
        )
    }

    fn save_state(&self) -> LockPersistState {
        LockPersistState {
            pattern_code: self.pattern_code(),
            display_mode: self.mode,
            input_enabled: self.is_input_enabled(),
            stealth: self.is_stealth(),
            haptics: self.is_haptics_enabled(),
        }
    }

    /// Restore a saved record. Fails without touching any state if the code
    /// does not decode on this grid or asks to animate nothing.
    fn restore_state(&mut self, state: LockPersistState) -> Result<(), LockError> {
        let pattern = Pattern::from_code(&state.pattern_code, &self.geometry.grid())?;
        if state.display_mode == DisplayMode::Animate && pattern.is_empty() {
            return Err(LockError::EmptyPatternAnimate);
        }

        self.in_progress = false;
        self.cells.cancel_line_animations();
        self.flags.set(LockFlags::INPUT_ENABLED, state.input_enabled);
        self.flags.set(LockFlags::STEALTH, state.stealth);
        self.flags.set(LockFlags::HAPTICS, state.haptics);
        self.set_pattern(state.display_mode, pattern)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(code = %state.pattern_code, mode = ?state.display_mode, "state restored");
        Ok(())
    }
}
