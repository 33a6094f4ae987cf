//! End-to-end gesture tests for `PatternLock`.
//!
//! Drives the lock with pointer and hover events on a 300×300 layout (100 px
//! squares, hit zones 60 px wide) and checks the notifications the host
//! receives.

use std::cell::{Cell as Flag, RefCell};
use std::rc::Rc;

use lockgrid_core::clock::ManualClock;
use lockgrid_core::event::{Event, EventResult, HoverEvent, HoverKind, PointerEvent};
use lockgrid_core::geometry::{Point, Sides};
use lockgrid_widgets::display::DisplayMode;
use lockgrid_widgets::{LockConfig, LockError, Pattern, PatternHandlers, PatternLock, Stateful};
use web_time::Duration;

// ============================================================================
// Helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Note {
    Start,
    Cleared,
    Added(String),
    Detected(String),
}

type Log = Rc<RefCell<Vec<Note>>>;

fn handlers(log: &Log) -> PatternHandlers {
    let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
    PatternHandlers::new()
        .on_start(move || a.borrow_mut().push(Note::Start))
        .on_cleared(move || b.borrow_mut().push(Note::Cleared))
        .on_cell_added(move |_, code| c.borrow_mut().push(Note::Added(code.to_owned())))
        .on_detected(move |_, code| d.borrow_mut().push(Note::Detected(code.to_owned())))
}

fn lock_with_log() -> (PatternLock, Log) {
    let log: Log = Rc::default();
    let mut lock = PatternLock::new(LockConfig::default())
        .unwrap()
        .with_handlers(handlers(&log));
    lock.resize(300.0, 300.0, Sides::default());
    (lock, log)
}

fn at(r: u8, c: u8) -> (f32, f32) {
    (50.0 + 100.0 * f32::from(c), 50.0 + 100.0 * f32::from(r))
}

fn down(lock: &mut PatternLock, r: u8, c: u8) -> EventResult {
    let (x, y) = at(r, c);
    lock.on_pointer(&PointerEvent::down(x, y))
}

fn move_to(lock: &mut PatternLock, r: u8, c: u8) -> EventResult {
    let (x, y) = at(r, c);
    lock.on_pointer(&PointerEvent::moved(x, y))
}

fn up(lock: &mut PatternLock) -> EventResult {
    let p = lock.in_progress_point();
    lock.on_pointer(&PointerEvent::up(p.x, p.y))
}

fn count(log: &Log, note: &Note) -> usize {
    log.borrow().iter().filter(|n| *n == note).count()
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn miss_then_up_reports_only_cleared() {
    let (mut lock, log) = lock_with_log();
    lock.on_pointer(&PointerEvent::down(95.0, 95.0));
    up(&mut lock);
    assert_eq!(*log.borrow(), vec![Note::Cleared]);
    assert!(!lock.is_in_progress());
}

#[test]
fn three_cell_gesture() {
    let (mut lock, log) = lock_with_log();
    down(&mut lock, 0, 0);
    move_to(&mut lock, 1, 1);
    move_to(&mut lock, 2, 1);
    up(&mut lock);

    assert_eq!(
        *log.borrow(),
        vec![
            Note::Added("1".into()),
            Note::Start,
            Note::Added("15".into()),
            Note::Added("158".into()),
            Note::Detected("158".into()),
        ]
    );
    assert!(!lock.is_in_progress());
    assert_eq!(lock.pattern_code(), "158");
}

#[test]
fn gap_fill_notifies_each_cell() {
    let (mut lock, log) = lock_with_log();
    down(&mut lock, 0, 0);
    move_to(&mut lock, 2, 2);
    up(&mut lock);

    assert_eq!(count(&log, &Note::Start), 1);
    assert_eq!(count(&log, &Note::Added("15".into())), 1);
    assert_eq!(count(&log, &Note::Added("159".into())), 1);
    assert_eq!(count(&log, &Note::Detected("159".into())), 1);
}

#[test]
fn knight_move_is_not_filled() {
    let (mut lock, _log) = lock_with_log();
    down(&mut lock, 0, 0);
    move_to(&mut lock, 1, 2);
    up(&mut lock);
    assert_eq!(lock.pattern_code(), "16");
}

#[test]
fn history_samples_are_replayed_in_order() {
    let (mut lock, _log) = lock_with_log();
    down(&mut lock, 0, 0);
    let (x1, y1) = at(0, 1);
    let (x2, y2) = at(1, 1);
    let (x3, y3) = at(2, 1);
    let batch = PointerEvent::moved(x3, y3)
        .with_history([Point::new(x1, y1), Point::new(x2, y2)]);
    lock.on_pointer(&batch);
    assert_eq!(lock.pattern_code(), "1258");
    assert_eq!(lock.in_progress_point(), Point::new(x3, y3));
}

#[test]
fn revisits_never_duplicate() {
    let (mut lock, _log) = lock_with_log();
    down(&mut lock, 1, 1);
    move_to(&mut lock, 0, 1);
    move_to(&mut lock, 1, 1);
    move_to(&mut lock, 0, 1);
    assert_eq!(lock.pattern_code(), "52");
}

#[test]
fn move_from_empty_space_starts_gesture() {
    let (mut lock, log) = lock_with_log();
    lock.on_pointer(&PointerEvent::down(95.0, 95.0));
    move_to(&mut lock, 0, 2);
    assert!(lock.is_in_progress());
    assert_eq!(
        *log.borrow(),
        vec![Note::Cleared, Note::Added("3".into()), Note::Start]
    );
}

#[test]
fn start_fires_once_per_gesture() {
    let (mut lock, log) = lock_with_log();
    down(&mut lock, 0, 0);
    for (r, c) in [(0, 1), (0, 2), (1, 2), (2, 2)] {
        move_to(&mut lock, r, c);
    }
    assert_eq!(count(&log, &Note::Start), 1);
}

#[test]
fn cancel_always_clears_once() {
    let (mut lock, log) = lock_with_log();
    assert_eq!(lock.on_pointer(&PointerEvent::cancel()), EventResult::Handled);
    assert_eq!(*log.borrow(), vec![Note::Cleared]);

    log.borrow_mut().clear();
    down(&mut lock, 0, 0);
    move_to(&mut lock, 0, 1);
    lock.on_pointer(&PointerEvent::cancel());
    assert_eq!(count(&log, &Note::Cleared), 1);
    assert!(lock.pattern().is_empty());
    assert!(!lock.is_in_progress());
}

#[test]
fn new_gesture_discards_previous_pattern() {
    let (mut lock, _log) = lock_with_log();
    down(&mut lock, 0, 0);
    move_to(&mut lock, 0, 1);
    up(&mut lock);
    lock.set_display_mode(DisplayMode::Wrong).unwrap();

    down(&mut lock, 2, 2);
    assert_eq!(lock.pattern_code(), "9");
    assert_eq!(lock.display_mode(), DisplayMode::Correct);
}

#[test]
fn up_on_empty_pattern_does_nothing() {
    let (mut lock, log) = lock_with_log();
    assert_eq!(up(&mut lock), EventResult::Handled);
    assert!(log.borrow().is_empty());
}

// ============================================================================
// Input gating and accessibility
// ============================================================================

#[test]
fn disabled_input_ignores_everything() {
    let (mut lock, log) = lock_with_log();
    lock.disable_input();
    assert_eq!(down(&mut lock, 0, 0), EventResult::Ignored);
    assert_eq!(move_to(&mut lock, 1, 1), EventResult::Ignored);
    assert_eq!(up(&mut lock), EventResult::Ignored);
    assert_eq!(lock.on_pointer(&PointerEvent::cancel()), EventResult::Ignored);
    assert!(log.borrow().is_empty());

    lock.enable_input();
    assert_eq!(down(&mut lock, 0, 0), EventResult::Handled);
}

#[test]
fn hover_drives_lock_only_with_touch_exploration() {
    let exploring = Rc::new(Flag::new(false));
    let log: Log = Rc::default();
    let mut lock = PatternLock::new(LockConfig::default())
        .unwrap()
        .with_handlers(handlers(&log))
        .with_accessibility(Rc::clone(&exploring));
    lock.resize(300.0, 300.0, Sides::default());

    let (x, y) = at(0, 0);
    let enter = Event::Hover(HoverEvent::new(HoverKind::Enter, x, y));
    assert_eq!(lock.handle_event(&enter), EventResult::Ignored);
    assert!(lock.pattern().is_empty());

    exploring.set(true);
    assert_eq!(lock.handle_event(&enter), EventResult::Ignored);
    let (x, y) = at(0, 1);
    lock.handle_event(&Event::Hover(HoverEvent::new(HoverKind::Move, x, y)));
    lock.handle_event(&Event::Hover(HoverEvent::new(HoverKind::Exit, x, y)));
    assert_eq!(count(&log, &Note::Detected("12".into())), 1);
}

// ============================================================================
// Display model
// ============================================================================

#[test]
fn animate_requires_pattern() {
    let (mut lock, _log) = lock_with_log();
    assert!(matches!(
        lock.set_display_mode(DisplayMode::Animate),
        Err(LockError::EmptyPatternAnimate)
    ));
    assert!(matches!(
        lock.set_pattern(DisplayMode::Animate, Pattern::new()),
        Err(LockError::EmptyPatternAnimate)
    ));
    assert_eq!(lock.display_mode(), DisplayMode::Correct);
}

#[test]
fn demo_playback_lights_prefix_at_half_steps() {
    let clock = ManualClock::new();
    let mut lock = PatternLock::new(LockConfig::default())
        .unwrap()
        .with_clock(clock.clone());
    lock.resize(300.0, 300.0, Sides::default());
    let grid = lock.grid();
    let pattern = Pattern::from_code("1236", &grid).unwrap();
    lock.set_pattern(DisplayMode::Animate, pattern.clone()).unwrap();

    let first = lock.geometry().center(pattern.first().unwrap());
    assert_eq!(lock.in_progress_point(), first);
    assert!(lock.lookup().is_empty());

    let d = Duration::from_millis(700);
    let origin = clock.elapsed();
    for k in 1..pattern.len() {
        clock.set_elapsed(origin + d * k as u32 + d / 2);
        lock.tick();
        assert_eq!(lock.lookup().len(), k, "k={k}");

        let a = lock.geometry().center(pattern.get(k - 1).unwrap());
        let b = lock.geometry().center(pattern.get(k).unwrap());
        let p = lock.in_progress_point();
        let on_segment = (p.distance(a) + p.distance(b) - a.distance(b)).abs() < 1e-3;
        assert!(on_segment, "k={k} point {p:?} not between {a:?} and {b:?}");
        assert!(p != a && p != b);
    }
}

#[test]
fn demo_pauses_on_full_pattern_then_wraps() {
    let clock = ManualClock::new();
    let mut lock = PatternLock::new(LockConfig::default())
        .unwrap()
        .with_clock(clock.clone());
    lock.resize(300.0, 300.0, Sides::default());
    let pattern = Pattern::from_code("159", &lock.grid()).unwrap();
    lock.set_pattern(DisplayMode::Animate, pattern).unwrap();

    let origin = clock.elapsed();
    clock.set_elapsed(origin + Duration::from_millis(3 * 700 + 350));
    lock.tick();
    assert_eq!(lock.lookup().len(), 3);

    clock.set_elapsed(origin + Duration::from_millis(4 * 700 + 350));
    lock.tick();
    assert_eq!(lock.lookup().len(), 0);
    assert!(lock.needs_frames());
}

#[test]
fn up_cancels_running_line_animations() {
    let (mut lock, _log) = lock_with_log();
    down(&mut lock, 0, 0);
    move_to(&mut lock, 0, 1);
    let cell = lock.grid().of(0, 1).unwrap();
    assert!(lock.cell_state(cell).unwrap().line_end.is_some());
    up(&mut lock);
    assert!(lock.cell_state(cell).unwrap().line_end.is_none());
}

#[test]
fn scene_uses_error_color_after_wrong() {
    let (mut lock, _log) = lock_with_log();
    down(&mut lock, 0, 0);
    move_to(&mut lock, 0, 2);
    up(&mut lock);
    lock.set_display_mode(DisplayMode::Wrong).unwrap();

    let scene = lock.scene();
    let palette = lock.config().palette;
    assert_eq!(scene.segments.len(), 2);
    assert!(scene.segments.iter().all(|s| s.color == palette.error));
    assert!(scene.trailing.is_none());
}

// ============================================================================
// Save / restore
// ============================================================================

#[test]
fn save_then_restore_reproduces_state() {
    let (mut source, _log) = lock_with_log();
    down(&mut source, 2, 0);
    move_to(&mut source, 1, 0);
    move_to(&mut source, 0, 0);
    move_to(&mut source, 1, 1);
    up(&mut source);
    source.set_display_mode(DisplayMode::Wrong).unwrap();
    source.set_stealth(true);
    source.set_haptics_enabled(false);
    source.disable_input();

    let saved = source.save_state();
    assert_eq!(saved.pattern_code, "7415");

    let (mut restored, _log) = lock_with_log();
    restored.restore_state(saved.clone()).unwrap();

    assert_eq!(restored.save_state(), saved);
    assert_eq!(restored.pattern(), source.pattern());
    assert_eq!(restored.display_mode(), DisplayMode::Wrong);
    assert_eq!(restored.flags(), source.flags());
    assert_eq!(restored.lookup(), source.lookup());
}

#[test]
fn restore_rejects_bad_code_without_side_effects() {
    let (mut lock, _log) = lock_with_log();
    down(&mut lock, 0, 0);
    up(&mut lock);

    let mut state = lock.save_state();
    state.pattern_code = "1x".into();
    state.stealth = true;
    assert!(matches!(lock.restore_state(state), Err(LockError::Pattern(_))));
    assert_eq!(lock.pattern_code(), "1");
    assert!(!lock.is_stealth());
}
