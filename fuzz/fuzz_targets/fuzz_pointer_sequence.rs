#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lockgrid_core::event::{Event, HoverEvent, HoverKind, PointerEvent};
use lockgrid_core::geometry::{Point, Sides};
use lockgrid_widgets::display::DisplayMode;
use lockgrid_widgets::{LockConfig, PatternLock};
use web_time::{Duration, Instant};

#[derive(Debug, Arbitrary)]
enum Op {
    Down(i16, i16),
    Move { to: (i16, i16), history: Vec<(i16, i16)> },
    Up,
    Cancel,
    Hover(u8, i16, i16),
    Advance(u16),
    Mode(u8),
    ToggleInput,
    ToggleStealth,
}

#[derive(Debug, Arbitrary)]
struct Input {
    size: u8,
    side: u16,
    ops: Vec<Op>,
}

fn pt((x, y): (i16, i16)) -> Point {
    Point::new(f32::from(x), f32::from(y))
}

fuzz_target!(|input: Input| {
    let config = LockConfig::default().grid_size(input.size % 7 + 1);
    let Ok(lock) = PatternLock::new(config) else {
        return;
    };
    let mut lock = lock.with_accessibility(true);
    let side = f32::from(input.side % 2048);
    lock.resize(side, side, Sides::all(4.0));

    let t0 = Instant::now();
    let mut now = t0;
    lock.advance(now);

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Down(x, y) => {
                lock.on_pointer(&PointerEvent::down(f32::from(x), f32::from(y)));
            }
            Op::Move { to, history } => {
                let event = PointerEvent::moved(f32::from(to.0), f32::from(to.1))
                    .with_history(history.into_iter().take(32).map(pt));
                lock.on_pointer(&event);
            }
            Op::Up => {
                let p = lock.in_progress_point();
                lock.on_pointer(&PointerEvent::up(p.x, p.y));
            }
            Op::Cancel => {
                lock.on_pointer(&PointerEvent::cancel());
            }
            Op::Hover(kind, x, y) => {
                let kind = match kind % 3 {
                    0 => HoverKind::Enter,
                    1 => HoverKind::Move,
                    _ => HoverKind::Exit,
                };
                let hover = HoverEvent::new(kind, f32::from(x), f32::from(y));
                lock.handle_event(&Event::Hover(hover));
            }
            Op::Advance(ms) => {
                now += Duration::from_millis(u64::from(ms));
                lock.advance(now);
            }
            Op::Mode(m) => {
                let mode = match m % 3 {
                    0 => DisplayMode::Correct,
                    1 => DisplayMode::Wrong,
                    _ => DisplayMode::Animate,
                };
                let _ = lock.set_display_mode(mode);
            }
            Op::ToggleInput => {
                if lock.is_input_enabled() {
                    lock.disable_input();
                } else {
                    lock.enable_input();
                }
            }
            Op::ToggleStealth => {
                let on = !lock.is_stealth();
                lock.set_stealth(on);
            }
        }

        // Post-conditions that must always hold:
        let pattern = lock.pattern();
        let distinct: HashSet<_> = pattern.iter().collect();
        assert_eq!(distinct.len(), pattern.len(), "duplicate cell in pattern");
        assert!(pattern.iter().all(|c| lock.grid().contains(c)), "foreign cell");
        assert_eq!(lock.pattern_code().chars().count(), pattern.len());
        if lock.display_mode() != DisplayMode::Animate {
            for cell in lock.grid().cells() {
                assert_eq!(lock.lookup().contains(cell), pattern.contains(cell));
            }
        }
        let scene = lock.scene();
        assert_eq!(scene.dots.len(), lock.grid().cell_count());
    }
});
