#![forbid(unsafe_code)]

//! Canonical pointer and hover events.
//!
//! Only a single pointer is modeled. A [`PointerEvent`] carries the current
//! sample plus any historical samples the platform coalesced into it; the
//! lock must hit-test each of them in chronological order, so
//! [`PointerEvent::samples`] yields history first and the current position
//! last.
//!
//! Hover events exist for touch exploration: when the platform's
//! accessibility layer intercepts touches it reports them as hover
//! enter/move/exit, which [`HoverEvent::as_pointer`] maps back onto
//! down/move/up.

use crate::geometry::Point;

/// Canonical input event delivered to the lock.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A touch or pointer event.
    Pointer(PointerEvent),
    /// A hover event (only meaningful while touch exploration is active).
    Hover(HoverEvent),
}

/// The phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// The pointer touched down.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer was lifted.
    Up,
    /// The platform aborted the gesture.
    Cancel,
}

/// A pointer event with optional coalesced history.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Gesture phase.
    pub kind: PointerKind,
    /// Current position.
    pub position: Point,
    /// Older positions batched into this event, oldest first.
    pub history: Vec<Point>,
}

impl PointerEvent {
    /// Create an event without history.
    #[must_use]
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    #[must_use]
    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    #[must_use]
    pub fn cancel() -> Self {
        Self::new(PointerKind::Cancel, 0.0, 0.0)
    }

    /// Attach coalesced history samples (builder pattern).
    #[must_use]
    pub fn with_history(mut self, history: impl IntoIterator<Item = Point>) -> Self {
        self.history = history.into_iter().collect();
        self
    }

    /// Every sample in chronological order: history, then the current position.
    pub fn samples(&self) -> impl Iterator<Item = Point> + '_ {
        self.history
            .iter()
            .copied()
            .chain(std::iter::once(self.position))
    }

    /// Number of samples including the current one.
    #[inline]
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.history.len() + 1
    }
}

/// The phase of a hover gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverKind {
    Enter,
    Move,
    Exit,
}

/// A hover event reported by the accessibility layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverEvent {
    pub kind: HoverKind,
    pub position: Point,
    pub history: Vec<Point>,
}

impl HoverEvent {
    #[must_use]
    pub fn new(kind: HoverKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            history: Vec::new(),
        }
    }

    /// Remap onto the pointer phase touch exploration stands in for.
    #[must_use]
    pub fn as_pointer(&self) -> PointerEvent {
        let kind = match self.kind {
            HoverKind::Enter => PointerKind::Down,
            HoverKind::Move => PointerKind::Move,
            HoverKind::Exit => PointerKind::Up,
        };
        PointerEvent {
            kind,
            position: self.position,
            history: self.history.clone(),
        }
    }
}

/// Whether the lock consumed an event.
///
/// `Ignored` tells the platform another handler may claim it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Handled,
    Ignored,
}

impl EventResult {
    #[inline]
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}
