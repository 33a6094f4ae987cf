#![forbid(unsafe_code)]

//! Pending redraw requests.
//!
//! The lock never paints. It records what became stale and the host pulls
//! the accumulated request once per frame with
//! [`PatternLock::take_redraw`](crate::lock::PatternLock::take_redraw).
//! Region requests merge by bounding-box union; a full request absorbs
//! everything.

use lockgrid_core::geometry::Rect;

/// What the host must repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redraw {
    #[default]
    None,
    Region(Rect),
    Full,
}

impl Redraw {
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Merge another request into this one.
    pub fn request(&mut self, other: Redraw) {
        *self = match (*self, other) {
            (Self::Full, _) | (_, Self::Full) => Self::Full,
            (Self::None, r) | (r, Self::None) => r,
            (Self::Region(a), Self::Region(b)) => Self::Region(a.union(&b)),
        };
    }

    /// Request `rect`; an empty rect is ignored.
    pub fn request_region(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.request(Self::Region(rect));
        }
    }

    pub fn request_full(&mut self) {
        *self = Self::Full;
    }

    /// Return the pending request and reset to `None`.
    pub fn take(&mut self) -> Redraw {
        std::mem::take(self)
    }
}
