#![forbid(unsafe_code)]

//! Lifecycle notifications delivered to the host.
//!
//! [`PatternHandlers`] is an explicit set of four optional callbacks. Only
//! the registered ones run; an unregistered notification is a no-op.
//!
//! ```
//! use lockgrid_widgets::listener::PatternHandlers;
//!
//! let handlers = PatternHandlers::new()
//!     .on_detected(|pattern, code| println!("{} cells: {code}", pattern.len()))
//!     .on_cleared(|| println!("cleared"));
//! assert!(handlers.has_detected());
//! ```

use std::fmt;

use crate::pattern::Pattern;

type Notify = Box<dyn FnMut()>;
type NotifyPattern = Box<dyn FnMut(&Pattern, &str)>;

/// Callbacks for the pattern lifecycle.
#[derive(Default)]
pub struct PatternHandlers {
    start: Option<Notify>,
    cleared: Option<Notify>,
    cell_added: Option<NotifyPattern>,
    detected: Option<NotifyPattern>,
}

impl PatternHandlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A gesture began on a cell.
    #[must_use]
    pub fn on_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.start = Some(Box::new(f));
        self
    }

    /// The pattern was discarded.
    #[must_use]
    pub fn on_cleared(mut self, f: impl FnMut() + 'static) -> Self {
        self.cleared = Some(Box::new(f));
        self
    }

    /// A cell joined the in-progress pattern.
    #[must_use]
    pub fn on_cell_added(mut self, f: impl FnMut(&Pattern, &str) + 'static) -> Self {
        self.cell_added = Some(Box::new(f));
        self
    }

    /// The gesture finished with a non-empty pattern.
    #[must_use]
    pub fn on_detected(mut self, f: impl FnMut(&Pattern, &str) + 'static) -> Self {
        self.detected = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn has_detected(&self) -> bool {
        self.detected.is_some()
    }

    pub(crate) fn notify_start(&mut self) {
        if let Some(f) = &mut self.start {
            f();
        }
    }

    pub(crate) fn notify_cleared(&mut self) {
        if let Some(f) = &mut self.cleared {
            f();
        }
    }

    pub(crate) fn notify_cell_added(&mut self, pattern: &Pattern, code: &str) {
        if let Some(f) = &mut self.cell_added {
            f(pattern, code);
        }
    }

    pub(crate) fn notify_detected(&mut self, pattern: &Pattern, code: &str) {
        if let Some(f) = &mut self.detected {
            f(pattern, code);
        }
    }
}

impl fmt::Debug for PatternHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternHandlers")
            .field("start", &self.start.is_some())
            .field("cleared", &self.cleared.is_some())
            .field("cell_added", &self.cell_added.is_some())
            .field("detected", &self.detected.is_some())
            .finish()
    }
}
