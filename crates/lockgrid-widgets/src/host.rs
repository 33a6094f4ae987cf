#![forbid(unsafe_code)]

//! Platform collaborators the lock calls out to.
//!
//! The lock does not talk to a vibration motor or an accessibility service
//! itself. Hosts plug those in through [`Haptics`] and
//! [`AccessibilityProbe`]; the no-op implementations are the defaults.

use std::cell::Cell;
use std::rc::Rc;

/// Triggers a short haptic tick.
pub trait Haptics {
    /// Called once per accepted cell while haptics are enabled.
    fn cell_entered(&mut self);
}

/// Answers whether touch exploration is active.
pub trait AccessibilityProbe {
    fn touch_exploration_enabled(&self) -> bool;
}

/// Haptics sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn cell_entered(&mut self) {}
}

/// Probe reporting touch exploration as permanently off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAccessibility;

impl AccessibilityProbe for NoAccessibility {
    fn touch_exploration_enabled(&self) -> bool {
        false
    }
}

/// Fixed answer, for hosts that track the setting themselves.
impl AccessibilityProbe for bool {
    fn touch_exploration_enabled(&self) -> bool {
        *self
    }
}

/// Shared toggle the host can flip while the lock holds a clone.
impl AccessibilityProbe for Rc<Cell<bool>> {
    fn touch_exploration_enabled(&self) -> bool {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_toggle_is_observed() {
        let flag = Rc::new(Cell::new(false));
        let probe = Rc::clone(&flag);
        assert!(!probe.touch_exploration_enabled());
        flag.set(true);
        assert!(probe.touch_exploration_enabled());
    }

    #[test]
    fn defaults_are_inert() {
        assert!(!NoAccessibility.touch_exploration_enabled());
        assert!(true.touch_exploration_enabled());
        NoHaptics.cell_entered();
    }
}
