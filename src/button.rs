//! Debounced button input decoder.
//!
//! The decoder mirrors the split on real hardware: a periodic task calls
//! [`ButtonDrv::sample`] with the current pin level, while an edge
//! interrupt (here: window key events) calls [`ButtonDrv::notify_change`]
//! from any context to restart the stability window. A level change is
//! accepted only after the pin held still for a full debounce window, so
//! contact bounce collapses into a single resolved transition.
//!
//! # State Machine
//!
//! `Released` -> `Pressed` (stable active level) -> `Triggered` (stable
//! inactive level after a press). Reading `Triggered` through
//! [`ButtonDrv::get_state`] resets it to `Released`; until that read
//! happens, a latched `Triggered` is never overwritten by a new press, so
//! an edge is never dropped.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::DEBOUNCE_WINDOW_CYCLES;

/// Decoded button state, consumed by the application.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ButtonState {
    /// Button is up (or a trigger was consumed).
    #[default]
    Released,

    /// Button is held down.
    Pressed,

    /// A full press-and-release cycle completed and has not been read yet.
    Triggered,
}

/// Debouncing button driver.
pub struct ButtonDrv {
    /// Decoded state, shared between the sampling task and readers.
    state: Mutex<ButtonState>,

    /// Set by the edge notification; cleared by the next sample.
    pin_changed: AtomicBool,

    /// Samples seen without an edge notification.
    stable_cycles: u32,
}

impl ButtonDrv {
    /// Create a driver reporting `Released`.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(ButtonState::Released),
            pin_changed: AtomicBool::new(false),
            stable_cycles: 0,
        }
    }

    /// Signal an asynchronous pin level change.
    ///
    /// Restarts the stability window at the next sample. Callable from
    /// any context.
    pub fn notify_change(&self) {
        self.pin_changed.store(true, Ordering::Release);
    }

    /// Feed one pin sample from the periodic sampling task.
    ///
    /// `active` is the logical button level (true = pressed). The decoded
    /// state only changes after [`DEBOUNCE_WINDOW_CYCLES`] samples passed
    /// without an edge notification.
    pub fn sample(&mut self, active: bool) {
        if self.pin_changed.swap(false, Ordering::AcqRel) {
            // Pin is bouncing: restart the stability window.
            self.stable_cycles = 0;
        } else if self.stable_cycles >= DEBOUNCE_WINDOW_CYCLES {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

            // A latched trigger stays latched until a reader consumes it.
            if *state != ButtonState::Triggered {
                if *state == ButtonState::Released && active {
                    *state = ButtonState::Pressed;
                } else if *state == ButtonState::Pressed && !active {
                    *state = ButtonState::Triggered;
                }
            }

            self.stable_cycles = 0;
        } else {
            self.stable_cycles += 1;
        }
    }

    /// Read the decoded state.
    ///
    /// Reading `Triggered` consumes it: the stored state resets to
    /// `Released`. Blocks only for the mutex, bounded by the sampling
    /// task's cycle time.
    pub fn get_state(&self) -> ButtonState {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let current = *state;

        if current == ButtonState::Triggered {
            *state = ButtonState::Released;
        }

        current
    }
}

impl Default for ButtonDrv {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Samples needed for one state evaluation: the window plus the
    /// evaluating sample itself.
    const SETTLE: u32 = DEBOUNCE_WINDOW_CYCLES + 1;

    fn settle(button: &mut ButtonDrv, active: bool) {
        for _ in 0..SETTLE {
            button.sample(active);
        }
    }

    #[test]
    fn test_initial_state_is_released() {
        let button = ButtonDrv::new();
        assert_eq!(button.get_state(), ButtonState::Released);
    }

    #[test]
    fn test_stable_press_is_detected() {
        let mut button = ButtonDrv::new();
        settle(&mut button, true);
        assert_eq!(button.get_state(), ButtonState::Pressed);
    }

    #[test]
    fn test_short_sample_run_is_not_enough() {
        let mut button = ButtonDrv::new();
        for _ in 0..DEBOUNCE_WINDOW_CYCLES {
            button.sample(true);
        }
        assert_eq!(
            button.get_state(),
            ButtonState::Released,
            "Press must not register before the window elapsed"
        );
    }

    #[test]
    fn test_release_after_press_triggers() {
        let mut button = ButtonDrv::new();
        settle(&mut button, true);
        settle(&mut button, false);
        assert_eq!(button.get_state(), ButtonState::Triggered);
    }

    #[test]
    fn test_reading_triggered_resets_to_released() {
        let mut button = ButtonDrv::new();
        settle(&mut button, true);
        settle(&mut button, false);

        assert_eq!(button.get_state(), ButtonState::Triggered);
        assert_eq!(button.get_state(), ButtonState::Released, "Trigger is read-and-reset");
    }

    #[test]
    fn test_unread_trigger_is_never_overwritten() {
        let mut button = ButtonDrv::new();
        settle(&mut button, true);
        settle(&mut button, false);

        // A second full press cycle happens before anyone read the
        // trigger: the latched edge must survive.
        settle(&mut button, true);
        settle(&mut button, false);
        assert_eq!(button.get_state(), ButtonState::Triggered);
        assert_eq!(button.get_state(), ButtonState::Released);
    }

    #[test]
    fn test_edge_notification_restarts_window() {
        let mut button = ButtonDrv::new();

        // Keep notifying while sampling: the level never counts as stable.
        for _ in 0..SETTLE * 3 {
            button.notify_change();
            button.sample(true);
        }
        assert_eq!(
            button.get_state(),
            ButtonState::Released,
            "Bouncing pin must not register a press"
        );

        // Once the bouncing stops the press resolves normally.
        settle(&mut button, true);
        assert_eq!(button.get_state(), ButtonState::Pressed);
    }

    #[test]
    fn test_bounce_coalesces_into_single_trigger() {
        let mut button = ButtonDrv::new();

        // Bouncy press followed by a stable press and a stable release:
        // exactly one trigger comes out.
        for active in [true, false, true, false, true] {
            button.notify_change();
            button.sample(active);
        }
        settle(&mut button, true);
        settle(&mut button, false);

        assert_eq!(button.get_state(), ButtonState::Triggered);
        assert_eq!(button.get_state(), ButtonState::Released);
    }
}
