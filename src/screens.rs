//! Application screens, sequenced by the generic state machine.
//!
//! Each screen is a [`State`]: `entry` switches the shared [`AppModel`]
//! to its mode and arms its timers, `process` animates the model, and a
//! finished screen requests the next one on the machine (the transition
//! lands on the following tick, per the machine's deferred semantics).
//! The render loop in `main` reads the model every frame and composes
//! the matching widget tree; screens never draw themselves.
//!
//! Screen cycle:
//!
//! - [`BootState`]: progress bar filling up, then advances automatically
//! - [`AnnounceState`]: scrolling multi-color announcement, advances
//!   after a dwell time (or on button trigger)
//! - [`StatusState`]: icon, blinking activity lamp and an animated
//!   signal meter; leaves only on button trigger

use std::cell::{Cell, RefCell};
use std::time::Duration;

use display_common::{SimpleTimer, State, StateMachine};

use crate::config::BOOT_STEP;

// =============================================================================
// Shared Application Model
// =============================================================================

/// Which screen is currently on the matrix.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Mode {
    /// Boot progress animation.
    #[default]
    Boot,

    /// Scrolling announcement text.
    Announce,

    /// Status overview with icon, lamp and signal meter.
    Status,
}

/// State shared between the screen states and the render loop.
#[derive(Debug)]
pub struct AppModel {
    /// Active screen, set by each state's `entry`.
    pub mode: Mode,

    /// Boot progress in percent.
    pub boot_progress: u8,

    /// Activity lamp level on the status screen.
    pub activity_lamp: bool,

    /// Animated signal meter percentage on the status screen.
    pub signal_level: u8,

    /// Global display brightness (applied at flush time).
    pub brightness: u8,
}

impl AppModel {
    /// Model at power-on: boot screen, full brightness.
    pub const fn new(brightness: u8) -> Self {
        Self {
            mode: Mode::Boot,
            boot_progress: 0,
            activity_lamp: false,
            signal_level: 0,
            brightness,
        }
    }
}

// =============================================================================
// Boot Screen
// =============================================================================

/// Fills the boot progress bar, then hands over to the next screen.
pub struct BootState<'a> {
    model: &'a RefCell<AppModel>,
    step_period: Duration,
    step_timer: RefCell<SimpleTimer>,
    next: Cell<Option<&'a dyn State<'a>>>,
}

impl<'a> BootState<'a> {
    /// Create the boot screen advancing its progress every `step_period`.
    pub fn new(model: &'a RefCell<AppModel>, step_period: Duration) -> Self {
        Self {
            model,
            step_period,
            step_timer: RefCell::new(SimpleTimer::new()),
            next: Cell::new(None),
        }
    }

    /// Screen to request once booting completes.
    pub fn set_next(&self, next: &'a dyn State<'a>) {
        self.next.set(Some(next));
    }
}

impl<'a> State<'a> for BootState<'a> {
    fn entry(&self, _machine: &mut StateMachine<'a>) {
        let mut model = self.model.borrow_mut();
        model.mode = Mode::Boot;
        model.boot_progress = 0;
        self.step_timer.borrow_mut().start(self.step_period);
    }

    fn process(&self, machine: &mut StateMachine<'a>) {
        let mut timer = self.step_timer.borrow_mut();
        if !timer.is_timeout() {
            return;
        }
        timer.restart();

        let mut model = self.model.borrow_mut();
        model.boot_progress = (model.boot_progress + BOOT_STEP).min(100);
        if model.boot_progress >= 100
            && let Some(next) = self.next.get()
        {
            machine.set_state(next);
        }
    }

    fn exit(&self, _machine: &mut StateMachine<'a>) {
        self.step_timer.borrow_mut().stop();
    }
}

// =============================================================================
// Announcement Screen
// =============================================================================

/// Shows the scrolling announcement for a dwell time.
pub struct AnnounceState<'a> {
    model: &'a RefCell<AppModel>,
    dwell: Duration,
    dwell_timer: RefCell<SimpleTimer>,
    next: Cell<Option<&'a dyn State<'a>>>,
}

impl<'a> AnnounceState<'a> {
    /// Create the announcement screen advancing after `dwell`.
    pub fn new(model: &'a RefCell<AppModel>, dwell: Duration) -> Self {
        Self {
            model,
            dwell,
            dwell_timer: RefCell::new(SimpleTimer::new()),
            next: Cell::new(None),
        }
    }

    /// Screen to request once the dwell time is over.
    pub fn set_next(&self, next: &'a dyn State<'a>) {
        self.next.set(Some(next));
    }
}

impl<'a> State<'a> for AnnounceState<'a> {
    fn entry(&self, _machine: &mut StateMachine<'a>) {
        self.model.borrow_mut().mode = Mode::Announce;
        self.dwell_timer.borrow_mut().start(self.dwell);
    }

    fn process(&self, machine: &mut StateMachine<'a>) {
        if self.dwell_timer.borrow().is_timeout()
            && let Some(next) = self.next.get()
        {
            machine.set_state(next);
        }
    }

    fn exit(&self, _machine: &mut StateMachine<'a>) {
        self.dwell_timer.borrow_mut().stop();
    }
}

// =============================================================================
// Status Screen
// =============================================================================

/// Animates the activity lamp and the signal meter; never leaves on its
/// own (the button cycles back to the announcement).
pub struct StatusState<'a> {
    model: &'a RefCell<AppModel>,
    blink_period: Duration,
    sweep_period: Duration,
    blink_timer: RefCell<SimpleTimer>,
    sweep_timer: RefCell<SimpleTimer>,
}

impl<'a> StatusState<'a> {
    /// Signal meter increment per sweep step, in percent.
    const SWEEP_STEP: u8 = 5;

    /// Create the status screen with its two animation cadences.
    pub fn new(model: &'a RefCell<AppModel>, blink_period: Duration, sweep_period: Duration) -> Self {
        Self {
            model,
            blink_period,
            sweep_period,
            blink_timer: RefCell::new(SimpleTimer::new()),
            sweep_timer: RefCell::new(SimpleTimer::new()),
        }
    }
}

impl<'a> State<'a> for StatusState<'a> {
    fn entry(&self, _machine: &mut StateMachine<'a>) {
        let mut model = self.model.borrow_mut();
        model.mode = Mode::Status;
        model.activity_lamp = true;
        model.signal_level = 0;
        self.blink_timer.borrow_mut().start(self.blink_period);
        self.sweep_timer.borrow_mut().start(self.sweep_period);
    }

    fn process(&self, _machine: &mut StateMachine<'a>) {
        let mut blink = self.blink_timer.borrow_mut();
        if blink.is_timeout() {
            blink.restart();
            let mut model = self.model.borrow_mut();
            model.activity_lamp = !model.activity_lamp;
        }
        drop(blink);

        let mut sweep = self.sweep_timer.borrow_mut();
        if sweep.is_timeout() {
            sweep.restart();
            let mut model = self.model.borrow_mut();
            model.signal_level = if model.signal_level >= 100 {
                0
            } else {
                (model.signal_level + Self::SWEEP_STEP).min(100)
            };
        }
    }

    fn exit(&self, _machine: &mut StateMachine<'a>) {
        self.blink_timer.borrow_mut().stop();
        self.sweep_timer.borrow_mut().stop();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
