//! Generic state machine with deferred transitions.
//!
//! Any behavior that can be expressed as an entry/process/exit contract
//! plugs into [`StateMachine`]: the machine holds non-owning references
//! to externally owned states and sequences their callbacks. Transition
//! requests posted with [`StateMachine::set_state`], including requests
//! made from inside a state's own `process` callback, are serviced at
//! the start of the *next* [`StateMachine::process`] call, never
//! synchronously. Callers therefore observe exactly one active state per
//! processing tick.
//!
//! States receive `&self` so one state object can appear in cyclic
//! graphs (A requests B, B requests A back) while the machine keeps a
//! shared reference to the active one; state-local data lives behind
//! `Cell`/`RefCell`. The `'a` lifetime enforces the ownership contract:
//! states must outlive the machine that references them.

/// Capability contract for a state usable by [`StateMachine`].
///
/// `entry` runs once when the state becomes active, `process` runs on
/// every machine tick while active, `exit` runs once when the machine
/// leaves the state. The owning machine is passed per call, so a state
/// object is reusable across machines.
pub trait State<'a> {
    /// Called once when the machine enters this state.
    fn entry(&self, _machine: &mut StateMachine<'a>) {}

    /// Called on every `process` tick while this state is active.
    fn process(&self, machine: &mut StateMachine<'a>);

    /// Called once when the machine leaves this state.
    fn exit(&self, _machine: &mut StateMachine<'a>) {}
}

/// Drives a graph of [`State`] objects with deferred transitions.
///
/// The machine never owns states. With neither a current nor a requested
/// state, [`StateMachine::process`] is a no-op.
#[derive(Default)]
pub struct StateMachine<'a> {
    current: Option<&'a dyn State<'a>>,
    requested: Option<&'a dyn State<'a>>,
}

impl<'a> StateMachine<'a> {
    /// Create a machine with no current and no requested state.
    pub const fn new() -> Self {
        Self {
            current: None,
            requested: None,
        }
    }

    /// Request a transition to `state`.
    ///
    /// Only records the request: no entry/exit callback runs and the
    /// current state is unchanged until the next [`StateMachine::process`]
    /// call. A second request before that call overwrites the first:
    /// the most recent caller wins.
    pub fn set_state(&mut self, state: &'a dyn State<'a>) {
        self.requested = Some(state);
    }

    /// Service a pending transition, then run the active state.
    ///
    /// A pending request triggers `exit` on the current state (if any)
    /// and `entry` on the requested one before it becomes current.
    /// Afterwards the current state's `process` runs unconditionally.
    pub fn process(&mut self) {
        if let Some(next) = self.requested.take() {
            if let Some(current) = self.current {
                current.exit(self);
            }
            next.entry(self);
            self.current = Some(next);
        }

        if let Some(current) = self.current {
            current.process(self);
        }
    }

    /// Currently active state, or `None` while no request has been
    /// serviced yet.
    pub fn state(&self) -> Option<&'a dyn State<'a>> {
        self.current
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
