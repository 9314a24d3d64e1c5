//! Generic transition engine.
//!
//! A machine is a closed set of states `S`, a closed set of events `E`, and
//! a [`TransitionTable`] mapping `(state tag, event tag)` to a transition
//! function `F`. [`Fsm`] holds the current state and drives one event at a
//! time through the table:
//!
//! 1. look up the route for the current state and the event;
//! 2. no route: the event is refused;
//! 3. route found: fire it; a [`GuardFailed`] result refuses the event;
//! 4. otherwise commit the returned state.
//!
//! The engine never mutates anything besides its own state. Firing is
//! delegated to a closure, and the caller decides what context the
//! transition function receives.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::TransitionError;

/// A copyable, hashable discriminant with a stable human-readable name.
pub trait Tag: Copy + Eq + Hash + fmt::Debug {
    /// Name used in errors and logs.
    fn name(self) -> &'static str;
}

/// A value that belongs to a closed set identified by [`Tag`]s.
pub trait Tagged {
    type Tag: Tag;

    /// The discriminant of this value.
    fn tag(&self) -> Self::Tag;
}

/// Returned by a transition function whose guard rejected the move.
///
/// Holds the name of the failed guard. A failed guard is a result, never a
/// state: the machine stays where it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardFailed(pub &'static str);

/// Explicit lookup from `(state tag, event tag)` to a transition function.
///
/// Pairs that were never registered have no route; [`Fsm::process`] turns
/// that into a [`TransitionError`].
pub struct TransitionTable<S: Tagged, E: Tagged, F> {
    routes: FxHashMap<(S::Tag, E::Tag), F>,
}

impl<S: Tagged, E: Tagged, F: Copy> TransitionTable<S, E, F> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            routes: FxHashMap::default(),
        }
    }

    /// Register `transition` for `event` arriving in state `from`.
    ///
    /// # Panics
    ///
    /// Panics if the pair already has a route. A table is built once from
    /// a fixed list, so a duplicate is a bug in that list.
    pub fn on(mut self, from: S::Tag, event: E::Tag, transition: F) -> Self {
        let previous = self.routes.insert((from, event), transition);
        assert!(
            previous.is_none(),
            "duplicate route: {} in state {}",
            event.name(),
            from.name()
        );
        self
    }

    /// Register the same transition for `event` from each of `from`.
    pub fn on_each(self, from: &[S::Tag], event: E::Tag, transition: F) -> Self {
        from.iter()
            .fold(self, |table, &state| table.on(state, event, transition))
    }

    /// The transition registered for `event` in state `from`, if any.
    #[inline]
    pub fn route(&self, from: S::Tag, event: E::Tag) -> Option<F> {
        self.routes.get(&(from, event)).copied()
    }

    /// Returns true if no event has a route out of `from`.
    pub fn is_terminal(&self, from: S::Tag) -> bool {
        !self.routes.keys().any(|&(state, _)| state == from)
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<S: Tagged, E: Tagged, F: Copy> Default for TransitionTable<S, E, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Tagged, E: Tagged, F> fmt::Debug for TransitionTable<S, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("routes", &self.routes.len())
            .finish()
    }
}

/// Holder of exactly one current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fsm<S> {
    state: S,
}

impl<S: Tagged + Clone> Fsm<S> {
    /// Start the machine in `initial`.
    pub fn new(initial: S) -> Self {
        Self { state: initial }
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Dispatch `event` through `table`.
    ///
    /// `fire` receives the routed transition function and the event, and
    /// must invoke the former with whatever context it needs. On success
    /// the returned state is committed and a copy handed back. On any
    /// failure the current state is left untouched.
    pub fn process<E, F>(
        &mut self,
        table: &TransitionTable<S, E, F>,
        event: &E,
        fire: impl FnOnce(F, &E) -> Result<S, GuardFailed>,
    ) -> Result<S, TransitionError>
    where
        E: Tagged,
        F: Copy,
    {
        let from = self.state.tag();
        let on = event.tag();

        let Some(transition) = table.route(from, on) else {
            log::debug!("no transition for {} in state {}", on.name(), from.name());
            return Err(TransitionError::no_route(from.name(), on.name()));
        };

        match fire(transition, event) {
            Ok(next) => {
                log::debug!(
                    "{} --{}--> {}",
                    from.name(),
                    on.name(),
                    next.tag().name()
                );
                self.state = next;
                Ok(self.state.clone())
            }
            Err(GuardFailed(guard)) => {
                log::debug!(
                    "guard {} refused {} in state {}",
                    guard,
                    on.name(),
                    from.name()
                );
                Err(TransitionError::guarded(from.name(), on.name(), guard))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A two-state toggle with a guarded switch-off.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Light {
        Off,
        On,
    }

    impl Tag for Light {
        fn name(self) -> &'static str {
            match self {
                Light::Off => "Off",
                Light::On => "On",
            }
        }
    }

    impl Tagged for Light {
        type Tag = Light;
        fn tag(&self) -> Light {
            *self
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Press {
        Push,
        Hold,
    }

    impl Tag for Press {
        fn name(self) -> &'static str {
            match self {
                Press::Push => "Push",
                Press::Hold => "Hold",
            }
        }
    }

    impl Tagged for Press {
        type Tag = Press;
        fn tag(&self) -> Press {
            *self
        }
    }

    struct Switch {
        locked: bool,
        flips: u32,
    }

    type Flip = fn(&mut Switch, &Press) -> Result<Light, GuardFailed>;

    fn turn_on(switch: &mut Switch, _: &Press) -> Result<Light, GuardFailed> {
        switch.flips += 1;
        Ok(Light::On)
    }

    fn turn_off(switch: &mut Switch, _: &Press) -> Result<Light, GuardFailed> {
        if switch.locked {
            return Err(GuardFailed("unlocked"));
        }
        switch.flips += 1;
        Ok(Light::Off)
    }

    fn table() -> TransitionTable<Light, Press, Flip> {
        TransitionTable::<Light, Press, Flip>::new()
            .on(Light::Off, Press::Push, turn_on)
            .on(Light::On, Press::Push, turn_off)
    }

    #[test]
    fn commits_routed_transition() {
        let table = table();
        let mut fsm = Fsm::new(Light::Off);
        let mut switch = Switch {
            locked: false,
            flips: 0,
        };

        let next = fsm.process(&table, &Press::Push, |f, e| f(&mut switch, e));

        assert_eq!(next, Ok(Light::On));
        assert_eq!(*fsm.state(), Light::On);
        assert_eq!(switch.flips, 1);
    }

    #[test]
    fn missing_route_is_refused() {
        let table = table();
        let mut fsm = Fsm::new(Light::Off);
        let mut switch = Switch {
            locked: false,
            flips: 0,
        };

        let err = fsm
            .process(&table, &Press::Hold, |f, e| f(&mut switch, e))
            .unwrap_err();

        assert_eq!(err, TransitionError::no_route("Off", "Hold"));
        assert_eq!(*fsm.state(), Light::Off);
        assert_eq!(switch.flips, 0);
    }

    #[test]
    fn failed_guard_keeps_state() {
        let table = table();
        let mut fsm = Fsm::new(Light::On);
        let mut switch = Switch {
            locked: true,
            flips: 0,
        };

        let err = fsm
            .process(&table, &Press::Push, |f, e| f(&mut switch, e))
            .unwrap_err();

        assert_eq!(err, TransitionError::guarded("On", "Push", "unlocked"));
        assert_eq!(*fsm.state(), Light::On);
        assert_eq!(switch.flips, 0);
    }

    #[test]
    fn terminal_detection() {
        let table =
            TransitionTable::<Light, Press, Flip>::new().on(Light::Off, Press::Push, turn_on);
        assert!(!table.is_terminal(Light::Off));
        assert!(table.is_terminal(Light::On));
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn on_each_registers_every_source() {
        let table = TransitionTable::<Light, Press, Flip>::new().on_each(
            &[Light::Off, Light::On],
            Press::Hold,
            turn_off,
        );
        assert!(table.route(Light::Off, Press::Hold).is_some());
        assert!(table.route(Light::On, Press::Hold).is_some());
        assert!(table.route(Light::On, Press::Push).is_none());
    }

    // Records every log line from this module.
    struct Capture(std::sync::Mutex<Vec<(log::Level, String)>>);

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            if record.target() == module_path!().trim_end_matches("::tests") {
                if let Ok(mut lines) = self.0.lock() {
                    lines.push((record.level(), record.args().to_string()));
                }
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(std::sync::Mutex::new(Vec::new()));

    #[test]
    fn refusals_log_at_debug() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);

        let table = table();
        let mut switch = Switch {
            locked: true,
            flips: 0,
        };
        let mut off = Fsm::new(Light::Off);
        let mut on = Fsm::new(Light::On);
        assert!(off.process(&table, &Press::Hold, |f, e| f(&mut switch, e)).is_err());
        assert!(on.process(&table, &Press::Push, |f, e| f(&mut switch, e)).is_err());

        let lines = CAPTURE.0.lock().unwrap();
        assert!(lines.iter().any(|(_, l)| l == "no transition for Hold in state Off"));
        assert!(lines.iter().any(|(_, l)| l == "guard unlocked refused Push in state On"));
        assert!(lines.iter().all(|(level, _)| *level == log::Level::Debug), "{lines:?}");
    }

    #[test]
    #[should_panic(expected = "duplicate route: Push in state Off")]
    fn duplicate_route_panics() {
        let _ = TransitionTable::<Light, Press, Flip>::new()
            .on(Light::Off, Press::Push, turn_on)
            .on(Light::Off, Press::Push, turn_on);
    }
}
