//! Button and output abstractions.
//!
//! The board layer implements [`DigitalInput`] / [`DigitalOutput`] for its
//! pins (or wraps raw level readers in [`EdgeInput`]) and groups the six clock
//! buttons behind a [`Keypad`].

/// A debounced digital input.
pub trait DigitalInput {
    /// Returns true while the input is active (already inverted for
    /// active-low wiring).
    fn is_active(&mut self) -> bool;

    /// Returns true exactly once per activation edge.
    ///
    /// Implementations keep their own edge memory, so polling repeatedly is
    /// safe.
    fn was_activated(&mut self) -> bool;
}

/// A digital output such as a buzzer or indicator LED.
///
/// Handle any hardware errors internally; these methods cannot fail.
pub trait DigitalOutput {
    fn activate(&mut self);
    fn deactivate(&mut self);
    fn toggle(&mut self);
}

/// The six clock buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Hold to edit the current time.
    SetTime,
    /// Hold to edit the alarm time.
    SetAlarm,
    Increment,
    Decrement,
    Accept,
    Cancel,
}

impl Key {
    /// All keys, in the order used to index a `[I; 6]` keypad.
    pub const ALL: [Key; 6] = [
        Key::SetTime,
        Key::SetAlarm,
        Key::Increment,
        Key::Decrement,
        Key::Accept,
        Key::Cancel,
    ];

    /// Position of the key within [`Key::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Key::SetTime => 0,
            Key::SetAlarm => 1,
            Key::Increment => 2,
            Key::Decrement => 3,
            Key::Accept => 4,
            Key::Cancel => 5,
        }
    }
}

/// Access to the clock buttons by [`Key`].
pub trait Keypad {
    fn is_active(&mut self, key: Key) -> bool;
    fn was_activated(&mut self, key: Key) -> bool;
}

/// Six inputs of one type, indexed in [`Key::ALL`] order.
impl<I: DigitalInput> Keypad for [I; 6] {
    fn is_active(&mut self, key: Key) -> bool {
        self[key.index()].is_active()
    }

    fn was_activated(&mut self, key: Key) -> bool {
        self[key.index()].was_activated()
    }
}

/// Level change seen by [`EdgeInput::was_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Activated,
    Deactivated,
    Unchanged,
}

/// Adds polarity handling and edge memory to a raw level reader.
///
/// `read` returns the electrical level (`true` = high). With `inverted` set
/// the input is active while the level is low.
pub struct EdgeInput<F: FnMut() -> bool> {
    read: F,
    inverted: bool,
    last_state: bool,
}

impl<F: FnMut() -> bool> EdgeInput<F> {
    pub fn new(read: F, inverted: bool) -> Self {
        Self {
            read,
            inverted,
            last_state: false,
        }
    }

    fn level(&mut self) -> bool {
        (self.read)() != self.inverted
    }

    /// Reports whether the input changed since the previous edge query.
    pub fn was_changed(&mut self) -> Edge {
        let state = self.level();
        let edge = match (self.last_state, state) {
            (false, true) => Edge::Activated,
            (true, false) => Edge::Deactivated,
            _ => Edge::Unchanged,
        };
        self.last_state = state;
        edge
    }

    /// Returns true exactly once per release edge.
    pub fn was_deactivated(&mut self) -> bool {
        self.was_changed() == Edge::Deactivated
    }
}

impl<F: FnMut() -> bool> DigitalInput for EdgeInput<F> {
    fn is_active(&mut self) -> bool {
        self.level()
    }

    fn was_activated(&mut self) -> bool {
        self.was_changed() == Edge::Activated
    }
}
