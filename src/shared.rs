//! Clock shared between the tick interrupt and the foreground loop.
//!
//! The tick handler advances time and evaluates the alarm, while the
//! foreground loop edits time and alarm settings. Every access goes through a
//! `critical_section` so the tick handler never observes a half-written
//! alarm configuration.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::clock::{Clock, ClockSnapshot, TickOutcome};
use crate::types::{ClockError, ClockTime};

/// A [`Clock`] protected by a critical section.
///
/// Can live in a `static`:
///
/// ```
/// use core::num::NonZeroU16;
/// use alarm_clock::{Clock, SharedClock};
///
/// const TICKS_PER_SECOND: NonZeroU16 = NonZeroU16::new(1000).unwrap();
/// static CLOCK: SharedClock = SharedClock::new(Clock::new(TICKS_PER_SECOND));
///
/// // From the periodic timer interrupt:
/// CLOCK.tick();
/// ```
pub struct SharedClock {
    inner: Mutex<RefCell<Clock>>,
}

impl SharedClock {
    pub const fn new(clock: Clock) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(clock)),
        }
    }

    /// Runs `f` with exclusive access to the clock inside one critical
    /// section. Use it for any multi-field update.
    ///
    /// Must not be called re-entrantly (for example from the alarm callback).
    pub fn with<R>(&self, f: impl FnOnce(&mut Clock) -> R) -> R {
        critical_section::with(|cs| {
            let mut clock = self.inner.borrow_ref_mut(cs);
            f(&mut *clock)
        })
    }

    /// Body of the periodic tick callback.
    pub fn tick(&self) -> TickOutcome {
        self.with(Clock::tick)
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        self.with(|clock| clock.snapshot())
    }

    pub fn set_time(&self, time: ClockTime) -> Result<(), ClockError> {
        self.with(|clock| clock.set_time(time))
    }

    pub fn time(&self) -> Result<ClockTime, ClockError> {
        self.with(|clock| clock.time())
    }

    pub fn set_alarm(&self, time: ClockTime) -> Result<(), ClockError> {
        self.with(|clock| clock.set_alarm(time))
    }

    pub fn alarm(&self) -> Option<ClockTime> {
        self.with(|clock| clock.alarm())
    }

    pub fn enable_alarm(&self, enabled: bool) {
        self.with(|clock| clock.enable_alarm(enabled));
    }

    pub fn postpone_alarm(&self, minutes: u16) {
        self.with(|clock| clock.postpone_alarm(minutes));
    }

    pub fn postpone_alarm_until_tomorrow(&self) {
        self.with(|clock| clock.postpone_alarm_until_tomorrow());
    }

    /// Flips the alarm's enabled flag as one atomic read-modify-write and
    /// returns the new value.
    pub fn toggle_alarm(&self) -> bool {
        self.with(|clock| {
            let enabled = !clock.is_alarm_enabled();
            clock.enable_alarm(enabled);
            enabled
        })
    }
}
