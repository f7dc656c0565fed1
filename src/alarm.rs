//! Alarm scheduling: daily match, snooze and cancel-until-tomorrow.
//!
//! [`AlarmState`] is owned by the [`Clock`](crate::Clock) and evaluated once
//! for every second the clock advances. Trigger precedence per second:
//!
//! 1. A pending postpone whose time matches rings and consumes the postpone.
//! 2. Otherwise an enabled alarm that has not sounded today rings when the
//!    current time equals the alarm time.
//!
//! `sounded_today` is cleared only by the midnight rollover, so the daily
//! match fires at most once per day.

use crate::types::ClockTime;

/// Handler invoked when the alarm starts ringing.
///
/// Runs synchronously on the tick path, which is usually a timer interrupt,
/// inside the clock's critical section. Keep it short and non-blocking, and do
/// not access the [`SharedClock`](crate::SharedClock) from it.
pub type AlarmCallback = fn();

/// Which rule made the alarm ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmTrigger {
    /// The configured alarm time matched.
    Scheduled,
    /// A postponed (snoozed) occurrence matched.
    Postponed,
}

/// Alarm configuration and trigger flags.
///
/// Invariant: `ringing` implies `enabled`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlarmState {
    time: ClockTime,
    configured: bool,
    enabled: bool,
    postponed: bool,
    postponed_until: ClockTime,
    sounded_today: bool,
    ringing: bool,
    callback: Option<AlarmCallback>,
}

impl AlarmState {
    /// Creates an unconfigured, disabled alarm.
    pub const fn new() -> Self {
        Self {
            time: ClockTime::MIDNIGHT,
            configured: false,
            enabled: false,
            postponed: false,
            postponed_until: ClockTime::MIDNIGHT,
            sounded_today: false,
            ringing: false,
            callback: None,
        }
    }

    /// Stores the alarm time (seconds forced to `00`) and arms it.
    ///
    /// Clears any ringing, snooze or "already sounded" state.
    pub fn set(&mut self, time: ClockTime) {
        self.time = time.without_seconds();
        self.configured = true;
        self.enabled = true;
        self.postponed = false;
        self.sounded_today = false;
        self.ringing = false;
    }

    /// Returns the alarm time, or `None` if no alarm was ever configured.
    pub fn time(&self) -> Option<ClockTime> {
        self.configured.then_some(self.time)
    }

    /// Enables or disables the alarm. Disabling also drops any pending
    /// postpone and stops ringing. Enabling an unconfigured alarm is ignored.
    pub fn enable(&mut self, enabled: bool) {
        if enabled && !self.configured {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.postponed = false;
            self.sounded_today = false;
            self.ringing = false;
        }
    }

    /// Postpones the alarm by `minutes` counted from `now`, or from the
    /// current postpone target if one is already pending.
    ///
    /// `minutes == 0` is a no-op.
    pub fn postpone(&mut self, now: ClockTime, minutes: u16) {
        if minutes == 0 {
            return;
        }
        let base = if self.postponed {
            self.postponed_until
        } else {
            now
        };
        self.postponed_until = base.add_minutes(minutes);
        self.postponed = true;
        self.sounded_today = false;
        self.ringing = false;
    }

    /// Silences today's occurrence; the alarm rings again tomorrow at its
    /// configured time. No-op until an alarm is configured.
    pub fn postpone_until_tomorrow(&mut self) {
        if !self.configured {
            return;
        }
        self.postponed_until = self.time;
        self.postponed = true;
        self.enabled = true;
        // Blocks the postpone match until the midnight rollover.
        self.sounded_today = true;
        self.ringing = false;
    }

    /// Installs the ring handler, replacing any previous one.
    pub fn attach_callback(&mut self, callback: AlarmCallback) {
        self.callback = Some(callback);
    }

    /// Removes the ring handler.
    pub fn detach_callback(&mut self) {
        self.callback = None;
    }

    /// Midnight rollover.
    pub(crate) fn new_day(&mut self) {
        self.sounded_today = false;
    }

    /// Evaluates the trigger rules for the second that just started.
    pub(crate) fn evaluate(&mut self, now: &ClockTime) -> Option<AlarmTrigger> {
        if self.postponed && !self.sounded_today && *now == self.postponed_until {
            self.postponed = false;
            self.sounded_today = true;
            if self.enabled {
                self.ring();
                return Some(AlarmTrigger::Postponed);
            }
            return None;
        }

        if self.enabled && self.configured && !self.sounded_today && *now == self.time {
            self.sounded_today = true;
            self.ring();
            return Some(AlarmTrigger::Scheduled);
        }

        None
    }

    fn ring(&mut self) {
        self.ringing = true;
        if let Some(callback) = self.callback {
            callback();
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_postponed(&self) -> bool {
        self.postponed
    }

    /// The pending postpone target, if any.
    pub fn postponed_until(&self) -> Option<ClockTime> {
        self.postponed.then_some(self.postponed_until)
    }

    pub fn sounded_today(&self) -> bool {
        self.sounded_today
    }

    pub fn is_ringing(&self) -> bool {
        self.ringing
    }
}
