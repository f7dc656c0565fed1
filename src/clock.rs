//! Tick-driven time keeper.
//!
//! Provides [`Clock`], which counts sub-second ticks from a periodic source,
//! advances a BCD [`ClockTime`] once per second and feeds the owned
//! [`AlarmState`] after every advance.

use core::num::NonZeroU16;

use crate::alarm::{AlarmCallback, AlarmState, AlarmTrigger};
use crate::types::{ClockError, ClockTime};

/// Result of a single [`Clock::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// The time is not valid; the tick was ignored.
    Invalid,
    /// The tick was counted but no second has completed yet.
    Pending,
    /// One second elapsed.
    SecondElapsed,
    /// One second elapsed and the alarm started ringing.
    AlarmTriggered(AlarmTrigger),
}

/// Consistent copy of the clock state for the foreground loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSnapshot {
    /// Current time digits. Only meaningful when `valid` is true.
    pub time: ClockTime,
    /// Whether `time` is a valid, user-set time.
    pub valid: bool,
    /// Configured alarm time, if any.
    pub alarm: Option<ClockTime>,
    pub alarm_enabled: bool,
    pub alarm_ringing: bool,
}

/// Time-of-day keeper with an attached alarm.
///
/// Starts at `00:00:00` marked invalid. Ticks are ignored until a valid time
/// is set with [`set_time`](Self::set_time).
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    ticks: u16,
    ticks_per_second: NonZeroU16,
    time: ClockTime,
    valid: bool,
    alarm: AlarmState,
}

impl Clock {
    /// Creates a clock advanced by `ticks_per_second` calls to [`tick`](Self::tick).
    pub const fn new(ticks_per_second: NonZeroU16) -> Self {
        Self {
            ticks: 0,
            ticks_per_second,
            time: ClockTime::MIDNIGHT,
            valid: false,
            alarm: AlarmState::new(),
        }
    }

    /// Fallible variant of [`new`](Self::new) for run-time tick rates.
    ///
    /// # Errors
    /// `InvalidTickRate` if `ticks_per_second` is zero.
    pub fn try_new(ticks_per_second: u16) -> Result<Self, ClockError> {
        NonZeroU16::new(ticks_per_second)
            .map(Self::new)
            .ok_or(ClockError::InvalidTickRate)
    }

    /// Sets the current time and restarts the sub-second counter.
    ///
    /// On failure the previous digits are kept but the clock is marked
    /// invalid; callers must treat the time as unknown.
    ///
    /// # Errors
    /// `InvalidTime` if `time` is not a valid time of day.
    pub fn set_time(&mut self, time: ClockTime) -> Result<(), ClockError> {
        if !time.is_valid() {
            self.valid = false;
            warn!("rejected time {:?}", time);
            return Err(ClockError::InvalidTime);
        }

        self.time = time;
        self.ticks = 0;
        self.valid = true;
        info!("time set to {:?}", time);
        Ok(())
    }

    /// Returns the current time.
    ///
    /// # Errors
    /// `TimeNotSet` while the time is invalid.
    pub fn time(&self) -> Result<ClockTime, ClockError> {
        if self.valid {
            Ok(self.time)
        } else {
            Err(ClockError::TimeNotSet)
        }
    }

    /// Returns the current digits whether or not they are valid, so a caller
    /// can render a placeholder deterministically.
    pub fn raw_time(&self) -> ClockTime {
        self.time
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn ticks_per_second(&self) -> u16 {
        self.ticks_per_second.get()
    }

    /// Counts one tick from the periodic source.
    ///
    /// Every `ticks_per_second` ticks the time advances by one second and the
    /// alarm is evaluated. Ignored while the time is invalid.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.valid {
            return TickOutcome::Invalid;
        }

        self.ticks += 1;
        if self.ticks < self.ticks_per_second.get() {
            return TickOutcome::Pending;
        }
        self.ticks = 0;

        let midnight = self.time.advance_second();
        self.valid = self.time.is_valid();
        if !self.valid {
            return TickOutcome::Invalid;
        }

        if midnight {
            self.alarm.new_day();
            debug!("midnight rollover");
        }

        match self.alarm.evaluate(&self.time) {
            Some(trigger) => {
                info!("alarm ringing at {:?} ({:?})", self.time, trigger);
                TickOutcome::AlarmTriggered(trigger)
            }
            None => TickOutcome::SecondElapsed,
        }
    }

    /// Stores the alarm time (seconds forced to `00`) and enables it.
    ///
    /// # Errors
    /// `InvalidTime` if `time` is not a valid time of day.
    pub fn set_alarm(&mut self, time: ClockTime) -> Result<(), ClockError> {
        if !time.is_valid() {
            warn!("rejected alarm {:?}", time);
            return Err(ClockError::InvalidTime);
        }
        self.alarm.set(time);
        info!("alarm set to {:?}", self.alarm.time());
        Ok(())
    }

    /// Returns the alarm time, or `None` if none was ever configured.
    pub fn alarm(&self) -> Option<ClockTime> {
        self.alarm.time()
    }

    /// Enables or disables the alarm. Disabling fully resets the trigger state.
    pub fn enable_alarm(&mut self, enabled: bool) {
        self.alarm.enable(enabled);
        debug!("alarm enabled: {}", enabled);
    }

    /// Snoozes the alarm by `minutes`. No-op if the time is invalid or
    /// `minutes` is zero.
    pub fn postpone_alarm(&mut self, minutes: u16) {
        if !self.valid || minutes == 0 {
            return;
        }
        self.alarm.postpone(self.time, minutes);
        debug!("alarm postponed until {:?}", self.alarm.postponed_until());
    }

    /// Cancels today's occurrence; the alarm rings again tomorrow.
    pub fn postpone_alarm_until_tomorrow(&mut self) {
        self.alarm.postpone_until_tomorrow();
        debug!("alarm postponed until tomorrow");
    }

    /// Installs the handler run when the alarm starts ringing.
    ///
    /// See [`AlarmCallback`] for the execution context.
    pub fn attach_alarm_callback(&mut self, callback: AlarmCallback) {
        self.alarm.attach_callback(callback);
    }

    pub fn detach_alarm_callback(&mut self) {
        self.alarm.detach_callback();
    }

    pub fn is_alarm_enabled(&self) -> bool {
        self.alarm.is_enabled()
    }

    pub fn is_alarm_ringing(&self) -> bool {
        self.alarm.is_ringing()
    }

    pub fn is_alarm_postponed(&self) -> bool {
        self.alarm.is_postponed()
    }

    pub fn postponed_until(&self) -> Option<ClockTime> {
        self.alarm.postponed_until()
    }

    pub fn alarm_sounded_today(&self) -> bool {
        self.alarm.sounded_today()
    }

    /// Read-only access to the full alarm state.
    pub fn alarm_state(&self) -> &AlarmState {
        &self.alarm
    }

    /// Copies the state the user interface needs.
    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            time: self.time,
            valid: self.valid,
            alarm: self.alarm.time(),
            alarm_enabled: self.alarm.is_enabled(),
            alarm_ringing: self.alarm.is_ringing(),
        }
    }
}
