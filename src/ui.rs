//! Button-driven user interface state machine.
//!
//! Provides [`ClockUi`], which runs once per foreground loop iteration. It
//! reads the keypad, edits a scratch copy of the time or alarm, commits edits
//! to the [`SharedClock`], and drives the display and buzzer.

use crate::bcd::{self, BcdPair, HOURS_LIMIT, MINUTES_LIMIT};
use crate::config::ClockConfig;
use crate::display::{self, Display, DisplayCommand, DisplayLayout};
use crate::input::{DigitalOutput, Key, Keypad};
use crate::long_press::LongPress;
use crate::shared::SharedClock;
use crate::time::{TimeInstant, TimeSource};
use crate::types::ClockTime;
use crate::DISPLAY_DIGITS;

const LAST_POSITION: u8 = (DISPLAY_DIGITS - 1) as u8;
const SEPARATOR_POINT: u8 = 1;
const ALARM_POINT: u8 = 3;

/// What an edit session modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditTarget {
    /// The current time.
    Time,
    /// The alarm time.
    Alarm,
}

/// The state of the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiState {
    /// The time has never been set (or was invalidated). Digits blink.
    Initializing,
    /// Normal operation.
    ShowingTime,
    /// Editing the minutes of the target.
    SettingMinutes(EditTarget),
    /// Editing the hours of the target.
    SettingHours(EditTarget),
}

impl UiState {
    pub fn is_setting(&self) -> bool {
        self.edit_target().is_some()
    }

    /// The target being edited, if any.
    pub fn edit_target(&self) -> Option<EditTarget> {
        match self {
            UiState::SettingMinutes(target) | UiState::SettingHours(target) => Some(*target),
            UiState::Initializing | UiState::ShowingTime => None,
        }
    }

    /// Display configuration applied on entry to this state.
    ///
    /// `divisor` is the blink divisor for flashing ranges. The alarm
    /// indicator point in `ShowingTime` is driven separately.
    pub fn display_layout(&self, divisor: u16) -> DisplayLayout {
        use DisplayCommand::*;

        let separator_only = [
            SetPoint { index: 0, on: false },
            SetPoint { index: SEPARATOR_POINT, on: true },
            SetPoint { index: 2, on: false },
            SetPoint { index: ALARM_POINT, on: false },
        ];
        let all_points = [
            SetPoint { index: 0, on: true },
            SetPoint { index: SEPARATOR_POINT, on: true },
            SetPoint { index: 2, on: true },
            SetPoint { index: ALARM_POINT, on: true },
        ];
        let steady_points = FlashPoints { from: 0, to: LAST_POSITION, divisor: 0 };
        let blinking_separator = FlashPoints {
            from: SEPARATOR_POINT,
            to: SEPARATOR_POINT,
            divisor,
        };

        let mut layout = DisplayLayout::new();
        match self {
            UiState::Initializing => {
                extend(&mut layout, &[FlashDigits { from: 0, to: LAST_POSITION, divisor }]);
                extend(&mut layout, &separator_only);
                extend(&mut layout, &[blinking_separator]);
            }
            UiState::ShowingTime => {
                extend(&mut layout, &[FlashDigits { from: 0, to: LAST_POSITION, divisor: 0 }]);
                extend(&mut layout, &separator_only[..3]);
                extend(&mut layout, &[blinking_separator]);
            }
            UiState::SettingMinutes(target) | UiState::SettingHours(target) => {
                let (from, to) = match self {
                    UiState::SettingMinutes(_) => (2, LAST_POSITION),
                    _ => (0, 1),
                };
                extend(&mut layout, &[FlashDigits { from, to, divisor }]);
                match target {
                    EditTarget::Time => extend(&mut layout, &separator_only),
                    EditTarget::Alarm => extend(&mut layout, &all_points),
                }
                extend(&mut layout, &[steady_points]);
            }
        }
        layout
    }
}

fn extend(layout: &mut DisplayLayout, commands: &[DisplayCommand]) {
    for command in commands {
        if layout.push(*command).is_err() {
            break;
        }
    }
}

/// Foreground controller for a four-button alarm clock.
///
/// Owns the UI state, the edit scratch buffer and the long-press detectors.
/// The clock, keypad, display and buzzer are passed to every
/// [`service`](Self::service) call.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct ClockUi<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    config: ClockConfig,
    state: UiState,
    /// Edit buffer in display order `[h_tens, h_units, m_tens, m_units]`.
    scratch: [u8; DISPLAY_DIGITS],
    last_interaction: I,
    set_time_press: LongPress<I>,
    set_alarm_press: LongPress<I>,
    needs_layout: bool,
    ringing_shown: bool,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> ClockUi<'t, I, T> {
    /// Creates a controller in `Initializing`. The display layout is applied
    /// on the first [`service`](Self::service) call.
    pub fn new(time_source: &'t T, config: ClockConfig) -> Self {
        Self {
            time_source,
            config,
            state: UiState::Initializing,
            scratch: [0; DISPLAY_DIGITS],
            last_interaction: time_source.now(),
            set_time_press: LongPress::with_debounce(config.debounce_ms),
            set_alarm_press: LongPress::with_debounce(config.debounce_ms),
            needs_layout: true,
            ringing_shown: false,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// The digits being edited, in display order.
    pub fn scratch(&self) -> [u8; DISPLAY_DIGITS] {
        self.scratch
    }

    /// Runs one iteration of the interface and returns the resulting state.
    pub fn service<K, D, B>(
        &mut self,
        clock: &SharedClock,
        keypad: &mut K,
        display: &mut D,
        buzzer: &mut B,
    ) -> UiState
    where
        K: Keypad + ?Sized,
        D: Display + ?Sized,
        B: DigitalOutput + ?Sized,
    {
        let now = self.time_source.now();
        let snapshot = clock.snapshot();

        match self.state {
            UiState::Initializing if snapshot.valid => self.enter(UiState::ShowingTime, now),
            UiState::ShowingTime if !snapshot.valid => self.enter(UiState::Initializing, now),
            _ => {}
        }

        let hold = self.config.long_press_ms;
        let set_time_held = self
            .set_time_press
            .check(keypad.is_active(Key::SetTime), now, hold);
        let set_alarm_held = self
            .set_alarm_press
            .check(keypad.is_active(Key::SetAlarm), now, hold);

        let increment = keypad.was_activated(Key::Increment);
        let decrement = keypad.was_activated(Key::Decrement);
        let accept = keypad.was_activated(Key::Accept);
        let cancel = keypad.was_activated(Key::Cancel);

        match self.state {
            UiState::Initializing | UiState::ShowingTime => {
                if set_time_held {
                    self.scratch = snapshot.time.display_digits();
                    self.enter(UiState::SettingMinutes(EditTarget::Time), now);
                } else if set_alarm_held {
                    self.scratch = snapshot
                        .alarm
                        .unwrap_or(ClockTime::MIDNIGHT)
                        .display_digits();
                    self.enter(UiState::SettingMinutes(EditTarget::Alarm), now);
                } else if self.state == UiState::ShowingTime && (accept || cancel) {
                    self.alarm_key(clock, accept);
                }
            }
            UiState::SettingMinutes(target) | UiState::SettingHours(target) => {
                if cancel {
                    info!("edit of {:?} discarded", target);
                    self.leave_edit(clock, now);
                } else if accept {
                    match self.state {
                        UiState::SettingMinutes(_) => {
                            self.enter(UiState::SettingHours(target), now)
                        }
                        _ => self.commit(clock, target, now),
                    }
                } else if increment || decrement {
                    self.adjust(increment);
                    self.last_interaction = now;
                } else if now.millis_since(self.last_interaction)
                    >= u64::from(self.config.inactivity_timeout_ms)
                {
                    info!("edit of {:?} timed out", target);
                    self.leave_edit(clock, now);
                }
            }
        }

        self.render(clock, display, buzzer);
        self.state
    }

    fn enter(&mut self, state: UiState, now: I) {
        debug!("ui {:?} -> {:?}", self.state, state);
        self.state = state;
        self.last_interaction = now;
        self.needs_layout = true;
    }

    /// ACCEPT (`snooze == true`) or CANCEL in `ShowingTime`.
    fn alarm_key(&self, clock: &SharedClock, snooze: bool) {
        let snooze_minutes = self.config.snooze_minutes;
        clock.with(|clock| {
            if clock.is_alarm_ringing() {
                if snooze {
                    clock.postpone_alarm(snooze_minutes);
                } else {
                    clock.postpone_alarm_until_tomorrow();
                }
            } else if clock.alarm().is_some() {
                let enabled = !clock.is_alarm_enabled();
                clock.enable_alarm(enabled);
            }
        });
    }

    fn adjust(&mut self, up: bool) {
        let (units, tens, limit) = match self.state {
            UiState::SettingMinutes(_) => (3, 2, MINUTES_LIMIT),
            _ => (1, 0, HOURS_LIMIT),
        };
        let pair = BcdPair::new(self.scratch[units], self.scratch[tens]);
        let pair = if up {
            bcd::increment_pair(pair, limit)
        } else {
            bcd::decrement_pair(pair, limit)
        };
        self.scratch[units] = pair.units;
        self.scratch[tens] = pair.tens;
    }

    fn commit(&mut self, clock: &SharedClock, target: EditTarget, now: I) {
        let time = ClockTime::from_display_digits(self.scratch);
        let result = clock.with(|clock| match target {
            EditTarget::Time => clock.set_time(time),
            EditTarget::Alarm => clock.set_alarm(time),
        });
        if let Err(_err) = result {
            warn!("edit of {:?} not applied: {:?}", target, _err);
        }
        self.leave_edit(clock, now);
    }

    fn leave_edit(&mut self, clock: &SharedClock, now: I) {
        let next = if clock.with(|clock| clock.is_valid()) {
            UiState::ShowingTime
        } else {
            UiState::Initializing
        };
        self.enter(next, now);
    }

    fn render<D, B>(&mut self, clock: &SharedClock, display: &mut D, buzzer: &mut B)
    where
        D: Display + ?Sized,
        B: DigitalOutput + ?Sized,
    {
        let snapshot = clock.snapshot();
        let divisor = self.config.flash_divisor;
        let ringing = snapshot.alarm_ringing;

        if self.needs_layout || ringing != self.ringing_shown {
            display::apply_layout(&self.state.display_layout(divisor), display);
            if ringing {
                if let Err(_err) = display.flash_points(0, LAST_POSITION, divisor) {
                    warn!("display rejected ringing blink: {:?}", _err);
                }
            }
            self.needs_layout = false;
            self.ringing_shown = ringing;
        }

        if self.state.is_setting() {
            display.write_bcd(&self.scratch);
        } else {
            display.write_bcd(&snapshot.time.display_digits());
        }

        if self.state == UiState::ShowingTime {
            display.set_point(ALARM_POINT, snapshot.alarm_enabled);
        }

        if ringing {
            buzzer.activate();
        } else {
            buzzer.deactivate();
        }

        display.refresh();
    }
}
