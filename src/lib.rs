#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ClockTime`**: Time of day as six BCD digits, units first
//! - **`BcdPair`**: One two-digit BCD field, edited with `increment_pair` / `decrement_pair`
//! - **`Clock`**: Counts ticks from a periodic source and advances the time once per second
//! - **`AlarmState`**: Daily alarm with snooze and cancel-until-tomorrow, owned by the `Clock`
//! - **`SharedClock`**: A `Clock` behind a critical section, shared by the tick interrupt and the foreground loop
//! - **`ClockUi`**: Foreground state machine that edits the time and alarm from six buttons
//! - **`LongPress`**: Hold detector for the SET_TIME and SET_ALARM buttons
//! - **`Keypad`**, **`DigitalInput`**, **`DigitalOutput`**, **`Display`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your millisecond timer
//!
//! Digits travel in two orders: `ClockTime` stores `[s_u, s_t, m_u, m_t, h_u, h_t]`,
//! while the display receives `[h_t, h_u, m_t, m_u]`.

#[macro_use]
mod logging;

pub mod alarm;
pub mod bcd;
pub mod clock;
pub mod config;
pub mod display;
pub mod input;
pub mod long_press;
pub mod shared;
pub mod time;
pub mod types;
pub mod ui;

pub use alarm::{AlarmCallback, AlarmState, AlarmTrigger};
pub use bcd::{BcdPair, decrement_pair, increment_pair};
pub use clock::{Clock, ClockSnapshot, TickOutcome};
pub use config::ClockConfig;
pub use display::{Display, DisplayCommand, DisplayError, DisplayLayout};
pub use input::{DigitalInput, DigitalOutput, Edge, EdgeInput, Key, Keypad};
pub use long_press::LongPress;
pub use shared::SharedClock;
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource};
pub use types::{ClockError, ClockTime};
pub use ui::{ClockUi, EditTarget, UiState};

/// Number of digits (and decimal points) on the display.
pub const DISPLAY_DIGITS: usize = 4;

/// Hold time for the SET_TIME and SET_ALARM buttons.
pub const DEFAULT_LONG_PRESS_MS: u32 = 3000;

/// Margin added to every long-press hold time.
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Idle time after which an edit is abandoned.
pub const DEFAULT_INACTIVITY_TIMEOUT_MS: u32 = 30_000;

/// Postpone applied by ACCEPT while the alarm is ringing.
pub const DEFAULT_SNOOZE_MINUTES: u16 = 5;

/// Blink divisor passed to the display flash commands.
pub const DEFAULT_FLASH_DIVISOR: u16 = 50;
