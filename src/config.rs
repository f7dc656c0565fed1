//! User interface timing configuration.

use crate::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_FLASH_DIVISOR, DEFAULT_INACTIVITY_TIMEOUT_MS,
    DEFAULT_LONG_PRESS_MS, DEFAULT_SNOOZE_MINUTES,
};

/// Timing parameters for [`ClockUi`](crate::ClockUi).
///
/// ```
/// use alarm_clock::ClockConfig;
///
/// let config = ClockConfig::new()
///     .with_long_press_ms(2000)
///     .with_snooze_minutes(10);
/// assert_eq!(config.inactivity_timeout_ms, 30_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Hold time for the SET_TIME and SET_ALARM keys.
    pub long_press_ms: u32,
    /// Added to the hold time before a long press is reported.
    pub debounce_ms: u32,
    /// Idle time after which an edit is abandoned.
    pub inactivity_timeout_ms: u32,
    /// Postpone applied by ACCEPT while the alarm is ringing.
    pub snooze_minutes: u16,
    /// Blink divisor passed to the display flash commands.
    pub flash_divisor: u16,
}

impl ClockConfig {
    pub const fn new() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            inactivity_timeout_ms: DEFAULT_INACTIVITY_TIMEOUT_MS,
            snooze_minutes: DEFAULT_SNOOZE_MINUTES,
            flash_divisor: DEFAULT_FLASH_DIVISOR,
        }
    }

    pub const fn with_long_press_ms(mut self, ms: u32) -> Self {
        self.long_press_ms = ms;
        self
    }

    pub const fn with_debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub const fn with_inactivity_timeout_ms(mut self, ms: u32) -> Self {
        self.inactivity_timeout_ms = ms;
        self
    }

    /// Sets the snooze length. With zero, ACCEPT leaves a ringing alarm
    /// ringing.
    pub const fn with_snooze_minutes(mut self, minutes: u16) -> Self {
        self.snooze_minutes = minutes;
        self
    }

    pub const fn with_flash_divisor(mut self, divisor: u16) -> Self {
        self.flash_divisor = divisor;
        self
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClockConfig::default();
        assert_eq!(config.long_press_ms, 3000);
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.inactivity_timeout_ms, 30_000);
        assert_eq!(config.snooze_minutes, 5);
        assert_eq!(config.flash_divisor, 50);
    }

    #[test]
    fn builder_overrides_single_field() {
        let config = ClockConfig::new().with_inactivity_timeout_ms(1000);
        assert_eq!(config.inactivity_timeout_ms, 1000);
        assert_eq!(config.long_press_ms, DEFAULT_LONG_PRESS_MS);
    }
}
