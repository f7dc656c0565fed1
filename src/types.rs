//! Core time-of-day type and error definitions.

use crate::bcd::{BcdPair, HOURS_LIMIT, MINUTES_LIMIT, SECONDS_LIMIT, increment_pair};

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;
const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day held as six BCD digits.
///
/// The digit layout is `[s_units, s_tens, m_units, m_tens, h_units, h_tens]`,
/// so `16:47:25` is stored as `[5, 2, 7, 4, 6, 1]`. A `ClockTime` may hold an
/// out-of-range pattern (for example one built with [`ClockTime::from_bcd`]);
/// use [`ClockTime::is_valid`] before trusting it. The clock only ever reports
/// valid times as current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    bcd: [u8; 6],
}

impl ClockTime {
    /// `00:00:00`.
    pub const MIDNIGHT: Self = Self { bcd: [0; 6] };

    /// `23:59:59`, the last second before the day rolls over.
    pub const LAST_SECOND: Self = Self {
        bcd: [9, 5, 9, 5, 3, 2],
    };

    /// Creates a time from raw digits without validating them.
    #[inline]
    pub const fn from_bcd(bcd: [u8; 6]) -> Self {
        Self { bcd }
    }

    /// Creates a time from decimal hours, minutes and seconds.
    ///
    /// # Errors
    /// `InvalidTime` if any component is out of range.
    pub fn from_hms(hours: u8, minutes: u8, seconds: u8) -> Result<Self, ClockError> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return Err(ClockError::InvalidTime);
        }
        Ok(Self::from_pairs(
            BcdPair::from_value(hours),
            BcdPair::from_value(minutes),
            BcdPair::from_value(seconds),
        ))
    }

    /// Builds a time from its three digit pairs.
    #[inline]
    pub const fn from_pairs(hours: BcdPair, minutes: BcdPair, seconds: BcdPair) -> Self {
        Self {
            bcd: [
                seconds.units,
                seconds.tens,
                minutes.units,
                minutes.tens,
                hours.units,
                hours.tens,
            ],
        }
    }

    /// Builds a time from display order digits `[h_tens, h_units, m_tens, m_units]`
    /// with seconds set to zero.
    #[inline]
    pub const fn from_display_digits(digits: [u8; 4]) -> Self {
        Self {
            bcd: [0, 0, digits[3], digits[2], digits[1], digits[0]],
        }
    }

    /// Builds a time from the number of seconds elapsed since midnight,
    /// wrapping at one day.
    pub fn from_seconds_of_day(seconds: u32) -> Self {
        let seconds = seconds % SECONDS_PER_DAY;
        // Each component is below 60 after the modulo, so the casts are lossless.
        let hours = (seconds / 3600) as u8;
        let minutes = ((seconds / 60) % 60) as u8;
        let secs = (seconds % 60) as u8;
        Self::from_pairs(
            BcdPair::from_value(hours),
            BcdPair::from_value(minutes),
            BcdPair::from_value(secs),
        )
    }

    /// Returns the raw digits.
    #[inline]
    pub const fn to_bcd(&self) -> [u8; 6] {
        self.bcd
    }

    /// Returns the digits in display order `[h_tens, h_units, m_tens, m_units]`.
    #[inline]
    pub const fn display_digits(&self) -> [u8; 4] {
        [self.bcd[5], self.bcd[4], self.bcd[3], self.bcd[2]]
    }

    #[inline]
    pub const fn seconds_pair(&self) -> BcdPair {
        BcdPair::new(self.bcd[0], self.bcd[1])
    }

    #[inline]
    pub const fn minutes_pair(&self) -> BcdPair {
        BcdPair::new(self.bcd[2], self.bcd[3])
    }

    #[inline]
    pub const fn hours_pair(&self) -> BcdPair {
        BcdPair::new(self.bcd[4], self.bcd[5])
    }

    /// Decimal hours.
    #[inline]
    pub const fn hours(&self) -> u8 {
        self.hours_pair().value()
    }

    /// Decimal minutes.
    #[inline]
    pub const fn minutes(&self) -> u8 {
        self.minutes_pair().value()
    }

    /// Decimal seconds.
    #[inline]
    pub const fn seconds(&self) -> u8 {
        self.seconds_pair().value()
    }

    /// Returns true for `00:00:00` through `23:59:59` with every digit in range.
    pub const fn is_valid(&self) -> bool {
        self.seconds_pair().is_within(SECONDS_LIMIT)
            && self.minutes_pair().is_within(MINUTES_LIMIT)
            && self.hours_pair().is_within(HOURS_LIMIT)
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_of_day(&self) -> u32 {
        u32::from(self.hours()) * 3600 + u32::from(self.minutes()) * 60 + u32::from(self.seconds())
    }

    /// Returns the same time with seconds forced to `00`.
    #[inline]
    pub const fn without_seconds(&self) -> Self {
        Self::from_pairs(self.hours_pair(), self.minutes_pair(), BcdPair::ZERO)
    }

    /// Adds whole minutes, keeping seconds. The hour wraps from 23 back to 00
    /// instead of carrying into a day.
    pub fn add_minutes(&self, minutes: u16) -> Self {
        let of_day = u32::from(self.hours()) * 60 + u32::from(self.minutes());
        let total = (of_day + u32::from(minutes)) % MINUTES_PER_DAY;
        // Both components are below 60 after the modulo.
        let hours = (total / 60) as u8;
        let minutes = (total % 60) as u8;
        Self::from_pairs(
            BcdPair::from_value(hours),
            BcdPair::from_value(minutes),
            self.seconds_pair(),
        )
    }

    /// Advances the time by one second with cascading BCD carries.
    ///
    /// `23:59:59` is short-circuited straight to `00:00:00`; returns true when
    /// that midnight rollover happened.
    pub(crate) fn advance_second(&mut self) -> bool {
        if *self == Self::LAST_SECOND {
            *self = Self::MIDNIGHT;
            return true;
        }

        let seconds = increment_pair(self.seconds_pair(), SECONDS_LIMIT);
        self.set_seconds(seconds);
        if seconds != BcdPair::ZERO {
            return false;
        }

        let minutes = increment_pair(self.minutes_pair(), MINUTES_LIMIT);
        self.set_minutes(minutes);
        if minutes != BcdPair::ZERO {
            return false;
        }

        let hours = increment_pair(self.hours_pair(), HOURS_LIMIT);
        self.set_hours(hours);
        false
    }

    #[inline]
    pub(crate) fn set_seconds(&mut self, pair: BcdPair) {
        self.bcd[0] = pair.units;
        self.bcd[1] = pair.tens;
    }

    #[inline]
    pub(crate) fn set_minutes(&mut self, pair: BcdPair) {
        self.bcd[2] = pair.units;
        self.bcd[3] = pair.tens;
    }

    #[inline]
    pub(crate) fn set_hours(&mut self, pair: BcdPair) {
        self.bcd[4] = pair.units;
        self.bcd[5] = pair.tens;
    }
}

impl core::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let d = &self.bcd;
        write!(f, "{}{}:{}{}:{}{}", d[5], d[4], d[3], d[2], d[1], d[0])
    }
}

/// Errors reported by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// The time is outside `00:00:00`-`23:59:59` or holds a non-decimal digit.
    InvalidTime,

    /// The tick rate must be at least one tick per second.
    InvalidTickRate,

    /// The current time has not been set, or was invalidated.
    TimeNotSet,
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClockError::InvalidTime => {
                write!(f, "time must be between 00:00:00 and 23:59:59")
            }
            ClockError::InvalidTickRate => {
                write!(f, "ticks per second must be at least 1")
            }
            ClockError::TimeNotSet => {
                write!(f, "current time is not valid")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClockError {}
