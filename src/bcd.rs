//! Two-digit BCD arithmetic.
//!
//! Every field of a [`ClockTime`](crate::ClockTime) and every field of the
//! editor's scratch buffer is a pair of decimal digits. The helpers here step
//! such a pair up or down against an upper limit, carrying from units into tens
//! and wrapping around at both ends.

/// A pair of decimal digits, stored units first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BcdPair {
    /// Units digit (0-9).
    pub units: u8,
    /// Tens digit.
    pub tens: u8,
}

/// Upper limit for seconds (59).
pub const SECONDS_LIMIT: BcdPair = BcdPair::new(9, 5);

/// Upper limit for minutes (59).
pub const MINUTES_LIMIT: BcdPair = BcdPair::new(9, 5);

/// Upper limit for hours (23).
pub const HOURS_LIMIT: BcdPair = BcdPair::new(3, 2);

impl BcdPair {
    /// The pair `00`.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a pair from its digits.
    #[inline]
    pub const fn new(units: u8, tens: u8) -> Self {
        Self { units, tens }
    }

    /// Splits a decimal value below 100 into a pair.
    #[inline]
    pub const fn from_value(value: u8) -> Self {
        Self::new(value % 10, value / 10)
    }

    /// Returns the decimal value encoded by the pair.
    #[inline]
    pub const fn value(self) -> u8 {
        self.tens.wrapping_mul(10).wrapping_add(self.units)
    }

    /// Returns true if both digits are decimal and the pair does not exceed `limit`.
    #[inline]
    pub const fn is_within(self, limit: BcdPair) -> bool {
        self.units <= 9 && !self.exceeds(limit)
    }

    /// Lexicographic comparison against `limit`, tens first.
    #[inline]
    const fn exceeds(self, limit: BcdPair) -> bool {
        self.tens > limit.tens || (self.tens == limit.tens && self.units > limit.units)
    }
}

/// Increments a pair, wrapping to `00` once it would pass `limit`.
///
/// `59` with limit `59` becomes `00`; `23` with limit `23` becomes `00`;
/// `09` becomes `10`.
pub fn increment_pair(pair: BcdPair, limit: BcdPair) -> BcdPair {
    let next = if pair.units >= 9 {
        BcdPair::new(0, pair.tens.wrapping_add(1))
    } else {
        BcdPair::new(pair.units + 1, pair.tens)
    };

    if next.exceeds(limit) {
        BcdPair::ZERO
    } else {
        next
    }
}

/// Decrements a pair, wrapping to `limit` when going below `00`.
///
/// Borrowing from a zero tens digit is handled explicitly instead of relying
/// on unsigned underflow.
pub fn decrement_pair(pair: BcdPair, limit: BcdPair) -> BcdPair {
    let next = if pair.units > 0 {
        BcdPair::new(pair.units - 1, pair.tens)
    } else if pair.tens > 0 {
        BcdPair::new(9, pair.tens - 1)
    } else {
        return limit;
    };

    // A pair that started above the limit lands on the limit.
    if next.exceeds(limit) { limit } else { next }
}
