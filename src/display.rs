//! Multiplexed four-digit display abstraction.

use crate::DISPLAY_DIGITS;

/// Errors returned by [`Display`] flash commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// `from > to`, or either end is past the last digit.
    InvalidRange { from: u8, to: u8 },
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::InvalidRange { from, to } => {
                write!(
                    f,
                    "invalid flash range {}..={} (display has {} positions)",
                    from, to, DISPLAY_DIGITS
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

/// Validates an inclusive digit or point range.
///
/// Display implementations should call this before touching any state so an
/// invalid command has no effect.
pub fn check_range(from: u8, to: u8) -> Result<(), DisplayError> {
    let last = (DISPLAY_DIGITS - 1) as u8;
    if from > to || to > last {
        return Err(DisplayError::InvalidRange { from, to });
    }
    Ok(())
}

/// A four-digit seven-segment display with one decimal point per digit.
///
/// Digits and points are indexed `0..4` from the left. A `divisor` of zero
/// stops flashing; otherwise it sets the blink period in refresh calls.
pub trait Display {
    /// Shows `digits` in display order (`[h_tens, h_units, m_tens, m_units]`).
    fn write_bcd(&mut self, digits: &[u8; DISPLAY_DIGITS]);

    /// Advances multiplexing. Call once per foreground iteration.
    fn refresh(&mut self);

    fn set_point(&mut self, index: u8, on: bool);

    fn flash_digits(&mut self, from: u8, to: u8, divisor: u16) -> Result<(), DisplayError>;

    fn flash_points(&mut self, from: u8, to: u8, divisor: u16) -> Result<(), DisplayError>;
}

/// A single declarative display configuration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    FlashDigits { from: u8, to: u8, divisor: u16 },
    FlashPoints { from: u8, to: u8, divisor: u16 },
    SetPoint { index: u8, on: bool },
}

impl DisplayCommand {
    /// Sends this command to `display`.
    pub fn apply<D: Display + ?Sized>(&self, display: &mut D) -> Result<(), DisplayError> {
        match *self {
            DisplayCommand::FlashDigits { from, to, divisor } => {
                display.flash_digits(from, to, divisor)
            }
            DisplayCommand::FlashPoints { from, to, divisor } => {
                display.flash_points(from, to, divisor)
            }
            DisplayCommand::SetPoint { index, on } => {
                display.set_point(index, on);
                Ok(())
            }
        }
    }
}

/// Maximum number of commands in one layout.
pub const LAYOUT_CAPACITY: usize = 8;

/// The commands that configure the display for one UI state.
pub type DisplayLayout = heapless::Vec<DisplayCommand, LAYOUT_CAPACITY>;

/// Applies every command in `layout`, logging and skipping failures.
///
/// Returns the number of rejected commands.
pub fn apply_layout<D: Display + ?Sized>(layout: &[DisplayCommand], display: &mut D) -> usize {
    let mut rejected = 0;
    for command in layout {
        if let Err(_err) = command.apply(display) {
            warn!("display rejected {:?}: {:?}", command, _err);
            rejected += 1;
        }
    }
    rejected
}
