//! Long-press detection for a single button.

use crate::DEFAULT_DEBOUNCE_MS;
use crate::time::TimeInstant;

/// Tracks how long one button has been held.
///
/// Poll [`check`](Self::check) once per foreground iteration. It returns true
/// exactly once per physical hold, when the button has been active for the
/// hold time plus the debounce margin.
///
/// Invariant: `already_processed` is only ever true while `is_pressed` is.
#[derive(Debug, Clone, Copy)]
pub struct LongPress<I: TimeInstant> {
    is_pressed: bool,
    already_processed: bool,
    press_start: Option<I>,
    debounce_ms: u32,
}

impl<I: TimeInstant> LongPress<I> {
    /// Creates a released detector with the default 50 ms debounce margin.
    pub const fn new() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE_MS)
    }

    pub const fn with_debounce(debounce_ms: u32) -> Self {
        Self {
            is_pressed: false,
            already_processed: false,
            press_start: None,
            debounce_ms,
        }
    }

    /// Feeds the current input level and returns true when the hold completes.
    pub fn check(&mut self, is_active: bool, now: I, hold_ms: u32) -> bool {
        if !is_active {
            self.reset();
            return false;
        }

        let Some(start) = self.press_start.filter(|_| self.is_pressed) else {
            self.is_pressed = true;
            self.already_processed = false;
            self.press_start = Some(now);
            return false;
        };

        if self.already_processed {
            return false;
        }

        let required = u64::from(hold_ms) + u64::from(self.debounce_ms);
        if now.millis_since(start) >= required {
            self.already_processed = true;
            return true;
        }

        false
    }

    /// Returns to the released state.
    pub fn reset(&mut self) {
        self.is_pressed = false;
        self.already_processed = false;
        self.press_start = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    pub fn already_processed(&self) -> bool {
        self.already_processed
    }

    /// When the current hold started.
    pub fn press_start(&self) -> Option<I> {
        self.press_start
    }
}

impl<I: TimeInstant> Default for LongPress<I> {
    fn default() -> Self {
        Self::new()
    }
}
