//! Shared test infrastructure for alarm-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use alarm_clock::display::check_range;
use alarm_clock::{
    ClockTime, DigitalOutput, Display, DisplayCommand, DisplayError, Key, Keypad, TimeDuration,
    TimeInstant, TimeSource, DISPLAY_DIGITS,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock millisecond clock with controllable advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Keypad
// ============================================================================

/// Keypad whose levels and activation edges are driven by the test
pub struct MockKeypad {
    levels: [bool; 6],
    pending: [bool; 6],
}

impl MockKeypad {
    pub fn new() -> Self {
        Self {
            levels: [false; 6],
            pending: [false; 6],
        }
    }

    /// Pushes the key down, latching one activation edge.
    pub fn press(&mut self, key: Key) {
        if !self.levels[key.index()] {
            self.pending[key.index()] = true;
        }
        self.levels[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.levels[key.index()] = false;
    }

    /// Press followed by release, as a single tap seen by the next service call.
    pub fn tap(&mut self, key: Key) {
        self.press(key);
        self.release(key);
    }
}

impl Keypad for MockKeypad {
    fn is_active(&mut self, key: Key) -> bool {
        self.levels[key.index()]
    }

    fn was_activated(&mut self, key: Key) -> bool {
        core::mem::take(&mut self.pending[key.index()])
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Display that keeps its current configuration and a command history
pub struct MockDisplay {
    pub digits: [u8; DISPLAY_DIGITS],
    pub points: [bool; DISPLAY_DIGITS],
    pub flashing_digits: Option<(u8, u8, u16)>,
    pub flashing_points: Option<(u8, u8, u16)>,
    pub refreshes: u32,
    pub rejected: u32,
    history: heapless::Vec<DisplayCommand, 64>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            digits: [0; DISPLAY_DIGITS],
            points: [false; DISPLAY_DIGITS],
            flashing_digits: None,
            flashing_points: None,
            refreshes: 0,
            rejected: 0,
            history: heapless::Vec::new(),
        }
    }

    pub fn history(&self) -> &[DisplayCommand] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, command: DisplayCommand) {
        let _ = self.history.push(command);
    }

    fn flash(from: u8, to: u8, divisor: u16) -> Result<Option<(u8, u8, u16)>, DisplayError> {
        check_range(from, to)?;
        Ok((divisor != 0).then_some((from, to, divisor)))
    }
}

impl Display for MockDisplay {
    fn write_bcd(&mut self, digits: &[u8; DISPLAY_DIGITS]) {
        self.digits = *digits;
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn set_point(&mut self, index: u8, on: bool) {
        self.record(DisplayCommand::SetPoint { index, on });
        if let Some(point) = self.points.get_mut(usize::from(index)) {
            *point = on;
        }
    }

    fn flash_digits(&mut self, from: u8, to: u8, divisor: u16) -> Result<(), DisplayError> {
        let flashing = Self::flash(from, to, divisor).inspect_err(|_| self.rejected += 1)?;
        self.record(DisplayCommand::FlashDigits { from, to, divisor });
        self.flashing_digits = flashing;
        Ok(())
    }

    fn flash_points(&mut self, from: u8, to: u8, divisor: u16) -> Result<(), DisplayError> {
        let flashing = Self::flash(from, to, divisor).inspect_err(|_| self.rejected += 1)?;
        self.record(DisplayCommand::FlashPoints { from, to, divisor });
        self.flashing_points = flashing;
        Ok(())
    }
}

// ============================================================================
// Mock Buzzer
// ============================================================================

#[derive(Default)]
pub struct MockBuzzer {
    pub active: bool,
    pub activations: u32,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DigitalOutput for MockBuzzer {
    fn activate(&mut self) {
        if !self.active {
            self.activations += 1;
        }
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn toggle(&mut self) {
        if self.active {
            self.deactivate();
        } else {
            self.activate();
        }
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Shorthand for a valid `ClockTime`
pub fn at(hours: u8, minutes: u8, seconds: u8) -> ClockTime {
    ClockTime::from_hms(hours, minutes, seconds).unwrap()
}
