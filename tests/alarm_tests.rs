//! Integration tests for alarm scheduling through the Clock

mod common;
use common::*;

use std::cell::Cell;

use alarm_clock::{AlarmTrigger, Clock, ClockTime, TickOutcome};

const TICKS: u16 = 5;

std::thread_local! {
    static RINGS: Cell<u32> = const { Cell::new(0) };
}

fn count_ring() {
    RINGS.with(|rings| rings.set(rings.get() + 1));
}

fn rings() -> u32 {
    RINGS.with(Cell::get)
}

fn clock_at(time: ClockTime) -> Clock {
    let mut clock = Clock::try_new(TICKS).unwrap();
    clock.attach_alarm_callback(count_ring);
    clock.set_time(time).unwrap();
    clock
}

/// Advances whole seconds and returns every trigger seen.
fn run_seconds(clock: &mut Clock, seconds: u32) -> Vec<AlarmTrigger> {
    let mut triggers = Vec::new();
    for _ in 0..seconds * u32::from(TICKS) {
        if let TickOutcome::AlarmTriggered(trigger) = clock.tick() {
            triggers.push(trigger);
        }
    }
    triggers
}

#[test]
fn alarm_at_21_34_fires_after_one_second() {
    let mut clock = clock_at(at(21, 33, 59));
    clock.set_alarm(at(21, 34, 0)).unwrap();

    assert_eq!(run_seconds(&mut clock, 1), [AlarmTrigger::Scheduled]);
    assert_eq!(rings(), 1);
    assert!(clock.alarm_sounded_today());
    assert!(clock.is_alarm_ringing());
}

#[test]
fn alarm_fires_once_per_day() {
    let mut clock = clock_at(at(6, 59, 0));
    clock.set_alarm(at(7, 0, 0)).unwrap();

    run_seconds(&mut clock, 3600);
    assert_eq!(rings(), 1);

    // Through midnight and around to the next morning.
    run_seconds(&mut clock, 24 * 3600);
    assert_eq!(rings(), 2);
}

#[test]
fn set_alarm_drops_seconds() {
    let mut clock = clock_at(at(12, 0, 0));
    clock.set_alarm(at(12, 45, 23)).unwrap();
    assert_eq!(clock.alarm(), Some(at(12, 45, 0)));
    assert!(clock.is_alarm_enabled());
}

#[test]
fn alarm_is_none_until_configured() {
    let clock = clock_at(at(12, 0, 0));
    assert_eq!(clock.alarm(), None);
}

#[test]
fn disabling_before_match_prevents_ring() {
    let mut clock = clock_at(at(6, 59, 50));
    clock.set_alarm(at(7, 0, 0)).unwrap();
    clock.enable_alarm(false);

    assert!(run_seconds(&mut clock, 20).is_empty());
    assert_eq!(rings(), 0);
    assert!(!clock.is_alarm_ringing());
}

#[test]
fn disabling_while_ringing_resets_trigger_state() {
    let mut clock = clock_at(at(6, 59, 59));
    clock.set_alarm(at(7, 0, 0)).unwrap();
    run_seconds(&mut clock, 1);
    assert!(clock.is_alarm_ringing());

    clock.enable_alarm(false);
    assert!(!clock.is_alarm_ringing());
    assert!(!clock.alarm_sounded_today());
    assert!(!clock.is_alarm_postponed());
}

#[test]
fn postpone_suppresses_until_target_then_fires_once() {
    let mut clock = clock_at(at(6, 59, 59));
    clock.set_alarm(at(7, 0, 0)).unwrap();
    run_seconds(&mut clock, 1);
    assert_eq!(rings(), 1);

    clock.postpone_alarm(5);
    assert!(!clock.is_alarm_ringing());
    assert_eq!(clock.postponed_until(), Some(at(7, 5, 0)));

    assert!(run_seconds(&mut clock, 299).is_empty());
    assert_eq!(clock.time(), Ok(at(7, 4, 59)));

    assert_eq!(run_seconds(&mut clock, 1), [AlarmTrigger::Postponed]);
    assert_eq!(rings(), 2);
    assert!(!clock.is_alarm_postponed());

    assert!(run_seconds(&mut clock, 600).is_empty());
    assert_eq!(rings(), 2);
}

#[test]
fn postpone_crosses_hour_with_bcd_carry() {
    let mut clock = clock_at(at(9, 57, 30));
    clock.set_alarm(at(9, 57, 0)).unwrap();
    clock.postpone_alarm(5);
    assert_eq!(clock.postponed_until(), Some(at(10, 2, 30)));
}

#[test]
fn postpone_wraps_at_midnight() {
    let mut clock = clock_at(at(23, 58, 0));
    clock.set_alarm(at(23, 58, 0)).unwrap();
    clock.postpone_alarm(5);
    assert_eq!(clock.postponed_until(), Some(at(0, 3, 0)));

    run_seconds(&mut clock, 5 * 60);
    assert_eq!(rings(), 1);
}

#[test]
fn postpone_is_a_no_op_for_zero_minutes() {
    let mut clock = clock_at(at(6, 59, 59));
    clock.set_alarm(at(7, 0, 0)).unwrap();
    run_seconds(&mut clock, 1);

    clock.postpone_alarm(0);
    assert!(!clock.is_alarm_postponed());
    assert!(clock.is_alarm_ringing());
}

#[test]
fn until_tomorrow_skips_today_and_rings_next_day() {
    let mut clock = clock_at(at(6, 59, 59));
    clock.set_alarm(at(7, 0, 0)).unwrap();
    run_seconds(&mut clock, 1);
    assert_eq!(rings(), 1);

    clock.postpone_alarm_until_tomorrow();
    assert!(!clock.is_alarm_ringing());
    assert!(clock.is_alarm_enabled());

    // Rest of today: silent.
    run_seconds(&mut clock, 17 * 3600 - 1);
    assert_eq!(clock.time(), Ok(at(23, 59, 59)));
    assert_eq!(rings(), 1);

    // Tomorrow at 07:00 exactly once.
    let triggers = run_seconds(&mut clock, 8 * 3600);
    assert_eq!(triggers, [AlarmTrigger::Postponed]);
    assert_eq!(rings(), 2);
}

#[test]
fn snooze_that_lands_on_alarm_time_rings_once() {
    let mut clock = clock_at(at(6, 50, 0));
    clock.set_alarm(at(7, 0, 0)).unwrap();
    clock.postpone_alarm(10);

    assert_eq!(run_seconds(&mut clock, 600), [AlarmTrigger::Postponed]);
    assert!(run_seconds(&mut clock, 60).is_empty());
    assert_eq!(rings(), 1);
}

#[test]
fn detached_callback_is_not_called() {
    let mut clock = clock_at(at(6, 59, 59));
    clock.set_alarm(at(7, 0, 0)).unwrap();
    clock.detach_alarm_callback();

    assert_eq!(run_seconds(&mut clock, 1), [AlarmTrigger::Scheduled]);
    assert_eq!(rings(), 0);
    assert!(clock.is_alarm_ringing());
}

#[test]
fn invalid_alarm_time_is_rejected() {
    let mut clock = clock_at(at(6, 0, 0));
    assert!(clock.set_alarm(ClockTime::from_bcd([0, 0, 0, 6, 0, 0])).is_err());
    assert_eq!(clock.alarm(), None);
}

#[test]
fn postpone_while_disabled_never_rings() {
    let mut clock = clock_at(at(6, 0, 0));
    clock.set_alarm(at(7, 0, 0)).unwrap();
    clock.enable_alarm(false);
    clock.postpone_alarm(5);
    assert_eq!(clock.postponed_until(), Some(at(6, 5, 0)));

    assert!(run_seconds(&mut clock, 5 * 60).is_empty());
    assert_eq!(rings(), 0);
    assert!(!clock.is_alarm_ringing());
    assert!(!clock.is_alarm_postponed());
    assert!(clock.alarm_sounded_today());
}

#[test]
fn until_tomorrow_without_alarm_is_ignored() {
    let mut clock = clock_at(at(23, 59, 59));
    clock.postpone_alarm_until_tomorrow();
    clock.enable_alarm(true);

    assert!(run_seconds(&mut clock, 1).is_empty());
    assert_eq!(clock.time(), Ok(ClockTime::MIDNIGHT));
    assert_eq!(clock.alarm(), None);
    assert!(!clock.is_alarm_enabled());
    assert!(!clock.is_alarm_ringing());
    assert!(!clock.snapshot().alarm_enabled);
}
