//! Integration tests for the command dispatcher: one response per non-blank
//! line, state transitions, and zero mutation on rejected input.

use telenode::app::reply::{Ack, Reply};
use telenode::app::state::AppState;
use telenode::error::CommandError;

use super::mock_hw::{IndicatorCall, MockApp, make_app};

/// Send `line` and return the single response it produced.
fn send(app: &mut MockApp, line: &str) -> String {
    let before = app.sink().lines.len();
    app.handle_command(line);
    assert_eq!(
        app.sink().lines.len(),
        before + 1,
        "{line:?} must produce exactly one response"
    );
    app.sink().last().unwrap().to_owned()
}

// ── Responses ─────────────────────────────────────────────────

#[test]
fn help_lists_the_grammar() {
    let mut app = make_app(0);
    assert_eq!(
        send(&mut app, "HELP"),
        "OK Commands: HELP STATUS LED ON|OFF|AUTO RATE <ms> ARM DISARM FAULT"
    );
}

#[test]
fn status_uses_the_current_clock_reading() {
    let mut app = make_app(1000);
    app.clock_mut().now_ms = 3500;
    assert_eq!(
        send(&mut app, "STATUS"),
        "OK STATE=1 2500 TELEMETRY_MS=1000 HEARTBEAT_MS=2000 FAULTS=0"
    );
}

#[test]
fn status_has_no_side_effects() {
    let mut app = make_app(0);
    let before = *app.context();
    app.clock_mut().now_ms = 9000;
    send(&mut app, "STATUS");
    assert_eq!(*app.context(), before);
}

#[test]
fn handle_command_returns_the_reply_it_wrote() {
    let mut app = make_app(0);
    assert_eq!(app.handle_command("ARM"), Some(Reply::Ok(Ack::Armed)));
    assert_eq!(
        app.handle_command("BOGUS"),
        Some(Reply::Err(CommandError::UnknownCommand))
    );
}

#[test]
fn blank_lines_are_silent() {
    let mut app = make_app(0);
    let before = *app.context();

    assert_eq!(app.handle_command(""), None);
    assert_eq!(app.handle_command("  "), None);
    assert_eq!(app.handle_command("\t \t"), None);

    assert!(app.sink().lines.is_empty());
    assert_eq!(*app.context(), before);
}

#[test]
fn leading_whitespace_is_skipped() {
    let mut app = make_app(0);
    assert_eq!(send(&mut app, " \tARM"), "OK ARMED");
    assert_eq!(app.state(), AppState::Armed);
}

#[test]
fn unknown_commands_are_rejected() {
    let mut app = make_app(0);
    for line in ["arm", "ARM ", "REBOOT", "LED", "RATE", "STATUS?"] {
        assert_eq!(send(&mut app, line), "ERR Unknown command", "line {line:?}");
    }
    assert_eq!(app.state(), AppState::Idle);
}

// ── State machine ─────────────────────────────────────────────

#[test]
fn arm_then_disarm_round_trips_to_idle() {
    let mut app = make_app(0);
    send(&mut app, "RATE 300");
    send(&mut app, "LED ON");
    let before = *app.context();

    assert_eq!(send(&mut app, "ARM"), "OK ARMED");
    assert_eq!(app.state(), AppState::Armed);
    assert_eq!(send(&mut app, "DISARM"), "OK IDLE");

    let ctx = app.context();
    assert_eq!(ctx.state, AppState::Idle);
    assert_eq!(ctx.telemetry_period_ms, before.telemetry_period_ms);
    assert_eq!(ctx.fault_count, before.fault_count);
    assert_eq!(ctx.indicator_override_active, before.indicator_override_active);
    assert_eq!(ctx.indicator_override_value, before.indicator_override_value);
}

#[test]
fn fault_counts_and_enters_fault() {
    let mut app = make_app(0);
    send(&mut app, "ARM");
    for _ in 0..3 {
        assert_eq!(send(&mut app, "FAULT"), "OK FAULT");
    }
    assert_eq!(app.state(), AppState::Fault);
    assert_eq!(app.context().fault_count, 3);
}

#[test]
fn disarm_clears_fault_state_but_not_the_counter() {
    let mut app = make_app(0);
    send(&mut app, "FAULT");
    assert_eq!(send(&mut app, "DISARM"), "OK IDLE");
    assert_eq!(app.state(), AppState::Idle);
    assert_eq!(app.context().fault_count, 1);
}

#[test]
fn arm_is_accepted_from_fault() {
    let mut app = make_app(0);
    send(&mut app, "FAULT");
    assert_eq!(send(&mut app, "ARM"), "OK ARMED");
    assert_eq!(app.state(), AppState::Armed);
}

#[test]
fn disarm_from_idle_is_harmless() {
    let mut app = make_app(0);
    assert_eq!(send(&mut app, "DISARM"), "OK IDLE");
    assert_eq!(app.state(), AppState::Idle);
}

// ── LED ───────────────────────────────────────────────────────

#[test]
fn led_off_overrides_and_drives_immediately() {
    let mut app = make_app(1000);

    assert_eq!(send(&mut app, "LED OFF"), "OK LED OFF");

    let ctx = app.context();
    assert!(ctx.indicator_override_active);
    assert!(!ctx.indicator_override_value);
    assert_eq!(app.indicator().last_call(), Some(IndicatorCall::Set(false)));
}

#[test]
fn led_on_overrides_and_drives_immediately() {
    let mut app = make_app(0);
    assert_eq!(send(&mut app, "LED   ON"), "OK LED ON");
    assert!(app.context().indicator_override_value);
    assert_eq!(app.indicator().last_call(), Some(IndicatorCall::Set(true)));
}

#[test]
fn led_auto_releases_override_without_driving() {
    let mut app = make_app(0);
    send(&mut app, "LED ON");
    let sets = app.indicator().sets();

    assert_eq!(send(&mut app, "LED AUTO"), "OK LED AUTO");

    assert!(!app.context().indicator_override_active);
    assert_eq!(app.indicator().sets(), sets);
}

#[test]
fn led_bad_argument_changes_nothing() {
    let mut app = make_app(0);
    let before = *app.context();
    for line in ["LED ", "LED on", "LED BLINK", "LED ON "] {
        assert_eq!(send(&mut app, line), "ERR LED expects ON OFF AUTO", "line {line:?}");
    }
    assert_eq!(*app.context(), before);
    assert_eq!(app.indicator().calls, [IndicatorCall::Init]);
}

// ── RATE ──────────────────────────────────────────────────────

#[test]
fn rate_sets_period() {
    let mut app = make_app(0);
    assert_eq!(send(&mut app, "RATE 250"), "OK RATE SET");
    assert_eq!(app.context().telemetry_period_ms.as_ms(), 250);
}

#[test]
fn rate_below_range_is_rejected() {
    let mut app = make_app(0);
    assert_eq!(send(&mut app, "RATE 5"), "ERR RATE out of range (10..60000)");
    assert_eq!(app.context().telemetry_period_ms.as_ms(), 1000);
}

#[test]
fn rate_errors_name_the_specific_reason() {
    let mut app = make_app(0);
    let before = *app.context();

    assert_eq!(send(&mut app, "RATE fast"), "ERR RATE expects an integer");
    assert_eq!(send(&mut app, "RATE "), "ERR RATE expects an integer");
    assert_eq!(send(&mut app, "RATE 100ms"), "ERR RATE expects only an integer");
    assert_eq!(send(&mut app, "RATE -50"), "ERR RATE out of range (10..60000)");
    assert_eq!(send(&mut app, "RATE 60001"), "ERR RATE out of range (10..60000)");

    assert_eq!(*app.context(), before);
}

#[test]
fn rate_tolerates_surrounding_blanks() {
    let mut app = make_app(0);
    assert_eq!(send(&mut app, "RATE \t 60000 \t "), "OK RATE SET");
    assert_eq!(app.context().telemetry_period_ms.as_ms(), 60_000);
}
