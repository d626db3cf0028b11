//! Integration tests for the init → tick pipeline: lifecycle, heartbeat
//! gating, indicator override and telemetry timing.

use telenode::app::state::AppState;
use telenode::config::{NodeConfig, TelemetryPeriod};

use super::mock_hw::{IndicatorCall, make_app, make_app_with};

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn init_enters_idle_with_boot_timestamp() {
    let app = make_app(1000);

    assert_eq!(app.state(), AppState::Idle);
    let ctx = app.context();
    assert_eq!(ctx.boot_ms, 1000);
    assert_eq!(ctx.last_heartbeat_ms, 1000);
    assert_eq!(ctx.last_telemetry_ms, 1000);
    assert_eq!(ctx.fault_count, 0);
    assert_eq!(ctx.telemetry_period_ms.as_ms(), 1000);
    assert_eq!(app.indicator().calls, [IndicatorCall::Init]);
    assert!(app.sink().lines.is_empty(), "init itself writes nothing");
}

#[test]
fn init_resets_whatever_the_context_held() {
    let mut app = make_app(0);
    app.handle_command("FAULT");
    app.handle_command("LED ON");
    app.handle_command("RATE 20");
    app.tick(5000);

    app.init(7777);

    let ctx = app.context();
    assert_eq!(ctx.state, AppState::Idle);
    assert_eq!(ctx.fault_count, 0);
    assert!(!ctx.indicator_override_active);
    assert_eq!(ctx.telemetry_period_ms.as_ms(), 1000);
    assert_eq!(ctx.boot_ms, 7777);
    assert_eq!(ctx.last_heartbeat_ms, 7777);
    assert_eq!(ctx.last_telemetry_ms, 7777);
}

#[test]
fn init_uses_configured_default_period() {
    let config = NodeConfig {
        telemetry_period_ms: TelemetryPeriod::new(200).unwrap(),
    };
    let mut app = make_app_with(config, 0);
    app.handle_command("RATE 5000");
    app.init(0);
    assert_eq!(app.context().telemetry_period_ms.as_ms(), 200);
}

#[test]
fn start_announces_boot_after_init() {
    let mut app = make_app(0);
    app.clock_mut().now_ms = 42;
    app.start();

    assert_eq!(app.sink().lines, ["BOOT OK"]);
    assert_eq!(app.context().boot_ms, 42);
    assert_eq!(app.state(), AppState::Idle);
}

// ── Heartbeat ─────────────────────────────────────────────────

#[test]
fn heartbeat_toggles_when_period_elapsed() {
    let mut app = make_app(2000);
    app.indicator_mut().clear();

    app.tick(4001);

    assert_eq!(app.indicator().calls, [IndicatorCall::Toggle]);
    assert_eq!(app.context().last_heartbeat_ms, 4001);
}

#[test]
fn heartbeat_waits_for_full_period() {
    let mut app = make_app(0);
    app.indicator_mut().clear();

    app.tick(1999);
    assert_eq!(app.indicator().toggles(), 0);
    app.tick(2000);
    assert_eq!(app.indicator().toggles(), 1);
    app.tick(3999);
    assert_eq!(app.indicator().toggles(), 1);
    app.tick(4000);
    assert_eq!(app.indicator().toggles(), 2);
}

#[test]
fn heartbeat_survives_counter_wraparound() {
    let mut app = make_app(u32::MAX - 999);
    app.indicator_mut().clear();

    app.tick(999);
    assert_eq!(app.indicator().toggles(), 0);
    app.tick(1000);
    assert_eq!(app.indicator().toggles(), 1);
    assert_eq!(app.context().last_heartbeat_ms, 1000);
}

// ── Indicator override ────────────────────────────────────────

#[test]
fn override_drives_level_every_tick_and_suppresses_heartbeat() {
    let mut app = make_app(0);
    app.handle_command("LED ON");
    app.indicator_mut().clear();

    app.tick(10);
    app.tick(20);
    app.tick(5000);

    assert_eq!(app.indicator().calls, [IndicatorCall::Set(true); 3]);
    assert_eq!(app.context().last_heartbeat_ms, 0, "heartbeat timer is frozen");
}

#[test]
fn led_auto_hands_control_back_to_heartbeat() {
    let mut app = make_app(0);
    app.handle_command("LED OFF");
    app.tick(1000);
    app.handle_command("LED AUTO");
    app.indicator_mut().clear();

    app.tick(2500);

    assert_eq!(app.indicator().calls, [IndicatorCall::Toggle]);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_emits_status_line_when_due() {
    let mut app = make_app(1000);

    app.tick(1999);
    assert!(app.sink().lines.is_empty());

    app.tick(2000);
    assert_eq!(
        app.sink().lines,
        ["STATE=1 1000 TELEMETRY_MS=1000 HEARTBEAT_MS=2000 FAULTS=0"]
    );
    assert_eq!(app.context().last_telemetry_ms, 2000);
}

#[test]
fn telemetry_follows_rate_changes() {
    let mut app = make_app(0);
    app.handle_command("RATE 250");
    app.sink_mut().clear();

    for now in (0..=1000).step_by(50) {
        app.tick(now);
    }

    // Fires at 250, 500, 750 and 1000.
    assert_eq!(app.sink().lines.len(), 4);
    assert!(app.sink().lines.iter().all(|l| l.contains("TELEMETRY_MS=250")));
}

#[test]
fn telemetry_emits_at_most_one_line_per_tick() {
    let mut app = make_app(0);
    app.handle_command("RATE 10");
    app.sink_mut().clear();

    app.tick(60_000);

    assert_eq!(app.sink().lines.len(), 1);
    assert_eq!(app.context().last_telemetry_ms, 60_000);
}

#[test]
fn telemetry_reports_fault_state_and_count() {
    let mut app = make_app(0);
    app.handle_command("FAULT");
    app.handle_command("FAULT");
    app.sink_mut().clear();

    app.tick(1000);

    assert_eq!(
        app.sink().last(),
        Some("STATE=3 1000 TELEMETRY_MS=1000 HEARTBEAT_MS=2000 FAULTS=2")
    );
}
