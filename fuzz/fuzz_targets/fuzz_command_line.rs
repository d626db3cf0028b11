//! Fuzz target: `AppService::handle_command`
//!
//! Feeds arbitrary text to the dispatcher and asserts that it never panics,
//! answers with at most one `OK`/`ERR` line, keeps the telemetry period in
//! range and never lowers the fault count.
//!
//! cargo fuzz run fuzz_command_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use telenode::adapters::clock::ManualClock;
use telenode::adapters::serial::NullLineTransport;
use telenode::app::service::AppService;
use telenode::config::{NodeConfig, TELEMETRY_PERIOD_MAX_MS, TELEMETRY_PERIOD_MIN_MS};
use telenode::drivers::status_led::SimIndicator;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut app = AppService::new(
        NodeConfig::default(),
        SimIndicator::new(),
        ManualClock::new(0),
        NullLineTransport,
        Vec::<String>::new(),
    );
    app.init(0);

    for line in text.split('\n') {
        let faults = app.context().fault_count;
        let before = app.sink().len();

        app.handle_command(line);

        let written = app.sink().len() - before;
        assert!(written <= 1, "more than one reply for {line:?}");
        if let Some(reply) = app.sink().last().filter(|_| written == 1) {
            assert!(reply.starts_with("OK ") || reply.starts_with("ERR "));
        }
        assert!(app.context().fault_count >= faults);
        let period = app.context().telemetry_period_ms.as_ms();
        assert!((TELEMETRY_PERIOD_MIN_MS..=TELEMETRY_PERIOD_MAX_MS).contains(&period));
    }
});
