//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the [`AppContext`] and the four collaborators it was
//! built with.  It exposes the three core operations (`init`, `tick`,
//! `handle_command`) plus the host-loop helpers `start` and `poll`.
//!
//! ```text
//!  LineTransport ──▶ ┌────────────────────────┐ ──▶ LineSink
//!                    │       AppService       │
//!      ClockPort ──▶ │ state · timers · cmds  │ ──▶ IndicatorPort
//!                    └────────────────────────┘
//! ```
//!
//! Every call runs to completion in bounded time; nothing here blocks.

use core::fmt::{self, Write};

use heapless::String;
use log::{debug, info, trace, warn};

use crate::config::{BOOT_BANNER, HEARTBEAT_PERIOD_MS, NodeConfig};

use super::commands::{Command, LedMode};
use super::context::AppContext;
use super::ports::{ClockPort, IndicatorPort, LineSink, LineTransport};
use super::reply::{Ack, Reply};
use super::state::AppState;
use super::status::StatusLine;

/// Room for the longest outbound line (help text or a full status reply).
const OUTPUT_CAPACITY: usize = 128;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application core, generic over its collaborators.
pub struct AppService<I, C, T, S> {
    ctx: AppContext,
    config: NodeConfig,
    indicator: I,
    clock: C,
    transport: T,
    sink: S,
}

impl<I, C, T, S> AppService<I, C, T, S>
where
    I: IndicatorPort,
    C: ClockPort,
    T: LineTransport,
    S: LineSink,
{
    /// Bind the collaborators.
    ///
    /// The context stays in `Boot` — call [`init`](Self::init) or
    /// [`start`](Self::start) next.
    pub fn new(config: NodeConfig, indicator: I, clock: C, transport: T, sink: S) -> Self {
        Self {
            ctx: AppContext::booting(0, config.telemetry_period_ms),
            config,
            indicator,
            clock,
            transport,
            sink,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Reset the context for a boot at `now_ms`, initialise the indicator and
    /// enter `Idle`.
    ///
    /// Whatever the context held before, afterwards the state is `Idle`, the
    /// fault counter is zero, the override is off, the telemetry period is the
    /// configured default and all timestamps equal `now_ms`.
    pub fn init(&mut self, now_ms: u32) {
        self.ctx = AppContext::booting(now_ms, self.config.telemetry_period_ms);
        self.indicator.init();
        self.set_state(AppState::Idle);
        info!(
            "app: initialised at {} ms, telemetry every {} ms",
            now_ms, self.ctx.telemetry_period_ms
        );
    }

    /// `init` at the current clock reading, then announce the boot.
    pub fn start(&mut self) {
        let now_ms = self.clock.now_ms();
        self.init(now_ms);
        self.emit(BOOT_BANNER);
        info!("app: started in {}", self.ctx.state);
    }

    /// One host-loop iteration: sample the clock, dispatch at most one line,
    /// then run the periodic checks with the same sample.
    pub fn poll(&mut self) {
        let now_ms = self.clock.now_ms();
        if let Some(line) = self.transport.try_read_line() {
            self.handle_command(&line);
        }
        self.tick(now_ms);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run the indicator and telemetry checks.  They are independent; at most
    /// one telemetry line is written per call.
    pub fn tick(&mut self, now_ms: u32) {
        // 1. Indicator: level-set while overridden, heartbeat otherwise
        if self.ctx.indicator_override_active {
            self.indicator.set(self.ctx.indicator_override_value);
        } else if self.ctx.heartbeat_due(now_ms, HEARTBEAT_PERIOD_MS) {
            self.ctx.last_heartbeat_ms = now_ms;
            self.indicator.toggle();
            debug!("heartbeat at {} ms", now_ms);
        }

        // 2. Telemetry
        if self.ctx.telemetry_due(now_ms) {
            self.ctx.last_telemetry_ms = now_ms;
            let status = StatusLine::capture(&self.ctx, now_ms);
            trace!("telemetry: {}", status);
            self.emit(status);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Interpret one inbound line and write its response to the sink.
    ///
    /// Blank lines produce no response and return `None`.  Rejected lines
    /// produce an `ERR` response and leave the context unchanged.
    pub fn handle_command(&mut self, line: &str) -> Option<Reply> {
        let reply = match Command::parse(line)? {
            Ok(cmd) => {
                debug!("command: {:?}", cmd);
                Reply::Ok(self.execute(cmd))
            }
            Err(e) => {
                warn!("command rejected ({}): {:?}", e, line);
                Reply::Err(e)
            }
        };
        self.emit(reply);
        Some(reply)
    }

    fn execute(&mut self, cmd: Command) -> Ack {
        match cmd {
            Command::Help => Ack::Help,
            Command::Status => {
                let now_ms = self.clock.now_ms();
                Ack::Status(StatusLine::capture(&self.ctx, now_ms))
            }
            Command::Arm => {
                self.set_state(AppState::Armed);
                Ack::Armed
            }
            Command::Disarm => {
                self.set_state(AppState::Idle);
                Ack::Idle
            }
            Command::Fault => {
                self.ctx.fault_count = self.ctx.fault_count.saturating_add(1);
                self.set_state(AppState::Fault);
                Ack::Fault
            }
            Command::Led(mode) => {
                match mode {
                    LedMode::On | LedMode::Off => {
                        let on = mode == LedMode::On;
                        self.ctx.indicator_override_active = true;
                        self.ctx.indicator_override_value = on;
                        self.indicator.set(on);
                    }
                    LedMode::Auto => self.ctx.indicator_override_active = false,
                }
                Ack::Led(mode)
            }
            Command::Rate(period) => {
                self.ctx.telemetry_period_ms = period;
                info!("telemetry period set to {} ms", period);
                Ack::RateSet
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn state(&self) -> AppState {
        self.ctx.state
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Render the status line at `now_ms` without side effects.
    pub fn status(&self, now_ms: u32) -> StatusLine {
        StatusLine::capture(&self.ctx, now_ms)
    }

    // ── Collaborator access ───────────────────────────────────

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut I {
        &mut self.indicator
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ── Internal ──────────────────────────────────────────────

    fn set_state(&mut self, next: AppState) {
        let prev = self.ctx.state;
        self.ctx.state = next;
        if prev != next {
            info!("state {} -> {}", prev, next);
        }
    }

    /// Format `line` into a fixed buffer and hand it to the sink.
    fn emit(&mut self, line: impl fmt::Display) {
        let mut buf: String<OUTPUT_CAPACITY> = String::new();
        if write!(buf, "{line}").is_err() {
            warn!("output line longer than {} bytes dropped", OUTPUT_CAPACITY);
            return;
        }
        self.sink.write_line(&buf);
    }
}
