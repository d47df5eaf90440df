//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the cycle scheduler, the broker link supervisor, the
//! display renderer and the telemetry publisher.  It exposes a clean,
//! hardware-agnostic API.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ DisplayPort
//!                 │        AppService         │
//! ActuatorPort ◀──│ Scheduler · decide() ·    │ ──▶ TransportPort
//!   ClockPort ──▶ │ Renderer · Publisher      │ ──▶ EventSink
//!                 └──────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::{READ_INTERVAL_MS, RECONNECT_BACKOFF_MS, SystemConfig};
use crate::decision::distance::estimate_cm;
use crate::decision::{ActuationOutcome, Decision, SensorSnapshot, decide};
use crate::error::SensorError;
use crate::link::{LinkState, LinkSupervisor};
use crate::render::DisplayRenderer;
use crate::scheduler::Scheduler;
use crate::telemetry::{PublishReport, TelemetryPublisher};

use super::events::{AppEvent, CycleSummary};
use super::ports::{
    ActuatorPort, ClockPort, DisplayPort, EventSink, OutputChannel, SensorPort, TransportPort,
};

/// Boot splash, shown until the first cycle runs.
pub const SPLASH_LINE1: &str = "EcoWork Hub";
pub const SPLASH_LINE2: &str = "Iniciando...";

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
///
/// `D` is the delay used for the blocking reconnect pause.
pub struct AppService<D> {
    scheduler: Scheduler,
    link: LinkSupervisor<D>,
    renderer: DisplayRenderer,
    publisher: TelemetryPublisher,
    cycle_count: u64,
}

impl<D: DelayNs> AppService<D> {
    /// Construct the service.  Does **not** touch the display; call
    /// [`start`](Self::start) next.
    pub fn new(config: &SystemConfig, delay: D) -> Self {
        Self {
            scheduler: Scheduler::new(READ_INTERVAL_MS),
            link: LinkSupervisor::new(config.client_id.as_str(), RECONNECT_BACKOFF_MS, delay),
            renderer: DisplayRenderer::new(),
            publisher: TelemetryPublisher::new(),
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the boot splash.
    pub fn start(&mut self, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        self.renderer.render(SPLASH_LINE1, SPLASH_LINE2, display);
        sink.emit(&AppEvent::Started);
        info!("AppService started (cycle every {} ms)", self.scheduler.interval_ms());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One pass of the main loop: keep the broker link up, service the
    /// transport, then run a decision cycle if one is due.
    ///
    /// Returns `true` when a cycle ran.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        transport: &mut impl TransportPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> bool {
        self.link.ensure_connected(transport, sink);
        transport.pump_upkeep();

        if !self.scheduler.tick(clock.now_ms()) {
            return false;
        }
        self.run_cycle(hw, display, transport, sink);
        true
    }

    /// Run one full cycle: acquire → decide → render → actuate → publish.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        transport: &mut impl TransportPort,
        sink: &mut impl EventSink,
    ) -> Decision {
        self.cycle_count += 1;

        // 1. Acquire
        let (snapshot, climate_error) = acquire(hw);

        // 2. Decide
        let decision = decide(&snapshot);

        // 3. Render
        let (line1, line2) = decision.lines();
        let rows_written = self.renderer.render(line1, line2, display);

        // 4. Actuate + publish
        let report = match decision.outcome() {
            Some(outcome) => {
                apply_actuators(outcome, hw);
                self.publisher.publish(&snapshot, outcome, transport)
            }
            None => {
                warn!("Climate sensor read failed, skipping actuation and publication");
                sink.emit(&AppEvent::SensorFault { cause: climate_error });
                PublishReport::default()
            }
        };

        debug!(
            "Dist: {:?}cm | Luz: {} | Temp: {:.1}C | LCD1: {} | LCD2: {}",
            snapshot.distance_cm, snapshot.light_level, snapshot.temperature_c, line1, line2
        );

        sink.emit(&AppEvent::CycleCompleted(CycleSummary {
            cycle: self.cycle_count,
            snapshot,
            decision,
            rows_written,
            published: report.sent,
            skipped: report.skipped,
        }));

        decision
    }

    // ── Queries ───────────────────────────────────────────────

    /// Total decision cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn link_state(&self) -> LinkState {
        self.link.state()
    }

    /// The renderer, for inspecting what the display currently shows.
    pub fn renderer(&self) -> &DisplayRenderer {
        &self.renderer
    }
}

// ── Internal ──────────────────────────────────────────────────

/// Read every input once.  A failed climate read becomes NaN readings so
/// the decision engine sees it; the error itself is handed back for the
/// fault event.
fn acquire(hw: &mut impl SensorPort) -> (SensorSnapshot, Option<SensorError>) {
    let (temperature_c, humidity_pct, climate_error) = match hw.read_climate() {
        Ok(r) => (r.temperature_c, r.humidity_pct, None),
        Err(e) => {
            warn!("DHT22 read failed: {}", e);
            (f32::NAN, f32::NAN, Some(e))
        }
    };
    let light_level = hw.read_light_level();
    let distance_cm = estimate_cm(hw.measure_echo_us());

    (
        SensorSnapshot {
            distance_cm,
            light_level,
            temperature_c,
            humidity_pct,
        },
        climate_error,
    )
}

/// Translate an outcome into output levels.
fn apply_actuators(outcome: &ActuationOutcome, hw: &mut impl ActuatorPort) {
    if !outcome.presence {
        hw.all_off();
        return;
    }
    hw.set_output(OutputChannel::OfficeLight, outcome.white_led_on);
    hw.set_output(OutputChannel::Cooling, outcome.climate_mode.cooling_on());
    hw.set_output(OutputChannel::Eco, outcome.climate_mode.eco_on());
}
