//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, LEDs, LCD, MQTT, clock, event sinks) implement
//! these traits.  The [`AppService`](super::service::AppService) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::error::{CommsError, DisplayError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One temperature/humidity sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Read-side port: raw acquisition for one cycle.
pub trait SensorPort {
    /// Read the DHT22.
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;

    /// Raw LDR level (0 – 4095, lower = brighter).
    fn read_light_level(&mut self) -> u16;

    /// Round-trip ultrasonic echo duration in µs, or `None` when no echo
    /// arrived before the driver's timeout.  Blocks for at most that timeout.
    fn measure_echo_us(&mut self) -> Option<u32>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The three independent binary outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputChannel {
    /// White LED: office light.
    OfficeLight,
    /// Red LED: air conditioning.
    Cooling,
    /// Green LED: eco mode / fan.
    Eco,
}

/// Write-side port: the domain calls this to command outputs.
pub trait ActuatorPort {
    fn set_output(&mut self, channel: OutputChannel, on: bool);

    /// Every output off.
    fn all_off(&mut self) {
        self.set_output(OutputChannel::OfficeLight, false);
        self.set_output(OutputChannel::Cooling, false);
        self.set_output(OutputChannel::Eco, false);
    }
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Row of the 16x2 character display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRow {
    Top = 0,
    Bottom = 1,
}

/// Character display: write a whole row starting at column 0.
pub trait DisplayPort {
    fn write_line(&mut self, row: DisplayRow, text: &str) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Transport port (MQTT)
// ───────────────────────────────────────────────────────────────

/// Message transport to the broker.
pub trait TransportPort {
    fn is_connected(&self) -> bool;

    /// One connection attempt under `client_id`.
    fn connect(&mut self, client_id: &str) -> Result<(), CommsError>;

    /// Fire-and-forget publish.
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), CommsError>;

    /// Service keep-alives and inbound traffic.  Called every loop tick.
    fn pump_upkeep(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time since boot.
pub trait ClockPort {
    fn now_us(&self) -> u64;

    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
