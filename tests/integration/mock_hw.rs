//! Mock adapters for integration tests.
//!
//! Sensors are scripted per cycle, outputs and display writes are recorded,
//! and the broker is an in-memory list so tests can assert on the full
//! history without touching real hardware.

use std::cell::Cell;
use std::collections::VecDeque;

use ecowork::app::events::AppEvent;
use ecowork::app::ports::{
    ActuatorPort, ClimateReading, ClockPort, DisplayPort, DisplayRow, EventSink, OutputChannel,
    SensorPort, TransportPort,
};
use ecowork::error::{CommsError, DisplayError, SensorError};
use embedded_hal::delay::DelayNs;

// ── Sensor script ─────────────────────────────────────────────

/// One cycle's worth of raw inputs.
#[derive(Debug, Clone, Copy)]
pub struct RawInputs {
    pub climate: Result<ClimateReading, SensorError>,
    pub light: u16,
    pub echo_us: Option<u32>,
}

impl RawInputs {
    /// Echo width that estimates to `cm` (midpoint of the bucket).
    pub fn echo_for_cm(cm: u32) -> u32 {
        ((cm as f32 + 0.5) * 2.0 / 0.0343) as u32
    }

    pub fn new(temp: f32, humid: f32, light: u16, distance_cm: Option<u32>) -> Self {
        Self {
            climate: Ok(ClimateReading {
                temperature_c: temp,
                humidity_pct: humid,
            }),
            light,
            echo_us: distance_cm.map(Self::echo_for_cm),
        }
    }
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Inputs for upcoming cycles; the last entry repeats.
    pub script: VecDeque<RawInputs>,
    current: Option<RawInputs>,
    pub calls: Vec<(OutputChannel, bool)>,
    pub levels: [bool; 3],
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(inputs: RawInputs) -> Self {
        Self::scripted([inputs])
    }

    pub fn scripted(inputs: impl IntoIterator<Item = RawInputs>) -> Self {
        Self {
            script: inputs.into_iter().collect(),
            current: None,
            calls: Vec::new(),
            levels: [false; 3],
        }
    }

    pub fn level(&self, channel: OutputChannel) -> bool {
        self.levels[channel as usize]
    }

    fn inputs(&mut self) -> RawInputs {
        if self.script.len() > 1 {
            self.current = self.script.pop_front();
        } else if let Some(last) = self.script.front() {
            self.current = Some(*last);
        }
        self.current.unwrap_or(RawInputs::new(22.0, 50.0, 2000, Some(40)))
    }
}

impl SensorPort for MockHardware {
    /// Climate is read first each cycle, so it advances the script.
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.inputs().climate
    }

    fn read_light_level(&mut self) -> u16 {
        self.current.map_or(0, |i| i.light)
    }

    fn measure_echo_us(&mut self) -> Option<u32> {
        self.current.and_then(|i| i.echo_us)
    }
}

impl ActuatorPort for MockHardware {
    fn set_output(&mut self, channel: OutputChannel, on: bool) {
        self.calls.push((channel, on));
        self.levels[channel as usize] = on;
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub writes: Vec<(DisplayRow, String)>,
    pub fail_next: u32,
}

#[allow(dead_code)]
impl MockDisplay {
    /// Most recent text on `row`.
    pub fn shown(&self, row: DisplayRow) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|(r, _)| *r == row)
            .map(|(_, t)| t.as_str())
    }
}

impl DisplayPort for MockDisplay {
    fn write_line(&mut self, row: DisplayRow, text: &str) -> Result<(), DisplayError> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(DisplayError::Bus);
        }
        self.writes.push((row, text.to_string()));
        Ok(())
    }
}

// ── MockBroker ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockBroker {
    pub connected: bool,
    pub refuse_connects: u32,
    pub connect_calls: u32,
    pub upkeep_calls: u32,
    pub published: Vec<(String, String)>,
}

#[allow(dead_code)]
impl MockBroker {
    pub fn online() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub fn on_topic(&self, topic: &str) -> Vec<&str> {
        self.published
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, p)| p.as_str())
            .collect()
    }
}

impl TransportPort for MockBroker {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self, _client_id: &str) -> Result<(), CommsError> {
        self.connect_calls += 1;
        if self.refuse_connects > 0 {
            self.refuse_connects -= 1;
            return Err(CommsError::BrokerConnectFailed);
        }
        self.connected = true;
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), CommsError> {
        self.published.push((topic.to_string(), payload.to_string()));
        Ok(())
    }

    fn pump_upkeep(&mut self) {
        self.upkeep_calls += 1;
    }
}

// ── Clock, delay, sink ────────────────────────────────────────

#[derive(Default)]
pub struct ManualClock {
    pub ms: Cell<u64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn set_ms(&self, ms: u64) {
        self.ms.set(ms);
    }
}

impl ClockPort for ManualClock {
    fn now_us(&self) -> u64 {
        self.ms.get() * 1000
    }
}

#[derive(Default)]
pub struct RecordingDelay {
    pub total_ms: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += u64::from(ns) / 1_000_000;
    }
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
    }
}

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
