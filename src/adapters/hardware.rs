//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the sensor hub and the indicator LEDs, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  The display and the transport
//! are separate adapters because the service borrows them separately.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{ActuatorPort, ClimateReading, OutputChannel, SensorPort};
use crate::drivers::indicator::IndicatorBank;
use crate::error::SensorError;

/// Concrete adapter that combines sensors and outputs behind port traits.
pub struct HardwareAdapter<S, W, R, G> {
    sensors: S,
    indicators: IndicatorBank<W, R, G>,
}

impl<S, W, R, G> HardwareAdapter<S, W, R, G>
where
    S: SensorPort,
    W: OutputPin,
    R: OutputPin,
    G: OutputPin,
{
    pub fn new(sensors: S, indicators: IndicatorBank<W, R, G>) -> Self {
        Self {
            sensors,
            indicators,
        }
    }

    pub fn indicators(&self) -> &IndicatorBank<W, R, G> {
        &self.indicators
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S, W, R, G> SensorPort for HardwareAdapter<S, W, R, G>
where
    S: SensorPort,
    W: OutputPin,
    R: OutputPin,
    G: OutputPin,
{
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.sensors.read_climate()
    }

    fn read_light_level(&mut self) -> u16 {
        self.sensors.read_light_level()
    }

    fn measure_echo_us(&mut self) -> Option<u32> {
        self.sensors.measure_echo_us()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S, W, R, G> ActuatorPort for HardwareAdapter<S, W, R, G>
where
    S: SensorPort,
    W: OutputPin,
    R: OutputPin,
    G: OutputPin,
{
    fn set_output(&mut self, channel: OutputChannel, on: bool) {
        if let Err(e) = self.indicators.set(channel, on) {
            warn!("Output {:?} -> {} failed: {}", channel, on, e);
        }
    }
}
