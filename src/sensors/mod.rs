//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and serves the raw reads behind
//! [`SensorPort`].  Each driver sits behind a one-method trait so the hub
//! can be assembled from real pins on the device and from fakes in tests.

pub mod dht22;
pub mod light;
pub mod ultrasonic;

use log::warn;

use crate::app::ports::{ClimateReading, SensorPort};
use crate::error::SensorError;

/// Temperature / humidity source.
pub trait ClimateSensor {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;
}

/// Time-of-flight source: echo width in µs, `None` when no echo.
pub trait RangeSensor {
    fn echo_us(&mut self) -> Result<Option<u32>, SensorError>;
}

/// Ambient light source: raw ADC counts, lower is brighter.
pub trait LightSource {
    fn light_level(&mut self) -> u16;
}

/// Aggregates all sensor drivers.
pub struct SensorHub<K, L, R> {
    pub climate: K,
    pub light: L,
    pub range: R,
}

impl<K, L, R> SensorHub<K, L, R>
where
    K: ClimateSensor,
    L: LightSource,
    R: RangeSensor,
{
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(climate: K, light: L, range: R) -> Self {
        Self {
            climate,
            light,
            range,
        }
    }
}

impl<K, L, R> SensorPort for SensorHub<K, L, R>
where
    K: ClimateSensor,
    L: LightSource,
    R: RangeSensor,
{
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate.read_climate()
    }

    fn read_light_level(&mut self) -> u16 {
        self.light.light_level()
    }

    /// A GPIO failure on the ranger is reported like a missing echo.
    fn measure_echo_us(&mut self) -> Option<u32> {
        match self.range.echo_us() {
            Ok(echo) => echo,
            Err(e) => {
                warn!("Ultrasonic read failed: {}", e);
                None
            }
        }
    }
}
