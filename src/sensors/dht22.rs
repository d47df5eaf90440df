//! DHT22 (AM2302) temperature / humidity sensor, single-wire protocol.
//!
//! ```text
//!  host   ▔▔▔╲___________╱▔▔▔▔ release
//!  sensor                 ╲____80µs____╱▔▔▔80µs▔▔▔╲ 40 × (50µs low + 26µs / 70µs high)
//! ```
//!
//! A bit is `1` when its high phase outlasts the preceding low phase.
//! The fifth byte is the 8-bit sum of the first four.
//!
//! The pin must be open-drain with a pull-up: `set_high()` releases the
//! line, `set_low()` drives it.  Timing uses the monotonic [`ClockPort`]
//! so the driver is independent of CPU frequency.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{ClimateReading, ClockPort};
use crate::error::SensorError;

use super::ClimateSensor;

/// Host start signal: hold the line low at least 1 ms.
const START_LOW_US: u32 = 1_100;
/// Pause after releasing the line before listening for the response.
const RELEASE_US: u32 = 40;
/// Longest any single phase may last before the read is abandoned.
/// Also bounds the sensor's response delay (up to 200 µs on the AM2302).
const PULSE_TIMEOUT_US: u64 = 200;

const FRAME_BITS: usize = 40;

/// Validate and decode a raw 5-byte frame.
///
/// Humidity and temperature are big-endian tenths; bit 15 of the
/// temperature word is a sign flag, not two's complement.
pub fn decode_frame(frame: &[u8; 5]) -> Result<ClimateReading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let humidity_raw = u16::from_be_bytes([frame[0], frame[1]]);
    let temp_raw = u16::from_be_bytes([frame[2], frame[3]]);

    let mut temperature_c = f32::from(temp_raw & 0x7FFF) / 10.0;
    if temp_raw & 0x8000 != 0 {
        temperature_c = -temperature_c;
    }

    Ok(ClimateReading {
        temperature_c,
        humidity_pct: f32::from(humidity_raw) / 10.0,
    })
}

pub struct Dht22<P, D, C> {
    pin: P,
    delay: D,
    clock: C,
}

impl<P, D, C> Dht22<P, D, C>
where
    P: InputPin + OutputPin,
    D: DelayNs,
    C: ClockPort,
{
    /// Takes ownership of the data pin and leaves the line released.
    pub fn new(mut pin: P, delay: D, clock: C) -> Result<Self, SensorError> {
        pin.set_high().map_err(|_| SensorError::Gpio)?;
        Ok(Self { pin, delay, clock })
    }

    /// Run one full transaction and decode it.
    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let frame = self.read_frame()?;
        decode_frame(&frame)
    }

    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        self.pin.set_low().map_err(|_| SensorError::Gpio)?;
        self.delay.delay_us(START_LOW_US);
        self.pin.set_high().map_err(|_| SensorError::Gpio)?;
        self.delay.delay_us(RELEASE_US);

        // The sensor may still be deciding to answer; its pull-up high
        // phase is not part of the preamble.
        self.pulse(true)?;

        // Response preamble
        self.pulse(false)?;
        self.pulse(true)?;

        let mut frame = [0u8; 5];
        for bit in 0..FRAME_BITS {
            let low = self.pulse(false)?;
            let high = self.pulse(true)?;
            if high > low {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Time how long the line stays at `level`.
    fn pulse(&mut self, level: bool) -> Result<u64, SensorError> {
        let start = self.clock.now_us();
        loop {
            let high = self.pin.is_high().map_err(|_| SensorError::Gpio)?;
            let elapsed = self.clock.now_us().saturating_sub(start);
            if high != level {
                return Ok(elapsed);
            }
            if elapsed > PULSE_TIMEOUT_US {
                return Err(SensorError::Timeout);
            }
        }
    }
}

impl<P, D, C> ClimateSensor for Dht22<P, D, C>
where
    P: InputPin + OutputPin,
    D: DelayNs,
    C: ClockPort,
{
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.read()
    }
}
