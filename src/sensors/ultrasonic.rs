//! HC-SR04 ultrasonic ranger.
//!
//! A 10 µs trigger pulse starts a measurement; the sensor answers with an
//! echo pulse whose width is the sound round-trip time.  Conversion to
//! centimetres happens in [`crate::decision::distance`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::ClockPort;
use crate::error::SensorError;

use super::RangeSensor;

const TRIGGER_SETTLE_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;

pub struct Ultrasonic<T, E, D, C> {
    trig: T,
    echo: E,
    delay: D,
    clock: C,
    timeout_us: u32,
}

impl<T, E, D, C> Ultrasonic<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: ClockPort,
{
    /// `timeout_us` bounds the whole wait, from trigger to falling edge.
    pub fn new(trig: T, echo: E, delay: D, clock: C, timeout_us: u32) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            timeout_us,
        }
    }

    /// Fire once and time the echo.  `Ok(None)` when nothing came back
    /// in time.
    pub fn measure(&mut self) -> Result<Option<u32>, SensorError> {
        self.trig.set_low().map_err(|_| SensorError::Gpio)?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trig.set_high().map_err(|_| SensorError::Gpio)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trig.set_low().map_err(|_| SensorError::Gpio)?;

        let deadline = self.clock.now_us() + u64::from(self.timeout_us);

        // A previous echo may still be high.
        if !self.wait_for(false, deadline)? {
            return Ok(None);
        }
        if !self.wait_for(true, deadline)? {
            return Ok(None);
        }
        let rise = self.clock.now_us();
        if !self.wait_for(false, deadline)? {
            return Ok(None);
        }
        let width = self.clock.now_us().saturating_sub(rise);
        Ok(Some(u32::try_from(width).unwrap_or(u32::MAX)))
    }

    /// Spin until the echo line reads `level`.  `false` on deadline.
    fn wait_for(&mut self, level: bool, deadline: u64) -> Result<bool, SensorError> {
        loop {
            if self.echo.is_high().map_err(|_| SensorError::Gpio)? == level {
                return Ok(true);
            }
            if self.clock.now_us() >= deadline {
                return Ok(false);
            }
        }
    }
}

impl<T, E, D, C> RangeSensor for Ultrasonic<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: ClockPort,
{
    fn echo_us(&mut self) -> Result<Option<u32>, SensorError> {
        self.measure()
    }
}
