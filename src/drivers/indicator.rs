//! Indicator LED bank: office light (white), cooling (red), eco (green).
//!
//! Each LED is a plain push-pull output, active high.  The driver keeps
//! the last commanded level so callers can query it without reading the
//! pin back.

use embedded_hal::digital::OutputPin;

use crate::app::ports::OutputChannel;
use crate::error::ActuatorError;

pub struct IndicatorBank<W, R, G> {
    white: W,
    red: R,
    green: G,
    levels: [bool; 3],
}

impl<W, R, G> IndicatorBank<W, R, G>
where
    W: OutputPin,
    R: OutputPin,
    G: OutputPin,
{
    /// Takes the three pins and drives them all low.
    pub fn new(white: W, red: R, green: G) -> Result<Self, ActuatorError> {
        let mut bank = Self {
            white,
            red,
            green,
            levels: [true; 3],
        };
        for channel in [OutputChannel::OfficeLight, OutputChannel::Cooling, OutputChannel::Eco] {
            bank.set(channel, false)?;
        }
        Ok(bank)
    }

    pub fn set(&mut self, channel: OutputChannel, on: bool) -> Result<(), ActuatorError> {
        match channel {
            OutputChannel::OfficeLight => drive(&mut self.white, on),
            OutputChannel::Cooling => drive(&mut self.red, on),
            OutputChannel::Eco => drive(&mut self.green, on),
        }?;
        self.levels[channel as usize] = on;
        Ok(())
    }

    pub fn is_on(&self, channel: OutputChannel) -> bool {
        self.levels[channel as usize]
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) -> Result<(), ActuatorError> {
    let result = if on { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| ActuatorError::Gpio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct Led(Option<bool>);

    impl ErrorType for Led {
        type Error = Infallible;
    }

    impl OutputPin for Led {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0 = Some(false);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0 = Some(true);
            Ok(())
        }
    }

    #[test]
    fn starts_with_every_led_driven_low() {
        let bank = IndicatorBank::new(Led::default(), Led::default(), Led::default()).unwrap();
        assert_eq!(bank.white.0, Some(false));
        assert_eq!(bank.red.0, Some(false));
        assert_eq!(bank.green.0, Some(false));
        assert!(!bank.is_on(OutputChannel::OfficeLight));
    }

    #[test]
    fn channels_map_to_their_pins() {
        let mut bank = IndicatorBank::new(Led::default(), Led::default(), Led::default()).unwrap();
        bank.set(OutputChannel::Cooling, true).unwrap();
        assert_eq!(bank.red.0, Some(true));
        assert_eq!(bank.white.0, Some(false));
        assert_eq!(bank.green.0, Some(false));
        assert!(bank.is_on(OutputChannel::Cooling));
    }
}
