//! Unified error types for the EcoWork firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they can
//! be passed through port boundaries without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned implausible data.
    Sensor(SensorError),
    /// An indicator output could not be driven.
    Actuator(ActuatorError),
    /// The character display rejected a write.
    Display(DisplayError),
    /// A communication subsystem failed.
    Comms(CommsError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer within its protocol window.
    Timeout,
    /// A DHT22 frame failed its checksum.
    Checksum,
    /// GPIO read or write returned an error.
    Gpio,
    /// ADC read returned an error.
    Adc,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "sensor timed out"),
            Self::Checksum => write!(f, "frame checksum mismatch"),
            Self::Gpio => write!(f, "GPIO access failed"),
            Self::Adc => write!(f, "ADC read failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The I2C transaction to the LCD backpack failed.
    Bus,
    /// The padded line does not fit the row buffer.
    LineTooLong,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "I2C bus error"),
            Self::LineTooLong => write!(f, "line exceeds row buffer"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Driving an output pin failed.
    Gpio,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio => write!(f, "output pin write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    WifiConnectFailed,
    InvalidCredentials,
    BrokerConnectFailed,
    NotConnected,
    MqttPublishFailed,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WifiConnectFailed => write!(f, "WiFi connect failed"),
            Self::InvalidCredentials => write!(f, "invalid WiFi credentials"),
            Self::BrokerConnectFailed => write!(f, "MQTT broker connect failed"),
            Self::NotConnected => write!(f, "transport not connected"),
            Self::MqttPublishFailed => write!(f, "MQTT publish failed"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_subsystem() {
        let e: Error = SensorError::Checksum.into();
        assert_eq!(e.to_string(), "sensor: frame checksum mismatch");
        let e: Error = CommsError::NotConnected.into();
        assert_eq!(e.to_string(), "comms: transport not connected");
        assert_eq!(Error::Config("port").to_string(), "config: port");
    }

    fn step<E>(fail: bool, e: E) -> core::result::Result<(), E> {
        if fail { Err(e) } else { Ok(()) }
    }

    fn bring_up(failing: u8) -> Result<()> {
        step(failing == 0, SensorError::Gpio)?;
        step(failing == 1, ActuatorError::Gpio)?;
        step(failing == 2, DisplayError::Bus)?;
        step(failing == 3, CommsError::WifiConnectFailed)?;
        Ok(())
    }

    #[test]
    fn question_mark_lifts_subsystem_errors() {
        assert_eq!(bring_up(0), Err(Error::Sensor(SensorError::Gpio)));
        assert_eq!(bring_up(1), Err(Error::Actuator(ActuatorError::Gpio)));
        assert_eq!(bring_up(2), Err(Error::Display(DisplayError::Bus)));
        assert_eq!(bring_up(3), Err(Error::Comms(CommsError::WifiConnectFailed)));
        assert_eq!(bring_up(4), Ok(()));
    }

    #[test]
    fn boxes_as_std_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(Error::from(ActuatorError::Gpio));
        assert_eq!(boxed.to_string(), "actuator: output pin write failed");
    }
}
