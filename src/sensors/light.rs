//! Photoresistor (LDR) light sensor.
//!
//! Wired as a divider so the ADC reading falls as the room gets brighter.
//! Raw 12-bit counts are returned untouched; the decision engine compares
//! them against [`crate::config::LIGHT_THRESHOLD_HIGH_LIGHT`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use log::warn;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

use super::LightSource;

static SIM_LIGHT_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_light_adc(raw: u16) {
    SIM_LIGHT_ADC.store(raw, Ordering::Relaxed);
}

/// Full-scale reading of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

pub struct LightSensor {
    /// Last good reading, served again when the ADC errors.
    last: u16,
    _adc_gpio: i32,
}

impl LightSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            last: ADC_MAX,
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&mut self) -> u16 {
        match self.read_adc() {
            Ok(raw) => self.last = raw.min(ADC_MAX),
            Err(e) => warn!("LDR read failed ({}), keeping {}", e, self.last),
        }
        self.last
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(hw_init::ADC1_CH_LIGHT)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        Ok(SIM_LIGHT_ADC.load(Ordering::Relaxed))
    }
}

impl LightSource for LightSensor {
    fn light_level(&mut self) -> u16 {
        self.read()
    }
}
