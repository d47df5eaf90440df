//! Fuzz target: decision engine + renderer
//!
//! Builds a snapshot from raw bytes (including NaN / infinite floats) and
//! verifies:
//! - `decide` never panics
//! - Non-finite climate readings always yield a sensor fault
//! - Absence never leaves an output on
//! - Both display lines always fit the LCD row buffer
//!
//! cargo fuzz run fuzz_decide

#![no_main]

use ecowork::app::ports::{DisplayPort, DisplayRow};
use ecowork::decision::{ClimateMode, Decision, SensorSnapshot, decide};
use ecowork::error::DisplayError;
use ecowork::render::DisplayRenderer;
use libfuzzer_sys::fuzz_target;

struct Sink;

impl DisplayPort for Sink {
    fn write_line(&mut self, _row: DisplayRow, text: &str) -> Result<(), DisplayError> {
        assert!(text.len() <= 40);
        Ok(())
    }
}

fuzz_target!(|input: (Option<u32>, u16, u32, u32)| {
    let (distance_cm, light_level, temp_bits, humid_bits) = input;
    let snapshot = SensorSnapshot {
        distance_cm,
        light_level,
        temperature_c: f32::from_bits(temp_bits),
        humidity_pct: f32::from_bits(humid_bits),
    };

    let decision = decide(&snapshot);
    if !snapshot.climate_valid() {
        assert_eq!(decision, Decision::SensorFault);
    }
    if let Decision::Actuate(o) = decision {
        if !o.presence {
            assert!(!o.white_led_on);
            assert_eq!(o.climate_mode, ClimateMode::Off);
        }
    }

    let (l1, l2) = decision.lines();
    DisplayRenderer::new().render(l1, l2, &mut Sink);
});
