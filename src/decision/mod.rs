//! Decision engine: maps one [`SensorSnapshot`] to a [`Decision`].
//!
//! ```text
//!  snapshot ──▶ climate valid? ──no──▶ SensorFault
//!                    │yes
//!                    ▼
//!              present? ──no──▶ standby (everything off)
//!                    │yes
//!                    ▼
//!              light rule + climate rule ──▶ Actuate(outcome)
//! ```
//!
//! Pure: no I/O, no state between calls.  Thresholds live in
//! [`crate::config`] and are compared with the exact operators below;
//! bands are disjoint and evaluated in a fixed order.

pub mod distance;
pub mod snapshot;

pub use snapshot::{ActuationOutcome, ClimateMode, Decision, SensorSnapshot};

use crate::config::{
    LIGHT_THRESHOLD_HIGH_LIGHT, PRESENCE_THRESHOLD_CM, TEMP_HIGH_THRESHOLD_C,
    TEMP_LOW_THRESHOLD_C,
};

// ---------------------------------------------------------------------------
// Display lines and messages
// ---------------------------------------------------------------------------

pub const FAULT_LINE1: &str = "Falha no Sensor";
pub const FAULT_LINE2: &str = "Verificar DHT22";

pub const STANDBY_LINE1: &str = "Ninguem por perto";
pub const STANDBY_LINE2: &str = "Modo Standby";

pub const HIGH_LIGHT_LINE: &str = "Luz alta, Lmp OFF";
pub const LOW_LIGHT_LINE: &str = "Luz baixa, Lmp ON";

pub const COLD_LINE: &str = "Frio. AC Desligado";
pub const HOT_LINE: &str = "Calor. AC Ligado";
pub const COMFORT_LINE: &str = "Temp OK. Modo Eco";

pub const STATUS_PRESENT: &str = "Presente";
pub const STATUS_ABSENT: &str = "Ausente";

pub const ALERT_HIGH_LIGHT: &str = "Luz artificial desligada (ambiente claro)";
pub const ALERT_COLD: &str = "Clima Frio. AC Desligado.";
pub const ALERT_HOT: &str = "Clima Quente. AC Ligado.";
pub const ALERT_COMFORT: &str = "Clima Confortavel. Modo Eco.";

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Decide what this cycle does.
pub fn decide(snapshot: &SensorSnapshot) -> Decision {
    if !snapshot.climate_valid() {
        return Decision::SensorFault;
    }

    if !is_present(snapshot.distance_cm) {
        return Decision::Actuate(ActuationOutcome {
            presence: false,
            white_led_on: false,
            climate_mode: ClimateMode::Off,
            line1: STANDBY_LINE1,
            line2: STANDBY_LINE2,
            status_alert: STATUS_ABSENT,
            climate_alert: None,
            light_alert: None,
        });
    }

    let (white_led_on, line1, light_alert) = light_rule(snapshot.light_level);
    let (climate_mode, line2, climate_alert) = climate_rule(snapshot.temperature_c);

    Decision::Actuate(ActuationOutcome {
        presence: true,
        white_led_on,
        climate_mode,
        line1,
        line2,
        status_alert: STATUS_PRESENT,
        climate_alert: Some(climate_alert),
        light_alert,
    })
}

/// An unknown distance counts as absent.
fn is_present(distance_cm: Option<u32>) -> bool {
    distance_cm.is_some_and(|d| d <= PRESENCE_THRESHOLD_CM)
}

fn light_rule(light_level: u16) -> (bool, &'static str, Option<&'static str>) {
    if light_level < LIGHT_THRESHOLD_HIGH_LIGHT {
        (false, HIGH_LIGHT_LINE, Some(ALERT_HIGH_LIGHT))
    } else {
        (true, LOW_LIGHT_LINE, None)
    }
}

fn climate_rule(temperature_c: f32) -> (ClimateMode, &'static str, &'static str) {
    if temperature_c < TEMP_LOW_THRESHOLD_C {
        (ClimateMode::Off, COLD_LINE, ALERT_COLD)
    } else if temperature_c > TEMP_HIGH_THRESHOLD_C {
        (ClimateMode::Cooling, HOT_LINE, ALERT_HOT)
    } else {
        (ClimateMode::Eco, COMFORT_LINE, ALERT_COMFORT)
    }
}
