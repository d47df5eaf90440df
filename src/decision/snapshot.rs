//! Per-cycle data: the sensor snapshot going in and the outcome coming out.
//!
//! Both are created fresh every cycle and dropped once the outcome has been
//! rendered, actuated and published.  Nothing here outlives a cycle.

// ---------------------------------------------------------------------------
// Sensor snapshot
// ---------------------------------------------------------------------------

/// A point-in-time read of every input, taken once per decision cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSnapshot {
    /// Estimated distance to the nearest object (cm).  `None` when the
    /// ultrasonic sensor produced no echo.
    pub distance_cm: Option<u32>,
    /// Raw LDR reading (0 – 4095).  Lower = brighter.
    pub light_level: u16,
    /// Air temperature (°C).  NaN when the DHT22 read failed.
    pub temperature_c: f32,
    /// Relative humidity (%).  NaN when the DHT22 read failed.
    pub humidity_pct: f32,
}

impl SensorSnapshot {
    /// Both climate readings are usable numbers.
    pub fn climate_valid(&self) -> bool {
        self.temperature_c.is_finite() && self.humidity_pct.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Climate indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateMode {
    /// Both climate indicators off (cold, or nobody present).
    Off,
    /// Active cooling: red indicator on.
    Cooling,
    /// Comfortable: green eco/fan indicator on.
    Eco,
}

impl ClimateMode {
    /// Cooling indicator level for this mode.
    pub fn cooling_on(self) -> bool {
        matches!(self, Self::Cooling)
    }

    /// Eco/fan indicator level for this mode.
    pub fn eco_on(self) -> bool {
        matches!(self, Self::Eco)
    }
}

/// Everything one valid-sensor cycle commands: actuator levels, the two
/// display lines and the messages to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuationOutcome {
    pub presence: bool,
    pub white_led_on: bool,
    pub climate_mode: ClimateMode,
    pub line1: &'static str,
    pub line2: &'static str,
    /// Published on the status topic every valid cycle.
    pub status_alert: &'static str,
    pub climate_alert: Option<&'static str>,
    pub light_alert: Option<&'static str>,
}

impl ActuationOutcome {
    /// Alerts in publication order: light first, then climate.
    pub fn alerts(&self) -> impl Iterator<Item = &'static str> {
        self.light_alert.into_iter().chain(self.climate_alert)
    }
}

/// Result of one decision cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The climate sensor failed.  Show the fault lines; command nothing and
    /// publish nothing this cycle.
    SensorFault,
    /// Valid sensors: apply the outcome.
    Actuate(ActuationOutcome),
}

impl Decision {
    /// The two display lines for this decision.
    pub fn lines(&self) -> (&'static str, &'static str) {
        match self {
            Self::SensorFault => (super::FAULT_LINE1, super::FAULT_LINE2),
            Self::Actuate(o) => (o.line1, o.line2),
        }
    }

    /// The actuation outcome, unless this is a sensor fault.
    pub fn outcome(&self) -> Option<&ActuationOutcome> {
        match self {
            Self::SensorFault => None,
            Self::Actuate(o) => Some(o),
        }
    }
}
