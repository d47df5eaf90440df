//! System configuration parameters
//!
//! Policy thresholds and timings are fixed constants; they are part of the
//! device's behaviour, not tunables.  [`SystemConfig`] only carries the
//! deployment identity (network credentials, broker, client id), with
//! defaults baked in at compile time from the build environment.

use serde::{Deserialize, Serialize};

use crate::error::Error;

// --- Presence ---
/// Distance (cm) beyond which nobody is considered present.
pub const PRESENCE_THRESHOLD_CM: u32 = 100;

// --- Light ---
/// Raw LDR value below which ambient light counts as high.
/// The LDR module reads LOWER when the room is BRIGHTER.
pub const LIGHT_THRESHOLD_HIGH_LIGHT: u16 = 1500;

// --- Climate bands ---
/// Below this temperature (°C) the climate is cold.
pub const TEMP_LOW_THRESHOLD_C: f32 = 20.0;
/// Above this temperature (°C) the climate is hot.
pub const TEMP_HIGH_THRESHOLD_C: f32 = 26.0;

// --- Timing ---
/// Interval between decision cycles (milliseconds).
pub const READ_INTERVAL_MS: u64 = 3_000;
/// Pause between broker reconnect attempts (milliseconds).
pub const RECONNECT_BACKOFF_MS: u32 = 5_000;
/// Poll interval while waiting for the WiFi link (milliseconds).
pub const WIFI_POLL_MS: u32 = 500;
/// Longest echo pulse the ultrasonic driver waits for (microseconds).
/// ~500 cm round trip; beyond the HC-SR04's rated range.
pub const ECHO_TIMEOUT_US: u32 = 30_000;

// --- MQTT topics ---
pub const TOPIC_TELEMETRY: &str = "ecowork/telemetria";
pub const TOPIC_STATUS: &str = "ecowork/status";
pub const TOPIC_ALERT: &str = "ecowork/alerta";

/// Deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- WiFi ---
    pub wifi_ssid: String,
    /// Empty for open networks.
    pub wifi_password: String,

    // --- MQTT ---
    pub broker_host: String,
    pub broker_port: u16,
    pub client_id: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: option_env!("ECOWORK_WIFI_SSID").unwrap_or("Wokwi-GUEST").into(),
            wifi_password: option_env!("ECOWORK_WIFI_PASSWORD").unwrap_or("").into(),
            broker_host: option_env!("ECOWORK_MQTT_HOST")
                .unwrap_or("broker.hivemq.com")
                .into(),
            broker_port: 1883,
            client_id: option_env!("ECOWORK_MQTT_CLIENT_ID")
                .unwrap_or("EcoWorkHubClient")
                .into(),
        }
    }
}

impl SystemConfig {
    /// Reject values the adapters cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.wifi_ssid.is_empty() || self.wifi_ssid.len() > 32 {
            return Err(Error::Config("wifi_ssid must be 1-32 bytes"));
        }
        if !self.wifi_password.is_empty()
            && !(8..=64).contains(&self.wifi_password.len())
        {
            return Err(Error::Config("wifi_password must be empty or 8-64 bytes"));
        }
        if self.broker_host.is_empty() {
            return Err(Error::Config("broker_host is empty"));
        }
        if self.broker_port == 0 {
            return Err(Error::Config("broker_port is 0"));
        }
        if self.client_id.is_empty() || self.client_id.len() > 32 {
            return Err(Error::Config("client_id must be 1-32 bytes"));
        }
        Ok(())
    }

    /// `mqtt://host:port` URL for the broker.
    pub fn broker_url(&self) -> String {
        format!("mqtt://{}:{}", self.broker_host, self.broker_port)
    }
}
