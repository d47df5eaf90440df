//! WiFi station-mode adapter.
//!
//! Brings the station up at boot and blocks until the access point has
//! associated and handed out an address, polling every [`WIFI_POLL_MS`].
//! The ESP-IDF station does not re-associate by itself after the AP
//! drops, so the MQTT adapter calls [`WifiAdapter::reassociate`] before
//! each broker connect attempt.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

use crate::config::{SystemConfig, WIFI_POLL_MS};
use crate::error::CommsError;

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connecting,
    Connected,
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), CommsError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(CommsError::InvalidCredentials);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), CommsError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(CommsError::InvalidCredentials);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    #[cfg(target_os = "espidf")]
    wifi: BlockingWifi<EspWifi<'static>>,
    /// Simulation: polls left before the link reports up.
    #[cfg(not(target_os = "espidf"))]
    sim_polls_until_up: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_link_up: bool,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: BlockingWifi<EspWifi<'static>>) -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            wifi,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            sim_polls_until_up: 0,
            sim_link_up: false,
        }
    }

    /// Make the simulated access point take `polls` poll intervals to
    /// associate.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_polls_until_up(&mut self, polls: u32) {
        self.sim_polls_until_up = polls;
    }

    /// Simulate the access point going away.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_drop_link(&mut self) {
        self.sim_link_up = false;
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    pub fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), CommsError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid.push_str(ssid).map_err(|_| CommsError::InvalidCredentials)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|_| CommsError::InvalidCredentials)?;
        info!("WiFi: credentials updated (SSID='{}')", self.ssid);
        Ok(())
    }

    /// Load the credentials carried by `config`.
    pub fn configure(&mut self, config: &SystemConfig) -> Result<(), CommsError> {
        self.set_credentials(&config.wifi_ssid, &config.wifi_password)
    }

    /// Start the station and block until it is up, polling every
    /// [`WIFI_POLL_MS`].  There is no attempt limit.
    pub fn connect_blocking(&mut self, delay: &mut impl DelayNs) -> Result<(), CommsError> {
        if self.ssid.is_empty() {
            return Err(CommsError::InvalidCredentials);
        }

        info!("WiFi: connecting to '{}'", self.ssid);
        self.state = WifiState::Connecting;
        self.platform_start()?;

        let mut polls: u32 = 0;
        while !self.platform_is_up() {
            polls += 1;
            if polls % 10 == 0 {
                info!("WiFi: still waiting for '{}' ({} ms)", self.ssid, polls * WIFI_POLL_MS);
            }
            delay.delay_ms(WIFI_POLL_MS);
        }

        self.state = WifiState::Connected;
        info!("WiFi: connected to '{}'", self.ssid);
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.state == WifiState::Connected && self.platform_is_up_now()
    }

    /// Non-blocking recovery after an AP drop: re-issue the association
    /// request and report whether the link is up right now.
    ///
    /// Called once per broker connect attempt, so the request is repeated
    /// at the reconnect backoff until the access point answers.
    pub fn reassociate(&mut self) -> Result<bool, CommsError> {
        if self.is_connected() {
            return Ok(true);
        }
        if self.ssid.is_empty() {
            return Err(CommsError::InvalidCredentials);
        }
        if self.state == WifiState::Connected {
            warn!("WiFi: link to '{}' lost", self.ssid);
        }
        self.state = WifiState::Connecting;
        self.platform_reconnect()?;

        if self.platform_is_up() {
            self.state = WifiState::Connected;
            info!("WiFi: re-associated with '{}'", self.ssid);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self) -> Result<(), CommsError> {
        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self.ssid.clone(),
            password: self.password.clone(),
            auth_method,
            ..Default::default()
        });
        self.wifi
            .set_configuration(&config)
            .map_err(|_| CommsError::WifiConnectFailed)?;
        if !self.wifi.is_started().unwrap_or(false) {
            self.wifi.start().map_err(|_| CommsError::WifiConnectFailed)?;
        }
        // Non-blocking association request; progress is polled below.
        self.wifi
            .wifi_mut()
            .connect()
            .map_err(|_| CommsError::WifiConnectFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self) -> Result<(), CommsError> {
        info!("WiFi(sim): station started");
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_reconnect(&mut self) -> Result<(), CommsError> {
        self.wifi
            .wifi_mut()
            .connect()
            .map_err(|_| CommsError::WifiConnectFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_reconnect(&mut self) -> Result<(), CommsError> {
        info!("WiFi(sim): association requested");
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_up(&mut self) -> bool {
        self.platform_is_up_now()
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_up(&mut self) -> bool {
        if self.sim_polls_until_up == 0 {
            self.sim_link_up = true;
            return true;
        }
        self.sim_polls_until_up -= 1;
        false
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_up_now(&self) -> bool {
        self.wifi.is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_up_now(&self) -> bool {
        self.sim_link_up
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
