//! MQTT transport adapter.
//!
//! Implements [`TransportPort`] on top of the ESP-IDF MQTT client.  The
//! client is created on the first `connect()` and from then on runs its own
//! network task; the connection flag is kept current by the event callback.
//!
//! The adapter owns the station it rides on.  Every `connect()` first asks
//! the [`WifiAdapter`] to re-associate, so a dropped access point is
//! recovered by the link supervisor's ordinary retry loop.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::mqtt::client::EspMqttClient`.
//! - **all other targets**: in-memory broker that records publishes.

use log::{debug, info};

#[cfg(target_os = "espidf")]
use std::sync::Arc;
#[cfg(target_os = "espidf")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};

use super::wifi::WifiAdapter;
use crate::app::ports::TransportPort;
use crate::config::SystemConfig;
use crate::error::CommsError;

/// How long one `connect()` waits for the broker's CONNACK.
#[cfg(target_os = "espidf")]
const CONNACK_WAIT_MS: u32 = 3_000;
#[cfg(target_os = "espidf")]
const CONNACK_POLL_MS: u32 = 100;

pub struct MqttAdapter {
    broker_url: String,
    wifi: WifiAdapter,
    #[cfg(target_os = "espidf")]
    client: Option<EspMqttClient<'static>>,
    #[cfg(target_os = "espidf")]
    connected: Arc<AtomicBool>,

    #[cfg(not(target_os = "espidf"))]
    sim: SimBroker,
}

/// Host-side stand-in for the broker.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimBroker {
    pub connected: bool,
    /// Upcoming `connect()` calls that should fail.
    pub refuse_connects: u32,
    pub connect_calls: u32,
    pub last_client_id: String,
    pub published: Vec<(String, String)>,
}

impl MqttAdapter {
    pub fn new(config: &SystemConfig, wifi: WifiAdapter) -> Self {
        Self {
            broker_url: config.broker_url(),
            wifi,
            #[cfg(target_os = "espidf")]
            client: None,
            #[cfg(target_os = "espidf")]
            connected: Arc::new(AtomicBool::new(false)),
            #[cfg(not(target_os = "espidf"))]
            sim: SimBroker::default(),
        }
    }

    pub fn broker_url(&self) -> &str {
        &self.broker_url
    }

    pub fn wifi_mut(&mut self) -> &mut WifiAdapter {
        &mut self.wifi
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim(&mut self) -> &mut SimBroker {
        &mut self.sim
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn broker_up(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    #[cfg(not(target_os = "espidf"))]
    fn broker_up(&self) -> bool {
        self.sim.connected
    }

    /// Build the client.  A random suffix keeps two hubs on the same
    /// public broker from kicking each other off.
    #[cfg(target_os = "espidf")]
    fn create_client(&mut self, client_id: &str) -> Result<(), CommsError> {
        // SAFETY: esp_random reads the hardware RNG; no preconditions.
        let suffix = unsafe { esp_idf_svc::sys::esp_random() } & 0xFFFF;
        let full_id = format!("{}-{:X}", client_id, suffix);
        let conf = MqttClientConfiguration {
            client_id: Some(&full_id),
            ..Default::default()
        };

        let flag = self.connected.clone();
        let client = EspMqttClient::new_cb(&self.broker_url, &conf, move |event| {
            match event.payload() {
                EventPayload::Connected(_) => flag.store(true, Ordering::Release),
                EventPayload::Disconnected => flag.store(false, Ordering::Release),
                _ => {}
            }
        })
        .map_err(|_| CommsError::BrokerConnectFailed)?;

        info!("MQTT: client '{}' created for {}", full_id, self.broker_url);
        self.client = Some(client);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self, client_id: &str) -> Result<(), CommsError> {
        if self.client.is_none() {
            self.create_client(client_id)?;
        }
        // The client reconnects on its own; wait a bounded time for it.
        let mut waited = 0;
        while !self.is_connected() && waited < CONNACK_WAIT_MS {
            esp_idf_svc::hal::delay::FreeRtos::delay_ms(CONNACK_POLL_MS);
            waited += CONNACK_POLL_MS;
        }
        if self.is_connected() {
            Ok(())
        } else {
            Err(CommsError::BrokerConnectFailed)
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self, client_id: &str) -> Result<(), CommsError> {
        self.sim.connect_calls += 1;
        self.sim.last_client_id = client_id.to_string();
        if self.sim.refuse_connects > 0 {
            self.sim.refuse_connects -= 1;
            return Err(CommsError::BrokerConnectFailed);
        }
        self.sim.connected = true;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_publish(&mut self, topic: &str, payload: &str) -> Result<(), CommsError> {
        let client = self.client.as_mut().ok_or(CommsError::NotConnected)?;
        client
            .enqueue(topic, QoS::AtMostOnce, false, payload.as_bytes())
            .map(|_| ())
            .map_err(|_| CommsError::MqttPublishFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_publish(&mut self, topic: &str, payload: &str) -> Result<(), CommsError> {
        self.sim
            .published
            .push((topic.to_string(), payload.to_string()));
        Ok(())
    }
}

impl TransportPort for MqttAdapter {
    fn is_connected(&self) -> bool {
        self.wifi.is_connected() && self.broker_up()
    }

    fn connect(&mut self, client_id: &str) -> Result<(), CommsError> {
        if !self.wifi.reassociate()? {
            return Err(CommsError::WifiConnectFailed);
        }
        info!("MQTT: connecting to {}", self.broker_url);
        self.platform_connect(client_id)
    }

    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), CommsError> {
        if !self.is_connected() {
            return Err(CommsError::NotConnected);
        }
        self.platform_publish(topic, payload)?;
        debug!("MQTT: -> {} {}", topic, payload);
        Ok(())
    }

    /// The ESP-IDF client services keep-alives from its own task.
    fn pump_upkeep(&mut self) {}
}
