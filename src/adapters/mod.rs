//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to              |
//! |------------|--------------------|--------------------------|
//! | `hardware` | SensorPort         | DHT22, LDR, HC-SR04      |
//! |            | ActuatorPort       | Indicator LEDs (GPIO)    |
//! | `log_sink` | EventSink          | Serial log output        |
//! | `mqtt`     | TransportPort      | ESP-IDF MQTT client      |
//! | `time`     | ClockPort          | ESP32 system timer       |
//! | `wifi`     | (none)             | ESP-IDF WiFi STA         |
//!
//! The LCD driver implements `DisplayPort` directly (see
//! [`crate::drivers::lcd1602`]).

pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod time;
pub mod wifi;
