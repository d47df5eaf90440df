//! Telemetry publisher.
//!
//! Publication order per valid cycle:
//!
//! 1. status (`Presente` / `Ausente`) on [`TOPIC_STATUS`]
//! 2. light alert, then climate alert, on [`TOPIC_ALERT`]
//! 3. the JSON telemetry record on [`TOPIC_TELEMETRY`]
//!
//! Every publish is best-effort.  When the transport is down the message is
//! dropped; the next cycle publishes fresh values anyway.

use log::{debug, warn};
use serde::{Serialize, Serializer};

use crate::app::ports::TransportPort;
use crate::config::{TOPIC_ALERT, TOPIC_STATUS, TOPIC_TELEMETRY};
use crate::decision::{ActuationOutcome, SensorSnapshot};

/// `distancia` value sent when the ultrasonic sensor produced no echo.
pub const DISTANCE_UNKNOWN: i32 = -1;

/// Wire record on `ecowork/telemetria`.  Field names are the ones the
/// dashboard subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryPayload {
    #[serde(rename = "temperatura", serialize_with = "one_decimal")]
    pub temperature_c: f32,
    #[serde(rename = "umidade", serialize_with = "one_decimal")]
    pub humidity_pct: f32,
    #[serde(rename = "luminosidade")]
    pub light_level: u16,
    #[serde(rename = "distancia")]
    pub distance_cm: i32,
}

impl TelemetryPayload {
    pub fn from_snapshot(snapshot: &SensorSnapshot) -> Self {
        Self {
            temperature_c: snapshot.temperature_c,
            humidity_pct: snapshot.humidity_pct,
            light_level: snapshot.light_level,
            distance_cm: snapshot
                .distance_cm
                .map_or(DISTANCE_UNKNOWN, |d| i32::try_from(d).unwrap_or(i32::MAX)),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn one_decimal<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f32((value * 10.0).round() / 10.0)
}

/// Counts from one publication pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub sent: u8,
    pub skipped: u8,
}

/// Stateless publisher; holds nothing between cycles.
#[derive(Debug, Default)]
pub struct TelemetryPublisher;

impl TelemetryPublisher {
    pub fn new() -> Self {
        Self
    }

    /// Publish status, alerts and telemetry for one valid cycle.
    pub fn publish(
        &self,
        snapshot: &SensorSnapshot,
        outcome: &ActuationOutcome,
        transport: &mut impl TransportPort,
    ) -> PublishReport {
        let mut report = PublishReport::default();

        Self::send(transport, TOPIC_STATUS, outcome.status_alert, &mut report);
        for alert in outcome.alerts() {
            Self::send(transport, TOPIC_ALERT, alert, &mut report);
        }

        match TelemetryPayload::from_snapshot(snapshot).to_json() {
            Ok(json) => Self::send(transport, TOPIC_TELEMETRY, &json, &mut report),
            Err(e) => warn!("Telemetry: encode failed: {}", e),
        }

        report
    }

    fn send(
        transport: &mut impl TransportPort,
        topic: &str,
        payload: &str,
        report: &mut PublishReport,
    ) {
        if !transport.is_connected() {
            debug!("Telemetry: offline, dropped '{}'", topic);
            report.skipped += 1;
            return;
        }
        match transport.publish(topic, payload) {
            Ok(()) => report.sent += 1,
            Err(e) => {
                warn!("Telemetry: publish to '{}' failed: {}", topic, e);
                report.skipped += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{Decision, decide};
    use crate::error::CommsError;

    struct FakeTransport {
        connected: bool,
        sent: Vec<(String, String)>,
    }

    impl TransportPort for FakeTransport {
        fn is_connected(&self) -> bool {
            self.connected
        }
        fn connect(&mut self, _client_id: &str) -> Result<(), CommsError> {
            self.connected = true;
            Ok(())
        }
        fn publish(&mut self, topic: &str, payload: &str) -> Result<(), CommsError> {
            self.sent.push((topic.to_string(), payload.to_string()));
            Ok(())
        }
        fn pump_upkeep(&mut self) {}
    }

    fn snap(temp: f32, light: u16, dist: Option<u32>) -> SensorSnapshot {
        SensorSnapshot {
            distance_cm: dist,
            light_level: light,
            temperature_c: temp,
            humidity_pct: 50.0,
        }
    }

    fn outcome_of(s: &SensorSnapshot) -> ActuationOutcome {
        match decide(s) {
            Decision::Actuate(o) => o,
            Decision::SensorFault => panic!("fault"),
        }
    }

    #[test]
    fn payload_wire_format() {
        let p = TelemetryPayload::from_snapshot(&snap(22.0, 1800, Some(40)));
        assert_eq!(
            p.to_json().unwrap(),
            r#"{"temperatura":22.0,"umidade":50.0,"luminosidade":1800,"distancia":40}"#
        );
    }

    #[test]
    fn payload_rounds_to_one_decimal() {
        let mut s = snap(23.46, 1800, Some(40));
        s.humidity_pct = 61.04;
        let json = TelemetryPayload::from_snapshot(&s).to_json().unwrap();
        assert!(json.contains(r#""temperatura":23.5"#), "{json}");
        assert!(json.contains(r#""umidade":61.0"#), "{json}");
    }

    #[test]
    fn unknown_distance_uses_sentinel() {
        let json = TelemetryPayload::from_snapshot(&snap(22.0, 1800, None))
            .to_json()
            .unwrap();
        assert!(json.ends_with(r#""distancia":-1}"#), "{json}");
    }

    #[test]
    fn publishes_status_alerts_then_telemetry() {
        let s = snap(30.0, 1000, Some(40));
        let mut t = FakeTransport { connected: true, sent: Vec::new() };
        let report = TelemetryPublisher::new().publish(&s, &outcome_of(&s), &mut t);
        assert_eq!(report, PublishReport { sent: 4, skipped: 0 });
        let topics: Vec<_> = t.sent.iter().map(|(topic, _)| topic.as_str()).collect();
        assert_eq!(
            topics,
            vec![TOPIC_STATUS, TOPIC_ALERT, TOPIC_ALERT, TOPIC_TELEMETRY]
        );
        assert_eq!(t.sent[0].1, "Presente");
        assert_eq!(t.sent[1].1, "Luz artificial desligada (ambiente claro)");
        assert_eq!(t.sent[2].1, "Clima Quente. AC Ligado.");
    }

    #[test]
    fn absent_cycle_sends_status_and_telemetry_only() {
        let s = snap(27.0, 1000, Some(150));
        let mut t = FakeTransport { connected: true, sent: Vec::new() };
        let report = TelemetryPublisher::new().publish(&s, &outcome_of(&s), &mut t);
        assert_eq!(report.sent, 2);
        assert_eq!(t.sent[0], (TOPIC_STATUS.to_string(), "Ausente".to_string()));
        assert_eq!(t.sent[1].0, TOPIC_TELEMETRY);
    }

    #[test]
    fn offline_transport_drops_everything() {
        let s = snap(22.0, 1800, Some(40));
        let mut t = FakeTransport { connected: false, sent: Vec::new() };
        let report = TelemetryPublisher::new().publish(&s, &outcome_of(&s), &mut t);
        assert_eq!(report, PublishReport { sent: 0, skipped: 3 });
        assert!(t.sent.is_empty());
    }
}
