//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to the UART console in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::decision::Decision;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | EcoWork Hub"),
            AppEvent::CycleCompleted(c) => {
                let s = &c.snapshot;
                let mode = match &c.decision {
                    Decision::SensorFault => "fault".to_string(),
                    Decision::Actuate(o) if !o.presence => "standby".to_string(),
                    Decision::Actuate(o) => format!(
                        "light={} climate={:?}",
                        if o.white_led_on { "ON" } else { "OFF" },
                        o.climate_mode
                    ),
                };
                info!(
                    "CYCLE #{} | dist={} | light={} | T={:.1}\u{00b0}C RH={:.1}% | {} | \
                     lcd_rows={} sent={} dropped={}",
                    c.cycle,
                    s.distance_cm.map_or_else(|| "none".to_string(), |d| format!("{d}cm")),
                    s.light_level,
                    s.temperature_c,
                    s.humidity_pct,
                    mode,
                    c.rows_written,
                    c.published,
                    c.skipped,
                );
            }
            AppEvent::SensorFault { cause } => match cause {
                Some(e) => warn!("FAULT | climate sensor: {}", e),
                None => warn!("FAULT | climate sensor returned no number"),
            },
            AppEvent::LinkLost => warn!("LINK  | broker connection lost"),
            AppEvent::ReconnectFailed { attempt } => {
                warn!("LINK  | reconnect attempt {} failed", attempt);
            }
            AppEvent::LinkRestored { attempts } => {
                info!("LINK  | connected after {} attempt(s)", attempts);
            }
        }
    }
}
