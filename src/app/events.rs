//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, count them in a test,
//! etc.

use crate::decision::{Decision, SensorSnapshot};
use crate::error::SensorError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started and the boot splash is on the display.
    Started,

    /// One decision cycle ran to completion.
    CycleCompleted(CycleSummary),

    /// The climate sensor could not be read this cycle.  `cause` is `None`
    /// when the read succeeded but produced NaN.
    SensorFault { cause: Option<SensorError> },

    /// The broker link dropped; a blocking reconnect is starting.
    LinkLost,

    /// A reconnect attempt failed; the loop sleeps before the next one.
    ReconnectFailed { attempt: u32 },

    /// The broker link is back after `attempts` tries.
    LinkRestored { attempts: u32 },
}

/// What one cycle saw and decided.
#[derive(Debug, Clone)]
pub struct CycleSummary {
    pub cycle: u64,
    pub snapshot: SensorSnapshot,
    pub decision: Decision,
    /// Display rows physically rewritten this cycle.
    pub rows_written: u8,
    /// Messages handed to the transport.
    pub published: u8,
    /// Messages dropped because the transport was down.
    pub skipped: u8,
}
