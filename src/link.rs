//! Broker link supervisor.
//!
//! ```text
//!            is_connected() == false
//!  Connected ───────────────────────▶ Reconnecting { attempt }
//!      ▲                                   │  connect() failed:
//!      │        connect() ok               │  sleep RECONNECT_BACKOFF_MS,
//!      └───────────────────────────────────┘  attempt += 1
//! ```
//!
//! Reconnecting blocks the whole control loop until the broker accepts the
//! connection.  No cycles run and no transport upkeep happens meanwhile;
//! on a single-purpose device with nothing else to do that is acceptable.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, TransportPort};

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Connected,
    Reconnecting { attempt: u32 },
}

pub struct LinkSupervisor<D> {
    state: LinkState,
    client_id: String,
    backoff_ms: u32,
    delay: D,
}

impl<D: DelayNs> LinkSupervisor<D> {
    /// Starts in `Reconnecting { attempt: 0 }`: nothing is connected at boot.
    pub fn new(client_id: impl Into<String>, backoff_ms: u32, delay: D) -> Self {
        Self {
            state: LinkState::Reconnecting { attempt: 0 },
            client_id: client_id.into(),
            backoff_ms,
            delay,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Make sure the transport is connected, blocking until it is.
    ///
    /// Returns immediately when already connected.  Otherwise retries
    /// `connect()` with a fixed pause between attempts, indefinitely.
    pub fn ensure_connected(
        &mut self,
        transport: &mut impl TransportPort,
        sink: &mut impl EventSink,
    ) {
        if transport.is_connected() {
            self.state = LinkState::Connected;
            return;
        }

        if self.state == LinkState::Connected {
            warn!("Link: broker connection lost");
            sink.emit(&AppEvent::LinkLost);
        }
        let mut attempt = 0;
        self.state = LinkState::Reconnecting { attempt };

        loop {
            attempt += 1;
            info!("Link: connecting to broker as '{}' (attempt {})", self.client_id, attempt);
            match transport.connect(&self.client_id) {
                Ok(()) if transport.is_connected() => break,
                Ok(()) => warn!("Link: connect returned but link is still down"),
                Err(e) => warn!("Link: connect failed: {}; retrying in {} ms", e, self.backoff_ms),
            }
            self.state = LinkState::Reconnecting { attempt };
            sink.emit(&AppEvent::ReconnectFailed { attempt });
            self.delay.delay_ms(self.backoff_ms);
        }

        info!("Link: connected after {} attempt(s)", attempt);
        self.state = LinkState::Connected;
        sink.emit(&AppEvent::LinkRestored { attempts: attempt });
    }
}
