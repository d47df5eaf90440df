//! Fixed-interval cycle trigger.
//!
//! Polled from the main loop with the current monotonic time.  It never
//! sleeps: when the interval has elapsed it reports the cycle as due and
//! restarts the interval from `now`, so cycle start times drift by up to
//! one loop tick.
//!
//! ```text
//!  loop tick ──▶ Scheduler::tick(now) ──true──▶ AppService::run_cycle()
//!                       │false
//!                       ▼
//!                  (nothing to do)
//! ```

use log::debug;

/// The cycle scheduler.
#[derive(Debug)]
pub struct Scheduler {
    interval_ms: u64,
    /// Time the last cycle fired.  Starts at 0 (boot), so the first cycle
    /// runs one interval after power-on.
    last_cycle_ms: u64,
    fired: u64,
}

impl Scheduler {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_cycle_ms: 0,
            fired: 0,
        }
    }

    /// Returns `true` when a cycle is due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_cycle_ms) < self.interval_ms {
            return false;
        }
        self.last_cycle_ms = now_ms;
        self.fired += 1;
        debug!("Scheduler: cycle {} due at {} ms", self.fired, now_ms);
        true
    }

    /// Number of cycles fired since boot.
    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
