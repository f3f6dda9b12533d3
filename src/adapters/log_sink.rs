//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A display or telemetry adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::SignedIn { user } => {
                info!("AUTH  | signed in as '{}'", user);
            }
            AppEvent::SignInRejected { reason } => {
                warn!("AUTH  | sign-in rejected: {}", reason);
            }
            AppEvent::ReadingSubmitted { receipt, reading } => {
                info!(
                    "STORE | row {} @ {}us | N={:.2} P={:.2} K={:.2} | T={:.1}\u{00b0}C RH={:.0}%",
                    receipt.id,
                    receipt.timestamp_us,
                    reading.n_ratio,
                    reading.p_ratio,
                    reading.k_ratio,
                    reading.temperature_c,
                    reading.humidity_pct,
                );
            }
            AppEvent::SubmitFailed { reason } => {
                warn!("STORE | submit failed: {}", reason);
            }
        }
    }
}
