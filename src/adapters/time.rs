//! ESP32 time adapter.
//!
//! Implements the [`Monotonic`] clock port for the acquisition pipeline.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.

use core::time::Duration;

use crate::sensors::pulse::Monotonic;

/// Monotonic clock for the ESP32-S3 platform.
pub struct Esp32Clock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Monotonic for Esp32Clock {
    #[cfg(target_os = "espidf")]
    fn now(&self) -> Duration {
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        Duration::from_micros(us as u64)
    }

    #[cfg(not(target_os = "espidf"))]
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}
