//! Acquisition configuration parameters
//!
//! All tunable parameters for the colour-acquisition pipeline.
//! Values can be overridden at provisioning time.

use serde::{Deserialize, Serialize};

/// Core acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    // --- Colour pipeline ---
    /// Sensor output frequency that maps to full-scale intensity (255)
    pub max_frequency_hz: f32,
    /// Pulses averaged per channel measurement
    pub pulses_per_sample: u32,
    /// Timeout per pulse (milliseconds).  Bounds each busy-wait phase, so a
    /// full channel read blocks at most `pulses_per_sample` times this.
    pub pulse_timeout_ms: u32,

    // --- Timing ---
    /// Interval between submitted readings (seconds)
    pub sample_interval_secs: u32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            // Colour pipeline
            max_frequency_hz: 5_000.0,
            pulses_per_sample: 10,
            pulse_timeout_ms: 1_000,

            // Timing
            sample_interval_secs: 60,
        }
    }
}

impl AcquisitionConfig {
    /// Per-pulse timeout as a [`core::time::Duration`].
    pub fn pulse_timeout(&self) -> core::time::Duration {
        core::time::Duration::from_millis(u64::from(self.pulse_timeout_ms))
    }
}
