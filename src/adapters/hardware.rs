//! Hardware adapter — bridges real peripherals to the domain sensor port.
//!
//! Owns the TCS3200 and DHT11 drivers and exposes them through
//! [`SensorPort`].  This is the only module in the system that touches
//! actual sensor hardware; the drivers themselves are generic over
//! `embedded-hal` pins, so the same adapter runs against real GPIO on the
//! device and fake pins in tests.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::SensorPort;
use crate::config::AcquisitionConfig;
use crate::error::SensorError;
use crate::sensors::climate::{ClimateReading, Dht11};
use crate::sensors::color::{IntensityTriple, Tcs3200};
use crate::sensors::pulse::Monotonic;

/// Concrete adapter that combines all sensors behind the port trait.
pub struct HardwareAdapter<S0, S1, S2, S3, OUT, C> {
    color: Tcs3200<S0, S1, S2, S3, OUT, C>,
    climate: Dht11,
}

impl<S0, S1, S2, S3, OUT, C> HardwareAdapter<S0, S1, S2, S3, OUT, C>
where
    S0: OutputPin,
    S1: OutputPin,
    S2: OutputPin,
    S3: OutputPin,
    OUT: InputPin,
    C: Monotonic,
{
    pub fn new(color: Tcs3200<S0, S1, S2, S3, OUT, C>, climate: Dht11) -> Self {
        Self { color, climate }
    }
}

impl<S0, S1, S2, S3, OUT, C> SensorPort for HardwareAdapter<S0, S1, S2, S3, OUT, C>
where
    S0: OutputPin,
    S1: OutputPin,
    S2: OutputPin,
    S3: OutputPin,
    OUT: InputPin,
    C: Monotonic,
{
    fn read_intensities(
        &mut self,
        config: &AcquisitionConfig,
    ) -> Result<IntensityTriple, SensorError> {
        self.color.read_colors(
            config.max_frequency_hz,
            config.pulses_per_sample,
            config.pulse_timeout(),
        )
    }

    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate.read()
    }
}
