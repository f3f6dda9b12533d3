//! TCS3200 colour sensor driver.
//!
//! The sensor exposes one photodiode array behind a selectable colour
//! filter and outputs a square wave whose frequency tracks light intensity
//! on the selected filter.  Two select pins (S2/S3) pick the filter, two
//! more (S0/S1) fix the output-frequency scaling range at construction.
//!
//! Reading a colour means: select a filter, time a window of pulses on the
//! output pin, map the derived frequency onto the 0–255 intensity scale.
//! No settle delay is modelled after a filter switch — the first pulses of
//! a window may still reflect the prior filter, which is accepted as noise.

use core::time::Duration;

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::error::SensorError;

use super::pulse::{FrequencyError, FrequencyMeter, Monotonic, PinLevel};

// ---------------------------------------------------------------------------
// Channels and intensities
// ---------------------------------------------------------------------------

/// Colour filter channels of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    /// Acquisition order for a full triple.
    pub const ALL: [ColorChannel; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Logic levels for the (S2, S3) filter-select pair.
    fn select_levels(self) -> (PinLevel, PinLevel) {
        match self {
            Self::Red => (PinLevel::Low, PinLevel::Low),
            Self::Green => (PinLevel::High, PinLevel::High),
            Self::Blue => (PinLevel::Low, PinLevel::High),
        }
    }
}

/// One intensity per channel, each in 0–255.  Produced once per
/// acquisition cycle and consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityTriple {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Map a channel frequency onto the 0–255 intensity scale.
///
/// Monotonic non-decreasing in `freq_hz` and clamped at both ends; a
/// non-positive `max_frequency_hz` yields 0 rather than a NaN.
pub fn frequency_to_intensity(freq_hz: f32, max_frequency_hz: f32) -> u8 {
    if max_frequency_hz <= 0.0 {
        return 0;
    }
    let scaled = (freq_hz / max_frequency_hz * 255.0).round();
    scaled.clamp(0.0, 255.0) as u8
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// TCS3200 driver: filter selection plus pulse-window frequency reads.
pub struct Tcs3200<S0, S1, S2, S3, OUT, C> {
    // Scaling pins are driven once at construction and then held.
    _s0: S0,
    _s1: S1,
    s2: S2,
    s3: S3,
    out: OUT,
    clock: C,
}

impl<S0, S1, S2, S3, OUT, C> Tcs3200<S0, S1, S2, S3, OUT, C>
where
    S0: OutputPin,
    S1: OutputPin,
    S2: OutputPin,
    S3: OutputPin,
    OUT: InputPin,
    C: Monotonic,
{
    /// Build the driver and fix the output scaling range (S0 high, S1 low
    /// = 20 % scaling, the range the carrier board is calibrated for).
    pub fn new(
        mut s0: S0,
        mut s1: S1,
        s2: S2,
        s3: S3,
        out: OUT,
        clock: C,
    ) -> Result<Self, SensorError> {
        s0.set_high().map_err(|_| SensorError::GpioWriteFailed)?;
        s1.set_low().map_err(|_| SensorError::GpioWriteFailed)?;
        Ok(Self {
            _s0: s0,
            _s1: s1,
            s2,
            s3,
            out,
            clock,
        })
    }

    /// Drive the filter-select pins for `channel`.
    ///
    /// Side effect only; the photodiode output reflects the new filter from
    /// the next pulses onward.
    fn select(&mut self, channel: ColorChannel) -> Result<(), SensorError> {
        let (s2, s3) = channel.select_levels();
        set_level(&mut self.s2, s2)?;
        set_level(&mut self.s3, s3)?;
        Ok(())
    }

    /// Read all three channels, in Red → Green → Blue order.
    ///
    /// A channel whose pulse window times out degrades to intensity 0 —
    /// darkest reading rather than aborting the triple.  This cannot
    /// distinguish "no light" from a stuck sensor, so the degradation is
    /// logged.  Hard GPIO faults abort instead.
    pub fn read_colors(
        &mut self,
        max_frequency_hz: f32,
        pulses_per_sample: u32,
        pulse_timeout: Duration,
    ) -> Result<IntensityTriple, SensorError> {
        let mut intensities = [0u8; 3];
        for (slot, channel) in intensities.iter_mut().zip(ColorChannel::ALL) {
            self.select(channel)?;
            let meter = FrequencyMeter::new(&self.clock, pulse_timeout, pulses_per_sample);
            *slot = match meter.measure(&mut self.out) {
                Ok(freq) => frequency_to_intensity(freq, max_frequency_hz),
                Err(FrequencyError::WindowTimeout | FrequencyError::ZeroWindow) => {
                    warn!("colour: {channel:?} window unavailable, degrading to 0");
                    0
                }
                Err(FrequencyError::Gpio) => return Err(SensorError::GpioReadFailed),
            };
        }
        Ok(IntensityTriple {
            red: intensities[0],
            green: intensities[1],
            blue: intensities[2],
        })
    }
}

fn set_level<P: OutputPin>(pin: &mut P, level: PinLevel) -> Result<(), SensorError> {
    let res = match level {
        PinLevel::High => pin.set_high(),
        PinLevel::Low => pin.set_low(),
    };
    res.map_err(|_| SensorError::GpioWriteFailed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use std::rc::Rc;

    #[test]
    fn intensity_mapping_anchors() {
        assert_eq!(frequency_to_intensity(0.0, 5_000.0), 0);
        assert_eq!(frequency_to_intensity(5_000.0, 5_000.0), 255);
        assert_eq!(frequency_to_intensity(10_000.0, 5_000.0), 255);
    }

    #[test]
    fn intensity_mapping_rounds() {
        // 2500/5000 * 255 = 127.5 → rounds up.
        assert_eq!(frequency_to_intensity(2_500.0, 5_000.0), 128);
    }

    #[test]
    fn intensity_mapping_guards_bad_max() {
        assert_eq!(frequency_to_intensity(1_000.0, 0.0), 0);
        assert_eq!(frequency_to_intensity(1_000.0, -5.0), 0);
    }

    /// Output pin that records every level written to a shared journal.
    struct RecordingPin {
        tag: &'static str,
        journal: Rc<RefCell<Vec<(&'static str, PinLevel)>>>,
    }

    impl embedded_hal::digital::ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.journal.borrow_mut().push((self.tag, PinLevel::Low));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.journal.borrow_mut().push((self.tag, PinLevel::High));
            Ok(())
        }
    }

    /// Input pin stuck at a constant level.
    struct StuckPin(PinLevel);

    impl embedded_hal::digital::ErrorType for StuckPin {
        type Error = Infallible;
    }

    impl InputPin for StuckPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0 == PinLevel::High)
        }
        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(self.0 == PinLevel::Low)
        }
    }

    /// Real-time clock substitute: advances 1 ms per query.
    struct TickClock(core::cell::Cell<u64>);

    impl Monotonic for TickClock {
        fn now(&self) -> Duration {
            let t = self.0.get();
            self.0.set(t + 1);
            Duration::from_millis(t)
        }
    }

    fn journal_pin(
        tag: &'static str,
        journal: &Rc<RefCell<Vec<(&'static str, PinLevel)>>>,
    ) -> RecordingPin {
        RecordingPin {
            tag,
            journal: Rc::clone(journal),
        }
    }

    #[test]
    fn construction_fixes_scaling_range() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let _drv = Tcs3200::new(
            journal_pin("s0", &journal),
            journal_pin("s1", &journal),
            journal_pin("s2", &journal),
            journal_pin("s3", &journal),
            StuckPin(PinLevel::Low),
            TickClock(core::cell::Cell::new(0)),
        )
        .unwrap();
        assert_eq!(
            *journal.borrow(),
            vec![("s0", PinLevel::High), ("s1", PinLevel::Low)]
        );
    }

    #[test]
    fn dark_sensor_reads_all_zero_via_degradation() {
        // Output pin never pulses: every channel window times out and
        // degrades to 0 instead of failing the read.
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut drv = Tcs3200::new(
            journal_pin("s0", &journal),
            journal_pin("s1", &journal),
            journal_pin("s2", &journal),
            journal_pin("s3", &journal),
            StuckPin(PinLevel::Low),
            TickClock(core::cell::Cell::new(0)),
        )
        .unwrap();

        let triple = drv
            .read_colors(5_000.0, 2, Duration::from_millis(5))
            .unwrap();
        assert_eq!(
            triple,
            IntensityTriple {
                red: 0,
                green: 0,
                blue: 0
            }
        );

        // All three filters were selected, in acquisition order.
        let writes: Vec<_> = journal
            .borrow()
            .iter()
            .filter(|(tag, _)| *tag == "s2" || *tag == "s3")
            .copied()
            .collect();
        assert_eq!(
            writes,
            vec![
                ("s2", PinLevel::Low),
                ("s3", PinLevel::Low), // red
                ("s2", PinLevel::High),
                ("s3", PinLevel::High), // green
                ("s2", PinLevel::Low),
                ("s3", PinLevel::High), // blue
            ]
        );
    }
}
