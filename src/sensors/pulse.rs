//! Pulse-width timing primitives for frequency-output sensors.
//!
//! [`PulseTimer`] measures how long a digital input holds a given logic
//! level, bounded by a timeout.  [`FrequencyMeter`] aggregates a fixed
//! number of pulses into an average frequency.  Both busy-poll the pin —
//! the acquisition model is single-threaded and fully synchronous, so the
//! only "suspension" points are these bounded wait loops.
//!
//! ## Dual-target design
//!
//! Everything here is generic over [`embedded_hal::digital::InputPin`] and
//! a [`Monotonic`] clock, so host tests drive scripted fake pins and a
//! stepped fake clock while the device uses real GPIO and `esp_timer`.

use core::time::Duration;

use embedded_hal::digital::InputPin;

/// Monotonic time source.  Implementations report time since an arbitrary
/// fixed epoch (typically boot); only differences are meaningful.
pub trait Monotonic {
    fn now(&self) -> Duration;
}

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

/// Failure of a single pulse measurement.
///
/// A timeout is a tagged result, never a zero duration — a zero-width pulse
/// and a stuck pin are different observations and callers must be able to
/// tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseError {
    /// The pin did not produce the expected edge within the timeout.
    Timeout,
    /// The GPIO read itself failed.
    Gpio,
}

/// Failure of a whole frequency-sample window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyError {
    /// At least one pulse in the window timed out.  The window is abandoned
    /// immediately — no partial averaging, no retry of the failed pulse.
    /// A single stuck reading invalidates the whole sample rather than
    /// silently averaging over fewer pulses.
    WindowTimeout,
    /// Every pulse came back with zero width; no rate can be derived.
    ZeroWindow,
    /// The GPIO read itself failed.
    Gpio,
}

fn read_level<P: InputPin>(pin: &mut P) -> Result<PinLevel, PulseError> {
    match pin.is_high() {
        Ok(true) => Ok(PinLevel::High),
        Ok(false) => Ok(PinLevel::Low),
        Err(_) => Err(PulseError::Gpio),
    }
}

// ---------------------------------------------------------------------------
// PulseTimer
// ---------------------------------------------------------------------------

/// Measures the duration a pin holds a target logic level.
///
/// Purely a measurement — no side effects beyond pin reads.
pub struct PulseTimer<'c, C: Monotonic> {
    clock: &'c C,
    timeout: Duration,
}

impl<'c, C: Monotonic> PulseTimer<'c, C> {
    pub fn new(clock: &'c C, timeout: Duration) -> Self {
        Self { clock, timeout }
    }

    /// Measure one pulse at `target` level.
    ///
    /// Polls until the pin reaches `target` (a pin already at the target
    /// starts timing immediately), then polls until it leaves again.  Each
    /// phase is bounded by the configured timeout; exceeding either bound
    /// returns [`PulseError::Timeout`] — a measurement truncated at the
    /// timeout boundary is never reported as a success.
    pub fn measure<P: InputPin>(
        &self,
        pin: &mut P,
        target: PinLevel,
    ) -> Result<Duration, PulseError> {
        // Phase 1: wait for the pin to reach the target level.
        let wait_start = self.clock.now();
        while read_level(pin)? != target {
            if self.clock.now().saturating_sub(wait_start) > self.timeout {
                return Err(PulseError::Timeout);
            }
        }

        // Phase 2: time how long it stays there.
        let pulse_start = self.clock.now();
        while read_level(pin)? == target {
            if self.clock.now().saturating_sub(pulse_start) > self.timeout {
                return Err(PulseError::Timeout);
            }
        }
        Ok(self.clock.now().saturating_sub(pulse_start))
    }
}

// ---------------------------------------------------------------------------
// FrequencyMeter
// ---------------------------------------------------------------------------

/// Derives an average frequency from a fixed count of high pulses.
pub struct FrequencyMeter<'c, C: Monotonic> {
    timer: PulseTimer<'c, C>,
    pulse_count: u32,
}

impl<'c, C: Monotonic> FrequencyMeter<'c, C> {
    pub fn new(clock: &'c C, timeout: Duration, pulse_count: u32) -> Self {
        Self {
            timer: PulseTimer::new(clock, timeout),
            pulse_count,
        }
    }

    /// Measure `pulse_count` high pulses and return pulses per second.
    pub fn measure<P: InputPin>(&self, pin: &mut P) -> Result<f32, FrequencyError> {
        let mut total = Duration::ZERO;
        for _ in 0..self.pulse_count {
            let width = self.timer.measure(pin, PinLevel::High).map_err(|e| match e {
                PulseError::Timeout => FrequencyError::WindowTimeout,
                PulseError::Gpio => FrequencyError::Gpio,
            })?;
            total += width;
        }
        if total.is_zero() {
            return Err(FrequencyError::ZeroWindow);
        }
        Ok(self.pulse_count as f32 / total.as_secs_f32())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use core::convert::Infallible;

    /// Clock that advances by a fixed step on every `now()` call, making
    /// busy-wait loops terminate deterministically.
    struct SteppedClock {
        now_us: Cell<u64>,
        step_us: u64,
    }

    impl SteppedClock {
        fn new(step_us: u64) -> Self {
            Self {
                now_us: Cell::new(0),
                step_us,
            }
        }
    }

    impl Monotonic for SteppedClock {
        fn now(&self) -> Duration {
            let t = self.now_us.get();
            self.now_us.set(t + self.step_us);
            Duration::from_micros(t)
        }
    }

    /// Pin replaying a scripted level sequence; repeats the last level
    /// once the script is exhausted.
    struct ScriptedPin {
        script: RefCell<Vec<PinLevel>>,
        cursor: Cell<usize>,
    }

    impl ScriptedPin {
        fn new(script: Vec<PinLevel>) -> Self {
            Self {
                script: RefCell::new(script),
                cursor: Cell::new(0),
            }
        }
    }

    impl embedded_hal::digital::ErrorType for ScriptedPin {
        type Error = Infallible;
    }

    impl InputPin for ScriptedPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            let script = self.script.borrow();
            let i = self.cursor.get();
            let level = script.get(i).copied().or(script.last().copied());
            self.cursor.set(i + 1);
            Ok(level == Some(PinLevel::High))
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|h| !h)
        }
    }

    /// Pin whose reads always fail, for GPIO fault propagation.
    struct BrokenPin;

    #[derive(Debug)]
    struct BrokenPinError;

    impl embedded_hal::digital::Error for BrokenPinError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl embedded_hal::digital::ErrorType for BrokenPin {
        type Error = BrokenPinError;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, BrokenPinError> {
            Err(BrokenPinError)
        }
        fn is_low(&mut self) -> Result<bool, BrokenPinError> {
            Err(BrokenPinError)
        }
    }

    use PinLevel::{High, Low};

    const TIMEOUT: Duration = Duration::from_millis(5);

    #[test]
    fn pin_already_at_target_starts_timing_immediately() {
        // High on the very first read: no wait-phase clock queries at all.
        // Script: High, High, High, then Low ends the pulse.
        let clock = SteppedClock::new(1_000); // 1 ms per query
        let mut pin = ScriptedPin::new(vec![High, High, High, Low]);
        let timer = PulseTimer::new(&clock, TIMEOUT);

        let width = timer.measure(&mut pin, High).unwrap();
        // start at t=0; two in-pulse checks advance to 1 ms and 2 ms; the
        // exit read breaks and the end query observes 3 ms.
        assert_eq!(width, Duration::from_millis(3));
    }

    #[test]
    fn pulse_that_never_starts_times_out() {
        let clock = SteppedClock::new(1_000);
        let mut pin = ScriptedPin::new(vec![Low]);
        let timer = PulseTimer::new(&clock, TIMEOUT);

        assert_eq!(timer.measure(&mut pin, High), Err(PulseError::Timeout));
    }

    #[test]
    fn pulse_that_never_ends_times_out() {
        let clock = SteppedClock::new(1_000);
        let mut pin = ScriptedPin::new(vec![High]);
        let timer = PulseTimer::new(&clock, TIMEOUT);

        // Phase 1 passes instantly; phase 2 must hit its own bound.
        assert_eq!(timer.measure(&mut pin, High), Err(PulseError::Timeout));
    }

    #[test]
    fn gpio_fault_is_not_a_timeout() {
        let clock = SteppedClock::new(1_000);
        let timer = PulseTimer::new(&clock, TIMEOUT);

        assert_eq!(timer.measure(&mut BrokenPin, High), Err(PulseError::Gpio));
    }

    /// Script for one clean high pulse: one low read during the wait phase,
    /// the entering read, two in-pulse reads, and the exiting read.
    fn clean_pulse() -> Vec<PinLevel> {
        vec![Low, High, High, High, Low]
    }

    #[test]
    fn frequency_from_clean_window() {
        let clock = SteppedClock::new(1_000);
        let mut script = Vec::new();
        for _ in 0..10 {
            script.extend(clean_pulse());
        }
        let mut pin = ScriptedPin::new(script);
        let meter = FrequencyMeter::new(&clock, TIMEOUT, 10);

        // Each pulse measures 3 ms wide → 30 ms total → 10 / 0.030 s.
        let freq = meter.measure(&mut pin).unwrap();
        assert!((freq - 333.33).abs() < 0.5, "freq = {freq}");
    }

    #[test]
    fn one_timed_out_pulse_fails_the_whole_window() {
        let clock = SteppedClock::new(1_000);
        let mut script = Vec::new();
        for _ in 0..4 {
            script.extend(clean_pulse());
        }
        // Fifth pulse never arrives.
        script.push(Low);
        let mut pin = ScriptedPin::new(script);
        let meter = FrequencyMeter::new(&clock, TIMEOUT, 10);

        assert_eq!(meter.measure(&mut pin), Err(FrequencyError::WindowTimeout));
    }

    #[test]
    fn zero_width_window_has_no_frequency() {
        // A clock that never advances makes every pulse zero-width; the
        // script alternates so no phase ever times out.
        struct FrozenClock;
        impl Monotonic for FrozenClock {
            fn now(&self) -> Duration {
                Duration::ZERO
            }
        }
        let mut script = Vec::new();
        for _ in 0..10 {
            script.extend([High, Low]);
        }
        let mut pin = ScriptedPin::new(script);
        let meter = FrequencyMeter::new(&FrozenClock, TIMEOUT, 10);

        assert_eq!(meter.measure(&mut pin), Err(FrequencyError::ZeroWindow));
    }
}
