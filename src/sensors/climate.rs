//! DHT11 temperature / humidity sensor driver.
//!
//! Blocking single-wire read: pull the line low for the start signal,
//! release it, wait for the sensor's response handshake, then sample a
//! 40-bit frame where each bit is encoded in the high-level duration.
//! The final byte is a checksum over the first four.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the data line via the raw GPIO API with
//! microsecond delays (the whole read takes ~5 ms and runs with the
//! acquisition loop blocked, which is fine — the model is synchronous).
//! On host/test: reads from injected atomics.

use core::sync::atomic::{AtomicBool, AtomicU32};
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use crate::error::SensorError;

/// One temperature + humidity sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0x41A8_0000); // 21.0 °C
static SIM_HUMIDITY_BITS: AtomicU32 = AtomicU32::new(0x4248_0000); // 50.0 %
static SIM_FAILING: AtomicBool = AtomicBool::new(false);

/// Inject the reading returned by host-side `read()` calls.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_BITS.store(temperature_c.to_bits(), Ordering::Relaxed);
    SIM_HUMIDITY_BITS.store(humidity_pct.to_bits(), Ordering::Relaxed);
}

/// Make host-side `read()` calls fail with `NoResponse`.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate_failing(failing: bool) {
    SIM_FAILING.store(failing, Ordering::Relaxed);
}

/// DHT11 driver bound to one data-line GPIO.
pub struct Dht11 {
    gpio: i32,
}

impl Dht11 {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Perform one blocking read (~5 ms on device).
    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let frame = self.read_frame()?;

        let checksum = frame[0]
            .wrapping_add(frame[1])
            .wrapping_add(frame[2])
            .wrapping_add(frame[3]);
        if checksum != frame[4] {
            return Err(SensorError::ChecksumMismatch);
        }

        Ok(ClimateReading {
            humidity_pct: f32::from(frame[0]) + f32::from(frame[1]) * 0.1,
            temperature_c: f32::from(frame[2]) + f32::from(frame[3]) * 0.1,
        })
    }

    /// Perform one read against the injected simulation values.
    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let _ = self.gpio;
        if SIM_FAILING.load(Ordering::Relaxed) {
            return Err(SensorError::NoResponse);
        }
        Ok(ClimateReading {
            temperature_c: f32::from_bits(SIM_TEMP_BITS.load(Ordering::Relaxed)),
            humidity_pct: f32::from_bits(SIM_HUMIDITY_BITS.load(Ordering::Relaxed)),
        })
    }

    // ── Device-side wire protocol ─────────────────────────────

    /// Start signal, response handshake, 40-bit frame.
    #[cfg(target_os = "espidf")]
    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        use esp_idf_sys::{
            esp_rom_delay_us, gpio_get_level, gpio_mode_t_GPIO_MODE_INPUT,
            gpio_mode_t_GPIO_MODE_OUTPUT_OD, gpio_set_direction, gpio_set_level,
        };

        // SAFETY: the data-line GPIO is claimed exclusively by this driver
        // at construction; all calls run on the single acquisition thread.
        unsafe {
            // Start signal: hold low ≥18 ms, release ~30 µs.
            gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
            gpio_set_level(self.gpio, 0);
            esp_rom_delay_us(20_000);
            gpio_set_level(self.gpio, 1);
            esp_rom_delay_us(30);
            gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_INPUT);

            // Response handshake: ~80 µs low, ~80 µs high.
            self.wait_for_level(0, 100)?;
            self.wait_for_level(1, 100)?;
            self.wait_for_level(0, 100)?;

            // 40 data bits: bit value is determined by high-phase width
            // (~27 µs = 0, ~70 µs = 1).  Sample 40 µs into the high phase.
            let mut frame = [0u8; 5];
            for bit in 0..40 {
                self.wait_for_level(1, 70)?;
                esp_rom_delay_us(40);
                let value = gpio_get_level(self.gpio);
                frame[bit / 8] <<= 1;
                frame[bit / 8] |= value as u8;
                self.wait_for_level(0, 70)?;
            }
            Ok(frame)
        }
    }

    /// Poll until the line reaches `target` (0/1); `NoResponse` on timeout.
    #[cfg(target_os = "espidf")]
    fn wait_for_level(&self, target: i32, timeout_us: u32) -> Result<(), SensorError> {
        use esp_idf_sys::{esp_rom_delay_us, gpio_get_level};
        for _ in 0..timeout_us {
            // SAFETY: plain level read on a pin owned by this driver.
            unsafe {
                if gpio_get_level(self.gpio) == target {
                    return Ok(());
                }
                esp_rom_delay_us(1);
            }
        }
        Err(SensorError::NoResponse)
    }
}
