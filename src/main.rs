//! SoilProbe Firmware — Main Entry Point
//!
//! Hexagonal architecture, fully synchronous: one control thread wires the
//! adapters to the acquisition service, signs in with the provisioned
//! identity, then submits one reading per sample interval.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter     ProvisionedCredentials              │
//! │  (TCS3200 + DHT11)   (CredentialPort)                    │
//! │  HttpReadingStore    LogEventSink      Esp32Clock        │
//! │  (ReadingStorePort)  (EventSink)       (Monotonic)       │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        AcquisitionService (pure logic)         │      │
//! │  │  session gate · colour pipeline · NPK ratios   │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Result, anyhow};
use log::info;

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};

use soilprobe::adapters::credentials::ProvisionedCredentials;
use soilprobe::adapters::hardware::HardwareAdapter;
use soilprobe::adapters::log_sink::LogEventSink;
use soilprobe::adapters::store::HttpReadingStore;
use soilprobe::adapters::time::Esp32Clock;
use soilprobe::app::service::AcquisitionService;
use soilprobe::app::session::Identity;
use soilprobe::config::AcquisitionConfig;
use soilprobe::pins;
use soilprobe::sensors::climate::Dht11;
use soilprobe::sensors::color::Tcs3200;

/// Per-device salt for the provisioned credential record.
/// Replaced by the provisioning tool before flashing.
const DEVICE_SALT: [u8; 32] = *b"soilprobe-development-salt-00000";

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SoilProbe v{}", env!("CARGO_PKG_VERSION"));

    // Provisioning data arrives out-of-band at flash time.
    let identity = option_env!("SOILPROBE_IDENTITY").unwrap_or("grower");
    let secret = option_env!("SOILPROBE_SECRET").unwrap_or("change-me");
    let ingest_url = option_env!("SOILPROBE_INGEST_URL")
        .unwrap_or("http://soilhub.local/api/readings");

    // ── 2. Claim peripherals and build the drivers ────────────
    // SAFETY: each pin number from `pins` is claimed exactly once here,
    // before any driver runs.
    let (s0, s1, s2, s3, out) = unsafe {
        (
            AnyOutputPin::new(pins::COLOR_S0_GPIO),
            AnyOutputPin::new(pins::COLOR_S1_GPIO),
            AnyOutputPin::new(pins::COLOR_S2_GPIO),
            AnyOutputPin::new(pins::COLOR_S3_GPIO),
            AnyIOPin::new(pins::COLOR_OUT_GPIO),
        )
    };
    let mut out = PinDriver::input(out)?;
    out.set_pull(Pull::Up)?;

    let color = Tcs3200::new(
        PinDriver::output(s0)?,
        PinDriver::output(s1)?,
        PinDriver::output(s2)?,
        PinDriver::output(s3)?,
        out,
        Esp32Clock::new(),
    )
    .map_err(|e| anyhow!("colour sensor init failed: {e}"))?;

    let mut hw = HardwareAdapter::new(color, Dht11::new(pins::DHT_GPIO));
    let mut store = HttpReadingStore::new(
        heapless::String::try_from(ingest_url).map_err(|()| anyhow!("ingest URL too long"))?,
    )
    .map_err(|e| anyhow!("store init failed: {e}"))?;
    let mut credentials = ProvisionedCredentials::provision(
        Identity::try_from(identity).map_err(|()| anyhow!("identity too long"))?,
        DEVICE_SALT,
        secret,
    );
    let clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();

    // ── 3. Sign in and run the acquisition loop ───────────────
    let config = AcquisitionConfig::default();
    let interval_ms = config.sample_interval_secs * 1_000;
    let mut service = AcquisitionService::new(config);

    service
        .sign_in(&mut credentials, identity, secret, &mut sink)
        .map_err(|e| anyhow!("sign-in with provisioned identity failed: {e}"))?;

    loop {
        FreeRtos::delay_ms(interval_ms);
        // Failures are surfaced through the event sink; the loop goes on.
        let _ = service.record_and_submit(&mut hw, &mut store, &clock, &mut sink);
    }
}
