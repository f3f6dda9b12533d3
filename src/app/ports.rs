//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AcquisitionService (domain)
//! ```
//!
//! Driven adapters (sensor hardware, credential backend, reading store,
//! event sinks) implement these traits.  The
//! [`AcquisitionService`](super::service::AcquisitionService) consumes them
//! via generics, so the domain core never touches hardware, crypto, or a
//! database connection directly — and the whole pipeline runs against fakes
//! in the test suite.

use crate::config::AcquisitionConfig;
use crate::error::SensorError;
use crate::sensors::climate::ClimateReading;
use crate::sensors::color::IntensityTriple;

use super::events::AppEvent;
use super::service::Reading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to run the acquisition pipeline.
pub trait SensorPort {
    /// Run a full three-channel colour read.
    ///
    /// Channel timeouts degrade to intensity 0 inside the implementation;
    /// only hard faults (GPIO errors) surface here.
    fn read_intensities(
        &mut self,
        config: &AcquisitionConfig,
    ) -> Result<IntensityTriple, SensorError>;

    /// Read ambient temperature and humidity.
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Credential port (driven adapter: domain → auth backend)
// ───────────────────────────────────────────────────────────────

/// Opaque credential verification.  How the backend stores or hashes
/// secrets is its own business; the domain only needs the boolean.
pub trait CredentialPort {
    fn verify(&mut self, identity: &str, secret: &str) -> Result<bool, CredentialError>;
}

// ───────────────────────────────────────────────────────────────
// Reading store port (driven adapter: domain → persistence)
// ───────────────────────────────────────────────────────────────

/// Append-only store for submitted readings.
///
/// Implementations MUST be transactional: after `append` returns, either
/// the full row exists or no partial row does.  On error the caller
/// discards the reading — there is no outbox and no retry.
pub trait ReadingStorePort {
    /// Persist one reading and return its assigned id.
    fn append(&mut self, reading: &Reading) -> Result<u64, StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log, display, telemetry).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`CredentialPort`] — the check itself failed, which is not
/// the same thing as a rejected credential pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// The backend could not be reached.
    Unavailable,
    /// The backend answered with something unusable.
    Malformed,
}

impl core::fmt::Display for CredentialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "credential backend unavailable"),
            Self::Malformed => write!(f, "credential backend answer malformed"),
        }
    }
}

/// Errors from [`ReadingStorePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    Unavailable,
    /// The store rejected the row.
    Rejected,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "store unavailable"),
            Self::Rejected => write!(f, "store rejected the reading"),
            Self::IoError => write!(f, "store I/O error"),
        }
    }
}
