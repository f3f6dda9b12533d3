//! Unified error types for the SoilProbe firmware.
//!
//! Small per-concern enums that every subsystem converts into. Low-level
//! pulse-timing failures never reach this module: they are absorbed inside
//! the colour pipeline (a timed-out channel degrades to intensity 0).
//! Everything defined here is surfaced verbatim to the caller for display.

use core::fmt;

use crate::app::ports::{CredentialError, StoreError};

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Hard sensor faults.  Distinct from a pulse timeout: a timeout is a
/// property of the light level, these mean the hardware itself misbehaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// A GPIO read returned an error.
    GpioReadFailed,
    /// A GPIO write (filter select, start signal) returned an error.
    GpioWriteFailed,
    /// The DHT11 never answered the start signal.
    NoResponse,
    /// The DHT11 frame arrived but its checksum did not match.
    ChecksumMismatch,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::NoResponse => write!(f, "climate sensor not responding"),
            Self::ChecksumMismatch => write!(f, "climate frame checksum mismatch"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sign-in errors
// ---------------------------------------------------------------------------

/// Failures of the `sign_in` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// The credential check completed and rejected the pair.
    InvalidCredentials,
    /// Too many attempts in too short a window.
    RateLimited,
    /// The session already holds an identity; it is set exactly once
    /// and cleared only by restart.
    AlreadySignedIn,
    /// The identity exceeds the fixed session capacity.
    IdentityTooLong,
    /// The credential backend itself failed to answer.
    Credential(CredentialError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid identity or secret"),
            Self::RateLimited => write!(f, "too many sign-in attempts"),
            Self::AlreadySignedIn => write!(f, "session already signed in"),
            Self::IdentityTooLong => write!(f, "identity too long"),
            Self::Credential(e) => write!(f, "credential check failed: {e}"),
        }
    }
}

impl From<CredentialError> for AuthError {
    fn from(e: CredentialError) -> Self {
        Self::Credential(e)
    }
}

// ---------------------------------------------------------------------------
// Submit errors
// ---------------------------------------------------------------------------

/// Failures of the `record_and_submit` operation.  Every variant maps to a
/// user-visible message; nothing here is process-fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Submission attempted while the session holds no identity.
    /// The sensor pipeline and the store are never touched in this case.
    NotSignedIn,
    /// The colour or climate sensor failed hard.
    Sensor(SensorError),
    /// All three colour channels read zero intensity — no ratio exists.
    ZeroIntensity,
    /// The store rejected the append.  The reading is discarded, the
    /// session is unchanged, and no retry is attempted.
    Store(StoreError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSignedIn => write!(f, "not signed in"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::ZeroIntensity => write!(f, "all colour channels read zero"),
            Self::Store(e) => write!(f, "store: {e}"),
        }
    }
}

impl From<SensorError> for SubmitError {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

impl From<StoreError> for SubmitError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
