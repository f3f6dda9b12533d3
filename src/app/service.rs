//! Application service — the hexagonal core.
//!
//! [`AcquisitionService`] owns the session and acquisition configuration
//! and exposes the two caller-facing operations: `sign_in` and
//! `record_and_submit`.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                  │    AcquisitionService     │
//! CredentialPort ─▶│  session · ratios · gate  │──▶ ReadingStorePort
//!                  └──────────────────────────┘
//! ```

use log::{info, warn};
use serde::Serialize;

use crate::config::AcquisitionConfig;
use crate::error::{AuthError, SubmitError};
use crate::sensors::pulse::Monotonic;

use super::events::AppEvent;
use super::ports::{CredentialPort, EventSink, ReadingStorePort, SensorPort};
use super::ratios::compute_ratios;
use super::session::{Identity, Session};

// ───────────────────────────────────────────────────────────────
// Domain records
// ───────────────────────────────────────────────────────────────

/// One complete, timestamped, identity-attributed record.
///
/// Only ever constructed with a signed-in identity; owned by the service
/// until handed to the store, never mutated after creation.
///
/// The nutrient fields carry the colour ratios under the probe's
/// calibration mapping: red → potassium, green → phosphorus,
/// blue → nitrogen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub user: Identity,
    pub n_ratio: f32,
    pub p_ratio: f32,
    pub k_ratio: f32,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// Microseconds since boot at acquisition time.
    pub timestamp_us: u64,
}

/// Returned to the caller on a successful submit, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Row id assigned by the store.
    pub id: u64,
    pub timestamp_us: u64,
}

// ───────────────────────────────────────────────────────────────
// AcquisitionService
// ───────────────────────────────────────────────────────────────

/// Orchestrates sign-in and the acquire-and-submit cycle.
pub struct AcquisitionService {
    config: AcquisitionConfig,
    session: Session,
}

impl AcquisitionService {
    pub fn new(config: AcquisitionConfig) -> Self {
        Self {
            config,
            session: Session::new(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    /// The signed-in identity, if any.
    pub fn current_user(&self) -> Option<&str> {
        self.session.user().map(Identity::as_str)
    }

    // ── Sign in ───────────────────────────────────────────────

    /// Verify credentials and attach the identity to the session.
    ///
    /// The session takes an identity exactly once; a second successful
    /// sign-in is rejected rather than replacing the owner mid-run.
    pub fn sign_in(
        &mut self,
        credentials: &mut impl CredentialPort,
        identity: &str,
        secret: &str,
        sink: &mut impl EventSink,
    ) -> Result<(), AuthError> {
        let outcome = self.check_sign_in(credentials, identity, secret);
        match &outcome {
            Ok(()) => {
                info!("session: signed in as '{identity}'");
                if let Some(user) = self.session.user() {
                    sink.emit(&AppEvent::SignedIn { user: user.clone() });
                }
            }
            Err(reason) => {
                warn!("session: sign-in rejected ({reason})");
                sink.emit(&AppEvent::SignInRejected { reason: *reason });
            }
        }
        outcome
    }

    fn check_sign_in(
        &mut self,
        credentials: &mut impl CredentialPort,
        identity: &str,
        secret: &str,
    ) -> Result<(), AuthError> {
        if self.session.is_signed_in() {
            return Err(AuthError::AlreadySignedIn);
        }
        if !self.session.check_rate_limit() {
            return Err(AuthError::RateLimited);
        }
        let user = Identity::try_from(identity).map_err(|()| AuthError::IdentityTooLong)?;
        if !credentials.verify(identity, secret)? {
            return Err(AuthError::InvalidCredentials);
        }
        self.session.set_signed_in(user);
        Ok(())
    }

    // ── Record and submit ─────────────────────────────────────

    /// Run one acquisition cycle and persist the result.
    ///
    /// Colour triple → ratios → climate → timestamped [`Reading`] →
    /// store append.  Fails without touching the sensors or the store when
    /// the session is signed out; on a store failure the reading is
    /// discarded and the session is left unchanged.
    pub fn record_and_submit(
        &mut self,
        hw: &mut impl SensorPort,
        store: &mut impl ReadingStorePort,
        clock: &impl Monotonic,
        sink: &mut impl EventSink,
    ) -> Result<SubmitReceipt, SubmitError> {
        let outcome = self.acquire_and_append(hw, store, clock);
        match &outcome {
            Ok((receipt, reading)) => {
                info!(
                    "submit: reading {} stored for '{}' (N={:.2} P={:.2} K={:.2})",
                    receipt.id, reading.user, reading.n_ratio, reading.p_ratio, reading.k_ratio
                );
                sink.emit(&AppEvent::ReadingSubmitted {
                    receipt: *receipt,
                    reading: reading.clone(),
                });
            }
            Err(reason) => {
                warn!("submit: failed ({reason})");
                sink.emit(&AppEvent::SubmitFailed { reason: *reason });
            }
        }
        outcome.map(|(receipt, _)| receipt)
    }

    fn acquire_and_append(
        &mut self,
        hw: &mut impl SensorPort,
        store: &mut impl ReadingStorePort,
        clock: &impl Monotonic,
    ) -> Result<(SubmitReceipt, Reading), SubmitError> {
        let Some(user) = self.session.user().cloned() else {
            return Err(SubmitError::NotSignedIn);
        };

        let intensities = hw.read_intensities(&self.config)?;
        let ratios = compute_ratios(&intensities).map_err(|_| SubmitError::ZeroIntensity)?;
        let climate = hw.read_climate()?;

        let timestamp_us = clock.now().as_micros() as u64;
        let reading = Reading {
            user,
            n_ratio: ratios.blue,
            p_ratio: ratios.green,
            k_ratio: ratios.red,
            temperature_c: climate.temperature_c,
            humidity_pct: climate.humidity_pct,
            timestamp_us,
        };

        let id = store.append(&reading)?;
        Ok((SubmitReceipt { id, timestamp_us }, reading))
    }
}
