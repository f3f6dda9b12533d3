//! Outbound application events.
//!
//! The [`AcquisitionService`](super::service::AcquisitionService) emits
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them — log to serial, drive a
//! display, forward as telemetry.  Every failure path emits an event, so no
//! error is ever silently dropped.

use crate::error::{AuthError, SubmitError};

use super::service::{Reading, SubmitReceipt};
use super::session::Identity;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A sign-in attempt succeeded; the session now holds this identity.
    SignedIn { user: Identity },

    /// A sign-in attempt failed.
    SignInRejected { reason: AuthError },

    /// A reading was acquired and persisted.
    ReadingSubmitted {
        receipt: SubmitReceipt,
        reading: Reading,
    },

    /// An acquisition or submission attempt failed.
    SubmitFailed { reason: SubmitError },
}
