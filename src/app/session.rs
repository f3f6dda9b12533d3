//! Acquisition session state.
//!
//! A session starts signed out, takes an identity exactly once after a
//! successful credential check, and is cleared only by process restart —
//! there is no sign-out operation.  Sign-in attempts are token-bucket rate
//! limited so a wedged caller cannot hammer the credential backend.

use burster::Limiter;
use core::time::Duration;

/// Fixed capacity of a session identity.
pub const MAX_IDENTITY_LEN: usize = 32;

/// Owner identity attached to every submitted reading.
pub type Identity = heapless::String<MAX_IDENTITY_LEN>;

/// Sign-in state of the acquisition session.
#[derive(Debug, Clone)]
pub enum SessionState {
    SignedOut,
    SignedIn { user: Identity },
}

/// Tracks the single acquisition session.
pub struct Session {
    state: SessionState,
    rate_limiter: burster::TokenBucket<fn() -> Duration>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::SignedOut,
            rate_limiter: burster::TokenBucket::new_with_time_provider(
                10,
                10, // 10 attempts per second, 10 burst capacity
                platform_now as fn() -> Duration,
            ),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, SessionState::SignedIn { .. })
    }

    /// The signed-in identity, if any.
    pub fn user(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::SignedIn { user } => Some(user),
            SessionState::SignedOut => None,
        }
    }

    /// Attach the identity after a successful credential check.
    ///
    /// Callers must have verified credentials first; this only records the
    /// outcome.  A signed-in session never changes identity.
    pub(super) fn set_signed_in(&mut self, user: Identity) {
        debug_assert!(!self.is_signed_in());
        self.state = SessionState::SignedIn { user };
    }

    /// Consume one sign-in-attempt token; returns `false` when exhausted.
    pub fn check_rate_limit(&mut self) -> bool {
        self.rate_limiter.try_consume(1).is_ok()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ── Platform time for rate limiter ───────────────────────────

#[cfg(target_os = "espidf")]
fn platform_now() -> Duration {
    let us = unsafe { esp_idf_sys::esp_timer_get_time() };
    Duration::from_micros(us as u64)
}

#[cfg(not(target_os = "espidf"))]
fn platform_now() -> Duration {
    use std::time::Instant;
    static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
    START.get_or_init(Instant::now).elapsed()
}

// ── Tests ────────────────────────────────────────────────────
