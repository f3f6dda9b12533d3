//! Provisioned-credential adapter — HMAC-SHA256 secret verification.
//!
//! The probe is provisioned at flash time with one identity and an
//! HMAC-SHA256 tag of its secret, keyed with a per-device salt.  A sign-in
//! presents the secret in the clear over the local console; verification
//! recomputes the tag and compares in constant time.  The plaintext secret
//! is never stored.
//!
//! Crypto is handled by the `hmac-sha256` crate — pure Rust, no_std,
//! constant-time verification, identical on ESP-IDF and host targets.

use crate::app::ports::{CredentialError, CredentialPort};
use crate::app::session::Identity;

/// Credential checker for the single provisioned identity.
pub struct ProvisionedCredentials {
    identity: Identity,
    salt: [u8; 32],
    secret_tag: [u8; 32],
}

impl ProvisionedCredentials {
    /// Build from an already-computed tag (the provisioning record).
    pub fn new(identity: Identity, salt: [u8; 32], secret_tag: [u8; 32]) -> Self {
        Self {
            identity,
            salt,
            secret_tag,
        }
    }

    /// Derive the provisioning record from a plaintext secret.
    /// Used by the provisioning tool and by tests.
    pub fn provision(identity: Identity, salt: [u8; 32], secret: &str) -> Self {
        let secret_tag = hmac_sha256::HMAC::mac(secret.as_bytes(), salt);
        Self::new(identity, salt, secret_tag)
    }
}

impl CredentialPort for ProvisionedCredentials {
    fn verify(&mut self, identity: &str, secret: &str) -> Result<bool, CredentialError> {
        if identity != self.identity.as_str() {
            return Ok(false);
        }
        Ok(hmac_sha256::HMAC::verify(
            secret.as_bytes(),
            self.salt,
            &self.secret_tag,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> ProvisionedCredentials {
        ProvisionedCredentials::provision(
            Identity::try_from("grower").unwrap(),
            [7u8; 32],
            "field-secret",
        )
    }

    #[test]
    fn correct_pair_verifies() {
        let mut c = creds();
        assert_eq!(c.verify("grower", "field-secret"), Ok(true));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let mut c = creds();
        assert_eq!(c.verify("grower", "field-secre"), Ok(false));
        assert_eq!(c.verify("grower", ""), Ok(false));
    }

    #[test]
    fn unknown_identity_is_rejected() {
        let mut c = creds();
        assert_eq!(c.verify("intruder", "field-secret"), Ok(false));
    }

    #[test]
    fn salt_separates_devices() {
        let a = ProvisionedCredentials::provision(
            Identity::try_from("grower").unwrap(),
            [1u8; 32],
            "s",
        );
        let mut b = ProvisionedCredentials::new(
            Identity::try_from("grower").unwrap(),
            [2u8; 32],
            a.secret_tag,
        );
        assert_eq!(b.verify("grower", "s"), Ok(false));
    }
}
