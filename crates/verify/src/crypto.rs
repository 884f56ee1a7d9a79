//! The cryptographic verification primitive.
//!
//! The core delegates the actual signature check to a [`SignatureVerifier`]
//! and returns whatever it reports, verbatim. [`Ed25519Verifier`] is the
//! bundled implementation; deployments with other key types supply their
//! own.

use ed25519_dalek::{Signature, VerifyingKey};
use intact_keyring::KeyHandle;

use crate::{
    certificate::{Certificate, SignatureDescriptor},
    error::SignatureError,
};

/// Ed25519 public key size in bytes.
const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 signature size in bytes.
const ED25519_SIGNATURE_LEN: usize = 64;

/// Verifies a certificate's signature over a digest with a resolved key.
///
/// The outcome is opaque to the verification core: success or any
/// [`SignatureError`] is forwarded to the caller without reinterpretation.
pub trait SignatureVerifier: Send + Sync {
    /// Verifies the signature carried in `certificate` over the digest in
    /// `descriptor`, using the resolved signing key.
    ///
    /// The handle is borrowed; ownership (and the obligation to release it)
    /// stays with the caller.
    ///
    /// # Errors
    ///
    /// Returns a [`SignatureError`] describing the failure. The core passes
    /// it through unchanged.
    fn verify_signature(
        &self,
        key: &KeyHandle,
        descriptor: &SignatureDescriptor<'_>,
        certificate: &Certificate,
    ) -> Result<(), SignatureError>;
}

/// [`SignatureVerifier`] backed by Ed25519.
///
/// Interprets the handle's key material as a raw 32-byte Ed25519 public key
/// and the certificate body as a 64-byte signature over the digest bytes.
/// Ed25519 signs the caller-supplied digest directly, so the descriptor's
/// hash algorithm only records what produced the digest.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl Ed25519Verifier {
    /// Creates the verifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SignatureVerifier for Ed25519Verifier {
    fn verify_signature(
        &self,
        key: &KeyHandle,
        descriptor: &SignatureDescriptor<'_>,
        certificate: &Certificate,
    ) -> Result<(), SignatureError> {
        let key_bytes: [u8; ED25519_PUBLIC_KEY_LEN] =
            key.public_key().try_into().map_err(|_| {
                SignatureError::bad_key_material(format!(
                    "expected {ED25519_PUBLIC_KEY_LEN} bytes, got {}",
                    key.public_key().len()
                ))
            })?;
        let verifying_key = VerifyingKey::from_bytes(&key_bytes)
            .map_err(|e| SignatureError::bad_key_material(format!("invalid Ed25519 key: {e}")))?;

        let sig_bytes: [u8; ED25519_SIGNATURE_LEN] =
            certificate.body().try_into().map_err(|_| {
                SignatureError::bad_signature(format!(
                    "expected {ED25519_SIGNATURE_LEN} bytes, got {}",
                    certificate.body().len()
                ))
            })?;
        let signature = Signature::from_bytes(&sig_bytes);

        verifying_key
            .verify_strict(descriptor.digest(), &signature)
            .map_err(|_| SignatureError::mismatch())
    }
}
