//! The certificate verification entry point.
//!
//! [`CertificateVerifier::verify`] runs the fixed pipeline: ensure the
//! trusted store is provisioned, gate the declared hash algorithm, resolve
//! the signing key, and hand the digest and certificate to the
//! cryptographic primitive. The primitive's outcome is reported verbatim.
//! The resolved key is held only for the duration of the call and is
//! released exactly once on every path out of it.

use std::sync::Arc;

use crate::{
    certificate::{Certificate, SignatureDescriptor},
    crypto::SignatureVerifier,
    error::{Result, VerifyError},
    lookup,
    store::TrustedKeyStore,
};

/// Authenticates content digests against certificates and the trusted
/// keyring.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use intact_keyring::{MemoryKeyring, MemoryKeyringProvider};
/// use intact_verify::{CertificateVerifier, Ed25519Verifier, TrustedKeyStore};
///
/// let keyring = Arc::new(MemoryKeyring::new(".intact"));
/// let provider = Arc::new(MemoryKeyringProvider::new(keyring));
/// let verifier = CertificateVerifier::new(
///     TrustedKeyStore::new(provider),
///     Arc::new(Ed25519Verifier::new()),
/// );
///
/// // No certificate: initialization-only call shape.
/// verifier.verify(None, &[]).unwrap();
/// assert!(verifier.store().is_initialized());
/// ```
pub struct CertificateVerifier {
    store: TrustedKeyStore,
    crypto: Arc<dyn SignatureVerifier>,
}

impl CertificateVerifier {
    /// Creates a verifier over the given store and cryptographic primitive.
    #[must_use]
    pub fn new(store: TrustedKeyStore, crypto: Arc<dyn SignatureVerifier>) -> Self {
        Self { store, crypto }
    }

    /// Returns the trusted key store backing this verifier.
    #[must_use]
    pub fn store(&self) -> &TrustedKeyStore {
        &self.store
    }

    /// Verifies `digest` against `certificate`.
    ///
    /// Initialization of the trusted store is always attempted first,
    /// regardless of the other arguments. Passing `None` for the
    /// certificate is the initialization-only call shape: the call succeeds
    /// once the store is provisioned and performs no verification.
    ///
    /// With a certificate present, the declared hash algorithm is gated
    /// before any key resolution: a reserved tag fails without touching the
    /// keyring. The resolved key is released exactly once whether the
    /// cryptographic check succeeds or fails.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::Keyring`] if provisioning the trusted store fails.
    /// - [`VerifyError::UnsupportedAlgorithm`] for a reserved hash tag.
    /// - [`VerifyError::KeyNotFound`] if the key cannot be resolved.
    /// - [`VerifyError::Signature`] carrying the primitive's outcome.
    #[tracing::instrument(skip_all, fields(key_id = tracing::field::Empty))]
    pub fn verify(&self, certificate: Option<&Certificate>, digest: &[u8]) -> Result<()> {
        self.store.ensure_initialized()?;

        let Some(certificate) = certificate else {
            return Ok(());
        };

        let header = certificate.header();
        tracing::Span::current().record("key_id", tracing::field::display(header.key_id));

        if !header.hash_algorithm.is_supported() {
            tracing::warn!(tag = %header.hash_algorithm, "rejecting unsupported hash algorithm");
            return Err(VerifyError::unsupported_algorithm(header.hash_algorithm));
        }

        let key = lookup::resolve(&self.store, header.key_id)?;
        let descriptor = SignatureDescriptor::new(digest, header.hash_algorithm);
        let outcome = self.crypto.verify_signature(key.handle(), &descriptor, certificate);
        // Release the key before reporting the outcome.
        drop(key);

        outcome.map_err(VerifyError::Signature)
    }
}
