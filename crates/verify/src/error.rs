//! Verification error types.
//!
//! This module defines errors that can occur while authenticating a digest
//! against a certificate and the trusted keyring.
//!
//! # Error Policy
//!
//! Failures are returned to the immediate caller; nothing is retried inside
//! the core and nothing is silently swallowed. The only locally-absorbed
//! distinction is the key-lookup normalization in
//! [`lookup`](crate::lookup): a plain search miss and the three conditions
//! indistinguishable from one (no permission, not a keyring, transient
//! contention) all surface as [`VerifyError::KeyNotFound`]. Every other
//! keyring failure passes through unchanged as [`VerifyError::Keyring`],
//! and the cryptographic primitive's outcome is wrapped verbatim in
//! [`VerifyError::Signature`].

use intact_keyring::{KeyIdentifier, KeyringError};
use thiserror::Error;

use crate::certificate::HashAlgorithmTag;

/// Errors reported by the cryptographic verification primitive.
///
/// The verification core treats these as opaque outcomes: it never inspects
/// or remaps them, only forwards them inside [`VerifyError::Signature`].
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SignatureError {
    /// The signature does not match the digest under the resolved key.
    #[error("Signature mismatch")]
    Mismatch,

    /// The resolved key material could not be interpreted by the primitive.
    #[error("Malformed key material: {message}")]
    BadKeyMaterial {
        /// Description of the problem with the key material.
        message: String,
    },

    /// The certificate body does not carry a well-formed signature encoding.
    #[error("Malformed signature encoding: {message}")]
    BadSignature {
        /// Description of the problem with the signature encoding.
        message: String,
    },

    /// The crypto backend failed for a reason unrelated to the inputs.
    #[error("Crypto backend failure: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

impl SignatureError {
    /// Creates a new `Mismatch` error.
    #[must_use]
    pub fn mismatch() -> Self {
        Self::Mismatch
    }

    /// Creates a new `BadKeyMaterial` error with the given message.
    #[must_use]
    pub fn bad_key_material(message: impl Into<String>) -> Self {
        Self::BadKeyMaterial { message: message.into() }
    }

    /// Creates a new `BadSignature` error with the given message.
    #[must_use]
    pub fn bad_signature(message: impl Into<String>) -> Self {
        Self::BadSignature { message: message.into() }
    }

    /// Creates a new `Backend` error with the given message.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend { message: message.into() }
    }
}

/// Digest authentication errors.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// No trusted key was resolved for the certificate's key identifier.
    ///
    /// Reported when the trusted store is uninitialized at lookup time, when
    /// the search finds no match, or when the search fails with a condition
    /// indistinguishable from a missing key.
    #[error("Trusted key not found: {key_id}")]
    KeyNotFound {
        /// The key identifier that could not be resolved.
        key_id: KeyIdentifier,
    },

    /// The certificate declares a reserved or unknown hash algorithm.
    ///
    /// Verification stops before any key resolution on this path.
    #[error("Unsupported hash algorithm: {tag}")]
    UnsupportedAlgorithm {
        /// The offending algorithm tag.
        tag: HashAlgorithmTag,
    },

    /// Precondition violated on a trust-anchor load.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Which precondition was violated.
        reason: &'static str,
    },

    /// Keyring failure surfaced unchanged.
    ///
    /// Covers provisioning failures from
    /// [`ensure_initialized`](crate::store::TrustedKeyStore::ensure_initialized)
    /// and search failures outside the normalized set. The source chain is
    /// preserved for diagnosis.
    #[error("Keyring error: {0}")]
    Keyring(#[from] KeyringError),

    /// The cryptographic primitive's outcome, forwarded verbatim.
    #[error("Signature verification failed: {0}")]
    Signature(#[source] SignatureError),
}

impl VerifyError {
    /// Creates a new `KeyNotFound` error for the given key identifier.
    #[must_use]
    pub fn key_not_found(key_id: KeyIdentifier) -> Self {
        Self::KeyNotFound { key_id }
    }

    /// Creates a new `UnsupportedAlgorithm` error for the given tag.
    #[must_use]
    pub fn unsupported_algorithm(tag: HashAlgorithmTag) -> Self {
        Self::UnsupportedAlgorithm { tag }
    }

    /// Creates a new `InvalidArgument` error with the given reason.
    #[must_use]
    pub fn invalid_argument(reason: &'static str) -> Self {
        Self::InvalidArgument { reason }
    }
}

/// Result type alias for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Asserts that a `Result<T, VerifyError>` is an `Err` matching the given
/// [`VerifyError`] variant.
///
/// On failure, prints the expected variant and the actual result.
///
/// # Examples
///
/// ```
/// use intact_keyring::KeyIdentifier;
/// use intact_verify::{VerifyError, assert_verify_error};
///
/// let result: Result<(), VerifyError> =
///     Err(VerifyError::key_not_found(KeyIdentifier::new(77)));
/// assert_verify_error!(result, KeyNotFound);
/// ```
#[macro_export]
macro_rules! assert_verify_error {
    ($result:expr, $variant:ident) => {
        assert!(
            matches!($result, Err($crate::error::VerifyError::$variant { .. })),
            "expected VerifyError::{}, got: {:?}",
            stringify!($variant),
            $result,
        );
    };
    ($result:expr, $variant:ident, $msg:expr) => {
        assert!(
            matches!($result, Err($crate::error::VerifyError::$variant { .. })),
            "{}: expected VerifyError::{}, got: {:?}",
            $msg,
            stringify!($variant),
            $result,
        );
    };
}
