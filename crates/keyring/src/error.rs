//! Keyring error types and result alias.
//!
//! This module defines the canonical set of failures a keyring backend can
//! produce. All backends must map their internal errors to these variants so
//! that callers (in particular the verification core) can apply a uniform
//! error policy.
//!
//! # Error Types
//!
//! - [`KeyringError::NotFound`] - No key matches the search description
//! - [`KeyringError::PermissionDenied`] - Caller lacks search permission
//! - [`KeyringError::NotKeyring`] - The handle does not refer to a keyring
//! - [`KeyringError::TryAgain`] - Transient contention; the operation may be retried
//! - [`KeyringError::QuotaExceeded`] - Keyring capacity or quota exhausted
//! - [`KeyringError::Internal`] - Backend-specific internal errors
//!
//! # Example
//!
//! ```
//! use intact_keyring::{KeyringError, KeyringResult};
//!
//! fn lookup(description: &str) -> KeyringResult<Vec<u8>> {
//!     Err(KeyringError::not_found(description))
//! }
//! ```

use std::sync::Arc;

use thiserror::Error;

/// A boxed error type for source chain tracking.
pub type BoxError = Arc<dyn std::error::Error + Send + Sync>;

/// Result type alias for keyring operations.
pub type KeyringResult<T> = Result<T, KeyringError>;

/// Errors that can occur during keyring operations.
///
/// Backend implementations should map their internal error types to these
/// variants. Errors preserve their source chain via the `#[source]`
/// attribute where one exists.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyringError {
    /// No key in the keyring matches the search description.
    #[error("No matching key: {description}")]
    NotFound {
        /// The search description that produced no match.
        description: String,
    },

    /// The caller does not hold search permission on the keyring.
    #[error("Search permission denied")]
    PermissionDenied,

    /// The handle used for the search does not refer to a keyring.
    ///
    /// This is a structural error: the reference names a single key (or
    /// nothing keyring-shaped at all), so a nested search cannot proceed.
    #[error("Handle does not refer to a keyring")]
    NotKeyring,

    /// Transient contention inside the keyring backend.
    ///
    /// The operation did not complete but may succeed if retried.
    #[error("Keyring temporarily unavailable")]
    TryAgain,

    /// The keyring's key count or payload quota has been exhausted.
    #[error("Keyring quota exceeded")]
    QuotaExceeded,

    /// Internal keyring backend error.
    ///
    /// Catch-all for backend-specific failures that fit no other category.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
        /// The underlying error that caused this internal failure.
        #[source]
        source: Option<BoxError>,
    },
}

impl KeyringError {
    /// Creates a new `NotFound` error for the given search description.
    #[must_use]
    pub fn not_found(description: impl Into<String>) -> Self {
        Self::NotFound { description: description.into() }
    }

    /// Creates a new `PermissionDenied` error.
    #[must_use]
    pub fn permission_denied() -> Self {
        Self::PermissionDenied
    }

    /// Creates a new `NotKeyring` error.
    #[must_use]
    pub fn not_keyring() -> Self {
        Self::NotKeyring
    }

    /// Creates a new `TryAgain` error.
    #[must_use]
    pub fn try_again() -> Self {
        Self::TryAgain
    }

    /// Creates a new `QuotaExceeded` error.
    #[must_use]
    pub fn quota_exceeded() -> Self {
        Self::QuotaExceeded
    }

    /// Creates a new `Internal` error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), source: None }
    }

    /// Creates a new `Internal` error with a message and source error.
    #[must_use]
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Internal { message: message.into(), source: Some(Arc::new(source)) }
    }
}
