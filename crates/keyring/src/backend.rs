//! Keyring collaborator traits.
//!
//! This module defines the interfaces the verification core depends on.
//! Production deployments back them with a real trust store; tests use
//! [`MemoryKeyring`](crate::MemoryKeyring) or purpose-built mocks. The core
//! never reaches around these traits.
//!
//! # Contracts
//!
//! - [`KeyringProvider::request_keyring`] is the provisioning mechanism: it
//!   obtains or creates the trusted key collection, and is invoked once per
//!   process lifetime by the verification core.
//! - [`Keyring::search`] resolves a description to a key handle. Every handle
//!   it returns must be passed to [`Keyring::release`] exactly once.
//! - [`Keyring::install_anchor`] installs a trust anchor payload into the
//!   keyring. Payload validation beyond emptiness is the backend's concern.
//!
//! All calls are synchronous and blocking; callers needing timeouts wrap
//! them externally.

use std::sync::Arc;

use crate::{error::KeyringResult, handle::KeyHandle};

/// The key type searched for when resolving signing keys.
///
/// Verification only ever resolves asymmetric public keys; other key types
/// in the same keyring are invisible to it.
pub const ASYMMETRIC_KEY_TYPE: &str = "asymmetric";

/// A trusted collection of keys supporting search, release, and anchor
/// installation.
///
/// Implementations must be safe for concurrent read-only searches; the
/// verification core performs no additional locking around them.
pub trait Keyring: Send + Sync {
    /// Searches the keyring for a key of `key_type` matching `description`.
    ///
    /// When `require_search_permission` is true, the search must fail with
    /// [`KeyringError::PermissionDenied`] unless the caller holds search
    /// permission on the keyring reference.
    ///
    /// On success the returned handle is owned by the caller, who must hand
    /// it back via [`release`](Self::release) exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`KeyringError::NotFound`] when no key matches, or any other
    /// [`KeyringError`] variant for backend failures.
    ///
    /// [`KeyringError`]: crate::KeyringError
    /// [`KeyringError::NotFound`]: crate::KeyringError::NotFound
    /// [`KeyringError::PermissionDenied`]: crate::KeyringError::PermissionDenied
    fn search(
        &self,
        key_type: &str,
        description: &str,
        require_search_permission: bool,
    ) -> KeyringResult<KeyHandle>;

    /// Releases a handle previously returned by [`search`](Self::search).
    ///
    /// Must tolerate being the sole release for a handle acquired exactly
    /// once. Releasing the same acquisition twice is a caller bug.
    fn release(&self, handle: KeyHandle);

    /// Installs a trust anchor payload into the keyring.
    ///
    /// The payload encoding is a backend contract; the verification core
    /// only gates on preconditions (initialized store, non-empty payload)
    /// before delegating here.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyringError`](crate::KeyringError) if the payload cannot
    /// be decoded or installed.
    fn install_anchor(&self, anchor: &[u8]) -> KeyringResult<()>;
}

/// The provisioning mechanism that produces the trusted keyring.
///
/// Called by the verification core the first time verification is attempted
/// while the trusted store is uninitialized.
pub trait KeyringProvider: Send + Sync {
    /// Obtains or creates the keyring registered under `name`.
    ///
    /// `restriction` optionally names a keyring restriction to apply at
    /// creation time; the verification core passes `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyringError`](crate::KeyringError) if the keyring cannot
    /// be obtained or created. The caller treats the failure as opaque and
    /// propagates it unchanged.
    fn request_keyring(
        &self,
        name: &str,
        restriction: Option<&str>,
    ) -> KeyringResult<Arc<dyn Keyring>>;
}
