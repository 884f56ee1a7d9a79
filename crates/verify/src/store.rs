//! The process-wide trusted key store.
//!
//! [`TrustedKeyStore`] owns the single slot holding the trusted keyring
//! reference. The slot starts empty and is filled at most once, by a
//! provisioning call made the first time verification runs; a provisioning
//! failure leaves the slot empty so a later call can retry. The store is an
//! explicitly passed context object — callers thread it through rather than
//! reaching for a global.
//!
//! # Concurrency
//!
//! The slot transition runs under a `parking_lot::Mutex`: at most one
//! provisioning call can succeed, and concurrent callers observe either the
//! pre- or post-transition state, never a partially set slot. Once filled,
//! the keyring itself supports concurrent read-only searches without further
//! locking here.

use std::sync::Arc;

use intact_keyring::{Keyring, KeyringProvider};
use parking_lot::Mutex;
use serde::Deserialize;

use crate::error::{Result, VerifyError};

/// Name the trusted keyring is requested under by default.
pub const DEFAULT_KEYRING_NAME: &str = ".intact";

/// Configuration for the trusted key store.
///
/// # Examples
///
/// ```
/// use intact_verify::store::{DEFAULT_KEYRING_NAME, TrustedKeyStoreConfig};
///
/// let config: TrustedKeyStoreConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.keyring_name, DEFAULT_KEYRING_NAME);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrustedKeyStoreConfig {
    /// The name passed to the provisioning mechanism.
    pub keyring_name: String,
}

impl Default for TrustedKeyStoreConfig {
    fn default() -> Self {
        Self { keyring_name: DEFAULT_KEYRING_NAME.to_string() }
    }
}

/// Lazily-initialized reference to the trusted keyring.
///
/// The keyring reference held here is long-lived and is never released by a
/// verification call; only explicit teardown (dropping the store) lets go
/// of it.
pub struct TrustedKeyStore {
    provider: Arc<dyn KeyringProvider>,
    keyring_name: String,
    slot: Mutex<Option<Arc<dyn Keyring>>>,
}

impl TrustedKeyStore {
    /// Creates an uninitialized store with the default configuration.
    #[must_use]
    pub fn new(provider: Arc<dyn KeyringProvider>) -> Self {
        Self::with_config(provider, TrustedKeyStoreConfig::default())
    }

    /// Creates an uninitialized store with the given configuration.
    #[must_use]
    pub fn with_config(provider: Arc<dyn KeyringProvider>, config: TrustedKeyStoreConfig) -> Self {
        Self { provider, keyring_name: config.keyring_name, slot: Mutex::new(None) }
    }

    /// Ensures the trusted keyring has been provisioned.
    ///
    /// On the first call (and after any failed attempt) this requests the
    /// keyring from the provisioning mechanism and stores the returned
    /// reference. Once the slot is filled, further calls are no-ops
    /// returning success without re-invoking provisioning.
    ///
    /// # Errors
    ///
    /// Propagates the provisioning failure unchanged, wrapped in
    /// [`VerifyError::Keyring`]. The slot stays empty on failure — it is
    /// never partially set.
    pub fn ensure_initialized(&self) -> Result<()> {
        let mut slot = self.slot.lock();
        if slot.is_some() {
            return Ok(());
        }

        let keyring = self.provider.request_keyring(&self.keyring_name, None)?;
        tracing::info!(keyring = %self.keyring_name, "trusted keyring provisioned");
        *slot = Some(keyring);
        Ok(())
    }

    /// Loads a trust anchor into the keyring.
    ///
    /// This only gates preconditions; decoding and installation belong to
    /// the keyring backend. The store must already be initialized (checked
    /// first — there is no destination otherwise) and the payload must be
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidArgument`] on a violated precondition,
    /// otherwise whatever the backend's installer reports.
    pub fn load_trust_anchor(&self, anchor: &[u8]) -> Result<()> {
        let Some(keyring) = self.keyring() else {
            return Err(VerifyError::invalid_argument("trusted keyring is not initialized"));
        };
        if anchor.is_empty() {
            return Err(VerifyError::invalid_argument("trust anchor payload is empty"));
        }

        keyring.install_anchor(anchor).map_err(|err| {
            tracing::warn!(keyring = %self.keyring_name, error = %err, "trust anchor install failed");
            VerifyError::from(err)
        })
    }

    /// Returns whether the trusted keyring has been provisioned.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Returns the provisioned keyring reference, if any.
    pub(crate) fn keyring(&self) -> Option<Arc<dyn Keyring>> {
        self.slot.lock().clone()
    }
}
