//! In-memory keyring backend.
//!
//! [`MemoryKeyring`] implements [`Keyring`] over a process-local map. It is
//! the reference backend for tests and for embedding the verification core
//! without a system trust store. [`MemoryKeyringProvider`] implements the
//! provisioning side, handing out a shared keyring and counting requests so
//! tests can assert provision-once behavior.
//!
//! # Anchor Encoding
//!
//! [`MemoryKeyring::install_anchor`] accepts a fixed 36-byte payload:
//!
//! ```text
//! +----------------------+------------------------------+
//! | key identifier       | Ed25519 public key           |
//! | (4 bytes, big-endian)| (32 bytes, raw)              |
//! +----------------------+------------------------------+
//! ```
//!
//! The key is inserted under the identifier's canonical search token.
//! Richer anchor formats (X.509 chains, multi-key bundles) belong to real
//! trust-store backends implementing the same trait.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::{Mutex, RwLock};

use crate::{
    backend::{ASYMMETRIC_KEY_TYPE, Keyring, KeyringProvider},
    error::{KeyringError, KeyringResult},
    handle::KeyHandle,
    key_id::KeyIdentifier,
};

/// Length of a raw Ed25519 public key in bytes.
const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Total length of the fixed anchor payload: 4-byte key id + raw key.
const ANCHOR_LEN: usize = 4 + ED25519_PUBLIC_KEY_LEN;

/// An in-memory [`Keyring`] backed by a `parking_lot::RwLock` map.
///
/// Handles are issued with monotonically increasing serials, and releases
/// are recorded per serial, so tests can assert that every acquisition was
/// released exactly once.
pub struct MemoryKeyring {
    name: String,
    keys: RwLock<HashMap<String, Vec<u8>>>,
    next_serial: AtomicU64,
    releases: Mutex<HashMap<u64, usize>>,
}

impl MemoryKeyring {
    /// Creates an empty keyring registered under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: RwLock::new(HashMap::new()),
            next_serial: AtomicU64::new(1),
            releases: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the keyring's registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a key directly under `description`, bypassing anchor decoding.
    ///
    /// Replaces any existing key with the same description.
    pub fn add_key(&self, description: impl Into<String>, public_key: Vec<u8>) {
        self.keys.write().insert(description.into(), public_key);
    }

    /// Returns the number of keys currently installed.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys.read().len()
    }

    /// Returns how many times the handle with `serial` has been released.
    ///
    /// Exactly-once release is the invariant verification code must uphold;
    /// this counter lets tests observe it.
    #[must_use]
    pub fn release_count(&self, serial: u64) -> usize {
        self.releases.lock().get(&serial).copied().unwrap_or(0)
    }

    /// Returns the total number of handles issued so far.
    #[must_use]
    pub fn issued_count(&self) -> u64 {
        self.next_serial.load(Ordering::Relaxed) - 1
    }
}

impl Keyring for MemoryKeyring {
    fn search(
        &self,
        key_type: &str,
        description: &str,
        _require_search_permission: bool,
    ) -> KeyringResult<KeyHandle> {
        // The memory keyring holds asymmetric keys only; a search for any
        // other type cannot match. Possessor search permission is always
        // granted, so the permission flag never fails here.
        if key_type != ASYMMETRIC_KEY_TYPE {
            return Err(KeyringError::not_found(description));
        }

        let keys = self.keys.read();
        let Some(public_key) = keys.get(description) else {
            tracing::debug!(keyring = %self.name, description, "search miss");
            return Err(KeyringError::not_found(description));
        };

        let serial = self.next_serial.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(keyring = %self.name, description, serial, "search hit");
        Ok(KeyHandle::new(serial, description, public_key.clone()))
    }

    fn release(&self, handle: KeyHandle) {
        let mut releases = self.releases.lock();
        let count = releases.entry(handle.serial()).or_insert(0);
        *count += 1;
        debug_assert_eq!(*count, 1, "handle serial {} released more than once", handle.serial());
    }

    fn install_anchor(&self, anchor: &[u8]) -> KeyringResult<()> {
        if anchor.len() != ANCHOR_LEN {
            tracing::warn!(
                keyring = %self.name,
                got = anchor.len(),
                expected = ANCHOR_LEN,
                "rejecting trust anchor with wrong length"
            );
            return Err(KeyringError::internal(format!(
                "trust anchor must be {ANCHOR_LEN} bytes, got {}",
                anchor.len()
            )));
        }

        let mut id_bytes = [0u8; 4];
        id_bytes.copy_from_slice(&anchor[..4]);
        let key_id = KeyIdentifier::from_be_bytes(id_bytes);
        let description = key_id.search_token();

        self.keys.write().insert(description.clone(), anchor[4..].to_vec());
        tracing::info!(keyring = %self.name, %key_id, "trust anchor installed");
        Ok(())
    }
}

/// A [`KeyringProvider`] that hands out one shared [`MemoryKeyring`].
///
/// Records every provisioning request (count and last requested name) so
/// tests can assert the verification core provisions at most once.
pub struct MemoryKeyringProvider {
    keyring: Arc<MemoryKeyring>,
    requests: AtomicU64,
    last_requested: Mutex<Option<String>>,
}

impl MemoryKeyringProvider {
    /// Creates a provider serving the given keyring.
    #[must_use]
    pub fn new(keyring: Arc<MemoryKeyring>) -> Self {
        Self { keyring, requests: AtomicU64::new(0), last_requested: Mutex::new(None) }
    }

    /// Returns the shared keyring this provider serves.
    #[must_use]
    pub fn keyring(&self) -> Arc<MemoryKeyring> {
        Arc::clone(&self.keyring)
    }

    /// Returns how many times provisioning was requested.
    #[must_use]
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Returns the name passed to the most recent provisioning request.
    #[must_use]
    pub fn last_requested_name(&self) -> Option<String> {
        self.last_requested.lock().clone()
    }
}

impl KeyringProvider for MemoryKeyringProvider {
    fn request_keyring(
        &self,
        name: &str,
        _restriction: Option<&str>,
    ) -> KeyringResult<Arc<dyn Keyring>> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        *self.last_requested.lock() = Some(name.to_string());
        Ok(Arc::clone(&self.keyring) as Arc<dyn Keyring>)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn anchor_for(key_id: u32, key: &[u8; 32]) -> Vec<u8> {
        let mut anchor = key_id.to_be_bytes().to_vec();
        anchor.extend_from_slice(key);
        anchor
    }

    #[test]
    fn test_search_hit_returns_material() {
        let ring = MemoryKeyring::new(".test");
        ring.add_key("id:0000004d", vec![0xAB; 32]);

        let handle = ring.search(ASYMMETRIC_KEY_TYPE, "id:0000004d", true).expect("search");
        assert_eq!(handle.description(), "id:0000004d");
        assert_eq!(handle.public_key(), &[0xAB; 32][..]);
    }

    #[test]
    fn test_search_miss_is_not_found() {
        let ring = MemoryKeyring::new(".test");
        let result = ring.search(ASYMMETRIC_KEY_TYPE, "id:0000004d", true);
        assert!(
            matches!(result, Err(KeyringError::NotFound { ref description }) if description == "id:0000004d")
        );
    }

    #[test]
    fn test_search_wrong_key_type_is_not_found() {
        let ring = MemoryKeyring::new(".test");
        ring.add_key("id:0000004d", vec![0xAB; 32]);

        let result = ring.search("user", "id:0000004d", true);
        assert!(matches!(result, Err(KeyringError::NotFound { .. })));
    }

    #[test]
    fn test_serials_are_distinct_per_acquisition() {
        let ring = MemoryKeyring::new(".test");
        ring.add_key("id:0000004d", vec![0xAB; 32]);

        let a = ring.search(ASYMMETRIC_KEY_TYPE, "id:0000004d", true).expect("first");
        let b = ring.search(ASYMMETRIC_KEY_TYPE, "id:0000004d", true).expect("second");
        assert_ne!(a.serial(), b.serial());
        assert_eq!(ring.issued_count(), 2);
    }

    #[test]
    fn test_release_is_recorded_per_serial() {
        let ring = MemoryKeyring::new(".test");
        ring.add_key("id:0000004d", vec![0xAB; 32]);

        let handle = ring.search(ASYMMETRIC_KEY_TYPE, "id:0000004d", true).expect("search");
        let serial = handle.serial();
        assert_eq!(ring.release_count(serial), 0);

        ring.release(handle);
        assert_eq!(ring.release_count(serial), 1);
    }

    #[test]
    fn test_install_anchor_round_trip() {
        let ring = MemoryKeyring::new(".test");
        let anchor = anchor_for(77, &[0xCD; 32]);

        ring.install_anchor(&anchor).expect("install");
        assert_eq!(ring.key_count(), 1);

        let handle = ring.search(ASYMMETRIC_KEY_TYPE, "id:0000004d", true).expect("search");
        assert_eq!(handle.public_key(), &[0xCD; 32][..]);
    }

    #[test]
    fn test_install_anchor_rejects_wrong_length() {
        let ring = MemoryKeyring::new(".test");
        let result = ring.install_anchor(&[0u8; 10]);
        assert!(matches!(result, Err(KeyringError::Internal { .. })));
        assert_eq!(ring.key_count(), 0);
    }

    #[test]
    fn test_provider_counts_requests() {
        let ring = Arc::new(MemoryKeyring::new(".test"));
        let provider = MemoryKeyringProvider::new(Arc::clone(&ring));
        assert_eq!(provider.request_count(), 0);

        let _keyring = provider.request_keyring(".test", None).expect("request");
        let _keyring = provider.request_keyring(".test", None).expect("request");
        assert_eq!(provider.request_count(), 2);
        assert_eq!(provider.last_requested_name().as_deref(), Some(".test"));
    }
}
