//! Trusted key resolution.
//!
//! Resolution turns a certificate's key identifier into a held key handle.
//! The search runs against the provisioned trusted keyring, with search
//! permission required on the keyring itself, and returns a [`KeyGuard`]
//! that releases the handle when dropped.
//!
//! # Failure Normalization
//!
//! Callers of verification cannot act differently on the keyring's internal
//! failure distinctions: a key the searcher may not see, a handle that is
//! not a keyring, and transient construction contention are all equivalent
//! to the key being absent. [`resolve`] collapses those, plus a plain search
//! miss, into [`VerifyError::KeyNotFound`]. Anything outside that set is a
//! real fault and passes through unchanged.

use std::sync::Arc;

use intact_keyring::{ASYMMETRIC_KEY_TYPE, KeyHandle, KeyIdentifier, Keyring, KeyringError};

use crate::{
    error::{Result, VerifyError},
    store::TrustedKeyStore,
};

/// A resolved key handle that releases itself exactly once on drop.
///
/// Holding the guard keeps the key pinned for the duration of a
/// verification call; dropping it returns the handle to the keyring. The
/// guard is deliberately not `Clone`, so each acquisition pairs with one
/// release.
pub struct KeyGuard {
    keyring: Arc<dyn Keyring>,
    handle: KeyHandle,
}

impl KeyGuard {
    /// Returns the held key handle.
    #[must_use]
    pub fn handle(&self) -> &KeyHandle {
        &self.handle
    }
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        self.keyring.release(self.handle.clone());
    }
}

impl std::fmt::Debug for KeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGuard").field("handle", &self.handle).finish_non_exhaustive()
    }
}

/// Resolves `key_id` against the store's trusted keyring.
///
/// An uninitialized store resolves nothing: the lookup reports the key as
/// not found without searching. Otherwise the keyring is searched for an
/// asymmetric key under the identifier's canonical token, requiring search
/// permission on the keyring.
///
/// # Errors
///
/// Returns [`VerifyError::KeyNotFound`] on a miss or any normalized search
/// failure, and [`VerifyError::Keyring`] for failures outside the
/// normalized set.
pub fn resolve(store: &TrustedKeyStore, key_id: KeyIdentifier) -> Result<KeyGuard> {
    let Some(keyring) = store.keyring() else {
        tracing::debug!(%key_id, "lookup against uninitialized store");
        return Err(VerifyError::key_not_found(key_id));
    };

    let token = key_id.search_token();
    match keyring.search(ASYMMETRIC_KEY_TYPE, &token, true) {
        Ok(handle) => Ok(KeyGuard { keyring, handle }),
        Err(err) => Err(normalize_search_failure(key_id, err)),
    }
}

/// Maps a keyring search failure to the caller-facing error.
///
/// A plain miss and the three conditions indistinguishable from one (no
/// search permission, handle is not a keyring, transient contention) all
/// become [`VerifyError::KeyNotFound`]. Other failures are faults the
/// caller should see as-is.
fn normalize_search_failure(key_id: KeyIdentifier, err: KeyringError) -> VerifyError {
    match err {
        KeyringError::NotFound { .. }
        | KeyringError::PermissionDenied
        | KeyringError::NotKeyring
        | KeyringError::TryAgain => {
            tracing::debug!(%key_id, cause = %err, "search failure normalized to key-not-found");
            VerifyError::key_not_found(key_id)
        }
        other => VerifyError::Keyring(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use intact_keyring::{
        KeyringProvider, KeyringResult, MemoryKeyring, MemoryKeyringProvider,
    };
    use rstest::rstest;

    use super::*;
    use crate::assert_verify_error;

    /// Keyring whose searches always fail with a configurable error.
    struct FailingKeyring {
        error: fn() -> KeyringError,
        searches: AtomicU64,
    }

    impl FailingKeyring {
        fn new(error: fn() -> KeyringError) -> Self {
            Self { error, searches: AtomicU64::new(0) }
        }
    }

    impl Keyring for FailingKeyring {
        fn search(
            &self,
            _key_type: &str,
            _description: &str,
            _require_search_permission: bool,
        ) -> KeyringResult<KeyHandle> {
            self.searches.fetch_add(1, Ordering::Relaxed);
            Err((self.error)())
        }

        fn release(&self, _handle: KeyHandle) {}

        fn install_anchor(&self, _anchor: &[u8]) -> KeyringResult<()> {
            Ok(())
        }
    }

    struct SingleKeyringProvider {
        keyring: Arc<dyn Keyring>,
    }

    impl KeyringProvider for SingleKeyringProvider {
        fn request_keyring(
            &self,
            _name: &str,
            _restriction: Option<&str>,
        ) -> KeyringResult<Arc<dyn Keyring>> {
            Ok(Arc::clone(&self.keyring))
        }
    }

    fn store_over(keyring: Arc<dyn Keyring>) -> TrustedKeyStore {
        let store = TrustedKeyStore::new(Arc::new(SingleKeyringProvider { keyring }));
        store.ensure_initialized().expect("init");
        store
    }

    #[test]
    fn test_uninitialized_store_reports_key_not_found_without_searching() {
        let keyring = Arc::new(FailingKeyring::new(KeyringError::quota_exceeded));
        let provider =
            Arc::new(SingleKeyringProvider { keyring: Arc::clone(&keyring) as Arc<dyn Keyring> });
        let store = TrustedKeyStore::new(provider);

        let result = resolve(&store, KeyIdentifier::new(77));
        assert_verify_error!(result, KeyNotFound);
        assert_eq!(keyring.searches.load(Ordering::Relaxed), 0, "no search may run");
    }

    #[test]
    fn test_hit_returns_guard_over_the_installed_key() {
        let ring = Arc::new(MemoryKeyring::new(".test"));
        ring.add_key(KeyIdentifier::new(77).search_token(), vec![0xAB; 32]);
        let store = store_over(Arc::clone(&ring) as Arc<dyn Keyring>);

        let guard = resolve(&store, KeyIdentifier::new(77)).expect("resolve");
        assert_eq!(guard.handle().description(), "id:0000004d");
        assert_eq!(guard.handle().public_key(), &[0xAB; 32][..]);
    }

    #[test]
    fn test_miss_is_key_not_found() {
        let ring = Arc::new(MemoryKeyring::new(".test"));
        let store = store_over(ring as Arc<dyn Keyring>);

        let result = resolve(&store, KeyIdentifier::new(0xDEAD_BEEF));
        match result {
            Err(VerifyError::KeyNotFound { key_id }) => {
                assert_eq!(key_id, KeyIdentifier::new(0xDEAD_BEEF));
            }
            other => panic!("expected KeyNotFound, got {other:?}"),
        }
    }

    #[rstest]
    #[case::permission_denied(KeyringError::permission_denied as fn() -> KeyringError)]
    #[case::not_keyring(KeyringError::not_keyring as fn() -> KeyringError)]
    #[case::try_again(KeyringError::try_again as fn() -> KeyringError)]
    fn test_normalized_failures_become_key_not_found(#[case] error: fn() -> KeyringError) {
        let store = store_over(Arc::new(FailingKeyring::new(error)) as Arc<dyn Keyring>);

        let result = resolve(&store, KeyIdentifier::new(77));
        assert_verify_error!(result, KeyNotFound);
    }

    #[test]
    fn test_non_normalized_failure_passes_through() {
        let store = store_over(
            Arc::new(FailingKeyring::new(KeyringError::quota_exceeded)) as Arc<dyn Keyring>
        );

        let result = resolve(&store, KeyIdentifier::new(77));
        assert!(
            matches!(result, Err(VerifyError::Keyring(KeyringError::QuotaExceeded))),
            "quota failures must not be masked: {result:?}"
        );
    }

    #[test]
    fn test_guard_releases_exactly_once_on_drop() {
        let ring = Arc::new(MemoryKeyring::new(".test"));
        ring.add_key(KeyIdentifier::new(77).search_token(), vec![0xAB; 32]);
        let provider = Arc::new(MemoryKeyringProvider::new(Arc::clone(&ring)));
        let store = TrustedKeyStore::new(provider);
        store.ensure_initialized().expect("init");

        let guard = resolve(&store, KeyIdentifier::new(77)).expect("resolve");
        let serial = guard.handle().serial();
        assert_eq!(ring.release_count(serial), 0);

        drop(guard);
        assert_eq!(ring.release_count(serial), 1);
    }
}
