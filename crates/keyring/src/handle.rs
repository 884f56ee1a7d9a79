//! Handles to resolved keyring entries.
//!
//! Two handle lifetimes exist in this model and must not be conflated: the
//! long-lived keyring reference (owned by whoever provisioned it) and the
//! short-lived signing-key handle returned by a search. A signing-key handle
//! is owned by the call that acquired it and must be handed back to
//! [`Keyring::release`](crate::Keyring::release) exactly once.

/// A handle to a single resolved asymmetric key.
///
/// Carries the acquisition serial (unique per successful search, so release
/// accounting can be verified), the description the key was found under, and
/// the opaque public key material. The material's interpretation belongs to
/// the cryptographic primitive, not the keyring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHandle {
    serial: u64,
    description: String,
    public_key: Vec<u8>,
}

impl KeyHandle {
    /// Creates a handle for a resolved key.
    ///
    /// Backends assign `serial` uniquely per acquisition so that a release
    /// can be matched to the search that produced the handle.
    #[must_use]
    pub fn new(serial: u64, description: impl Into<String>, public_key: Vec<u8>) -> Self {
        Self { serial, description: description.into(), public_key }
    }

    /// Returns the acquisition serial.
    #[must_use]
    pub const fn serial(&self) -> u64 {
        self.serial
    }

    /// Returns the description the key was found under.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the opaque public key material.
    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_accessors() {
        let handle = KeyHandle::new(7, "id:0000004d", vec![0xAB; 32]);
        assert_eq!(handle.serial(), 7);
        assert_eq!(handle.description(), "id:0000004d");
        assert_eq!(handle.public_key(), &[0xAB; 32][..]);
    }

    #[test]
    fn test_clone_preserves_identity() {
        let handle = KeyHandle::new(7, "id:0000004d", vec![0xAB; 32]);
        let clone = handle.clone();
        assert_eq!(handle, clone);
        assert_eq!(clone.serial(), 7);
    }
}
