//! # Intact Keyring
//!
//! Trusted keyring abstraction for the intact verification core.
//!
//! This crate provides:
//! - **Collaborator traits**: [`Keyring`] (search, release, anchor install)
//!   and [`KeyringProvider`] (one-time provisioning of the trusted keyring)
//! - **Key identity**: [`KeyIdentifier`] and its canonical `id:xxxxxxxx`
//!   search token
//! - **Key handles**: [`KeyHandle`], the per-acquisition reference a search
//!   returns and a caller must release exactly once
//! - **Memory backend**: [`MemoryKeyring`] / [`MemoryKeyringProvider`] for
//!   tests and embedded use
//!
//! ## Ownership Model
//!
//! The keyring reference returned by provisioning is long-lived and shared.
//! Handles returned by [`Keyring::search`] are short-lived and exclusively
//! owned by the acquiring call; each must be passed back to
//! [`Keyring::release`] exactly once, on every exit path.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use intact_keyring::{
//!     ASYMMETRIC_KEY_TYPE, Keyring, KeyIdentifier, MemoryKeyring,
//! };
//!
//! let ring = Arc::new(MemoryKeyring::new(".intact"));
//! ring.add_key(KeyIdentifier::new(77).search_token(), vec![0xAB; 32]);
//!
//! let handle = ring.search(ASYMMETRIC_KEY_TYPE, "id:0000004d", true)?;
//! assert_eq!(handle.public_key().len(), 32);
//! ring.release(handle);
//! # Ok::<(), intact_keyring::KeyringError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Collaborator traits for keyring backends.
pub mod backend;
/// Keyring error types.
pub mod error;
/// Handles to resolved keys.
pub mod handle;
/// Numeric key identifiers and canonical search tokens.
pub mod key_id;
/// In-memory keyring backend.
pub mod memory;

// Re-export key types for convenience
pub use backend::{ASYMMETRIC_KEY_TYPE, Keyring, KeyringProvider};
pub use error::{BoxError, KeyringError, KeyringResult};
pub use handle::KeyHandle;
pub use key_id::KeyIdentifier;
pub use memory::{MemoryKeyring, MemoryKeyringProvider};
