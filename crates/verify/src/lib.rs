//! Certificate-backed digest authentication against a trusted keyring.
//!
//! This crate answers one question: did a trusted key produce the signature
//! a certificate carries over a given content digest? Callers hand in an
//! already-parsed [`Certificate`] and the digest bytes; the crate resolves
//! the certificate's key identifier against a lazily provisioned
//! [`TrustedKeyStore`] and delegates the actual check to a
//! [`SignatureVerifier`] primitive.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use intact_keyring::{KeyIdentifier, MemoryKeyring, MemoryKeyringProvider};
//! use intact_verify::{
//!     Certificate, CertificateHeader, CertificateVerifier, Ed25519Verifier,
//!     HashAlgorithmTag, TrustedKeyStore, VerifyError,
//! };
//!
//! let keyring = Arc::new(MemoryKeyring::new(".intact"));
//! let provider = Arc::new(MemoryKeyringProvider::new(keyring));
//! let verifier = CertificateVerifier::new(
//!     TrustedKeyStore::new(provider),
//!     Arc::new(Ed25519Verifier::new()),
//! );
//!
//! let header = CertificateHeader {
//!     hash_algorithm: HashAlgorithmTag::SHA256,
//!     key_id: KeyIdentifier::new(77),
//! };
//! let certificate = Certificate::new(header, vec![0u8; 64]);
//!
//! // No anchor has been loaded, so the key cannot resolve.
//! let result = verifier.verify(Some(&certificate), &[0u8; 32]);
//! assert!(matches!(result, Err(VerifyError::KeyNotFound { .. })));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod certificate;
pub mod crypto;
pub mod error;
pub mod lookup;
pub mod store;
pub mod verifier;

pub use certificate::{Certificate, CertificateHeader, HashAlgorithmTag, SignatureDescriptor};
pub use crypto::{Ed25519Verifier, SignatureVerifier};
pub use error::{Result, SignatureError, VerifyError};
pub use lookup::KeyGuard;
pub use store::{DEFAULT_KEYRING_NAME, TrustedKeyStore, TrustedKeyStoreConfig};
pub use verifier::CertificateVerifier;
