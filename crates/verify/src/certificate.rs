//! Certificate value types.
//!
//! A [`Certificate`] arrives here already parsed — wire decoding is the
//! parser collaborator's contract, not this crate's. The header carries the
//! two fields verification needs: the declared hash algorithm and the key
//! identifier naming which trusted key should have produced the signature.
//! The body is opaque; only the cryptographic primitive interprets it.

use std::fmt;

use intact_keyring::KeyIdentifier;

/// The hash algorithm a certificate declares for its digest.
///
/// Tags at or above [`RESERVED_INVALID`](Self::RESERVED_INVALID) are
/// reserved and mark the algorithm unsupported. Construction performs no
/// validation — the gate lives in the verifier, which must reject reserved
/// tags before any key resolution happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashAlgorithmTag(u8);

impl HashAlgorithmTag {
    /// SHA-1.
    pub const SHA1: Self = Self(0);
    /// SHA-256.
    pub const SHA256: Self = Self(1);
    /// SHA-384.
    pub const SHA384: Self = Self(2);
    /// SHA-512.
    pub const SHA512: Self = Self(3);
    /// First reserved tag value. This value and everything above it is
    /// unsupported.
    pub const RESERVED_INVALID: Self = Self(4);

    /// Creates a tag from its raw byte, without validation.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw tag byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns whether the tag names a supported algorithm.
    ///
    /// Equal to or above the reserved sentinel is unsupported.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        self.0 < Self::RESERVED_INVALID.0
    }
}

impl fmt::Display for HashAlgorithmTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SHA1 => f.write_str("sha1"),
            Self::SHA256 => f.write_str("sha256"),
            Self::SHA384 => f.write_str("sha384"),
            Self::SHA512 => f.write_str("sha512"),
            Self(raw) => write!(f, "reserved({raw})"),
        }
    }
}

/// The parsed header of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertificateHeader {
    /// The hash algorithm the signer declares for the digest.
    pub hash_algorithm: HashAlgorithmTag,
    /// Identifier of the trusted key that should have produced the signature.
    pub key_id: KeyIdentifier,
}

/// An externally parsed certificate.
///
/// Immutable once constructed; verification never mutates it. The body's
/// encoding is a contract between the signer and the cryptographic
/// primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    header: CertificateHeader,
    body: Vec<u8>,
}

impl Certificate {
    /// Creates a certificate from its parsed header and opaque body.
    #[must_use]
    pub fn new(header: CertificateHeader, body: Vec<u8>) -> Self {
        Self { header, body }
    }

    /// Returns the parsed header.
    #[must_use]
    pub const fn header(&self) -> &CertificateHeader {
        &self.header
    }

    /// Returns the opaque body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// The transient bundle handed to the cryptographic primitive.
///
/// Built fresh for every verification call from the caller's digest and the
/// certificate's declared algorithm; never persisted.
#[derive(Debug, Clone, Copy)]
pub struct SignatureDescriptor<'a> {
    digest: &'a [u8],
    hash_algorithm: HashAlgorithmTag,
}

impl<'a> SignatureDescriptor<'a> {
    /// Creates a descriptor over the given digest and algorithm.
    #[must_use]
    pub const fn new(digest: &'a [u8], hash_algorithm: HashAlgorithmTag) -> Self {
        Self { digest, hash_algorithm }
    }

    /// Returns the digest bytes.
    #[must_use]
    pub const fn digest(&self) -> &'a [u8] {
        self.digest
    }

    /// Returns the declared hash algorithm.
    #[must_use]
    pub const fn hash_algorithm(&self) -> HashAlgorithmTag {
        self.hash_algorithm
    }
}
