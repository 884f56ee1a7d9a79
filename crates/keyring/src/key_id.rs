//! Numeric key identifiers and their canonical search token.
//!
//! A certificate header names its signing key by a 32-bit identifier. The
//! keyring stores trusted keys under a fixed-format description derived from
//! that identifier, so lookup is a plain string match.
//!
//! # Canonical Form
//!
//! ```text
//! id:<8 lowercase hex digits, zero-padded, big-endian numeric order>
//! ```
//!
//! No other width or case is valid: `77` renders as `id:0000004d`, never
//! `id:4d` or `id:0000004D`.

use std::fmt;

/// Prefix of the canonical search token.
const TOKEN_PREFIX: &str = "id:";

/// A 32-bit key identifier taken from a certificate header.
///
/// The identifier is a plain numeric value; its only structured form is the
/// canonical search token produced by [`search_token`](Self::search_token).
///
/// # Examples
///
/// ```
/// use intact_keyring::KeyIdentifier;
///
/// let id = KeyIdentifier::new(77);
/// assert_eq!(id.search_token(), "id:0000004d");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyIdentifier(u32);

impl KeyIdentifier {
    /// Creates a key identifier from its numeric value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Creates a key identifier from 4 bytes in wire (big-endian) order.
    ///
    /// Certificate headers carry the identifier big-endian; this constructor
    /// is the bridge for parsers working on raw header bytes.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Renders the canonical keyring search token.
    ///
    /// The format is exact: `id:` followed by 8 lowercase hex digits of the
    /// big-endian numeric value, zero-padded.
    #[must_use]
    pub fn search_token(self) -> String {
        format!("{TOKEN_PREFIX}{:08x}", self.0)
    }
}

impl fmt::Display for KeyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TOKEN_PREFIX}{:08x}", self.0)
    }
}

impl From<u32> for KeyIdentifier {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::zero(0, "id:00000000")]
    #[case::small(77, "id:0000004d")]
    #[case::mid(0x1234_abcd, "id:1234abcd")]
    #[case::max(u32::MAX, "id:ffffffff")]
    fn test_search_token_exact_form(#[case] raw: u32, #[case] expected: &str) {
        assert_eq!(KeyIdentifier::new(raw).search_token(), expected);
    }

    #[test]
    fn test_search_token_fixed_width_and_lowercase() {
        for raw in [0u32, 1, 0xF, 0xFF, 0xFFFF, u32::MAX] {
            let token = KeyIdentifier::new(raw).search_token();
            assert_eq!(token.len(), 11, "token must be exactly 11 bytes: {token}");
            assert!(token.starts_with("id:"));
            assert!(
                token[3..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
                "hex digits must be lowercase: {token}"
            );
        }
    }

    #[test]
    fn test_from_be_bytes_matches_wire_order() {
        let id = KeyIdentifier::from_be_bytes([0x00, 0x00, 0x00, 0x4d]);
        assert_eq!(id.raw(), 77);
        assert_eq!(id.search_token(), "id:0000004d");
    }

    #[test]
    fn test_display_matches_search_token() {
        let id = KeyIdentifier::new(77);
        assert_eq!(format!("{id}"), id.search_token());
    }

    #[test]
    fn test_from_u32() {
        let id: KeyIdentifier = 77u32.into();
        assert_eq!(id, KeyIdentifier::new(77));
    }
}
