//! Strong type definitions for permit identifiers and key material.
//!
//! Both are fixed-size byte newtypes so an id can never be passed where a key
//! is expected.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Length of a permit identifier in bytes.
pub const PERMIT_ID_LEN: usize = 8;

/// Length of permit key material in bytes.
pub const KEY_LEN: usize = 16;

/// An 8-byte permit node identifier.
///
/// Rendered as 16 lowercase hex characters. Identifiers are drawn at random
/// and stay unique for as long as their node is live in a list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermitId(pub [u8; PERMIT_ID_LEN]);

impl PermitId {
    /// Create a new PermitId from raw bytes.
    pub const fn from_bytes(bytes: [u8; PERMIT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; PERMIT_ID_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|_| CoreError::InvalidPermitId(s.to_string()))?;
        let arr: [u8; PERMIT_ID_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| CoreError::InvalidPermitId(s.to_string()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for PermitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermitId({})", self.to_hex())
    }
}

impl fmt::Display for PermitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PermitId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; PERMIT_ID_LEN]> for PermitId {
    fn from(bytes: [u8; PERMIT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

/// 16 bytes of permit key material.
///
/// The key carries no cryptographic contract beyond being freshly drawn from
/// an [`EntropySource`](crate::EntropySource) on creation and rotation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermitKey(pub [u8; KEY_LEN]);

impl PermitKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Hex prefix used in listings: the first 16 hex characters.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..KEY_LEN / 2])
    }
}

impl fmt::Debug for PermitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermitKey({}...)", self.short_hex())
    }
}

impl TryFrom<&[u8]> for PermitKey {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; KEY_LEN] = slice
            .try_into()
            .map_err(|_| CoreError::InvalidKeyLength(slice.len()))?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permit_id_hex_roundtrip() {
        let id = PermitId::from_bytes([0x42; PERMIT_ID_LEN]);
        let hex = id.to_hex();
        assert_eq!(hex.len(), 16);
        let recovered: PermitId = hex.parse().unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn test_permit_id_display() {
        let id = PermitId::from_bytes([0xab; PERMIT_ID_LEN]);
        assert_eq!(format!("{}", id), "abababababababab");
        assert!(format!("{:?}", id).starts_with("PermitId("));
    }

    #[test]
    fn test_permit_id_rejects_bad_input() {
        assert_eq!(
            PermitId::from_hex("nonexistent"),
            Err(CoreError::InvalidPermitId("nonexistent".into()))
        );
        // Valid hex, wrong length
        assert!(PermitId::from_hex("abcd").is_err());
    }

    #[test]
    fn test_key_short_hex() {
        let key = PermitKey::from_bytes([0xcd; KEY_LEN]);
        assert_eq!(key.to_hex().len(), 32);
        assert_eq!(key.short_hex(), "cdcdcdcdcdcdcdcd");
    }

    #[test]
    fn test_key_from_slice_length() {
        assert!(PermitKey::try_from(&[0u8; KEY_LEN][..]).is_ok());
        assert_eq!(
            PermitKey::try_from(&[0u8; 8][..]),
            Err(CoreError::InvalidKeyLength(8))
        );
    }
}
