//! Core types for the ring signature protocol

use crate::{Error, Result};
use k256::{
    ecdsa::{self, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Length of a SEC1 uncompressed secp256k1 point
pub const PUBLIC_KEY_LEN: usize = 65;

/// Ring member identity (an account address such as `0x52908400...`)
///
/// Identities are opaque to the protocol. Their canonical byte encoding is the
/// hex-decoded string after an optional `0x` prefix is removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap an address string
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The address as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical byte encoding used for hashing. Only the `0x` prefix is
    /// stripped; surrounding whitespace is rejected as malformed.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let digits = strip_hex_prefix(&self.0);
        hex::decode(digits)
            .map_err(|e| Error::InvalidIdentityEncoding(format!("{}: {}", self.0, e)))
    }

    /// Lowercase digits without prefix, used for duplicate detection.
    /// Two identities with equal canonical bytes normalize equally.
    pub fn normalized(&self) -> String {
        strip_hex_prefix(&self.0).to_ascii_lowercase()
    }
}

impl From<&str> for Identity {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Identity {
    fn from(address: String) -> Self {
        Self(address)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uncompressed secp256k1 public key (`0x04 || x || y`)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(#[serde(with = "hex_serde")] [u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Parse and validate a SEC1 uncompressed point
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            Error::Deserialization(format!(
                "public key must be {} bytes, got {}",
                PUBLIC_KEY_LEN,
                bytes.len()
            ))
        })?;
        VerifyingKey::from_sec1_bytes(&array)
            .map_err(|_| Error::Deserialization("public key is not a curve point".into()))?;
        Ok(Self(array))
    }

    /// Parse from hex, with or without `0x`, in either case
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(strip_hex_prefix(text.trim()))
            .map_err(|e| Error::Deserialization(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    pub(crate) fn from_verifying_key(key: &VerifyingKey) -> Self {
        let encoded = key.as_affine().to_encoded_point(false);
        let mut bytes = [0u8; PUBLIC_KEY_LEN];
        bytes.copy_from_slice(encoded.as_bytes());
        Self(bytes)
    }

    /// Raw SEC1 bytes
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Lowercase hex without prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// SHA-256 digest binding an ordered ring of identities
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RingCommitment(#[serde(with = "hex_serde")] pub [u8; 32]);

impl RingCommitment {
    /// Constant-time comparison
    pub fn matches(&self, other: &RingCommitment) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for RingCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RingCommitment({})", self.to_hex())
    }
}

/// The digest that is actually signed: `SHA-256(message || commitment)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningDigest(pub [u8; 32]);

impl SigningDigest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// ECDSA signature (r, s) with its recovery discriminant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// R component
    #[serde(with = "hex_serde")]
    pub r: [u8; 32],
    /// S component
    #[serde(with = "hex_serde")]
    pub s: [u8; 32],
    /// Recovery discriminant (0..=3)
    #[serde(rename = "recovery")]
    pub recovery_id: u8,
}

impl Signature {
    /// Create a new signature
    pub fn new(r: [u8; 32], s: [u8; 32], recovery_id: u8) -> Self {
        Self { r, s, recovery_id }
    }

    pub(crate) fn from_recoverable(signature: &ecdsa::Signature, recovery: ecdsa::RecoveryId) -> Self {
        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Self::new(r, s, recovery.to_byte())
    }

    /// Parse the (r, s) pair; fails if either scalar is zero or out of range
    pub(crate) fn to_ecdsa(&self) -> Result<ecdsa::Signature> {
        ecdsa::Signature::from_scalars(
            *k256::FieldBytes::from_slice(&self.r),
            *k256::FieldBytes::from_slice(&self.s),
        )
        .map_err(|e| Error::Deserialization(format!("malformed signature: {}", e)))
    }

    /// Convert to DER format
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(self.to_ecdsa()?.to_der().as_bytes().to_vec())
    }

    /// Convert to bytes (r || s)
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        bytes
    }
}

pub(crate) fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Fixed-size byte arrays as lowercase hex strings
mod hex_serde {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(super::strip_hex_prefix(&text)).map_err(D::Error::custom)?;
        let len = bytes.len();
        bytes
            .try_into()
            .map_err(|_| D::Error::custom(format!("expected {} bytes, got {}", N, len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_encoding() {
        let id = Identity::from("0xAaBb");
        assert_eq!(id.to_bytes().unwrap(), vec![0xaa, 0xbb]);

        let bare = Identity::from("aabb");
        assert_eq!(bare.to_bytes().unwrap(), vec![0xaa, 0xbb]);
    }

    #[test]
    fn test_identity_rejects_malformed() {
        let err = Identity::from("0xnot-hex").to_bytes().unwrap_err();
        assert!(matches!(err, Error::InvalidIdentityEncoding(_)));

        let odd = Identity::from("0xabc").to_bytes().unwrap_err();
        assert!(matches!(odd, Error::InvalidIdentityEncoding(_)));

        let padded = Identity::from(" 0xaa").to_bytes().unwrap_err();
        assert!(matches!(padded, Error::InvalidIdentityEncoding(_)));
    }

    #[test]
    fn test_normalized_ignores_prefix_and_case() {
        assert_eq!(
            Identity::from("0xAbCd").normalized(),
            Identity::from("ABCD").normalized()
        );
        assert_eq!(Identity::from("0Xabcd").normalized(), "abcd");
    }

    #[test]
    fn test_public_key_hex_case_insensitive() {
        let key = crate::keys::public_key_from_secret(&[7u8; 32]).unwrap();
        let upper = key.to_hex().to_uppercase();

        assert_eq!(PublicKey::from_hex(&upper).unwrap(), key);
        assert_eq!(PublicKey::from_hex(&format!("0x{}", key.to_hex())).unwrap(), key);
    }

    #[test]
    fn test_public_key_rejects_off_curve() {
        let mut bytes = [0u8; PUBLIC_KEY_LEN];
        bytes[0] = 0x04;
        assert!(PublicKey::from_slice(&bytes).is_err());
        assert!(PublicKey::from_slice(&bytes[..33]).is_err());
    }

    #[test]
    fn test_signature_serde_shape() {
        let sig = Signature::new([1u8; 32], [2u8; 32], 1);
        let json = serde_json::to_value(&sig).unwrap();

        assert_eq!(json["r"], hex::encode([1u8; 32]));
        assert_eq!(json["s"], hex::encode([2u8; 32]));
        assert_eq!(json["recovery"], 1);
    }

    #[test]
    fn test_signature_rejects_zero_scalar() {
        let sig = Signature::new([0u8; 32], [2u8; 32], 0);
        assert!(sig.to_der().is_err());
    }
}
