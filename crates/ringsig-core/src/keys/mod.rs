//! Key material and member key resolution
//!
//! The signer holds a real [`KeyPair`]. Every other ring member is represented
//! by a placeholder public key derived from its identity alone (see
//! [`derive_placeholder_public_key`]). Placeholder keys are NOT the members'
//! actual account keys.

mod address;
mod resolver;

pub use address::address_from_public_key;
pub use resolver::{derive_placeholder_public_key, resolve_ring_public_keys};

use crate::types::strip_hex_prefix;
use crate::{Error, PublicKey, Result};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Signer key pair. The private scalar is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    secret: [u8; 32],
    #[zeroize(skip)]
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a fresh random key pair
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&signing_key.to_bytes());
        let public_key = PublicKey::from_verifying_key(signing_key.verifying_key());
        Self { secret, public_key }
    }

    /// Build from a 32-byte big-endian scalar
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self> {
        let public_key = public_key_from_secret(secret)?;
        Ok(Self {
            secret: *secret,
            public_key,
        })
    }

    /// Parse a `0x`-optional, 64-digit hex private key
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = strip_hex_prefix(text.trim());
        if digits.len() != 64 {
            return Err(Error::InvalidPrivateKey(
                "private key must be 32 bytes of hex (64 digits)".into(),
            ));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
        let pair = Self::from_bytes(&bytes);
        bytes.zeroize();
        pair
    }

    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Account address of this key pair
    pub fn address(&self) -> crate::Identity {
        address_from_public_key(&self.public_key)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Derive the uncompressed public key for a private scalar
pub fn public_key_from_secret(secret: &[u8; 32]) -> Result<PublicKey> {
    let signing_key = signing_key(secret)?;
    Ok(PublicKey::from_verifying_key(signing_key.verifying_key()))
}

/// Rejects zero and scalars not below the curve order
pub(crate) fn signing_key(secret: &[u8; 32]) -> Result<SigningKey> {
    SigningKey::from_bytes(&k256::FieldBytes::from(*secret))
        .map_err(|_| Error::InvalidPrivateKey("scalar is zero or not below the curve order".into()))
}
