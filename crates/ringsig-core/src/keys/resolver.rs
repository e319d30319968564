//! Ring member public key resolution

use crate::{Error, Identity, PublicKey, Result};
use sha2::{Digest, Sha256};
use tracing::trace;

/// Placeholder public key for a member whose real key is unknown
///
/// The identity's canonical bytes are hashed with SHA-256 and the digest is used
/// as a private scalar. The result is reproducible by anyone from the identity
/// alone, so it proves nothing about the member's real account key.
pub fn derive_placeholder_public_key(identity: &Identity) -> Result<PublicKey> {
    let digest: [u8; 32] = Sha256::digest(identity.to_bytes()?).into();

    super::public_key_from_secret(&digest).map_err(|_| {
        Error::InvalidIdentityEncoding(format!(
            "{}: digest is not a valid secp256k1 scalar",
            identity
        ))
    })
}

/// Public key for every ring slot: the signer's real key at `signer_index`,
/// placeholders everywhere else
pub fn resolve_ring_public_keys(
    ring: &[Identity],
    signer_index: usize,
    signer_public_key: &PublicKey,
) -> Result<Vec<PublicKey>> {
    if signer_index >= ring.len() {
        return Err(Error::SignerIndexOutOfRange {
            index: signer_index,
            ring_size: ring.len(),
        });
    }

    ring.iter()
        .enumerate()
        .map(|(index, identity)| {
            if index == signer_index {
                Ok(*signer_public_key)
            } else {
                let key = derive_placeholder_public_key(identity)?;
                trace!(index, identity = %identity, "Derived placeholder key");
                Ok(key)
            }
        })
        .collect()
}
