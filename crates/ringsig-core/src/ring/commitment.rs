//! Ring commitment and signing digest

use crate::{Identity, Result, RingCommitment, SigningDigest};
use sha2::{Digest, Sha256};

/// Bind an ordered ring into a single digest
///
/// SHA-256 over the concatenated canonical bytes of every identity, in ring
/// order. An empty ring yields the hash of the empty string.
pub fn compute_ring_commitment(ring: &[Identity]) -> Result<RingCommitment> {
    let mut hasher = Sha256::new();
    for identity in ring {
        hasher.update(identity.to_bytes()?);
    }
    Ok(RingCommitment(hasher.finalize().into()))
}

/// `SHA-256(message || commitment)`
pub fn signing_digest(message: &str, commitment: &RingCommitment) -> SigningDigest {
    let mut hasher = Sha256::new();
    hasher.update(message.as_bytes());
    hasher.update(commitment.0);
    SigningDigest(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn ids(addresses: &[&str]) -> Vec<Identity> {
        addresses.iter().map(|a| Identity::from(*a)).collect()
    }

    #[test]
    fn test_commitment_is_deterministic() {
        let ring = ids(&["0xaa11", "0xbb22", "0xcc33"]);

        assert_eq!(
            compute_ring_commitment(&ring).unwrap(),
            compute_ring_commitment(&ring).unwrap()
        );
    }

    #[test]
    fn test_commitment_binds_order() {
        let ring = ids(&["0xaa11", "0xbb22", "0xcc33"]);
        let swapped = ids(&["0xbb22", "0xaa11", "0xcc33"]);

        assert_ne!(
            compute_ring_commitment(&ring).unwrap(),
            compute_ring_commitment(&swapped).unwrap()
        );
    }

    #[test]
    fn test_commitment_is_hash_of_concatenation() {
        let ring = ids(&["0xaa11", "bb22"]);
        let expected: [u8; 32] = Sha256::digest([0xaa, 0x11, 0xbb, 0x22]).into();

        assert_eq!(compute_ring_commitment(&ring).unwrap().0, expected);
    }

    #[test]
    fn test_empty_ring_commitment() {
        let commitment = compute_ring_commitment(&[]).unwrap();
        assert_eq!(
            commitment.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_commitment_rejects_malformed_member() {
        let ring = ids(&["0xaa11", "0xgg"]);
        assert!(matches!(
            compute_ring_commitment(&ring),
            Err(Error::InvalidIdentityEncoding(_))
        ));
    }

    #[test]
    fn test_signing_digest_mixes_message_and_ring() {
        let ring_a = compute_ring_commitment(&ids(&["0xaa11"])).unwrap();
        let ring_b = compute_ring_commitment(&ids(&["0xbb22"])).unwrap();

        let digest = signing_digest("hello", &ring_a);
        assert_eq!(digest, signing_digest("hello", &ring_a));
        assert_ne!(digest, signing_digest("hellp", &ring_a));
        assert_ne!(digest, signing_digest("hello", &ring_b));

        let mut data = b"hello".to_vec();
        data.extend_from_slice(&ring_a.0);
        let expected: [u8; 32] = Sha256::digest(&data).into();
        assert_eq!(digest.0, expected);
    }
}
