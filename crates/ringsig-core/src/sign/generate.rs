//! Ring signature generation

use crate::keys::{resolve_ring_public_keys, signing_key};
use crate::ring::{compute_ring_commitment, signing_digest};
use crate::{Error, Identity, PublicKey, Result, Signature};
use tracing::{debug, info, instrument};

use super::SignatureArtifact;

/// Sign `message` on behalf of `ring`
///
/// The signing digest is `SHA-256(message || ring_commitment)`, signed with the
/// signer's key using RFC 6979 deterministic nonces. The caller chooses the
/// signer's position; `ring[signer_index]` is expected to be the signer.
///
/// # Arguments
/// * `message` - Message to sign (hashed as UTF-8)
/// * `signer_private_key` - The signer's 32-byte scalar
/// * `ring` - Ordered ring members
/// * `signer_index` - Position of the signer in `ring`
///
/// # Returns
/// A complete [`SignatureArtifact`], or an error with nothing produced
#[instrument(skip(signer_private_key, ring), fields(ring_size = ring.len()))]
pub fn generate(
    message: &str,
    signer_private_key: &[u8; 32],
    ring: &[Identity],
    signer_index: usize,
) -> Result<SignatureArtifact> {
    let signing_key = signing_key(signer_private_key)?;
    let signer_public_key = PublicKey::from_verifying_key(signing_key.verifying_key());

    let ring_public_keys = resolve_ring_public_keys(ring, signer_index, &signer_public_key)?;

    let ring_commitment = compute_ring_commitment(ring)?;
    debug!(commitment = %ring_commitment.to_hex(), "Computed ring commitment");

    let digest = signing_digest(message, &ring_commitment);

    let (ecdsa_signature, recovery_id) = signing_key
        .sign_prehash_recoverable(digest.as_bytes())
        .map_err(|e| Error::InvalidPrivateKey(format!("signing failed: {}", e)))?;
    let signature = Signature::from_recoverable(&ecdsa_signature, recovery_id);

    info!(
        r = hex::encode(signature.r),
        s = hex::encode(signature.s),
        recovery_id = signature.recovery_id,
        "Ring signature generated"
    );

    Ok(SignatureArtifact {
        ring: ring.to_vec(),
        ring_public_keys,
        signer_index,
        message: message.to_string(),
        ring_commitment,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{derive_placeholder_public_key, public_key_from_secret};

    const SECRET: [u8; 32] = [0x11; 32];

    fn ring() -> Vec<Identity> {
        vec![
            Identity::from("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            Identity::from("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            Identity::from("0xcccccccccccccccccccccccccccccccccccccccc"),
        ]
    }

    #[test]
    fn test_artifact_contents() {
        let ring = ring();
        let artifact = generate("hello", &SECRET, &ring, 1).unwrap();

        assert_eq!(artifact.ring, ring);
        assert_eq!(artifact.signer_index, 1);
        assert_eq!(artifact.message, "hello");
        assert_eq!(
            artifact.ring_commitment,
            compute_ring_commitment(&ring).unwrap()
        );
        assert_eq!(
            artifact.ring_public_keys,
            vec![
                derive_placeholder_public_key(&ring[0]).unwrap(),
                public_key_from_secret(&SECRET).unwrap(),
                derive_placeholder_public_key(&ring[2]).unwrap(),
            ]
        );
        assert!(artifact.signature.recovery_id < 4);
    }

    #[test]
    fn test_deterministic_nonce() {
        let first = generate("hello", &SECRET, &ring(), 1).unwrap();
        let second = generate("hello", &SECRET, &ring(), 1).unwrap();

        assert_eq!(first.signature, second.signature);
    }

    #[test]
    fn test_rejects_signer_index() {
        let err = generate("hello", &SECRET, &ring(), 3).unwrap_err();
        assert!(matches!(err, Error::SignerIndexOutOfRange { .. }));
    }

    #[test]
    fn test_rejects_zero_key() {
        let err = generate("hello", &[0u8; 32], &ring(), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidPrivateKey(_)));
    }

    #[test]
    fn test_rejects_malformed_ring() {
        let mut ring = ring();
        ring[2] = Identity::from("0xnot-an-address");

        let err = generate("hello", &SECRET, &ring, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidIdentityEncoding(_)));
    }

    #[test]
    fn test_artifact_json_round_trip() {
        let artifact = generate("hello", &SECRET, &ring(), 2).unwrap();
        let json = artifact.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ring_public_keys"].as_array().unwrap().len(), 3);
        assert_eq!(value["signature"]["recovery"], artifact.signature.recovery_id);

        assert_eq!(SignatureArtifact::from_json(&json).unwrap(), artifact);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            SignatureArtifact::from_json("{\"ring\": 5}"),
            Err(Error::Deserialization(_))
        ));
    }
}
