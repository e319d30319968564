//! Verification implementation

use crate::ring::{compute_ring_commitment, signing_digest};
use crate::{Error, Identity, PublicKey, Result, SignatureArtifact, SigningDigest};
use k256::ecdsa::{self, signature::hazmat::PrehashVerifier, RecoveryId, VerifyingKey};
use tracing::{debug, info, instrument, warn};

use super::{RecoveryMode, VerificationRequest, VerificationResult};

/// Number of secp256k1 recovery discriminants
const RECOVERY_IDS: u8 = 4;

/// Verify `artifact` against a caller-supplied ring, honoring the stored
/// recovery discriminant
pub fn verify(message: &str, artifact: &SignatureArtifact, ring: &[Identity]) -> VerificationResult {
    verify_with_mode(message, artifact, ring, RecoveryMode::default())
}

/// Verify with an explicit recovery strategy
///
/// 1. Recompute the ring commitment and compare it with the artifact's.
/// 2. Recompute the signing digest from `message` and that commitment.
/// 3. Recover a public key from the signature.
/// 4. Verify the signature against the recovered key.
/// 5. Check that key against the artifact's ring public keys.
#[instrument(skip(artifact, ring), fields(ring_size = ring.len()))]
pub fn verify_with_mode(
    message: &str,
    artifact: &SignatureArtifact,
    ring: &[Identity],
    mode: RecoveryMode,
) -> VerificationResult {
    match check(message, artifact, ring, mode) {
        Ok(result) => {
            info!(
                valid = result.valid,
                in_ring = result.in_ring,
                "Ring signature checked"
            );
            result
        }
        Err(e) => {
            warn!(error = %e, "Ring signature rejected");
            VerificationResult::failure(e.kind())
        }
    }
}

/// Verify many independent signatures
///
/// Runs on the rayon pool when the `multi-thread` feature is enabled. Results
/// are returned in request order.
pub fn verify_batch(
    requests: &[VerificationRequest<'_>],
    mode: RecoveryMode,
) -> Vec<VerificationResult> {
    let run = |req: &VerificationRequest<'_>| {
        verify_with_mode(req.message, req.artifact, req.ring, mode)
    };

    #[cfg(feature = "multi-thread")]
    {
        use rayon::prelude::*;
        requests.par_iter().map(run).collect()
    }

    #[cfg(not(feature = "multi-thread"))]
    {
        requests.iter().map(run).collect()
    }
}

fn check(
    message: &str,
    artifact: &SignatureArtifact,
    ring: &[Identity],
    mode: RecoveryMode,
) -> Result<VerificationResult> {
    let expected = compute_ring_commitment(ring)?;
    if !expected.matches(&artifact.ring_commitment) {
        return Err(Error::RingMismatch);
    }

    let digest = signing_digest(message, &expected);

    // A signature with an out-of-range scalar cannot yield any key.
    let signature = artifact
        .signature
        .to_ecdsa()
        .map_err(|_| Error::RecoveryFailed)?;

    let recovered = recover(&digest, &signature, artifact.signature.recovery_id, mode)?;

    // recover_from_prehash already verifies, so this rarely fails with k256.
    recovered
        .verify_prehash(digest.as_bytes(), &signature)
        .map_err(|_| Error::SignatureInvalid)?;

    let recovered_key = PublicKey::from_verifying_key(&recovered);
    let in_ring = artifact
        .ring_public_keys
        .iter()
        .any(|key| key == &recovered_key);

    Ok(VerificationResult::completed(in_ring, recovered_key))
}

fn recover(
    digest: &SigningDigest,
    signature: &ecdsa::Signature,
    embedded: u8,
    mode: RecoveryMode,
) -> Result<VerifyingKey> {
    let candidates = match mode {
        RecoveryMode::Embedded => embedded..embedded.saturating_add(1),
        RecoveryMode::Probe => 0..RECOVERY_IDS,
    };

    candidates
        .filter_map(|discriminant| {
            let recovery_id = RecoveryId::from_byte(discriminant)?;
            match VerifyingKey::recover_from_prehash(digest.as_bytes(), signature, recovery_id) {
                Ok(key) => {
                    debug!(discriminant, "Recovered public key");
                    Some(key)
                }
                Err(_) => None,
            }
        })
        .next()
        .ok_or(Error::RecoveryFailed)
}
