//! Ring signature verification
//!
//! Verification never returns an error: every failure is reported through
//! [`VerificationResult`] so callers can tell a wrong ring from a bad signature.
//!
//! Note that the recovered public key is the actual signer's key. The scheme
//! proves ring membership but does not hide which member signed.

mod verifier;

pub use verifier::{verify, verify_batch, verify_with_mode};

use crate::{ErrorKind, Identity, PublicKey, SignatureArtifact};
use serde::{Deserialize, Serialize};

/// How the verifier picks the recovery discriminant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryMode {
    /// Use the discriminant stored in the signature
    #[default]
    Embedded,
    /// Try discriminants 0..=3 and keep the first that recovers a key.
    /// May settle on a key other than the signer's, which then fails the
    /// membership check.
    Probe,
}

/// Outcome of a verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Signature verifies and the recovered key is in the ring's key set
    pub valid: bool,
    /// Recovered key appears in `ring_public_keys`
    pub in_ring: bool,
    pub recovered_public_key: Option<PublicKey>,
    pub error: Option<ErrorKind>,
}

impl VerificationResult {
    pub(crate) fn failure(kind: ErrorKind) -> Self {
        Self {
            valid: false,
            in_ring: false,
            recovered_public_key: None,
            error: Some(kind),
        }
    }

    pub(crate) fn completed(in_ring: bool, recovered_public_key: PublicKey) -> Self {
        Self {
            valid: in_ring,
            in_ring,
            recovered_public_key: Some(recovered_public_key),
            error: None,
        }
    }
}

/// One entry of a batch verification
#[derive(Debug, Clone, Copy)]
pub struct VerificationRequest<'a> {
    pub message: &'a str,
    pub artifact: &'a SignatureArtifact,
    pub ring: &'a [Identity],
}
