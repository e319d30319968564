//! Signature artifact exchanged between signer and verifier

use crate::{Identity, PublicKey, Result, RingCommitment, Signature};
use serde::{Deserialize, Serialize};

/// Everything a verifier needs, produced atomically by [`generate`](super::generate())
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureArtifact {
    /// Ring members, in signing order
    pub ring: Vec<Identity>,
    /// One key per ring member; the signer's real key, placeholders elsewhere
    pub ring_public_keys: Vec<PublicKey>,
    /// Informational only, never consulted by verification
    pub signer_index: usize,
    /// Signed message
    pub message: String,
    /// Commitment to `ring`
    pub ring_commitment: RingCommitment,
    /// Recoverable ECDSA signature over `SHA-256(message || ring_commitment)`
    pub signature: Signature,
}

impl SignatureArtifact {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
