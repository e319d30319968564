//! # Ring Signature Core
//!
//! Ring commitment, signing and verification over secp256k1.
//!
//! This crate provides:
//! - Member key resolution (real signer key, deterministic placeholder keys)
//! - Ring commitments binding an ordered set of identities
//! - Recoverable ECDSA signatures over `SHA-256(message || commitment)`
//! - Verification by key recovery and ring membership
//!
//! ## Protocol Overview
//!
//! The signer resolves one public key per ring member, commits to the ordered
//! ring, and signs the mixed digest with its own key. A verifier recomputes the
//! commitment from the ring it was given, recovers the signing key and checks
//! that key against the ring's key set.
//!
//! ## Limitations
//!
//! Recovery yields the real signer's public key, so the scheme demonstrates ring
//! membership but does NOT provide signer anonymity. Placeholder keys are hashes
//! of member addresses, not the members' actual account keys.
//!
//! ## Example
//!
//! ```rust
//! use ringsig_core::{sign, verify, Identity};
//!
//! let ring: Vec<Identity> = vec!["0xaa11".into(), "0xbb22".into(), "0xcc33".into()];
//! let secret = [0x11u8; 32];
//!
//! let artifact = sign::generate("hello", &secret, &ring, 1)?;
//! let result = verify::verify("hello", &artifact, &ring);
//! assert!(result.valid && result.in_ring);
//! # Ok::<(), ringsig_core::Error>(())
//! ```

pub mod error;
pub mod keys;
pub mod ring;
pub mod sign;
pub mod types;
pub mod verify;

pub use error::{Error, ErrorKind, Result};
pub use keys::KeyPair;
pub use sign::SignatureArtifact;
pub use types::{Identity, PublicKey, RingCommitment, Signature, SigningDigest};
pub use verify::{RecoveryMode, VerificationRequest, VerificationResult};

/// Protocol version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
