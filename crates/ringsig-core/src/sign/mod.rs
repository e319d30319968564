//! Ring signature generation
//!
//! Produces a recoverable ECDSA signature over a digest that mixes the message
//! with the ring commitment, packaged with the ring and its public keys.

mod artifact;
mod generate;

pub use artifact::SignatureArtifact;
pub use generate::generate;
