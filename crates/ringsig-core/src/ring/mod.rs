//! Ring commitment and composition
//!
//! A ring is an ordered list of [`Identity`](crate::Identity) values. Order is
//! significant: the commitment changes when members are permuted.

mod commitment;
mod compose;

pub use commitment::{compute_ring_commitment, signing_digest};
pub use compose::{compose_ring, random_decoys, ComposedRing, DEFAULT_RING_SIZE, MIN_RING_SIZE};
