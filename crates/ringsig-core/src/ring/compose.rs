//! Ring composition: hiding the signer among decoy identities

use crate::{Error, Identity, Result};
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Smallest ring the composer will produce
pub const MIN_RING_SIZE: usize = 2;

/// Default ring size used by the demo tooling
pub const DEFAULT_RING_SIZE: usize = 5;

/// An ordered ring together with the signer's position in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedRing {
    pub ring: Vec<Identity>,
    pub signer_index: usize,
}

/// Insert the signer at a uniformly random position among the decoys
pub fn compose_ring<R: RngCore + CryptoRng>(
    signer: Identity,
    decoys: Vec<Identity>,
    rng: &mut R,
) -> Result<ComposedRing> {
    let size = decoys.len() + 1;
    if size < MIN_RING_SIZE {
        return Err(Error::InvalidRing(format!(
            "ring needs at least {} members, got {}",
            MIN_RING_SIZE, size
        )));
    }

    let mut seen = HashSet::with_capacity(size);
    for identity in std::iter::once(&signer).chain(decoys.iter()) {
        identity.to_bytes()?;
        if !seen.insert(identity.normalized()) {
            return Err(Error::InvalidRing(format!(
                "duplicate ring member {}",
                identity
            )));
        }
    }

    let signer_index = rng.gen_range(0..size);
    let mut ring = decoys;
    ring.insert(signer_index, signer);

    debug!(ring_size = size, "Composed ring");

    Ok(ComposedRing { ring, signer_index })
}

/// Random 20-byte addresses, unique and distinct from `exclude`
pub fn random_decoys<R: RngCore + CryptoRng>(
    count: usize,
    exclude: &[Identity],
    rng: &mut R,
) -> Vec<Identity> {
    let mut seen: HashSet<String> = exclude.iter().map(Identity::normalized).collect();
    let mut decoys = Vec::with_capacity(count);

    while decoys.len() < count {
        let mut bytes = [0u8; 20];
        rng.fill_bytes(&mut bytes);
        let identity = Identity::new(format!("0x{}", hex::encode(bytes)));
        if seen.insert(identity.normalized()) {
            decoys.push(identity);
        }
    }

    decoys
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_compose_places_signer() {
        let signer = Identity::from("0x1111111111111111111111111111111111111111");
        let decoys = random_decoys(4, &[signer.clone()], &mut OsRng);

        let composed = compose_ring(signer.clone(), decoys.clone(), &mut OsRng).unwrap();

        assert_eq!(composed.ring.len(), 5);
        assert_eq!(composed.ring[composed.signer_index], signer);
        for decoy in &decoys {
            assert!(composed.ring.contains(decoy));
        }
    }

    #[test]
    fn test_compose_rejects_small_ring() {
        let signer = Identity::from("0x1111");
        assert!(matches!(
            compose_ring(signer, vec![], &mut OsRng),
            Err(Error::InvalidRing(_))
        ));
    }

    #[test]
    fn test_compose_rejects_duplicates() {
        let signer = Identity::from("0xABCD");
        let decoys = vec![Identity::from("0xabcd")];

        assert!(matches!(
            compose_ring(signer, decoys, &mut OsRng),
            Err(Error::InvalidRing(_))
        ));
    }

    #[test]
    fn test_compose_rejects_duplicates_across_prefix() {
        let signer = Identity::from("0xabcd");
        let decoys = vec![Identity::from("ABCD")];

        assert!(matches!(
            compose_ring(signer, decoys, &mut OsRng),
            Err(Error::InvalidRing(_))
        ));
    }

    #[test]
    fn test_compose_rejects_malformed_member() {
        let signer = Identity::from("0xabcd");
        let decoys = vec![Identity::from("0xnope")];

        assert!(matches!(
            compose_ring(signer, decoys, &mut OsRng),
            Err(Error::InvalidIdentityEncoding(_))
        ));
    }

    #[test]
    fn test_random_decoys_are_unique() {
        let exclude = vec![Identity::from("0x2222222222222222222222222222222222222222")];
        let decoys = random_decoys(16, &exclude, &mut OsRng);

        let unique: HashSet<_> = decoys.iter().map(Identity::normalized).collect();
        assert_eq!(unique.len(), 16);
        assert!(!unique.contains(&exclude[0].normalized()));
        assert!(decoys.iter().all(|d| d.to_bytes().unwrap().len() == 20));
    }
}
