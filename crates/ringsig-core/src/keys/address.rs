//! Account address derivation

use crate::{Identity, PublicKey};
use tiny_keccak::{Hasher, Keccak};

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// Ethereum-style account address for a public key, in EIP-55 mixed case
///
/// The address is the last 20 bytes of Keccak-256 over the uncompressed point
/// without its `0x04` prefix.
pub fn address_from_public_key(public_key: &PublicKey) -> Identity {
    let hash = keccak256(&public_key.as_bytes()[1..]);
    Identity::new(to_checksum(&hash[12..]))
}

fn to_checksum(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::public_key_from_secret;

    #[test]
    fn test_address_of_secret_one() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let key = public_key_from_secret(&one).unwrap();

        assert_eq!(
            address_from_public_key(&key).as_str(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn test_address_decodes_to_twenty_bytes() {
        let key = public_key_from_secret(&[3u8; 32]).unwrap();
        let address = address_from_public_key(&key);

        assert_eq!(address.to_bytes().unwrap().len(), 20);
    }
}
