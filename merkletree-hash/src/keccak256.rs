use crate::{HashType, digest_parts};

/// Legacy Keccak-256, as used by Ethereum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256;

impl HashType for Keccak256 {
    fn hash(&self, parts: &[&[u8]]) -> Vec<u8> {
        digest_parts::<sha3::Keccak256>(parts)
    }

    fn hash_name(&self) -> &'static str {
        "keccak256"
    }

    fn hash_length(&self) -> usize {
        32
    }
}
