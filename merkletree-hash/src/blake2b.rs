use blake2::digest::consts::U32;

use crate::{HashType, digest_parts};

type Blake2b256 = blake2::Blake2b<U32>;

/// BLAKE2b with a 32-byte digest. This is the default tree hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake2b;

impl HashType for Blake2b {
    fn hash(&self, parts: &[&[u8]]) -> Vec<u8> {
        digest_parts::<Blake2b256>(parts)
    }

    fn hash_name(&self) -> &'static str {
        "blake2b"
    }

    fn hash_length(&self) -> usize {
        32
    }
}
