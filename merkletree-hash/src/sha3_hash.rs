use crate::{HashType, digest_parts};

/// SHA3-256. Exported trees record it as `sha256`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha3_256;

impl HashType for Sha3_256 {
    fn hash(&self, parts: &[&[u8]]) -> Vec<u8> {
        digest_parts::<sha3::Sha3_256>(parts)
    }

    fn hash_name(&self) -> &'static str {
        "sha256"
    }

    fn hash_length(&self) -> usize {
        32
    }
}

/// SHA3-512. Exported trees record it as `sha512`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha3_512;

impl HashType for Sha3_512 {
    fn hash(&self, parts: &[&[u8]]) -> Vec<u8> {
        digest_parts::<sha3::Sha3_512>(parts)
    }

    fn hash_name(&self) -> &'static str {
        "sha512"
    }

    fn hash_length(&self) -> usize {
        64
    }
}
