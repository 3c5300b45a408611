use crate::HashType;

/// BLAKE3 with its standard 32-byte output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3;

impl HashType for Blake3 {
    fn hash(&self, parts: &[&[u8]]) -> Vec<u8> {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().as_bytes().to_vec()
    }

    fn hash_name(&self) -> &'static str {
        "blake3"
    }

    fn hash_length(&self) -> usize {
        blake3::OUT_LEN
    }
}
