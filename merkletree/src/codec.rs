//! Binary encoding shared by [`Proof`](crate::Proof) and
//! [`MultiProof`](crate::MultiProof).

use bincode::{Decode, Encode};

use crate::MerkleTreeError;

/// Upper bound on the size of an encoded proof accepted by [`decode`].
const MAX_ENCODED_PROOF_BYTES: usize = 100 * 1024 * 1024;

pub(crate) fn encode<T: Encode>(value: &T) -> Result<Vec<u8>, MerkleTreeError> {
    let config = bincode::config::standard()
        .with_big_endian()
        .with_no_limit();
    bincode::encode_to_vec(value, config)
        .map_err(|e| MerkleTreeError::MalformedProof(format!("encode error: {}", e)))
}

pub(crate) fn decode<T: Decode<()>>(bytes: &[u8]) -> Result<T, MerkleTreeError> {
    let config = bincode::config::standard()
        .with_big_endian()
        .with_limit::<MAX_ENCODED_PROOF_BYTES>();
    let (value, read) = bincode::decode_from_slice(bytes, config)
        .map_err(|e| MerkleTreeError::MalformedProof(format!("decode error: {}", e)))?;
    if read != bytes.len() {
        return Err(MerkleTreeError::MalformedProof(format!(
            "{} trailing bytes after proof",
            bytes.len() - read
        )));
    }
    Ok(value)
}
