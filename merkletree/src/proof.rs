//! Single-value inclusion proofs.
//!
//! A [`Proof`] is the list of sibling digests on the path from one leaf up
//! to a pollard boundary (the root for height 0). It holds no reference to
//! the tree; verifying it needs only the value, the pollard and the tree's
//! [`TreeConfig`].

use bincode::{Decode, Encode};
use log::trace;

use crate::{
    MerkleTree, MerkleTreeError, TreeConfig, codec,
    hash::{branch_hash, leaf_hash},
};

/// Proofs longer than this cannot come from a tree addressable with `u64`
/// node indices.
const MAX_PROOF_HASHES: usize = 63;

/// An inclusion proof for one value.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof {
    /// Sibling digests, leaf level first.
    pub hashes: Vec<Vec<u8>>,
    /// Position of the proven value in the tree's data.
    pub index: u64,
}

impl Proof {
    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleTreeError> {
        codec::encode(self)
    }

    /// Decode from bytes using bincode.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleTreeError> {
        let proof: Self = codec::decode(bytes)?;
        if proof.hashes.len() > MAX_PROOF_HASHES {
            return Err(MerkleTreeError::MalformedProof(format!(
                "proof has {} hashes (max {})",
                proof.hashes.len(),
                MAX_PROOF_HASHES
            )));
        }
        Ok(proof)
    }
}

impl MerkleTree {
    /// Generate a proof for `value` against the pollard of the given height
    /// (0 for the root).
    ///
    /// The first occurrence of `value` is proven; use
    /// [`generate_proof_with_index`](Self::generate_proof_with_index) to pick
    /// another one.
    pub fn generate_proof(&self, value: &[u8], height: u32) -> Result<Proof, MerkleTreeError> {
        let index = self.index_of(value)?;
        self.generate_proof_with_index(index, height)
    }

    /// Generate a proof for the value at `index` against the pollard of the
    /// given height.
    pub fn generate_proof_with_index(
        &self,
        index: u64,
        height: u32,
    ) -> Result<Proof, MerkleTreeError> {
        self.check_index(index)?;
        self.check_height(height)?;

        let boundary = (1u64 << (height + 1)) - 1;
        let mut hashes = Vec::with_capacity((self.depth() - height) as usize);
        let mut node = index + self.leaf_count();
        while node > boundary {
            hashes.push(self.nodes()[(node ^ 1) as usize].clone());
            node /= 2;
        }

        trace!(
            "generated proof: index={} height={} hashes={}",
            index,
            height,
            hashes.len()
        );

        Ok(Proof { hashes, index })
    }
}

/// Verify that `proof` places `value` in a tree committed to by `pollard`.
///
/// `pollard` is the root alone or a pollard from
/// [`MerkleTree::pollard`]. The digest recomputed from the proof is accepted
/// if it equals any entry in the pollard's last rank.
///
/// `config` must match the settings of the tree the proof came from.
pub fn verify_proof(
    value: &[u8],
    proof: &Proof,
    pollard: &[Vec<u8>],
    config: &TreeConfig,
) -> bool {
    if pollard.is_empty() {
        return false;
    }
    let Some(mut node) = u32::try_from(proof.hashes.len())
        .ok()
        .and_then(|len| 1u64.checked_shl(len))
        .and_then(|base| base.checked_add(proof.index))
    else {
        return false;
    };

    let hash_type = config.hash_type.as_ref();
    let mut hash = leaf_hash(hash_type, config.salt, value, proof.index);
    for sibling in &proof.hashes {
        hash = if node % 2 == 0 {
            branch_hash(hash_type, config.sorted, &hash, sibling)
        } else {
            branch_hash(hash_type, config.sorted, sibling, &hash)
        };
        node >>= 1;
    }

    let last_rank = (pollard.len() + 1) / 2 - 1;
    pollard[last_rank..].iter().any(|candidate| *candidate == hash)
}
