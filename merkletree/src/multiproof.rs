//! Sparse multiproofs: one proof for many values at once.
//!
//! The union of the single proofs for every requested leaf repeats the
//! siblings that leaves share, and carries digests the verifier could compute
//! itself from the proven leaves. Generation walks every leaf up to the root,
//! collects each sibling keyed by node index, marks every node on a walk as
//! calculable and finally drops the collected digests at calculable
//! positions. What is left is the frontier the verifier cannot derive.

use std::collections::{BTreeMap, BTreeSet};

use bincode::{Decode, Encode};
use log::debug;
use merkletree_hash::hash_type_from_name;

use crate::{
    MerkleTree, MerkleTreeError, TreeConfig, codec,
    hash::{branch_hash, leaf_hash},
};

/// A proof that several values belong to the same tree.
///
/// Carries the tree settings it was generated with, so verification needs
/// only the values and the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiProof {
    values: u64,
    hashes: BTreeMap<u64, Vec<u8>>,
    indices: Vec<u64>,
    config: TreeConfig,
}

impl MultiProof {
    /// Leaf slot count of the tree the proof was generated from.
    pub fn values(&self) -> u64 {
        self.values
    }

    /// Digests the verifier cannot compute, keyed by node index.
    pub fn hashes(&self) -> &BTreeMap<u64, Vec<u8>> {
        &self.hashes
    }

    #[cfg(test)]
    pub(crate) fn hashes_mut(&mut self) -> &mut BTreeMap<u64, Vec<u8>> {
        &mut self.hashes
    }

    /// Proven leaf indices, in the order the values were requested.
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }

    /// Settings of the tree the proof was generated from.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Check that `data` sits at this proof's indices in the tree with the
    /// given root.
    ///
    /// `data[k]` is the value claimed at `indices()[k]`. Returns `Ok(false)`
    /// when the recomputed root differs, and `MalformedProof` when the proof
    /// cannot be replayed at all: a value count that does not match the
    /// indices, an index or node outside the tree, a supplied digest at a
    /// proven leaf or one of its ancestors, or a root that the supplied
    /// digests never reach.
    pub fn verify<V: AsRef<[u8]>>(
        &self,
        data: &[V],
        root: &[u8],
    ) -> Result<bool, MerkleTreeError> {
        self.check_shape()?;
        if data.len() != self.indices.len() {
            return Err(MerkleTreeError::MalformedProof(format!(
                "{} values for {} indices",
                data.len(),
                self.indices.len()
            )));
        }

        let hash_type = self.config.hash_type.as_ref();
        let mut nodes = self.hashes.clone();
        for (value, &index) in data.iter().zip(&self.indices) {
            let leaf = leaf_hash(hash_type, self.config.salt, value.as_ref(), index);
            let node = index + self.values;
            if let Some(existing) = nodes.get(&node) {
                if *existing != leaf {
                    return Ok(false);
                }
            } else {
                nodes.insert(node, leaf);
            }
        }

        // Parents are always smaller than their children, so popping the
        // largest pending index visits every child before its parent.
        let mut pending: BTreeSet<u64> =
            nodes.keys().filter(|&&n| n > 1).map(|n| n / 2).collect();
        while let Some(parent) = pending.pop_last() {
            if nodes.contains_key(&parent) {
                continue;
            }
            let (Some(left), Some(right)) =
                (nodes.get(&(2 * parent)), nodes.get(&(2 * parent + 1)))
            else {
                continue;
            };
            let hash = branch_hash(hash_type, self.config.sorted, left, right);
            nodes.insert(parent, hash);
            if parent > 1 {
                pending.insert(parent / 2);
            }
        }

        match nodes.get(&1) {
            Some(computed) => Ok(computed.as_slice() == root),
            None => {
                debug!(
                    "multiproof does not resolve the root: indices={:?} hashes={}",
                    self.indices,
                    self.hashes.len()
                );
                Err(MerkleTreeError::MalformedProof(
                    "root position is not reachable from the proof".to_string(),
                ))
            }
        }
    }

    /// Encode to bytes using bincode. The hash function is recorded by name.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleTreeError> {
        codec::encode(&EncodedMultiProof {
            hash_type: self.config.hash_type.hash_name().to_string(),
            salt: self.config.salt,
            sorted: self.config.sorted,
            values: self.values,
            indices: self.indices.clone(),
            hashes: self.hashes.clone(),
        })
    }

    /// Decode from bytes using bincode.
    ///
    /// Fails with `UnknownHashType` if the recorded hash function is not
    /// registered, and with `MalformedProof` if the bytes do not describe a
    /// usable proof.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleTreeError> {
        let encoded: EncodedMultiProof = codec::decode(bytes)?;
        let hash_type = hash_type_from_name(&encoded.hash_type)
            .ok_or(MerkleTreeError::UnknownHashType(encoded.hash_type))?;
        let proof = Self {
            values: encoded.values,
            hashes: encoded.hashes,
            indices: encoded.indices,
            config: TreeConfig {
                salt: encoded.salt,
                sorted: encoded.sorted,
                hash_type,
            },
        };
        proof.check_shape()?;
        Ok(proof)
    }

    fn check_shape(&self) -> Result<(), MerkleTreeError> {
        if !self.values.is_power_of_two() {
            return Err(MerkleTreeError::MalformedProof(format!(
                "leaf count {} is not a power of two",
                self.values
            )));
        }
        let Some(node_count) = self.values.checked_mul(2) else {
            return Err(MerkleTreeError::MalformedProof(format!(
                "leaf count {} is too large",
                self.values
            )));
        };
        if self.indices.is_empty() {
            return Err(MerkleTreeError::MalformedProof(
                "proof names no indices".to_string(),
            ));
        }
        if let Some(index) = self.indices.iter().find(|&&i| i >= self.values) {
            return Err(MerkleTreeError::MalformedProof(format!(
                "index {} is outside a tree of {} leaves",
                index, self.values
            )));
        }
        if let Some(node) = self.hashes.keys().find(|&&n| n == 0 || n >= node_count) {
            return Err(MerkleTreeError::MalformedProof(format!(
                "node {} is outside a tree of {} leaves",
                node, self.values
            )));
        }
        // The proven leaves and every node above them are recomputed during
        // verification and must not be taken from the proof.
        for &index in &self.indices {
            let mut node = index + self.values;
            while node > 0 {
                if self.hashes.contains_key(&node) {
                    return Err(MerkleTreeError::MalformedProof(format!(
                        "node {} lies on the path of index {} and may not be supplied",
                        node, index
                    )));
                }
                node /= 2;
            }
        }
        Ok(())
    }
}

#[derive(Encode, Decode)]
struct EncodedMultiProof {
    hash_type: String,
    salt: bool,
    sorted: bool,
    values: u64,
    indices: Vec<u64>,
    hashes: BTreeMap<u64, Vec<u8>>,
}

impl MerkleTree {
    /// Generate one proof for all of `values`.
    ///
    /// Each value resolves to its first occurrence. Fails with
    /// `DataNotFound` if any value is missing.
    pub fn generate_multi_proof<V: AsRef<[u8]>>(
        &self,
        values: &[V],
    ) -> Result<MultiProof, MerkleTreeError> {
        let indices = values
            .iter()
            .map(|value| self.index_of(value.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.generate_multi_proof_with_indices(&indices)
    }

    /// Generate one proof for the values at `indices`.
    pub fn generate_multi_proof_with_indices(
        &self,
        indices: &[u64],
    ) -> Result<MultiProof, MerkleTreeError> {
        if indices.is_empty() {
            return Err(MerkleTreeError::InvalidData(
                "no indices specified".to_string(),
            ));
        }
        for &index in indices {
            self.check_index(index)?;
        }

        let leaf_count = self.leaf_count();
        let mut hashes = BTreeMap::new();
        let mut calculable = vec![false; self.nodes().len()];
        for &index in indices {
            let mut node = index + leaf_count;
            while node > 1 {
                let sibling = node ^ 1;
                hashes
                    .entry(sibling)
                    .or_insert_with(|| self.nodes()[sibling as usize].clone());
                calculable[node as usize] = true;
                node /= 2;
            }
        }

        let collected = hashes.len();
        hashes.retain(|&node, _| !calculable[node as usize]);
        debug!(
            "generated multiproof: indices={} hashes={} (pruned {})",
            indices.len(),
            hashes.len(),
            collected - hashes.len()
        );

        Ok(MultiProof {
            values: leaf_count,
            hashes,
            indices: indices.to_vec(),
            config: self.config().clone(),
        })
    }
}
