use std::fmt;

use log::debug;
use merkletree_hash::HashType;

use crate::{
    MerkleTreeError, TreeConfig,
    hash::{branch_hash, leaf_hash},
};

/// A binary Merkle tree over an ordered list of byte-string values.
///
/// Nodes live in a 1-indexed array: the root is at 1, node `i` has children
/// `2i` and `2i + 1`, and its sibling is `i ^ 1`. With `N` the number of
/// values rounded up to a power of two, leaves occupy `[N, 2N)` and branches
/// `[1, N)`. Index 0 is unused.
///
/// Leaf slots past the last value hold an all-zero digest; they are never
/// hashed.
///
/// A tree is immutable once built.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    config: TreeConfig,
    data: Vec<Vec<u8>>,
    nodes: Vec<Vec<u8>>,
}

impl MerkleTree {
    /// Build a tree over `data` with the default configuration (unsalted,
    /// unsorted, BLAKE2b).
    pub fn from_data(data: Vec<Vec<u8>>) -> Result<Self, MerkleTreeError> {
        Self::new(data, TreeConfig::default())
    }

    /// Build a tree over `data`.
    ///
    /// Fails with [`MerkleTreeError::EmptyInput`] if `data` is empty. A single
    /// value gives a tree whose root is that value's leaf digest.
    ///
    /// With `config.sorted` the values are reordered together with their
    /// leaf digests so that digests ascend; `data()` and every leaf index
    /// refer to the reordered list.
    pub fn new(data: Vec<Vec<u8>>, config: TreeConfig) -> Result<Self, MerkleTreeError> {
        if data.is_empty() {
            return Err(MerkleTreeError::EmptyInput);
        }

        let leaf_count = data.len().next_power_of_two();
        let (data, leaves) = if config.sorted {
            sort_by_leaf_hash(data, &config)
        } else {
            let leaves = hash_leaves(&data, &config);
            (data, leaves)
        };

        let hash_type = config.hash_type.as_ref();
        let mut nodes = Vec::with_capacity(2 * leaf_count);
        nodes.resize(leaf_count, Vec::new());
        nodes.extend(leaves);
        nodes.resize(2 * leaf_count, vec![0u8; hash_type.hash_length()]);

        for i in (1..leaf_count).rev() {
            let hash = branch_hash(hash_type, config.sorted, &nodes[2 * i], &nodes[2 * i + 1]);
            nodes[i] = hash;
        }

        debug!(
            "built merkle tree: values={} leaves={} salt={} sorted={} hash={}",
            data.len(),
            leaf_count,
            config.salt,
            config.sorted,
            hash_type.hash_name()
        );

        Ok(Self {
            config,
            data,
            nodes,
        })
    }

    /// The root digest.
    pub fn root(&self) -> &[u8] {
        &self.nodes[1]
    }

    /// The values, in leaf order.
    pub fn data(&self) -> &[Vec<u8>] {
        &self.data
    }

    /// The full node array, `2N` entries long with index 0 unused.
    pub fn nodes(&self) -> &[Vec<u8>] {
        &self.nodes
    }

    /// Settings the tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Whether leaves are salted with their index.
    pub fn salt(&self) -> bool {
        self.config.salt
    }

    /// Whether leaves and branch children are ordered by digest.
    pub fn sorted(&self) -> bool {
        self.config.sorted
    }

    /// Hash function used for every node.
    pub fn hash_type(&self) -> &dyn HashType {
        self.config.hash_type.as_ref()
    }

    /// Number of leaf slots, i.e. the value count rounded up to a power of
    /// two.
    pub fn leaf_count(&self) -> u64 {
        (self.nodes.len() / 2) as u64
    }

    /// Number of branch levels between the leaves and the root.
    pub fn depth(&self) -> u32 {
        self.leaf_count().trailing_zeros()
    }

    /// Position of the first value equal to `value`.
    pub fn index_of(&self, value: &[u8]) -> Result<u64, MerkleTreeError> {
        self.data
            .iter()
            .position(|v| v.as_slice() == value)
            .map(|i| i as u64)
            .ok_or(MerkleTreeError::DataNotFound)
    }

    /// Fail with `IndexOutOfRange` unless `index` names a value.
    pub(crate) fn check_index(&self, index: u64) -> Result<(), MerkleTreeError> {
        if index >= self.data.len() as u64 {
            return Err(MerkleTreeError::IndexOutOfRange {
                index,
                count: self.data.len() as u64,
            });
        }
        Ok(())
    }
}

impl fmt::Display for MerkleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.root()))
    }
}

#[cfg(not(feature = "rayon"))]
fn hash_leaves(data: &[Vec<u8>], config: &TreeConfig) -> Vec<Vec<u8>> {
    data.iter()
        .enumerate()
        .map(|(i, value)| leaf_hash(config.hash_type.as_ref(), config.salt, value, i as u64))
        .collect()
}

// Leaves land in disjoint slots, so they can be hashed in any order.
#[cfg(feature = "rayon")]
fn hash_leaves(data: &[Vec<u8>], config: &TreeConfig) -> Vec<Vec<u8>> {
    use rayon::prelude::*;

    data.par_iter()
        .enumerate()
        .map(|(i, value)| leaf_hash(config.hash_type.as_ref(), config.salt, value, i as u64))
        .collect()
}

/// Reorder `data` by ascending leaf digest, returning the reordered values
/// and their leaf digests.
///
/// The sort key is the unsalted digest. When salting, the salt is applied
/// afterwards with each value's final position, so a leaf's digest always
/// matches the index its proofs carry.
fn sort_by_leaf_hash(data: Vec<Vec<u8>>, config: &TreeConfig) -> (Vec<Vec<u8>>, Vec<Vec<u8>>) {
    let unsalted = TreeConfig {
        salt: false,
        ..config.clone()
    };
    let keys = hash_leaves(&data, &unsalted);
    let mut pairs: Vec<(Vec<u8>, Vec<u8>)> = keys.into_iter().zip(data).collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let (keys, data): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
    if config.salt {
        let leaves = hash_leaves(&data, config);
        (data, leaves)
    } else {
        (data, keys)
    }
}
