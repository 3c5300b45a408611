//! Pollards: the root plus every branch down to a chosen height.
//!
//! A pollard can stand in for the root as the trusted commitment. Proofs
//! generated for a pollard of height `h` stop `h` levels below the root,
//! which shortens every proof checked against the same pollard.

use crate::{MerkleTree, MerkleTreeError, TreeConfig, hash::branch_hash};

impl MerkleTree {
    /// The root plus all branches down to `height`: height 0 is just the
    /// root, height 1 adds its two children, and so on.
    ///
    /// The slice is `nodes[1..2^(height + 1))`, so entry `i` has children
    /// `2i + 1` and `2i + 2`. `height` may not exceed [`depth`]; at `depth`
    /// the pollard includes the leaves.
    ///
    /// [`depth`]: MerkleTree::depth
    pub fn pollard(&self, height: u32) -> Result<&[Vec<u8>], MerkleTreeError> {
        self.check_height(height)?;
        Ok(&self.nodes()[1..1usize << (height + 1)])
    }

    pub(crate) fn check_height(&self, height: u32) -> Result<(), MerkleTreeError> {
        let depth = self.depth();
        if height > depth {
            return Err(MerkleTreeError::InvalidPollardHeight { height, depth });
        }
        Ok(())
    }
}

/// Check that every entry of `pollard` is the branch hash of its two
/// children.
///
/// A single-entry pollard (a bare root) is always consistent. An empty
/// slice, or one whose length is not `2^k - 1`, is not a pollard.
pub fn verify_pollard(pollard: &[Vec<u8>], config: &TreeConfig) -> bool {
    if pollard.is_empty() || !(pollard.len() + 1).is_power_of_two() {
        return false;
    }
    (0..pollard.len() / 2).rev().all(|i| {
        let expected = branch_hash(
            config.hash_type.as_ref(),
            config.sorted,
            &pollard[2 * i + 1],
            &pollard[2 * i + 2],
        );
        pollard[i] == expected
    })
}
