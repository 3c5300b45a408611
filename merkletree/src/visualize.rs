//! DOT output for trees and proofs.

pub use merkletree_visualize::{Formatter, HexFormatter, StringFormatter, TruncatedHexFormatter};
use merkletree_visualize::{Highlights, dot};

use crate::{MerkleTree, MultiProof, Proof};

impl MerkleTree {
    /// Render the tree as DOT.
    ///
    /// `leaf_formatter` labels the values and `branch_formatter` the
    /// digests; both default to [`TruncatedHexFormatter`].
    pub fn dot(
        &self,
        leaf_formatter: Option<&dyn Formatter>,
        branch_formatter: Option<&dyn Formatter>,
    ) -> String {
        self.render(&Highlights::default(), leaf_formatter, branch_formatter)
    }

    /// Render the tree with the value, siblings and pollard of `proof`
    /// highlighted. Without a proof this is [`dot`](Self::dot).
    pub fn dot_proof(
        &self,
        proof: Option<&Proof>,
        leaf_formatter: Option<&dyn Formatter>,
        branch_formatter: Option<&dyn Formatter>,
    ) -> String {
        let Some(proof) = proof else {
            return self.dot(leaf_formatter, branch_formatter);
        };

        let mut highlights = Highlights::default();
        highlights.values.insert(proof.index);
        let mut node = proof.index + self.leaf_count();
        for _ in &proof.hashes {
            highlights.proof.insert(node ^ 1);
            node /= 2;
        }
        let height = self.depth().saturating_sub(proof.hashes.len() as u32);
        highlights.roots.extend(1..1u64 << (height + 1));

        self.render(&highlights, leaf_formatter, branch_formatter)
    }

    /// Render the tree with the values and transmitted hashes of
    /// `multi_proof` highlighted. Without a proof this is [`dot`](Self::dot).
    pub fn dot_multi_proof(
        &self,
        multi_proof: Option<&MultiProof>,
        leaf_formatter: Option<&dyn Formatter>,
        branch_formatter: Option<&dyn Formatter>,
    ) -> String {
        let Some(multi_proof) = multi_proof else {
            return self.dot(leaf_formatter, branch_formatter);
        };

        let highlights = Highlights {
            roots: [1].into(),
            values: multi_proof.indices().iter().copied().collect(),
            proof: multi_proof.hashes().keys().copied().collect(),
        };
        self.render(&highlights, leaf_formatter, branch_formatter)
    }

    fn render(
        &self,
        highlights: &Highlights,
        leaf_formatter: Option<&dyn Formatter>,
        branch_formatter: Option<&dyn Formatter>,
    ) -> String {
        dot(
            self.nodes(),
            self.data(),
            self.salt(),
            highlights,
            leaf_formatter.unwrap_or(&TruncatedHexFormatter),
            branch_formatter.unwrap_or(&TruncatedHexFormatter),
        )
    }
}
