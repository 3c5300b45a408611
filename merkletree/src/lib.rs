//! Binary Merkle tree with salting, sorted mode, pollards and sparse
//! multiproofs.
//!
//! A [`MerkleTree`] is built once from an ordered list of byte-string values
//! and never changes afterwards. Nodes are kept in a 1-indexed array (root at
//! 1, children of `i` at `2i` and `2i + 1`), so every walk over the tree is
//! index arithmetic.
//!
//! - [`MerkleTree::generate_proof`] proves one value; [`verify_proof`] checks
//!   it against the root or a pollard.
//! - [`MerkleTree::pollard`] returns the root plus every branch down to a
//!   height, shortening proofs checked against it.
//! - [`MerkleTree::generate_multi_proof`] proves many values with one
//!   deduplicated set of hashes; [`MultiProof::verify`] checks it.
//!
//! Every digest comes from the [`HashType`] in the tree's [`TreeConfig`]
//! (BLAKE2b unless configured otherwise).
//!
//! # Features
//!
//! - `serde` (default): JSON import and export of built trees.
//! - `visualize`: DOT rendering of trees and proofs.
//! - `rayon`: leaf digests are computed in parallel.

#![warn(missing_docs)]

mod codec;
mod config;
#[cfg(feature = "serde")]
mod encoding;
mod error;
pub(crate) mod hash;
mod multiproof;
mod pollard;
mod proof;
mod tree;
#[cfg(feature = "visualize")]
pub mod visualize;

#[cfg(test)]
mod tests;

pub use config::TreeConfig;
pub use error::MerkleTreeError;
pub use merkletree_hash::{
    Blake2b, Blake3, HashType, Keccak256, Sha3_256, Sha3_512, default_hash_type,
    hash_type_from_name,
};
pub use multiproof::MultiProof;
pub use pollard::verify_pollard;
pub use proof::{Proof, verify_proof};
pub use tree::MerkleTree;
