//! Hash functions for the binary Merkle tree.
//!
//! Every digest used by a tree (leaves, branches, proofs) comes from a single
//! [`HashType`]. Providers are interchangeable; the tree never looks inside a
//! digest except to compare bytes.
//!
//! # Providers
//!
//! | type          | name          | digest                  |
//! |---------------|---------------|-------------------------|
//! | [`Blake2b`]   | `"blake2b"`   | BLAKE2b, 32-byte output |
//! | [`Keccak256`] | `"keccak256"` | legacy Keccak-256       |
//! | [`Sha3_256`]  | `"sha256"`    | SHA3-256                |
//! | [`Sha3_512`]  | `"sha512"`    | SHA3-512                |
//! | [`Blake3`]    | `"blake3"`    | BLAKE3, 32-byte output  |
//!
//! The SHA3 providers keep the `sha256` / `sha512` names used by previously
//! exported trees.

#![warn(missing_docs)]

mod blake2b;
mod blake3_hash;
mod keccak256;
mod sha3_hash;

use std::{fmt::Debug, sync::Arc};

pub use blake2b::Blake2b;
pub use blake3_hash::Blake3;
use digest::Digest;
pub use keccak256::Keccak256;
pub use sha3_hash::{Sha3_256, Sha3_512};

/// A hash function usable by the Merkle tree.
pub trait HashType: Send + Sync + Debug {
    /// Digest of the concatenation of `parts`.
    fn hash(&self, parts: &[&[u8]]) -> Vec<u8>;

    /// Name recorded when a tree is exported.
    fn hash_name(&self) -> &'static str;

    /// Length in bytes of every digest this function produces.
    fn hash_length(&self) -> usize;
}

/// Look up a provider by the name it reports through
/// [`HashType::hash_name`].
pub fn hash_type_from_name(name: &str) -> Option<Arc<dyn HashType>> {
    let hash_type: Arc<dyn HashType> = match name {
        "blake2b" => Arc::new(Blake2b),
        "keccak256" => Arc::new(Keccak256),
        "sha256" => Arc::new(Sha3_256),
        "sha512" => Arc::new(Sha3_512),
        "blake3" => Arc::new(Blake3),
        _ => return None,
    };
    Some(hash_type)
}

/// The provider used when none is configured.
pub fn default_hash_type() -> Arc<dyn HashType> {
    Arc::new(Blake2b)
}

/// Feed every part into a fresh `D` and return the digest.
pub(crate) fn digest_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}
