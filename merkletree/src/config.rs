use std::{fmt, sync::Arc};

use merkletree_hash::{HashType, default_hash_type};

/// Settings fixed when a tree is built.
///
/// The same settings are needed to verify proofs against that tree, so a
/// `TreeConfig` is also the verification context for [`verify_proof`] and is
/// carried inside every [`MultiProof`].
///
/// Defaults: unsalted, unsorted, BLAKE2b.
///
/// [`verify_proof`]: crate::verify_proof
/// [`MultiProof`]: crate::MultiProof
#[derive(Clone)]
pub struct TreeConfig {
    /// Leaves hash `value || be32(index)` instead of `value`.
    pub salt: bool,
    /// Leaves are ordered by digest and each branch hashes the smaller child
    /// first.
    pub sorted: bool,
    /// Hash function for every node in the tree.
    pub hash_type: Arc<dyn HashType>,
}

impl TreeConfig {
    /// Set whether leaves are salted with their index.
    pub fn with_salt(mut self, salt: bool) -> Self {
        self.salt = salt;
        self
    }

    /// Set whether leaves and branch children are sorted by digest.
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Use `hash_type` for every digest.
    pub fn with_hash_type<H: HashType + 'static>(mut self, hash_type: H) -> Self {
        self.hash_type = Arc::new(hash_type);
        self
    }

    /// Use an already shared hash function.
    pub fn with_shared_hash_type(mut self, hash_type: Arc<dyn HashType>) -> Self {
        self.hash_type = hash_type;
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            salt: false,
            sorted: false,
            hash_type: default_hash_type(),
        }
    }
}

/// Two configs are equal when they produce the same digests: same flags and
/// a hash function with the same name.
impl PartialEq for TreeConfig {
    fn eq(&self, other: &Self) -> bool {
        self.salt == other.salt
            && self.sorted == other.sorted
            && self.hash_type.hash_name() == other.hash_type.hash_name()
    }
}

impl Eq for TreeConfig {}

impl fmt::Debug for TreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeConfig")
            .field("salt", &self.salt)
            .field("sorted", &self.sorted)
            .field("hash_type", &self.hash_type.hash_name())
            .finish()
    }
}
