use merkletree_hash::HashType;

/// Salt appended to a value before hashing: the leaf index as 4 big-endian
/// bytes. Indices past `u32::MAX` wrap.
pub(crate) fn index_salt(index: u64) -> [u8; 4] {
    (index as u32).to_be_bytes()
}

/// Digest of a leaf value: `H(value)`, or `H(value || be32(index))` when
/// salted.
pub(crate) fn leaf_hash(hash_type: &dyn HashType, salt: bool, value: &[u8], index: u64) -> Vec<u8> {
    if salt {
        hash_type.hash(&[value, &index_salt(index)])
    } else {
        hash_type.hash(&[value])
    }
}

/// Digest of a branch: `H(left || right)`. With `sorted` the lexicographically
/// smaller child goes first.
pub(crate) fn branch_hash(
    hash_type: &dyn HashType,
    sorted: bool,
    left: &[u8],
    right: &[u8],
) -> Vec<u8> {
    if sorted && left > right {
        hash_type.hash(&[right, left])
    } else {
        hash_type.hash(&[left, right])
    }
}
