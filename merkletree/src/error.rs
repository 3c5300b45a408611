use thiserror::Error;

/// Errors from Merkle tree operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// A tree was requested over no values.
    #[error("tree must have at least 1 piece of data")]
    EmptyInput,
    /// A value to prove is not in the tree.
    #[error("data not found")]
    DataNotFound,
    /// A leaf index past the last value.
    #[error("index {index} is out of range (count={count})")]
    IndexOutOfRange {
        /// The requested index.
        index: u64,
        /// Number of values in the tree.
        count: u64,
    },
    /// A pollard or proof height greater than the tree depth.
    #[error("pollard height {height} exceeds tree depth {depth}")]
    InvalidPollardHeight {
        /// The requested height.
        height: u32,
        /// Depth of the tree.
        depth: u32,
    },
    /// Proof bytes or a multiproof that cannot be replayed.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// Input that does not describe a consistent tree or request.
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// A hash function name with no registered provider.
    #[error("cannot parse hash type {0:?}")]
    UnknownHashType(String),
}
