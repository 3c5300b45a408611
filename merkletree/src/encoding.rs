//! JSON form of a built tree.
//!
//! A tree is stored as its settings, its data and its node array, with every
//! byte string as lowercase hex:
//!
//! ```json
//! {"salt":false,"sorted":false,"hash_type":"blake2b","data":["466f6f"],"nodes":["", "7b50…"]}
//! ```
//!
//! Loading rebuilds the tree from `data` and refuses the record if the stored
//! nodes disagree with the rebuilt ones.

use merkletree_hash::hash_type_from_name;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{MerkleTree, MerkleTreeError, TreeConfig};

#[derive(Debug, Serialize, Deserialize)]
struct ExportedTree {
    salt: bool,
    sorted: bool,
    hash_type: String,
    data: Vec<String>,
    nodes: Vec<String>,
}

impl From<&MerkleTree> for ExportedTree {
    fn from(tree: &MerkleTree) -> Self {
        Self {
            salt: tree.salt(),
            sorted: tree.sorted(),
            hash_type: tree.hash_type().hash_name().to_string(),
            data: tree.data().iter().map(hex::encode).collect(),
            nodes: tree.nodes().iter().map(hex::encode).collect(),
        }
    }
}

impl TryFrom<ExportedTree> for MerkleTree {
    type Error = MerkleTreeError;

    fn try_from(exported: ExportedTree) -> Result<Self, Self::Error> {
        let hash_type = hash_type_from_name(&exported.hash_type)
            .ok_or(MerkleTreeError::UnknownHashType(exported.hash_type))?;
        let data = decode_hex_list("data", &exported.data)?;
        let nodes = decode_hex_list("nodes", &exported.nodes)?;

        let config = TreeConfig {
            salt: exported.salt,
            sorted: exported.sorted,
            hash_type,
        };
        let tree = MerkleTree::new(data, config)?;
        if tree.nodes() != nodes.as_slice() {
            return Err(MerkleTreeError::InvalidData(
                "stored nodes do not match the data".to_string(),
            ));
        }
        Ok(tree)
    }
}

fn decode_hex_list(field: &str, values: &[String]) -> Result<Vec<Vec<u8>>, MerkleTreeError> {
    values
        .iter()
        .map(hex::decode)
        .collect::<Result<_, _>>()
        .map_err(|e| MerkleTreeError::InvalidData(format!("{}: {}", field, e)))
}

impl Serialize for MerkleTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExportedTree::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MerkleTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let exported = ExportedTree::deserialize(deserializer)?;
        Self::try_from(exported).map_err(serde::de::Error::custom)
    }
}

impl MerkleTree {
    /// Serialize the tree to JSON.
    pub fn to_json(&self) -> Result<String, MerkleTreeError> {
        serde_json::to_string(self).map_err(|e| MerkleTreeError::InvalidData(e.to_string()))
    }

    /// Load a tree written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, MerkleTreeError> {
        let exported: ExportedTree =
            serde_json::from_str(json).map_err(|e| MerkleTreeError::InvalidData(e.to_string()))?;
        Self::try_from(exported)
    }
}
