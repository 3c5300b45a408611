//! DOT rendering of binary Merkle trees.
//!
//! [`dot`] turns a tree's node array and data into a Graphviz `digraph`.
//! Values are drawn as ovals above their leaves, and every node points at its
//! parent. Nodes named in [`Highlights`] are filled: proven values red, proof
//! hashes green, root or pollard nodes blue.
//!
//! The output is a single line with no whitespace between statements, so two
//! renderings of the same tree compare equal byte for byte.

use std::collections::BTreeSet;

use itertools::Itertools;

const VALUE_FILL: &str = " style=filled fillcolor=\"#ff4040\"";
const PROOF_FILL: &str = " style=filled fillcolor=\"#00ff00\"";
const ROOT_FILL: &str = " style=filled fillcolor=\"#8080ff\"";

/// Turns bytes into a node label.
pub trait Formatter {
    /// Label for `data`.
    fn format(&self, data: &[u8]) -> String;
}

/// First and last two bytes in hex, e.g. `7b50…c81f`. Inputs shorter than
/// two bytes are shown whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncatedHexFormatter;

impl Formatter for TruncatedHexFormatter {
    fn format(&self, data: &[u8]) -> String {
        if data.len() < 2 {
            return hex::encode(data);
        }
        format!(
            "{}…{}",
            hex::encode(&data[..2]),
            hex::encode(&data[data.len() - 2..])
        )
    }
}

/// The whole value in hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexFormatter;

impl Formatter for HexFormatter {
    fn format(&self, data: &[u8]) -> String {
        hex::encode(data)
    }
}

/// The value as (lossy) UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFormatter;

impl Formatter for StringFormatter {
    fn format(&self, data: &[u8]) -> String {
        String::from_utf8_lossy(data).into_owned()
    }
}

/// Nodes to fill when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    /// Node indices drawn as root or pollard nodes.
    pub roots: BTreeSet<u64>,
    /// Data indices (not node indices) of proven values.
    pub values: BTreeSet<u64>,
    /// Node indices whose digests a proof carries.
    pub proof: BTreeSet<u64>,
}

/// Render a tree as DOT.
///
/// `nodes` is the 1-indexed node array (`2N` entries, root at 1, leaves at
/// `N..2N`) and `data` the values behind the first leaves. With `salt` the
/// edge from each value to its leaf is labelled with the appended index.
/// Leaf slots without a value are labelled with an all-zero digest.
pub fn dot(
    nodes: &[Vec<u8>],
    data: &[Vec<u8>],
    salt: bool,
    highlights: &Highlights,
    leaf_formatter: &dyn Formatter,
    branch_formatter: &dyn Formatter,
) -> String {
    let leaf_count = (nodes.len() / 2) as u64;
    let digest_length = nodes.get(1).map_or(0, Vec::len);

    let mut out = String::new();
    out.push_str("digraph MerkleTree {");
    out.push_str("rankdir = TB;");
    out.push_str("node [shape=rectangle margin=\"0.2,0.2\"];");

    for i in 0..leaf_count {
        let offset = leaf_count + i;
        match data.get(i as usize) {
            Some(value) => {
                let label = leaf_formatter.format(value);
                out.push_str(&format!("\"{}\" [shape=oval", label));
                if highlights.values.contains(&i) {
                    out.push_str(VALUE_FILL);
                }
                out.push_str("];");
                if salt {
                    out.push_str(&format!(
                        "\"{}\"->{} [label=\"+{}\"];",
                        label,
                        offset,
                        hex::encode((i as u32).to_be_bytes())
                    ));
                } else {
                    out.push_str(&format!("\"{}\"->{};", label, offset));
                }
                push_leaf(&mut out, offset, &branch_formatter.format(&nodes[offset as usize]), highlights);
                if i > 0 {
                    push_spacer(&mut out, offset);
                }
            }
            None => {
                let empty = vec![0u8; digest_length];
                push_leaf(&mut out, offset, &branch_formatter.format(&empty), highlights);
                push_spacer(&mut out, offset);
            }
        }
        if data.len() > 1 {
            out.push_str(&format!("{}->{};", offset, offset / 2));
        }
    }
    out.push_str(&format!(
        "{{rank=same;{}}};",
        (leaf_count..2 * leaf_count).join(";")
    ));

    for index in (1..leaf_count).rev() {
        out.push_str(&format!(
            "{} [label=\"{}\"",
            index,
            branch_formatter.format(&nodes[index as usize])
        ));
        if highlights.roots.contains(&index) {
            out.push_str(ROOT_FILL);
        } else if highlights.proof.contains(&index) {
            out.push_str(PROOF_FILL);
        }
        out.push_str("];");
        if index > 1 {
            out.push_str(&format!("{}->{};", index, index / 2));
        }
    }
    out.push('}');

    out
}

// Leaves prefer the proof fill over the root fill; branches the reverse.
fn push_leaf(out: &mut String, offset: u64, label: &str, highlights: &Highlights) {
    out.push_str(&format!("{} [label=\"{}\"", offset, label));
    if highlights.proof.contains(&offset) {
        out.push_str(PROOF_FILL);
    } else if highlights.roots.contains(&offset) {
        out.push_str(ROOT_FILL);
    }
    out.push_str("];");
}

/// Invisible edge keeping neighbouring leaves in order.
fn push_spacer(out: &mut String, offset: u64) {
    out.push_str(&format!(
        "{}->{} [style=invisible arrowhead=none];",
        offset - 1,
        offset
    ));
}
