use assert_matches::assert_matches;
use proptest::prelude::*;

use super::*;

const FOO_LEAF: &str = "7b506db718d5cce819ca4d33d2348065a5408cc89aa8b3f7ac70a0c186a2c81f";
const BAR_LEAF: &str = "03c70c07424c7d85174bf8e0dbd4600a4bd21c00ce34dea7ab57c83c398e6406";
const BAZ_LEAF: &str = "6d5fd2391f8abb79469edf404fd1751a74056ce54ee438c128bba9e680242ae0";
const FOO_BAR_ROOT: &str = "e9e0083e456539e9f6336164cd98700e668178f98af147ef750eb90afcf2f637";
const BAZ_PAD_BRANCH: &str = "113f21ad3be5252e487795473d5e0e221fddf3daee6b5596635428e5feaa1135";
const FOO_BAR_BAZ_ROOT: &str = "2c95331b1a38dba3600391a3e864f9418a271388936e54edecd916824bb54203";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn values(items: &[&str]) -> Vec<Vec<u8>> {
    items.iter().map(|s| s.as_bytes().to_vec()).collect()
}

fn numbered(count: usize) -> Vec<Vec<u8>> {
    (0..count).map(|i| format!("value {i}").into_bytes()).collect()
}

fn all_configs() -> Vec<TreeConfig> {
    vec![
        TreeConfig::default(),
        TreeConfig::default().with_salt(true),
        TreeConfig::default().with_sorted(true),
        TreeConfig::default().with_salt(true).with_sorted(true),
        TreeConfig::default().with_hash_type(Keccak256),
        TreeConfig::default()
            .with_salt(true)
            .with_hash_type(Sha3_256),
        TreeConfig::default()
            .with_sorted(true)
            .with_hash_type(Sha3_512),
        TreeConfig::default().with_hash_type(Blake3),
    ]
}

// ── Construction ─────────────────────────────────────────────────────

#[test]
fn test_empty_input_is_rejected() {
    init_logger();
    assert_eq!(
        MerkleTree::from_data(Vec::new()).unwrap_err(),
        MerkleTreeError::EmptyInput
    );
}

#[test]
fn test_foo_bar_root() {
    let tree = MerkleTree::from_data(values(&["Foo", "Bar"])).unwrap();
    assert_eq!(hex::encode(tree.root()), FOO_BAR_ROOT);
    assert_eq!(tree.to_string(), FOO_BAR_ROOT);
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.depth(), 1);
}

#[test]
fn test_foo_bar_baz_nodes() {
    let tree = MerkleTree::from_data(values(&["Foo", "Bar", "Baz"])).unwrap();
    let nodes: Vec<String> = tree.nodes().iter().map(hex::encode).collect();
    assert_eq!(
        nodes,
        vec![
            String::new(),
            FOO_BAR_BAZ_ROOT.to_string(),
            FOO_BAR_ROOT.to_string(),
            BAZ_PAD_BRANCH.to_string(),
            FOO_LEAF.to_string(),
            BAR_LEAF.to_string(),
            BAZ_LEAF.to_string(),
            "00".repeat(32),
        ]
    );
}

#[test]
fn test_single_value_root_is_leaf() {
    let tree = MerkleTree::from_data(values(&["Foo"])).unwrap();
    assert_eq!(hex::encode(tree.root()), FOO_LEAF);
    assert_eq!(tree.nodes().len(), 2);
    assert_eq!(tree.depth(), 0);
}

#[test]
fn test_padding_is_not_duplication() {
    let padded = MerkleTree::from_data(values(&["Foo", "Bar", "Baz"])).unwrap();
    let duplicated = MerkleTree::from_data(values(&["Foo", "Bar", "Baz", "Baz"])).unwrap();
    assert_eq!(padded.leaf_count(), duplicated.leaf_count());
    assert_ne!(padded.root(), duplicated.root());
}

#[test]
fn test_padding_matches_digest_length() {
    let tree = MerkleTree::new(
        numbered(5),
        TreeConfig::default().with_hash_type(Sha3_512),
    )
    .unwrap();
    assert_eq!(tree.leaf_count(), 8);
    for node in &tree.nodes()[13..] {
        assert_eq!(node, &vec![0u8; 64]);
    }
}

#[test]
fn test_hash_types_give_different_roots() {
    let data = values(&["Foo", "Bar", "Baz"]);
    let roots: Vec<Vec<u8>> = [
        TreeConfig::default(),
        TreeConfig::default().with_hash_type(Keccak256),
        TreeConfig::default().with_hash_type(Sha3_256),
        TreeConfig::default().with_hash_type(Blake3),
    ]
    .into_iter()
    .map(|config| MerkleTree::new(data.clone(), config).unwrap().root().to_vec())
    .collect();
    for (i, a) in roots.iter().enumerate() {
        for b in &roots[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_salt_changes_root() {
    let data = values(&["Foo", "Bar", "Baz"]);
    let plain = MerkleTree::from_data(data.clone()).unwrap();
    let salted = MerkleTree::new(data, TreeConfig::default().with_salt(true)).unwrap();
    assert_ne!(plain.root(), salted.root());
    assert_eq!(
        salted.nodes()[4],
        Blake2b.hash(&[b"Foo".as_slice(), &[0, 0, 0, 0]])
    );
    assert_eq!(
        salted.nodes()[6],
        Blake2b.hash(&[b"Baz".as_slice(), &[0, 0, 0, 2]])
    );
}

#[test]
fn test_sorted_leaf_order() {
    // Leaf digests: Bar 03c7…, Baz 6d5f…, Foo 7b50…
    let tree = MerkleTree::new(
        values(&["Foo", "Bar", "Baz"]),
        TreeConfig::default().with_sorted(true),
    )
    .unwrap();
    assert_eq!(tree.data(), values(&["Bar", "Baz", "Foo"]).as_slice());
    assert_eq!(hex::encode(&tree.nodes()[4]), BAR_LEAF);
    assert_eq!(hex::encode(&tree.nodes()[5]), BAZ_LEAF);
    assert_eq!(hex::encode(&tree.nodes()[6]), FOO_LEAF);
    // The zero padding sorts before the Foo leaf inside its pair.
    assert_eq!(
        tree.nodes()[3],
        Blake2b.hash(&[vec![0u8; 32].as_slice(), &tree.nodes()[6]])
    );
}

#[test]
fn test_sorted_salted_leaves_match_positions() {
    let config = TreeConfig::default().with_sorted(true).with_salt(true);
    let tree = MerkleTree::new(values(&["Foo", "Bar", "Baz"]), config).unwrap();
    assert_eq!(tree.data(), values(&["Bar", "Baz", "Foo"]).as_slice());
    for (i, value) in tree.data().iter().enumerate() {
        let salt = (i as u32).to_be_bytes();
        assert_eq!(
            tree.nodes()[4 + i],
            Blake2b.hash(&[value.as_slice(), &salt])
        );
    }
}

#[test]
fn test_determinism() {
    for config in all_configs() {
        let a = MerkleTree::new(numbered(11), config.clone()).unwrap();
        let b = MerkleTree::new(numbered(11), config).unwrap();
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.data(), b.data());
    }
}

// ── Single proofs ────────────────────────────────────────────────────

#[test]
fn test_foo_bar_scenario() {
    init_logger();
    let tree = MerkleTree::from_data(values(&["Foo", "Bar"])).unwrap();
    let root = hex::decode(FOO_BAR_ROOT).unwrap();
    let proof = tree.generate_proof(b"Bar", 0).unwrap();
    assert_eq!(proof.hashes, vec![Blake2b.hash(&[b"Foo".as_slice()])]);

    let config = TreeConfig::default();
    assert!(verify_proof(b"Bar", &proof, &[root.clone()], &config));
    assert!(!verify_proof(b"Baz", &proof, &[root], &config));
}

#[test]
fn test_every_value_proves_in_every_config() {
    for config in all_configs() {
        for count in 1..=9 {
            let tree = MerkleTree::new(numbered(count), config.clone()).unwrap();
            let root = [tree.root().to_vec()];
            for (index, value) in tree.data().iter().enumerate() {
                let proof = tree.generate_proof(value, 0).unwrap();
                assert_eq!(proof.index, index as u64);
                assert_eq!(proof.hashes.len(), tree.depth() as usize);
                assert!(
                    verify_proof(value, &proof, &root, &config),
                    "{config:?} count={count} index={index}"
                );
            }
        }
    }
}

#[test]
fn test_proof_against_wrong_config() {
    let salted = TreeConfig::default().with_salt(true);
    let tree = MerkleTree::new(numbered(6), salted).unwrap();
    let proof = tree.generate_proof(b"value 3", 0).unwrap();
    let root = [tree.root().to_vec()];
    assert!(verify_proof(b"value 3", &proof, &root, tree.config()));
    assert!(!verify_proof(b"value 3", &proof, &root, &TreeConfig::default()));
    assert!(!verify_proof(
        b"value 3",
        &proof,
        &root,
        &TreeConfig::default().with_salt(true).with_hash_type(Keccak256)
    ));
}

#[test]
fn test_pollard_proofs() {
    for config in all_configs() {
        let tree = MerkleTree::new(numbered(13), config.clone()).unwrap();
        let other_data = (0..14).map(|i| format!("other {i}").into_bytes()).collect();
        let other = MerkleTree::new(other_data, config.clone()).unwrap();
        for height in 0..=tree.depth() {
            let pollard = tree.pollard(height).unwrap();
            let foreign = other.pollard(height).unwrap();
            for value in tree.data() {
                let proof = tree.generate_proof(value, height).unwrap();
                assert_eq!(proof.hashes.len(), (tree.depth() - height) as usize);
                assert!(verify_proof(value, &proof, pollard, &config));
                assert!(!verify_proof(value, &proof, foreign, &config));
            }
        }
    }
}

#[test]
fn test_tampered_proofs_fail() {
    let tree = MerkleTree::from_data(numbered(10)).unwrap();
    let root = [tree.root().to_vec()];
    for value in tree.data() {
        let proof = tree.generate_proof(value, 0).unwrap();
        for i in 0..proof.hashes.len() {
            let mut tampered = proof.clone();
            tampered.hashes[i][0] ^= 0x01;
            assert!(!verify_proof(value, &tampered, &root, tree.config()));
        }

        let mut moved = proof.clone();
        moved.index ^= 1;
        assert!(!verify_proof(value, &moved, &root, tree.config()));

        let mut truncated = proof.clone();
        truncated.hashes.pop();
        assert!(!verify_proof(value, &truncated, &root, tree.config()));
    }
}

#[test]
fn test_duplicate_values() {
    let tree = MerkleTree::new(
        values(&["a", "b", "a"]),
        TreeConfig::default().with_salt(true),
    )
    .unwrap();
    let root = [tree.root().to_vec()];

    let first = tree.generate_proof(b"a", 0).unwrap();
    assert_eq!(first.index, 0);
    assert!(verify_proof(b"a", &first, &root, tree.config()));

    let second = tree.generate_proof_with_index(2, 0).unwrap();
    assert_eq!(second.index, 2);
    assert!(verify_proof(b"a", &second, &root, tree.config()));
    assert!(!verify_proof(b"b", &second, &root, tree.config()));
}

#[test]
fn test_missing_data() {
    let tree = MerkleTree::from_data(numbered(4)).unwrap();
    assert_eq!(
        tree.generate_proof(b"missing", 0),
        Err(MerkleTreeError::DataNotFound)
    );
    assert_eq!(
        tree.generate_multi_proof(&[b"missing"]),
        Err(MerkleTreeError::DataNotFound)
    );
    assert_matches!(
        tree.generate_proof_with_index(4, 0),
        Err(MerkleTreeError::IndexOutOfRange { .. })
    );
}

// ── Multiproofs ──────────────────────────────────────────────────────

#[test]
fn test_multiproof_every_subset() {
    init_logger();
    for config in all_configs() {
        for count in 1..=6usize {
            let tree = MerkleTree::new(numbered(count), config.clone()).unwrap();
            for mask in 1u32..(1 << count) {
                let subset: Vec<Vec<u8>> = (0..count)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| tree.data()[i].clone())
                    .collect();
                let proof = tree.generate_multi_proof(&subset).unwrap();
                assert!(
                    proof.verify(&subset, tree.root()).unwrap(),
                    "{config:?} count={count} mask={mask:b}"
                );

                let single_total: usize = subset
                    .iter()
                    .map(|value| tree.generate_proof(value, 0).unwrap().hashes.len())
                    .sum();
                if subset.len() > 1 {
                    assert!(proof.hashes().len() < single_total);
                } else {
                    assert_eq!(proof.hashes().len(), single_total);
                }
            }
        }
    }
}

#[test]
fn test_multiproof_full_tree_sends_only_padding() {
    let tree = MerkleTree::from_data(numbered(8)).unwrap();
    let proof = tree.generate_multi_proof(tree.data()).unwrap();
    assert!(proof.hashes().is_empty());
    assert_eq!(proof.values(), 8);
    assert!(proof.verify(tree.data(), tree.root()).unwrap());
}

#[test]
fn test_multiproof_indices_follow_request_order() {
    let tree = MerkleTree::from_data(numbered(8)).unwrap();
    let proof = tree
        .generate_multi_proof(&[b"value 6", b"value 1", b"value 4"])
        .unwrap();
    assert_eq!(proof.indices(), &[6, 1, 4]);
    assert!(
        proof
            .verify(&[b"value 6", b"value 1", b"value 4"], tree.root())
            .unwrap()
    );
    assert!(
        !proof
            .verify(&[b"value 1", b"value 6", b"value 4"], tree.root())
            .unwrap()
    );
}

#[test]
fn test_multiproof_tampered_hash_fails() {
    let tree = MerkleTree::from_data(numbered(16)).unwrap();
    let subset = [b"value 2".as_slice(), b"value 9", b"value 13"];
    let proof = tree.generate_multi_proof(&subset).unwrap();
    let bytes = proof.encode_to_vec().unwrap();
    assert!(
        MultiProof::decode_from_slice(&bytes)
            .unwrap()
            .verify(&subset, tree.root())
            .unwrap()
    );

    for node in proof.hashes().keys() {
        let mut tampered = proof.clone();
        if let Some(hash) = tampered.hashes_mut().get_mut(node) {
            hash[0] ^= 0x01;
        }
        assert!(!tampered.verify(&subset, tree.root()).unwrap(), "node {node}");
    }
}

// ── Properties ───────────────────────────────────────────────────────

fn data_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..24), 1..40)
}

fn config_strategy() -> impl Strategy<Value = TreeConfig> {
    (any::<bool>(), any::<bool>()).prop_map(|(salt, sorted)| {
        TreeConfig::default()
            .with_salt(salt)
            .with_sorted(sorted)
    })
}

proptest! {
    #[test]
    fn test_prop_every_value_verifies(data in data_strategy(), config in config_strategy()) {
        let tree = MerkleTree::new(data, config.clone()).unwrap();
        let root = [tree.root().to_vec()];
        for index in 0..tree.data().len() as u64 {
            let value = &tree.data()[index as usize];
            let proof = tree.generate_proof_with_index(index, 0).unwrap();
            prop_assert!(verify_proof(value, &proof, &root, &config));
        }
    }

    #[test]
    fn test_prop_tampered_proof_fails(
        data in data_strategy(),
        config in config_strategy(),
        pick in any::<prop::sample::Index>(),
        flip in 0u8..8,
    ) {
        let tree = MerkleTree::new(data, config.clone()).unwrap();
        prop_assume!(tree.depth() > 0);
        let index = pick.index(tree.data().len()) as u64;
        let value = tree.data()[index as usize].clone();
        let mut proof = tree.generate_proof_with_index(index, 0).unwrap();
        let level = pick.index(proof.hashes.len());
        proof.hashes[level][0] ^= 1 << flip;
        prop_assert!(!verify_proof(&value, &proof, &[tree.root().to_vec()], &config));
    }

    #[test]
    fn test_prop_pollard_proofs_match_root_proofs(
        data in data_strategy(),
        config in config_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let tree = MerkleTree::new(data, config.clone()).unwrap();
        let index = pick.index(tree.data().len()) as u64;
        let value = &tree.data()[index as usize];
        for height in 0..=tree.depth() {
            let pollard = tree.pollard(height).unwrap();
            prop_assert!(verify_pollard(pollard, &config));
            let proof = tree.generate_proof_with_index(index, height).unwrap();
            prop_assert!(verify_proof(value, &proof, pollard, &config));
        }
    }

    #[test]
    fn test_prop_multiproof_verifies_and_is_compact(
        data in data_strategy(),
        config in config_strategy(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..10),
    ) {
        let tree = MerkleTree::new(data, config.clone()).unwrap();
        let indices: Vec<u64> = picks
            .iter()
            .map(|p| p.index(tree.data().len()) as u64)
            .collect();
        let values: Vec<&[u8]> = indices
            .iter()
            .map(|&i| tree.data()[i as usize].as_slice())
            .collect();

        let proof = tree.generate_multi_proof_with_indices(&indices).unwrap();
        prop_assert!(proof.verify(&values, tree.root()).unwrap());

        let single_total: usize = indices
            .iter()
            .map(|&i| tree.generate_proof_with_index(i, 0).unwrap().hashes.len())
            .sum();
        prop_assert!(proof.hashes().len() <= single_total);

        let again = tree.generate_multi_proof_with_indices(&indices).unwrap();
        prop_assert_eq!(again, proof);
    }
}
