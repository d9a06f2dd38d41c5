use proptest::prelude::*;

use super::{build_mmr, digest_from_u32};
use crate::{
    helper::{is_leaf, leaf_position, size_for_width},
    Blake3FieldHasher, Error, Felt, MemStore, Mmr,
};

#[test]
fn test_empty_accumulator() {
    let store = MemStore::default();
    let mmr = Mmr::new(&store, Blake3FieldHasher);
    assert!(mmr.is_empty());
    assert_eq!(mmr.width(), 0);
    assert_eq!(mmr.size(), 0);
    assert_eq!(mmr.root(), Felt::ZERO);
    assert_eq!(mmr.peaks().expect("peaks"), Vec::<Felt>::new());
}

#[test]
fn test_append_assigns_documented_positions() {
    let (_, width, positions) = build_mmr(10);
    assert_eq!(width, 10);
    assert_eq!(positions, vec![1, 2, 4, 5, 8, 9, 11, 12, 16, 17]);
}

#[test]
fn test_size_after_each_append() {
    let store = MemStore::default();
    let mut mmr = Mmr::new(&store, Blake3FieldHasher);
    let expected_sizes = [1u64, 3, 4, 7, 8, 10, 11, 15, 16, 18];
    for (i, want) in expected_sizes.iter().enumerate() {
        mmr.append(digest_from_u32(i as u32)).expect("append");
        assert_eq!(mmr.size(), *want, "after {} appends", i + 1);
        assert_eq!(
            mmr.size(),
            2 * mmr.width() - mmr.width().count_ones() as u64
        );
    }
}

#[test]
fn test_single_leaf() {
    let store = MemStore::default();
    let mut mmr = Mmr::new(&store, Blake3FieldHasher);
    let pos = mmr.append(digest_from_u32(0)).expect("append");
    assert_eq!(pos, 1);
    assert_eq!(mmr.width(), 1);
    assert_eq!(mmr.size(), 1);
    assert_ne!(mmr.root(), Felt::ZERO);
    assert_eq!(mmr.peaks().expect("peaks").len(), 1);

    let proof = mmr.proof(pos).expect("proof");
    assert!(proof.siblings().is_empty());
    assert!(proof
        .verify(&Blake3FieldHasher, pos, digest_from_u32(0))
        .expect("verify"));
}

#[test]
fn test_two_leaves_materialize_parent() {
    let (store, width, positions) = build_mmr(2);
    assert_eq!(positions, vec![1, 2]);
    // The parent at position 3 was created by the second append.
    let reader = &store;
    let mmr = Mmr::open(width, reader, Blake3FieldHasher).expect("open");
    assert!(mmr.node_hash(3).expect("read").is_some());
    for (i, pos) in positions.iter().enumerate() {
        let proof = mmr.proof(*pos).expect("proof");
        assert_eq!(proof.siblings().len(), 1);
        assert!(proof
            .verify(&Blake3FieldHasher, *pos, digest_from_u32(i as u32))
            .expect("verify"));
    }
}

#[test]
fn test_root_is_deterministic_under_replay() {
    let (store_a, width_a, _) = build_mmr(23);
    let (store_b, width_b, _) = build_mmr(23);
    let a = Mmr::open(width_a, &store_a, Blake3FieldHasher).expect("open");
    let b = Mmr::open(width_b, &store_b, Blake3FieldHasher).expect("open");
    assert_eq!(a.root(), b.root());
}

#[test]
fn test_root_changes_on_every_append() {
    let store = MemStore::default();
    let mut mmr = Mmr::new(&store, Blake3FieldHasher);
    let mut previous = mmr.root();
    for i in 0..32 {
        mmr.append(digest_from_u32(i)).expect("append");
        assert_ne!(mmr.root(), previous, "append {}", i + 1);
        previous = mmr.root();
    }
}

#[test]
fn test_append_never_rewrites_stored_nodes() {
    let store = MemStore::default();
    let mut mmr = Mmr::new(&store, Blake3FieldHasher);
    for i in 0..7 {
        mmr.append(digest_from_u32(i)).expect("append");
    }
    let size_before = mmr.size();
    let snapshot: Vec<(u64, Felt)> = (1..=size_before)
        .map(|pos| {
            (
                pos,
                mmr.node_hash(pos).expect("read").expect("populated"),
            )
        })
        .collect();

    mmr.append(digest_from_u32(7)).expect("append");

    for (pos, hash) in snapshot {
        assert_eq!(
            mmr.node_hash(pos).expect("read"),
            Some(hash),
            "position {} changed across append",
            pos
        );
    }
}

#[test]
fn test_node_hash_absent_when_not_materialized() {
    let (store, width, _) = build_mmr(3);
    let mmr = Mmr::open(width, &store, Blake3FieldHasher).expect("open");
    // Size is 4; nothing beyond it exists yet.
    assert_eq!(mmr.node_hash(5).expect("read"), None);
    assert_eq!(mmr.node_hash(999).expect("read"), None);
}

#[test]
fn test_proof_out_of_range() {
    let (store, width, _) = build_mmr(4);
    let mmr = Mmr::open(width, &store, Blake3FieldHasher).expect("open");
    assert!(matches!(
        mmr.proof(0),
        Err(Error::PositionOutOfRange { pos: 0, .. })
    ));
    assert!(matches!(
        mmr.proof(mmr.size() + 100),
        Err(Error::PositionOutOfRange { .. })
    ));
}

#[test]
fn test_proof_for_internal_node_fails() {
    let (store, width, _) = build_mmr(4);
    let mmr = Mmr::open(width, &store, Blake3FieldHasher).expect("open");
    assert_eq!(mmr.proof(3).expect_err("internal"), Error::NotALeaf(3));
    assert_eq!(mmr.proof(7).expect_err("internal"), Error::NotALeaf(7));
}

#[test]
fn test_open_matches_live_state() {
    let store = MemStore::default();
    let mut mmr = Mmr::new(&store, Blake3FieldHasher);
    for i in 0..13 {
        mmr.append(digest_from_u32(i)).expect("append");
    }
    let (width, size, root) = (mmr.width(), mmr.size(), mmr.root());
    drop(mmr);

    let reopened = Mmr::open(width, &store, Blake3FieldHasher).expect("open");
    assert_eq!(reopened.width(), width);
    assert_eq!(reopened.size(), size);
    assert_eq!(reopened.root(), root);
}

#[test]
fn test_open_empty() {
    let store = MemStore::default();
    let mmr = Mmr::open(0, &store, Blake3FieldHasher).expect("open");
    assert_eq!(mmr.root(), Felt::ZERO);
    assert_eq!(mmr.size(), 0);
}

#[test]
fn test_open_with_missing_peaks_fails() {
    let store = MemStore::default();
    let result = Mmr::open(3, &store, Blake3FieldHasher);
    assert!(matches!(result, Err(Error::InconsistentStore(_))));
}

#[test]
fn test_append_resumes_after_open() {
    let (store, width, _) = build_mmr(5);
    let mut mmr = Mmr::open(width, &store, Blake3FieldHasher).expect("open");
    let pos = mmr.append(digest_from_u32(5)).expect("append");
    assert_eq!(pos, leaf_position(6));
    assert_eq!(mmr.width(), 6);

    let proof = mmr.proof(pos).expect("proof");
    assert!(proof
        .verify(&Blake3FieldHasher, pos, digest_from_u32(5))
        .expect("verify"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After `n` appends the store holds exactly the `size_for_width(n)`
    /// nodes of the forest, each position populated once.
    #[test]
    fn prop_store_fully_populated(n in 1u32..200) {
        let (store, width, _) = build_mmr(n);
        let size = size_for_width(width);
        prop_assert_eq!(store.len() as u64, size);
        let reader = &store;
        let mmr = Mmr::open(width, reader, Blake3FieldHasher).expect("open");
        for pos in 1..=size {
            prop_assert!(mmr.node_hash(pos).expect("read").is_some());
        }
    }

    /// Leaf positions strictly increase with width and match the closed
    /// form the append engine uses.
    #[test]
    fn prop_leaf_positions_increase(n in 2u32..300) {
        let (_, _, positions) = build_mmr(n);
        for (i, window) in positions.windows(2).enumerate() {
            prop_assert!(window[0] < window[1], "append {}", i);
        }
        for (i, pos) in positions.iter().enumerate() {
            prop_assert_eq!(*pos, leaf_position(i as u64 + 1));
            prop_assert!(is_leaf(*pos));
        }
    }

    /// Every appended leaf remains provable at the current width.
    #[test]
    fn prop_all_leaves_provable(n in 1u32..80) {
        let (store, width, positions) = build_mmr(n);
        let mmr = Mmr::open(width, &store, Blake3FieldHasher).expect("open");
        for (i, pos) in positions.iter().enumerate() {
            let proof = mmr.proof(*pos).expect("proof");
            prop_assert!(proof
                .verify(&Blake3FieldHasher, *pos, digest_from_u32(i as u32))
                .expect("verify"));
        }
    }

    /// Distinct leaf sequences commit to distinct roots.
    #[test]
    fn prop_different_sequences_different_roots(
        a in prop::collection::vec(prop::array::uniform32(any::<u8>()), 1..16),
        b in prop::collection::vec(prop::array::uniform32(any::<u8>()), 1..16),
    ) {
        prop_assume!(a != b);
        let store_a = MemStore::default();
        let store_b = MemStore::default();
        let mut mmr_a = Mmr::new(&store_a, Blake3FieldHasher);
        let mut mmr_b = Mmr::new(&store_b, Blake3FieldHasher);
        for digest in &a {
            mmr_a.append(*digest).expect("append");
        }
        for digest in &b {
            mmr_b.append(*digest).expect("append");
        }
        prop_assert_ne!(mmr_a.root(), mmr_b.root());
    }
}
