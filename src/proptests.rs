use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

use crate::{print, AvlTree, Error, NodeId};

/// Checks every structural invariant of `t` by walking the whole tree and
/// both directions of the list. Panics on the first violation.
pub(crate) fn validate_tree(t: &AvlTree) {
    struct Summary {
        height: i32,
        trues: u32,
        count: usize,
    }

    fn walk(
        t: &AvlTree,
        slot: Option<NodeId>,
        parent: Option<NodeId>,
        lo: Option<i32>,
        hi: Option<i32>,
    ) -> Summary {
        let Some(id) = slot else {
            return Summary {
                height: -1,
                trues: 0,
                count: 0,
            };
        };
        let node = &t.nodes[id];
        assert_eq!(node.parent, parent, "parent link of key {}", node.key);
        assert!(
            lo.map_or(true, |lo| node.key > lo) && hi.map_or(true, |hi| node.key < hi),
            "key {} out of BST order ({lo:?}, {hi:?})",
            node.key
        );

        let l = walk(t, node.left, Some(id), lo, Some(node.key));
        let r = walk(t, node.right, Some(id), Some(node.key), hi);
        assert!(
            (l.height - r.height).abs() <= 1,
            "key {} unbalanced: left {} right {}",
            node.key,
            l.height,
            r.height
        );

        let height = 1 + l.height.max(r.height);
        assert_eq!(node.height, height, "stored height of key {}", node.key);
        let trues = l.trues + u32::from(node.value) + r.trues;
        assert_eq!(node.trues, trues, "stored aggregate of key {}", node.key);

        Summary {
            height,
            trues,
            count: l.count + r.count + 1,
        }
    }

    let summary = walk(t, t.root, None, None, None);
    assert_eq!(summary.count, t.len(), "reachable nodes must match len");
    assert_eq!(t.nodes.live(), t.len(), "occupied arena slots must match len");
    assert_eq!(t.height(), summary.height);

    assert_eq!(t.min.is_none(), t.is_empty());
    assert_eq!(t.max.is_none(), t.is_empty());

    // Forward walk from min.
    let mut forward = Vec::with_capacity(t.len());
    let mut cur = t.min;
    let mut prev = None;
    while let Some(id) = cur {
        assert!(forward.len() < t.len(), "list longer than len");
        let node = &t.nodes[id];
        assert_eq!(node.prev, prev, "prev link of key {}", node.key);
        forward.push(node.key);
        prev = Some(id);
        cur = node.next;
    }
    assert_eq!(prev, t.max, "list must end at max");
    assert_eq!(forward.len(), t.len());
    assert!(forward.windows(2).all(|w| w[0] < w[1]), "list not ascending");

    // Backward walk from max.
    let mut backward = Vec::with_capacity(t.len());
    let mut cur = t.max;
    while let Some(id) = cur {
        assert!(backward.len() < t.len(), "list longer than len");
        backward.push(t.nodes[id].key);
        cur = t.nodes[id].prev;
    }
    backward.reverse();
    assert_eq!(forward, backward);

    // Every node in the arena is in the tree (count matched above) and the
    // in-order walk agrees with the list.
    let mut in_order: Vec<i32> = t.nodes.iter().map(|(_, node)| node.key).collect();
    in_order.sort_unstable();
    assert_eq!(in_order, forward);
}

/// AVL height bound: `h < 1.4405 * log2(n + 2) - 0.3277`.
fn assert_height_bound(t: &AvlTree) {
    let bound = 1.4405 * ((t.len() + 2) as f64).log2() - 0.3277;
    assert!(
        f64::from(t.height()) < bound,
        "height {} exceeds AVL bound {bound} for {} nodes",
        t.height(),
        t.len()
    );
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Insert(#[proptest(strategy = "-200i32..200")] i32, bool),
    #[proptest(weight = 3)]
    Delete(#[proptest(strategy = "-200i32..200")] i32),
    #[proptest(weight = 2)]
    Search(#[proptest(strategy = "-200i32..200")] i32),
    Prefix(#[proptest(strategy = "-200i32..200")] i32),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(any::<Op>(), 0..=600)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreemap(ops in ops_strategy()) {
        let mut t = AvlTree::new();
        let mut m: BTreeMap<i32, bool> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let got = t.insert(key, value);
                    if m.contains_key(&key) {
                        prop_assert_eq!(got, Err(Error::DuplicateKey(key)));
                    } else {
                        m.insert(key, value);
                        let units = got.expect("insert of a fresh key");
                        prop_assert!((1..=2).contains(&units));
                    }
                }
                Op::Delete(key) => {
                    let got = t.delete(key);
                    if m.remove(&key).is_some() {
                        prop_assert!(got.is_ok());
                    } else {
                        prop_assert_eq!(got, Err(Error::KeyNotFound(key)));
                    }
                }
                Op::Search(key) => {
                    prop_assert_eq!(t.search(key), m.get(&key).copied());
                }
                Op::Prefix(key) => {
                    let expected = m.range(..=key).filter(|&(_, &v)| v).count() as u32;
                    prop_assert_eq!(t.slow_prefix_count(key), expected);
                    if m.contains_key(&key) {
                        prop_assert_eq!(t.prefix_count(key), Ok(expected));
                        prop_assert_eq!(t.prefix_xor(key), Ok(expected % 2 == 1));
                    } else {
                        prop_assert_eq!(t.prefix_count(key), Err(Error::KeyNotFound(key)));
                    }
                }
            }

            prop_assert_eq!(t.len(), m.len());
            validate_tree(&t);
        }

        assert_height_bound(&t);
        let got: Vec<(i32, bool)> = t.iter().collect();
        let expected: Vec<(i32, bool)> = m.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(got, expected);
        prop_assert_eq!(t.min_key(), m.keys().next().copied());
        prop_assert_eq!(t.max_key(), m.keys().next_back().copied());
    }

    #[test]
    fn prop_failed_ops_change_nothing(
        keys in prop::collection::btree_set(any::<i32>(), 1..200),
        probe in any::<i32>(),
    ) {
        let mut t = AvlTree::new();
        for &k in &keys {
            t.insert(k, k % 2 == 0).unwrap();
        }
        let existing = *keys.iter().next().unwrap();

        let snapshot = format!("{:?}", t);
        let shape = print::render(&t);
        let (min, max, len) = (t.min(), t.max(), t.len());

        prop_assert_eq!(t.insert(existing, true), Err(Error::DuplicateKey(existing)));
        if !keys.contains(&probe) {
            prop_assert_eq!(t.delete(probe), Err(Error::KeyNotFound(probe)));
        }

        prop_assert_eq!(format!("{:?}", t), snapshot);
        prop_assert_eq!(print::render(&t), shape);
        prop_assert_eq!((t.min(), t.max(), t.len()), (min, max, len));
        validate_tree(&t);
    }

    #[test]
    fn prop_prefix_matches_list_walk(
        entries in prop::collection::btree_map(any::<i32>(), any::<bool>(), 1..300),
    ) {
        let mut t = AvlTree::new();
        for (&k, &v) in &entries {
            t.insert(k, v).unwrap();
        }
        for &k in entries.keys() {
            prop_assert_eq!(t.prefix_count(k), Ok(t.slow_prefix_count(k)));
            prop_assert_eq!(t.prefix_xor(k), Ok(t.slow_prefix_xor(k)));
        }
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = [1, 2, 3, 4, 5, 6, 7];

    for_each_permutation(&keys, |perm| {
        let mut t = AvlTree::new();
        for &k in &perm {
            let units = t.insert(k, k % 2 == 1).unwrap();
            assert!((1..=2).contains(&units));
            validate_tree(&t);
        }
        assert_eq!(t.keys_in_order(), keys.to_vec());
        assert!(t.height() <= 3);
        for &k in &keys {
            assert_eq!(t.prefix_count(k), Ok(((k + 1) / 2) as u32));
        }
    });
}

#[test]
fn exhaustive_delete_order_small_set() {
    let keys = [10, 20, 30, 40, 50, 60, 70];

    // Insert in a fixed order, then delete in all permutations.
    let mut base = AvlTree::new();
    for &k in &keys {
        base.insert(k, true).unwrap();
    }

    for_each_permutation(&keys, |perm| {
        let mut t = base.clone();
        for k in perm {
            t.delete(k).unwrap();
            assert_eq!(t.search(k), None);
            validate_tree(&t);
        }
        assert!(t.is_empty());
        assert_eq!(t.root, None);
        assert_eq!((t.min, t.max), (None, None));
    });
}

#[test]
fn ascending_and_descending_runs_stay_balanced() {
    let mut t = AvlTree::new();
    for k in 0..4096 {
        t.insert(k, true).unwrap();
    }
    validate_tree(&t);
    assert_height_bound(&t);
    assert_eq!(t.height(), 12);

    for k in (0..4096).rev().step_by(2) {
        t.delete(k).unwrap();
    }
    validate_tree(&t);
    assert_height_bound(&t);
    assert_eq!(t.len(), 2048);
    assert_eq!(t.prefix_count(4094), Ok(2048));
}
