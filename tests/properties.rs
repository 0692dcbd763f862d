//! Property tests that drive the public API against `BTreeSet`, which
//! promises exactly the ordered-set behavior the tree is supposed to have.

use std::collections::{BTreeSet, HashSet};
use std::fmt::Debug;

use assert_matches::assert_matches;
use ordered_tree::{OrderedTree, TreeError};
use quickcheck::{Arbitrary, Gen};

#[derive(Copy, Clone, Debug)]
enum Op<T> {
    Insert(T),
    Remove(T),
    Iter,
}

impl<T: Arbitrary> Arbitrary for Op<T> {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Iter,
            _ => unreachable!(),
        }
    }
}

/// Applies each operation to the tree and the oracle, asserting that both
/// report the same outcome at every step.
fn do_ops<T>(ops: &[Op<T>], tree: &mut OrderedTree<T>, oracle: &mut BTreeSet<T>)
where
    T: Ord + Clone + Debug,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                if oracle.insert(x.clone()) {
                    assert_eq!(tree.insert(x.clone()), Ok(()));
                } else {
                    assert_eq!(tree.insert(x.clone()), Err(TreeError::DuplicateElement));
                }
            }
            Op::Remove(x) => {
                if oracle.remove(x) {
                    assert_eq!(tree.delete(x), Ok(x.clone()));
                } else {
                    assert_eq!(tree.delete(x), Err(TreeError::NotFound));
                }
            }
            Op::Iter => {
                assert!(tree.in_order().eq(oracle.iter()));
            }
        }
    }
}

quickcheck::quickcheck! {
    fn matches_ordered_set(ops: Vec<Op<i8>>) -> bool {
        let mut tree = OrderedTree::new();
        let mut oracle = BTreeSet::new();
        do_ops(&ops, &mut tree, &mut oracle);
        tree.len() == oracle.len()
            && tree.recursive_len() == oracle.len()
            && tree.in_order().eq(oracle.iter())
    }

    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        xs.iter().all(|x| tree.contains(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        let added: HashSet<i8> = xs.into_iter().collect();
        nots.iter()
            .filter(|x| !added.contains(*x))
            .all(|x| tree.find(x).is_none())
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        for x in &deletes {
            let _ = tree.delete(x);
        }

        let remaining: HashSet<i8> = xs
            .iter()
            .copied()
            .filter(|x| !deletes.contains(x))
            .collect();
        deletes.iter().all(|x| !tree.contains(x))
            && remaining.iter().all(|x| tree.contains(x))
            && tree.len() == remaining.len()
    }

    fn reinserting_any_element_is_rejected(xs: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        let len_before = tree.len();
        xs.iter()
            .all(|x| tree.insert(*x) == Err(TreeError::DuplicateElement))
            && tree.len() == len_before
    }

    fn every_traversal_visits_every_element(xs: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        let n = tree.len();
        tree.in_order().count() == n
            && tree.pre_order().count() == n
            && tree.post_order().count() == n
            && tree.level_order().count() == n
    }

    fn successors_walk_the_ascending_order(xs: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }

        let sorted: Vec<i8> = tree.in_order().copied().collect();
        let mut walked = Vec::with_capacity(sorted.len());
        let mut node = tree.find_min().ok();
        while let Some(current) = node {
            walked.push(*current.element());
            node = current.successor();
        }
        walked == sorted
    }

    fn predecessors_walk_the_descending_order(xs: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }

        let mut descending: Vec<i8> = tree.in_order().copied().collect();
        descending.reverse();
        let mut walked = Vec::with_capacity(descending.len());
        let mut node = tree.find_max().ok();
        while let Some(current) = node {
            walked.push(*current.element());
            node = current.predecessor();
        }
        walked == descending
    }
}

#[test]
fn every_failure_is_reported_by_variant() {
    let mut tree = OrderedTree::new();
    assert_matches!(tree.root(), Err(TreeError::EmptyTree));
    assert_matches!(tree.find_min(), Err(TreeError::EmptyTree));
    assert_matches!(tree.find_max(), Err(TreeError::EmptyTree));
    assert_matches!(tree.delete(&3), Err(TreeError::NotFound));

    tree.insert(3).unwrap();
    assert_matches!(tree.insert(3), Err(TreeError::DuplicateElement));
    assert_matches!(tree.root().unwrap().parent(), Err(TreeError::NoParent));

    // A failed operation leaves the tree usable.
    tree.insert(4).unwrap();
    assert_eq!(tree.len(), 2);

    // Errors implement `Display` through `thiserror`.
    assert_eq!(TreeError::EmptyTree.to_string(), "the tree is empty");
}
