//! Property tests run against every tree variant. Each variant's module feeds
//! its own tree type through the shared checks below.

mod avl;
mod bst;
mod red_black;

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use quickcheck::{Arbitrary, Gen};
use search_trees::{Node, Tree};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Remove the K from the data structure
    Remove(K),
    /// Compare iterators
    Iter,
}

impl<K: Arbitrary> Arbitrary for Op<K> {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Iter,
            _ => unreachable!(),
        }
    }
}

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both. Returns `None` as soon
/// as the two disagree.
fn do_ops<N>(ops: &[Op<N::Data>], tree: &mut Tree<N>) -> Option<BTreeSet<N::Data>>
where
    N: Node,
    N::Data: Clone,
{
    let mut set = BTreeSet::new();
    for op in ops {
        let agrees = match op {
            Op::Insert(k) => tree.add(k.clone()) == set.insert(k.clone()),
            Op::Remove(k) => tree.remove(k) == set.remove(k),
            Op::Iter => tree.inorder().eq(set.iter()),
        };
        if !agrees || !tree.verify() {
            return None;
        }
    }
    Some(set)
}

/// After any mix of operations the tree holds exactly the model's keys in
/// sorted order and still satisfies its invariants.
pub fn fuzz_multiple_operations<N>(ops: &[Op<N::Data>]) -> bool
where
    N: Node,
    N::Data: Clone,
{
    let mut tree = Tree::<N>::new();
    match do_ops(ops, &mut tree) {
        Some(set) => tree.len() == set.len() && tree.inorder().eq(set.iter()),
        None => false,
    }
}

pub fn contains<N>(xs: Vec<N::Data>) -> bool
where
    N: Node,
    N::Data: Clone,
{
    let tree: Tree<N> = xs.iter().cloned().collect();

    xs.iter().all(|x| tree.contains(x))
}

pub fn contains_not<N>(xs: Vec<N::Data>, nots: Vec<N::Data>) -> bool
where
    N: Node,
    N::Data: Clone + Hash,
{
    let tree: Tree<N> = xs.iter().cloned().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

pub fn with_deletions<N>(xs: Vec<N::Data>, deletes: Vec<N::Data>) -> bool
where
    N: Node,
    N::Data: Clone,
{
    let mut tree: Tree<N> = xs.iter().cloned().collect();
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    // We may have inserted the same value multiple times - drop each one.
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.verify()
}

pub fn copy_to_round_trips<N>(xs: Vec<N::Data>) -> bool
where
    N: Node,
    N::Data: Clone + Default,
{
    let tree: Tree<N> = xs.into_iter().collect();
    let mut dest = vec![N::Data::default(); tree.len()];

    tree.copy_to(&mut dest, 0).is_ok() && tree.inorder().eq(dest.iter())
}
