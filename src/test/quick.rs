//! Tools for property-based testing.

use quickcheck::{Arbitrary, Gen};

/// The different operations we can perform on a tree.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert an element.
    Insert(T),
    /// Delete an element.
    Remove(T),
    /// Iterate over the tree in ascending order.
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
