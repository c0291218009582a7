use search_trees::RedBlackNode;

use crate::Op;

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        crate::fuzz_multiple_operations::<RedBlackNode<i8>>(&ops)
    }

    fn contains(xs: Vec<i8>) -> bool {
        crate::contains::<RedBlackNode<i8>>(xs)
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        crate::contains_not::<RedBlackNode<i8>>(xs, nots)
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        crate::with_deletions::<RedBlackNode<i8>>(xs, deletes)
    }

    fn copy_to_round_trips(xs: Vec<i16>) -> bool {
        crate::copy_to_round_trips::<RedBlackNode<i16>>(xs)
    }
}
