//! # threaded-avl
//!
//! An AVL tree over `i32` keys with `bool` values that answers prefix
//! queries ("how many `true` values at keys `<= k`") in O(log n).
//!
//! Every node caches the height of its subtree and the number of `true`
//! values in it, and all nodes are threaded into an ascending doubly linked
//! list, so successor/predecessor lookups are O(1) and ordered export never
//! walks the tree.
//!
//! ## Example
//!
//! ```rust
//! use threaded_avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for k in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(k, true).unwrap();
//! }
//!
//! assert_eq!(tree.keys_in_order(), vec![1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(tree.prefix_count(7), Ok(5));
//! assert_eq!(tree.prefix_xor(7), Ok(true));
//! assert_eq!(tree.search(6), None);
//! ```
//!
//! [`BsTree`] is an unbalanced baseline with the same contract, and
//! [`print`] renders the shape of either tree for the console.

pub mod arena;
mod balance;
pub mod bst;
pub mod error;
mod node;
pub mod order;
mod prefix;
pub mod print;
pub mod tree;

pub use arena::NodeId;
pub use bst::BsTree;
pub use error::{Error, Result};
pub use order::Iter;
pub use tree::AvlTree;

/// Operations shared by [`AvlTree`] and [`BsTree`], so callers can drive
/// either one through the same code.
pub trait OrderedTree {
    /// Inserts `key`, returning the number of rebalancing units spent.
    fn insert(&mut self, key: i32, value: bool) -> Result<usize>;
    /// Deletes `key`, returning the number of rebalancing units spent.
    fn delete(&mut self, key: i32) -> Result<usize>;
    fn search(&self, key: i32) -> Option<bool>;
    fn is_empty(&self) -> bool;
}

impl OrderedTree for AvlTree {
    fn insert(&mut self, key: i32, value: bool) -> Result<usize> {
        AvlTree::insert(self, key, value)
    }

    fn delete(&mut self, key: i32) -> Result<usize> {
        AvlTree::delete(self, key)
    }

    fn search(&self, key: i32) -> Option<bool> {
        AvlTree::search(self, key)
    }

    fn is_empty(&self) -> bool {
        AvlTree::is_empty(self)
    }
}

impl OrderedTree for BsTree {
    fn insert(&mut self, key: i32, value: bool) -> Result<usize> {
        BsTree::insert(self, key, value)
    }

    fn delete(&mut self, key: i32) -> Result<usize> {
        BsTree::delete(self, key)
    }

    fn search(&self, key: i32) -> Option<bool> {
        BsTree::search(self, key)
    }

    fn is_empty(&self) -> bool {
        BsTree::is_empty(self)
    }
}


#[cfg(test)]
mod proptests;
