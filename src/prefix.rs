//! Prefix aggregates: how many `true` values sit at keys `<= k`.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::tree::AvlTree;

impl AvlTree {
    /// Number of `true` values stored at keys `<= key`, in O(log n).
    ///
    /// Starts from the whole-tree count and, while descending towards `key`,
    /// subtracts every node and right subtree left behind on the greater
    /// side. `key` must be present; otherwise returns
    /// [`Error::KeyNotFound`].
    pub fn prefix_count(&self, key: i32) -> Result<u32> {
        let mut count = self.slot_trues(self.root);
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            match node.key.cmp(&key) {
                Ordering::Equal => return Ok(count - self.slot_trues(node.right)),
                Ordering::Less => cur = node.right,
                Ordering::Greater => {
                    count -= u32::from(node.value) + self.slot_trues(node.right);
                    cur = node.left;
                }
            }
        }
        Err(Error::KeyNotFound(key))
    }

    /// XOR of the values stored at keys `<= key`; the parity of
    /// [`prefix_count`](Self::prefix_count).
    pub fn prefix_xor(&self, key: i32) -> Result<bool> {
        self.prefix_count(key).map(|count| count & 1 == 1)
    }

    /// Reference version of [`prefix_count`](Self::prefix_count) that walks
    /// the list from the minimum. O(n).
    ///
    /// Does not require `key` to be present.
    pub fn slow_prefix_count(&self, key: i32) -> u32 {
        self.iter()
            .take_while(|&(k, _)| k <= key)
            .map(|(_, v)| u32::from(v))
            .sum()
    }

    pub fn slow_prefix_xor(&self, key: i32) -> bool {
        self.iter()
            .take_while(|&(k, _)| k <= key)
            .fold(false, |acc, (_, v)| acc ^ v)
    }
}
