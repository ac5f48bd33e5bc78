//! The threaded in-order list: neighbour discovery on insertion, splicing on
//! deletion, and traversal.

use std::iter::FusedIterator;

use crate::arena::NodeId;
use crate::node::Direction;
use crate::tree::AvlTree;

impl AvlTree {
    /// In-order neighbour of `id` on side `dir`, found by walking the tree.
    ///
    /// Only used while linking a freshly attached node, before it has list
    /// entries of its own.
    pub(crate) fn climb_neighbour(&self, dir: Direction, id: NodeId) -> Option<NodeId> {
        if let Some(mut cur) = self.nodes[id].child(dir) {
            while let Some(inner) = self.nodes[cur].child(dir.opposite()) {
                cur = inner;
            }
            return Some(cur);
        }
        let mut cur = id;
        while let Some(parent) = self.nodes[cur].parent {
            if self.nodes[parent].child(dir.opposite()) == Some(cur) {
                return Some(parent);
            }
            cur = parent;
        }
        None
    }

    /// Threads a newly attached node into the list and updates `min`/`max`.
    pub(crate) fn link_new(&mut self, id: NodeId) {
        let next = self.climb_neighbour(Direction::Right, id);
        let prev = self.climb_neighbour(Direction::Left, id);

        self.nodes[id].next = next;
        self.nodes[id].prev = prev;
        match next {
            Some(next) => self.nodes[next].prev = Some(id),
            None => self.max = Some(id),
        }
        match prev {
            Some(prev) => self.nodes[prev].next = Some(id),
            None => self.min = Some(id),
        }
    }

    /// Removes `id` from the list, moving `min`/`max` to its former
    /// neighbour when it was extremal. `id` keeps its own links so deletion
    /// can still read its successor.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        let (prev, next) = {
            let node = &self.nodes[id];
            (node.prev, node.next)
        };
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.max = prev,
        }
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.min = next,
        }
    }

    /// Node with the next larger key, in O(1).
    ///
    /// Returns `None` for the maximum and for ids that do not name a live
    /// node.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.next)
    }

    /// Node with the next smaller key, in O(1).
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.prev)
    }

    /// Keys in ascending order, read from the list.
    pub fn keys_in_order(&self) -> Vec<i32> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Values ordered by their keys, read from the list.
    pub fn values_in_order(&self) -> Vec<bool> {
        self.iter().map(|(_, v)| v).collect()
    }

    /// Iterates `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: self,
            front: self.min,
            back: self.max,
            remaining: self.len,
        }
    }
}

/// Ascending iterator over a tree's entries, following the list links.
pub struct Iter<'a> {
    tree: &'a AvlTree,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = (i32, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.tree.nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.tree.nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some((node.key, node.value))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = (i32, bool);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
