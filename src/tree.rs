use std::cmp::Ordering;
use std::fmt;

use log::debug;

use crate::arena::{NodeArena, NodeId};
use crate::error::{Error, Result};
use crate::node::Node;

/// An AVL tree over `i32` keys with `bool` values.
///
/// Besides the usual ordered-map operations the tree keeps, per subtree, the
/// number of `true` values (so prefix counts are O(log n), see
/// [`AvlTree::prefix_count`]) and threads all nodes into an ascending doubly
/// linked list (so successor, predecessor and ordered export never walk the
/// tree).
#[derive(Clone)]
pub struct AvlTree {
    pub(crate) nodes: NodeArena<Node>,
    pub(crate) root: Option<NodeId>,
    pub(crate) min: Option<NodeId>,
    pub(crate) max: Option<NodeId>,
    pub(crate) len: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: None,
            min: None,
            max: None,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the whole tree; -1 when empty.
    pub fn height(&self) -> i32 {
        self.slot_height(self.root)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.min = None;
        self.max = None;
        self.len = 0;
    }

    pub fn search(&self, key: i32) -> Option<bool> {
        self.find(key).map(|id| self.nodes[id].value)
    }

    pub fn contains(&self, key: i32) -> bool {
        self.find(key).is_some()
    }

    /// Node holding `key`, if any.
    pub fn find(&self, key: i32) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            cur = match key.cmp(&node.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn key(&self, id: NodeId) -> Option<i32> {
        self.nodes.get(id).map(|node| node.key)
    }

    pub fn value(&self, id: NodeId) -> Option<bool> {
        self.nodes.get(id).map(|node| node.value)
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.right)
    }

    pub fn min_node(&self) -> Option<NodeId> {
        self.min
    }

    pub fn max_node(&self) -> Option<NodeId> {
        self.max
    }

    /// Value stored at the smallest key.
    pub fn min(&self) -> Option<bool> {
        self.min.map(|id| self.nodes[id].value)
    }

    /// Value stored at the largest key.
    pub fn max(&self) -> Option<bool> {
        self.max.map(|id| self.nodes[id].value)
    }

    pub fn min_key(&self) -> Option<i32> {
        self.min.map(|id| self.nodes[id].key)
    }

    pub fn max_key(&self) -> Option<i32> {
        self.max.map(|id| self.nodes[id].key)
    }

    /// Inserts `key` with `value`.
    ///
    /// Returns the number of rebalancing units: the new node itself, plus one
    /// if the fix-up had to rotate. At most one rotation step (single or
    /// double) is ever needed after an insertion.
    pub fn insert(&mut self, key: i32, value: bool) -> Result<usize> {
        let Some(root) = self.root else {
            let id = self.nodes.alloc(Node::leaf(key, value, None));
            self.root = Some(id);
            self.min = Some(id);
            self.max = Some(id);
            self.len = 1;
            return Ok(1);
        };

        // Descend to the empty slot where `key` belongs.
        let mut parent = root;
        let go_left = loop {
            let node = &self.nodes[parent];
            let next = match key.cmp(&node.key) {
                Ordering::Equal => {
                    debug!("insert rejected: key {key} already present");
                    return Err(Error::DuplicateKey(key));
                }
                Ordering::Less => node.left.ok_or(true),
                Ordering::Greater => node.right.ok_or(false),
            };
            match next {
                Ok(child) => parent = child,
                Err(go_left) => break go_left,
            }
        };

        let id = self.nodes.alloc(Node::leaf(key, value, Some(parent)));
        if go_left {
            self.nodes[parent].left = Some(id);
        } else {
            self.nodes[parent].right = Some(id);
        }
        self.link_new(id);
        self.len += 1;

        let mut rebalanced = 1;
        let mut cur = Some(parent);
        while let Some(x) = cur {
            if !self.refresh_height(x) {
                self.propagate_trues(Some(x));
                return Ok(rebalanced);
            }
            self.refresh_trues(x);
            if self.balance_factor(x).abs() == 2 {
                let top = self.rebalance(x);
                rebalanced += 1;
                self.propagate_trues(self.nodes[top].parent);
                return Ok(rebalanced);
            }
            cur = self.nodes[x].parent;
        }
        Ok(rebalanced)
    }

    /// Deletes `key`.
    ///
    /// Returns the number of ancestors that needed a height update or a
    /// rotation. Unlike insertion, rotations may cascade up to the root.
    pub fn delete(&mut self, key: i32) -> Result<usize> {
        let Some(id) = self.find(key) else {
            debug!("delete rejected: key {key} not present");
            return Err(Error::KeyNotFound(key));
        };

        self.unlink(id);
        self.len -= 1;

        let (parent, left, right) = {
            let node = &self.nodes[id];
            (node.parent, node.left, node.right)
        };
        let start = match (left, right) {
            (Some(_), Some(_)) => self.splice_successor(id),
            (child, None) | (None, child) => {
                self.replace_child(parent, id, child);
                if let Some(child) = child {
                    self.nodes[child].parent = parent;
                }
                parent
            }
        };
        self.nodes.release(id);

        let mut rebalanced = 0;
        let mut cur = start;
        while let Some(x) = cur {
            let changed = self.refresh_height(x);
            let bf = self.balance_factor(x);
            if !changed && bf.abs() < 2 {
                self.propagate_trues(Some(x));
                return Ok(rebalanced);
            }
            self.refresh_trues(x);
            rebalanced += 1;
            cur = if bf.abs() == 2 {
                let top = self.rebalance(x);
                self.nodes[top].parent
            } else {
                self.nodes[x].parent
            };
        }
        Ok(rebalanced)
    }

    /// Replaces `id`, which has two children, by its in-order successor.
    ///
    /// The successor keeps its own `NodeId` and takes over `id`'s parent,
    /// children and height. Returns where the fix-up walk starts.
    fn splice_successor(&mut self, id: NodeId) -> Option<NodeId> {
        let succ = self.nodes[id]
            .next
            .expect("node with a right subtree has a successor");
        let succ_parent = self.nodes[succ].parent;
        let (parent, left, right, height) = {
            let node = &self.nodes[id];
            (node.parent, node.left, node.right, node.height)
        };

        if succ_parent != Some(id) {
            let sp = succ_parent.expect("successor below a node has a parent");
            let succ_right = self.nodes[succ].right;
            self.nodes[sp].left = succ_right;
            if let Some(r) = succ_right {
                self.nodes[r].parent = Some(sp);
            }
            self.nodes[succ].right = right;
            if let Some(r) = right {
                self.nodes[r].parent = Some(succ);
            }
        }

        self.nodes[succ].left = left;
        if let Some(l) = left {
            self.nodes[l].parent = Some(succ);
        }
        self.nodes[succ].parent = parent;
        self.nodes[succ].height = height;
        self.replace_child(parent, id, Some(succ));

        if succ_parent == Some(id) {
            Some(succ)
        } else {
            succ_parent
        }
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
