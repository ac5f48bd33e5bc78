//! Unbalanced binary search tree, kept as a performance baseline for
//! [`AvlTree`](crate::AvlTree).
//!
//! Same keys, values and error contract, but no rebalancing, no aggregate
//! and no threaded list: sorted insertions degrade it to a linked list.

use std::cmp::Ordering;

use log::debug;

use crate::arena::{NodeArena, NodeId};
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
struct BstNode {
    key: i32,
    value: bool,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct BsTree {
    nodes: NodeArena<BstNode>,
    root: Option<NodeId>,
    len: usize,
}

impl BsTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn key(&self, id: NodeId) -> Option<i32> {
        self.nodes.get(id).map(|node| node.key)
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.right)
    }

    /// Height of the tree; -1 when empty. Walks the whole tree.
    pub fn height(&self) -> i32 {
        let mut height = -1;
        let mut stack: Vec<(NodeId, i32)> = self.root.map(|id| (id, 0)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        height
    }

    fn find(&self, key: i32) -> Option<NodeId> {
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

    pub fn search(&self, key: i32) -> Option<bool> {
        self.find(key).map(|id| self.nodes[id].value)
    }

    /// Inserts `key`. Never rebalances, so always returns `Ok(0)`.
    pub fn insert(&mut self, key: i32, value: bool) -> Result<usize> {
        let Some(mut parent) = self.root else {
            self.root = Some(self.nodes.alloc(BstNode {
                key,
                value,
                left: None,
                right: None,
                parent: None,
            }));
            self.len = 1;
            return Ok(0);
        };

        let go_left = loop {
            let node = &self.nodes[parent];
            let next = match key.cmp(&node.key) {
                Ordering::Equal => {
                    debug!("bst insert rejected: key {key} already present");
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

        let id = self.nodes.alloc(BstNode {
            key,
            value,
            left: None,
            right: None,
            parent: Some(parent),
        });
        if go_left {
            self.nodes[parent].left = Some(id);
        } else {
            self.nodes[parent].right = Some(id);
        }
        self.len += 1;
        Ok(0)
    }

    /// Deletes `key`. Never rebalances, so returns `Ok(0)` on success.
    pub fn delete(&mut self, key: i32) -> Result<usize> {
        let Some(id) = self.find(key) else {
            debug!("bst delete rejected: key {key} not present");
            return Err(Error::KeyNotFound(key));
        };
        let BstNode {
            left,
            right,
            parent,
            ..
        } = self.nodes[id].clone();

        let replacement = match (left, right) {
            (Some(left), Some(right)) => {
                let mut succ = right;
                while let Some(l) = self.nodes[succ].left {
                    succ = l;
                }
                if succ != right {
                    let sp = self.nodes[succ]
                        .parent
                        .expect("successor below a node has a parent");
                    let succ_right = self.nodes[succ].right;
                    self.nodes[sp].left = succ_right;
                    if let Some(r) = succ_right {
                        self.nodes[r].parent = Some(sp);
                    }
                    self.nodes[succ].right = Some(right);
                    self.nodes[right].parent = Some(succ);
                }
                self.nodes[succ].left = Some(left);
                self.nodes[left].parent = Some(succ);
                Some(succ)
            }
            (child, None) | (None, child) => child,
        };

        if let Some(r) = replacement {
            self.nodes[r].parent = parent;
        }
        match parent {
            Some(p) if self.nodes[p].left == Some(id) => self.nodes[p].left = replacement,
            Some(p) => self.nodes[p].right = replacement,
            None => self.root = replacement,
        }
        self.nodes.release(id);
        self.len -= 1;
        Ok(0)
    }

    /// Keys in ascending order, by an in-order walk.
    pub fn keys_in_order(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cur = self.root;
        loop {
            while let Some(id) = cur {
                stack.push(id);
                cur = self.nodes[id].left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            keys.push(self.nodes[id].key);
            cur = self.nodes[id].right;
        }
        keys
    }
}
