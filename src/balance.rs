//! Height, balance factor and aggregate maintenance, and AVL rotations.

use log::trace;

use crate::arena::NodeId;
use crate::node::Direction;
use crate::tree::AvlTree;

impl AvlTree {
    /// Height of a child slot; an absent child is -1.
    #[inline]
    pub(crate) fn slot_height(&self, slot: Option<NodeId>) -> i32 {
        slot.map_or(-1, |id| self.nodes[id].height)
    }

    /// Aggregate of a child slot; an absent child contributes nothing.
    #[inline]
    pub(crate) fn slot_trues(&self, slot: Option<NodeId>) -> u32 {
        slot.map_or(0, |id| self.nodes[id].trues)
    }

    /// `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance_factor(&self, id: NodeId) -> i32 {
        let node = &self.nodes[id];
        self.slot_height(node.left) - self.slot_height(node.right)
    }

    /// Recomputes the stored height from the children. Returns whether it
    /// changed.
    pub(crate) fn refresh_height(&mut self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        let height = 1 + self.slot_height(node.left).max(self.slot_height(node.right));
        let changed = node.height != height;
        self.nodes[id].height = height;
        changed
    }

    pub(crate) fn refresh_trues(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let trues =
            self.slot_trues(node.left) + u32::from(node.value) + self.slot_trues(node.right);
        self.nodes[id].trues = trues;
    }

    /// Refreshes aggregates from `from` up to the root. Heights above `from`
    /// are unaffected by the caller's change, only the aggregates are stale.
    pub(crate) fn propagate_trues(&mut self, from: Option<NodeId>) {
        let mut cur = from;
        while let Some(id) = cur {
            self.refresh_trues(id);
            cur = self.nodes[id].parent;
        }
    }

    /// Points `parent`'s link to `old` at `new` instead, or makes `new` the
    /// root when `parent` is `None`. Does not touch `new`'s parent link.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            Some(p) => {
                let p = &mut self.nodes[p];
                if p.left == Some(old) {
                    p.left = new;
                } else {
                    debug_assert_eq!(p.right, Some(old));
                    p.right = new;
                }
            }
            None => self.root = new,
        }
    }

    /// Single rotation of `x` in direction `dir`. The child of `x` opposite
    /// to `dir` takes its place; returns that child.
    pub(crate) fn rotate(&mut self, dir: Direction, x: NodeId) -> NodeId {
        let y = self.nodes[x]
            .child(dir.opposite())
            .expect("rotation pivot must have a child on the heavy side");
        let parent = self.nodes[x].parent;
        let inner = self.nodes[y].child(dir);

        self.nodes[x].set_child(dir.opposite(), inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }

        self.nodes[y].set_child(dir, Some(x));
        self.nodes[x].parent = Some(y);

        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        self.refresh_height(x);
        self.refresh_height(y);
        self.refresh_trues(x);
        self.refresh_trues(y);

        trace!(
            "rotate {:?} at key {} (new subtree root {})",
            dir,
            self.nodes[x].key,
            self.nodes[y].key
        );
        y
    }

    /// One AVL rebalancing step at a node with `|bf| == 2`: a single
    /// rotation, or a double rotation when the heavy child leans the other
    /// way. Returns the new root of the subtree.
    pub(crate) fn rebalance(&mut self, x: NodeId) -> NodeId {
        debug_assert_eq!(self.balance_factor(x).abs(), 2);
        if self.balance_factor(x) > 0 {
            let left = self.nodes[x].left.expect("left-heavy node has a left child");
            if self.balance_factor(left) < 0 {
                self.rotate(Direction::Left, left);
            }
            self.rotate(Direction::Right, x)
        } else {
            let right = self.nodes[x]
                .right
                .expect("right-heavy node has a right child");
            if self.balance_factor(right) > 0 {
                self.rotate(Direction::Right, right);
            }
            self.rotate(Direction::Left, x)
        }
    }
}
