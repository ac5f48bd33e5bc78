use crate::arena::NodeId;

/// Side of a node, also used as the rotation direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub(crate) fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A stored key/value pair.
///
/// Child links own their subtrees. `parent`, `next` and `prev` are plain
/// back-references: `next`/`prev` thread every live node in ascending key
/// order regardless of tree shape.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) key: i32,
    pub(crate) value: bool,
    /// Leaf = 0. An absent child counts as -1.
    pub(crate) height: i32,
    /// Number of `true` values in this subtree.
    pub(crate) trues: u32,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
}

impl Node {
    pub(crate) fn leaf(key: i32, value: bool, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            height: 0,
            trues: u32::from(value),
            left: None,
            right: None,
            parent,
            next: None,
            prev: None,
        }
    }

    #[inline]
    pub(crate) fn child(&self, dir: Direction) -> Option<NodeId> {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Direction, child: Option<NodeId>) {
        match dir {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }
}
