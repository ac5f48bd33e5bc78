//! Console rendering of tree shape.
//!
//! ```text
//!         (2)
//!      __/   \__
//!   (1)         (3)
//!  /   \       /   \
//! ┴     ┴     ┴     ┴
//! ```
//!
//! Each node is drawn as `(key)` with its subtrees hanging below the `/` and
//! `\` connectors; absent children are drawn as `┴`.

use crate::arena::NodeId;
use crate::bst::BsTree;
use crate::tree::AvlTree;

const ABSENT: &str = "┴";

/// Read-only view of a binary tree's shape.
pub trait TreeShape {
    fn shape_root(&self) -> Option<NodeId>;
    fn shape_left(&self, id: NodeId) -> Option<NodeId>;
    fn shape_right(&self, id: NodeId) -> Option<NodeId>;
    fn shape_key(&self, id: NodeId) -> i32;
}

impl TreeShape for AvlTree {
    fn shape_root(&self) -> Option<NodeId> {
        self.root()
    }

    fn shape_left(&self, id: NodeId) -> Option<NodeId> {
        self.left(id)
    }

    fn shape_right(&self, id: NodeId) -> Option<NodeId> {
        self.right(id)
    }

    fn shape_key(&self, id: NodeId) -> i32 {
        self.key(id).unwrap_or_default()
    }
}

impl TreeShape for BsTree {
    fn shape_root(&self) -> Option<NodeId> {
        self.root()
    }

    fn shape_left(&self, id: NodeId) -> Option<NodeId> {
        self.left(id)
    }

    fn shape_right(&self, id: NodeId) -> Option<NodeId> {
        self.right(id)
    }

    fn shape_key(&self, id: NodeId) -> i32 {
        self.key(id).unwrap_or_default()
    }
}

/// Renders `tree` as text rows of equal width.
pub fn render<T: TreeShape + ?Sized>(tree: &T) -> Vec<String> {
    match tree.shape_root() {
        Some(root) => render_subtree(tree, root),
        None => vec![ABSENT.to_owned()],
    }
}

/// [`render`] joined with newlines.
pub fn to_string<T: TreeShape + ?Sized>(tree: &T) -> String {
    render(tree).join("\n")
}

fn render_subtree<T: TreeShape + ?Sized>(tree: &T, id: NodeId) -> Vec<String> {
    let left = match tree.shape_left(id) {
        Some(l) => render_subtree(tree, l),
        None => vec![ABSENT.to_owned()],
    };
    let right = match tree.shape_right(id) {
        Some(r) => render_subtree(tree, r),
        None => vec![ABSENT.to_owned()],
    };
    join(&left, &format!("({})", tree.shape_key(id)), &right)
}

fn width(row: &str) -> usize {
    row.chars().count()
}

fn join(left: &[String], root: &str, right: &[String]) -> Vec<String> {
    let lwid = left.last().map_or(0, |row| width(row));
    let rwid = right.last().map_or(0, |row| width(row));
    let rootwid = width(root);

    // End of the left subtree's top label and start of the right one's.
    let ls = left[0].trim_end_matches(' ').chars().count();
    let rs = width(&right[0]) - right[0].trim_start_matches(' ').chars().count();

    let mut rows = Vec::with_capacity(2 + left.len().max(right.len()));
    rows.push(format!(
        "{}{root}{}",
        " ".repeat(lwid + 1),
        " ".repeat(rwid + 1)
    ));
    rows.push(format!(
        "{}{}/{}\\{}{}",
        " ".repeat(ls),
        "_".repeat(lwid - ls),
        " ".repeat(rootwid),
        "_".repeat(rs),
        " ".repeat(rwid - rs)
    ));
    for i in 0..left.len().max(right.len()) {
        let l = left.get(i).cloned().unwrap_or_else(|| " ".repeat(lwid));
        let r = right.get(i).cloned().unwrap_or_else(|| " ".repeat(rwid));
        rows.push(format!("{l}{}{r}", " ".repeat(rootwid + 2)));
    }
    rows
}
