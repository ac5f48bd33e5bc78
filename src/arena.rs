use std::ops::{Index, IndexMut};

/// Handle to a node stored in a tree's arena.
///
/// Handles stay valid until the node they name is deleted. A vacated slot is
/// reused by a later insertion, after which an old handle names the new
/// occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Slot storage for tree nodes, with a free list of vacated slots.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<N> {
    slots: Vec<Option<N>>,
    free: Vec<u32>,
}

impl<N> NodeArena<N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: N) -> NodeId {
        if let Some(idx) = self.free.pop() {
            debug_assert!(self.slots[idx as usize].is_none());
            self.slots[idx as usize] = Some(node);
            return NodeId(idx);
        }
        let idx = u32::try_from(self.slots.len()).expect("node arena exceeds u32 slots");
        self.slots.push(Some(node));
        NodeId(idx)
    }

    /// Vacates the slot and returns the node it held.
    pub(crate) fn release(&mut self, id: NodeId) -> N {
        let node = self.slots[id.index()]
            .take()
            .expect("released a vacant arena slot");
        self.free.push(id.0);
        node
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&N> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Number of occupied slots.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeId, &N)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeId(i as u32), n)))
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<NodeId> for NodeArena<N> {
    type Output = N;

    #[inline]
    fn index(&self, id: NodeId) -> &N {
        match &self.slots[id.index()] {
            Some(node) => node,
            None => panic!("dangling node id {id:?}"),
        }
    }
}

impl<N> IndexMut<NodeId> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        match &mut self.slots[id.index()] {
            Some(node) => node,
            None => panic!("dangling node id {id:?}"),
        }
    }
}
