//! Index-addressed storage for chain nodes.
//!
//! Nodes live in a single vector; chains link them by [`NodeIdx`]. Released
//! slots are threaded onto a free list and reused by later allocations.

/// Position of a node within the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    #[inline]
    fn get(self) -> usize {
        self.0
    }
}

/// One stored pair plus the link to the next node of its bucket.
#[derive(Debug)]
pub(crate) struct Node<X, Y> {
    pub(crate) x: X,
    pub(crate) y: Y,
    pub(crate) next: Option<NodeIdx>,
}

#[derive(Debug)]
enum Slot<X, Y> {
    Occupied(Node<X, Y>),
    Vacant { next_free: Option<NodeIdx> },
}

#[derive(Debug)]
pub(crate) struct NodeArena<X, Y> {
    slots: Vec<Slot<X, Y>>,
    free_head: Option<NodeIdx>,
    live: usize,
}

impl<X, Y> NodeArena<X, Y> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            live: 0,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Total slots, occupied or free.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Stores a node, reusing a free slot when one exists.
    pub(crate) fn alloc(&mut self, x: X, y: Y, next: Option<NodeIdx>) -> NodeIdx {
        let node = Node { x, y, next };
        self.live += 1;
        match self.free_head {
            Some(idx) => {
                let slot = &mut self.slots[idx.get()];
                self.free_head = match slot {
                    Slot::Vacant { next_free } => *next_free,
                    Slot::Occupied(_) => unreachable!("free list points at live slot {idx:?}"),
                };
                *slot = Slot::Occupied(node);
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeIdx(self.slots.len() - 1)
            }
        }
    }

    /// Removes the node at `idx` and returns it; the slot joins the free list.
    pub(crate) fn release(&mut self, idx: NodeIdx) -> Node<X, Y> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(&mut self.slots[idx.get()], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(idx);
                self.live -= 1;
                node
            }
            Slot::Vacant { .. } => unreachable!("released vacant slot {idx:?}"),
        }
    }

    pub(crate) fn node(&self, idx: NodeIdx) -> &Node<X, Y> {
        match &self.slots[idx.get()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("chain link points at vacant slot {idx:?}"),
        }
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<X, Y> {
        match &mut self.slots[idx.get()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("chain link points at vacant slot {idx:?}"),
        }
    }

    /// Drops every node and forgets the free list.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }
}
