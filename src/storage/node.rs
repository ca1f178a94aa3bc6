use smallvec::SmallVec;

use crate::types::{check_slot, GraphError, NodeId, Result, Version};

use super::mvcc::VersionPtr;

/// Slot arrays up to this size stay inline in the node state.
pub(crate) const INLINE_SLOTS: usize = 4;

pub(crate) type ForwardSlots = SmallVec<[Option<NodeId>; INLINE_SLOTS]>;
pub(crate) type BackRefs = SmallVec<[NodeId; INLINE_SLOTS]>;

/// Full state of a node at one point in time.
///
/// The live head of every node and every historical snapshot share this
/// shape; a snapshot is a verbatim copy of the head taken right before a
/// mutation.
#[derive(Clone, Debug)]
pub(crate) struct NodeState<T> {
    pub(crate) value: T,
    /// Outgoing edges, one entry per slot. Length is the out capacity.
    pub(crate) forward: ForwardSlots,
    /// Incoming back-references in attach order. Length is `back_count`.
    pub(crate) backward: BackRefs,
}

impl<T> NodeState<T> {
    pub(crate) fn new(value: T, out_capacity: usize) -> Self {
        Self {
            value,
            forward: SmallVec::from_elem(None, out_capacity),
            backward: SmallVec::new(),
        }
    }

    pub(crate) fn out_capacity(&self) -> usize {
        self.forward.len()
    }

    pub(crate) fn back_count(&self) -> usize {
        self.backward.len()
    }

    /// Dereferences an outgoing slot.
    pub(crate) fn edge(&self, node: NodeId, slot: usize) -> Result<NodeId> {
        check_slot(slot, self.out_capacity())?;
        self.forward[slot].ok_or(GraphError::NullReference { node, slot })
    }
}

/// Arena entry for one logical node: its live head plus the pointer to the
/// newest superseded snapshot.
#[derive(Debug)]
pub(crate) struct NodeRecord<T> {
    pub(crate) head: NodeState<T>,
    pub(crate) history: VersionPtr,
    pub(crate) in_capacity: usize,
    /// First version at which the node exists.
    pub(crate) born: Version,
}

impl<T> NodeRecord<T> {
    pub(crate) fn new(head: NodeState<T>, in_capacity: usize, born: Version) -> Self {
        Self {
            head,
            history: VersionPtr::null(),
            in_capacity,
            born,
        }
    }

    pub(crate) fn out_capacity(&self) -> usize {
        self.head.out_capacity()
    }

    /// Fails unless the head can record one more back-reference.
    pub(crate) fn ensure_back_slot(&self, id: NodeId) -> Result<()> {
        if self.head.back_count() >= self.in_capacity {
            return Err(GraphError::CapacityExceeded {
                node: id,
                capacity: self.in_capacity,
            });
        }
        Ok(())
    }
}
