use tracing::{trace, warn};

use crate::types::Version;

use super::node::NodeState;

/// Pointer into the version log; zero means "null".
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct VersionPtr(u64);

impl VersionPtr {
    /// Returns a null pointer that references no historical version.
    pub const fn null() -> Self {
        Self(0)
    }

    /// Returns `true` when the pointer references no entry.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Creates a pointer from its raw integer representation.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the underlying raw integer.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Default for VersionPtr {
    fn default() -> Self {
        Self::null()
    }
}

/// Single global clock shared by every node of a graph.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct VersionClock {
    current: Version,
}

impl VersionClock {
    pub(crate) fn current(&self) -> Version {
        self.current
    }

    /// Advances the clock by one tick and returns the new version.
    pub(crate) fn advance(&mut self) -> Version {
        self.current += 1;
        self.current
    }
}

/// Superseded node state, immutable once appended to the log.
#[derive(Debug)]
pub(crate) struct VersionEntry<T> {
    /// Version at which `state` was current right before being replaced.
    pub(crate) superseded_at: Version,
    pub(crate) state: NodeState<T>,
    /// Next older snapshot of the same node.
    pub(crate) prev: VersionPtr,
}

/// Append-only store of historical snapshots.
///
/// Every entry is reachable from exactly one node chain: the pointer handed
/// out by [`VersionLog::push`] is stored either on the owning node's head or
/// on the next newer entry of the same chain.
#[derive(Debug)]
pub(crate) struct VersionLog<T> {
    entries: Vec<VersionEntry<T>>,
}

impl<T> VersionLog<T> {
    /// Creates an empty log, pre-allocating room for `capacity` entries when
    /// the allocator allows it. The hint is dropped if the reservation fails.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut entries = Vec::new();
        if let Err(err) = entries.try_reserve(capacity) {
            warn!(capacity, "ignoring version log capacity hint: {err}");
        }
        Self { entries }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn push(&mut self, entry: VersionEntry<T>) -> VersionPtr {
        self.entries.push(entry);
        VersionPtr::from_raw(self.entries.len() as u64)
    }

    pub(crate) fn get(&self, ptr: VersionPtr) -> Option<&VersionEntry<T>> {
        if ptr.is_null() {
            return None;
        }
        self.entries.get(ptr.raw() as usize - 1)
    }

    /// Iterates a chain from `head` toward its oldest snapshot.
    pub(crate) fn chain(&self, head: VersionPtr) -> Chain<'_, T> {
        Chain {
            log: self,
            next: head,
        }
    }

    /// Returns the state that was live at `version`.
    ///
    /// Walks from the newest snapshot backward, keeping the closest snapshot
    /// tagged above `version` as the candidate. An exact tag match wins
    /// immediately; the first tag below `version` ends the walk. When every
    /// snapshot is newer than `version` the oldest one is returned.
    pub(crate) fn resolve<'a>(
        &'a self,
        head: &'a NodeState<T>,
        history: VersionPtr,
        version: Version,
    ) -> &'a NodeState<T> {
        let mut best = head;
        let mut hops = 0usize;
        for entry in self.chain(history) {
            hops += 1;
            if entry.superseded_at == version {
                best = &entry.state;
                break;
            }
            if entry.superseded_at < version {
                break;
            }
            best = &entry.state;
        }
        trace!(version, hops, "resolved version chain");
        best
    }
}

/// Iterator over one node's snapshot chain, newest first.
pub(crate) struct Chain<'a, T> {
    log: &'a VersionLog<T>,
    next: VersionPtr,
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = &'a VersionEntry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.log.get(self.next)?;
        self.next = entry.prev;
        Some(entry)
    }
}
