// Search
// One descent serves search, insertion and deletion: it either finds the
// owning node of a key or the leaf slot where the key would be inserted.

use super::{BTree, NodeId};
use std::cmp::Ordering;
use std::fmt::Debug;

/// Where a key lives (or would live) inside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Node owning the key
    pub node: NodeId,
    /// Slot of the key inside `node`
    pub index: usize,
    /// Slot of `node` inside its parent; `None` for the root
    pub child_index: Option<usize>,
}

/// Outcome of a descent.
pub(crate) enum Probe {
    /// The key is stored at this location
    Found(Location),
    /// The key is absent; this is the leaf slot it belongs in
    Vacant(Location),
}

impl<T: Ord + Debug> BTree<T> {
    /// Compare a stored key against a probe value under the configured direction.
    pub(crate) fn compare(&self, key: &T, value: &T) -> Ordering {
        self.config.sort_direction.apply(key.cmp(value))
    }

    /// Descend from the root towards `value`. Returns `None` for an empty tree.
    pub(crate) fn probe(&self, value: &T) -> Option<Probe> {
        let mut current = self.root?;
        let mut child_index = None;

        loop {
            let node = &self.arena[current];
            let mut slot = node.counter;
            for (index, key) in node.live_keys().enumerate() {
                match self.compare(key, value) {
                    Ordering::Less => {}
                    Ordering::Equal => {
                        return Some(Probe::Found(Location {
                            node: current,
                            index,
                            child_index,
                        }));
                    }
                    Ordering::Greater => {
                        slot = index;
                        break;
                    }
                }
            }

            match node.children[slot] {
                Some(child) => {
                    child_index = Some(slot);
                    current = child;
                }
                None => {
                    return Some(Probe::Vacant(Location {
                        node: current,
                        index: slot,
                        child_index,
                    }));
                }
            }
        }
    }

    /// Find the node and slot holding `value`
    pub fn locate(&self, value: &T) -> Option<Location> {
        match self.probe(value)? {
            Probe::Found(location) => Some(location),
            Probe::Vacant(_) => None,
        }
    }

    /// Whether `value` is stored in the tree
    pub fn search(&self, value: &T) -> bool {
        self.locate(value).is_some()
    }
}
