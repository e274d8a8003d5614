// Deletion / Rebalance
// Internal keys are replaced by their in-order predecessor so that the physical
// delete always happens in a leaf. Underflow is repaired bottom-up: borrow
// through the parent when a sibling can spare a key, otherwise merge with a
// sibling and continue at the parent. An emptied root hands over to its only
// child.

use super::search::{Location, Probe};
use super::{BTree, NodeId};
use crate::observability::{log_operation, TreeOperation};
use std::fmt::Debug;
use tracing::{debug, trace};

impl<T: Ord + Debug> BTree<T> {
    /// Remove `value` and return the stored element, or `None` if absent
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let removed = match self.probe(value) {
            Some(Probe::Found(at)) => self.remove_at(at),
            _ => None,
        };
        log_operation(
            &TreeOperation::Remove {
                size: self.count,
                found: removed.is_some(),
            },
            &Ok(()),
        );
        removed
    }

    /// Remove every value in sequence, reporting each outcome
    pub fn remove_all<'a, I>(&mut self, values: I) -> Vec<Option<T>>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().map(|value| self.remove(value)).collect()
    }

    fn remove_at(&mut self, at: Location) -> Option<T> {
        let removed = if self.arena[at.node].is_leaf() {
            let removed = self.arena[at.node].shift_delete(at.index);
            self.rebalance(at.node);
            removed
        } else {
            let leaf = self.predecessor_leaf(at.node, at.index);
            let last = self.arena[leaf].counter - 1;
            let donor = self.arena[leaf].shift_delete(last);
            let removed = std::mem::replace(&mut self.arena[at.node].keys[at.index], donor);
            self.rebalance(leaf);
            removed
        };

        self.count -= 1;
        removed
    }

    /// Leaf holding the in-order predecessor of key `index` in `id`: the
    /// rightmost leaf of the subtree left of that key.
    fn predecessor_leaf(&self, id: NodeId, index: usize) -> NodeId {
        let mut current = id;
        let mut slot = index;
        while let Some(child) = self.arena[current].children[slot] {
            current = child;
            slot = self.arena[current].counter;
        }
        current
    }

    fn rebalance(&mut self, mut current: NodeId) {
        let min_keys = self.config.min_keys();

        while let Some(parent) = self.arena[current].parent {
            if self.arena[current].counter >= min_keys {
                break;
            }

            let slot = self.arena.child_slot(parent, current);
            let left = slot
                .checked_sub(1)
                .and_then(|left| self.arena[parent].children[left]);
            let right = if slot < self.arena[parent].counter {
                self.arena[parent].children[slot + 1]
            } else {
                None
            };

            if let Some(left) = left.filter(|left| self.arena[*left].counter > min_keys) {
                self.borrow_from_left(current, left, parent, slot);
                break;
            }
            if let Some(right) = right.filter(|right| self.arena[*right].counter > min_keys) {
                self.borrow_from_right(current, right, parent, slot);
                break;
            }

            match (left, right) {
                (_, Some(right)) => self.merge(current, right, parent, slot),
                (Some(left), None) => self.merge(left, current, parent, slot - 1),
                (None, None) => break,
            }
            current = parent;
        }

        self.collapse_root();
    }

    /// Rotate the left sibling's last key up into the parent and the parent's
    /// separator down into the front of `node`.
    fn borrow_from_left(&mut self, node: NodeId, left: NodeId, parent: NodeId, slot: usize) {
        let (key, child) = self.arena[left].pop_back();
        let separator = std::mem::replace(&mut self.arena[parent].keys[slot - 1], key);
        self.arena[node].push_front(separator, child);
        self.arena.adopt(node, child);
        self.stats.borrows_left += 1;
        trace!(node = ?node, sibling = ?left, "borrowed from left sibling");
    }

    /// Rotate the right sibling's first key up into the parent and the parent's
    /// separator down onto the end of `node`.
    fn borrow_from_right(&mut self, node: NodeId, right: NodeId, parent: NodeId, slot: usize) {
        let (key, child) = self.arena[right].pop_front();
        let separator = std::mem::replace(&mut self.arena[parent].keys[slot], key);
        self.arena[node].push_back(separator, child);
        self.arena.adopt(node, child);
        self.stats.borrows_right += 1;
        trace!(node = ?node, sibling = ?right, "borrowed from right sibling");
    }

    /// Fold `right` and the separator at `separator` into `left`, then release
    /// `right`.
    fn merge(&mut self, left: NodeId, right: NodeId, parent: NodeId, separator: usize) {
        let (key, absorbed) = self.arena[parent].shift_delete_with_right(separator);
        debug_assert_eq!(absorbed, Some(right));

        let (keys, children) = self.arena.release(right).drain();
        let survivor = &mut self.arena[left];
        survivor.push_back(key, None);
        let base = survivor.counter;
        for (offset, child) in children.iter().enumerate() {
            survivor.children[base + offset] = Some(*child);
        }
        for key in keys {
            survivor.push_back(Some(key), None);
        }
        self.arena.adopt(left, children);
        self.stats.merges += 1;

        debug!(survivor = ?left, released = ?right, "merged siblings");
    }

    /// Replace an empty root by its only child (or nothing).
    fn collapse_root(&mut self) {
        let Some(root) = self.root else {
            return;
        };
        if self.arena[root].counter > 0 {
            return;
        }

        let child = self.arena[root].children[0];
        self.arena.release(root);
        self.root = child;
        if let Some(child) = child {
            self.arena[child].parent = None;
            self.stats.root_collapses += 1;
            debug!(height = self.height(), "root collapsed, tree lost a level");
        }
    }
}
