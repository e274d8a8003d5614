// Insertion / Split
// New keys always land in a leaf. A full node is split around the configured
// middle and the middle key is pushed into the parent, cascading towards the
// root; a split root grows the tree by one level.

use super::node::Node;
use super::search::Probe;
use super::{BTree, NodeId};
use crate::error::{Result, TreeError};
use crate::observability::{log_operation, TreeOperation};
use std::fmt::Debug;
use tracing::{debug, trace};

impl<T: Ord + Debug> BTree<T> {
    /// Insert `value`, rejecting duplicates
    pub fn add(&mut self, value: T) -> Result<&mut Self> {
        self.try_add(Some(value))
    }

    /// Insert a possibly absent value. `None` fails with `InvalidValue` and
    /// leaves the tree unchanged.
    pub fn try_add(&mut self, value: Option<T>) -> Result<&mut Self> {
        let outcome = self.insert(value);
        log_operation(&TreeOperation::Add { size: self.count }, &outcome);
        outcome.map(|()| self)
    }

    /// Insert every value in sequence. Stops at the first failure; values
    /// inserted before it stay in the tree.
    pub fn add_all<I>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.add(value)?;
        }
        Ok(self)
    }

    fn insert(&mut self, value: Option<T>) -> Result<()> {
        let value = value.ok_or_else(|| TreeError::InvalidValue {
            reason: "absent values cannot be stored".to_string(),
        })?;

        match self.probe(&value) {
            None => {
                let root = Node::from_parts(self.order(), vec![value], Vec::new(), None);
                self.root = Some(self.arena.alloc(root));
            }
            Some(Probe::Found(_)) => {
                return Err(TreeError::DuplicateKey {
                    key: format!("{value:?}"),
                });
            }
            Some(Probe::Vacant(at)) => self.insert_at(at.node, at.index, value, None),
        }

        self.count += 1;
        Ok(())
    }

    /// Insert `value` at `index` of `id`, with `right` as the child that follows
    /// it. Splits when the node is already full.
    fn insert_at(&mut self, id: NodeId, index: usize, value: T, right: Option<NodeId>) {
        if self.arena[id].is_full() {
            self.split(id, index, value, right);
            return;
        }

        self.arena[id].shift_insert(index, value, right);
        if let Some(right) = right {
            self.arena[right].parent = Some(id);
        }
    }

    fn split(&mut self, id: NodeId, index: usize, value: T, right: Option<NodeId>) {
        let order = self.order();
        let middle = self.config.split_middle();
        let parent = self.arena[id].parent;

        // The overflow sequence holds `order` keys (and `order + 1` children
        // for internal nodes).
        let (mut keys, mut children) = self.arena[id].drain();
        keys.insert(index, value);
        if let Some(right) = right {
            children.insert(index + 1, right);
            self.arena[right].parent = Some(id);
        }

        let sibling_keys = keys.split_off(middle + 1);
        let promoted = keys.remove(middle);
        let sibling_children = if children.is_empty() {
            Vec::new()
        } else {
            children.split_off(middle + 1)
        };

        self.arena[id].refill(keys, children);
        let sibling = self.arena.alloc(Node::from_parts(
            order,
            sibling_keys,
            sibling_children.clone(),
            parent,
        ));
        self.arena.adopt(sibling, sibling_children);
        self.stats.splits += 1;

        trace!(node = ?id, sibling = ?sibling, promoted = ?promoted, "split full node");

        match parent {
            Some(parent) => {
                let slot = self.arena.child_slot(parent, id);
                self.insert_at(parent, slot, promoted, Some(sibling));
            }
            None => {
                let root = self.arena.alloc(Node::from_parts(
                    order,
                    vec![promoted],
                    vec![id, sibling],
                    None,
                ));
                self.arena.adopt(root, [id, sibling]);
                self.root = Some(root);
                self.stats.root_splits += 1;
                debug!(height = self.height(), "root split, tree grew a level");
            }
        }
    }
}
