// Validation Layer
// Runtime verification of the structural invariants every operation must
// preserve. Used by tests and available to callers as `BTree::validate`.

use crate::btree::{BTree, NodeId};
use std::cmp::Ordering;
use std::fmt::Debug;
use tracing::error;

/// Structural invariant violations with the context needed to locate them
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Key count out of range at depth {depth}: {count} not in {min}..={max}")]
    KeyCountOutOfRange {
        depth: usize,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("Keys out of order at depth {depth}: {previous} is not before {next}")]
    Unsorted {
        depth: usize,
        previous: String,
        next: String,
    },

    #[error("Leaves at different depths: expected {expected}, found {found}")]
    UnevenLeafDepth { expected: usize, found: usize },

    #[error("Broken parent link at depth {depth}")]
    BrokenParentLink { depth: usize },

    #[error("Node with {keys} keys has {children} children")]
    ChildCountMismatch { keys: usize, children: usize },

    #[error("Element count mismatch: tree reports {expected}, found {found}")]
    CountMismatch { expected: usize, found: usize },
}

struct Walk<'a, T> {
    tree: &'a BTree<T>,
    leaf_depth: Option<usize>,
    seen: usize,
    previous: Option<&'a T>,
}

/// Check key counts, ordering, parent links, uniform leaf depth and the
/// element count of the whole tree.
pub fn validate_tree<T: Ord + Debug>(tree: &BTree<T>) -> Result<(), ValidationError> {
    let mut walk = Walk {
        tree,
        leaf_depth: None,
        seen: 0,
        previous: None,
    };

    let result = match tree.root {
        Some(root) => walk.node(root, None, 0),
        None => Ok(()),
    }
    .and_then(|()| {
        if walk.seen == tree.count {
            Ok(())
        } else {
            Err(ValidationError::CountMismatch {
                expected: tree.count,
                found: walk.seen,
            })
        }
    });

    if let Err(e) = &result {
        error!(error = %e, "tree invariant violated");
    }
    result
}

impl<'a, T: Ord + Debug> Walk<'a, T> {
    fn node(
        &mut self,
        id: NodeId,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Result<(), ValidationError> {
        let tree = self.tree;
        let node = &tree.arena[id];
        let config = tree.config();

        if node.parent != parent {
            return Err(ValidationError::BrokenParentLink { depth });
        }

        let min = if parent.is_none() { 1 } else { config.min_keys() };
        let max = config.max_keys();
        if node.counter < min || node.counter > max {
            return Err(ValidationError::KeyCountOutOfRange {
                depth,
                count: node.counter,
                min,
                max,
            });
        }

        let keys = node.live_keys().count();
        let children: Vec<NodeId> = node.live_children().collect();
        if keys != node.counter || (!children.is_empty() && children.len() != keys + 1) {
            return Err(ValidationError::ChildCountMismatch {
                keys,
                children: children.len(),
            });
        }

        if children.is_empty() {
            match self.leaf_depth {
                None => self.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(ValidationError::UnevenLeafDepth {
                        expected,
                        found: depth,
                    });
                }
                Some(_) => {}
            }
            for key in node.live_keys() {
                self.visit(key, depth)?;
            }
            return Ok(());
        }

        for (index, key) in node.live_keys().enumerate() {
            self.node(children[index], Some(id), depth + 1)?;
            self.visit(key, depth)?;
        }
        self.node(children[keys], Some(id), depth + 1)
    }

    /// Keys must arrive strictly increasing under the configured direction.
    fn visit(&mut self, key: &'a T, depth: usize) -> Result<(), ValidationError> {
        if let Some(previous) = self.previous {
            if self.tree.compare(previous, key) != Ordering::Less {
                return Err(ValidationError::Unsorted {
                    depth,
                    previous: format!("{previous:?}"),
                    next: format!("{key:?}"),
                });
            }
        }
        self.previous = Some(key);
        self.seen += 1;
        Ok(())
    }
}
