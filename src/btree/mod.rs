// Multiway Search Tree
// An order-M B-tree: every node holds at most `order - 1` keys, every non-root
// node at least `ceil(order / 2) - 1`, and all leaves sit at the same depth.
//
// The engine is split by concern:
// - `node`: fixed-capacity nodes and the arena that owns them
// - `search`: the shared descent used by search, insert and delete
// - `insert`: leaf insertion and split propagation
// - `delete`: predecessor swap, borrow and merge
// - `traverse`: traversal producers and height
// - `render`: snapshots and JSON rendering

mod delete;
mod insert;
mod node;
mod render;
mod search;
mod traverse;

pub use node::NodeId;
pub use render::NodeSnapshot;
pub use search::Location;

use crate::builders::TreeConfig;
use crate::error::Result;
use crate::observability::{log_operation, TreeOperation};
use crate::types::ValidatedOrder;
use crate::validation::{validate_tree, ValidationError};
use node::NodeArena;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

/// Structural change counters accumulated over the tree's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Nodes split because they overflowed
    pub splits: u64,
    /// Splits that reached the root and added a level
    pub root_splits: u64,
    /// Underflows repaired by borrowing from the left sibling
    pub borrows_left: u64,
    /// Underflows repaired by borrowing from the right sibling
    pub borrows_right: u64,
    /// Underflows repaired by merging two siblings
    pub merges: u64,
    /// Empty roots replaced by their only child
    pub root_collapses: u64,
}

/// Self-balancing multiway search tree holding unique, totally ordered elements.
#[derive(Debug, Clone)]
pub struct BTree<T> {
    pub(crate) config: TreeConfig,
    pub(crate) arena: NodeArena<T>,
    pub(crate) root: Option<NodeId>,
    pub(crate) count: usize,
    pub(crate) stats: TreeStats,
}

impl<T: Ord + Debug> BTree<T> {
    /// Create an empty tree of order 5 with natural sorting
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree of the given order
    pub fn with_order(order: usize) -> Result<Self> {
        Ok(Self::with_config(TreeConfig {
            order: ValidatedOrder::new(order)?,
            ..TreeConfig::default()
        }))
    }

    /// Create an empty tree from a validated configuration
    pub fn with_config(config: TreeConfig) -> Self {
        debug!(
            order = config.order.get(),
            sort_direction = ?config.sort_direction,
            even_order_bias = ?config.even_order_bias,
            "created multiway tree"
        );
        Self {
            arena: NodeArena::new(config.order.get()),
            config,
            root: None,
            count: 0,
            stats: TreeStats::default(),
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn order(&self) -> usize {
        self.config.order.get()
    }

    /// Number of stored elements
    pub fn size(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Number of nodes currently allocated
    pub fn node_count(&self) -> usize {
        self.arena.live_nodes()
    }

    /// Drop every element and node. Configuration and stats are kept.
    pub fn clear(&mut self) {
        let removed = self.count;
        self.arena.clear();
        self.root = None;
        self.count = 0;
        log_operation(&TreeOperation::Clear { removed }, &Ok(()));
    }

    /// Check every structural invariant of the tree
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_tree(self)
    }
}

impl<T: Ord + Debug> Default for BTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
