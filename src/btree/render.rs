// Rendering
// Owned or borrowed snapshots of the node structure, and a JSON document
// describing the whole tree (configuration, size and nested node data).

use super::{BTree, NodeId, TreeStats};
use serde::Serialize;
use std::fmt;
use std::fmt::Debug;

/// Nested copy of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot<T> {
    #[serde(rename = "values")]
    pub keys: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot<T>>,
}

impl<T> NodeSnapshot<T> {
    pub fn leaf(keys: Vec<T>) -> Self {
        Self {
            keys,
            children: Vec::new(),
        }
    }

    pub fn internal(keys: Vec<T>, children: Vec<NodeSnapshot<T>>) -> Self {
        Self { keys, children }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Serialize)]
struct TreeDocument<'a, T> {
    order: usize,
    total_values: usize,
    sorting_order: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bias: Option<&'static str>,
    stats: TreeStats,
    data: Option<NodeSnapshot<&'a T>>,
}

impl<T: Ord + Debug> BTree<T> {
    fn snapshot_from<'a, U>(&'a self, id: NodeId, map: &impl Fn(&'a T) -> U) -> NodeSnapshot<U> {
        let node = &self.arena[id];
        NodeSnapshot {
            keys: node.live_keys().map(map).collect(),
            children: node
                .live_children()
                .map(|child| self.snapshot_from(child, map))
                .collect(),
        }
    }

    fn document(&self) -> TreeDocument<'_, T> {
        TreeDocument {
            order: self.order(),
            total_values: self.count,
            sorting_order: self.config.sort_direction.describe(),
            bias: self
                .config
                .is_biased()
                .then(|| self.config.even_order_bias.describe()),
            stats: self.stats,
            data: self.root.map(|root| self.snapshot_from(root, &|key| key)),
        }
    }

    /// Owned copy of the node structure; `None` for an empty tree
    pub fn snapshot(&self) -> Option<NodeSnapshot<T>>
    where
        T: Clone,
    {
        self.root
            .map(|root| self.snapshot_from(root, &|key: &T| key.clone()))
    }

    /// Describe the tree as a JSON value. The `bias` key is present only for
    /// even orders, where it affects splits.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value>
    where
        T: Serialize,
    {
        serde_json::to_value(self.document())
    }
}

impl<T: Ord + Debug + Serialize> fmt::Display for BTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<empty tree>");
        }
        let json = serde_json::to_string(&self.document()).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
