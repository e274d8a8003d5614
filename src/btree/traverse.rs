// Traversal Producers
// Each producer materialises every stored element exactly once. Recursion
// depth is bounded by the tree height.

use super::{BTree, NodeId};
use std::collections::VecDeque;
use std::fmt::Debug;

impl<T: Ord + Debug> BTree<T> {
    /// Root-to-leaf edge count; -1 for an empty tree
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut current = self.root;
        while let Some(id) = current {
            height += 1;
            current = self.arena[id].children[0];
        }
        height
    }
}

impl<T: Ord + Debug + Clone> BTree<T> {
    /// Each key before the subtree to its left, trailing child last
    pub fn pre_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count);
        if let Some(root) = self.root {
            self.pre_order_from(root, &mut out);
        }
        out
    }

    /// Elements in sort order
    pub fn in_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count);
        if let Some(root) = self.root {
            self.in_order_from(root, &mut out);
        }
        out
    }

    /// Children before the key that separates them from their left neighbour
    pub fn post_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count);
        if let Some(root) = self.root {
            self.post_order_from(root, &mut out);
        }
        out
    }

    /// Elements in reverse sort order
    pub fn reverse_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count);
        if let Some(root) = self.root {
            self.reverse_order_from(root, &mut out);
        }
        out
    }

    /// Breadth-first, left to right within each level
    pub fn level_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count);
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let node = &self.arena[id];
            out.extend(node.live_keys().cloned());
            queue.extend(node.live_children());
        }
        out
    }

    fn pre_order_from(&self, id: NodeId, out: &mut Vec<T>) {
        let node = &self.arena[id];
        for (index, key) in node.live_keys().enumerate() {
            out.push(key.clone());
            if let Some(child) = node.children[index] {
                self.pre_order_from(child, out);
            }
        }
        if let Some(child) = node.children[node.counter] {
            self.pre_order_from(child, out);
        }
    }

    fn in_order_from(&self, id: NodeId, out: &mut Vec<T>) {
        let node = &self.arena[id];
        for (index, key) in node.live_keys().enumerate() {
            if let Some(child) = node.children[index] {
                self.in_order_from(child, out);
            }
            out.push(key.clone());
        }
        if let Some(child) = node.children[node.counter] {
            self.in_order_from(child, out);
        }
    }

    fn post_order_from(&self, id: NodeId, out: &mut Vec<T>) {
        let node = &self.arena[id];
        if let Some(child) = node.children[0] {
            self.post_order_from(child, out);
        }
        for (index, key) in node.live_keys().enumerate() {
            if let Some(child) = node.children[index + 1] {
                self.post_order_from(child, out);
            }
            out.push(key.clone());
        }
    }

    fn reverse_order_from(&self, id: NodeId, out: &mut Vec<T>) {
        let node = &self.arena[id];
        for index in (0..node.counter).rev() {
            if let Some(child) = node.children[index + 1] {
                self.reverse_order_from(child, out);
            }
            out.extend(node.keys[index].iter().cloned());
        }
        if let Some(child) = node.children[0] {
            self.reverse_order_from(child, out);
        }
    }
}
