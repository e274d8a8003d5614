// Node Storage
// Nodes live in an arena owned by the tree. Children are arena handles held by
// their parent; the parent link on a child is a plain handle used for
// navigation only, so releasing a node never depends on back references.

use crate::pure::slots::{shift_left_delete, shift_right_insert};
use std::ops::{Index, IndexMut};

/// Opaque handle to a node inside a tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Fixed-capacity node: `order - 1` key slots and `order` child slots, with the
/// live key count tracked in `counter`.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) keys: Box<[Option<T>]>,
    pub(crate) children: Box<[Option<NodeId>]>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) counter: usize,
}

impl<T> Node<T> {
    /// Create an empty node sized for `order`
    pub(crate) fn new(order: usize, parent: Option<NodeId>) -> Self {
        Self {
            keys: std::iter::repeat_with(|| None).take(order - 1).collect(),
            children: vec![None; order].into_boxed_slice(),
            parent,
            counter: 0,
        }
    }

    /// Create a node from already ordered keys and (possibly empty) children
    pub(crate) fn from_parts(
        order: usize,
        keys: Vec<T>,
        children: Vec<NodeId>,
        parent: Option<NodeId>,
    ) -> Self {
        debug_assert!(keys.len() < order);
        debug_assert!(children.is_empty() || children.len() == keys.len() + 1);

        let mut node = Self::new(order, parent);
        node.counter = keys.len();
        for (slot, key) in node.keys.iter_mut().zip(keys) {
            *slot = Some(key);
        }
        for (slot, child) in node.children.iter_mut().zip(children) {
            *slot = Some(child);
        }
        node
    }

    /// A node is a leaf iff its first child slot is vacant
    pub(crate) fn is_leaf(&self) -> bool {
        self.children[0].is_none()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.counter == self.keys.len()
    }

    /// Live keys in slot order
    pub(crate) fn live_keys(&self) -> impl Iterator<Item = &T> {
        self.keys[..self.counter].iter().flatten()
    }

    /// Live children in slot order (empty for a leaf)
    pub(crate) fn live_children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().map_while(|child| *child)
    }

    /// Insert `value` at `index`; when `right` is given it becomes the child
    /// immediately after the new key.
    pub(crate) fn shift_insert(&mut self, index: usize, value: T, right: Option<NodeId>) {
        let len = self.counter;
        shift_right_insert(&mut self.keys, index, len, Some(value));
        if right.is_some() {
            shift_right_insert(&mut self.children, index + 1, len + 1, right);
        }
        self.counter += 1;
    }

    /// Remove the key at `index`, compacting the keys after it.
    pub(crate) fn shift_delete(&mut self, index: usize) -> Option<T> {
        let removed = shift_left_delete(&mut self.keys, index, self.counter);
        self.counter -= 1;
        removed
    }

    /// Remove the key at `index` together with the child to its right.
    pub(crate) fn shift_delete_with_right(&mut self, index: usize) -> (Option<T>, Option<NodeId>) {
        let child = shift_left_delete(&mut self.children, index + 1, self.counter + 1);
        let key = self.shift_delete(index);
        (key, child)
    }

    /// Prepend a key and, for internal nodes, a leading child.
    pub(crate) fn push_front(&mut self, key: Option<T>, child: Option<NodeId>) {
        let len = self.counter;
        shift_right_insert(&mut self.keys, 0, len, key);
        if child.is_some() {
            shift_right_insert(&mut self.children, 0, len + 1, child);
        }
        self.counter += 1;
    }

    /// Append a key and, for internal nodes, a trailing child.
    pub(crate) fn push_back(&mut self, key: Option<T>, child: Option<NodeId>) {
        self.keys[self.counter] = key;
        if child.is_some() {
            self.children[self.counter + 1] = child;
        }
        self.counter += 1;
    }

    /// Detach the first key and the first child.
    pub(crate) fn pop_front(&mut self) -> (Option<T>, Option<NodeId>) {
        let child = shift_left_delete(&mut self.children, 0, self.counter + 1);
        let key = self.shift_delete(0);
        (key, child)
    }

    /// Detach the last key and the last child.
    pub(crate) fn pop_back(&mut self) -> (Option<T>, Option<NodeId>) {
        let child = self.children[self.counter].take();
        let key = self.keys[self.counter - 1].take();
        self.counter -= 1;
        (key, child)
    }

    /// Take every live key and child out of the node, leaving it empty.
    pub(crate) fn drain(&mut self) -> (Vec<T>, Vec<NodeId>) {
        let keys = self.keys[..self.counter]
            .iter_mut()
            .filter_map(Option::take)
            .collect();
        let children = self.children.iter_mut().filter_map(Option::take).collect();
        self.counter = 0;
        (keys, children)
    }

    /// Refill an empty node with ordered keys and children.
    pub(crate) fn refill(&mut self, keys: Vec<T>, children: Vec<NodeId>) {
        debug_assert_eq!(self.counter, 0);
        self.counter = keys.len();
        for (slot, key) in self.keys.iter_mut().zip(keys) {
            *slot = Some(key);
        }
        for (slot, child) in self.children.iter_mut().zip(children) {
            *slot = Some(child);
        }
    }
}

/// Slab of nodes with a free list. Released slots are reset and reused.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<T> {
    order: usize,
    slots: Vec<Node<T>>,
    free: Vec<NodeId>,
}

impl<T> NodeArena<T> {
    pub(crate) fn new(order: usize) -> Self {
        Self {
            order,
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store a node and return its handle
    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = node;
                id
            }
            None => {
                self.slots.push(node);
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Detach a node from the arena and hand back its contents
    pub(crate) fn release(&mut self, id: NodeId) -> Node<T> {
        let node = std::mem::replace(&mut self.slots[id.0], Node::new(self.order, None));
        self.free.push(id);
        node
    }

    /// Number of nodes currently in use
    pub(crate) fn live_nodes(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Position of `child` among `parent`'s child slots.
    pub(crate) fn child_slot(&self, parent: NodeId, child: NodeId) -> usize {
        self[parent]
            .children
            .iter()
            .position(|slot| *slot == Some(child))
            .expect("child is always linked from its parent")
    }

    /// Point the parent link of each given child at `parent`.
    pub(crate) fn adopt(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) {
        for child in children {
            self[child].parent = Some(parent);
        }
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        &self.slots[id.0]
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.slots[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(keys: &[u32]) -> Node<u32> {
        Node::from_parts(5, keys.to_vec(), Vec::new(), None)
    }

    fn keys_of(node: &Node<u32>) -> Vec<u32> {
        node.live_keys().copied().collect()
    }

    #[test]
    fn test_node_creation() {
        let node: Node<u32> = Node::new(5, None);
        assert_eq!(node.keys.len(), 4);
        assert_eq!(node.children.len(), 5);
        assert_eq!(node.counter, 0);
        assert!(node.is_leaf());
        assert!(!node.is_full());
    }

    #[test]
    fn test_shift_insert_and_delete() {
        let mut node = leaf(&[10, 30]);
        node.shift_insert(1, 20, None);
        node.shift_insert(3, 40, None);
        assert_eq!(keys_of(&node), vec![10, 20, 30, 40]);
        assert!(node.is_full());

        assert_eq!(node.shift_delete(0), Some(10));
        assert_eq!(keys_of(&node), vec![20, 30, 40]);
        assert_eq!(node.counter, 3);
    }

    #[test]
    fn test_shift_insert_with_right_child() {
        let children = vec![NodeId(0), NodeId(1), NodeId(2)];
        let mut node = Node::from_parts(5, vec![10, 30], children, None);
        node.shift_insert(1, 20, Some(NodeId(9)));
        assert_eq!(keys_of(&node), vec![10, 20, 30]);
        let children: Vec<_> = node.live_children().collect();
        assert_eq!(children, vec![NodeId(0), NodeId(1), NodeId(9), NodeId(2)]);

        let (key, child) = node.shift_delete_with_right(1);
        assert_eq!((key, child), (Some(20), Some(NodeId(9))));
        let children: Vec<_> = node.live_children().collect();
        assert_eq!(children, vec![NodeId(0), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn test_front_and_back_moves() {
        let children = vec![NodeId(0), NodeId(1), NodeId(2)];
        let mut node = Node::from_parts(5, vec![2, 3], children, None);
        node.push_front(Some(1), Some(NodeId(7)));
        node.push_back(Some(4), Some(NodeId(8)));
        assert_eq!(keys_of(&node), vec![1, 2, 3, 4]);
        assert_eq!(node.children[0], Some(NodeId(7)));
        assert_eq!(node.children[4], Some(NodeId(8)));

        assert_eq!(node.pop_front(), (Some(1), Some(NodeId(7))));
        assert_eq!(node.pop_back(), (Some(4), Some(NodeId(8))));
        assert_eq!(keys_of(&node), vec![2, 3]);
        assert_eq!(node.live_children().count(), 3);
    }

    #[test]
    fn test_drain_and_refill() {
        let mut node = leaf(&[1, 2, 3]);
        let (keys, children) = node.drain();
        assert_eq!(keys, vec![1, 2, 3]);
        assert!(children.is_empty());
        assert_eq!(node.counter, 0);

        node.refill(vec![5], Vec::new());
        assert_eq!(keys_of(&node), vec![5]);
    }

    #[test]
    fn test_arena_reuses_released_slots() {
        let mut arena = NodeArena::new(5);
        let a = arena.alloc(leaf(&[1]));
        let b = arena.alloc(leaf(&[2]));
        assert_eq!(arena.live_nodes(), 2);

        let released = arena.release(a);
        assert_eq!(keys_of(&released), vec![1]);
        assert_eq!(arena.live_nodes(), 1);

        let c = arena.alloc(leaf(&[3]));
        assert_eq!(c, a);
        assert_eq!(keys_of(&arena[c]), vec![3]);
        assert_eq!(keys_of(&arena[b]), vec![2]);
    }

    #[test]
    fn test_child_slot_and_adopt() {
        let mut arena = NodeArena::new(5);
        let left = arena.alloc(leaf(&[1]));
        let right = arena.alloc(leaf(&[3]));
        let root = arena.alloc(Node::from_parts(5, vec![2], vec![left, right], None));
        arena.adopt(root, [left, right]);

        assert_eq!(arena.child_slot(root, left), 0);
        assert_eq!(arena.child_slot(root, right), 1);
        assert_eq!(arena[right].parent, Some(root));
    }
}
