//! A doubly linked list over a slab of reusable slots.
//!
//! Nodes are addressed by [`NodeId`] handles rather than references, so a
//! handle held by one structure stays usable while another structure mutates
//! the list. This is what lets the graph cross-link the two adjacency records
//! of an undirected edge without shared mutable references: each side stores
//! the other side's handle and resolves it through the owning list.

/// A handle to one node in a [`DList`].
///
/// Handles are **non-generational**: removing a node recycles its slot, and a
/// handle held across the removal of its node may later address a different
/// element. Holders must discard a handle once the node it named is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    /// Placeholder for a cross-link that has not been patched yet. Never
    /// visible outside a single mutation.
    pub(crate) const DANGLING: NodeId = NodeId(usize::MAX);
}

struct Node<T> {
    item: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

/// A doubly linked list with O(1) insertion at either end and O(1) removal
/// given a [`NodeId`].
///
/// # Examples
///
/// ```rust
/// use wugraph::DList;
///
/// let mut list = DList::new();
/// let a = list.push_back("a");
/// list.push_back("c");
/// let b = list.push_back("b");
/// list.remove(a);
///
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.get(b), Some(&"b"));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["c", "b"]);
/// ```
pub struct DList<T> {
    slots: Vec<Slot<T>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    free: Option<usize>,
    len: usize,
}

impl<T> Default for DList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        DList {
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node and releases the slot storage.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free = None;
        self.len = 0;
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        self.len += 1;
        match self.free {
            Some(index) => {
                self.free = match self.slots[index] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };
                self.slots[index] = Slot::Occupied(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Inserts an item at the front, returning its handle. O(1).
    pub fn push_front(&mut self, item: T) -> NodeId {
        let id = self.alloc(Node {
            item,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old) => {
                if let Some(node) = self.node_mut(old) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Inserts an item at the back, returning its handle. O(1).
    pub fn push_back(&mut self, item: T) -> NodeId {
        let id = self.alloc(Node {
            item,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old) => {
                if let Some(node) = self.node_mut(old) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Handle of the first node, or `None` if the list is empty.
    pub fn front(&self) -> Option<NodeId> {
        self.head
    }

    /// Handle of the last node, or `None` if the list is empty.
    pub fn back(&self) -> Option<NodeId> {
        self.tail
    }

    /// Handle of the node after `id`, or `None` at the back of the list or if
    /// `id` is not live.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.next)
    }

    /// Handle of the node before `id`, or `None` at the front of the list or
    /// if `id` is not live.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.prev)
    }

    /// Borrows the item stored at `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.item)
    }

    /// Mutably borrows the item stored at `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.item)
    }

    /// Unlinks the node at `id` and returns its item, or `None` if `id` is
    /// not live. O(1). Only the removed handle is invalidated.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !matches!(self.slots.get(id.0), Some(Slot::Occupied(_))) {
            return None;
        }
        let node = match std::mem::replace(
            &mut self.slots[id.0],
            Slot::Vacant {
                next_free: self.free,
            },
        ) {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("occupancy checked above"),
        };
        self.free = Some(id.0);
        self.len -= 1;

        match node.prev {
            Some(prev) => {
                if let Some(p) = self.node_mut(prev) {
                    p.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(n) = self.node_mut(next) {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }
        Some(node.item)
    }

    /// Iterates the items front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }
}

/// Front-to-back iterator over a [`DList`].
pub struct Iter<'a, T> {
    list: &'a DList<T>,
    cursor: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.cursor?;
        self.cursor = self.list.next(id);
        self.list.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_order() {
        let mut list = DList::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_remove_middle_relinks() {
        let mut list = DList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');
        assert_eq!(list.remove(b), Some('b'));
        assert_eq!(list.len(), 2);
        assert_eq!(list.next(a), Some(c));
        assert_eq!(list.prev(c), Some(a));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), ['a', 'c']);
    }

    #[test]
    fn test_remove_ends_updates_head_tail() {
        let mut list = DList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);
        list.remove(a);
        assert_eq!(list.front(), Some(b));
        list.remove(c);
        assert_eq!(list.back(), Some(b));
        list.remove(b);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_remove_dead_handle_is_none() {
        let mut list = DList::new();
        let a = list.push_back(1);
        assert_eq!(list.remove(a), Some(1));
        assert_eq!(list.remove(a), None);
        assert_eq!(list.get(a), None);
    }

    #[test]
    fn test_slot_reuse() {
        let mut list = DList::new();
        let a = list.push_back(1);
        list.push_back(2);
        list.remove(a);
        let c = list.push_back(3);
        // The freed slot is recycled, so the new handle aliases the old one.
        assert_eq!(a, c);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut list = DList::new();
        list.push_back(1);
        list.push_back(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        let a = list.push_back(9);
        assert_eq!(list.get(a), Some(&9));
    }

    #[test]
    fn test_traversal_from_handle() {
        let mut list = DList::new();
        for i in 0..5 {
            list.push_back(i);
        }
        let mut seen = Vec::new();
        let mut cursor = list.front();
        while let Some(id) = cursor {
            seen.push(*list.get(id).unwrap());
            cursor = list.next(id);
        }
        assert_eq!(seen, [0, 1, 2, 3, 4]);
    }
}
