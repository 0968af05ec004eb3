use alloc::vec::Vec;
use core::cmp::Ordering;

use super::Frontier;
use crate::comparators::Comparator;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone)]
struct Node<S, K> {
    entry: (S, K),
    prev: usize,
    next: usize,
}

/// Position in the list together with the arena index of the node at that position
#[derive(Debug, Clone, Copy)]
struct Finger {
    pos: usize,
    node: usize,
}

/// Doubly linked list of `(cursor, key)` entries sorted by key, smallest key at the head.
///
/// Nodes live in a dense arena and link to each other by index. Insertion binary-searches the
/// list by position; every probe walks from the previously probed node, so one insertion walks
/// at most the length of the list. A new entry is linked before a probed node with an equal
/// key, which makes the most recently inserted equal key come out first whenever the search
/// lands on it. Extraction unlinks the head in O(1).
#[derive(Debug, Clone)]
pub struct LinkedFrontier<S, K, C> {
    nodes: Vec<Node<S, K>>,
    head: usize,
    tail: usize,
    comparator: C,
}

impl<S, K, C> LinkedFrontier<S, K, C> {
    /// Creates an empty list with arena room for `capacity` entries
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            comparator,
        }
    }

    /// Walks `finger` along the links until it reaches list position `pos`.
    fn hop(&self, finger: &mut Finger, pos: usize) {
        while finger.pos < pos {
            finger.node = self.nodes[finger.node].next;
            finger.pos += 1;
        }
        while finger.pos > pos {
            finger.node = self.nodes[finger.node].prev;
            finger.pos -= 1;
        }
    }

    fn link_before(&mut self, at: usize, entry: (S, K)) {
        let idx = self.nodes.len();
        let prev = self.nodes[at].prev;
        self.nodes.push(Node {
            entry,
            prev,
            next: at,
        });
        if prev == NIL {
            self.head = idx;
        } else {
            self.nodes[prev].next = idx;
        }
        self.nodes[at].prev = idx;
    }

    fn push_back(&mut self, entry: (S, K)) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            entry,
            prev: self.tail,
            next: NIL,
        });
        if self.tail == NIL {
            self.head = idx;
        } else {
            self.nodes[self.tail].next = idx;
        }
        self.tail = idx;
    }

    /// Moving the last arena node into the hole left at `idx` changes its index,
    /// point its neighbours at the new one.
    fn relink(&mut self, idx: usize) {
        let Node { prev, next, .. } = self.nodes[idx];
        if prev == NIL {
            self.head = idx;
        } else {
            self.nodes[prev].next = idx;
        }
        if next == NIL {
            self.tail = idx;
        } else {
            self.nodes[next].prev = idx;
        }
    }
}

impl<S, K, C> Frontier<S, K> for LinkedFrontier<S, K, C>
where
    C: Comparator<K>,
{
    fn insert(&mut self, cursor: S, key: K) {
        let len = self.nodes.len();
        let mut finger = Finger {
            pos: 0,
            node: self.head,
        };
        let (mut lo, mut hi) = (0, len);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            self.hop(&mut finger, mid);
            match self
                .comparator
                .compare(&key, &self.nodes[finger.node].entry.1)
            {
                Ordering::Less => hi = mid,
                Ordering::Greater => lo = mid + 1,
                Ordering::Equal => {
                    self.link_before(finger.node, (cursor, key));
                    return;
                }
            }
        }
        if lo == len {
            self.push_back((cursor, key));
        } else {
            self.hop(&mut finger, lo);
            self.link_before(finger.node, (cursor, key));
        }
    }

    fn extract_min(&mut self) -> Option<(S, K)> {
        let head = self.head;
        if head == NIL {
            return None;
        }
        let next = self.nodes[head].next;
        self.head = next;
        if next == NIL {
            self.tail = NIL;
        } else {
            self.nodes[next].prev = NIL;
        }
        let node = self.nodes.swap_remove(head);
        if head < self.nodes.len() {
            self.relink(head);
        }
        Some(node.entry)
    }

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{comparators::ByOrd, frontier::tests::drain};

    fn keys<S, K: Clone, C>(list: &LinkedFrontier<S, K, C>) -> Vec<K> {
        let mut res = Vec::new();
        let mut node = list.head;
        while node != NIL {
            res.push(list.nodes[node].entry.1.clone());
            node = list.nodes[node].next;
        }
        res
    }

    #[test]
    fn links_stay_consistent() {
        let mut list = LinkedFrontier::with_capacity(ByOrd, 0);
        for (cursor, key) in [(0, 50), (1, 10), (2, 40), (3, 20), (4, 30), (5, 60)] {
            list.insert(cursor, key);
        }
        assert_eq!(keys(&list), [10, 20, 30, 40, 50, 60]);
        assert_eq!(list.extract_min(), Some((1, 10)));
        list.insert(1, 35);
        assert_eq!(keys(&list), [20, 30, 35, 40, 50, 60]);
        assert_eq!(list.extract_min(), Some((3, 20)));
        assert_eq!(list.extract_min(), Some((4, 30)));
        list.insert(3, 70);
        list.insert(4, 5);
        assert_eq!(keys(&list), [5, 35, 40, 50, 60, 70]);

        // walking backwards from the tail sees the same order
        let mut back = Vec::new();
        let mut node = list.tail;
        while node != NIL {
            back.push(list.nodes[node].entry.1);
            node = list.nodes[node].prev;
        }
        back.reverse();
        assert_eq!(back, keys(&list));

        let cursors: Vec<_> = drain(&mut list).into_iter().map(|(c, _)| c).collect();
        assert_eq!(cursors, [4, 1, 2, 0, 5, 3]);
        assert_eq!(list.head, NIL);
        assert_eq!(list.tail, NIL);
    }

    #[test]
    fn equal_keys_linked_before_probe() {
        let mut list = LinkedFrontier::with_capacity(ByOrd, 0);
        for cursor in 0..4 {
            list.insert(cursor, 1);
        }
        let cursors: Vec<_> = drain(&mut list).into_iter().map(|(c, _)| c).collect();
        assert_eq!(cursors, [1, 3, 2, 0]);
    }
}
