//! Indexed binary min-heap over grid nodes.
//!
//! The heap stores arena indices; each [`Node`] remembers its own slot in
//! `heap_index`, so membership is O(1) and a key change is a single
//! O(log n) sift in one direction instead of a linear search.
//!
//! Nodes are ordered by `(f, h)` lexicographically, `f = g + h`: among equal
//! `f`, the node heuristically closer to the goal comes out first.

use std::cmp::Ordering;
use std::collections::TryReserveError;

use crate::grid::Node;

#[inline]
fn key_cmp(a: &Node, b: &Node) -> Ordering {
    a.f().total_cmp(&b.f()).then(a.h.total_cmp(&b.h))
}

#[derive(Debug, Default)]
pub(crate) struct OpenHeap {
    slots: Vec<usize>,
}

impl OpenHeap {
    /// Reserve room for `capacity` nodes up front so pushes never grow the
    /// storage mid-search.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        Ok(Self { slots })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drop every entry, keeping the storage.
    pub(crate) fn clear(&mut self, nodes: &mut [Node]) {
        for &i in &self.slots {
            nodes[i].heap_index = None;
        }
        self.slots.clear();
    }

    /// True iff `i` is stored at the slot its node claims.
    #[inline]
    pub(crate) fn contains(&self, nodes: &[Node], i: usize) -> bool {
        match nodes[i].heap_index {
            Some(slot) => self.slots.get(slot) == Some(&i),
            None => false,
        }
    }

    pub(crate) fn push(&mut self, nodes: &mut [Node], i: usize) {
        let slot = self.slots.len();
        self.slots.push(i);
        nodes[i].heap_index = Some(slot);
        self.sift_up(nodes, slot);
    }

    /// Lowest-keyed node without removing it.
    #[inline]
    #[allow(dead_code)]
    pub(crate) fn peek(&self) -> Option<usize> {
        self.slots.first().copied()
    }

    pub(crate) fn pop(&mut self, nodes: &mut [Node]) -> Option<usize> {
        let root = *self.slots.first()?;
        let last = self.slots.pop()?;
        if !self.slots.is_empty() {
            self.slots[0] = last;
            nodes[last].heap_index = Some(0);
            self.sift_down(nodes, 0);
        }
        nodes[root].heap_index = None;
        Some(root)
    }

    /// Rewrite `g`/`h` of a queued node and restore the heap order with one
    /// sift toward the side the key moved. Returns false, changing nothing,
    /// if the node is not queued.
    pub(crate) fn update_key(&mut self, nodes: &mut [Node], i: usize, g: f64, h: f64) -> bool {
        if !self.contains(nodes, i) {
            return false;
        }
        let Some(slot) = nodes[i].heap_index else {
            return false;
        };
        let (old_f, old_h) = (nodes[i].f(), nodes[i].h);
        nodes[i].g = g;
        nodes[i].h = h;
        let moved = (g + h).total_cmp(&old_f).then(h.total_cmp(&old_h));
        if moved == Ordering::Less {
            self.sift_up(nodes, slot);
        } else {
            self.sift_down(nodes, slot);
        }
        true
    }

    #[inline]
    fn swap(&mut self, nodes: &mut [Node], a: usize, b: usize) {
        self.slots.swap(a, b);
        nodes[self.slots[a]].heap_index = Some(a);
        nodes[self.slots[b]].heap_index = Some(b);
    }

    fn sift_up(&mut self, nodes: &mut [Node], mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if key_cmp(&nodes[self.slots[parent]], &nodes[self.slots[pos]]) != Ordering::Greater {
                break;
            }
            self.swap(nodes, parent, pos);
            pos = parent;
        }
    }

    fn sift_down(&mut self, nodes: &mut [Node], mut pos: usize) {
        loop {
            let left = pos * 2 + 1;
            if left >= self.slots.len() {
                break;
            }
            let right = left + 1;
            // Ties go left.
            let lowest = if right < self.slots.len()
                && key_cmp(&nodes[self.slots[right]], &nodes[self.slots[left]]) == Ordering::Less
            {
                right
            } else {
                left
            };
            if key_cmp(&nodes[self.slots[lowest]], &nodes[self.slots[pos]]) != Ordering::Less {
                break;
            }
            self.swap(nodes, lowest, pos);
            pos = lowest;
        }
    }
}
