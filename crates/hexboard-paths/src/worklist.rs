//! Frontier containers that decide a search's exploration order.
//!
//! | Worklist | `next` returns | Search behaves as |
//! |---|---|---|
//! | [`LifoWorklist`] | most recently added | depth-first |
//! | [`FifoWorklist`] | least recently added | breadth-first |
//! | [`PriorityWorklist`] | minimum by comparator | best-first |

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::rc::Rc;

use hexboard_core::{Error, Result};

/// A frontier of pending elements.
pub trait Worklist<E> {
    fn add(&mut self, element: E);

    /// Whether [`next`](Self::next) would succeed.
    fn has_next(&self) -> bool;

    /// Remove and return the next element in this worklist's order.
    ///
    /// Fails with [`Error::Exhausted`] when empty.
    fn next(&mut self) -> Result<E>;

    fn len(&self) -> usize;

    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        !self.has_next()
    }
}

// ---------------------------------------------------------------------------
// LIFO / FIFO
// ---------------------------------------------------------------------------

/// A stack.
#[derive(Debug, Clone)]
pub struct LifoWorklist<E> {
    items: Vec<E>,
}

impl<E> Default for LifoWorklist<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E> LifoWorklist<E> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Worklist<E> for LifoWorklist<E> {
    fn add(&mut self, element: E) {
        self.items.push(element);
    }

    fn has_next(&self) -> bool {
        !self.items.is_empty()
    }

    fn next(&mut self) -> Result<E> {
        self.items.pop().ok_or(Error::Exhausted)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// A queue.
#[derive(Debug, Clone)]
pub struct FifoWorklist<E> {
    items: VecDeque<E>,
}

impl<E> Default for FifoWorklist<E> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<E> FifoWorklist<E> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Worklist<E> for FifoWorklist<E> {
    fn add(&mut self, element: E) {
        self.items.push_back(element);
    }

    fn has_next(&self) -> bool {
        !self.items.is_empty()
    }

    fn next(&mut self) -> Result<E> {
        self.items.pop_front().ok_or(Error::Exhausted)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

type Comparator<'a, E> = Rc<dyn Fn(&E, &E) -> Ordering + 'a>;

/// A heap entry ordered by the worklist's comparator, then by `seq`.
struct Entry<'a, E> {
    item: E,
    /// Insertion counter; lower pops first among equal items.
    seq: u64,
    cmp: Comparator<'a, E>,
}

impl<E> PartialEq for Entry<'_, E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Entry<'_, E> {}

impl<E> PartialOrd for Entry<'_, E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<'_, E> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.cmp)(&self.item, &other.item).then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-heap ordered by an injected comparator.
///
/// Elements that compare equal come out in insertion order.
pub struct PriorityWorklist<'a, E> {
    heap: BinaryHeap<Reverse<Entry<'a, E>>>,
    cmp: Comparator<'a, E>,
    seq: u64,
}

impl<'a, E> PriorityWorklist<'a, E> {
    /// A worklist whose `next` returns the minimum under `cmp`.
    pub fn new(cmp: impl Fn(&E, &E) -> Ordering + 'a) -> Self {
        Self {
            heap: BinaryHeap::new(),
            cmp: Rc::new(cmp),
            seq: 0,
        }
    }
}

impl<'a, E: Ord + 'a> PriorityWorklist<'a, E> {
    /// A worklist ordered by `E`'s natural order.
    pub fn natural() -> Self {
        Self::new(E::cmp)
    }
}

impl<E> Worklist<E> for PriorityWorklist<'_, E> {
    fn add(&mut self, element: E) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            item: element,
            seq,
            cmp: Rc::clone(&self.cmp),
        }));
    }

    fn has_next(&self) -> bool {
        !self.heap.is_empty()
    }

    fn next(&mut self) -> Result<E> {
        self.heap
            .pop()
            .map(|Reverse(entry)| entry.item)
            .ok_or(Error::Exhausted)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngExt;

    fn drain<W: Worklist<i32>>(w: &mut W) -> Vec<i32> {
        let mut out = Vec::new();
        while w.has_next() {
            out.push(w.next().unwrap());
        }
        out
    }

    #[test]
    fn lifo_order() {
        let mut w = LifoWorklist::new();
        for i in 1..=4 {
            w.add(i);
        }
        assert_eq!(w.len(), 4);
        assert_eq!(drain(&mut w), vec![4, 3, 2, 1]);
        assert!(matches!(w.next(), Err(Error::Exhausted)));
    }

    #[test]
    fn fifo_order() {
        let mut w = FifoWorklist::new();
        for i in 1..=4 {
            w.add(i);
        }
        assert_eq!(w.next().unwrap(), 1);
        w.add(5);
        assert_eq!(drain(&mut w), vec![2, 3, 4, 5]);
        assert!(matches!(w.next(), Err(Error::Exhausted)));
    }

    #[test]
    fn priority_minimum_first() {
        let mut w = PriorityWorklist::natural();
        for i in [5, 1, 4, 2, 3, 0] {
            w.add(i);
        }
        assert_eq!(drain(&mut w), vec![0, 1, 2, 3, 4, 5]);
        assert!(matches!(w.next(), Err(Error::Exhausted)));
    }

    #[test]
    fn priority_ties_in_insertion_order() {
        let mut w = PriorityWorklist::new(|x: &(i32, char), y: &(i32, char)| x.0.cmp(&y.0));
        for e in [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')] {
            w.add(e);
        }
        let mut out = Vec::new();
        while let Ok((_, c)) = w.next() {
            out.push(c);
        }
        assert_eq!(out, vec!['b', 'd', 'a', 'c', 'e']);
    }

    #[test]
    fn priority_ties_across_interleaved_pops() {
        let mut w = PriorityWorklist::new(|x: &(i32, u32), y: &(i32, u32)| x.0.cmp(&y.0));
        for i in 0..64 {
            w.add((i % 2, i as u32));
        }
        for _ in 0..10 {
            w.next().unwrap();
        }
        for i in 64..96 {
            w.add((0, i));
        }
        let zeros: Vec<u32> = std::iter::from_fn(|| w.next().ok())
            .take_while(|e| e.0 == 0)
            .map(|e| e.1)
            .collect();
        let mut sorted = zeros.clone();
        sorted.sort();
        assert_eq!(zeros, sorted);
        assert_eq!(zeros.len(), 32 - 10 + 32);
    }

    #[test]
    fn priority_comparator_borrows() {
        let weights = [9, 3, 7, 1];
        let mut w = PriorityWorklist::new(|x: &usize, y: &usize| weights[*x].cmp(&weights[*y]));
        for i in 0..weights.len() {
            w.add(i);
        }
        let order: Vec<_> = std::iter::from_fn(|| w.next().ok()).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn priority_matches_sorting() {
        let mut rng = rand::rng();
        let mut w = PriorityWorklist::new(|x: &i32, y: &i32| y.cmp(x));
        let mut model = Vec::new();
        for _ in 0..500 {
            if rng.random_range(0..3) == 0 && w.has_next() {
                let got = w.next().unwrap();
                model.sort();
                assert_eq!(Some(got), model.pop());
            } else {
                let v = rng.random_range(-50..50);
                w.add(v);
                model.push(v);
            }
            assert_eq!(w.len(), model.len());
        }
    }

    #[test]
    fn clear_empties() {
        let mut lifo = LifoWorklist::new();
        let mut fifo = FifoWorklist::new();
        let mut prio = PriorityWorklist::natural();
        lifo.add(1);
        fifo.add(1);
        prio.add(1);
        lifo.clear();
        fifo.clear();
        prio.clear();
        assert!(lifo.is_empty() && fifo.is_empty() && prio.is_empty());
    }
}
