//! Priority frontier for best-first search.
//!
//! A plain `BinaryHeap` can pop the cheapest entry but cannot answer "is this
//! state queued?" or lower a queued state's priority. [`Frontier`] is a
//! binary min-heap stored in a `Vec` with a hash index from each queued state
//! to its heap slot. Every heap swap updates the index in the same step, so
//! the two never disagree:
//!
//! - a state is queued at most once;
//! - `contains` is a hash lookup;
//! - `pop` returns the lowest priority, earliest insertion first on ties.

use rustc_hash::FxHashMap;

use crate::error::PuzzleError;
use crate::state::State;

#[derive(Debug, Clone)]
struct Entry {
    priority: u32,
    seq: u64,
    state: State,
}

impl Entry {
    fn key(&self) -> (u32, u64) {
        (self.priority, self.seq)
    }
}

#[derive(Debug, Default)]
pub struct Frontier {
    heap: Vec<Entry>,
    index: FxHashMap<State, usize>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, state: &State) -> bool {
        self.index.contains_key(state)
    }

    pub fn priority_of(&self, state: &State) -> Option<u32> {
        self.index.get(state).map(|&i| self.heap[i].priority)
    }

    /// Queues `state`. Pushing a state that is already queued is a contract
    /// violation and leaves the frontier unchanged.
    pub fn push(&mut self, priority: u32, state: State) -> Result<(), PuzzleError> {
        if self.index.contains_key(&state) {
            return Err(PuzzleError::DuplicateEntry { state });
        }

        let seq = self.bump_seq();
        let slot = self.heap.len();
        self.index.insert(state.clone(), slot);
        self.heap.push(Entry {
            priority,
            seq,
            state,
        });
        self.sift_up(slot);
        Ok(())
    }

    /// Removes the entry with the lowest priority.
    pub fn pop(&mut self) -> Option<(u32, State)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.index.remove(&entry.state);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.priority, entry.state))
    }

    pub fn peek(&self) -> Option<(u32, &State)> {
        self.heap.first().map(|e| (e.priority, &e.state))
    }

    /// Swaps the queued entry for `state` with one carrying `priority`,
    /// returning the old priority. The replacement orders as a fresh
    /// insertion among equal priorities.
    pub fn replace(&mut self, state: &State, priority: u32) -> Result<u32, PuzzleError> {
        let Some(&slot) = self.index.get(state) else {
            return Err(PuzzleError::NotQueued {
                state: state.clone(),
            });
        };

        let seq = self.bump_seq();
        let entry = &mut self.heap[slot];
        let old = entry.priority;
        entry.priority = priority;
        entry.seq = seq;

        let slot = self.sift_up(slot);
        self.sift_down(slot);
        Ok(old)
    }

    /// Queued entries in heap order, not priority order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &State)> {
        self.heap.iter().map(|e| (e.priority, &e.state))
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        if let Some(slot) = self.index.get_mut(&self.heap[a].state) {
            *slot = a;
        }
        if let Some(slot) = self.index.get_mut(&self.heap[b].state) {
            *slot = b;
        }
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].key() >= self.heap[parent].key() {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;

            if left < len && self.heap[left].key() < self.heap[smallest].key() {
                smallest = left;
            }
            if right < len && self.heap[right].key() < self.heap[smallest].key() {
                smallest = right;
            }
            if smallest == i {
                return i;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}
