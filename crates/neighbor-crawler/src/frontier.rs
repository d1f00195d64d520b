//! Concurrent construction of the next level
//!
//! All workers of a level share one [`FrontierBuilder`]. The visited check and
//! the insertion happen under the same lock, so two workers discovering the
//! same node through different parents can never both add it.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::node::{Level, NodeId};

/// Every node seen so far in a traversal
pub type VisitedSet = HashSet<NodeId>;

#[derive(Debug, Default)]
struct FrontierState {
    visited: VisitedSet,
    next: Level,
}

/// Shared visited set plus the level under construction
#[derive(Debug, Default)]
pub struct FrontierBuilder {
    state: Mutex<FrontierState>,
}

impl FrontierBuilder {
    /// Start building a level on top of the nodes already visited
    pub fn new(visited: VisitedSet) -> Self {
        Self {
            state: Mutex::new(FrontierState {
                visited,
                next: Level::new(),
            }),
        }
    }

    /// Record `candidate` as discovered.
    ///
    /// Returns `true` if the node was new and has been appended to the level,
    /// `false` if it had already been visited.
    pub fn report_neighbor(&self, candidate: NodeId) -> bool {
        let mut state = self.lock();
        if state.visited.contains(&candidate) {
            return false;
        }
        state.visited.insert(candidate.clone());
        state.next.push(candidate);
        true
    }

    /// Nodes accepted so far
    pub fn len(&self) -> usize {
        self.lock().next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hand back the grown visited set and the finished level
    pub fn finish(self) -> (VisitedSet, Level) {
        let state = self.state.into_inner().unwrap_or_else(PoisonError::into_inner);
        (state.visited, state.next)
    }

    /// Like [`finish`](Self::finish) for a builder that is still shared;
    /// leaves it empty.
    pub fn take(&self) -> (VisitedSet, Level) {
        let mut state = self.lock();
        (std::mem::take(&mut state.visited), std::mem::take(&mut state.next))
    }

    // Poisoning means some worker panicked; `visited` and `next` are only
    // touched together under the guard, so the state is still usable.
    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
