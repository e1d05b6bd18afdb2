//! The visited set shared by every branch of one crawl
//!
//! Claiming an address is a single critical section: the membership test and
//! the insert happen under the same lock, so two branches that discover the
//! same address concurrently can never both win.

use crate::state::VisitState;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Addresses claimed by one coordinator, with their visit state
///
/// Entries are never removed. An address absent from the set is unseen.
#[derive(Debug, Default)]
pub struct VisitedSet {
    entries: Mutex<HashMap<String, VisitState>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims an address
    ///
    /// Returns true if the address was unseen and is now `InProgress`,
    /// false if some branch already claimed it.
    pub fn try_visit(&self, address: &str) -> bool {
        let mut entries = self.lock();
        if entries.contains_key(address) {
            return false;
        }
        entries.insert(address.to_string(), VisitState::InProgress);
        true
    }

    /// Records the terminal state of a claimed address
    ///
    /// Returns false (and changes nothing) if the address was never claimed
    /// or has already finished.
    pub fn finish(&self, address: &str, state: VisitState) -> bool {
        let mut entries = self.lock();
        match entries.get_mut(address) {
            Some(current) if current.can_transition_to(state) => {
                *current = state;
                true
            }
            Some(current) => {
                tracing::warn!(
                    "Ignoring visit state change for {}: {} -> {}",
                    address,
                    current,
                    state
                );
                false
            }
            None => false,
        }
    }

    /// Returns the state of an address, or None if it is unseen
    pub fn state(&self, address: &str) -> Option<VisitState> {
        self.lock().get(address).copied()
    }

    /// Returns true if the address has been claimed
    pub fn contains(&self, address: &str) -> bool {
        self.lock().contains_key(address)
    }

    /// Number of claimed addresses
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of claimed addresses whose unit has not finished
    pub fn in_progress(&self) -> usize {
        self.lock()
            .values()
            .filter(|state| !state.is_terminal())
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, VisitState>> {
        // Entries are only ever inserted or advanced, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
