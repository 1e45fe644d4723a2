use std::collections::HashMap;
use std::hash::Hash;

use tokio_util::sync::CancellationToken;

/// Identifies one occupancy of a key, so a late settle cannot evict its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Entry {
    ticket: Ticket,
    token: CancellationToken,
}

/// Outstanding requests keyed by purpose, each with its cancellation token.
#[derive(Debug)]
pub struct InFlightTable<K> {
    entries: HashMap<K, Entry>,
    next_ticket: u64,
}

impl<K> Default for InFlightTable<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_ticket: 0,
        }
    }
}

impl<K: Eq + Hash> InFlightTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a request under `key`, cancelling whatever held it before.
    pub fn start(&mut self, key: K) -> (Ticket, CancellationToken) {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        let token = CancellationToken::new();
        let previous = self.entries.insert(
            key,
            Entry {
                ticket,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.token.cancel();
        }
        (ticket, token)
    }

    /// Removes `key` if it is still held by `ticket`.
    pub fn settle(&mut self, key: &K, ticket: Ticket) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.ticket == ticket => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self, key: &K) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                entry.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancels and removes every entry whose key matches. Returns how many were cancelled.
    pub fn cancel_where(&mut self, mut matches: impl FnMut(&K) -> bool) -> usize {
        let mut cancelled = 0;
        self.entries.retain(|key, entry| {
            if matches(key) {
                entry.token.cancel();
                cancelled += 1;
                false
            } else {
                true
            }
        });
        cancelled
    }

    pub fn cancel_all(&mut self) -> usize {
        self.cancel_where(|_| true)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
