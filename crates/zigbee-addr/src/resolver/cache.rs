// crates/zigbee-addr/src/resolver/cache.rs
//! Bounded memory of recently resolved address pairs.
//!
//! Plays the role of the APS address map: a lookup hit lets `resolve`
//! answer without putting an exchange on the air.

use crate::types::{Address, AddressPair};
use alloc::collections::VecDeque;
use log::debug;

#[derive(Debug, Default)]
pub(crate) struct AddressCache {
    capacity: usize,
    /// Oldest entry at the front.
    entries: VecDeque<AddressPair>,
}

impl AddressCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub(crate) fn lookup(&self, addr: &Address) -> Option<AddressPair> {
        self.entries.iter().find(|pair| pair.contains(addr)).copied()
    }

    /// Records a pair proven by an exchange. Entries that share either
    /// address are stale by definition and are dropped first.
    pub(crate) fn insert(&mut self, pair: AddressPair) {
        if self.capacity == 0 {
            return;
        }
        self.entries.retain(|existing| !existing.overlaps(&pair));
        while self.entries.len() >= self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                debug!("[ZDO-ADDR] Cache full, evicting {}", evicted);
            }
        }
        self.entries.push_back(pair);
    }

    /// Drops any entry naming `addr`. Returns how many were removed.
    pub(crate) fn forget(&mut self, addr: &Address) -> usize {
        let before = self.entries.len();
        self.entries.retain(|pair| !pair.contains(addr));
        before - self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
