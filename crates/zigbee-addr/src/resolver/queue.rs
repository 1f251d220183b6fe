// crates/zigbee-addr/src/resolver/queue.rs
use super::events::{ResolveCallback, ResolveConfirm};
use crate::types::{Address, AddressKind};
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

/// A caller's request, owned by the queue until it is answered.
pub(crate) struct ResolutionRequest {
    pub(crate) known: Address,
    pub(crate) requested_kind: AddressKind,
    /// Insertion order. Only used for FIFO ordering and diagnostics.
    pub(crate) sequence: u32,
    callback: ResolveCallback,
}

impl ResolutionRequest {
    /// Consumes the request and hands the result to its caller.
    pub(crate) fn deliver(self, confirm: ResolveConfirm) {
        (self.callback)(confirm);
    }
}

impl fmt::Debug for ResolutionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionRequest")
            .field("known", &self.known)
            .field("requested_kind", &self.requested_kind)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

/// FIFO of pending requests.
#[derive(Debug, Default)]
pub(crate) struct ResolutionQueue {
    entries: VecDeque<ResolutionRequest>,
    next_sequence: u32,
}

impl ResolutionQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a request and returns its sequence number.
    pub(crate) fn push(
        &mut self,
        known: Address,
        requested_kind: AddressKind,
        callback: ResolveCallback,
    ) -> u32 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.entries.push_back(ResolutionRequest {
            known,
            requested_kind,
            sequence,
            callback,
        });
        sequence
    }

    /// The oldest pending request.
    pub(crate) fn head(&self) -> Option<&ResolutionRequest> {
        self.entries.front()
    }

    /// Removes every request for which `pred` holds, wherever it sits in
    /// the queue. The remaining requests keep their relative order.
    pub(crate) fn take_matching<F>(&mut self, mut pred: F) -> Vec<ResolutionRequest>
    where
        F: FnMut(&ResolutionRequest) -> bool,
    {
        let mut matched = Vec::new();
        let mut remaining = VecDeque::with_capacity(self.entries.len());
        for request in self.entries.drain(..) {
            if pred(&request) {
                matched.push(request);
            } else {
                remaining.push_back(request);
            }
        }
        self.entries = remaining;
        matched
    }

    /// Removes all requests, oldest first.
    pub(crate) fn drain_all(&mut self) -> Vec<ResolutionRequest> {
        self.entries.drain(..).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExtendedAddress, ShortAddress};
    use alloc::boxed::Box;

    fn short(v: u16) -> Address {
        Address::Short(ShortAddress(v))
    }

    fn push_noop(queue: &mut ResolutionQueue, known: Address) -> u32 {
        let kind = match known.kind() {
            AddressKind::Short => AddressKind::Extended,
            AddressKind::Extended => AddressKind::Short,
        };
        queue.push(known, kind, Box::new(|_| {}))
    }

    #[test]
    fn test_push_assigns_increasing_sequence() {
        let mut queue = ResolutionQueue::new();
        assert_eq!(push_noop(&mut queue, short(1)), 0);
        assert_eq!(push_noop(&mut queue, short(2)), 1);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.head().map(|r| r.known), Some(short(1)));
    }

    #[test]
    fn test_take_matching_preserves_remaining_order() {
        let mut queue = ResolutionQueue::new();
        push_noop(&mut queue, short(1));
        push_noop(&mut queue, short(2));
        push_noop(&mut queue, Address::Extended(ExtendedAddress(0xA)));
        push_noop(&mut queue, short(1));
        push_noop(&mut queue, short(3));

        let matched = queue.take_matching(|r| r.known == short(1));
        let matched_seq: Vec<u32> = matched.iter().map(|r| r.sequence).collect();
        assert_eq!(matched_seq, [0, 3]);

        let rest: Vec<u32> = queue.drain_all().iter().map(|r| r.sequence).collect();
        assert_eq!(rest, [1, 2, 4]);
        assert!(queue.is_empty());
    }
}
