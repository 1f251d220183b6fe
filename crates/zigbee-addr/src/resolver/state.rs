// crates/zigbee-addr/src/resolver/state.rs
use crate::types::Address;

/// States of the address resolution state machine.
///
/// `Begin` and `Confirm` are transitional. They are entered and left within
/// a single call to the resolver, so callers only observe them from inside a
/// transport call or a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverState {
    /// No exchange in flight and nothing queued.
    #[default]
    Idle,
    /// The queue head is being inspected to choose the request type.
    Begin,
    /// Waiting for the response to an IEEE_addr_req.
    IeeeAddrRequest,
    /// Waiting for the response to an NWK_addr_req.
    NwkAddrRequest,
    /// A result is known and is being delivered to matching requests.
    Confirm,
}

impl ResolverState {
    /// Returns true while a request is on the air and a response is expected.
    pub fn is_awaiting_response(&self) -> bool {
        matches!(
            self,
            ResolverState::IeeeAddrRequest | ResolverState::NwkAddrRequest
        )
    }
}

/// The one exchange currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    /// TSN the response must echo.
    pub tsn: u8,
    /// Address carried in the request, taken from the queue head.
    pub queried: Address,
}
