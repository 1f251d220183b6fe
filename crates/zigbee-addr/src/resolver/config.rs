// crates/zigbee-addr/src/resolver/config.rs
//! Construction-time settings for an `AddressResolver`.

use crate::hal::ResolverError;
use crate::types::{Address, ShortAddress, BROADCAST_RX_ON_WHEN_IDLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Number of resolved pairs to remember. 0 disables the cache, so every
    /// resolution goes on the air.
    pub cache_capacity: usize,
    /// Destination of NWK_addr_req frames.
    pub nwk_addr_req_destination: ShortAddress,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 0,
            nwk_addr_req_destination: BROADCAST_RX_ON_WHEN_IDLE,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_nwk_addr_req_destination(mut self, destination: ShortAddress) -> Self {
        self.nwk_addr_req_destination = destination;
        self
    }

    /// Checks that the NWK_addr_req destination is a broadcast or a unicast
    /// address. Reserved values are refused.
    pub fn validate(&self) -> Result<(), ResolverError> {
        let dest = self.nwk_addr_req_destination;
        if dest.is_unicast() || dest.is_broadcast() {
            Ok(())
        } else {
            Err(ResolverError::InvalidAddress(Address::Short(dest)))
        }
    }
}
