// crates/zigbee-addr/src/hal.rs
use crate::types::{Address, AddressKind};
use crate::zdp::{IeeeAddrRequest, InvalidStatusError, NwkAddrRequest};
use core::fmt;

/// Synchronous errors raised by the resolver or by a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverError {
    /// The address is a broadcast, reserved or wildcard value.
    InvalidAddress(Address),
    /// The requested kind is the one the caller already has.
    AlreadyResolved(AddressKind),
    /// The transport could not accept the request for sending.
    TransportError(&'static str),
    /// A byte is not a known ZDP status code.
    InvalidStatus(u8),
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(addr) => {
                write!(f, "Address {} does not identify a single device", addr)
            }
            Self::AlreadyResolved(kind) => {
                write!(f, "Requested {:?} address is the kind already known", kind)
            }
            Self::TransportError(s) => write!(f, "Transport error: {}", s),
            Self::InvalidStatus(v) => write!(f, "Invalid ZDP status value: {v:#04x}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ResolverError {}

impl From<InvalidStatusError> for ResolverError {
    fn from(err: InvalidStatusError) -> Self {
        ResolverError::InvalidStatus(err.0)
    }
}

impl From<&'static str> for ResolverError {
    fn from(s: &'static str) -> Self {
        ResolverError::TransportError(s)
    }
}

/// Outbound half of the device-discovery transport.
///
/// The network stack implements this to carry ZDP address requests. The
/// resolver never builds frames itself.
///
/// A call that returns `Ok(())` must eventually be followed by exactly one
/// `AddressResolver::on_response` carrying the same TSN. That completion can
/// be a success, an explicit ZDP failure or a timeout. A call that returns
/// `Err` must not produce a completion.
pub trait ZdpTransport {
    /// Sends an IEEE_addr_req (cluster 0x0001) unicast to the device of interest.
    fn send_ieee_addr_request(&mut self, request: &IeeeAddrRequest) -> Result<(), ResolverError>;

    /// Sends an NWK_addr_req (cluster 0x0000) to `request.destination`,
    /// normally a broadcast.
    fn send_nwk_addr_request(&mut self, request: &NwkAddrRequest) -> Result<(), ResolverError>;
}
