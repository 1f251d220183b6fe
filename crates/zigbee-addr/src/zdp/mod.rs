// crates/zigbee-addr/src/zdp/mod.rs
//! ZigBee Device Profile primitives used by address discovery.
//!
//! Only the information content of IEEE_addr_req / NWK_addr_req and their
//! responses is modelled. Frame encoding belongs to the network stack.
//! (Reference: ZigBee Specification, 2.4.3.1.1 - 2.4.3.1.2, 2.4.4.2.1 - 2.4.4.2.2)

use crate::types::{AddressPair, ExtendedAddress, ShortAddress};
use core::convert::TryFrom;
use core::fmt;

/// ZDP cluster ID of NWK_addr_req.
pub const CLUSTER_NWK_ADDR_REQ: u16 = 0x0000;
/// ZDP cluster ID of IEEE_addr_req.
pub const CLUSTER_IEEE_ADDR_REQ: u16 = 0x0001;
/// Response clusters set the high bit of the request cluster.
pub const CLUSTER_RESPONSE_FLAG: u16 = 0x8000;

/// ZDP status codes that can appear in an address response.
/// (Reference: ZigBee Specification, Table 2.138)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ZdpStatus {
    Success = 0x00,
    InvRequestType = 0x80,
    DeviceNotFound = 0x81,
    NotSupported = 0x84,
    Timeout = 0x85,
    NoEntry = 0x88,
}

/// Error type for a byte that is not a known `ZdpStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStatusError(pub u8);

impl fmt::Display for InvalidStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid ZDP status value: {:#04x}", self.0)
    }
}

impl TryFrom<u8> for ZdpStatus {
    type Error = InvalidStatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(ZdpStatus::Success),
            0x80 => Ok(ZdpStatus::InvRequestType),
            0x81 => Ok(ZdpStatus::DeviceNotFound),
            0x84 => Ok(ZdpStatus::NotSupported),
            0x85 => Ok(ZdpStatus::Timeout),
            0x88 => Ok(ZdpStatus::NoEntry),
            _ => Err(InvalidStatusError(value)),
        }
    }
}

impl From<ZdpStatus> for u8 {
    fn from(status: ZdpStatus) -> Self {
        status as u8
    }
}

/// RequestType field of the address requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum RequestType {
    /// Only the addresses of the remote device.
    #[default]
    SingleDevice = 0x00,
    /// The remote device's addresses followed by its associated devices.
    Extended = 0x01,
}

/// Contents of an IEEE_addr_req. It is sent unicast to `nwk_addr_of_interest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeeeAddrRequest {
    pub tsn: u8,
    pub nwk_addr_of_interest: ShortAddress,
    pub request_type: RequestType,
    pub start_index: u8,
}

/// Contents of an NWK_addr_req.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NwkAddrRequest {
    pub tsn: u8,
    /// Where the request is sent. Usually a broadcast, because the sender
    /// does not yet know the target's network address.
    pub destination: ShortAddress,
    pub ieee_addr_of_interest: ExtendedAddress,
    pub request_type: RequestType,
    pub start_index: u8,
}

/// How an exchange ended, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The remote device answered with `Success` and both of its addresses.
    Resolved(AddressPair),
    /// The remote device or a router answered with a non-success status.
    Failed(ZdpStatus),
    /// No response arrived within the transport's timeout.
    TimedOut,
}

/// A completion delivered by the transport for one previously sent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrResponse {
    /// Transaction sequence number echoed from the request.
    pub tsn: u8,
    pub outcome: ExchangeOutcome,
}

impl AddrResponse {
    pub fn resolved(tsn: u8, short: ShortAddress, extended: ExtendedAddress) -> Self {
        Self {
            tsn,
            outcome: ExchangeOutcome::Resolved(AddressPair::new(short, extended)),
        }
    }

    pub fn failed(tsn: u8, status: ZdpStatus) -> Self {
        Self {
            tsn,
            outcome: ExchangeOutcome::Failed(status),
        }
    }

    pub fn timed_out(tsn: u8) -> Self {
        Self {
            tsn,
            outcome: ExchangeOutcome::TimedOut,
        }
    }
}
