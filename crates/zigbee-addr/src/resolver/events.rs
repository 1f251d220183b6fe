// crates/zigbee-addr/src/resolver/events.rs
use crate::types::{Address, AddressPair};
use crate::zdp::ZdpStatus;
use alloc::boxed::Box;
use core::fmt;

/// Why a resolution did not produce an address pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveFailure {
    /// The remote side answered with a non-success ZDP status.
    Status(ZdpStatus),
    /// The transport gave up waiting for a response.
    Timeout,
    /// The transport refused to send the request.
    Transport,
    /// A response arrived but did not describe the queried device.
    InvalidResponse,
    /// Pending requests were flushed because the network association was lost.
    Cancelled,
}

impl ResolveFailure {
    /// Distinguishes "we left the network" from "the device is unreachable".
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ResolveFailure::Cancelled)
    }
}

impl fmt::Display for ResolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "Remote reported ZDP status {:?}", status),
            Self::Timeout => write!(f, "No address response before timeout"),
            Self::Transport => write!(f, "Address request could not be sent"),
            Self::InvalidResponse => write!(f, "Address response did not match the query"),
            Self::Cancelled => write!(f, "Resolution cancelled by reset"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ResolveFailure {}

/// The single completion each caller of `resolve` receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveConfirm {
    /// The address the caller started from.
    pub known: Address,
    pub result: Result<AddressPair, ResolveFailure>,
}

/// Completion handler supplied to `AddressResolver::resolve`.
pub type ResolveCallback = Box<dyn FnOnce(ResolveConfirm)>;

/// What a finished exchange established, used to select the queued requests
/// it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    Resolved(AddressPair),
    Failed {
        queried: Address,
        failure: ResolveFailure,
    },
}

impl Resolution {
    /// A success answers every request naming either half of the pair.
    /// A failure answers only requests that asked about the same address.
    pub(crate) fn answers(&self, known: &Address) -> bool {
        match self {
            Resolution::Resolved(pair) => pair.contains(known),
            Resolution::Failed { queried, .. } => queried == known,
        }
    }

    pub(crate) fn confirm_for(&self, known: Address) -> ResolveConfirm {
        let result = match self {
            Resolution::Resolved(pair) => Ok(*pair),
            Resolution::Failed { failure, .. } => Err(*failure),
        };
        ResolveConfirm { known, result }
    }
}
