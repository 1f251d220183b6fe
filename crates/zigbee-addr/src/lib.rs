#![cfg_attr(not(feature = "std"), no_std)]

// 'alloc' is used for the request queue and boxed callbacks
extern crate alloc;

// --- Foundation Modules ---
pub mod types;
pub mod hal;

// --- Device Discovery Protocol ---
pub mod zdp;

// --- Address Resolution ---
pub mod resolver;

// --- Top-level Exports ---
pub use types::{Address, AddressKind, AddressPair, ExtendedAddress, ShortAddress};
pub use hal::{ResolverError, ZdpTransport};
pub use zdp::{AddrResponse, ExchangeOutcome, IeeeAddrRequest, NwkAddrRequest, ZdpStatus};
pub use resolver::{AddressResolver, ResolveConfirm, ResolveFailure, ResolverConfig, ResolverState};
