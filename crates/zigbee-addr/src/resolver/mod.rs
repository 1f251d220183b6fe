// crates/zigbee-addr/src/resolver/mod.rs
//! The ZDO address resolution manager.
//!
//! Requests are queued FIFO and served by a single outstanding ZDP exchange.
//! When the exchange completes, every queued request that names either
//! half of the proven address pair is answered together.

mod cache;
pub mod config;
pub mod events;
pub mod main;
mod queue;
pub mod state;

pub use config::ResolverConfig;
pub use events::{ResolveCallback, ResolveConfirm, ResolveFailure};
pub use main::AddressResolver;
pub use state::{Exchange, ResolverState};
