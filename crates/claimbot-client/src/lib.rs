//! # claimbot-client
//!
//! HTTP access to the bounty marketplace.
//!
//! Two traits mark the network seams of a run:
//! - [`BountySource`] lists bounties (read-only)
//! - [`ClaimExecutor`] claims one bounty (the only mutating call)
//!
//! [`BountyApiClient`] implements both over reqwest. The `mock` module holds
//! in-memory implementations for tests.

mod http;
pub mod mock;
mod traits;

pub use http::BountyApiClient;
pub use traits::{BountySource, ClaimExecutor};
