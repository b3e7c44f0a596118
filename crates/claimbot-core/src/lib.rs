//! # claimbot-core
//!
//! Core types for claimbot, an agent that claims open bounties from a
//! bounty marketplace on behalf of a wallet.
//!
//! This crate holds everything that does not touch the network:
//! - Bounty records as the marketplace serves them
//! - Fixed-point reward decoding (6 implied decimals, USDC)
//! - The deterministic bounty filter
//! - Layered run configuration

pub mod config;
mod error;
pub mod filter;
pub mod reward;
mod types;

pub use config::{ClaimConfig, ClaimConfigFile, RunInputs, DEFAULT_API_URL};
pub use error::{ClaimError, Result};
pub use filter::{filter_bounties, FilterCriteria};
pub use reward::{format_usdc, parse_reward};
pub use types::*;
