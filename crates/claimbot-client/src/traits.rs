//! Network seams of the claim pipeline

use async_trait::async_trait;
use claimbot_core::{Bounty, ClaimRequest, ClaimResult, Result};

/// Source of the current bounty listing
#[async_trait]
pub trait BountySource: Send + Sync {
    /// Fetch every bounty the marketplace currently lists, in listing order
    async fn fetch_bounties(&self) -> Result<Vec<Bounty>>;
}

/// Submits claims against the marketplace
///
/// An `Ok` result covers both accepted and rejected claims; `Err` means the
/// exchange itself failed (network error, malformed body).
#[async_trait]
pub trait ClaimExecutor: Send + Sync {
    async fn claim(&self, request: &ClaimRequest) -> Result<ClaimResult>;
}
