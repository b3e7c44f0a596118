//! Run results

use chrono::{DateTime, Utc};
use claimbot_core::BountyId;
use serde::{Deserialize, Serialize};

/// How a single claim attempt ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ClaimOutcome {
    /// Marketplace accepted the claim
    Claimed(String),
    /// Marketplace answered with a failure
    Rejected(String),
    /// The request itself failed
    Errored(String),
}

impl ClaimOutcome {
    pub fn is_claimed(&self) -> bool {
        matches!(self, ClaimOutcome::Claimed(_))
    }

    pub fn message(&self) -> &str {
        match self {
            ClaimOutcome::Claimed(m) | ClaimOutcome::Rejected(m) | ClaimOutcome::Errored(m) => m,
        }
    }
}

/// One entry in the claim log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAttempt {
    pub bounty_id: BountyId,
    pub outcome: ClaimOutcome,
}

/// Why a run stopped where it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Nothing matched the criteria
    NoMatches,
    /// Matches found, claiming suppressed
    DryRun,
    /// A claim batch was attempted
    Claimed,
}

/// Result of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Bounties that passed the filter
    pub matched_count: usize,
    /// Successfully claimed ids, in attempt order
    pub claimed_ids: Vec<BountyId>,
    /// Every attempt made, successful or not
    pub attempts: Vec<ClaimAttempt>,
    pub outcome: RunOutcome,
    pub finished_at: DateTime<Utc>,
}

impl RunResult {
    /// A run that stopped before claiming anything
    pub fn without_claims(matched_count: usize, outcome: RunOutcome) -> Self {
        Self {
            matched_count,
            claimed_ids: Vec::new(),
            attempts: Vec::new(),
            outcome,
            finished_at: Utc::now(),
        }
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed_ids.len()
    }

    /// Attempts that did not end in a claim
    pub fn failures(&self) -> impl Iterator<Item = &ClaimAttempt> {
        self.attempts.iter().filter(|a| !a.outcome.is_claimed())
    }
}
