//! The selection-and-claim pipeline
//!
//! A run is strictly sequential: one listing fetch, a pure filter, then at
//! most `max_claims` claim requests, one at a time, spaced by `claim_delay`.
//! Only the listing fetch can fail the run. Individual claim failures are
//! logged and recorded, and the batch carries on.

use claimbot_client::{BountySource, ClaimExecutor};
use claimbot_core::{
    filter_bounties, format_usdc, Bounty, BountyId, ClaimConfig, ClaimError, ClaimRequest,
    Result,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::phase::{transition, RunEvent, RunPhase};
use crate::run::{ClaimAttempt, ClaimOutcome, RunOutcome, RunResult};

/// Pick the claim batch: the first `max_claims` distinct bounties, in order
///
/// A bounty listed twice is only ever attempted once.
pub fn select_batch<'a>(matched: &[&'a Bounty], max_claims: usize) -> Vec<&'a Bounty> {
    let mut seen: HashSet<&BountyId> = HashSet::new();
    let mut batch = Vec::with_capacity(max_claims.min(matched.len()));

    for bounty in matched.iter().copied() {
        if batch.len() >= max_claims {
            break;
        }
        if !seen.insert(&bounty.id) {
            warn!("Skipping duplicate listing for bounty #{}", bounty.id);
            continue;
        }
        batch.push(bounty);
    }

    batch
}

/// Fetches, filters and claims bounties for one wallet
pub struct ClaimPipeline<S, E> {
    source: S,
    executor: E,
    config: ClaimConfig,
}

impl<S: BountySource, E: ClaimExecutor> ClaimPipeline<S, E> {
    pub fn new(source: S, executor: E, config: ClaimConfig) -> Self {
        Self {
            source,
            executor,
            config,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Execute one full run
    ///
    /// Returns `Err` when the listing could not be fetched or the run reached
    /// an unexpected phase; in both cases no claim is attempted.
    pub async fn run(&self) -> Result<RunResult> {
        let phase = RunPhase::Fetching;
        info!("Fetching bounties...");

        let bounties = match self.source.fetch_bounties().await {
            Ok(bounties) => bounties,
            Err(e) => {
                let phase = transition(
                    phase,
                    RunEvent::FetchFailed {
                        message: e.to_string(),
                    },
                );
                debug!("Run phase: {:?}", phase);
                return Err(e);
            }
        };
        info!("Found {} total bounties", bounties.len());
        let phase = transition(
            phase,
            RunEvent::Fetched {
                total: bounties.len(),
            },
        );
        debug!("Run phase: {:?}", phase);

        let matched = filter_bounties(&bounties, &self.config.criteria);
        info!("{} bounties match your criteria", matched.len());

        let batch = if self.config.dry_run {
            Vec::new()
        } else {
            select_batch(&matched, self.config.max_claims)
        };

        let phase = transition(
            phase,
            RunEvent::Filtered {
                matched: matched.len(),
                dry_run: self.config.dry_run,
                batch: batch.len(),
            },
        );
        debug!("Run phase: {:?}", phase);

        let result = self.settle(&phase, &matched, &batch).await?;

        let phase = transition(
            phase,
            RunEvent::Finished {
                claimed: result.claimed_count(),
            },
        );
        debug!("Run phase: {:?}", phase);

        Ok(result)
    }

    /// Act on the phase reached after filtering
    ///
    /// Claims are only sent from `Claiming`. Any other phase is an internal
    /// error.
    async fn settle(
        &self,
        phase: &RunPhase,
        matched: &[&Bounty],
        batch: &[&Bounty],
    ) -> Result<RunResult> {
        match phase {
            RunPhase::Empty => {
                info!("No matching bounties found. Exiting.");
                Ok(RunResult::without_claims(0, RunOutcome::NoMatches))
            }
            RunPhase::DryRun { matched: count } => {
                log_matches(matched);
                info!("Dry run mode - not claiming any bounties");
                Ok(RunResult::without_claims(*count, RunOutcome::DryRun))
            }
            RunPhase::Claiming { .. } => {
                log_matches(matched);
                let result = self.claim_batch(matched.len(), batch).await;
                info!("Claimed {} bounty(ies)", result.claimed_count());
                Ok(result)
            }
            other => Err(ClaimError::Internal(format!(
                "cannot claim from run phase {:?}",
                other
            ))),
        }
    }

    async fn claim_batch(&self, matched_count: usize, batch: &[&Bounty]) -> RunResult {
        let mut result = RunResult::without_claims(matched_count, RunOutcome::Claimed);

        for (index, bounty) in batch.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.claim_delay).await;
            }

            let attempt = self.claim_one(bounty).await;
            if attempt.outcome.is_claimed() {
                result.claimed_ids.push(attempt.bounty_id.clone());
            }
            result.attempts.push(attempt);
        }

        result.finished_at = chrono::Utc::now();
        result
    }

    async fn claim_one(&self, bounty: &Bounty) -> ClaimAttempt {
        info!(
            "Claiming bounty #{}: {} (${})",
            bounty.id,
            bounty.title,
            format_usdc(bounty.reward_usdc())
        );

        let request = ClaimRequest::new(
            bounty.id.clone(),
            self.config.wallet_address.clone(),
            self.config.claimer_name.clone(),
        );

        let outcome = match self.executor.claim(&request).await {
            Ok(result) if result.success => {
                info!("  Claimed: {}", result.message);
                ClaimOutcome::Claimed(result.message)
            }
            Ok(result) => {
                warn!("  Claim rejected: {}", result.message);
                ClaimOutcome::Rejected(result.message)
            }
            Err(e) => {
                warn!("  Error: {}", e);
                ClaimOutcome::Errored(e.to_string())
            }
        };

        ClaimAttempt {
            bounty_id: request.bounty_id,
            outcome,
        }
    }
}

fn log_matches(matched: &[&Bounty]) {
    info!("Matching bounties:");
    for bounty in matched {
        info!(
            "  [{}] {} - ${} USDC",
            bounty.id,
            bounty.title,
            format_usdc(bounty.reward_usdc())
        );
        info!("       Tags: {}", bounty.tags.join(", "));
    }
}
