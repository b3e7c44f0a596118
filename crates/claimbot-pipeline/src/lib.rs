//! # claimbot-pipeline
//!
//! Orchestrates one claim run:
//! - Fetch the bounty listing (the only fatal step)
//! - Filter it against the operator's criteria
//! - Claim the first `max_claims` matches sequentially, isolating failures
//!
//! Claims are never issued concurrently. A fixed delay separates consecutive
//! claim requests.

mod outputs;
mod phase;
mod pipeline;
mod run;

pub use outputs::{OutputTarget, RunOutputs};
pub use phase::{transition, RunEvent, RunPhase};
pub use pipeline::{select_batch, ClaimPipeline};
pub use run::{ClaimAttempt, ClaimOutcome, RunOutcome, RunResult};
