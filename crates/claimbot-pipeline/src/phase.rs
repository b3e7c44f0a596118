//! Phases of a single claim run
//!
//! `transition` is pure: the pipeline feeds it events as work completes and
//! logs the phase it lands in. Invalid transitions go to `Failed`, never panic.
//!
//! ```text
//! Fetching -> Filtering -> Empty    -> Done
//!                       -> DryRun   -> Done
//!                       -> Claiming -> Done
//! Fetching -> Failed
//! ```

/// Where a run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    /// Waiting on the bounty listing
    Fetching,
    /// Listing received, applying criteria
    Filtering { fetched: usize },
    /// Nothing matched
    Empty,
    /// Matches found but claiming is suppressed
    DryRun { matched: usize },
    /// Claiming a bounded batch
    Claiming { batch: usize },
    /// Finished normally
    Done { claimed: usize },
    /// Run aborted
    Failed { error: String },
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done { .. } | RunPhase::Failed { .. })
    }
}

/// Progress reported by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Fetched { total: usize },
    FetchFailed { message: String },
    Filtered { matched: usize, dry_run: bool, batch: usize },
    Finished { claimed: usize },
}

/// Pure phase transition
pub fn transition(phase: RunPhase, event: RunEvent) -> RunPhase {
    match (phase, event) {
        (RunPhase::Fetching, RunEvent::Fetched { total }) => {
            RunPhase::Filtering { fetched: total }
        }

        (RunPhase::Fetching, RunEvent::FetchFailed { message }) => {
            RunPhase::Failed { error: message }
        }

        (RunPhase::Filtering { .. }, RunEvent::Filtered { matched, dry_run, batch }) => {
            if matched == 0 {
                RunPhase::Empty
            } else if dry_run {
                RunPhase::DryRun { matched }
            } else {
                RunPhase::Claiming { batch }
            }
        }

        (RunPhase::Empty, RunEvent::Finished { .. })
        | (RunPhase::DryRun { .. }, RunEvent::Finished { .. }) => RunPhase::Done { claimed: 0 },

        (RunPhase::Claiming { batch }, RunEvent::Finished { claimed }) if claimed <= batch => {
            RunPhase::Done { claimed }
        }

        (phase, event) => RunPhase::Failed {
            error: format!("Invalid run transition: {:?} cannot handle {:?}", phase, event),
        },
    }
}
