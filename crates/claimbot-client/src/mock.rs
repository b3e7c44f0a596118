//! In-memory marketplace for testing

use async_trait::async_trait;
use claimbot_core::{Bounty, BountyId, ClaimError, ClaimRequest, ClaimResult, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::traits::{BountySource, ClaimExecutor};

/// Mock bounty listing
pub struct MockBountySource {
    bounties: Vec<Bounty>,
    fail_status: Option<u16>,
    fetches: AtomicUsize,
}

impl MockBountySource {
    /// Serve `bounties` on every fetch
    pub fn new(bounties: Vec<Bounty>) -> Self {
        Self {
            bounties,
            fail_status: None,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Fail every fetch with the given HTTP status
    pub fn failing(status: u16) -> Self {
        Self {
            bounties: Vec::new(),
            fail_status: Some(status),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BountySource for MockBountySource {
    async fn fetch_bounties(&self) -> Result<Vec<Bounty>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.fail_status {
            Some(status) => Err(ClaimError::RemoteService {
                status,
                body: "mock failure".to_string(),
            }),
            None => Ok(self.bounties.clone()),
        }
    }
}

/// Scripted response for one bounty
#[derive(Debug, Clone)]
pub enum MockClaim {
    /// Claim accepted, optional server message
    Accept(Option<String>),
    /// Claim rejected, optional server message
    Reject(Option<String>),
    /// Exchange failed before a result was produced
    TransportError(String),
}

/// Mock claim endpoint that records every request
///
/// Bounties without a scripted response are accepted.
#[derive(Default)]
pub struct MockClaimExecutor {
    responses: HashMap<BountyId, MockClaim>,
    requests: Mutex<Vec<ClaimRequest>>,
}

impl MockClaimExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, id: impl Into<BountyId>, response: MockClaim) -> Self {
        self.responses.insert(id.into(), response);
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<ClaimRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Bounty ids of the requests received so far
    pub fn requested_ids(&self) -> Vec<BountyId> {
        self.requests().into_iter().map(|r| r.bounty_id).collect()
    }
}

#[async_trait]
impl ClaimExecutor for MockClaimExecutor {
    async fn claim(&self, request: &ClaimRequest) -> Result<ClaimResult> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match self.responses.get(&request.bounty_id) {
            None => Ok(ClaimResult::from_response(true, None)),
            Some(MockClaim::Accept(message)) => {
                Ok(ClaimResult::from_response(true, message.clone()))
            }
            Some(MockClaim::Reject(message)) => {
                Ok(ClaimResult::from_response(false, message.clone()))
            }
            Some(MockClaim::TransportError(message)) => {
                Err(ClaimError::Transport(message.clone()))
            }
        }
    }
}
