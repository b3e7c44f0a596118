//! reqwest-backed marketplace client
//!
//! One request per call. No retries: a failed listing ends the run and a
//! failed claim is recorded by the pipeline, so retrying here would only risk
//! double claims.

use async_trait::async_trait;
use claimbot_core::{Bounty, ClaimError, ClaimRequest, ClaimResult, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::traits::{BountySource, ClaimExecutor};

/// Response body of the claim endpoint
#[derive(Debug, Deserialize)]
struct ClaimResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Marketplace client bound to one base URL
#[derive(Debug, Clone)]
pub struct BountyApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl BountyApiClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClaimError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(base_url, http))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bounties_url(&self) -> String {
        format!("{}/bounties", self.base_url)
    }

    fn claim_url(&self, request: &ClaimRequest) -> String {
        format!("{}/bounties/{}/claim", self.base_url, request.bounty_id)
    }
}

#[async_trait]
impl BountySource for BountyApiClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_bounties(&self) -> Result<Vec<Bounty>> {
        let response = self
            .http
            .get(self.bounties_url())
            .send()
            .await
            .map_err(|e| ClaimError::Transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            debug!("Bounty listing failed with {}: {}", status, body);
            return Err(ClaimError::RemoteService {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClaimError::Transport(format!("Failed to read response: {}", e)))?;

        let bounties: Vec<Bounty> = serde_json::from_str(&body)
            .map_err(|e| ClaimError::Decode(format!("Failed to parse bounty list: {}", e)))?;

        debug!("Fetched {} bounties", bounties.len());
        Ok(bounties)
    }
}

#[async_trait]
impl ClaimExecutor for BountyApiClient {
    #[instrument(skip(self, request), fields(bounty_id = %request.bounty_id))]
    async fn claim(&self, request: &ClaimRequest) -> Result<ClaimResult> {
        let response = self
            .http
            .post(self.claim_url(request))
            .json(request)
            .send()
            .await
            .map_err(|e| ClaimError::Transport(format!("Failed to send request: {}", e)))?;

        let success = response.status().is_success();
        let body = response
            .text()
            .await
            .map_err(|e| ClaimError::Transport(format!("Failed to read response: {}", e)))?;

        let parsed: ClaimResponse = serde_json::from_str(&body)
            .map_err(|e| ClaimError::Decode(format!("Failed to parse claim response: {}", e)))?;

        Ok(ClaimResult::from_response(success, parsed.message))
    }
}
