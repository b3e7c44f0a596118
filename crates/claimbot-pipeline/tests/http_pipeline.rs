//! End-to-end runs against a mock marketplace
//!
//! Covers the full path from HTTP listing to run outputs:
//! - Batch bounding and per-item failure isolation
//! - Dry runs and empty matches never touching the claim endpoint
//! - Listing failures aborting the run

use claimbot_client::BountyApiClient;
use claimbot_core::{BountyId, ClaimConfig, ClaimError, FilterCriteria};
use claimbot_pipeline::{ClaimPipeline, OutputTarget, RunOutputs};
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::time::Duration;

/// Helper to build a pipeline pointed at the mock server
fn pipeline_for(
    server: &MockServer,
    config: ClaimConfig,
) -> ClaimPipeline<BountyApiClient, BountyApiClient> {
    let config = config
        .with_api_url(server.base_url())
        .with_claim_delay(Duration::ZERO);
    let client =
        BountyApiClient::new(&config.api_url, Duration::from_secs(5)).expect("client builds");
    ClaimPipeline::new(client.clone(), client, config)
}

/// Three open rust bounties worth 5 USDC each
fn listing() -> Value {
    json!([
        { "id": 1, "title": "A", "status": "open", "reward": "5000000", "tags": ["rust"] },
        { "id": 2, "title": "B", "status": "open", "reward": "5000000", "tags": ["Rust"] },
        { "id": 3, "title": "C", "status": "open", "reward": "5000000", "tags": ["rust", "cli"] },
        { "id": 4, "title": "D", "status": "claimed", "reward": "9000000", "tags": ["rust"] }
    ])
}

#[tokio::test]
async fn test_claims_first_n_and_skips_the_rest() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/bounties");
            then.status(200).json_body(listing());
        })
        .await;
    let claim_a = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/bounties/1/claim")
                .json_body(json!({ "wallet": "0xwallet" }));
            then.status(200).json_body(json!({ "message": "ok" }));
        })
        .await;
    let claim_b = server
        .mock_async(|when, then| {
            when.method(POST).path("/bounties/2/claim");
            then.status(200).json_body(json!({}));
        })
        .await;
    let claim_c = server
        .mock_async(|when, then| {
            when.method(POST).path("/bounties/3/claim");
            then.status(200).json_body(json!({}));
        })
        .await;

    let pipeline = pipeline_for(&server, ClaimConfig::new("0xwallet").with_max_claims(2));
    let result = pipeline.run().await.unwrap();

    assert_eq!(result.matched_count, 3);
    assert_eq!(result.claimed_ids, vec![BountyId::Number(1), BountyId::Number(2)]);
    claim_a.assert_hits_async(1).await;
    claim_b.assert_hits_async(1).await;
    claim_c.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_first_claim_fails_second_succeeds() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/bounties");
            then.status(200).json_body(listing());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/bounties/1/claim");
            then.status(409).json_body(json!({ "message": "Already claimed" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/bounties/2/claim");
            then.status(200).json_body(json!({ "message": "Claimed!" }));
        })
        .await;

    let pipeline = pipeline_for(&server, ClaimConfig::new("0xwallet").with_max_claims(2));
    let result = pipeline.run().await.unwrap();

    assert_eq!(result.claimed_ids, vec![BountyId::Number(2)]);
    assert_eq!(result.claimed_count(), 1);

    let outputs = RunOutputs::from_result(&result).unwrap();
    assert_eq!(outputs.claimed_ids, "[2]");
    assert_eq!(outputs.matched_count, 3);
}

#[tokio::test]
async fn test_dry_run_does_not_touch_claim_endpoint() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/bounties");
            then.status(200).json_body(listing());
        })
        .await;
    let claims = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({}));
        })
        .await;

    let pipeline = pipeline_for(
        &server,
        ClaimConfig::new("0xwallet")
            .with_max_claims(3)
            .with_dry_run(true),
    );
    let result = pipeline.run().await.unwrap();

    assert_eq!(result.matched_count, 3);
    assert_eq!(result.claimed_count(), 0);
    assert_eq!(RunOutputs::from_result(&result).unwrap().claimed_ids, "[]");
    claims.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_empty_match_does_not_touch_claim_endpoint() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/bounties");
            then.status(200).json_body(listing());
        })
        .await;
    let claims = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({}));
        })
        .await;

    let pipeline = pipeline_for(
        &server,
        ClaimConfig::new("0xwallet").with_criteria(FilterCriteria::new("python", 0.0)),
    );
    let result = pipeline.run().await.unwrap();

    assert_eq!(result.matched_count, 0);
    assert!(result.claimed_ids.is_empty());
    claims.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_listing_server_error_fails_run() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/bounties");
            then.status(500);
        })
        .await;
    let claims = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({}));
        })
        .await;

    let pipeline = pipeline_for(&server, ClaimConfig::new("0xwallet"));
    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, ClaimError::RemoteService { status: 500, .. }));
    claims.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_outputs_written_to_workflow_file() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/bounties");
            then.status(200).json_body(listing());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/bounties/1/claim");
            then.status(200).json_body(json!({}));
        })
        .await;

    let pipeline = pipeline_for(&server, ClaimConfig::new("0xwallet"));
    let result = pipeline.run().await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output");
    RunOutputs::from_result(&result)
        .unwrap()
        .write(&OutputTarget::File(path.clone()))
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "matched_count=3\nclaimed_count=1\nclaimed_ids=[1]\n");
}
