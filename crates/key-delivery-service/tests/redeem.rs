//! Redemption integration tests.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::TestHarness;
use futures::future::join_all;
use serde_json::json;

use key_delivery_core::redemption::{
    INVALID_CODE_MESSAGE, NO_INVENTORY_MESSAGE, REDEEMED_MESSAGE,
};

async fn redeem(harness: &TestHarness, key: &str) -> serde_json::Value {
    let response = harness
        .server
        .post("/api/redeem-key")
        .json(&json!({ "key": key }))
        .await;
    response.assert_status_ok();
    response.json()
}

// ============================================================================
// Success
// ============================================================================

#[tokio::test]
async fn redeem_delivers_account_and_consumes_key() {
    let harness = TestHarness::new();
    harness.create_account("alice", "pw1").await;
    harness.create_key("A1").await;
    harness.create_key("A2").await;

    let body = redeem(&harness, "A1").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], REDEEMED_MESSAGE);
    assert_eq!(body["account"]["username"], "alice");
    assert_eq!(body["account"]["password"], "pw1");

    let remaining: Vec<_> = harness
        .list_keys()
        .await
        .iter()
        .map(|k| k["key_value"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(remaining, vec!["A2"]);

    // The account stays in the inventory.
    assert_eq!(harness.list_accounts().await.len(), 1);

    let again = redeem(&harness, "A1").await;
    assert_eq!(again["success"], false);
    assert_eq!(again["message"], INVALID_CODE_MESSAGE);
    assert!(again.get("account").is_none());
}

#[tokio::test]
async fn redeem_trims_submitted_key() {
    let harness = TestHarness::new();
    harness.create_account("alice", "pw1").await;
    harness.create_key("A1").await;

    let body = redeem(&harness, "  A1\n").await;

    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn redeem_delivers_an_inventory_account() {
    let harness = TestHarness::new();
    for i in 0..3 {
        harness.create_account(&format!("user{i}"), "pw").await;
    }
    let usernames: HashSet<String> = ["user0", "user1", "user2"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();

    for i in 0..6 {
        harness.create_key(&format!("K{i}")).await;
    }

    for i in 0..6 {
        let body = redeem(&harness, &format!("K{i}")).await;
        assert_eq!(body["success"], true);
        let username = body["account"]["username"].as_str().unwrap();
        assert!(usernames.contains(username));
    }

    assert!(harness.list_keys().await.is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn redeem_unknown_key_fails() {
    let harness = TestHarness::new();
    harness.create_account("alice", "pw1").await;

    let body = redeem(&harness, "XYZ").await;

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], INVALID_CODE_MESSAGE);
    assert!(body.get("account").is_none());
}

#[tokio::test]
async fn redeem_with_empty_inventory_keeps_key() {
    let harness = TestHarness::new();
    harness.create_key("K9").await;

    let body = redeem(&harness, "K9").await;

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], NO_INVENTORY_MESSAGE);
    assert_eq!(harness.list_keys().await.len(), 1);

    // Once stocked, the same key works.
    harness.create_account("alice", "pw1").await;
    let body = redeem(&harness, "K9").await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn redeem_blank_key_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/redeem-key")
        .json(&json!({ "key": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn redeem_without_key_field_is_bad_request() {
    let harness = TestHarness::new();
    harness.create_account("alice", "pw1").await;
    harness.create_key("A1").await;

    let response = harness
        .server
        .post("/api/redeem-key")
        .json(&json!({ "code": "A1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");
    assert_eq!(harness.list_keys().await.len(), 1);
}

#[tokio::test]
async fn redeem_with_non_json_body_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness.server.post("/api/redeem-key").text("A1").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn redeem_does_not_require_auth() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/redeem-key")
        .json(&json!({ "key": "nope" }))
        .await;

    response.assert_status_ok();
}

// ============================================================================
// Repeated Redemption
// ============================================================================

// Requests are driven from one task, so they complete one after another.
// Racing threads are covered by the store's redemption tests.
#[tokio::test]
async fn batch_of_redemptions_of_one_key_succeeds_once() {
    let harness = TestHarness::new();
    harness.create_account("alice", "pw1").await;
    harness.create_key("ONCE").await;

    let attempts = (0..10).map(|_| async {
        let response = harness
            .server
            .post("/api/redeem-key")
            .json(&json!({ "key": "ONCE" }))
            .await;
        response.json::<serde_json::Value>()
    });
    let results = join_all(attempts).await;

    let successes = results.iter().filter(|b| b["success"] == true).count();
    assert_eq!(successes, 1);
    for body in results.iter().filter(|b| b["success"] == false) {
        assert_eq!(body["message"], INVALID_CODE_MESSAGE);
    }
    assert!(harness.list_keys().await.is_empty());
}
