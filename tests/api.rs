//! In-process REST tests driving the full router with `tower::ServiceExt`.

#![allow(clippy::panic)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use pool_escrow::api::build_app;
use pool_escrow::api::caller::CALLER_HEADER;
use pool_escrow::app_state::AppState;
use pool_escrow::config::EscrowConfig;

fn app(faucet: bool) -> Router {
    let faucet = if faucet { "true" } else { "false" };
    let Ok(config) = EscrowConfig::from_lookup(|key| match key {
        "ASSET_FAUCET_ENABLED" => Some(faucet.to_string()),
        "CUSTODY_IDENTITY" => Some("custody".to_string()),
        _ => None,
    }) else {
        panic!("config should load");
    };
    build_app(AppState::from_config(&config))
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    caller: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(who) = caller {
        builder = builder.header(CALLER_HEADER, who);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("request should build");
    };
    let Ok(response) = app.clone().oneshot(request).await;
    let status = response.status();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body should be readable");
    };
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn mint_and_approve(app: &Router, who: &str, amount: u64) {
    let (status, _) = call(
        app,
        "POST",
        "/api/v1/asset/mint",
        None,
        Some(json!({ "to": who, "amount": amount.to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        app,
        "POST",
        "/api/v1/asset/approve",
        Some(who),
        Some(json!({ "amount": amount.to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn create(app: &Router, name: &str, validator: &str, caller: &str) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        "/api/v1/pools",
        Some(caller),
        Some(json!({ "name": name, "validator": validator })),
    )
    .await
}

async fn balance_of(app: &Router, who: &str) -> String {
    let uri = format!("/api/v1/asset/balances/{who}");
    let (status, body) = call(app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    body["balance"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app(false);
    let (status, body) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["pools"], 0);
}

#[tokio::test]
async fn full_pool_lifecycle() {
    let app = app(true);
    mint_and_approve(&app, "A", 100).await;
    mint_and_approve(&app, "B", 100).await;

    let (status, body) = create(&app, "p1", "V1", "C").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["validator"], "V1");
    assert_eq!(body["creator"], "C");
    assert_eq!(body["balance"], "0");

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/fund",
        Some("A"),
        Some(json!({ "amount": "25" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_balance"], "25");

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/fund",
        Some("B"),
        Some(json!({ "amount": "15" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_balance"], "40");

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/withdraw",
        Some("V1"),
        Some(json!({ "amount": "40" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_balance"], "0");
    assert_eq!(balance_of(&app, "V1").await, "40");

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/withdraw",
        Some("V1"),
        Some(json!({ "amount": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 4001);

    let (status, body) = call(&app, "GET", "/api/v1/pools/p1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["funded_total"], "40");
    assert_eq!(body["withdrawn_total"], "40");
}

#[tokio::test]
async fn missing_caller_is_unauthorized() {
    let app = app(false);
    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools",
        None,
        Some(json!({ "name": "p1", "validator": "V1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], 1003);
}

#[tokio::test]
async fn duplicate_create_conflicts_and_keeps_original() {
    let app = app(false);
    let (status, _) = create(&app, "p1", "V1", "C").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = create(&app, "p1", "V2", "D").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], 2002);

    let (_, body) = call(&app, "GET", "/api/v1/pools/p1", None, None).await;
    assert_eq!(body["validator"], "V1");
    assert_eq!(body["creator"], "C");
}

#[tokio::test]
async fn funding_unknown_pool_is_not_found() {
    let app = app(false);
    for amount in ["0", "1", "1000"] {
        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/pools/ghost/fund",
            Some("A"),
            Some(json!({ "amount": amount })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 2001);
    }
}

#[tokio::test]
async fn fund_without_allowance_is_rejected_without_credit() {
    let app = app(true);
    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/asset/mint",
        None,
        Some(json!({ "to": "A", "amount": "50" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let _ = create(&app, "p1", "V1", "C").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/fund",
        Some("A"),
        Some(json!({ "amount": "10" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 4002);

    let (_, body) = call(&app, "GET", "/api/v1/pools/p1", None, None).await;
    assert_eq!(body["balance"], "0");
    assert_eq!(balance_of(&app, "A").await, "50");
}

#[tokio::test]
async fn non_validator_withdraw_is_forbidden() {
    let app = app(true);
    mint_and_approve(&app, "A", 10).await;
    let _ = create(&app, "p1", "V1", "C").await;
    let _ = call(
        &app,
        "POST",
        "/api/v1/pools/p1/fund",
        Some("A"),
        Some(json!({ "amount": "10" })),
    )
    .await;

    for intruder in ["A", "C"] {
        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/pools/p1/withdraw",
            Some(intruder),
            Some(json!({ "amount": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], 2003);
    }

    let (_, body) = call(&app, "GET", "/api/v1/pools/p1", None, None).await;
    assert_eq!(body["balance"], "10");
}

#[tokio::test]
async fn validator_handover() {
    let app = app(true);
    mint_and_approve(&app, "A", 10).await;
    let _ = create(&app, "p1", "V1", "C").await;
    let _ = call(
        &app,
        "POST",
        "/api/v1/pools/p1/fund",
        Some("A"),
        Some(json!({ "amount": "10" })),
    )
    .await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/validator",
        Some("V1"),
        Some(json!({ "new_validator": "V2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous_validator"], "V1");
    assert_eq!(body["validator"], "V2");

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/validator",
        Some("V2"),
        Some(json!({ "new_validator": "V2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], 2004);

    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/withdraw",
        Some("V1"),
        Some(json!({ "amount": "10" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/withdraw",
        Some("V2"),
        Some(json!({ "amount": "10" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance_of(&app, "V2").await, "10");
}

#[tokio::test]
async fn invalid_amounts_are_bad_requests() {
    let app = app(false);
    let _ = create(&app, "p1", "V1", "C").await;
    for amount in ["0", "-5", "abc", ""] {
        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/pools/p1/fund",
            Some("A"),
            Some(json!({ "amount": amount })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {amount:?}");
        assert_eq!(body["error"]["code"], 1002);
    }
}

#[tokio::test]
async fn faucet_disabled_by_default() {
    let app = app(false);
    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/asset/mint",
        None,
        Some(json!({ "to": "A", "amount": "10" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], 3002);
}

#[tokio::test]
async fn list_pools_is_ordered_and_paginated() {
    let app = app(false);
    for name in ["charlie", "alpha", "bravo"] {
        let _ = create(&app, name, "V1", "C").await;
    }

    let (status, body) = call(&app, "GET", "/api/v1/pools?per_page=2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "alpha");
    assert_eq!(body["data"][1]["name"], "bravo");
    assert_eq!(body["pagination"]["total"], 3);

    let (_, body) = call(&app, "GET", "/api/v1/pools?page=2&per_page=2", None, None).await;
    assert_eq!(body["data"][0]["name"], "charlie");
}

#[tokio::test]
async fn escrow_asset_is_reported() {
    let app = app(false);
    let (status, body) = call(&app, "GET", "/config/escrow-asset", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["asset"], "USDC");
    assert_eq!(body["custody"], "custody");
    assert_eq!(body["faucet_enabled"], false);
}

#[tokio::test]
async fn padded_validator_on_create_is_normalized() {
    let app = app(true);
    mint_and_approve(&app, "A", 40).await;

    let (status, body) = create(&app, "p1", " V1 ", "C").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["validator"], "V1");

    let _ = call(
        &app,
        "POST",
        "/api/v1/pools/p1/fund",
        Some("A"),
        Some(json!({ "amount": "40" })),
    )
    .await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/withdraw",
        Some("V1"),
        Some(json!({ "amount": "40" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_balance"], "0");
    assert_eq!(balance_of(&app, "V1").await, "40");
}

#[tokio::test]
async fn padded_new_validator_can_still_withdraw() {
    let app = app(true);
    mint_and_approve(&app, "A", 40).await;
    let _ = create(&app, "p1", "V1", "C").await;
    let _ = call(
        &app,
        "POST",
        "/api/v1/pools/p1/fund",
        Some("A"),
        Some(json!({ "amount": "40" })),
    )
    .await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/validator",
        Some("V1"),
        Some(json!({ "new_validator": "V2 " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validator"], "V2");

    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/withdraw",
        Some("V2 "),
        Some(json!({ "amount": "40" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance_of(&app, "V2").await, "40");
}

#[tokio::test]
async fn padded_self_handover_is_a_no_op() {
    let app = app(false);
    let _ = create(&app, "p1", "V1", "C").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/pools/p1/validator",
        Some("V1"),
        Some(json!({ "new_validator": " V1 " })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], 2004);
}
