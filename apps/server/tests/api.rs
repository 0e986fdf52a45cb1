use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use ovt_core::settings::AppSettings;
use ovt_server::{build_router, build_state};

fn test_settings() -> AppSettings {
    AppSettings {
        program_id: "ovt-test-program".to_string(),
        treasury_address: "tb1qtest0treasury".to_string(),
        arch_endpoint: "http://localhost:9002".to_string(),
        admin_wallets: (1..=5).map(|i| format!("admin-{}", i)).collect(),
        mock_mode: true,
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_and_seeded_fixtures_are_served() {
    let (state, tracker) = build_state(test_settings());
    let app = build_router(state);

    let response = app.clone().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/positions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let positions = json_body(response).await;
    assert!(positions.as_array().unwrap().len() >= 3);

    let response = app.oneshot(get("/api/transactions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let transactions = json_body(response).await;
    assert!(!transactions.as_array().unwrap().is_empty());

    tracker.shutdown().await;
}

#[tokio::test]
async fn multisig_mint_flow_over_the_wire() {
    let (state, tracker) = build_state(test_settings());
    let app = build_router(state);

    // Propose a mint action.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/actions",
            serde_json::json!({
                "kind": "mint_tokens",
                "description": "Mint 500k OVT",
                "payload": { "amount": 500_000 }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let action = json_body(response).await;
    let action_id = action["id"].as_str().unwrap().to_string();

    // A non-admin cannot sign.
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/actions/{}/sign", action_id),
            serde_json::json!({ "address": "stranger", "signature": "sig" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Executing before quorum is a conflict.
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/actions/{}/execute", action_id),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Two signatures keep the action collecting; the third makes it ready.
    for i in 1..=3 {
        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/actions/{}/sign", action_id),
                serde_json::json!({ "address": format!("admin-{}", i), "signature": "sig" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let status = json_body(response).await;
        let expected = if i < 3 { "COLLECTING" } else { "READY" };
        assert_eq!(status["state"], expected);
    }

    // Execute mints and records a transaction.
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/actions/{}/execute", action_id),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let transaction = json_body(response).await;
    assert_eq!(transaction["kind"], "mint");

    let response = app
        .oneshot(get("/api/transactions?kind=mint"))
        .await
        .unwrap();
    let mints = json_body(response).await;
    assert!(!mints.as_array().unwrap().is_empty());

    tracker.shutdown().await;
}

#[tokio::test]
async fn buy_and_sell_round_trip() {
    let (state, tracker) = build_state(test_settings());

    // Give the fund a NAV so tokens have a price.
    state.fund.update_nav(10_000_000).unwrap();
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/buy_ovt",
            serde_json::json!({
                "buyerAddress": "tb1qbuyer",
                "ovtAmount": 1_000,
                "paymentProof": "simulated-proof"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Empty proof is rejected.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/buy_ovt",
            serde_json::json!({ "buyerAddress": "tb1qbuyer", "ovtAmount": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/sell_ovt",
            serde_json::json!({
                "sellerAddress": "tb1qbuyer",
                "ovtAmount": 1_000,
                "btcAddress": "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json(
            "/api/verify_payment",
            serde_json::json!({ "paymentProof": "" }),
        ))
        .await
        .unwrap();
    let verdict = json_body(response).await;
    assert_eq!(verdict["valid"], false);

    tracker.shutdown().await;
}
