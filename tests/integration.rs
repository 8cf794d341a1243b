//! End-to-end tests for the expense service API.
//!
//! This test suite drives the router the way a client would:
//! - User registration and login
//! - Equal, exact and percentage expense creation
//! - Expense lookup and per-user allocations
//! - Balance sheet export
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use expense_engine::api::{AppState, create_router};
use expense_engine::config::ConfigLoader;
use expense_engine::store::MemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::from_lookup(|key| match key {
        "EXPENSE_ENGINE_TOKEN_SECRET" => Some("integration-secret".to_string()),
        _ => None,
    })
    .expect("Failed to build config")
    .into_config();
    create_router(AppState::from_config(&config, MemoryStore::new()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn amounts(expense: &Value) -> Vec<Decimal> {
    expense["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| decimal(p["amount"].as_str().unwrap()))
        .collect()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

async fn send_json(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(router, request).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send_json(router, request).await
}

async fn get_json(router: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    send_json(router, builder.body(Body::empty()).unwrap()).await
}

async fn register(router: &Router, email: &str, name: &str) -> u64 {
    let (status, user) = post_json(
        router,
        "/users",
        json!({
            "email": email,
            "name": name,
            "mobile_number": "1234567890",
            "password": "testpassword"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {}", user);
    user["id"].as_u64().unwrap()
}

async fn login(router: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let form = format!(
        "username={}&password={}",
        email.replace('@', "%40"),
        password
    );
    let request = Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    send_json(router, request).await
}

fn create_expense(
    description: &str,
    total_amount: &str,
    split_policy: &str,
    creator_id: u64,
    participants: Vec<Value>,
) -> Value {
    json!({
        "description": description,
        "total_amount": total_amount,
        "date": "2024-07-01",
        "split_policy": split_policy,
        "creator_id": creator_id,
        "participants": participants
    })
}

async fn three_users(router: &Router) -> [u64; 3] {
    [
        register(router, "alice@example.com", "Alice").await,
        register(router, "bob@example.com", "Bob").await,
        register(router, "carol@example.com", "Carol").await,
    ]
}

// =============================================================================
// Users and Authentication
// =============================================================================

#[tokio::test]
async fn test_register_login_and_current_user() {
    let router = create_router_for_test();
    let id = register(&router, "testuser@example.com", "Test User").await;
    assert_eq!(id, 1);

    let (status, token) = login(&router, "testuser@example.com", "testpassword").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "bearer");
    let access_token = token["access_token"].as_str().unwrap();

    let (status, me) = get_json(&router, "/auth/current_user", Some(access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["username"], "testuser@example.com");
    assert_eq!(me["user"]["id"], 1);
}

#[tokio::test]
async fn test_login_with_wrong_password_returns_401() {
    let router = create_router_for_test();
    register(&router, "testuser@example.com", "Test User").await;

    let request = Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("username=testuser%40example.com&password=wrong"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_get_user_by_email_requires_token() {
    let router = create_router_for_test();
    register(&router, "testuser@example.com", "Test User").await;

    let (status, _) = get_json(&router, "/users/testuser@example.com", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get_json(&router, "/users/testuser@example.com", Some("forged.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, token) = login(&router, "testuser@example.com", "testpassword").await;
    let access_token = token["access_token"].as_str().unwrap();

    let (status, user) = get_json(&router, "/users/testuser@example.com", Some(access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Test User");
    assert_eq!(user["mobile_number"], "1234567890");

    let (status, error) = get_json(&router, "/users/nobody@example.com", Some(access_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_mobile_number_rejected() {
    let router = create_router_for_test();
    let (status, error) = post_json(
        &router,
        "/users",
        json!({
            "email": "testuser@example.com",
            "name": "Test User",
            "mobile_number": "12345",
            "password": "testpassword"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_USER");
}

// =============================================================================
// Expense Scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_a_equal_split() {
    let router = create_router_for_test();
    let [alice, bob, carol] = three_users(&router).await;

    let (status, expense) = post_json(
        &router,
        "/expenses",
        create_expense(
            "Hotel",
            "3000",
            "EQUAL",
            alice,
            vec![
                json!({"user_id": alice}),
                json!({"user_id": bob}),
                json!({"user_id": carol}),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(expense["creator"]["name"], "Alice");
    assert_eq!(amounts(&expense), vec![decimal("1000"); 3]);
    let ids: Vec<_> = expense["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["user_id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![alice, bob, carol]);
}

#[tokio::test]
async fn test_scenario_b_exact_split() {
    let router = create_router_for_test();
    let [alice, bob, carol] = three_users(&router).await;
    let participants = vec![
        json!({"user_id": alice, "amount": "799"}),
        json!({"user_id": bob, "amount": "2000"}),
        json!({"user_id": carol, "amount": "1500"}),
    ];

    let (status, expense) = post_json(
        &router,
        "/expenses",
        create_expense("Flights", "4299", "EXACT", alice, participants.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        amounts(&expense),
        vec![decimal("799"), decimal("2000"), decimal("1500")]
    );

    let (status, error) = post_json(
        &router,
        "/expenses",
        create_expense("Flights", "4300", "EXACT", alice, participants),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "TOTAL_AMOUNT_MISMATCH");
    assert_eq!(error["details"], "expected 4300, got 4299");
}

#[tokio::test]
async fn test_scenario_c_percentage_split() {
    let router = create_router_for_test();
    let [alice, bob, carol] = three_users(&router).await;

    let (status, expense) = post_json(
        &router,
        "/expenses",
        create_expense(
            "Rent",
            "4000",
            "PERCENTAGE",
            bob,
            vec![
                json!({"user_id": alice, "percentage": 50}),
                json!({"user_id": bob, "percentage": 25}),
                json!({"user_id": carol, "percentage": 25}),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        amounts(&expense),
        vec![decimal("2000"), decimal("1000"), decimal("1000")]
    );
    assert_eq!(
        decimal(expense["participants"][0]["percentage"].as_str().unwrap()),
        decimal("50")
    );

    let (status, error) = post_json(
        &router,
        "/expenses",
        create_expense(
            "Rent",
            "4000",
            "PERCENTAGE",
            bob,
            vec![
                json!({"user_id": alice, "percentage": 40}),
                json!({"user_id": bob, "percentage": 30}),
                json!({"user_id": carol, "percentage": 20}),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "TOTAL_PERCENTAGE_MISMATCH");

    // 40 + 30 + 30 is a complete split and must be accepted
    let (status, expense) = post_json(
        &router,
        "/expenses",
        create_expense(
            "Rent",
            "4000",
            "PERCENTAGE",
            bob,
            vec![
                json!({"user_id": alice, "percentage": 40}),
                json!({"user_id": bob, "percentage": 30}),
                json!({"user_id": carol, "percentage": 30}),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        amounts(&expense),
        vec![decimal("1600"), decimal("1200"), decimal("1200")]
    );
    let percentages: Vec<Decimal> = expense["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| decimal(p["percentage"].as_str().unwrap()))
        .collect();
    assert_eq!(
        percentages,
        vec![decimal("40"), decimal("30"), decimal("30")]
    );
}

#[tokio::test]
async fn test_lower_case_split_policy_rejected() {
    let router = create_router_for_test();
    let [alice, bob, _] = three_users(&router).await;

    let (status, error) = post_json(
        &router,
        "/expenses",
        create_expense(
            "Dinner",
            "100",
            "equal",
            alice,
            vec![json!({"user_id": alice}), json!({"user_id": bob})],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "UNKNOWN_SPLIT_POLICY");
}

#[tokio::test]
async fn test_exact_participant_without_amount_rejected() {
    let router = create_router_for_test();
    let (status, error) = post_json(
        &router,
        "/expenses",
        create_expense(
            "Lunch",
            "20",
            "EXACT",
            1,
            vec![json!({"user_id": 1, "amount": 20}), json!({"user_id": 2})],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PARTICIPANT");
}

#[tokio::test]
async fn test_legacy_split_type_field_accepted() {
    let router = create_router_for_test();
    let (status, expense) = post_json(
        &router,
        "/expenses",
        json!({
            "description": "Test Expense",
            "total_amount": 100,
            "date": "2024-07-01",
            "split_type": "EQUAL",
            "creator_id": 1,
            "participants": [{"user_id": 1}]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(expense["description"], "Test Expense");
    assert_eq!(decimal(expense["total_amount"].as_str().unwrap()), decimal("100"));
}

// =============================================================================
// Lookups and Export
// =============================================================================

#[tokio::test]
async fn test_get_expense_and_user_allocations() {
    let router = create_router_for_test();
    let [alice, bob, _] = three_users(&router).await;

    post_json(
        &router,
        "/expenses",
        create_expense(
            "Dinner",
            "90",
            "EQUAL",
            alice,
            vec![json!({"user_id": alice}), json!({"user_id": bob})],
        ),
    )
    .await;
    post_json(
        &router,
        "/expenses",
        create_expense(
            "Taxi",
            "30",
            "EXACT",
            bob,
            vec![json!({"user_id": bob, "amount": 30})],
        ),
    )
    .await;

    let (status, expense) = get_json(&router, "/expenses/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(expense["description"], "Dinner");

    let (status, _) = get_json(&router, "/expenses/20", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, rows) = get_json(&router, &format!("/expenses/user/{}", bob), None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(decimal(rows[0]["amount"].as_str().unwrap()), decimal("45"));
    assert_eq!(decimal(rows[1]["amount"].as_str().unwrap()), decimal("30"));
}

#[tokio::test]
async fn test_balance_sheet_lists_every_participant() {
    let router = create_router_for_test();
    let [alice, bob, carol] = three_users(&router).await;

    post_json(
        &router,
        "/expenses",
        create_expense(
            "Groceries",
            "60",
            "PERCENTAGE",
            carol,
            vec![
                json!({"user_id": alice, "percentage": 50}),
                json!({"user_id": bob, "percentage": 50}),
            ],
        ),
    )
    .await;

    let request = Request::builder()
        .uri("/expenses/balance-sheet")
        .body(Body::empty())
        .unwrap();
    let (status, csv) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);

    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Expense Description,Expense Amount,Creator Name,Participant Name,Participant Amount Owed"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Groceries,60,Carol,Alice,"));
    assert!(lines[2].starts_with("Groceries,60,Carol,Bob,"));
    let owed = lines[2].rsplit(',').next().unwrap();
    assert_eq!(decimal(owed), decimal("30"));
}
