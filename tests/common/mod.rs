//! In-process stand-in for the ticketing API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const TOKEN: &str = "T1";
pub const PASSWORD: &str = "x";

#[derive(Default)]
pub struct MockApi {
    hits: Mutex<Vec<String>>,
    /// Overrides the whole `GET /events` body when set.
    events_body: Mutex<Option<Value>>,
    available: Mutex<u32>,
    /// Number of upcoming `GET /events` calls that answer 503.
    events_outages: Mutex<u32>,
    reject_purchase: Mutex<Option<String>>,
}

pub type Shared = Arc<MockApi>;

impl MockApi {
    pub fn new() -> Shared {
        Arc::new(MockApi {
            available: Mutex::new(500),
            ..MockApi::default()
        })
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.lock().unwrap().len()
    }

    pub fn set_events_body(&self, body: Value) {
        *self.events_body.lock().unwrap() = Some(body);
    }

    pub fn fail_next_event_loads(&self, count: u32) {
        *self.events_outages.lock().unwrap() = count;
    }

    pub fn reject_purchases_with(&self, message: &str) {
        *self.reject_purchase.lock().unwrap() = Some(message.to_string());
    }

    fn record(&self, entry: impl Into<String>) {
        self.hits.lock().unwrap().push(entry.into());
    }

    fn event(&self) -> Value {
        json!({
            "id": "1",
            "title": "Summer Music Festival 2025",
            "description": "The biggest music festival of the year.",
            "event_date": "2025-07-15T18:00:00Z",
            "venue": "Ice BSD, Tangerang",
            "ticket_price": 150000,
            "total_tickets": 1000,
            "available_tickets": *self.available.lock().unwrap(),
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        })
    }
}

pub fn user_json() -> Value {
    json!({"id": "1", "email": "a@b.com", "name": "A", "role": "user"})
}

fn fail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"success": false, "error": message})))
}

fn ok(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({"success": true, "data": data})))
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn login(State(api): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    api.record("POST /auth/login");
    if body["email"] == "a@b.com" && body["password"] == PASSWORD {
        ok(json!({"token": TOKEN, "user": user_json()}))
    } else {
        fail(StatusCode::UNAUTHORIZED, "invalid credentials")
    }
}

async fn register(State(api): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    api.record("POST /auth/register");
    if body["email"] == "taken@b.com" {
        return fail(StatusCode::BAD_REQUEST, "email already registered");
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "token": TOKEN,
                "user": {"id": "2", "email": body["email"], "name": "", "role": "user"}
            }
        })),
    )
}

async fn me(State(api): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    api.record("GET /users/me");
    if authorized(&headers) {
        ok(user_json())
    } else {
        fail(StatusCode::UNAUTHORIZED, "invalid or expired token")
    }
}

async fn events(
    State(api): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let mut entry = "GET /events".to_string();
    if let (Some(page), Some(size)) = (query.get("page"), query.get("page_size")) {
        entry.push_str(&format!("?page={page}&page_size={size}"));
    }
    api.record(entry);

    {
        let mut outages = api.events_outages.lock().unwrap();
        if *outages > 0 {
            *outages -= 1;
            return fail(StatusCode::SERVICE_UNAVAILABLE, "service unavailable");
        }
    }
    if let Some(body) = api.events_body.lock().unwrap().clone() {
        return (StatusCode::OK, Json(body));
    }
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    ok(json!({"events": [api.event()], "total": 1, "page": page}))
}

async fn event_by_id(State(api): State<Shared>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    api.record(format!("GET /events/{id}"));
    match id.as_str() {
        "1" => ok(json!({"event": api.event()})),
        "missing" => ok(json!({})),
        _ => fail(StatusCode::NOT_FOUND, "event not found"),
    }
}

async fn purchase(
    State(api): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    api.record("POST /tickets/purchase");
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "invalid or expired token");
    }
    if let Some(message) = api.reject_purchase.lock().unwrap().clone() {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, &message);
    }

    let quantity = body["quantity"].as_u64().unwrap_or(0) as u32;
    let mut available = api.available.lock().unwrap();
    if quantity > *available {
        return fail(StatusCode::BAD_REQUEST, "not enough tickets available");
    }
    *available -= quantity;

    ok(json!({
        "order_id": "ord-1",
        "transaction_id": "tx-1",
        "status": "confirmed",
        "message": "Enjoy the show"
    }))
}

async fn my_orders(State(api): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    api.record("GET /tickets/my-orders");
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "invalid or expired token");
    }
    ok(json!({
        "orders": [{
            "id": "ord-1",
            "event_id": "1",
            "user_id": "1",
            "quantity": 2,
            "total_price": 300000,
            "status": "confirmed",
            "created_at": "2025-07-01T09:30:00Z",
            "updated_at": "2025-07-01T09:30:00Z"
        }],
        "total": 1
    }))
}

pub fn router(api: Shared) -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/users/me", get(me))
        .route("/api/v1/events", get(events))
        .route("/api/v1/events/:id", get(event_by_id))
        .route("/api/v1/tickets/purchase", post(purchase))
        .route("/api/v1/tickets/my-orders", get(my_orders))
        .with_state(api)
}

/// Starts the mock on an ephemeral port and returns its API base URL.
pub async fn spawn(api: Shared) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(api)).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}
