//! Shared fixtures: response builders and an in-process plan service.

#![allow(dead_code)]

use axum::extract::{Json, State};
use axum::http::{StatusCode, header};
use axum::routing::post;
use axum::Router;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Build a course as the plan service would return it.
pub fn make_course(name: &str, day: &str, period: u8, credits: u32) -> Value {
    json!({
        "id": format!("C-{name}"),
        "name": name,
        "credits": credits,
        "day": day,
        "period": period,
        "type": "選択",
        "reason": format!("{name} fits the requested slots"),
    })
}

pub fn make_pattern(name: &str, courses: Vec<Value>) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "courses": courses,
        "expected_workload": "中",
        "estimated_gpa": 3.1,
    })
}

pub fn make_response(patterns: Vec<Value>, reasoning: &str) -> Value {
    json!({ "patterns": patterns, "reasoning": reasoning })
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Arc<String>,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// A running fake plan service that records every request body it receives.
pub struct MockPlanService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockPlanService {
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn generate_plan(
    State(state): State<MockState>,
    Json(request): Json<Value>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.requests.lock().unwrap().push(request);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.as_ref().clone(),
    )
}

/// Serve `body` with `status` on `POST /api/generate-plan` at a random local port.
pub async fn spawn_plan_service(status: StatusCode, body: impl Into<String>) -> MockPlanService {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body: Arc::new(body.into()),
        requests: requests.clone(),
    };
    let router = Router::new()
        .route("/api/generate-plan", post(generate_plan))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock plan service");
    let addr = listener.local_addr().expect("mock service has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("mock plan service crashed");
    });

    MockPlanService {
        base_url: format!("http://{addr}"),
        requests,
    }
}
