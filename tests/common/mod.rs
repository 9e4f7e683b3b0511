#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
}

#[derive(Clone)]
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

pub fn route(path: &'static str, status: u16, body: impl Into<String>) -> Route {
    Route {
        path,
        status,
        body: body.into(),
        delay: Duration::ZERO,
    }
}

impl Route {
    /// Holds the response back for `delay` after the request is recorded.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct BackendState {
    routes: Arc<Vec<Route>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockBackend {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// Nothing listens on port 1, so connections are refused immediately.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

async fn respond(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    let matched = state.routes.iter().find(|r| r.path == path).cloned();
    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path,
        body,
    });

    let Some(route) = matched else {
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"error":"not found"}"#,
        )
            .into_response();
    };
    if !route.delay.is_zero() {
        tokio::time::sleep(route.delay).await;
    }
    let status = StatusCode::from_u16(route.status).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], route.body).into_response()
}

/// Serves `routes` on a random local port until the test runtime shuts down.
/// Unknown paths get a 404.
pub async fn serve(routes: Vec<Route>) -> MockBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = BackendState {
        routes: Arc::new(routes),
        requests: requests.clone(),
    };
    let app = Router::new().fallback(respond).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        requests,
    }
}

pub fn deals_json(count: usize) -> String {
    let deals: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "timestamp": "2025-08-20T10:00:00",
                "perPerson": 100 + i,
                "total": 200 + 2 * i,
                "flight": {
                    "carrier": "Ryanair FR 4818",
                    "departure": "2025-09-15T06:30:00",
                    "arrival": "2025-09-15T09:15:00",
                },
                "hotel": { "name": format!("Hotel {i}"), "stars": 4, "board": "BB" }
            })
        })
        .collect();
    serde_json::json!({ "deals": deals }).to_string()
}
