//! In-process stand-in for the ResRobot API, for tests.
//!
//! Serves a fixed `arrivalBoard.json` body on a loopback port and records
//! how often it was called and with which query parameters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;

/// A recorded arrival board for the reference stop.
pub(crate) const ARRIVAL_BOARD: &str = include_str!("../../fixtures/arrival_board.json");

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

/// Handle to a running mock upstream.
pub(crate) struct MockUpstream {
    /// Base URL to hand to `Config::with_base_url`.
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl MockUpstream {
    /// Serve `body` with status 200 and no delay.
    pub async fn serve(body: &'static str) -> Self {
        Self::serve_with(StatusCode::OK, body, Duration::ZERO).await
    }

    /// Serve `body` with the given status, after sleeping for `delay`.
    pub async fn serve_with(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let last_query = Arc::new(Mutex::new(None));
        let state = MockState {
            status,
            body,
            delay,
            hits: hits.clone(),
            last_query: last_query.clone(),
        };

        let app = Router::new()
            .route("/arrivalBoard.json", get(arrival_board))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            last_query,
        }
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Query parameters of the most recent request.
    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.last_query.lock().unwrap().clone()
    }
}

async fn arrival_board(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = Some(query);

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}
