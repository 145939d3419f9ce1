//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, warn};

use crate::board::{BoardError, Severity, fetch_board};
use crate::domain::{ClassifiedBoard, ScheduledArrival};

use super::state::AppState;

/// Create the application router.
///
/// Static assets are served from `config.static_dir` under `/static`, with
/// the prefix stripped.
pub fn create_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);
    let request_timeout = state.config.request_timeout();

    Router::new()
        .route("/halltider", get(halltider))
        .route("/health", get(health))
        .nest_service("/static", static_dir)
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current arrivals at the stop, split by direction.
///
/// Every request fetches the board afresh. Arrivals whose scheduled time
/// does not parse are logged and left out; the rest are still returned.
async fn halltider(State(state): State<AppState>) -> Result<Json<ClassifiedBoard>, AppError> {
    let mut board = fetch_board(&state.client, &state.origins).await?;

    board.retain(|arrival| match ScheduledArrival::of(arrival) {
        Ok(_) => true,
        Err(e) => {
            warn!(
                line = %arrival.transport_number,
                origin = %arrival.origin,
                error = %e,
                "dropping arrival with unparseable schedule"
            );
            false
        }
    });

    Ok(Json(board))
}

/// Application error type.
///
/// Responses carry the status only; the details go to the log.
#[derive(Debug)]
pub enum AppError {
    GatewayTimeout { message: String },
    BadGateway { message: String },
    /// A record-level error that reached the response unhandled. The board
    /// handler drops such records itself, so this only fires for a handler
    /// that propagates a `BoardError::Schedule` with `?`.
    Internal { message: String },
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        let message = e.to_string();
        match e.severity() {
            Severity::Request if e.is_timeout() => AppError::GatewayTimeout { message },
            Severity::Request => AppError::BadGateway { message },
            Severity::Record => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::GatewayTimeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(status = status.as_u16(), "{message}");

        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Config;
    use crate::domain::OriginTable;
    use crate::resrobot::mock::{ARRIVAL_BOARD, MockUpstream};
    use crate::resrobot::{ResRobotClient, ResRobotError};

    /// Two inbound arrivals, the first with a broken time.
    const BAD_TIME_BOARD: &str = r#"{"Arrival": [
        {"origin": "Spånga station (Stockholm kn)", "transportNumber": "117",
         "date": "2024-01-01", "time": "soon"},
        {"origin": "Blackebergs gård (Stockholm kn)", "transportNumber": "509",
         "date": "2024-01-01", "time": "14:40:00"}
    ]}"#;

    async fn spawn_app(config: Config) -> String {
        let client = ResRobotClient::new(&config).unwrap();
        let app = create_router(AppState::new(client, OriginTable::standard(), config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn config_for(upstream: &MockUpstream) -> Config {
        Config::new("test-key").with_base_url(&upstream.base_url)
    }

    #[tokio::test]
    async fn halltider_returns_both_buckets() {
        let upstream = MockUpstream::serve(ARRIVAL_BOARD).await;
        let base = spawn_app(config_for(&upstream)).await;

        let response = reqwest::get(format!("{base}/halltider")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.unwrap();
        let inbound = body["arrivalsInToCity"].as_array().unwrap();
        let outbound = body["arrivalsOutOfCity"].as_array().unwrap();
        assert_eq!(inbound.len(), 2);
        assert_eq!(outbound.len(), 3);

        // Full records, not the console summary
        assert_eq!(inbound[0]["origin"], "Spånga station (Stockholm kn)");
        assert_eq!(inbound[0]["Product"]["operator"], "SL");
        assert_eq!(inbound[0]["Stops"]["Stop"].as_array().unwrap().len(), 2);
        assert_eq!(outbound[2]["origin"], "Tritonvägen (Sundbyberg kn)");
    }

    #[tokio::test]
    async fn response_parses_back_into_board() {
        let upstream = MockUpstream::serve(ARRIVAL_BOARD).await;
        let base = spawn_app(config_for(&upstream)).await;

        let board: ClassifiedBoard = reqwest::get(format!("{base}/halltider"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let client = ResRobotClient::new(&config_for(&upstream)).unwrap();
        let expected = fetch_board(&client, &OriginTable::standard()).await.unwrap();
        assert_eq!(board, expected);
    }

    #[tokio::test]
    async fn concurrent_requests_fetch_independently() {
        let upstream =
            MockUpstream::serve_with(StatusCode::OK, ARRIVAL_BOARD, Duration::from_millis(100))
                .await;
        let base = spawn_app(config_for(&upstream)).await;
        let url = format!("{base}/halltider");

        let (a, b) = tokio::join!(reqwest::get(&url), reqwest::get(&url));
        assert_eq!(a.unwrap().status(), reqwest::StatusCode::OK);
        assert_eq!(b.unwrap().status(), reqwest::StatusCode::OK);
        assert_eq!(upstream.hits(), 2);
    }

    #[tokio::test]
    async fn upstream_timeout_is_empty_504() {
        let upstream =
            MockUpstream::serve_with(StatusCode::OK, ARRIVAL_BOARD, Duration::from_secs(5)).await;
        let config = config_for(&upstream).with_timeout(Duration::from_millis(200));
        let base = spawn_app(config).await;

        let response = reqwest::get(format!("{base}/halltider")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::GATEWAY_TIMEOUT);
        assert!(response.bytes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_timeout_does_not_preempt_upstream_timeout() {
        // Both limits scaled down; the server limit only just outlasts upstream
        let upstream =
            MockUpstream::serve_with(StatusCode::OK, ARRIVAL_BOARD, Duration::from_secs(2)).await;
        let config = config_for(&upstream)
            .with_timeout(Duration::from_millis(200))
            .with_request_margin(Duration::from_millis(50));
        let base = spawn_app(config).await;

        let response = reqwest::get(format!("{base}/halltider")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::GATEWAY_TIMEOUT);
        assert!(response.bytes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_upstream_is_empty_502() {
        let upstream = MockUpstream::serve(r#"{"errorCode":"API_AUTH"}"#).await;
        let base = spawn_app(config_for(&upstream)).await;

        let response = reqwest::get(format!("{base}/halltider")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
        assert!(response.bytes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_time_drops_only_that_arrival() {
        let upstream = MockUpstream::serve(BAD_TIME_BOARD).await;
        let base = spawn_app(config_for(&upstream)).await;

        let board: ClassifiedBoard = reqwest::get(format!("{base}/halltider"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(board.arrivals_in_to_city.len(), 1);
        assert_eq!(board.arrivals_in_to_city[0].transport_number, "509");
        assert!(board.arrivals_out_of_city.is_empty());
    }

    #[tokio::test]
    async fn static_files_served_without_prefix() {
        let upstream = MockUpstream::serve(ARRIVAL_BOARD).await;
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Hålltider</h1>").unwrap();
        let base = spawn_app(config_for(&upstream).with_static_dir(dir.path())).await;

        let response = reqwest::get(format!("{base}/static/index.html")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "<h1>Hålltider</h1>");

        let missing = reqwest::get(format!("{base}/static/nope.css")).await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn health_check() {
        let upstream = MockUpstream::serve(ARRIVAL_BOARD).await;
        let base = spawn_app(config_for(&upstream)).await;

        let response = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[test]
    fn app_error_from_board_error() {
        let err = AppError::from(BoardError::from(ResRobotError::Timeout(
            Duration::from_secs(20),
        )));
        assert!(matches!(err, AppError::GatewayTimeout { .. }));

        let err = AppError::from(BoardError::from(ResRobotError::Json {
            message: "expected value".into(),
            body: None,
        }));
        assert!(matches!(err, AppError::BadGateway { .. }));

        let schedule = ScheduledArrival::parse("2024-01-01", "soon").unwrap_err();
        let err = AppError::from(BoardError::from(schedule));
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn app_error_response_has_no_body() {
        let response = AppError::BadGateway {
            message: "upstream broke".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
