//! Route handlers.
//!
//! Handlers only translate between HTTP and the ports; verification lives in
//! `miniapp-auth`, delivery behind [`MessageSender`](crate::ports::MessageSender).

use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::{
    ApiResponse, EndpointInfo, HealthResponse, InfoResponse, InitRequest, MessageRequest,
    UserDataQuery, UserDataResponse, UserRecord,
};
use crate::service::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use miniapp_auth::AuthError;
use serde_json::json;
use tracing::{debug, error, info, warn};

/// Name reported by `/health` and `/api/info`
pub const SERVICE_NAME: &str = "Telegram Mini App API";

/// Web framework reported by `/` and `/api/info`
pub const FRAMEWORK: &str = "axum";

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Unix time in fractional seconds
fn unix_timestamp() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// `GET /`: the configured index page, or a JSON status document.
pub async fn root(State(state): State<AppState>) -> Response {
    if let Some(path) = &state.config.features.index_page {
        match tokio::fs::read_to_string(path).await {
            Ok(html) => return Html(html).into_response(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Index page unavailable, serving status");
            }
        }
    }

    Json(json!({
        "message": "🚀 Telegram Mini App API is running!",
        "status": "active",
        "framework": FRAMEWORK,
        "timestamp": unix_timestamp(),
    }))
    .into_response()
}

/// `POST /api/init`: verify init data and return the embedded user.
pub async fn init_app(
    State(state): State<AppState>,
    payload: Result<Json<InitRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let Json(request) = payload?;

    let authenticated = request
        .init_data
        .parse()
        .map_err(AuthError::from)
        .and_then(|init_data| state.verifier.authenticate(&init_data));

    match authenticated {
        Ok(user) => {
            state.metrics.record_init_accepted();
            info!(user_id = %user["id"], "Mini App initialized");
            Ok(Json(ApiResponse::ok(
                "Mini App initialized successfully",
                json!({ "user": user }),
            )))
        }
        Err(AuthError::Invalid(reason)) => {
            state.metrics.record_init_rejected();
            debug!(%reason, "Init data rejected");
            Err(ApiError::auth_invalid())
        }
        Err(AuthError::Decode(e)) => {
            state.metrics.record_init_decode_error();
            error!(error = %e, "Verified init data carries an undecodable user");
            Err(ApiError::decode(e))
        }
    }
}

/// `POST /api/send-message`: hand the text to the configured sender.
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse>> {
    let Json(request) = payload?;

    if let Err(e) = state
        .sender
        .send_message(request.chat_id, &request.message)
        .await
    {
        state.metrics.record_message(false);
        warn!(chat_id = request.chat_id, error = %e, "Message delivery failed");
        return Err(ApiError::upstream(e));
    }

    state.metrics.record_message(true);
    Ok(Json(ApiResponse::ok(
        "Message sent successfully",
        json!({ "chat_id": request.chat_id, "message": request.message }),
    )))
}

/// `GET /api/user-data`: echo the query back as a user record.
pub async fn user_data(
    query: Result<Query<UserDataQuery>, QueryRejection>,
) -> ApiResult<Json<UserDataResponse>> {
    let Query(query) = query?;
    Ok(Json(UserDataResponse {
        success: true,
        user: UserRecord::from(query),
    }))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: unix_timestamp(),
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
    })
}

/// `GET /api/info`: describe the routes this instance serves.
pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    let features = &state.config.features;

    let mut endpoints = vec![
        EndpointInfo::new("GET", "/", "Main Mini App interface"),
        EndpointInfo::new("POST", "/api/init", "Initialize Mini App"),
        EndpointInfo::new("POST", "/api/send-message", "Send message to user"),
        EndpointInfo::new("GET", "/api/user-data", "Get user information"),
        EndpointInfo::new("GET", "/health", "Health check"),
        EndpointInfo::new("GET", "/api/info", "API information"),
    ];
    if features.metrics_enabled {
        endpoints.push(EndpointInfo::new("GET", "/metrics", "Request counters"));
    }
    if features.static_dir.is_some() {
        endpoints.push(EndpointInfo::new("GET", "/static/{path}", "Static assets"));
    }

    Json(InfoResponse {
        name: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        framework: FRAMEWORK.to_string(),
        endpoints,
    })
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.metrics.to_json())
}
