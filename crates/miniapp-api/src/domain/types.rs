//! Request and response bodies of the HTTP surface.

use miniapp_auth::InitDataInput;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /api/init` body.
#[derive(Debug, Clone, Deserialize)]
pub struct InitRequest {
    /// Either the JSON object of fields or the raw URL-encoded string,
    /// decoded by the handler
    #[serde(rename = "initData")]
    pub init_data: InitDataInput,
}

/// `POST /api/send-message` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub chat_id: i64,
    pub message: String,
}

/// Envelope shared by the init and send-message endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<Value>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// `GET /api/user-data` query; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDataQuery {
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

/// Echoed user record; absent fields serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl From<UserDataQuery> for UserRecord {
    fn from(query: UserDataQuery) -> Self {
        Self {
            id: query.user_id,
            first_name: query.first_name,
            last_name: query.last_name,
            username: query.username,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDataResponse {
    pub success: bool,
    pub user: UserRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Unix time in fractional seconds
    pub timestamp: f64,
    pub service: String,
    pub version: String,
}

/// One row of the `/api/info` endpoint listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    pub fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub framework: String,
    pub endpoints: Vec<EndpointInfo>,
}
