use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

pub async fn root() -> &'static str {
    concat!("ScamSmart Hive API v", env!("CARGO_PKG_VERSION"))
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Leaderboards open".to_string(),
    })
}
