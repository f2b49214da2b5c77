use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: String,
}

pub async fn root() -> ApiSuccess<ServiceInfo> {
    ApiSuccess::new(
        StatusCode::OK,
        ServiceInfo {
            service: env!("CARGO_PKG_NAME").to_string(),
            status: "running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

pub async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthData {
            status: "ok".to_string(),
        },
    )
}
