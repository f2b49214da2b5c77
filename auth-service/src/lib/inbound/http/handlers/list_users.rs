use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::router::AppState;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    skip: Option<i64>,
    limit: Option<i64>,
}

impl Pagination {
    fn bounds(&self) -> (i64, i64) {
        let skip = self.skip.unwrap_or(0).max(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(0, MAX_LIMIT);
        (skip, limit)
    }
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let (skip, limit) = pagination.bounds();

    state
        .user_service
        .list_users(skip, limit)
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}
