use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use super::UserData;
use crate::inbound::http::middleware::CurrentUser;

pub async fn me(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

/// Tokens are stateless, so logging out is the client discarding them.
pub async fn logout(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    tracing::info!(user_id = %user.id, "User logged out");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "Successfully logged out".to_string(),
        },
    ))
}
