use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// HTTP request body for JSON login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// OAuth2 password-flow form. The `username` field carries the email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(UserError::from)?;

    issue_for_credentials(&state, email.as_str(), &body.password).await
}

pub async fn login_form(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    issue_for_credentials(&state, &form.username, &form.password).await
}

async fn issue_for_credentials(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    let user = state
        .user_service
        .authenticate(email, password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    if !user.is_active {
        return Err(ApiError::Forbidden("User account is deactivated".to_string()));
    }

    state
        .user_service
        .issue_token_pair(&user)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}
