use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Request extension holding the user resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authenticated tier: valid access token for an existing, active user.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?.to_string();

    let user = state.user_service.current_user(&token).await?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Privileged tier: authenticated tier plus the superuser flag.
pub async fn require_superuser(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?.to_string();

    let user = state.user_service.current_superuser(&token).await?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let not_authenticated = || ApiError::Unauthorized("Not authenticated".to_string());

    let auth_str = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(not_authenticated)?
        .to_str()
        .map_err(|_| not_authenticated())?;

    let (scheme, token) = auth_str.split_once(' ').ok_or_else(not_authenticated)?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(not_authenticated());
    }

    Ok(token.trim())
}
