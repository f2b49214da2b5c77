use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::balance::deposit;
use super::handlers::balance::get_balance;
use super::handlers::balance::withdraw;
use super::handlers::current_user::logout;
use super::handlers::current_user::me;
use super::handlers::deactivate_user::deactivate_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::health::root;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::login::login_form;
use super::handlers::refresh_tokens::refresh_tokens;
use super::handlers::register::register;
use super::handlers::update_user::update_user;
use super::middleware::authenticate;
use super::middleware::require_superuser;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
}

pub fn create_router(user_service: Arc<dyn UserServicePort>) -> Router {
    let state = AppState { user_service };

    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/login/form", post(login_form))
        .route("/auth/refresh", post(refresh_tokens));

    let authenticated_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/users/balance", get(get_balance))
        .route("/users/balance/deposit", post(deposit))
        .route("/users/balance/withdraw", post(withdraw))
        .route("/users/:user_id", get(get_user).put(update_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let privileged_routes = Router::new()
        .route("/users", get(list_users))
        .route("/users/:user_id", delete(delete_user))
        .route("/users/:user_id/deactivate", post(deactivate_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_superuser,
        ));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(privileged_routes);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", api_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
