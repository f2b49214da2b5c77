use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Amount;
use crate::domain::user::models::User;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceOperationRequest {
    amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceData {
    pub balance: Decimal,
    pub message: String,
}

impl BalanceData {
    fn from_user(user: &User, message: impl Into<String>) -> Self {
        Self {
            balance: user.balance,
            message: message.into(),
        }
    }
}

pub async fn get_balance(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<BalanceData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        BalanceData::from_user(&user, "Current balance"),
    ))
}

pub async fn deposit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<BalanceOperationRequest>,
) -> Result<ApiSuccess<BalanceData>, ApiError> {
    let amount = Amount::new(body.amount).map_err(UserError::from)?;

    state
        .user_service
        .deposit(&user.id, amount)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::OK,
                BalanceData::from_user(user, format!("Deposited {amount}")),
            )
        })
}

pub async fn withdraw(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<BalanceOperationRequest>,
) -> Result<ApiSuccess<BalanceData>, ApiError> {
    let amount = Amount::new(body.amount).map_err(UserError::from)?;

    state
        .user_service
        .withdraw(&user.id, amount)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::OK,
                BalanceData::from_user(user, format!("Withdrew {amount}")),
            )
        })
}
