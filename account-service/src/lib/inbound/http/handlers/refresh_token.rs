use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    let refreshed = state.account_service.refresh(&body.refresh_token)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshTokenResponseData {
            access_token: refreshed.access_token,
            token_type: "Bearer",
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequest {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub access_token: String,
    pub token_type: &'static str,
}
