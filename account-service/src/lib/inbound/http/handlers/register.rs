use std::str::FromStr;

use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::IssuedCredentials;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<CredentialsResponseData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref issued| ApiSuccess::new(StatusCode::CREATED, issued.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    role: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid role: {0}")]
    Role(#[from] auth::jwt::claims::UnknownRole),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let role = match self.role {
            Some(role) => Role::from_str(&role)?,
            None => Role::Buyer,
        };
        Ok(RegisterCommand::new(email, self.password, role))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Account plus its credential pair, returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialsResponseData {
    pub user: AccountData,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

impl From<&IssuedCredentials> for CredentialsResponseData {
    fn from(issued: &IssuedCredentials) -> Self {
        Self {
            user: (&issued.account).into(),
            access_token: issued.access_token.clone(),
            refresh_token: issued.refresh_token.clone(),
            token_type: "Bearer",
        }
    }
}
