use std::sync::Arc;

use async_trait::async_trait;
use auth::IdentityContext;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::guard::IdentityHandler;

/// Lists every registered account.
pub struct ListAccountsHandler {
    account_service: Arc<dyn AccountServicePort>,
}

impl ListAccountsHandler {
    pub fn new(account_service: Arc<dyn AccountServicePort>) -> Self {
        Self { account_service }
    }
}

#[async_trait]
impl IdentityHandler for ListAccountsHandler {
    async fn handle(&self, identity: IdentityContext, _request: Request) -> Response {
        tracing::info!(user_id = %identity.user_id(), "Listing accounts");

        match self.account_service.list_accounts().await {
            Ok(accounts) => ApiSuccess::new(
                StatusCode::OK,
                accounts.iter().map(AccountData::from).collect::<Vec<_>>(),
            )
            .into_response(),
            Err(e) => ApiError::from(e).into_response(),
        }
    }
}
