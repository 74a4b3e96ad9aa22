use std::sync::Arc;

use async_trait::async_trait;
use auth::IdentityContext;
use axum::extract::Path;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::RequestPartsExt;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::guard::IdentityHandler;

/// Looks up a single account by id.
pub struct GetAccountHandler {
    account_service: Arc<dyn AccountServicePort>,
}

impl GetAccountHandler {
    pub fn new(account_service: Arc<dyn AccountServicePort>) -> Self {
        Self { account_service }
    }

    async fn get_account(&self, request: Request) -> Result<ApiSuccess<AccountData>, ApiError> {
        let (mut parts, _body) = request.into_parts();
        let Path(account_id) = parts
            .extract::<Path<String>>()
            .await
            .map_err(|e| ApiError::UnprocessableEntity(e.body_text()))?;

        let account_id = AccountId::from_string(&account_id)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

        self.account_service
            .get_account(&account_id)
            .await
            .map_err(ApiError::from)
            .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
    }
}

#[async_trait]
impl IdentityHandler for GetAccountHandler {
    async fn handle(&self, _identity: IdentityContext, request: Request) -> Response {
        self.get_account(request).await.into_response()
    }
}
