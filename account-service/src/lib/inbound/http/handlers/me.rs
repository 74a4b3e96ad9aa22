use async_trait::async_trait;
use auth::IdentityContext;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::guard::IdentityHandler;

/// Echoes the caller's verified identity.
pub struct MeHandler;

#[async_trait]
impl IdentityHandler for MeHandler {
    async fn handle(&self, identity: IdentityContext, _request: Request) -> Response {
        ApiSuccess::new(StatusCode::OK, IdentityData::from(&identity)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

impl From<&IdentityContext> for IdentityData {
    fn from(identity: &IdentityContext) -> Self {
        Self {
            user_id: identity.user_id().to_string(),
            email: identity.email().to_string(),
            role: identity.role().to_string(),
        }
    }
}
