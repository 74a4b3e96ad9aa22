use async_trait::async_trait;
use auth::IdentityContext;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::guard::IdentityHandler;

/// Landing data for a role-specific dashboard area.
pub struct DashboardHandler {
    area: &'static str,
}

impl DashboardHandler {
    pub fn new(area: &'static str) -> Self {
        Self { area }
    }
}

#[async_trait]
impl IdentityHandler for DashboardHandler {
    async fn handle(&self, identity: IdentityContext, _request: Request) -> Response {
        ApiSuccess::new(
            StatusCode::OK,
            DashboardData {
                area: self.area,
                user_id: identity.user_id().to_string(),
                role: identity.role().to_string(),
            },
        )
        .into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardData {
    pub area: &'static str,
    pub user_id: String,
    pub role: String,
}
