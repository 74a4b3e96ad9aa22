use std::sync::Arc;
use std::time::Duration;

use auth::AuthorizationGuard;
use auth::Role;
use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::routing::MethodRouter;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::guard::AuthenticatingHandler;
use super::guard::Handler;
use super::guard::RoleGuardingHandler;
use super::handlers::dashboard::DashboardHandler;
use super::handlers::get_account::GetAccountHandler;
use super::handlers::list_accounts::ListAccountsHandler;
use super::handlers::login::login;
use super::handlers::me::MeHandler;
use super::handlers::refresh_token::refresh_token;
use super::handlers::register::register;
use crate::domain::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    guard: AuthorizationGuard,
) -> Router {
    let state = AppState {
        account_service: Arc::clone(&account_service),
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh_token));

    let protected_routes = Router::new()
        .route(
            "/api/auth/me",
            guarded_get(AuthenticatingHandler::new(guard.clone(), MeHandler)),
        )
        .route(
            "/api/accounts",
            guarded_get(RoleGuardingHandler::new(
                guard.clone(),
                [Role::Admin],
                ListAccountsHandler::new(Arc::clone(&account_service)),
            )),
        )
        .route(
            "/api/accounts/:account_id",
            guarded_get(RoleGuardingHandler::new(
                guard.clone(),
                [Role::Admin],
                GetAccountHandler::new(account_service),
            )),
        )
        .route(
            "/api/seller/dashboard",
            guarded_get(RoleGuardingHandler::new(
                guard.clone(),
                [Role::Seller, Role::Admin],
                DashboardHandler::new("seller"),
            )),
        )
        .route(
            "/api/distributor/dashboard",
            guarded_get(RoleGuardingHandler::new(
                guard,
                [Role::Distributor, Role::Admin],
                DashboardHandler::new("distributor"),
            )),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out so bearer tokens never reach the logs
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
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Mount a guard decorator as a GET route.
fn guarded_get<H: Handler>(handler: H) -> MethodRouter<AppState> {
    let handler = Arc::new(handler);
    get(move |request: Request| async move { handler.handle(request).await })
}
