use std::panic::catch_unwind;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use auth::AccessDenied;
use auth::AuthorizationGuard;
use auth::IdentityContext;
use auth::Role;
use axum::extract::Request;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;

/// A request handler: takes the request, produces the response.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn handle(&self, request: Request) -> Response;
}

/// A handler that needs a verified identity.
///
/// The identity is passed explicitly; guard decorators are the only callers.
#[async_trait]
pub trait IdentityHandler: Send + Sync + 'static {
    async fn handle(&self, identity: IdentityContext, request: Request) -> Response;
}

/// Decorator requiring any verified identity before delegating.
pub struct AuthenticatingHandler<H> {
    guard: AuthorizationGuard,
    inner: H,
}

impl<H: IdentityHandler> AuthenticatingHandler<H> {
    pub fn new(guard: AuthorizationGuard, inner: H) -> Self {
        Self { guard, inner }
    }
}

#[async_trait]
impl<H: IdentityHandler> Handler for AuthenticatingHandler<H> {
    async fn handle(&self, request: Request) -> Response {
        let decision = fail_closed(|| self.guard.require_auth(request.headers()));

        match decision {
            Ok(identity) => self.inner.handle(identity, request).await,
            Err(denied) => ApiError::from(denied).into_response(),
        }
    }
}

/// Decorator requiring a verified identity with one of the allowed roles.
///
/// Implies authentication; wrapping in [`AuthenticatingHandler`] as well is
/// unnecessary.
pub struct RoleGuardingHandler<H> {
    guard: AuthorizationGuard,
    allowed_roles: Vec<Role>,
    inner: H,
}

impl<H: IdentityHandler> RoleGuardingHandler<H> {
    pub fn new(guard: AuthorizationGuard, allowed_roles: impl Into<Vec<Role>>, inner: H) -> Self {
        Self {
            guard,
            allowed_roles: allowed_roles.into(),
            inner,
        }
    }
}

#[async_trait]
impl<H: IdentityHandler> Handler for RoleGuardingHandler<H> {
    async fn handle(&self, request: Request) -> Response {
        let decision =
            fail_closed(|| self.guard.require_role(request.headers(), &self.allowed_roles));

        match decision {
            Ok(identity) => self.inner.handle(identity, request).await,
            Err(denied) => ApiError::from(denied).into_response(),
        }
    }
}

/// Run a guard decision, treating a panic as unauthenticated.
fn fail_closed<F>(decide: F) -> Result<IdentityContext, AccessDenied>
where
    F: FnOnce() -> Result<IdentityContext, AccessDenied>,
{
    catch_unwind(AssertUnwindSafe(decide)).unwrap_or_else(|_| {
        tracing::error!("Authorization guard panicked; rejecting request");
        Err(AccessDenied::Unauthenticated)
    })
}
