use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::HeaderMap;

use crate::jwt::Claims;
use crate::jwt::Role;
use crate::token::TokenService;

const BEARER_PREFIX: &str = "Bearer ";

/// Verified identity for the lifetime of one request.
///
/// Only produced by [`RequestAuthenticator`], so holding one means the
/// credential verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    claims: Claims,
}

impl IdentityContext {
    pub fn user_id(&self) -> &str {
        &self.claims.user_id
    }

    pub fn email(&self) -> &str {
        &self.claims.email
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}

/// Extracts and verifies bearer credentials from inbound requests.
///
/// Absence of a credential and a credential that fails verification both
/// produce `None`; callers treat it uniformly as unauthenticated.
#[derive(Clone)]
pub struct RequestAuthenticator {
    tokens: Arc<TokenService>,
}

impl RequestAuthenticator {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Authenticate from request headers.
    ///
    /// # Arguments
    /// * `headers` - Inbound request headers
    ///
    /// # Returns
    /// IdentityContext if a `Bearer` access token is present and verifies
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<IdentityContext> {
        let token = extract_bearer_token(headers)?;

        match self.tokens.verify_access(token) {
            Ok(claims) => Some(IdentityContext { claims }),
            Err(e) => {
                tracing::warn!(error = ?e, "Access token rejected");
                None
            }
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?;

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
