use chrono::Duration;
use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;

/// Appended to the base secret to derive the refresh signing secret.
pub const REFRESH_SECRET_SUFFIX: &str = "_refresh";

/// Default access token lifetime (7 days).
pub const DEFAULT_ACCESS_TOKEN_TTL_HOURS: i64 = 7 * 24;

/// Refresh token lifetime (30 days).
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 30 * 24;

/// Signing configuration injected into the token service at construction.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_token_ttl: Duration,
}

impl TokenConfig {
    /// Configuration with the default access token lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_ttl: Duration::hours(DEFAULT_ACCESS_TOKEN_TTL_HOURS),
        }
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }
}

/// Token operation errors.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// Signature mismatch, malformed token or expired token.
    ///
    /// The cause is kept for logging only and is never surfaced to clients.
    #[error("Invalid credential")]
    InvalidCredential(#[source] JwtError),

    #[error("Failed to issue token: {0}")]
    IssueFailed(#[source] JwtError),
}

/// Newly minted access token from a refresh exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedCredential {
    pub access_token: String,
    pub claims: Claims,
}

/// Issues and verifies access and refresh credentials.
///
/// Access tokens are signed with the base secret; refresh tokens with the
/// base secret plus [`REFRESH_SECRET_SUFFIX`], so neither verifies as the
/// other.
pub struct TokenService {
    access: JwtHandler,
    refresh: JwtHandler,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        let refresh_secret = format!("{}{}", config.secret, REFRESH_SECRET_SUFFIX);

        Self {
            access: JwtHandler::new(config.secret.as_bytes()),
            refresh: JwtHandler::new(refresh_secret.as_bytes()),
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: Duration::hours(REFRESH_TOKEN_TTL_HOURS),
        }
    }

    /// Lifetime of newly issued access tokens.
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Sign an access token for the given claims.
    ///
    /// # Errors
    /// * `IssueFailed` - Token encoding failed
    pub fn issue_access(&self, claims: &Claims) -> Result<String, TokenError> {
        let token_claims = TokenClaims::issue(claims.clone(), self.access_token_ttl);
        self.access
            .encode(&token_claims)
            .map_err(TokenError::IssueFailed)
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `InvalidCredential` - Bad signature, malformed or expired token
    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.access
            .decode::<TokenClaims>(token)
            .map(|token_claims| token_claims.claims)
            .map_err(TokenError::InvalidCredential)
    }

    /// Sign a refresh token for the given claims.
    ///
    /// # Errors
    /// * `IssueFailed` - Token encoding failed
    pub fn issue_refresh(&self, claims: &Claims) -> Result<String, TokenError> {
        let token_claims = TokenClaims::issue(claims.clone(), self.refresh_token_ttl);
        self.refresh
            .encode(&token_claims)
            .map_err(TokenError::IssueFailed)
    }

    /// Verify a refresh token and return its claims.
    ///
    /// # Errors
    /// * `InvalidCredential` - Bad signature, malformed or expired token
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.refresh
            .decode::<TokenClaims>(token)
            .map(|token_claims| token_claims.claims)
            .map_err(TokenError::InvalidCredential)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Claims embedded at original issuance, role included, are carried over
    /// verbatim. The account store is not consulted.
    ///
    /// # Errors
    /// * `InvalidCredential` - Refresh token failed verification
    /// * `IssueFailed` - New access token could not be encoded
    pub fn refresh(&self, refresh_token: &str) -> Result<RefreshedCredential, TokenError> {
        let claims = self.verify_refresh(refresh_token)?;
        let access_token = self.issue_access(&claims)?;

        Ok(RefreshedCredential {
            access_token,
            claims,
        })
    }
}
