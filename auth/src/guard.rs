use http::HeaderMap;
use http::StatusCode;
use thiserror::Error;

use crate::authenticator::IdentityContext;
use crate::authenticator::RequestAuthenticator;
use crate::jwt::Role;

/// Reason a guarded request was rejected before reaching its handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Insufficient permissions: role {role} is not allowed")]
    InsufficientRole { role: Role },
}

impl AccessDenied {
    /// 401 for a missing or invalid credential, 403 for a disallowed role.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccessDenied::Unauthenticated => StatusCode::UNAUTHORIZED,
            AccessDenied::InsufficientRole { .. } => StatusCode::FORBIDDEN,
        }
    }
}

/// Authorization decisions for guarded requests.
///
/// Authentication is always resolved first, so a request without a valid
/// credential is rejected as unauthenticated even when a role is required.
#[derive(Clone)]
pub struct AuthorizationGuard {
    authenticator: RequestAuthenticator,
}

impl AuthorizationGuard {
    pub fn new(authenticator: RequestAuthenticator) -> Self {
        Self { authenticator }
    }

    /// Require a verified identity.
    ///
    /// # Errors
    /// * `Unauthenticated` - No credential, or the credential failed verification
    pub fn require_auth(&self, headers: &HeaderMap) -> Result<IdentityContext, AccessDenied> {
        self.authenticator
            .authenticate(headers)
            .ok_or(AccessDenied::Unauthenticated)
    }

    /// Require a verified identity whose role is one of `allowed_roles`.
    ///
    /// # Errors
    /// * `Unauthenticated` - No credential, or the credential failed verification
    /// * `InsufficientRole` - Identity verified but its role is not allowed
    pub fn require_role(
        &self,
        headers: &HeaderMap,
        allowed_roles: &[Role],
    ) -> Result<IdentityContext, AccessDenied> {
        let identity = self.require_auth(headers)?;

        if allowed_roles.contains(&identity.role()) {
            Ok(identity)
        } else {
            tracing::warn!(
                user_id = %identity.user_id(),
                role = %identity.role(),
                allowed = ?allowed_roles,
                "Role not permitted"
            );
            Err(AccessDenied::InsufficientRole {
                role: identity.role(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::header::AUTHORIZATION;
    use http::HeaderValue;

    use super::*;
    use crate::jwt::Claims;
    use crate::token::TokenConfig;
    use crate::token::TokenService;

    fn guard() -> (AuthorizationGuard, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(&TokenConfig::new(
            "test_secret_key_at_least_32_bytes!",
        )));
        let guard = AuthorizationGuard::new(RequestAuthenticator::new(Arc::clone(&tokens)));
        (guard, tokens)
    }

    fn bearer(tokens: &TokenService, role: Role) -> HeaderMap {
        let token = tokens
            .issue_access(&Claims::new("u-1", "u@example.com", role))
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_require_auth_accepts_any_role() {
        let (guard, tokens) = guard();

        for role in [Role::Buyer, Role::Seller, Role::Distributor, Role::Admin] {
            let identity = guard.require_auth(&bearer(&tokens, role)).unwrap();
            assert_eq!(identity.role(), role);
        }
    }

    #[test]
    fn test_require_auth_without_credential() {
        let (guard, _) = guard();
        assert_eq!(
            guard.require_auth(&HeaderMap::new()),
            Err(AccessDenied::Unauthenticated)
        );
    }

    #[test]
    fn test_require_role_rejects_disallowed_role() {
        let (guard, tokens) = guard();

        let result = guard.require_role(&bearer(&tokens, Role::Buyer), &[Role::Admin]);

        assert_eq!(
            result,
            Err(AccessDenied::InsufficientRole { role: Role::Buyer })
        );
        assert_eq!(result.unwrap_err().status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_require_role_without_credential_is_unauthenticated() {
        let (guard, _) = guard();

        let result = guard.require_role(&HeaderMap::new(), &[Role::Admin]);

        assert_eq!(result, Err(AccessDenied::Unauthenticated));
        assert_eq!(result.unwrap_err().status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_require_role_accepts_member_role() {
        let (guard, tokens) = guard();

        let identity = guard
            .require_role(
                &bearer(&tokens, Role::Distributor),
                &[Role::Distributor, Role::Admin],
            )
            .unwrap();

        assert_eq!(identity.user_id(), "u-1");
    }

    #[test]
    fn test_require_role_with_empty_allow_list() {
        let (guard, tokens) = guard();
        assert!(matches!(
            guard.require_role(&bearer(&tokens, Role::Admin), &[]),
            Err(AccessDenied::InsufficientRole { .. })
        ));
    }
}
