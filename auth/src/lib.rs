//! Authentication and authorization library
//!
//! Provides the credential layer for the marketplace services:
//! - Password composition policy and hashing (Argon2id)
//! - Access and refresh JWT issuance and verification
//! - Bearer credential extraction into an identity context
//! - Authentication and role guard decisions
//!
//! Everything here is synchronous and holds no mutable state, so a single
//! instance can be shared across concurrent requests behind an `Arc`.
//!
//! # Examples
//!
//! ## Password Policy and Hashing
//! ```
//! use auth::{PasswordHasher, PasswordPolicy};
//!
//! let validation = PasswordPolicy::new().validate("abcdefgh");
//! assert!(!validation.valid);
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Str0ng!pass").unwrap();
//! assert!(hasher.verify("Str0ng!pass", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, Role, TokenConfig, TokenService};
//!
//! let tokens = TokenService::new(&TokenConfig::new("secret_key_at_least_32_bytes_long!"));
//! let claims = Claims::new("user123", "alice@example.com", Role::Buyer);
//!
//! let access = tokens.issue_access(&claims).unwrap();
//! assert_eq!(tokens.verify_access(&access).unwrap(), claims);
//!
//! let refresh = tokens.issue_refresh(&claims).unwrap();
//! let refreshed = tokens.refresh(&refresh).unwrap();
//! assert_eq!(refreshed.claims, claims);
//! ```
//!
//! ## Guarding a Request
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AccessDenied, AuthorizationGuard, Claims, RequestAuthenticator, Role};
//! use auth::{TokenConfig, TokenService};
//! use http::HeaderMap;
//!
//! let tokens = Arc::new(TokenService::new(&TokenConfig::new("secret_key_at_least_32_bytes_long!")));
//! let guard = AuthorizationGuard::new(RequestAuthenticator::new(Arc::clone(&tokens)));
//!
//! let token = tokens.issue_access(&Claims::new("u1", "a@example.com", Role::Buyer)).unwrap();
//! let mut headers = HeaderMap::new();
//! headers.insert("authorization", format!("Bearer {}", token).parse().unwrap());
//!
//! assert!(guard.require_auth(&headers).is_ok());
//! assert!(matches!(
//!     guard.require_role(&headers, &[Role::Admin]),
//!     Err(AccessDenied::InsufficientRole { .. })
//! ));
//! ```

pub mod authenticator;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::IdentityContext;
pub use authenticator::RequestAuthenticator;
pub use guard::AccessDenied;
pub use guard::AuthorizationGuard;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::Role;
pub use password::PasswordError;
pub use password::DECOY_HASH;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PasswordValidation;
pub use password::PolicyViolation;
pub use token::RefreshedCredential;
pub use token::TokenConfig;
pub use token::TokenError;
pub use token::TokenService;
