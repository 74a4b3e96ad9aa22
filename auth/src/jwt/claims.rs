use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Marketplace role carried in every credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Buyer,
    Seller,
    Distributor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "BUYER",
            Role::Seller => "SELLER",
            Role::Distributor => "DISTRIBUTOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for parsing a role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUYER" => Ok(Role::Buyer),
            "SELLER" => Ok(Role::Seller),
            "DISTRIBUTOR" => Ok(Role::Distributor),
            "ADMIN" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Identity asserted by a credential.
///
/// Field names are fixed for interoperability (`userId`, `email`, `role`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl Claims {
    pub fn new(user_id: impl ToString, email: impl ToString, role: Role) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            role,
        }
    }
}

/// Signed token payload: identity claims plus the validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub claims: Claims,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Wrap claims with an issue time of now and the given lifetime.
    pub fn issue(claims: Claims, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            claims,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_wire_names() {
        let claims = Claims::new("u-1", "alice@example.com", Role::Distributor);
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["userId"], "u-1");
        assert_eq!(value["email"], "alice@example.com");
        assert_eq!(value["role"], "DISTRIBUTOR");
    }

    #[test]
    fn test_token_claims_are_flattened() {
        let token_claims = TokenClaims::issue(
            Claims::new("u-1", "alice@example.com", Role::Buyer),
            Duration::hours(1),
        );
        let value = serde_json::to_value(&token_claims).unwrap();

        assert_eq!(value["userId"], "u-1");
        assert_eq!(value["role"], "BUYER");
        assert_eq!(
            value["exp"].as_i64().unwrap() - value["iat"].as_i64().unwrap(),
            3600
        );
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert_eq!("SELLER".parse::<Role>(), Ok(Role::Seller));
        assert!("seller".parse::<Role>().is_err());
        assert!(serde_json::from_str::<Role>("\"OWNER\"").is_err());
    }
}
