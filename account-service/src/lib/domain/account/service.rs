use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::DECOY_HASH;
use auth::PasswordPolicy;
use auth::RefreshedCredential;
use auth::Role;
use auth::TokenService;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::IssuedCredentials;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;

/// Roles an account may not request for itself at registration.
const NON_SELF_ASSIGNABLE_ROLES: [Role; 1] = [Role::Admin];

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    tokens: Arc<TokenService>,
    password_policy: PasswordPolicy,
    password_hasher: PasswordHasher,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `tokens` - Credential issuer shared with the request guards
    pub fn new(repository: Arc<AR>, tokens: Arc<TokenService>) -> Self {
        Self {
            repository,
            tokens,
            password_policy: PasswordPolicy::new(),
            password_hasher: PasswordHasher::new(),
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AccountError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AccountError::Unknown(format!("Password verification task failed: {}", e)))
    }

    fn issue_credentials(&self, account: Account) -> Result<IssuedCredentials, AccountError> {
        let claims = account.claims();
        let access_token = self.tokens.issue_access(&claims)?;
        let refresh_token = self.tokens.issue_refresh(&claims)?;

        Ok(IssuedCredentials {
            account,
            access_token,
            refresh_token,
        })
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<IssuedCredentials, AccountError> {
        if NON_SELF_ASSIGNABLE_ROLES.contains(&command.role) {
            return Err(AccountError::RoleNotSelfAssignable(command.role));
        }

        let validation = self.password_policy.validate(&command.password);
        if !validation.valid {
            return Err(AccountError::WeakPassword(validation.messages()));
        }

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.hash_password(command.password).await?;

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            role: command.role,
            password_hash,
            created_at: Utc::now(),
        };

        let created_account = self.repository.create(account).await?;
        tracing::info!(
            account_id = %created_account.id,
            role = %created_account.role,
            "Account registered"
        );

        self.issue_credentials(created_account)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedCredentials, AccountError> {
        let Some(account) = self.repository.find_by_email(&command.email).await? else {
            // Unknown accounts pay for a full verification too
            self.verify_password(command.password, DECOY_HASH.to_string())
                .await?;
            tracing::warn!("Login rejected: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let is_valid = self
            .verify_password(command.password, account.password_hash.clone())
            .await?;

        if !is_valid {
            tracing::warn!(account_id = %account.id, "Login rejected: wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        tracing::info!(account_id = %account.id, "Login succeeded");
        self.issue_credentials(account)
    }

    fn refresh(&self, refresh_token: &str) -> Result<RefreshedCredential, AccountError> {
        let refreshed = self.tokens.refresh(refresh_token).map_err(|e| {
            tracing::warn!(error = ?e, "Refresh token rejected");
            AccountError::from(e)
        })?;

        tracing::info!(user_id = %refreshed.claims.user_id, "Access token refreshed");
        Ok(refreshed)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }
}
