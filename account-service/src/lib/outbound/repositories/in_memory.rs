use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;

/// Process-local account store.
///
/// Stands in for the external user-record store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| &a.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by_key(|a| a.created_at);
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use auth::Role;
    use chrono::Utc;

    use super::*;

    fn account(email: &str) -> Account {
        Account {
            id: AccountId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            role: Role::Buyer,
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryAccountRepository::new();
        let created = repository.create(account("a@example.com")).await.unwrap();

        let by_id = repository.find_by_id(&created.id).await.unwrap();
        assert_eq!(by_id.map(|a| a.id), Some(created.id));

        let by_email = repository
            .find_by_email(&EmailAddress::new("A@example.com".to_string()).unwrap())
            .await
            .unwrap();
        assert_eq!(by_email.map(|a| a.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repository = InMemoryAccountRepository::new();
        repository.create(account("a@example.com")).await.unwrap();

        let result = repository.create(account("a@example.com")).await;
        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_list_all() {
        let repository = InMemoryAccountRepository::new();
        repository.create(account("a@example.com")).await.unwrap();
        repository.create(account("b@example.com")).await.unwrap();

        assert_eq!(repository.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repository = InMemoryAccountRepository::new();
        assert!(repository
            .find_by_id(&AccountId::new())
            .await
            .unwrap()
            .is_none());
    }
}
