use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;

use crate::{Account, AccountId, AccountRepository, RepositoryError, Username};

/// In-memory repository. Test double for the SQLite implementation, with the
/// same storage-level backstops: unique username, unique account id.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<DashMap<AccountId, Account>>,
    pending: Arc<AtomicU64>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Account> {
        self.accounts.iter().map(|entry| entry.value().clone()).collect()
    }

    fn username_held_by_other(&self, username: &Username, account_id: &AccountId) -> bool {
        self.accounts
            .iter()
            .any(|entry| entry.key() != account_id && entry.value().username == *username)
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn add(&self, account: Account) -> Result<Account, RepositoryError> {
        if self.accounts.contains_key(&account.account_id) {
            return Err(RepositoryError::Storage(anyhow::anyhow!(
                "unique constraint failed :: accounts.account_id :: {}",
                account.account_id
            )));
        }
        if self.username_held_by_other(&account.username, &account.account_id) {
            return Err(RepositoryError::UsernameTaken(account.username));
        }

        self.accounts.insert(account.account_id, account.clone());
        self.pending.fetch_add(1, Ordering::Relaxed);
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, RepositoryError> {
        if !self.accounts.contains_key(&account.account_id) {
            return Err(RepositoryError::Storage(anyhow::anyhow!(
                "account {} not found",
                account.account_id
            )));
        }
        if self.username_held_by_other(&account.username, &account.account_id) {
            return Err(RepositoryError::UsernameTaken(account.username));
        }

        self.accounts.insert(account.account_id, account.clone());
        self.pending.fetch_add(1, Ordering::Relaxed);
        Ok(account)
    }

    async fn get_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Account>, RepositoryError> {
        Ok(self.accounts.get(account_id).map(|entry| entry.value().clone()))
    }

    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.value().username == *username)
            .map(|entry| entry.value().clone()))
    }

    async fn commit(&self) -> Result<u64, RepositoryError> {
        Ok(self.pending.swap(0, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str) -> Account {
        Account {
            account_id: AccountId::try_from(uuid::Uuid::new_v4()).unwrap(),
            username: name.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn add_saves_account() {
        let repository = InMemoryAccountRepository::new();
        let account = account("testuser");

        let saved = repository.add(account.clone()).await.unwrap();

        assert_eq!(saved, account);
        assert_eq!(
            repository.get_by_account_id(&account.account_id).await.unwrap(),
            Some(account)
        );
    }

    #[tokio::test]
    async fn update_modifies_account() {
        let repository = InMemoryAccountRepository::new();
        let mut account = account("testuser");
        repository.add(account.clone()).await.unwrap();

        account.username = "updateduser".parse().unwrap();
        let updated = repository.update(account.clone()).await.unwrap();

        assert_eq!(updated.username.as_str(), "updateduser");
        assert_eq!(
            repository.get_by_username(&"updateduser".parse().unwrap()).await.unwrap(),
            Some(account)
        );
    }

    #[tokio::test]
    async fn update_of_unknown_account_fails() {
        let repository = InMemoryAccountRepository::new();

        let err = repository.update(account("testuser")).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Storage(_)));
    }

    #[tokio::test]
    async fn get_by_username_misses_for_unknown() {
        let repository = InMemoryAccountRepository::new();

        let found = repository.get_by_username(&"missing1".parse().unwrap()).await.unwrap();

        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn duplicate_username_rejected_by_backstop() {
        let repository = InMemoryAccountRepository::new();
        repository.add(account("duplicate1")).await.unwrap();

        let err = repository.add(account("duplicate1")).await.unwrap_err();

        assert!(matches!(err, RepositoryError::UsernameTaken(u) if u.as_str() == "duplicate1"));
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_account_id_rejected_by_backstop() {
        let repository = InMemoryAccountRepository::new();
        let existing = account("firstname1");
        repository.add(existing.clone()).await.unwrap();

        let err = repository
            .add(Account {
                account_id: existing.account_id,
                username: "secondname1".parse().unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Storage(_)));
    }

    #[tokio::test]
    async fn rename_onto_taken_username_rejected() {
        let repository = InMemoryAccountRepository::new();
        repository.add(account("heldname1")).await.unwrap();
        let mut other = account("othername1");
        repository.add(other.clone()).await.unwrap();

        other.username = "heldname1".parse().unwrap();
        let err = repository.update(other).await.unwrap_err();

        assert!(matches!(err, RepositoryError::UsernameTaken(_)));
    }

    #[tokio::test]
    async fn commit_reports_writes_since_last_commit() {
        let repository = InMemoryAccountRepository::new();
        repository.add(account("firstuser")).await.unwrap();
        repository.add(account("seconduser")).await.unwrap();

        assert_eq!(repository.commit().await.unwrap(), 2);
        assert_eq!(repository.commit().await.unwrap(), 0);
    }
}
