use crate::{Account, AccountId, Username};

#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    /// The storage layer's unique index rejected a write. This is the
    /// distinguishable conflict a caller can retry or report as
    /// "username just taken"; it must never be masked as success.
    #[error("username {0} is already taken")]
    UsernameTaken(Username),

    #[error("{0:?}")]
    Storage(#[from] anyhow::Error),
}

/// Storage boundary for accounts. Implementations own no business logic
/// beyond the unique-username backstop that sits beneath the service's
/// advisory checks.
pub trait AccountRepository {
    /// Insert a new record. A uniqueness race lost at the storage layer
    /// surfaces as [`RepositoryError::UsernameTaken`].
    fn add(&self, account: Account) -> impl Future<Output = Result<Account, RepositoryError>> + Send;

    /// Overwrite the record matched by `account_id`.
    fn update(
        &self,
        account: Account,
    ) -> impl Future<Output = Result<Account, RepositoryError>> + Send;

    fn get_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> impl Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    fn get_by_username(
        &self,
        username: &Username,
    ) -> impl Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// Flush pending writes, reporting how many rows were written since the
    /// previous commit. Both shipped implementations write eagerly (one
    /// statement per call), so this only reports the count.
    fn commit(&self) -> impl Future<Output = Result<u64, RepositoryError>> + Send;
}
