use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use account::{Account, AccountId, AccountRepository, RepositoryError, Username};
use sqlx::SqlitePool;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone)]
pub struct SqliteAccountRepository {
    pool: SqlitePool,
    pending: Arc<AtomicU64>,
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: AccountId,
    username: Username,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            account_id: row.account_id,
            username: row.username,
        }
    }
}

impl SqliteAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            pending: Arc::new(AtomicU64::new(0)),
        }
    }
}

/// A write rejected by the unique index on `accounts.username` is the
/// distinguishable conflict; everything else stays an opaque storage error.
/// In particular a primary-key collision on `accounts.account_id` is NOT a
/// username conflict and must not be reported as one.
fn classify_write_error(err: sqlx::Error, username: &Username) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db)
            if db.is_unique_violation() && db.message().contains("accounts.username") =>
        {
            RepositoryError::UsernameTaken(username.clone())
        }
        _ => RepositoryError::Storage(err.into()),
    }
}

impl AccountRepository for SqliteAccountRepository {
    async fn add(&self, account: Account) -> Result<Account, RepositoryError> {
        sqlx::query("INSERT INTO accounts (account_id, username) VALUES (?, ?)")
            .bind(&account.account_id)
            .bind(&account.username)
            .execute(&self.pool)
            .await
            .map_err(|err| classify_write_error(err, &account.username))?;

        self.pending.fetch_add(1, Ordering::Relaxed);
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, RepositoryError> {
        let result = sqlx::query("UPDATE accounts SET username = ? WHERE account_id = ?")
            .bind(&account.username)
            .bind(&account.account_id)
            .execute(&self.pool)
            .await
            .map_err(|err| classify_write_error(err, &account.username))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Storage(anyhow::anyhow!(
                "account {} not found",
                account.account_id
            )));
        }

        self.pending.fetch_add(1, Ordering::Relaxed);
        Ok(account)
    }

    async fn get_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT account_id, username FROM accounts WHERE account_id = ? LIMIT 1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::Storage(err.into()))?;

        Ok(row.map(Account::from))
    }

    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT account_id, username FROM accounts WHERE username = ? LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::Storage(err.into()))?;

        Ok(row.map(Account::from))
    }

    async fn commit(&self) -> Result<u64, RepositoryError> {
        Ok(self.pending.swap(0, Ordering::Relaxed))
    }
}
