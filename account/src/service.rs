use crate::{Account, AccountId, AccountRepository, RepositoryError, Username};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
}

/// What an upsert did: the persisted record plus whether this call created
/// or updated it. Transient; exists so the caller can report the right thing.
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted {
    pub account: Account,
    pub operation: Operation,
}

/// The decision procedure around the uniqueness invariant. Holds no state of
/// its own; every lookup and mutation goes through the repository.
#[derive(Debug, Clone)]
pub struct AccountService<R> {
    repository: R,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// True iff no account currently holds the username. Advisory only:
    /// a concurrent writer may claim the username right after this returns,
    /// so it is a probe, never a reservation.
    pub async fn is_username_available(
        &self,
        username: &Username,
    ) -> Result<bool, RepositoryError> {
        Ok(self.repository.get_by_username(username).await?.is_none())
    }

    /// True iff the username is unclaimed, or claimed by exactly this
    /// account. Lets an account re-submit or keep its own username during a
    /// rename without tripping the uniqueness rule.
    pub async fn is_valid_for_account(
        &self,
        username: &Username,
        account_id: &AccountId,
    ) -> Result<bool, RepositoryError> {
        match self.repository.get_by_username(username).await? {
            None => Ok(true),
            Some(existing) => Ok(existing.account_id == *account_id),
        }
    }

    /// Create-or-update, keyed by a lookup on the submitted USERNAME, not the
    /// account id: "claim or rename into this username" is the dominant use
    /// case.
    ///
    /// Precondition: the caller has already validated the submission with
    /// [`Self::is_valid_for_account`]. This procedure does not re-check it.
    /// An unvalidated submission carrying another account's username will
    /// silently rename in place over that account's row.
    ///
    /// When the lookup misses, the submission is persisted as-is, even if
    /// the submitted id already exists under a different username. That
    /// insert collides with the primary-key backstop and the storage error
    /// propagates.
    pub async fn upsert(&self, account: Account) -> Result<Upserted, RepositoryError> {
        match self.repository.get_by_username(&account.username).await? {
            Some(mut existing) => {
                // rename path: the found row keeps its id, the submitted
                // username overwrites (a no-op when they already match)
                existing.username = account.username;
                let persisted = self.repository.update(existing).await?;
                Ok(Upserted {
                    account: persisted,
                    operation: Operation::Update,
                })
            }
            None => {
                let persisted = self.repository.add(account).await?;
                Ok(Upserted {
                    account: persisted,
                    operation: Operation::Create,
                })
            }
        }
    }
}
