use crate::{AccountId, Username};

/// The persisted entity. `account_id` is the storage primary key; `username`
/// is mutable but globally unique at every point visible to readers.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Account {
    pub account_id: AccountId,
    pub username: Username,
}
