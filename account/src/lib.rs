mod account;
mod account_id;
mod memory;
mod repository;
mod service;
mod username;

pub use account::Account;
pub use account_id::{ACCOUNT_ID_REQUIRED, AccountId, MissingAccountId};
pub use memory::InMemoryAccountRepository;
pub use repository::{AccountRepository, RepositoryError};
pub use service::{AccountService, Operation, Upserted};
pub use username::{InvalidUsername, Username};
