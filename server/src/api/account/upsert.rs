use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use axum_macros::debug_handler;
use serde::Deserialize;
use validation::Violations;

use account::{
    ACCOUNT_ID_REQUIRED, Account, AccountId, InvalidUsername, MissingAccountId, Operation,
    RepositoryError, Username,
};
use extra::{json_error_response, json_violations_response};

use crate::AppState;

pub const PATH: &str = "/account";

#[derive(Deserialize)]
pub struct AccountSubmission {
    pub account_id: uuid::Uuid,
    pub username: String,
}

#[derive(Debug, serde::Serialize)]
pub struct AccountReply {
    pub account: Account,
    pub operation: Operation,
    pub message: &'static str,
}

/// Create-or-rename. Phase one validates syntax and collects every violated
/// rule. Phase two runs the storage-backed self-exclusion predicate before
/// the upsert decision procedure is invoked.
#[debug_handler]
#[tracing::instrument(fields(%account_id, %username), skip_all, ret)]
pub async fn handler(
    State(AppState { service }): State<AppState>,
    Json(AccountSubmission {
        account_id,
        username,
    }): Json<AccountSubmission>,
) -> Result<(StatusCode, Json<AccountReply>), UpsertAccountError> {
    let mut violations = Violations::new();

    let username = match Username::try_from(username) {
        Ok(username) => Some(username),
        Err(InvalidUsername(mut errs)) => {
            violations.append(&mut errs);
            None
        }
    };
    let account_id = match AccountId::try_from(account_id) {
        Ok(account_id) => Some(account_id),
        Err(MissingAccountId) => {
            violations.push(ACCOUNT_ID_REQUIRED);
            None
        }
    };

    let (Some(username), Some(account_id)) = (username, account_id) else {
        return Err(UpsertAccountError::Validation(violations));
    };

    if !service
        .is_valid_for_account(&username, &account_id)
        .await
        .map_err(|err| contextual::Error::new("validate username for account", err))?
    {
        return Err(UpsertAccountError::UsernameTaken(username));
    }

    let upserted = match service
        .upsert(Account {
            account_id,
            username,
        })
        .await
    {
        Ok(upserted) => upserted,
        // a concurrent writer can claim the username between the predicate
        // above and the persist; the backstop conflict maps to 409 as well
        Err(RepositoryError::UsernameTaken(username)) => {
            return Err(UpsertAccountError::UsernameJustTaken(username));
        }
        Err(err) => return Err(contextual::Error::new("upsert account", err).into()),
    };

    let (status, message) = match upserted.operation {
        Operation::Create => (StatusCode::CREATED, "account created successfully"),
        Operation::Update => (StatusCode::OK, "account updated successfully"),
    };

    Ok((
        status,
        Json(AccountReply {
            account: upserted.account,
            operation: upserted.operation,
            message,
        }),
    ))
}

#[derive(thiserror::Error, Debug)]
pub enum UpsertAccountError {
    #[error("{}", .0.join(" :: "))]
    Validation(Violations),

    #[error("username {0} is already taken")]
    UsernameTaken(Username),

    #[error("username {0} was just taken")]
    UsernameJustTaken(Username),

    #[error("{0:?}")]
    Repository(#[from] contextual::Error<RepositoryError>),
}

impl IntoResponse for UpsertAccountError {
    fn into_response(self) -> axum::response::Response {
        match self {
            UpsertAccountError::Validation(violations) => {
                tracing::info!(?violations, "rejected account submission");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json_violations_response(&violations)),
                )
                    .into_response()
            }
            UpsertAccountError::UsernameTaken(_) | UpsertAccountError::UsernameJustTaken(_) => {
                tracing::info!("{:?}", self);
                (StatusCode::CONFLICT, Json(json_error_response(self))).into_response()
            }
            UpsertAccountError::Repository(err) => {
                tracing::error!("{:?}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
