use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_macros::debug_handler;
use contextual::Context;
use extra::{json_error_response, json_violations_response};
use serde::Deserialize;

use account::{InvalidUsername, RepositoryError, Username};

use crate::AppState;

pub const PATH: &str = "/check/username-availability";

#[derive(Deserialize)]
pub struct CheckUsernameAvailabilityParams {
    pub username: String,
}

/// Advisory availability probe. A 200 here is not a reservation; a
/// concurrent writer may still claim the username before this caller does.
#[debug_handler]
#[tracing::instrument(fields(%username), skip_all, ret)]
pub async fn handler(
    State(AppState { service }): State<AppState>,
    Query(CheckUsernameAvailabilityParams { username }): Query<CheckUsernameAvailabilityParams>,
) -> Result<StatusCode, CheckUsernameAvailabilityError> {
    let username =
        Username::try_from(username).map_err(CheckUsernameAvailabilityError::InvalidParams)?;

    match service
        .is_username_available(&username)
        .await
        .context("check username availability")?
    {
        true => Ok(StatusCode::OK),
        false => Err(CheckUsernameAvailabilityError::UsernameTaken(username)),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CheckUsernameAvailabilityError {
    #[error("{0}")]
    InvalidParams(InvalidUsername),

    #[error("username {0} is already taken")]
    UsernameTaken(Username),

    #[error("{0:?}")]
    Repository(#[from] contextual::Error<RepositoryError>),
}

impl IntoResponse for CheckUsernameAvailabilityError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CheckUsernameAvailabilityError::InvalidParams(err) => {
                tracing::info!("{:?}", err);
                (StatusCode::BAD_REQUEST, Json(json_violations_response(&err.0))).into_response()
            }
            CheckUsernameAvailabilityError::UsernameTaken(_) => {
                tracing::info!("{:?}", self);
                (StatusCode::CONFLICT, Json(json_error_response(self))).into_response()
            }
            CheckUsernameAvailabilityError::Repository(err) => {
                tracing::error!("{:?}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
