use axum::{body::Body, http::Request};

use crate::request;

pub fn check_username(username: &str) -> Request<Body> {
    request!(GET format!("/check/username-availability?username={username}") ;)
}

pub fn upsert_account(account_id: &str, username: &str) -> Request<Body> {
    request!(
        POST "/account";
        "content-type" => "application/json";
        format!(r#"{{"account_id":"{account_id}","username":"{username}"}}"#)
    )
}
