use axum::body::{Body, to_bytes};
use http::Response;

pub mod macros;
pub mod request;
pub mod setup;

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("unable to read response body");

    serde_json::from_slice(&bytes).expect("unable to deserialize response body")
}
