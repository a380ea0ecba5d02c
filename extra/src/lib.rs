mod json_error_response;

pub use json_error_response::{json_error_response, json_violations_response};
