const HELP: &str = "Please check the response headers for `x-request-id`, include the datetime and raise a support ticket.";

fn now_iso8601() -> Option<String> {
    use time::format_description::well_known::Iso8601;

    time::OffsetDateTime::now_utc()
        .format(&Iso8601::DATE_TIME_OFFSET)
        .ok()
}

pub fn json_error_response(err: impl std::error::Error) -> serde_json::Value {
    serde_json::json!({
        "error": err.to_string(),
        "help": HELP,
        "datetime": now_iso8601()
    })
}

/// Same envelope as [`json_error_response`], but carries the full list of
/// violated validation rules instead of a single error.
pub fn json_violations_response(violations: &[&'static str]) -> serde_json::Value {
    serde_json::json!({
        "errors": violations,
        "help": HELP,
        "datetime": now_iso8601()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "boom")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn single_error_payload() {
        let payload = json_error_response(Boom);
        assert_eq!(payload["error"], "boom");
        assert!(payload["datetime"].is_string());
    }

    #[test]
    fn violations_payload_keeps_order() {
        let payload = json_violations_response(&["first rule", "second rule"]);
        assert_eq!(payload["errors"][0], "first rule");
        assert_eq!(payload["errors"][1], "second rule");
    }
}
