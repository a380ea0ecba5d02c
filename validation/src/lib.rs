//! Pure field syntax rules. No storage round-trips happen here; uniqueness
//! checks live in the account service and run only after these rules pass.

pub type Violations = Vec<&'static str>;

pub const USERNAME_REQUIRED: &str = "username is required";
pub const USERNAME_LENGTH: &str = "username must be between 6 and 30 characters";
pub const USERNAME_ALPHANUMERIC: &str = "username must be alphanumeric only";

/// Checks every syntax rule and reports all violated ones, not just the first.
pub fn validate_username(username: &str) -> Result<(), Violations> {
    let mut violations = Violations::new();

    if username.is_empty() {
        violations.push(USERNAME_REQUIRED);
    }

    let len = username.chars().count();
    if !(6..=30).contains(&len) {
        violations.push(USERNAME_LENGTH);
    }

    if !username.is_empty() && !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        violations.push(USERNAME_ALPHANUMERIC);
    }

    match violations.is_empty() {
        true => Ok(()),
        false => Err(violations),
    }
}
