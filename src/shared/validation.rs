//! Request validation rules
//!
//! Every rule trims surrounding whitespace first and returns the cleaned
//! value, so callers store exactly what was validated.

use crate::shared::error::SharedError;
use crate::shared::message::{EventKind, NewMessage};

/// Minimum length of a participant name
pub const MIN_NAME_LEN: usize = 2;

/// Minimum length of a user-authored message body
pub const MIN_TEXT_LEN: usize = 2;

/// Minimum length of a message recipient
pub const MIN_RECIPIENT_LEN: usize = 1;

/// A message that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMessage {
    pub to: String,
    pub text: String,
    pub kind: EventKind,
}

/// Validate a participant name
///
/// A valid name has at least [`MIN_NAME_LEN`] characters and is not a pure
/// number such as `42`, `-7` or `3.14`.
pub fn validate_name(raw: &str) -> Result<String, SharedError> {
    let name = raw.trim();
    check_min_len("name", name, MIN_NAME_LEN)?;
    if is_numeric(name) {
        return Err(SharedError::validation("name", "must not be a number"));
    }
    Ok(name.to_string())
}

/// Validate the sender identity taken from the `User` header
pub fn validate_sender(raw: &str) -> Result<String, SharedError> {
    let from = raw.trim();
    check_min_len("from", from, 1)?;
    Ok(from.to_string())
}

/// Validate a `POST /messages` body
pub fn validate_message(message: &NewMessage) -> Result<ValidMessage, SharedError> {
    let to = message.to.trim();
    check_min_len("to", to, MIN_RECIPIENT_LEN)?;

    let text = message.text.trim();
    check_min_len("text", text, MIN_TEXT_LEN)?;

    let kind: EventKind = message.kind.trim().parse()?;
    if !kind.is_user_authored() {
        return Err(SharedError::validation(
            "type",
            format!("'{kind}' messages are reserved for the server"),
        ));
    }

    Ok(ValidMessage {
        to: to.to_string(),
        text: text.to_string(),
        kind,
    })
}

/// Parse the optional `limit` query parameter
///
/// Absent means "no limit". Present values must be positive integers.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<usize>, SharedError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(Some(limit)),
        _ => Err(SharedError::invalid_limit(raw)),
    }
}

fn check_min_len(field: &str, value: &str, min: usize) -> Result<(), SharedError> {
    if value.chars().count() < min {
        return Err(SharedError::validation(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    Ok(())
}

/// Optional sign, digits, and at most one decimal point
fn is_numeric(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}
