//! Data-driven form validation.
//!
//! DESIGN
//! ======
//! One rule record per field instead of a branch per field name: each
//! rule carries its required-message, an optional minimum length, an
//! optional pattern, and an optional cross-field equality check, and
//! every rule is evaluated the same way. A field absent from the
//! submitted values is skipped entirely (the form did not render it);
//! a present-but-blank field fails its required check.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ApiError;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Validation rule for a single form field.
pub struct FieldRule {
    pub field: &'static str,
    pub required_message: &'static str,
    /// Minimum length and its failure message.
    pub min_len: Option<(usize, &'static str)>,
    /// Pattern the value must match, and its failure message.
    pub pattern: Option<(&'static LazyLock<Regex>, &'static str)>,
    /// Another field this one must equal, and the mismatch message.
    pub must_match: Option<(&'static str, &'static str)>,
}

const fn rule(field: &'static str, required_message: &'static str) -> FieldRule {
    FieldRule { field, required_message, min_len: None, pattern: None, must_match: None }
}

pub static REGISTRATION_RULES: [FieldRule; 4] = [
    FieldRule {
        min_len: Some((3, "Name must be at least 3 characters long")),
        ..rule("name", "Name is required")
    },
    FieldRule {
        pattern: Some((&EMAIL_PATTERN, "Please enter a valid email address")),
        ..rule("email", "Email is required")
    },
    FieldRule {
        min_len: Some((6, "Password must be at least 6 characters long")),
        ..rule("password", "Password is required")
    },
    FieldRule {
        must_match: Some(("password", "Passwords do not match")),
        ..rule("confirmPassword", "Please confirm your password")
    },
];

pub static LOGIN_RULES: [FieldRule; 2] = [
    FieldRule {
        pattern: Some((&EMAIL_PATTERN, "Please enter a valid email address")),
        ..rule("email", "Email is required")
    },
    FieldRule {
        min_len: Some((6, "Password must be at least 6 characters long")),
        ..rule("password", "Password is required")
    },
];

pub static POST_RULES: [FieldRule; 2] =
    [rule("title", "Title is required"), rule("content", "Content is required")];

/// Evaluate `rules` against submitted `values`.
///
/// `values` maps field name to submitted value; `None` means the field
/// was not part of the submission and its rule is skipped.
///
/// # Errors
///
/// The first failing rule's message, as a [`ApiError::Validation`].
pub fn check(rules: &[FieldRule], values: &[(&str, Option<&str>)]) -> Result<(), ApiError> {
    let lookup = |field: &str| {
        values
            .iter()
            .find(|(name, _)| *name == field)
            .and_then(|(_, value)| *value)
    };

    for rule in rules {
        let Some(value) = lookup(rule.field) else {
            continue;
        };
        if value.trim().is_empty() {
            return Err(ApiError::Validation(rule.required_message.to_owned()));
        }
        if let Some((min, message)) = rule.min_len {
            if value.len() < min {
                return Err(ApiError::Validation(message.to_owned()));
            }
        }
        if let Some((pattern, message)) = &rule.pattern {
            if !pattern.is_match(value) {
                return Err(ApiError::Validation((*message).to_owned()));
            }
        }
        if let Some((other, message)) = rule.must_match {
            if lookup(other) != Some(value) {
                return Err(ApiError::Validation(message.to_owned()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
