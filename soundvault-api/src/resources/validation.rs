//! Input validation helpers
//!
//! A [`Validator`] collects every violation in one pass; [`Validator::finish`]
//! turns them into a single 400 error.

use crate::error::ApiError;

/// Longest accepted name/title and short text field
pub const MAX_TEXT_LEN: usize = 255;

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blank and at most [`MAX_TEXT_LEN`] characters
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{} is required", field));
        } else {
            self = self.max_len(field, Some(value));
        }
        self
    }

    pub fn max_len(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            if value.chars().count() > MAX_TEXT_LEN {
                self.errors
                    .push(format!("{} must be at most {} characters", field, MAX_TEXT_LEN));
            }
        }
        self
    }

    pub fn email(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            if !value.contains('@') {
                self.errors.push(format!("{} must be a valid email address", field));
            }
        }
        self
    }

    /// Inclusive range check on an optional number
    pub fn range(mut self, field: &str, value: Option<i64>, min: i64, max: i64) -> Self {
        if let Some(value) = value {
            if value < min || value > max {
                self.errors
                    .push(format!("{} must be between {} and {}", field, min, max));
            }
        }
        self
    }

    pub fn non_negative(mut self, field: &str, value: Option<i64>) -> Self {
        if matches!(value, Some(v) if v < 0) {
            self.errors.push(format!("{} must not be negative", field));
        }
        self
    }

    pub fn one_of(mut self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if !allowed.contains(&value) {
            self.errors
                .push(format!("{} must be one of: {}", field, allowed.join(", ")));
        }
        self
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors.join("; ")))
        }
    }
}
