//! Client-side checks on command-line input, run before any request is sent.

use std::io::Read;

use chrono::NaiveDate;
use serde_json::Value;
use taskboard_api::types::{TaskPriority, TaskStatus};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Input rejected before reaching the API.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} exceeds maximum length of {max} bytes")]
    TooLong { field: &'static str, max: usize },
    #[error("{0} must be a positive ID")]
    InvalidId(i64),
    #[error("page must be 0 or greater, got {0}")]
    InvalidPage(i64),
    #[error("page size must be between 1 and 100, got {0}")]
    InvalidPageSize(i64),
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("{0}")]
    InvalidChoice(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(String),
    #[error("could not read payload from {source_name}: {message}")]
    Unreadable { source_name: String, message: String },
}

/// Replace ASCII control characters with spaces, trim whitespace, and enforce
/// non-emptiness and a byte-length limit.
pub fn sanitize_text(
    field: &'static str,
    input: &str,
    max_len: usize,
) -> Result<String, ValidationError> {
    let cleaned: String = input
        .chars()
        .map(|c| if c.is_ascii_control() { ' ' } else { c })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.len() > max_len {
        return Err(ValidationError::TooLong {
            field,
            max: max_len,
        });
    }
    Ok(trimmed.to_string())
}

pub fn validate_id(id: i64) -> Result<i64, ValidationError> {
    if id < 1 {
        return Err(ValidationError::InvalidId(id));
    }
    Ok(id)
}

pub fn validate_page(page: i64) -> Result<i64, ValidationError> {
    if page < 0 {
        return Err(ValidationError::InvalidPage(page));
    }
    Ok(page)
}

pub fn validate_page_size(size: i64) -> Result<i64, ValidationError> {
    if !(1..=MAX_PAGE_SIZE).contains(&size) {
        return Err(ValidationError::InvalidPageSize(size));
    }
    Ok(size)
}

/// Loose shape check; the server has the final say.
pub fn validate_email(input: &str) -> Result<String, ValidationError> {
    let email = sanitize_text("email", input, MAX_NAME_LENGTH)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(ValidationError::InvalidEmail(email)),
    }
}

pub fn validate_status(input: &str) -> Result<TaskStatus, ValidationError> {
    input.parse().map_err(ValidationError::InvalidChoice)
}

pub fn validate_priority(input: &str) -> Result<TaskPriority, ValidationError> {
    input.parse().map_err(ValidationError::InvalidChoice)
}

pub fn validate_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// Reads a JSON payload given inline, as `@path`, or as `-` for stdin.
pub fn read_payload(input: &str) -> Result<Value, ValidationError> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| ValidationError::Unreadable {
                source_name: "stdin".to_string(),
                message: e.to_string(),
            })?;
        buf
    } else if let Some(path) = input.strip_prefix('@') {
        std::fs::read_to_string(path).map_err(|e| ValidationError::Unreadable {
            source_name: path.to_string(),
            message: e.to_string(),
        })?
    } else {
        input.to_string()
    };
    serde_json::from_str(&text).map_err(|e| ValidationError::InvalidJson(e.to_string()))
}
