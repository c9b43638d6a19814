//! Input validation shared by the REST handlers.

use crate::ApiError;

pub const MAX_TITLE_LENGTH: usize = 500;
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Trim a title and reject empty or oversized values.
pub fn clean_title(raw: &str, field: &str) -> Result<String, ApiError> {
    let title = raw.trim();

    if title.is_empty() {
        return Err(ApiError::validation(
            format!("{} must not be empty", field),
            Some(field),
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(ApiError::validation(
            format!("{} exceeds {} characters", field, MAX_TITLE_LENGTH),
            Some(field),
        ));
    }

    Ok(title.to_string())
}

/// Bound a free-text description; empty collapses to `None`.
pub fn clean_description(raw: Option<String>) -> Result<Option<String>, ApiError> {
    match raw {
        None => Ok(None),
        Some(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            if text.len() > MAX_DESCRIPTION_LENGTH {
                return Err(ApiError::validation(
                    format!("description exceeds {} characters", MAX_DESCRIPTION_LENGTH),
                    Some("description"),
                ));
            }
            Ok(Some(text.to_string()))
        }
    }
}
