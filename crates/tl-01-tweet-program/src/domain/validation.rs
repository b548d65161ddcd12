//! # Validation Rules
//!
//! Stateless size checks on the text fields. Lengths are counted in Unicode
//! scalar values, not bytes.

use crate::errors::ValidationError;

/// Maximum topic length in characters.
pub const MAX_TOPIC_CHARS: usize = 50;

/// Maximum content length in characters.
pub const MAX_CONTENT_CHARS: usize = 280;

/// Checks topic and content against the size rules.
///
/// # Errors
///
/// - `TopicTooLong` when the topic exceeds 50 characters
/// - `ContentTooLong` when the content is empty or exceeds 280 characters
pub fn validate(topic: &str, content: &str) -> Result<(), ValidationError> {
    if topic.chars().count() > MAX_TOPIC_CHARS {
        return Err(ValidationError::TopicTooLong);
    }

    let content_chars = content.chars().count();
    if content_chars == 0 || content_chars > MAX_CONTENT_CHARS {
        return Err(ValidationError::ContentTooLong);
    }

    Ok(())
}
