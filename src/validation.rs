use crate::error::{ChatError, Result};

/// Longest contact id accepted from callers
const MAX_ID_LENGTH: usize = 128;

/// Validation utilities for input sanitization and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate outbound message text after sanitization
    pub fn validate_message_content(text: &str, max_length: usize) -> Result<()> {
        if text.trim().is_empty() {
            return Err(ChatError::InvalidMessage(
                "Message cannot be empty".to_string(),
            ));
        }

        let length = text.chars().count();
        if length > max_length {
            return Err(ChatError::InvalidMessage(format!(
                "Message too long ({length} characters, max {max_length})"
            )));
        }

        Ok(())
    }

    /// Validate a contact or conversation id
    pub fn validate_contact_id(id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(ChatError::Other("Contact id cannot be empty".to_string()));
        }

        if id.chars().count() > MAX_ID_LENGTH {
            return Err(ChatError::Other(format!(
                "Contact id too long (max {MAX_ID_LENGTH} characters)"
            )));
        }

        if id.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(ChatError::Other(
                "Contact id contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a free-text search query
    pub fn validate_search_query(query: &str, max_length: usize) -> Result<()> {
        if query.chars().count() > max_length {
            return Err(ChatError::InvalidQuery(format!(
                "Search query too long (max {max_length} characters)"
            )));
        }

        if query.contains('\0') {
            return Err(ChatError::InvalidQuery(
                "Search query contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a contact display name
    pub fn validate_contact_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ChatError::Other("Contact name cannot be empty".to_string()));
        }

        if name.chars().count() > 100 {
            return Err(ChatError::Other(
                "Contact name too long (max 100 characters)".to_string(),
            ));
        }

        if name.contains('\0') || name.contains('\r') || name.contains('\n') {
            return Err(ChatError::Other(
                "Contact name contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Sanitize text input
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect::<String>()
            .trim()
            .to_string()
    }
}
