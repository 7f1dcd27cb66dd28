//! Recruitment-article field vocabularies and validation.

use crate::error::CoreError;

/// Valid article categories.
pub const VALID_CATEGORIES: &[&str] = &["study", "project"];

/// Valid proceed modes.
pub const VALID_PROCEEDS: &[&str] = &["online", "offline"];

/// Valid contact channels.
pub const VALID_CONTACTS: &[&str] = &["kakao", "email", "google"];

/// Validate a category against the known set.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if !VALID_CATEGORIES.contains(&category) {
        return Err(CoreError::Validation(format!(
            "Invalid category '{}'. Valid categories: {}",
            category,
            VALID_CATEGORIES.join(", ")
        )));
    }
    Ok(())
}

/// Validate a proceed mode against the known set.
pub fn validate_proceed(proceed: &str) -> Result<(), CoreError> {
    if !VALID_PROCEEDS.contains(&proceed) {
        return Err(CoreError::Validation(format!(
            "Invalid proceed mode '{}'. Valid modes: {}",
            proceed,
            VALID_PROCEEDS.join(", ")
        )));
    }
    Ok(())
}

/// Validate a contact channel against the known set.
pub fn validate_contact(contact: &str) -> Result<(), CoreError> {
    if !VALID_CONTACTS.contains(&contact) {
        return Err(CoreError::Validation(format!(
            "Invalid contact channel '{}'. Valid channels: {}",
            contact,
            VALID_CONTACTS.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_pass() {
        assert!(validate_category("study").is_ok());
        assert!(validate_category("project").is_ok());
        assert!(validate_proceed("online").is_ok());
        assert!(validate_contact("kakao").is_ok());
    }

    #[test]
    fn test_unknown_values_fail() {
        assert!(validate_category("hackathon").is_err());
        assert!(validate_proceed("hybrid").is_err());
        assert!(validate_contact("phone").is_err());
        // Case-sensitive by design.
        assert!(validate_category("Study").is_err());
    }
}
