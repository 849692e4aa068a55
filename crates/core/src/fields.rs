//! Field rules shared by every named entity (series, books, plots, plot
//! references, weapons).

/// Maximum length of an entity name in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of free-form text such as descriptions.
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Message returned when a create request omits `name`.
pub const NAME_REQUIRED_MESSAGE: &str = "A name is required.";

/// Validate an entity name: non-blank and within [`MAX_NAME_LENGTH`].
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(NAME_REQUIRED_MESSAGE.to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate an optional free-form field against a length limit.
pub fn validate_optional_text(field: &str, value: Option<&str>, max: usize) -> Result<(), String> {
    match value {
        Some(v) if v.chars().count() > max => Err(format!(
            "{field} exceeds maximum length of {max} characters"
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_rejected() {
        assert_eq!(validate_name("   ").unwrap_err(), NAME_REQUIRED_MESSAGE);
        assert!(validate_name("").is_err());
    }

    #[test]
    fn name_at_limit_accepted() {
        let name = "a".repeat(MAX_NAME_LENGTH);
        assert!(validate_name(&name).is_ok());
        let too_long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name(&too_long).is_err());
    }

    #[test]
    fn optional_text_limits() {
        assert!(validate_optional_text("description", None, 3).is_ok());
        assert!(validate_optional_text("description", Some("abc"), 3).is_ok());
        let err = validate_optional_text("description", Some("abcd"), 3).unwrap_err();
        assert!(err.contains("description exceeds maximum length of 3"));
    }
}
