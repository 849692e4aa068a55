//! Plot type constants and validation.

/// A long-running storyline spanning many chapters or books.
pub const PLOT_TYPE_STORY_ARC: &str = "story_arc";
/// The development of a single character.
pub const PLOT_TYPE_CHARACTER_ARC: &str = "character_arc";
/// A reversal or reveal.
pub const PLOT_TYPE_PLOT_TWIST: &str = "plot_twist";

/// All valid plot types.
pub const VALID_PLOT_TYPES: &[&str] = &[
    PLOT_TYPE_STORY_ARC,
    PLOT_TYPE_CHARACTER_ARC,
    PLOT_TYPE_PLOT_TWIST,
];

/// Validate that the plot type is one of the allowed values.
pub fn validate_plot_type(plot_type: &str) -> Result<(), String> {
    if VALID_PLOT_TYPES.contains(&plot_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid plot type '{plot_type}'. Must be one of: {}",
            VALID_PLOT_TYPES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_accepted() {
        for t in VALID_PLOT_TYPES {
            assert!(validate_plot_type(t).is_ok());
        }
    }

    #[test]
    fn unknown_type_lists_choices() {
        let err = validate_plot_type("subplot").unwrap_err();
        assert!(err.contains("'subplot'"));
        assert!(err.contains("story_arc, character_arc, plot_twist"));
    }
}
