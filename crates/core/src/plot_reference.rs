//! Plot-reference categories and validation.
//!
//! A plot reference points from a plot-bearing scope at some other
//! worldbuilding entity. `type` names the category and `referenceId` the
//! entity within it.

use crate::types::DbId;

pub const REFERENCE_TYPE_CHARACTER: &str = "character";
pub const REFERENCE_TYPE_LOCATION: &str = "location";
pub const REFERENCE_TYPE_ITEM: &str = "item";
pub const REFERENCE_TYPE_CREATURE: &str = "creature";
pub const REFERENCE_TYPE_FACTION: &str = "faction";
pub const REFERENCE_TYPE_EVENT: &str = "event";
pub const REFERENCE_TYPE_LANGUAGE: &str = "language";
pub const REFERENCE_TYPE_RELIGION: &str = "religion";
pub const REFERENCE_TYPE_MAGIC_SYSTEM: &str = "magic_system";
pub const REFERENCE_TYPE_TECHNOLOGY: &str = "technology";
pub const REFERENCE_TYPE_CULTURE: &str = "culture";
pub const REFERENCE_TYPE_ORGANIZATION: &str = "organization";
pub const REFERENCE_TYPE_SPECIES: &str = "species";

/// All thirteen reference categories.
pub const VALID_REFERENCE_TYPES: &[&str] = &[
    REFERENCE_TYPE_CHARACTER,
    REFERENCE_TYPE_LOCATION,
    REFERENCE_TYPE_ITEM,
    REFERENCE_TYPE_CREATURE,
    REFERENCE_TYPE_FACTION,
    REFERENCE_TYPE_EVENT,
    REFERENCE_TYPE_LANGUAGE,
    REFERENCE_TYPE_RELIGION,
    REFERENCE_TYPE_MAGIC_SYSTEM,
    REFERENCE_TYPE_TECHNOLOGY,
    REFERENCE_TYPE_CULTURE,
    REFERENCE_TYPE_ORGANIZATION,
    REFERENCE_TYPE_SPECIES,
];

/// Validate that the reference type is one of the thirteen categories.
pub fn validate_reference_type(reference_type: &str) -> Result<(), String> {
    if VALID_REFERENCE_TYPES.contains(&reference_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid reference type '{reference_type}'. Must be one of: {}",
            VALID_REFERENCE_TYPES.join(", ")
        ))
    }
}

/// Reference ids point at database rows, so they must be positive.
pub fn validate_reference_id(reference_id: DbId) -> Result<(), String> {
    if reference_id > 0 {
        Ok(())
    } else {
        Err(format!(
            "referenceId must be a positive integer, got {reference_id}"
        ))
    }
}
