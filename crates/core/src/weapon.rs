//! Weapon field limits.

/// Maximum length of the `creator` and `wielder` fields.
pub const MAX_PERSON_LENGTH: usize = 255;

/// Maximum length of the `forged` era/date string (e.g. "Third Age, 1021").
pub const MAX_FORGED_LENGTH: usize = 100;
