//! Weapon entity model and DTOs.
//!
//! Unlike plots, a weapon may belong to a series and to any number of books
//! at once. Book links live in the `weapon_books` join table and surface
//! here as `book_ids`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use inkwell_core::fields::{validate_name, validate_optional_text, MAX_TEXT_LENGTH};
use inkwell_core::ownership::Merge;
use inkwell_core::types::{DbId, Timestamp};
use inkwell_core::weapon::{MAX_FORGED_LENGTH, MAX_PERSON_LENGTH};

/// A weapon row joined with its book ids.
#[derive(Debug, Clone, FromRow)]
pub struct Weapon {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub wielder: Option<String>,
    pub forged: Option<String>,
    pub series_id: Option<DbId>,
    pub book_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new weapon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWeapon {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub wielder: Option<String>,
    pub forged: Option<String>,
}

impl CreateWeapon {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_text_fields(
            self.description.as_deref(),
            self.creator.as_deref(),
            self.wielder.as_deref(),
            self.forged.as_deref(),
        )
    }
}

/// DTO for the `updatedData` of a weapon PATCH.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWeapon {
    pub name: Option<String>,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub wielder: Option<String>,
    pub forged: Option<String>,
}

impl UpdateWeapon {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_text_fields(
            self.description.as_deref(),
            self.creator.as_deref(),
            self.wielder.as_deref(),
            self.forged.as_deref(),
        )
    }
}

fn validate_text_fields(
    description: Option<&str>,
    creator: Option<&str>,
    wielder: Option<&str>,
    forged: Option<&str>,
) -> Result<(), String> {
    validate_optional_text("description", description, MAX_TEXT_LENGTH)?;
    validate_optional_text("creator", creator, MAX_PERSON_LENGTH)?;
    validate_optional_text("wielder", wielder, MAX_PERSON_LENGTH)?;
    validate_optional_text("forged", forged, MAX_FORGED_LENGTH)
}

impl Merge<UpdateWeapon> for Weapon {
    fn merge(&mut self, update: &UpdateWeapon) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        for (field, value) in [
            (&mut self.description, &update.description),
            (&mut self.creator, &update.creator),
            (&mut self.wielder, &update.wielder),
            (&mut self.forged, &update.forged),
        ] {
            if value.is_some() {
                field.clone_from(value);
            }
        }
    }
}

/// Public view of a weapon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponDto {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub wielder: Option<String>,
    pub forged: Option<String>,
}

impl From<Weapon> for WeaponDto {
    fn from(weapon: Weapon) -> Self {
        Self {
            id: weapon.id,
            name: weapon.name,
            description: weapon.description,
            creator: weapon.creator,
            wielder: weapon.wielder,
            forged: weapon.forged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Weapon {
        Weapon {
            id: 9,
            name: "Dawnbreaker".into(),
            description: Some("A sword of pale steel".into()),
            creator: Some("Hala the Smith".into()),
            wielder: None,
            forged: Some("Second Age".into()),
            series_id: None,
            book_ids: vec![2],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn merge_keeps_absent_fields_and_book_links() {
        let mut weapon = sample();
        weapon.merge(&UpdateWeapon {
            wielder: Some("Ser Aldric".into()),
            ..Default::default()
        });

        assert_eq!(weapon.wielder.as_deref(), Some("Ser Aldric"));
        assert_eq!(weapon.creator.as_deref(), Some("Hala the Smith"));
        assert_eq!(weapon.forged.as_deref(), Some("Second Age"));
        assert_eq!(weapon.book_ids, vec![2]);
    }

    #[test]
    fn forged_length_is_limited() {
        let input = CreateWeapon {
            name: "Blade".into(),
            forged: Some("x".repeat(MAX_FORGED_LENGTH + 1)),
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        assert!(err.starts_with("forged exceeds maximum length"));
    }

    #[test]
    fn dto_omits_parents() {
        let json = serde_json::to_value(WeaponDto::from(sample())).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys.len(),
            6,
            "weapon DTO exposes exactly six fields, got {keys:?}"
        );
        assert!(json.get("book_ids").is_none());
    }
}
