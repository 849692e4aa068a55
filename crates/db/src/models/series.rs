//! Series entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use inkwell_core::fields::{validate_name, validate_optional_text, MAX_NAME_LENGTH};
use inkwell_core::types::{DbId, Timestamp};

/// A series row from the `series` table.
#[derive(Debug, Clone, FromRow)]
pub struct Series {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub genre: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new series. A missing `name` deserializes as empty
/// and is rejected by [`CreateSeries::validate`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSeries {
    #[serde(default)]
    pub name: String,
    pub genre: Option<String>,
}

impl CreateSeries {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_optional_text("genre", self.genre.as_deref(), MAX_NAME_LENGTH)
    }
}

/// DTO for updating an existing series. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSeries {
    pub name: Option<String>,
    pub genre: Option<String>,
}

impl UpdateSeries {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_optional_text("genre", self.genre.as_deref(), MAX_NAME_LENGTH)
    }
}

/// Public view of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDto {
    pub id: DbId,
    pub name: String,
    pub genre: Option<String>,
}

impl From<Series> for SeriesDto {
    fn from(series: Series) -> Self {
        Self {
            id: series.id,
            name: series.name,
            genre: series.genre,
        }
    }
}
