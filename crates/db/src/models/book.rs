//! Book entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use inkwell_core::fields::{validate_name, validate_optional_text, MAX_NAME_LENGTH};
use inkwell_core::types::{DbId, Timestamp};

/// A book row from the `books` table.
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: DbId,
    pub user_id: DbId,
    pub series_id: Option<DbId>,
    pub name: String,
    pub genre: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new book, optionally inside one of the caller's series.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[serde(default)]
    pub name: String,
    pub genre: Option<String>,
    pub series_id: Option<DbId>,
}

impl CreateBook {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_optional_text("genre", self.genre.as_deref(), MAX_NAME_LENGTH)
    }
}

/// DTO for updating an existing book. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub series_id: Option<DbId>,
}

impl UpdateBook {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_optional_text("genre", self.genre.as_deref(), MAX_NAME_LENGTH)
    }
}

/// Public view of a book.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: DbId,
    pub name: String,
    pub genre: Option<String>,
    pub series_id: Option<DbId>,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            genre: book.genre,
            series_id: book.series_id,
        }
    }
}
