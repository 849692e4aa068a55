//! Shared request body types.

use inkwell_core::error::CoreError;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Body of every PATCH route: `{ "updatedData": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct UpdateEnvelope<T> {
    #[serde(rename = "updatedData")]
    pub updated_data: Option<T>,
}

impl<T> UpdateEnvelope<T> {
    /// The update payload, or a validation error when `updatedData` is absent.
    pub fn into_inner(self) -> AppResult<T> {
        self.updated_data.ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "The updatedData field is required.".into(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Rename {
        name: Option<String>,
    }

    #[test]
    fn payload_is_unwrapped() {
        let body: UpdateEnvelope<Rename> =
            serde_json::from_value(json!({ "updatedData": { "name": "New" } })).unwrap();
        let update = body.into_inner().unwrap();
        assert_eq!(update.name.as_deref(), Some("New"));
    }

    #[test]
    fn missing_payload_is_validation_error() {
        let body: UpdateEnvelope<Rename> =
            serde_json::from_value(json!({ "name": "New" })).unwrap();
        assert_matches!(
            body.into_inner(),
            Err(AppError::Core(CoreError::Validation(msg)))
                if msg == "The updatedData field is required."
        );
    }
}
