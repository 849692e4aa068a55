//! Plot-reference entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use inkwell_core::fields::validate_name;
use inkwell_core::ownership::Merge;
use inkwell_core::plot_reference::{validate_reference_id, validate_reference_type};
use inkwell_core::types::{DbId, Timestamp};

/// A row from the `plot_references` table.
#[derive(Debug, Clone, FromRow)]
pub struct PlotReference {
    pub id: DbId,
    pub name: String,
    pub reference_type: Option<String>,
    pub reference_id: Option<DbId>,
    pub series_id: Option<DbId>,
    pub book_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new plot reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlotReference {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub reference_type: Option<String>,
    pub reference_id: Option<DbId>,
}

impl CreatePlotReference {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_fields(self.reference_type.as_deref(), self.reference_id)
    }
}

/// DTO for the `updatedData` of a plot-reference PATCH.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlotReference {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub reference_type: Option<String>,
    pub reference_id: Option<DbId>,
}

impl UpdatePlotReference {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_fields(self.reference_type.as_deref(), self.reference_id)
    }
}

fn validate_fields(reference_type: Option<&str>, reference_id: Option<DbId>) -> Result<(), String> {
    if let Some(reference_type) = reference_type {
        validate_reference_type(reference_type)?;
    }
    if let Some(reference_id) = reference_id {
        validate_reference_id(reference_id)?;
    }
    Ok(())
}

impl Merge<UpdatePlotReference> for PlotReference {
    fn merge(&mut self, update: &UpdatePlotReference) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(reference_type) = &update.reference_type {
            self.reference_type = Some(reference_type.clone());
        }
        if let Some(reference_id) = update.reference_id {
            self.reference_id = Some(reference_id);
        }
    }
}

/// Public view of a plot reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotReferenceDto {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub reference_type: Option<String>,
    pub reference_id: Option<DbId>,
}

impl From<PlotReference> for PlotReferenceDto {
    fn from(reference: PlotReference) -> Self {
        Self {
            id: reference.id,
            name: reference.name,
            reference_type: reference.reference_type,
            reference_id: reference.reference_id,
        }
    }
}
