//! Plot entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use inkwell_core::fields::{validate_name, validate_optional_text, MAX_TEXT_LENGTH};
use inkwell_core::ownership::Merge;
use inkwell_core::plot::validate_plot_type;
use inkwell_core::types::{DbId, Timestamp};

/// A plot row from the `plots` table.
#[derive(Debug, Clone, FromRow)]
pub struct Plot {
    pub id: DbId,
    pub name: String,
    pub plot_type: Option<String>,
    pub description: Option<String>,
    pub series_id: Option<DbId>,
    pub book_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new plot. The parent comes from the scope, not the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePlot {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub plot_type: Option<String>,
    pub description: Option<String>,
}

impl CreatePlot {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        if let Some(plot_type) = &self.plot_type {
            validate_plot_type(plot_type)?;
        }
        validate_optional_text("description", self.description.as_deref(), MAX_TEXT_LENGTH)
    }
}

/// DTO for the `updatedData` of a plot PATCH. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlot {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub plot_type: Option<String>,
    pub description: Option<String>,
}

impl UpdatePlot {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(plot_type) = &self.plot_type {
            validate_plot_type(plot_type)?;
        }
        validate_optional_text("description", self.description.as_deref(), MAX_TEXT_LENGTH)
    }
}

impl Merge<UpdatePlot> for Plot {
    fn merge(&mut self, update: &UpdatePlot) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(plot_type) = &update.plot_type {
            self.plot_type = Some(plot_type.clone());
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
    }
}

/// Public view of a plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotDto {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub plot_type: Option<String>,
    pub description: Option<String>,
}

impl From<Plot> for PlotDto {
    fn from(plot: Plot) -> Self {
        Self {
            id: plot.id,
            name: plot.name,
            plot_type: plot.plot_type,
            description: plot.description,
        }
    }
}
