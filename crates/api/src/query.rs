//! Shared query parameter types for API handlers.

use inkwell_core::scope::ScopeParams;
use inkwell_core::types::DbId;
use serde::{Deserialize, Deserializer};

/// Scope parameters (`?seriesId=&bookId=`) for child resource routes.
///
/// An empty value (`?seriesId=`) counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ScopeQuery {
    #[serde(rename = "seriesId", default, deserialize_with = "empty_as_none")]
    pub series_id: Option<DbId>,
    #[serde(rename = "bookId", default, deserialize_with = "empty_as_none")]
    pub book_id: Option<DbId>,
}

impl From<ScopeQuery> for ScopeParams {
    fn from(query: ScopeQuery) -> Self {
        ScopeParams::new(query.series_id, query.book_id)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
