//! Repository for the `plot_references` table.

use async_trait::async_trait;
use inkwell_core::ownership::{OwnedParents, ScopedRepository};
use inkwell_core::scope::Scope;
use inkwell_core::types::DbId;
use sqlx::PgPool;

use super::direct_scope_join;
use crate::models::plot_reference::{CreatePlotReference, PlotReference, UpdatePlotReference};

const COLUMNS: &str = "id, name, reference_type, reference_id, series_id, book_id, \
     created_at, updated_at";

const SCOPED_COLUMNS: &str = "c.id, c.name, c.reference_type, c.reference_id, c.series_id, \
     c.book_id, c.created_at, c.updated_at";

/// Provides scoped CRUD operations for plot references.
pub struct PlotReferenceRepo {
    pool: PgPool,
}

impl PlotReferenceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScopedRepository for PlotReferenceRepo {
    type Record = PlotReference;
    type Create = CreatePlotReference;
    type Update = UpdatePlotReference;
    type Error = sqlx::Error;

    fn resource(&self) -> &'static str {
        "plot reference"
    }

    async fn find_in_scope(
        &self,
        id: DbId,
        scope: Scope,
        user_id: DbId,
    ) -> Result<Option<PlotReference>, sqlx::Error> {
        let query = format!(
            "SELECT {SCOPED_COLUMNS} FROM plot_references c {} AND c.id = $1",
            direct_scope_join(scope, 2)
        );
        sqlx::query_as::<_, PlotReference>(&query)
            .bind(id)
            .bind(scope.id())
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_in_scope(
        &self,
        scope: Scope,
        user_id: DbId,
    ) -> Result<Vec<PlotReference>, sqlx::Error> {
        let query = format!(
            "SELECT {SCOPED_COLUMNS} FROM plot_references c {} ORDER BY c.id",
            direct_scope_join(scope, 1)
        );
        sqlx::query_as::<_, PlotReference>(&query)
            .bind(scope.id())
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn insert(
        &self,
        input: &CreatePlotReference,
        parents: OwnedParents,
    ) -> Result<PlotReference, sqlx::Error> {
        let query = format!(
            "INSERT INTO plot_references (name, reference_type, reference_id, series_id, book_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlotReference>(&query)
            .bind(&input.name)
            .bind(&input.reference_type)
            .bind(input.reference_id)
            .bind(parents.series_id)
            .bind(parents.book_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn save(&self, record: &PlotReference) -> Result<PlotReference, sqlx::Error> {
        let query = format!(
            "UPDATE plot_references SET
                name = $2,
                reference_type = $3,
                reference_id = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlotReference>(&query)
            .bind(record.id)
            .bind(&record.name)
            .bind(&record.reference_type)
            .bind(record.reference_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plot_references WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
