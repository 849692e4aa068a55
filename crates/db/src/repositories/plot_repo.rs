//! Repository for the `plots` table.

use async_trait::async_trait;
use inkwell_core::ownership::{OwnedParents, ScopedRepository};
use inkwell_core::scope::Scope;
use inkwell_core::types::DbId;
use sqlx::PgPool;

use super::direct_scope_join;
use crate::models::plot::{CreatePlot, Plot, UpdatePlot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, plot_type, description, series_id, book_id, created_at, updated_at";

/// The same columns qualified with the `c` alias used in scoped joins.
const SCOPED_COLUMNS: &str = "c.id, c.name, c.plot_type, c.description, c.series_id, \
     c.book_id, c.created_at, c.updated_at";

/// Provides scoped CRUD operations for plots.
pub struct PlotRepo {
    pool: PgPool,
}

impl PlotRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScopedRepository for PlotRepo {
    type Record = Plot;
    type Create = CreatePlot;
    type Update = UpdatePlot;
    type Error = sqlx::Error;

    fn resource(&self) -> &'static str {
        "plot"
    }

    async fn find_in_scope(
        &self,
        id: DbId,
        scope: Scope,
        user_id: DbId,
    ) -> Result<Option<Plot>, sqlx::Error> {
        let query = format!(
            "SELECT {SCOPED_COLUMNS} FROM plots c {} AND c.id = $1",
            direct_scope_join(scope, 2)
        );
        sqlx::query_as::<_, Plot>(&query)
            .bind(id)
            .bind(scope.id())
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_in_scope(&self, scope: Scope, user_id: DbId) -> Result<Vec<Plot>, sqlx::Error> {
        let query = format!(
            "SELECT {SCOPED_COLUMNS} FROM plots c {} ORDER BY c.id",
            direct_scope_join(scope, 1)
        );
        sqlx::query_as::<_, Plot>(&query)
            .bind(scope.id())
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn insert(&self, input: &CreatePlot, parents: OwnedParents) -> Result<Plot, sqlx::Error> {
        let query = format!(
            "INSERT INTO plots (name, plot_type, description, series_id, book_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plot>(&query)
            .bind(&input.name)
            .bind(&input.plot_type)
            .bind(&input.description)
            .bind(parents.series_id)
            .bind(parents.book_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Write back the mutable fields. Parent columns are never updated here.
    async fn save(&self, record: &Plot) -> Result<Plot, sqlx::Error> {
        let query = format!(
            "UPDATE plots SET
                name = $2,
                plot_type = $3,
                description = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plot>(&query)
            .bind(record.id)
            .bind(&record.name)
            .bind(&record.plot_type)
            .bind(&record.description)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
