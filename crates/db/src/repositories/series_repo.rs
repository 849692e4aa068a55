//! Repository for the `series` table.

use async_trait::async_trait;
use inkwell_core::types::DbId;
use sqlx::PgPool;

use crate::models::series::{CreateSeries, Series, UpdateSeries};
use crate::store::SeriesStore;

const COLUMNS: &str = "id, user_id, name, genre, created_at, updated_at";

/// Provides owner-scoped CRUD operations for series.
pub struct SeriesRepo {
    pool: PgPool,
}

impl SeriesRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeriesStore for SeriesRepo {
    async fn create(&self, user_id: DbId, input: &CreateSeries) -> Result<Series, sqlx::Error> {
        let query = format!(
            "INSERT INTO series (user_id, name, genre)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Series>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.genre)
            .fetch_one(&self.pool)
            .await
    }

    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Series>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM series WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Series>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_for_user(&self, id: DbId, user_id: DbId) -> Result<Option<Series>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM series WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Series>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Only non-`None` fields in `input` are applied.
    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        input: &UpdateSeries,
    ) -> Result<Option<Series>, sqlx::Error> {
        let query = format!(
            "UPDATE series SET
                name = COALESCE($3, name),
                genre = COALESCE($4, genre),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Series>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.genre)
            .fetch_optional(&self.pool)
            .await
    }

    /// Plots and plot references under the series are removed by cascade.
    /// Plots and plot references go with the series through the foreign
    /// keys. Weapons whose only parent was this series are removed first;
    /// the rest have `series_id` nulled.
    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let orphaned = sqlx::query(
            "DELETE FROM weapons w \
             USING series s \
             WHERE w.series_id = s.id AND s.id = $1 AND s.user_id = $2 \
               AND NOT EXISTS (SELECT 1 FROM weapon_books wb WHERE wb.weapon_id = w.id)",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM series WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        tracing::debug!(
            series_id = id,
            orphaned_weapons = orphaned.rows_affected(),
            "Series deleted"
        );
        Ok(true)
    }
}
