//! Repository for the `books` table.

use async_trait::async_trait;
use inkwell_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, CreateBook, UpdateBook};
use crate::store::BookStore;

const COLUMNS: &str = "id, user_id, series_id, name, genre, created_at, updated_at";

/// Provides owner-scoped CRUD operations for books.
pub struct BookRepo {
    pool: PgPool,
}

impl BookRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BookRepo {
    async fn create(&self, user_id: DbId, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (user_id, series_id, name, genre)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(user_id)
            .bind(input.series_id)
            .bind(&input.name)
            .bind(&input.genre)
            .fetch_one(&self.pool)
            .await
    }

    async fn list_for_user(
        &self,
        user_id: DbId,
        series_id: Option<DbId>,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books
             WHERE user_id = $1 AND ($2::BIGINT IS NULL OR series_id = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(user_id)
            .bind(series_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_for_user(&self, id: DbId, user_id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Book>(&query)
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
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                name = COALESCE($3, name),
                genre = COALESCE($4, genre),
                series_id = COALESCE($5, series_id),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.genre)
            .bind(input.series_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Plots and plot references in the book are removed by cascade, as are
    /// its weapon links.
    /// Plots and plot references go with the book through the foreign keys
    /// and its `weapon_books` links are dropped. Weapons left with neither
    /// a series nor another book are removed.
    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let orphaned = sqlx::query(
            "DELETE FROM weapons w \
             USING weapon_books wb, books b \
             WHERE wb.weapon_id = w.id AND wb.book_id = b.id \
               AND b.id = $1 AND b.user_id = $2 \
               AND w.series_id IS NULL \
               AND NOT EXISTS ( \
                   SELECT 1 FROM weapon_books other \
                   WHERE other.weapon_id = w.id AND other.book_id <> $1)",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        tracing::debug!(
            book_id = id,
            orphaned_weapons = orphaned.rows_affected(),
            "Book deleted"
        );
        Ok(true)
    }
}
