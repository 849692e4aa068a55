//! Owner lookups for series and books.

use async_trait::async_trait;
use inkwell_core::ownership::ParentLookup;
use inkwell_core::types::DbId;
use sqlx::PgPool;

/// Answers whether a user owns a given series or book.
pub struct OwnershipRepo {
    pool: PgPool,
}

impl OwnershipRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParentLookup for OwnershipRepo {
    type Error = sqlx::Error;

    async fn find_owned_series(
        &self,
        series_id: DbId,
        user_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM series WHERE id = $1 AND user_id = $2")
            .bind(series_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_owned_book(
        &self,
        book_id: DbId,
        user_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM books WHERE id = $1 AND user_id = $2")
            .bind(book_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }
}
