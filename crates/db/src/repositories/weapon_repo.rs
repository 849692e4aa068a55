//! Repository for the `weapons` and `weapon_books` tables.
//!
//! A weapon reaches its owner either through `weapons.series_id` or through
//! any of the books linked in `weapon_books`.

use async_trait::async_trait;
use inkwell_core::ownership::{OwnedParents, ScopedRepository};
use inkwell_core::scope::Scope;
use inkwell_core::types::DbId;
use sqlx::PgPool;

use crate::models::weapon::{CreateWeapon, UpdateWeapon, Weapon};

/// Weapon columns (alias `w`) plus the aggregated book links.
const COLUMNS: &str = "w.id, w.name, w.description, w.creator, w.wielder, w.forged, \
     w.series_id, \
     COALESCE((SELECT array_agg(wb.book_id ORDER BY wb.book_id) \
               FROM weapon_books wb WHERE wb.weapon_id = w.id), ARRAY[]::BIGINT[]) AS book_ids, \
     w.created_at, w.updated_at";

/// Join and owner filter for a scope; parent id is `$n`, owner `$n+1`.
fn scope_join(scope: Scope, n: usize) -> String {
    let owner = n + 1;
    match scope {
        Scope::Series(_) => format!(
            "JOIN series s ON s.id = w.series_id WHERE s.id = ${n} AND s.user_id = ${owner}"
        ),
        Scope::Book(_) => format!(
            "JOIN weapon_books link ON link.weapon_id = w.id \
             JOIN books b ON b.id = link.book_id \
             WHERE b.id = ${n} AND b.user_id = ${owner}"
        ),
    }
}

/// Provides scoped CRUD operations for weapons.
pub struct WeaponRepo {
    pool: PgPool,
}

impl WeaponRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScopedRepository for WeaponRepo {
    type Record = Weapon;
    type Create = CreateWeapon;
    type Update = UpdateWeapon;
    type Error = sqlx::Error;

    fn resource(&self) -> &'static str {
        "weapon"
    }

    async fn find_in_scope(
        &self,
        id: DbId,
        scope: Scope,
        user_id: DbId,
    ) -> Result<Option<Weapon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weapons w {} AND w.id = $1",
            scope_join(scope, 2)
        );
        sqlx::query_as::<_, Weapon>(&query)
            .bind(id)
            .bind(scope.id())
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_in_scope(&self, scope: Scope, user_id: DbId) -> Result<Vec<Weapon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weapons w {} ORDER BY w.id",
            scope_join(scope, 1)
        );
        sqlx::query_as::<_, Weapon>(&query)
            .bind(scope.id())
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Insert the weapon and its book link in one transaction. A resolved
    /// book becomes a one-element book collection.
    async fn insert(
        &self,
        input: &CreateWeapon,
        parents: OwnedParents,
    ) -> Result<Weapon, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO weapons (name, description, creator, wielder, forged, series_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.creator)
        .bind(&input.wielder)
        .bind(&input.forged)
        .bind(parents.series_id)
        .fetch_one(&mut *tx)
        .await?;

        let book_ids: Vec<DbId> = parents.book_id.into_iter().collect();
        for book_id in &book_ids {
            sqlx::query("INSERT INTO weapon_books (weapon_id, book_id) VALUES ($1, $2)")
                .bind(id)
                .bind(book_id)
                .execute(&mut *tx)
                .await?;
        }

        let query = format!("SELECT {COLUMNS} FROM weapons w WHERE w.id = $1");
        let weapon = sqlx::query_as::<_, Weapon>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(weapon_id = id, books = book_ids.len(), "Weapon inserted");
        Ok(weapon)
    }

    /// Write back the mutable fields. Series and book links are untouched.
    async fn save(&self, record: &Weapon) -> Result<Weapon, sqlx::Error> {
        let query = format!(
            "UPDATE weapons AS w SET
                name = $2,
                description = $3,
                creator = $4,
                wielder = $5,
                forged = $6,
                updated_at = NOW()
             WHERE w.id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Weapon>(&query)
            .bind(record.id)
            .bind(&record.name)
            .bind(&record.description)
            .bind(&record.creator)
            .bind(&record.wielder)
            .bind(&record.forged)
            .fetch_one(&self.pool)
            .await
    }

    /// Book links are removed by the `weapon_books` cascade.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM weapons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
