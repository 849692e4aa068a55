//! Object-safe storage traits.
//!
//! Handlers depend on these traits rather than on a concrete pool so the
//! same router runs against PostgreSQL ([`crate::repositories`]) or the
//! in-memory tables ([`crate::memory`]).

use async_trait::async_trait;
use inkwell_core::ownership::{ParentLookup, ScopedRepository};
use inkwell_core::types::DbId;

use crate::models::book::{Book, CreateBook, UpdateBook};
use crate::models::plot::{CreatePlot, Plot, UpdatePlot};
use crate::models::plot_reference::{CreatePlotReference, PlotReference, UpdatePlotReference};
use crate::models::series::{CreateSeries, Series, UpdateSeries};
use crate::models::user::{CreateUser, User};
use crate::models::weapon::{CreateWeapon, UpdateWeapon, Weapon};

/// Owner lookups for series and books.
pub type DynParentLookup = dyn ParentLookup<Error = sqlx::Error>;

/// Storage for plots.
pub type DynPlotRepository = dyn ScopedRepository<
    Record = Plot,
    Create = CreatePlot,
    Update = UpdatePlot,
    Error = sqlx::Error,
>;

/// Storage for plot references.
pub type DynPlotReferenceRepository = dyn ScopedRepository<
    Record = PlotReference,
    Create = CreatePlotReference,
    Update = UpdatePlotReference,
    Error = sqlx::Error,
>;

/// Storage for weapons.
pub type DynWeaponRepository = dyn ScopedRepository<
    Record = Weapon,
    Create = CreateWeapon,
    Update = UpdateWeapon,
    Error = sqlx::Error,
>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
}

/// Series are owned directly by a user, so every method takes the owner.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    async fn create(&self, user_id: DbId, input: &CreateSeries) -> Result<Series, sqlx::Error>;

    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Series>, sqlx::Error>;

    async fn find_for_user(&self, id: DbId, user_id: DbId) -> Result<Option<Series>, sqlx::Error>;

    /// Returns `None` if the series does not exist or is not owned by `user_id`.
    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        input: &UpdateSeries,
    ) -> Result<Option<Series>, sqlx::Error>;

    /// Returns `true` if an owned row was removed.
    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error>;
}

/// Books are owned directly by a user and optionally sit inside a series.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, user_id: DbId, input: &CreateBook) -> Result<Book, sqlx::Error>;

    /// All books of `user_id`, optionally restricted to one series.
    async fn list_for_user(
        &self,
        user_id: DbId,
        series_id: Option<DbId>,
    ) -> Result<Vec<Book>, sqlx::Error>;

    async fn find_for_user(&self, id: DbId, user_id: DbId) -> Result<Option<Book>, sqlx::Error>;

    /// Returns `None` if the book does not exist or is not owned by `user_id`.
    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error>;

    /// Returns `true` if an owned row was removed.
    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error>;
}
