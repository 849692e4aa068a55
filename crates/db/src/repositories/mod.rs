//! PostgreSQL repositories, one per table, plus the [`Repositories`] bundle
//! handed to the API layer.

use std::sync::Arc;

use inkwell_core::scope::Scope;

use crate::store::{
    BookStore, DynParentLookup, DynPlotReferenceRepository, DynPlotRepository,
    DynWeaponRepository, SeriesStore, UserStore,
};
use crate::DbPool;

pub mod book_repo;
pub mod ownership_repo;
pub mod plot_reference_repo;
pub mod plot_repo;
pub mod series_repo;
pub mod user_repo;
pub mod weapon_repo;

pub use book_repo::BookRepo;
pub use ownership_repo::OwnershipRepo;
pub use plot_reference_repo::PlotReferenceRepo;
pub use plot_repo::PlotRepo;
pub use series_repo::SeriesRepo;
pub use user_repo::UserRepo;
pub use weapon_repo::WeaponRepo;

/// Every store the API needs, injected as trait objects.
#[derive(Clone)]
pub struct Repositories {
    /// Present only for the PostgreSQL backend; used by the health probe.
    pub pool: Option<DbPool>,
    pub users: Arc<dyn UserStore>,
    pub series: Arc<dyn SeriesStore>,
    pub books: Arc<dyn BookStore>,
    pub parents: Arc<DynParentLookup>,
    pub plots: Arc<DynPlotRepository>,
    pub plot_references: Arc<DynPlotReferenceRepository>,
    pub weapons: Arc<DynWeaponRepository>,
}

impl Repositories {
    /// Repositories backed by the given PostgreSQL pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            users: Arc::new(UserRepo::new(pool.clone())),
            series: Arc::new(SeriesRepo::new(pool.clone())),
            books: Arc::new(BookRepo::new(pool.clone())),
            parents: Arc::new(OwnershipRepo::new(pool.clone())),
            plots: Arc::new(PlotRepo::new(pool.clone())),
            plot_references: Arc::new(PlotReferenceRepo::new(pool.clone())),
            weapons: Arc::new(WeaponRepo::new(pool.clone())),
            pool: Some(pool),
        }
    }
}

/// SQL fragment joining a child table (aliased `c`) to its owning parent and
/// filtering by parent id (`$n`) and owner (`$n+1`).
///
/// Used by plots and plot references, which hold `series_id` / `book_id`
/// columns directly.
pub(crate) fn direct_scope_join(scope: Scope, n: usize) -> String {
    let owner = n + 1;
    match scope {
        Scope::Series(_) => format!(
            "JOIN series s ON s.id = c.series_id WHERE s.id = ${n} AND s.user_id = ${owner}"
        ),
        Scope::Book(_) => format!(
            "JOIN books b ON b.id = c.book_id WHERE b.id = ${n} AND b.user_id = ${owner}"
        ),
    }
}
