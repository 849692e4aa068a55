//! In-memory repositories with the same semantics as the PostgreSQL ones.
//!
//! Useful for development without a database and for HTTP-level tests.
//! Ids are assigned per table starting at 1, and parent deletes cascade the
//! way the migrations' foreign keys do.

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use inkwell_core::ownership::{Merge, OwnedParents, ParentLookup, ScopedRepository};
use inkwell_core::scope::Scope;
use inkwell_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::book::{Book, CreateBook, UpdateBook};
use crate::models::plot::{CreatePlot, Plot, UpdatePlot};
use crate::models::plot_reference::{CreatePlotReference, PlotReference, UpdatePlotReference};
use crate::models::series::{CreateSeries, Series, UpdateSeries};
use crate::models::user::{CreateUser, User};
use crate::models::weapon::{CreateWeapon, UpdateWeapon, Weapon};
use crate::repositories::Repositories;
use crate::store::{BookStore, SeriesStore, UserStore};

#[derive(Default)]
struct Tables {
    users: BTreeMap<DbId, User>,
    series: BTreeMap<DbId, Series>,
    books: BTreeMap<DbId, Book>,
    plots: BTreeMap<DbId, Plot>,
    plot_references: BTreeMap<DbId, PlotReference>,
    weapons: BTreeMap<DbId, Weapon>,
    sequences: HashMap<&'static str, DbId>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> DbId {
        let last = self.sequences.entry(table).or_default();
        *last += 1;
        *last
    }

    fn owns(&self, scope: Scope, user_id: DbId) -> bool {
        match scope {
            Scope::Series(id) => self.series.get(&id).is_some_and(|s| s.user_id == user_id),
            Scope::Book(id) => self.books.get(&id).is_some_and(|b| b.user_id == user_id),
        }
    }
}

type Shared = Arc<RwLock<Tables>>;

impl Repositories {
    /// A fresh, empty set of in-memory repositories sharing one set of tables.
    pub fn in_memory() -> Self {
        let tables: Shared = Arc::default();
        Self {
            pool: None,
            users: Arc::new(MemoryUsers(tables.clone())),
            series: Arc::new(MemorySeries(tables.clone())),
            books: Arc::new(MemoryBooks(tables.clone())),
            parents: Arc::new(MemoryParents(tables.clone())),
            plots: Arc::new(MemoryScoped::<Plot>::new(tables.clone())),
            plot_references: Arc::new(MemoryScoped::<PlotReference>::new(tables.clone())),
            weapons: Arc::new(MemoryScoped::<Weapon>::new(tables)),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

struct MemoryUsers(Shared);

#[async_trait]
impl UserStore for MemoryUsers {
    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tables = self.0.write().await;
        let user = User {
            id: tables.next_id("users"),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        Ok(self.0.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let tables = self.0.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let tables = self.0.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

// ---------------------------------------------------------------------------
// Series and books
// ---------------------------------------------------------------------------

struct MemorySeries(Shared);

#[async_trait]
impl SeriesStore for MemorySeries {
    async fn create(&self, user_id: DbId, input: &CreateSeries) -> Result<Series, sqlx::Error> {
        let mut tables = self.0.write().await;
        let now = Utc::now();
        let series = Series {
            id: tables.next_id("series"),
            user_id,
            name: input.name.clone(),
            genre: input.genre.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.series.insert(series.id, series.clone());
        Ok(series)
    }

    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Series>, sqlx::Error> {
        let tables = self.0.read().await;
        Ok(tables
            .series
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_for_user(&self, id: DbId, user_id: DbId) -> Result<Option<Series>, sqlx::Error> {
        let tables = self.0.read().await;
        Ok(tables
            .series
            .get(&id)
            .filter(|s| s.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        input: &UpdateSeries,
    ) -> Result<Option<Series>, sqlx::Error> {
        let mut tables = self.0.write().await;
        let Some(series) = tables.series.get_mut(&id).filter(|s| s.user_id == user_id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            series.name = name.clone();
        }
        if let Some(genre) = &input.genre {
            series.genre = Some(genre.clone());
        }
        series.updated_at = Utc::now();
        Ok(Some(series.clone()))
    }

    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.0.write().await;
        if !tables.owns(Scope::Series(id), user_id) {
            return Ok(false);
        }
        tables.series.remove(&id);
        tables.plots.retain(|_, p| p.series_id != Some(id));
        tables.plot_references.retain(|_, r| r.series_id != Some(id));
        for book in tables.books.values_mut().filter(|b| b.series_id == Some(id)) {
            book.series_id = None;
        }
        tables
            .weapons
            .retain(|_, w| !(w.series_id == Some(id) && w.book_ids.is_empty()));
        for weapon in tables.weapons.values_mut().filter(|w| w.series_id == Some(id)) {
            weapon.series_id = None;
        }
        Ok(true)
    }
}

struct MemoryBooks(Shared);

#[async_trait]
impl BookStore for MemoryBooks {
    async fn create(&self, user_id: DbId, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let mut tables = self.0.write().await;
        let now = Utc::now();
        let book = Book {
            id: tables.next_id("books"),
            user_id,
            series_id: input.series_id,
            name: input.name.clone(),
            genre: input.genre.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn list_for_user(
        &self,
        user_id: DbId,
        series_id: Option<DbId>,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let tables = self.0.read().await;
        Ok(tables
            .books
            .values()
            .filter(|b| b.user_id == user_id)
            .filter(|b| series_id.is_none() || b.series_id == series_id)
            .cloned()
            .collect())
    }

    async fn find_for_user(&self, id: DbId, user_id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let tables = self.0.read().await;
        Ok(tables.books.get(&id).filter(|b| b.user_id == user_id).cloned())
    }

    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let mut tables = self.0.write().await;
        let Some(book) = tables.books.get_mut(&id).filter(|b| b.user_id == user_id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            book.name = name.clone();
        }
        if let Some(genre) = &input.genre {
            book.genre = Some(genre.clone());
        }
        if let Some(series_id) = input.series_id {
            book.series_id = Some(series_id);
        }
        book.updated_at = Utc::now();
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.0.write().await;
        if !tables.owns(Scope::Book(id), user_id) {
            return Ok(false);
        }
        tables.books.remove(&id);
        tables.plots.retain(|_, p| p.book_id != Some(id));
        tables.plot_references.retain(|_, r| r.book_id != Some(id));
        tables.weapons.retain(|_, w| {
            let linked = w.book_ids.contains(&id);
            w.book_ids.retain(|b| *b != id);
            !(linked && w.series_id.is_none() && w.book_ids.is_empty())
        });
        Ok(true)
    }
}

struct MemoryParents(Shared);

#[async_trait]
impl ParentLookup for MemoryParents {
    type Error = sqlx::Error;

    async fn find_owned_series(
        &self,
        series_id: DbId,
        user_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let tables = self.0.read().await;
        Ok(tables
            .owns(Scope::Series(series_id), user_id)
            .then_some(series_id))
    }

    async fn find_owned_book(
        &self,
        book_id: DbId,
        user_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let tables = self.0.read().await;
        Ok(tables.owns(Scope::Book(book_id), user_id).then_some(book_id))
    }
}

// ---------------------------------------------------------------------------
// Scoped children
// ---------------------------------------------------------------------------

/// A child row stored in one of the in-memory tables.
trait MemoryRow: Clone + Send + Sync + 'static {
    type Create: Send + Sync;
    type Update: Send + Sync;

    const RESOURCE: &'static str;
    const TABLE: &'static str;

    fn table(tables: &Tables) -> &BTreeMap<DbId, Self>;
    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<DbId, Self>;
    fn build(id: DbId, input: &Self::Create, parents: OwnedParents) -> Self;
    fn id(&self) -> DbId;
    fn in_scope(&self, scope: Scope) -> bool;
    fn touch(&mut self);
}

impl MemoryRow for Plot {
    type Create = CreatePlot;
    type Update = UpdatePlot;

    const RESOURCE: &'static str = "plot";
    const TABLE: &'static str = "plots";

    fn table(tables: &Tables) -> &BTreeMap<DbId, Self> {
        &tables.plots
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.plots
    }

    fn build(id: DbId, input: &CreatePlot, parents: OwnedParents) -> Self {
        let now = Utc::now();
        Plot {
            id,
            name: input.name.clone(),
            plot_type: input.plot_type.clone(),
            description: input.description.clone(),
            series_id: parents.series_id,
            book_id: parents.book_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> DbId {
        self.id
    }

    fn in_scope(&self, scope: Scope) -> bool {
        match scope {
            Scope::Series(id) => self.series_id == Some(id),
            Scope::Book(id) => self.book_id == Some(id),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl MemoryRow for PlotReference {
    type Create = CreatePlotReference;
    type Update = UpdatePlotReference;

    const RESOURCE: &'static str = "plot reference";
    const TABLE: &'static str = "plot_references";

    fn table(tables: &Tables) -> &BTreeMap<DbId, Self> {
        &tables.plot_references
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.plot_references
    }

    fn build(id: DbId, input: &CreatePlotReference, parents: OwnedParents) -> Self {
        let now = Utc::now();
        PlotReference {
            id,
            name: input.name.clone(),
            reference_type: input.reference_type.clone(),
            reference_id: input.reference_id,
            series_id: parents.series_id,
            book_id: parents.book_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> DbId {
        self.id
    }

    fn in_scope(&self, scope: Scope) -> bool {
        match scope {
            Scope::Series(id) => self.series_id == Some(id),
            Scope::Book(id) => self.book_id == Some(id),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl MemoryRow for Weapon {
    type Create = CreateWeapon;
    type Update = UpdateWeapon;

    const RESOURCE: &'static str = "weapon";
    const TABLE: &'static str = "weapons";

    fn table(tables: &Tables) -> &BTreeMap<DbId, Self> {
        &tables.weapons
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.weapons
    }

    /// The resolved book becomes a one-element book collection.
    fn build(id: DbId, input: &CreateWeapon, parents: OwnedParents) -> Self {
        let now = Utc::now();
        Weapon {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            creator: input.creator.clone(),
            wielder: input.wielder.clone(),
            forged: input.forged.clone(),
            series_id: parents.series_id,
            book_ids: parents.book_id.into_iter().collect(),
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> DbId {
        self.id
    }

    fn in_scope(&self, scope: Scope) -> bool {
        match scope {
            Scope::Series(id) => self.series_id == Some(id),
            Scope::Book(id) => self.book_ids.contains(&id),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

struct MemoryScoped<T> {
    tables: Shared,
    _row: PhantomData<fn() -> T>,
}

impl<T> MemoryScoped<T> {
    fn new(tables: Shared) -> Self {
        Self {
            tables,
            _row: PhantomData,
        }
    }
}

#[async_trait]
impl<T> ScopedRepository for MemoryScoped<T>
where
    T: MemoryRow + Merge<<T as MemoryRow>::Update>,
{
    type Record = T;
    type Create = <T as MemoryRow>::Create;
    type Update = <T as MemoryRow>::Update;
    type Error = sqlx::Error;

    fn resource(&self) -> &'static str {
        T::RESOURCE
    }

    async fn find_in_scope(
        &self,
        id: DbId,
        scope: Scope,
        user_id: DbId,
    ) -> Result<Option<T>, sqlx::Error> {
        let tables = self.tables.read().await;
        if !tables.owns(scope, user_id) {
            return Ok(None);
        }
        Ok(T::table(&tables)
            .get(&id)
            .filter(|row| row.in_scope(scope))
            .cloned())
    }

    async fn list_in_scope(&self, scope: Scope, user_id: DbId) -> Result<Vec<T>, sqlx::Error> {
        let tables = self.tables.read().await;
        if !tables.owns(scope, user_id) {
            return Ok(Vec::new());
        }
        Ok(T::table(&tables)
            .values()
            .filter(|row| row.in_scope(scope))
            .cloned()
            .collect())
    }

    async fn insert(&self, input: &Self::Create, parents: OwnedParents) -> Result<T, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id(T::TABLE);
        let row = T::build(id, input, parents);
        T::table_mut(&mut tables).insert(id, row.clone());
        Ok(row)
    }

    async fn save(&self, record: &T) -> Result<T, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let Some(row) = T::table_mut(&mut tables).get_mut(&record.id()) else {
            return Err(sqlx::Error::RowNotFound);
        };
        *row = record.clone();
        row.touch();
        Ok(row.clone())
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.write().await;
        Ok(T::table_mut(&mut tables).remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use inkwell_core::ownership::{OwnershipError, OwnershipResolver};
    use inkwell_core::scope::ScopeParams;

    use super::*;

    async fn seed_owner(repos: &Repositories) -> (DbId, DbId, DbId) {
        let user = repos
            .users
            .create(&CreateUser {
                username: "ursula".into(),
                email: "ursula@example.com".into(),
                password_hash: "x".into(),
            })
            .await
            .unwrap();
        let series = repos
            .series
            .create(
                user.id,
                &CreateSeries {
                    name: "Earthsea".into(),
                    genre: Some("fantasy".into()),
                },
            )
            .await
            .unwrap();
        let book = repos
            .books
            .create(
                user.id,
                &CreateBook {
                    name: "A Wizard of Earthsea".into(),
                    genre: None,
                    series_id: Some(series.id),
                },
            )
            .await
            .unwrap();
        (user.id, series.id, book.id)
    }

    #[tokio::test]
    async fn ids_start_at_one_per_table() {
        let repos = Repositories::in_memory();
        let (user_id, series_id, book_id) = seed_owner(&repos).await;
        assert_eq!((user_id, series_id, book_id), (1, 1, 1));
    }

    #[tokio::test]
    async fn weapon_created_in_book_holds_one_element_collection() {
        let repos = Repositories::in_memory();
        let (user_id, _, book_id) = seed_owner(&repos).await;

        let weapon = OwnershipResolver::new(&*repos.parents, &*repos.weapons)
            .create(
                user_id,
                ScopeParams::book(book_id),
                &CreateWeapon {
                    name: "Staff of Ged".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(weapon.book_ids, vec![book_id]);
        assert_eq!(weapon.series_id, None);
    }

    #[tokio::test]
    async fn plot_created_in_book_holds_single_reference() {
        let repos = Repositories::in_memory();
        let (user_id, _, book_id) = seed_owner(&repos).await;

        let plot = OwnershipResolver::new(&*repos.parents, &*repos.plots)
            .create(
                user_id,
                ScopeParams::book(book_id),
                &CreatePlot {
                    name: "The Shadow".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(plot.book_id, Some(book_id));
    }

    #[tokio::test]
    async fn deleting_series_cascades_to_children() {
        let repos = Repositories::in_memory();
        let (user_id, series_id, book_id) = seed_owner(&repos).await;
        let resolver = OwnershipResolver::new(&*repos.parents, &*repos.plots);
        let plot = resolver
            .create(
                user_id,
                ScopeParams::series(series_id),
                &CreatePlot {
                    name: "Arc".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(repos.series.delete(series_id, user_id).await.unwrap());

        assert_matches!(
            resolver
                .find(plot.id, user_id, ScopeParams::series(series_id))
                .await,
            Err(OwnershipError::ForbiddenAction)
        );
        let book = repos.books.find_for_user(book_id, user_id).await.unwrap();
        assert_eq!(book.unwrap().series_id, None);
    }

    #[tokio::test]
    async fn foreign_user_cannot_delete_series() {
        let repos = Repositories::in_memory();
        let (_, series_id, _) = seed_owner(&repos).await;
        assert!(!repos.series.delete(series_id, 99).await.unwrap());
        assert!(repos.series.find_for_user(series_id, 1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_book_unlinks_weapons() {
        let repos = Repositories::in_memory();
        let (user_id, series_id, book_id) = seed_owner(&repos).await;
        let weapon = OwnershipResolver::new(&*repos.parents, &*repos.weapons)
            .create(
                user_id,
                ScopeParams::new(Some(series_id), Some(book_id)),
                &CreateWeapon {
                    name: "Sword of Erreth-Akbe".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(repos.books.delete(book_id, user_id).await.unwrap());

        let still_there = repos
            .weapons
            .find_in_scope(weapon.id, Scope::Series(series_id), user_id)
            .await
            .unwrap()
            .expect("weapon survives through its series");
        assert!(still_there.book_ids.is_empty());
    }

    #[tokio::test]
    async fn weapon_goes_with_its_last_parent() {
        let repos = Repositories::in_memory();
        let (user_id, series_id, book_id) = seed_owner(&repos).await;
        let weapon = OwnershipResolver::new(&*repos.parents, &*repos.weapons)
            .create(
                user_id,
                ScopeParams::new(Some(series_id), Some(book_id)),
                &CreateWeapon {
                    name: "Sword of Erreth-Akbe".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(repos.series.delete(series_id, user_id).await.unwrap());
        let through_book = repos
            .weapons
            .find_in_scope(weapon.id, Scope::Book(book_id), user_id)
            .await
            .unwrap()
            .expect("weapon survives through its book");
        assert_eq!(through_book.series_id, None);

        assert!(repos.books.delete(book_id, user_id).await.unwrap());
        assert!(!repos.weapons.delete(weapon.id).await.unwrap());
    }

    #[tokio::test]
    async fn book_delete_leaves_weapons_of_other_books() {
        let repos = Repositories::in_memory();
        let (user_id, _, book_id) = seed_owner(&repos).await;
        let other_book = repos
            .books
            .create(
                user_id,
                &CreateBook {
                    name: "The Tombs of Atuan".into(),
                    genre: None,
                    series_id: None,
                },
            )
            .await
            .unwrap()
            .id;
        let resolver = OwnershipResolver::new(&*repos.parents, &*repos.weapons);
        let staff = CreateWeapon {
            name: "Staff".into(),
            ..Default::default()
        };
        let doomed = resolver
            .create(user_id, ScopeParams::book(book_id), &staff)
            .await
            .unwrap();
        let kept = resolver
            .create(user_id, ScopeParams::book(other_book), &staff)
            .await
            .unwrap();

        assert!(repos.books.delete(book_id, user_id).await.unwrap());

        assert!(!repos.weapons.delete(doomed.id).await.unwrap());
        let survivor = repos
            .weapons
            .find_in_scope(kept.id, Scope::Book(other_book), user_id)
            .await
            .unwrap()
            .expect("weapon in the other book is untouched");
        assert_eq!(survivor.book_ids, vec![other_book]);
    }
}
