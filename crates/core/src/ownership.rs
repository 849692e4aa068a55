//! Ownership resolution for scoped child resources.
//!
//! Plots, plot references and weapons never carry an owner of their own.
//! They are reachable only through a series or a book, and the caller must
//! own that parent. [`OwnershipResolver`] applies the policy on top of two
//! injected collaborators:
//!
//! - [`ParentLookup`] answers "does this user own series/book N?".
//! - [`ScopedRepository`] stores the child records and performs lookups that
//!   join through the parent and filter by owner.
//!
//! Every rejection is an [`OwnershipError`] variant so handlers can map them
//! straight onto HTTP status codes. Storage failures are carried separately
//! in [`OwnershipError::Store`].

use async_trait::async_trait;

use crate::scope::{Scope, ScopeParams};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Rejections produced by the ownership policy.
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError<E> {
    /// Neither `seriesId` nor `bookId` was supplied.
    #[error("At least one of seriesId or bookId query param must be passed.")]
    MissingScope,

    /// Creation named only parents the caller does not own.
    #[error("A {resource} must be created belonging to one of your series or books.")]
    NoOwnedParent { resource: &'static str },

    /// The record is not reachable through any owned parent. Covers both
    /// "does not exist" and "belongs to someone else".
    #[error("Forbidden account action.")]
    ForbiddenAction,

    /// The underlying store failed.
    #[error("Storage failure: {0}")]
    Store(E),
}

impl<E> OwnershipError<E> {
    /// `true` for the expected business rejections, `false` for storage failures.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, OwnershipError::Store(_))
    }
}

/// Parents resolved for a new record. At least one field is set by the time
/// a repository sees it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnedParents {
    pub series_id: Option<DbId>,
    pub book_id: Option<DbId>,
}

impl OwnedParents {
    pub fn is_empty(&self) -> bool {
        self.series_id.is_none() && self.book_id.is_none()
    }
}

/// Partial-field merge of an update payload onto a stored record.
///
/// Implementations overwrite only the fields present in `update` and never
/// touch parent references.
pub trait Merge<U> {
    fn merge(&mut self, update: &U);
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Resolves whether a user owns a given series or book.
#[async_trait]
pub trait ParentLookup: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the series id when `series_id` exists and belongs to `user_id`.
    async fn find_owned_series(
        &self,
        series_id: DbId,
        user_id: DbId,
    ) -> Result<Option<DbId>, Self::Error>;

    /// Returns the book id when `book_id` exists and belongs to `user_id`.
    async fn find_owned_book(
        &self,
        book_id: DbId,
        user_id: DbId,
    ) -> Result<Option<DbId>, Self::Error>;
}

/// Storage for one kind of scoped child resource.
#[async_trait]
pub trait ScopedRepository: Send + Sync {
    type Record: Merge<Self::Update> + Send + Sync;
    type Create: Send + Sync;
    type Update: Send + Sync;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lower-case resource name used in rejection messages (e.g. `"plot"`).
    fn resource(&self) -> &'static str;

    /// Find `id` through `scope`, only if the scope's parent belongs to `user_id`.
    async fn find_in_scope(
        &self,
        id: DbId,
        scope: Scope,
        user_id: DbId,
    ) -> Result<Option<Self::Record>, Self::Error>;

    /// All records under `scope` whose parent belongs to `user_id`.
    async fn list_in_scope(
        &self,
        scope: Scope,
        user_id: DbId,
    ) -> Result<Vec<Self::Record>, Self::Error>;

    /// Persist a new record attached to `parents`.
    async fn insert(
        &self,
        input: &Self::Create,
        parents: OwnedParents,
    ) -> Result<Self::Record, Self::Error>;

    /// Persist the mutable fields of an existing record.
    async fn save(&self, record: &Self::Record) -> Result<Self::Record, Self::Error>;

    /// Hard-delete by plain id. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, Self::Error>;
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Applies the ownership policy for one resource kind.
///
/// When both scope ids are supplied they are independent alternatives:
/// success through either is enough, and on creation every owned parent is
/// attached.
pub struct OwnershipResolver<'a, P: ?Sized, R: ?Sized> {
    parents: &'a P,
    repo: &'a R,
}

impl<'a, P, R, E> OwnershipResolver<'a, P, R>
where
    P: ParentLookup<Error = E> + ?Sized,
    R: ScopedRepository<Error = E> + ?Sized,
    E: std::error::Error + Send + Sync + 'static,
{
    pub fn new(parents: &'a P, repo: &'a R) -> Self {
        Self { parents, repo }
    }

    /// Create a record under every owned parent named in `params`.
    pub async fn create(
        &self,
        user_id: DbId,
        params: ScopeParams,
        input: &R::Create,
    ) -> Result<R::Record, OwnershipError<E>> {
        require_scope(&params)?;

        let mut owned = OwnedParents::default();
        if let Some(series_id) = params.series_id {
            owned.series_id = self
                .parents
                .find_owned_series(series_id, user_id)
                .await
                .map_err(OwnershipError::Store)?;
        }
        if let Some(book_id) = params.book_id {
            owned.book_id = self
                .parents
                .find_owned_book(book_id, user_id)
                .await
                .map_err(OwnershipError::Store)?;
        }

        if owned.is_empty() {
            return Err(OwnershipError::NoOwnedParent {
                resource: self.repo.resource(),
            });
        }

        self.repo
            .insert(input, owned)
            .await
            .map_err(OwnershipError::Store)
    }

    /// Find a record through any of the supplied scopes.
    ///
    /// Every supplied scope is queried; the series result wins when both hit.
    pub async fn find(
        &self,
        id: DbId,
        user_id: DbId,
        params: ScopeParams,
    ) -> Result<R::Record, OwnershipError<E>> {
        require_scope(&params)?;

        let mut found = None;
        for scope in params.scopes() {
            let record = self
                .repo
                .find_in_scope(id, scope, user_id)
                .await
                .map_err(OwnershipError::Store)?;
            found = found.or(record);
        }

        found.ok_or(OwnershipError::ForbiddenAction)
    }

    /// List records under the primary scope (series before book, never merged).
    pub async fn list(
        &self,
        user_id: DbId,
        params: ScopeParams,
    ) -> Result<Vec<R::Record>, OwnershipError<E>> {
        let Some(scope) = params.primary() else {
            return Err(OwnershipError::MissingScope);
        };

        self.repo
            .list_in_scope(scope, user_id)
            .await
            .map_err(OwnershipError::Store)
    }

    /// Resolve the record, merge `update` onto it and persist the result.
    pub async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        params: ScopeParams,
        update: &R::Update,
    ) -> Result<R::Record, OwnershipError<E>> {
        let mut record = self.find(id, user_id, params).await?;
        record.merge(update);
        self.repo
            .save(&record)
            .await
            .map_err(OwnershipError::Store)
    }

    /// Resolve the record, then delete it by plain id.
    pub async fn delete(
        &self,
        id: DbId,
        user_id: DbId,
        params: ScopeParams,
    ) -> Result<(), OwnershipError<E>> {
        self.find(id, user_id, params).await?;

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(OwnershipError::Store)?;
        if !deleted {
            // Removed between the lookup and the delete.
            return Err(OwnershipError::ForbiddenAction);
        }
        Ok(())
    }
}

fn require_scope<E>(params: &ScopeParams) -> Result<(), OwnershipError<E>> {
    if params.is_empty() {
        Err(OwnershipError::MissingScope)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
