//! Parent scopes for child resources (plots, plot references, weapons).
//!
//! A child resource is always reached through a parent: a series or a book.
//! Requests carry up to two optional scope ids (`seriesId`, `bookId`) and the
//! ownership resolver treats each present id as an independent path.

use crate::types::DbId;

/// A single parent through which a child resource is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Series(DbId),
    Book(DbId),
}

impl Scope {
    /// Human-readable kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Scope::Series(_) => "series",
            Scope::Book(_) => "book",
        }
    }

    pub fn id(&self) -> DbId {
        match self {
            Scope::Series(id) | Scope::Book(id) => *id,
        }
    }
}

/// The optional `seriesId` / `bookId` pair supplied with a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeParams {
    pub series_id: Option<DbId>,
    pub book_id: Option<DbId>,
}

impl ScopeParams {
    pub fn new(series_id: Option<DbId>, book_id: Option<DbId>) -> Self {
        Self { series_id, book_id }
    }

    pub fn series(series_id: DbId) -> Self {
        Self::new(Some(series_id), None)
    }

    pub fn book(book_id: DbId) -> Self {
        Self::new(None, Some(book_id))
    }

    /// `true` when neither scope id was supplied.
    pub fn is_empty(&self) -> bool {
        self.series_id.is_none() && self.book_id.is_none()
    }

    /// Every supplied scope, series first.
    pub fn scopes(&self) -> Vec<Scope> {
        self.series_id
            .map(Scope::Series)
            .into_iter()
            .chain(self.book_id.map(Scope::Book))
            .collect()
    }

    /// The single scope consulted for listing: series wins over book.
    pub fn primary(&self) -> Option<Scope> {
        self.series_id
            .map(Scope::Series)
            .or(self.book_id.map(Scope::Book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_have_no_scopes() {
        let params = ScopeParams::default();
        assert!(params.is_empty());
        assert!(params.scopes().is_empty());
        assert_eq!(params.primary(), None);
    }

    #[test]
    fn scopes_are_ordered_series_first() {
        let params = ScopeParams::new(Some(3), Some(9));
        assert_eq!(params.scopes(), vec![Scope::Series(3), Scope::Book(9)]);
    }

    #[test]
    fn primary_prefers_series() {
        assert_eq!(
            ScopeParams::new(Some(3), Some(9)).primary(),
            Some(Scope::Series(3))
        );
        assert_eq!(ScopeParams::book(9).primary(), Some(Scope::Book(9)));
    }

    #[test]
    fn scope_kind_and_id() {
        assert_eq!(Scope::Series(4).kind(), "series");
        assert_eq!(Scope::Book(5).kind(), "book");
        assert_eq!(Scope::Book(5).id(), 5);
    }
}
