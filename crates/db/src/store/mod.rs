//! Record store contract.
//!
//! The persistence engine is an external collaborator; [`EntryStore`] is
//! the thin seam over it. Implementations must deliver rows in
//! `(created_at DESC, id DESC)` order with an exclusive lower bound, which
//! is the whole of the pagination protocol's ordering contract.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use cinelog_core::entry::{Entry, EntryPatch, NewEntry};

pub use memory::MemoryEntryStore;
pub use postgres::PgEntryStore;

/// Failures at the store boundary, already stripped of engine internals.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The cursor id does not resolve to an ordering-key position. The
    /// record backing a cursor must still exist for its `(created_at, id)`
    /// key to be recovered.
    #[error("cursor does not resolve to a position: {0}")]
    CursorNotFound(String),

    /// A unique constraint was violated; carries the constraint name.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other engine failure. The message is for logs only and must not
    /// be surfaced to API callers verbatim.
    #[error("{0}")]
    Backend(String),
}

/// Ordered range queries and single-record CRUD over catalog entries.
///
/// `page_after`/`search_page_after` take `take` rows strictly after
/// `cursor` in `(created_at DESC, id DESC)` order, or from the top when
/// `cursor` is `None`. Callers request one row more than the page size to
/// decide `has_more` without a count query.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn page_after(&self, cursor: Option<&str>, take: i64) -> Result<Vec<Entry>, StoreError>;

    /// Same traversal contract as `page_after`, restricted to entries whose
    /// title contains `term` (case-insensitive).
    async fn search_page_after(
        &self,
        term: &str,
        cursor: Option<&str>,
        take: i64,
    ) -> Result<Vec<Entry>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Entry>, StoreError>;

    /// Insert a new entry, minting its id and timestamps.
    async fn insert(&self, input: &NewEntry) -> Result<Entry, StoreError>;

    /// Apply a patch. Returns `Ok(None)` when no row with `id` exists.
    async fn update(&self, id: &str, patch: &EntryPatch) -> Result<Option<Entry>, StoreError>;

    /// Remove a row. Returns whether anything was deleted.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}
