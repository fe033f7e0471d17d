//! Entry service: clamping, classification, and CRUD orchestration.
//!
//! Sits between the transport layer and an [`EntryStore`]. Every store
//! failure is reclassified into the [`CoreError`] taxonomy here; the
//! operation-specific codes keep cause-context for logs without exposing
//! engine internals to API callers.

use std::sync::Arc;

use cinelog_core::entry::{Entry, EntryPatch, NewEntry};
use cinelog_core::error::{op_codes, CoreError};
use cinelog_core::pagination::{clamp_limit, Page};

use crate::store::{EntryStore, StoreError};

/// Message used for every unique-title conflict, mirroring the constraint's
/// meaning rather than its name.
const DUPLICATE_TITLE_MSG: &str = "Entry with this title already exists";

pub struct EntryService<S: EntryStore + ?Sized> {
    store: Arc<S>,
}

// Derived Clone would require S: Clone.
impl<S: EntryStore + ?Sized> Clone for EntryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: EntryStore + ?Sized> EntryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// List one page of entries, newest first.
    ///
    /// `limit` is clamped to `[1, 100]`, defaulting to 20. The store is
    /// asked for `limit + 1` rows so `has_more` needs no count query.
    pub async fn list_entries(
        &self,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Page, CoreError> {
        let limit = clamp_limit(limit);
        let rows = self
            .store
            .page_after(cursor, limit + 1)
            .await
            .map_err(|err| classify(err, op_codes::FETCH_ENTRIES, "Failed to fetch entries"))?;
        Ok(Page::assemble(rows, limit))
    }

    /// Page through entries whose title contains `term`, case-insensitively.
    pub async fn search_entries(
        &self,
        term: &str,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Page, CoreError> {
        let limit = clamp_limit(limit);
        let rows = self
            .store
            .search_page_after(term, cursor, limit + 1)
            .await
            .map_err(|err| classify(err, op_codes::SEARCH_ENTRIES, "Failed to search entries"))?;
        Ok(Page::assemble(rows, limit))
    }

    /// Fetch a single entry, failing with `ENTRY_NOT_FOUND` when absent.
    pub async fn get_entry(&self, id: &str) -> Result<Entry, CoreError> {
        let found = self
            .store
            .find_by_id(id)
            .await
            .map_err(|err| classify(err, op_codes::FETCH_ENTRY, "Failed to fetch entry"))?;

        found.ok_or_else(|| CoreError::NotFound {
            entity: "Entry",
            id: id.to_string(),
        })
    }

    pub async fn create_entry(&self, input: &NewEntry) -> Result<Entry, CoreError> {
        self.store
            .insert(&input.trimmed())
            .await
            .map_err(|err| classify(err, op_codes::CREATE_ENTRY, "Failed to create entry"))
    }

    /// Update an entry. Existence is resolved first so an absent id is a
    /// 404 rather than a silent no-op.
    pub async fn update_entry(&self, id: &str, patch: &EntryPatch) -> Result<Entry, CoreError> {
        match self.get_entry(id).await {
            Ok(_) => {}
            Err(err @ CoreError::NotFound { .. }) => return Err(err),
            Err(_) => {
                return Err(CoreError::internal(
                    op_codes::UPDATE_ENTRY,
                    "Failed to update entry",
                ))
            }
        }

        let updated = self
            .store
            .update(id, &patch.trimmed())
            .await
            .map_err(|err| classify(err, op_codes::UPDATE_ENTRY, "Failed to update entry"))?;

        // The row can vanish between the existence check and the update.
        updated.ok_or_else(|| CoreError::NotFound {
            entity: "Entry",
            id: id.to_string(),
        })
    }

    /// Delete an entry. Existence is resolved first, as with updates.
    pub async fn delete_entry(&self, id: &str) -> Result<(), CoreError> {
        match self.get_entry(id).await {
            Ok(_) => {}
            Err(err @ CoreError::NotFound { .. }) => return Err(err),
            Err(_) => {
                return Err(CoreError::internal(
                    op_codes::DELETE_ENTRY,
                    "Failed to delete entry",
                ))
            }
        }

        let removed = self
            .store
            .delete(id)
            .await
            .map_err(|err| classify(err, op_codes::DELETE_ENTRY, "Failed to delete entry"))?;

        if removed {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "Entry",
                id: id.to_string(),
            })
        }
    }

    /// Total number of entries.
    pub async fn count_entries(&self) -> Result<i64, CoreError> {
        self.store
            .count()
            .await
            .map_err(|err| classify(err, op_codes::COUNT_ENTRIES, "Failed to count entries"))
    }
}

/// Map a store failure into the taxonomy.
///
/// Backend messages are logged here and replaced with the operation's
/// generic message; they never travel further up.
fn classify(err: StoreError, op_code: &'static str, message: &str) -> CoreError {
    match err {
        StoreError::CursorNotFound(cursor) => CoreError::InvalidCursor(cursor),
        StoreError::UniqueViolation(constraint) => {
            tracing::debug!(constraint = %constraint, "Unique constraint violation");
            CoreError::Duplicate(DUPLICATE_TITLE_MSG.to_string())
        }
        StoreError::Backend(detail) => {
            tracing::error!(code = op_code, error = %detail, "Store operation failed");
            CoreError::internal(op_code, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use cinelog_core::entry::EntryType;

    use crate::store::MemoryEntryStore;

    fn service() -> EntryService<MemoryEntryStore> {
        EntryService::new(Arc::new(MemoryEntryStore::new()))
    }

    fn new_entry(title: &str) -> NewEntry {
        NewEntry {
            title: title.into(),
            entry_type: EntryType::TvShow,
            director: "d".into(),
            budget: "$5".into(),
            location: "l".into(),
            duration: "45 min".into(),
            year: "2015".into(),
        }
    }

    #[tokio::test]
    async fn full_walk_yields_every_entry_exactly_once() {
        let svc = service();
        for i in 0..23 {
            svc.create_entry(&new_entry(&format!("t{i}"))).await.unwrap();
        }

        let mut seen = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = svc.list_entries(cursor.as_deref(), Some(5)).await.unwrap();
            seen.extend(page.data.iter().map(|e| e.id.clone()));
            if !page.has_more {
                assert!(page.next_cursor.is_none());
                break;
            }
            cursor = page.next_cursor;
            assert!(cursor.is_some());
        }

        assert_eq!(seen.len(), 23);
        let mut dedup = seen.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 23, "no id may be delivered twice");

        // Newest-first ordering across page boundaries.
        let full = svc.list_entries(None, Some(100)).await.unwrap();
        let want: Vec<_> = full.data.iter().map(|e| e.id.clone()).collect();
        assert_eq!(seen, want);
    }

    #[tokio::test]
    async fn first_page_is_idempotent() {
        let svc = service();
        for i in 0..4 {
            svc.create_entry(&new_entry(&format!("t{i}"))).await.unwrap();
        }

        let a = svc.list_entries(None, Some(3)).await.unwrap();
        let b = svc.list_entries(None, Some(3)).await.unwrap();

        let ids = |p: &Page| p.data.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.has_more, b.has_more);
        assert_eq!(a.next_cursor, b.next_cursor);
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let svc = service();
        for i in 0..3 {
            svc.create_entry(&new_entry(&format!("t{i}"))).await.unwrap();
        }

        // 0 clamps to 1.
        let page = svc.list_entries(None, Some(0)).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(page.has_more);

        // 500 clamps to 100, which covers everything here.
        let page = svc.list_entries(None, Some(500)).await.unwrap();
        assert_eq!(page.data.len(), 3);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn invalid_cursor_is_fatal() {
        let svc = service();
        svc.create_entry(&new_entry("t")).await.unwrap();

        let err = svc.list_entries(Some("gone"), Some(5)).await.unwrap_err();
        assert_matches!(err, CoreError::InvalidCursor(c) if c == "gone");
    }

    #[tokio::test]
    async fn cursor_of_deleted_record_is_fatal() {
        let svc = service();
        for i in 0..5 {
            svc.create_entry(&new_entry(&format!("t{i}"))).await.unwrap();
        }
        let page = svc.list_entries(None, Some(2)).await.unwrap();
        let cursor = page.next_cursor.unwrap();

        // Deleting the cursor record makes its position unresolvable.
        svc.delete_entry(&cursor).await.unwrap();
        let err = svc.list_entries(Some(&cursor), Some(2)).await.unwrap_err();
        assert_matches!(err, CoreError::InvalidCursor(_));
    }

    #[tokio::test]
    async fn duplicate_title_classified() {
        let svc = service();
        svc.create_entry(&new_entry("same")).await.unwrap();

        let err = svc.create_entry(&new_entry("same")).await.unwrap_err();
        assert_matches!(err, CoreError::Duplicate(msg) if msg.contains("already exists"));
    }

    #[tokio::test]
    async fn update_and_delete_missing_are_not_found() {
        let svc = service();
        svc.create_entry(&new_entry("only")).await.unwrap();

        let patch = EntryPatch {
            title: Some("renamed".into()),
            ..Default::default()
        };
        let err = svc.update_entry("nonexistent-id", &patch).await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { .. });

        let err = svc.delete_entry("nonexistent-id").await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { .. });

        // Nothing was mutated by either attempt.
        assert_eq!(svc.count_entries().await.unwrap(), 1);
        let page = svc.list_entries(None, None).await.unwrap();
        assert_eq!(page.data[0].title, "only");
    }

    #[tokio::test]
    async fn create_trims_text_fields() {
        let svc = service();
        let mut input = new_entry("  padded  ");
        input.director = " someone ".into();

        let created = svc.create_entry(&input).await.unwrap();
        assert_eq!(created.title, "padded");
        assert_eq!(created.director, "someone");
    }

    #[tokio::test]
    async fn search_walks_with_cursor() {
        let svc = service();
        for i in 0..6 {
            svc.create_entry(&new_entry(&format!("Heist {i}"))).await.unwrap();
            svc.create_entry(&new_entry(&format!("Other {i}"))).await.unwrap();
        }

        let first = svc.search_entries("heist", None, Some(4)).await.unwrap();
        assert_eq!(first.data.len(), 4);
        assert!(first.has_more);

        let rest = svc
            .search_entries("heist", first.next_cursor.as_deref(), Some(4))
            .await
            .unwrap();
        assert_eq!(rest.data.len(), 2);
        assert!(!rest.has_more);
    }
}
