//! In-memory store adapter.
//!
//! Implements the same contract as the Postgres adapter over an ordered
//! map, including the `uq_entries_title` uniqueness rule and the
//! cursor-resolution failure mode. This is the adapter every pagination
//! test walks, and what the API integration tests run the router against.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use cinelog_core::entry::{Entry, EntryPatch, NewEntry};
use cinelog_core::types::Timestamp;

use super::{EntryStore, StoreError};

/// Ascending `(created_at, id)` key; descending traversal iterates in
/// reverse.
type SortKey = (Timestamp, String);

#[derive(Default)]
struct Tables {
    rows: BTreeMap<SortKey, Entry>,
    by_id: HashMap<String, SortKey>,
    /// Mirrors the `uq_entries_title` constraint: title -> owning id.
    title_index: HashMap<String, String>,
}

/// [`EntryStore`] backed by process memory.
#[derive(Default)]
pub struct MemoryEntryStore {
    tables: RwLock<Tables>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_page<F>(
        tables: &Tables,
        cursor: Option<&str>,
        take: i64,
        mut keep: F,
    ) -> Result<Vec<Entry>, StoreError>
    where
        F: FnMut(&Entry) -> bool,
    {
        let take = take.max(0) as usize;

        let upper: Option<SortKey> = match cursor {
            None => None,
            Some(cursor) => {
                let key = tables
                    .by_id
                    .get(cursor)
                    .ok_or_else(|| StoreError::CursorNotFound(cursor.to_string()))?;
                Some(key.clone())
            }
        };

        let iter: Box<dyn Iterator<Item = &Entry>> = match &upper {
            // Everything strictly after the cursor in descending order is
            // everything strictly below its key, walked in reverse.
            Some(key) => Box::new(tables.rows.range(..key.clone()).rev().map(|(_, e)| e)),
            None => Box::new(tables.rows.values().rev()),
        };

        Ok(iter.filter(|e| keep(e)).take(take).cloned().collect())
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn page_after(&self, cursor: Option<&str>, take: i64) -> Result<Vec<Entry>, StoreError> {
        let tables = self.tables.read().expect("store lock");
        Self::collect_page(&tables, cursor, take, |_| true)
    }

    async fn search_page_after(
        &self,
        term: &str,
        cursor: Option<&str>,
        take: i64,
    ) -> Result<Vec<Entry>, StoreError> {
        let needle = term.to_lowercase();
        let tables = self.tables.read().expect("store lock");
        Self::collect_page(&tables, cursor, take, |entry| {
            entry.title.to_lowercase().contains(&needle)
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Entry>, StoreError> {
        let tables = self.tables.read().expect("store lock");
        Ok(tables
            .by_id
            .get(id)
            .and_then(|key| tables.rows.get(key))
            .cloned())
    }

    async fn insert(&self, input: &NewEntry) -> Result<Entry, StoreError> {
        let mut tables = self.tables.write().expect("store lock");

        if tables.title_index.contains_key(&input.title) {
            return Err(StoreError::UniqueViolation("uq_entries_title".into()));
        }

        let now = chrono::Utc::now();
        let entry = Entry {
            id: Uuid::now_v7().to_string(),
            title: input.title.clone(),
            entry_type: input.entry_type,
            director: input.director.clone(),
            budget: input.budget.clone(),
            location: input.location.clone(),
            duration: input.duration.clone(),
            year: input.year.clone(),
            created_at: now,
            updated_at: now,
        };

        let key = (entry.created_at, entry.id.clone());
        tables.by_id.insert(entry.id.clone(), key.clone());
        tables
            .title_index
            .insert(entry.title.clone(), entry.id.clone());
        tables.rows.insert(key, entry.clone());

        Ok(entry)
    }

    async fn update(&self, id: &str, patch: &EntryPatch) -> Result<Option<Entry>, StoreError> {
        let mut guard = self.tables.write().expect("store lock");
        let tables = &mut *guard;

        let Some(key) = tables.by_id.get(id).cloned() else {
            return Ok(None);
        };

        if let Some(title) = &patch.title {
            if let Some(owner) = tables.title_index.get(title) {
                if owner != id {
                    return Err(StoreError::UniqueViolation("uq_entries_title".into()));
                }
            }
        }

        let entry = tables.rows.get_mut(&key).expect("index points at row");

        if let Some(title) = &patch.title {
            if *title != entry.title {
                tables.title_index.remove(&entry.title);
                tables.title_index.insert(title.clone(), id.to_string());
                entry.title = title.clone();
            }
        }
        apply_rest(entry, patch);
        entry.updated_at = chrono::Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().expect("store lock");

        let Some(key) = tables.by_id.remove(id) else {
            return Ok(false);
        };
        if let Some(entry) = tables.rows.remove(&key) {
            tables.title_index.remove(&entry.title);
        }
        Ok(true)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let tables = self.tables.read().expect("store lock");
        Ok(tables.rows.len() as i64)
    }
}

/// Apply every patch field except `title`, which carries index bookkeeping.
fn apply_rest(entry: &mut Entry, patch: &EntryPatch) {
    if let Some(entry_type) = patch.entry_type {
        entry.entry_type = entry_type;
    }
    if let Some(director) = &patch.director {
        entry.director = director.clone();
    }
    if let Some(budget) = &patch.budget {
        entry.budget = budget.clone();
    }
    if let Some(location) = &patch.location {
        entry.location = location.clone();
    }
    if let Some(duration) = &patch.duration {
        entry.duration = duration.clone();
    }
    if let Some(year) = &patch.year {
        entry.year = year.clone();
    }
}
