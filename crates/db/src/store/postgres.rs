//! Postgres store adapter.
//!
//! Keyset pagination over the `entries` table: the cursor row's
//! `(created_at, id)` key is resolved first, then the page is a single
//! tuple-comparison range scan on the matching composite index. A cursor
//! whose row no longer exists cannot yield an ordering key and surfaces as
//! [`StoreError::CursorNotFound`].

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use cinelog_core::entry::{Entry, EntryPatch, EntryType, NewEntry};
use cinelog_core::types::Timestamp;

use super::{EntryStore, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, entry_type, director, budget, location, duration, year, created_at, updated_at";

/// [`EntryStore`] backed by a Postgres pool.
///
/// Safe for concurrent use; all synchronization is the pool's own.
#[derive(Clone)]
pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a cursor id to its ordering key, or fail with
    /// `CursorNotFound` when the row is gone.
    async fn cursor_key(&self, cursor: &str) -> Result<(Timestamp, String), StoreError> {
        let key: Option<(Timestamp, String)> =
            sqlx::query_as("SELECT created_at, id FROM entries WHERE id = $1")
                .bind(cursor)
                .fetch_optional(&self.pool)
                .await
                .map_err(classify)?;

        key.ok_or_else(|| StoreError::CursorNotFound(cursor.to_string()))
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn page_after(&self, cursor: Option<&str>, take: i64) -> Result<Vec<Entry>, StoreError> {
        let rows: Vec<EntryRow> = match cursor {
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM entries \
                     ORDER BY created_at DESC, id DESC LIMIT $1"
                );
                sqlx::query_as(&query)
                    .bind(take)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(classify)?
            }
            Some(cursor) => {
                let (created_at, id) = self.cursor_key(cursor).await?;
                let query = format!(
                    "SELECT {COLUMNS} FROM entries \
                     WHERE (created_at, id) < ($1, $2) \
                     ORDER BY created_at DESC, id DESC LIMIT $3"
                );
                sqlx::query_as(&query)
                    .bind(created_at)
                    .bind(&id)
                    .bind(take)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(classify)?
            }
        };

        rows.into_iter().map(EntryRow::into_entry).collect()
    }

    async fn search_page_after(
        &self,
        term: &str,
        cursor: Option<&str>,
        take: i64,
    ) -> Result<Vec<Entry>, StoreError> {
        let pattern = format!("%{}%", escape_like(term));

        let rows: Vec<EntryRow> = match cursor {
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM entries \
                     WHERE title ILIKE $1 \
                     ORDER BY created_at DESC, id DESC LIMIT $2"
                );
                sqlx::query_as(&query)
                    .bind(&pattern)
                    .bind(take)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(classify)?
            }
            Some(cursor) => {
                let (created_at, id) = self.cursor_key(cursor).await?;
                let query = format!(
                    "SELECT {COLUMNS} FROM entries \
                     WHERE title ILIKE $1 AND (created_at, id) < ($2, $3) \
                     ORDER BY created_at DESC, id DESC LIMIT $4"
                );
                sqlx::query_as(&query)
                    .bind(&pattern)
                    .bind(created_at)
                    .bind(&id)
                    .bind(take)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(classify)?
            }
        };

        rows.into_iter().map(EntryRow::into_entry).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Entry>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE id = $1");
        let row: Option<EntryRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;

        row.map(EntryRow::into_entry).transpose()
    }

    async fn insert(&self, input: &NewEntry) -> Result<Entry, StoreError> {
        // UUIDv7 keeps id order correlated with insertion order, which the
        // (created_at, id) tiebreak relies on for same-timestamp rows.
        let id = Uuid::now_v7().to_string();
        let query = format!(
            "INSERT INTO entries (id, title, entry_type, director, budget, location, duration, year) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let row: EntryRow = sqlx::query_as(&query)
            .bind(&id)
            .bind(&input.title)
            .bind(input.entry_type.as_str())
            .bind(&input.director)
            .bind(&input.budget)
            .bind(&input.location)
            .bind(&input.duration)
            .bind(&input.year)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;

        row.into_entry()
    }

    async fn update(&self, id: &str, patch: &EntryPatch) -> Result<Option<Entry>, StoreError> {
        let query = format!(
            "UPDATE entries SET \
                title = COALESCE($2, title), \
                entry_type = COALESCE($3, entry_type), \
                director = COALESCE($4, director), \
                budget = COALESCE($5, budget), \
                location = COALESCE($6, location), \
                duration = COALESCE($7, duration), \
                year = COALESCE($8, year), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row: Option<EntryRow> = sqlx::query_as(&query)
            .bind(id)
            .bind(&patch.title)
            .bind(patch.entry_type.map(|t| t.as_str()))
            .bind(&patch.director)
            .bind(&patch.budget)
            .bind(&patch.location)
            .bind(&patch.duration)
            .bind(&patch.year)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;

        row.map(EntryRow::into_entry).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM entries")
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }
}

/// Row shape matching the `entries` table.
#[derive(sqlx::FromRow)]
struct EntryRow {
    id: String,
    title: String,
    entry_type: String,
    director: String,
    budget: String,
    location: String,
    duration: String,
    year: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl EntryRow {
    fn into_entry(self) -> Result<Entry, StoreError> {
        let entry_type: EntryType = self.entry_type.parse().map_err(|()| {
            StoreError::Backend(format!("unknown entry_type in row: {}", self.entry_type))
        })?;

        Ok(Entry {
            id: self.id,
            title: self.title,
            entry_type,
            director: self.director,
            budget: self.budget,
            location: self.location,
            duration: self.duration,
            year: self.year,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Classify a sqlx error into a [`StoreError`].
///
/// Unique constraint violations (SQLSTATE 23505, constraint name starting
/// with `uq_`) are surfaced as such; everything else is an opaque backend
/// failure.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return StoreError::UniqueViolation(constraint.to_string());
            }
        }
    }
    StoreError::Backend(err.to_string())
}

/// Escape LIKE metacharacters so a search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
