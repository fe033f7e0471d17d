//! Cursor pagination constants and page assembly.
//!
//! This module holds the pure half of the pagination protocol: limit
//! clamping and the limit+1 truncation that decides `has_more` and the next
//! cursor. The store layer supplies the ordered rows; nothing here touches
//! a database.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::types::EntryId;

/// Default number of records per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of records per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Resolve a requested page size to an effective one.
///
/// `None` falls back to [`DEFAULT_PAGE_LIMIT`]; anything else is clamped to
/// `[1, MAX_PAGE_LIMIT]`.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    match requested {
        Some(limit) => limit.clamp(1, MAX_PAGE_LIMIT),
        None => DEFAULT_PAGE_LIMIT,
    }
}

/// One bounded, ordered batch of records plus continuation metadata.
///
/// Request-scoped and never persisted. `next_cursor` is the id of the last
/// record in `data`, present iff `has_more` is true; it denotes an
/// exclusive lower bound in `(created_at DESC, id DESC)` traversal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub data: Vec<Entry>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<EntryId>,
}

impl Page {
    /// Assemble a page from up to `limit + 1` ordered rows.
    ///
    /// The store is asked for one row more than the page size; if it
    /// arrives, `has_more` is true and the extra row is discarded. This
    /// trades one extra row transfer for not issuing a count query.
    pub fn assemble(mut rows: Vec<Entry>, limit: i64) -> Self {
        let limit = limit as usize;
        let has_more = rows.len() > limit;
        if has_more {
            rows.truncate(limit);
        }

        let next_cursor = if has_more {
            rows.last().map(|entry| entry.id.clone())
        } else {
            None
        };

        Page {
            data: rows,
            has_more,
            next_cursor,
        }
    }

    /// An empty terminal page.
    pub fn empty() -> Self {
        Page {
            data: Vec::new(),
            has_more: false,
            next_cursor: None,
        }
    }
}
