//! Shared query parameter types for API handlers.
//!
//! Fields stay `Option<String>` so a malformed value is reported through
//! the error envelope as `INVALID_QUERY_PARAMS` instead of surfacing as an
//! extractor rejection with a bare text body.

use serde::Deserialize;

/// Pagination parameters for `GET /entries` (`?cursor=&limit=`).
#[derive(Debug, Deserialize)]
pub struct ListEntriesParams {
    pub cursor: Option<String>,
    pub limit: Option<String>,
}

/// Parameters for `GET /entries/search` (`?q=&cursor=&limit=`).
#[derive(Debug, Deserialize)]
pub struct SearchEntriesParams {
    pub q: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<String>,
}
