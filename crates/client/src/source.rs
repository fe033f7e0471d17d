//! Page source seam.
//!
//! [`InfiniteFeed`](crate::feed::InfiniteFeed) consumes pages through this
//! trait so tests can drive it with scripted pages; [`ApiClient`] is the
//! production implementation.

use async_trait::async_trait;

use cinelog_core::pagination::Page;

use crate::error::ClientError;
use crate::http::ApiClient;

/// Anything that can produce one page of entries after a cursor.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(
        &self,
        cursor: Option<String>,
        limit: Option<i64>,
    ) -> Result<Page, ClientError>;
}

#[async_trait]
impl PageSource for ApiClient {
    async fn fetch_page(
        &self,
        cursor: Option<String>,
        limit: Option<i64>,
    ) -> Result<Page, ClientError> {
        self.list_entries(cursor.as_deref(), limit).await
    }
}
