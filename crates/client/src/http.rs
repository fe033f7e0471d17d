//! Typed HTTP client for the catalog API.
//!
//! Wraps [`reqwest`] with a fixed per-request upper bound, unwraps the
//! `{ success, data | error }` envelope, and converts every failure into a
//! [`ClientError`]. A non-2xx response with an unparsable body gets a
//! synthesized message keyed by its status code.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use cinelog_core::entry::{Entry, EntryPatch, NewEntry};
use cinelog_core::pagination::Page;

use crate::error::ClientError;

/// Upper bound on any single request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one API base URL (e.g. `http://localhost:3000/api`).
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

/// Wire shape of every response body.
#[derive(Debug, Deserialize)]
struct WireEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
    code: String,
    details: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CountData {
    count: i64,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    message: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling across
    /// several API clients).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout (tests use short bounds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // -- Endpoints ---------------------------------------------------------

    /// GET /entries -- one page, newest first.
    pub async fn list_entries(
        &self,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Page, ClientError> {
        let path = format!("/entries{}", page_query(&[], cursor, limit));
        self.send(self.client.get(self.url(&path))).await
    }

    /// GET /entries/search -- paginated title search.
    pub async fn search_entries(
        &self,
        term: &str,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Page, ClientError> {
        let q = [("q", term.to_string())];
        let path = format!("/entries/search{}", page_query(&q, cursor, limit));
        self.send(self.client.get(self.url(&path))).await
    }

    /// GET /entries/count
    pub async fn count_entries(&self) -> Result<i64, ClientError> {
        let data: CountData = self.send(self.client.get(self.url("/entries/count"))).await?;
        Ok(data.count)
    }

    /// POST /entries
    pub async fn create_entry(&self, input: &NewEntry) -> Result<Entry, ClientError> {
        self.send(self.client.post(self.url("/entries")).json(input))
            .await
    }

    /// PUT /entries/{id}
    pub async fn update_entry(&self, id: &str, patch: &EntryPatch) -> Result<Entry, ClientError> {
        self.send(
            self.client
                .put(self.url(&format!("/entries/{id}")))
                .json(patch),
        )
        .await
    }

    /// DELETE /entries/{id}
    pub async fn delete_entry(&self, id: &str) -> Result<(), ClientError> {
        let _: MessageData = self
            .send(self.client.delete(self.url(&format!("/entries/{id}"))))
            .await?;
        Ok(())
    }

    /// GET /health
    pub async fn health(&self) -> Result<String, ClientError> {
        let data: MessageData = self.send(self.client.get(self.url("/health"))).await?;
        Ok(data.message)
    }

    // -- Request plumbing --------------------------------------------------

    /// Send a prepared request and unwrap the response envelope.
    ///
    /// A request that outlives the timeout is abandoned here; the server
    /// finishes it regardless, and any late result is dropped with the
    /// future.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| ClientError::timeout())?
            .map_err(classify_transport)?;

        let status = response.status().as_u16();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(_) if status >= 400 => return Err(ClientError::from_status(status)),
            Err(_) => return Err(ClientError::network()),
        };

        if status >= 400 {
            return Err(decode_error(&bytes, status));
        }

        let envelope: WireEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(|_| ClientError::from_status(status))?;

        match envelope {
            WireEnvelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            WireEnvelope {
                error: Some(error), ..
            } => Err(ClientError::api(
                error.message,
                error.code,
                status,
                error.details,
            )),
            _ => Err(ClientError::from_status(status)),
        }
    }
}

/// Decode the error envelope from a non-2xx body, falling back to a
/// status-keyed message.
fn decode_error(bytes: &[u8], status: u16) -> ClientError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: WireError,
    }

    match serde_json::from_slice::<ErrorBody>(bytes) {
        Ok(body) => ClientError::api(
            body.error.message,
            body.error.code,
            status,
            body.error.details,
        ),
        Err(_) => ClientError::from_status(status),
    }
}

/// Classify a transport-level [`reqwest::Error`].
fn classify_transport(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::timeout()
    } else {
        ClientError::network()
    }
}

/// Assemble a query string from optional pagination parameters.
fn page_query(extra: &[(&str, String)], cursor: Option<&str>, limit: Option<i64>) -> String {
    let mut pairs: Vec<(String, String)> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    if let Some(cursor) = cursor {
        pairs.push(("cursor".into(), cursor.to_string()));
    }
    if let Some(limit) = limit {
        pairs.push(("limit".into(), limit.to_string()));
    }
    if pairs.is_empty() {
        return String::new();
    }

    let encoded: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencode(v)))
        .collect();
    format!("?{}", encoded.join("&"))
}

/// Minimal percent-encoding for query values (tokens and search terms).
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
