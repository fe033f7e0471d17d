//! Mutation wrappers with user-facing failure classification.
//!
//! [`EntryMutator`] runs create/update/delete against the API, publishes
//! the outcome on the [`NoticeBus`], and returns the typed result. After
//! any successful mutation the caller must invalidate its
//! [`InfiniteFeed`](crate::feed::InfiniteFeed): buffered pages describe a
//! record set that no longer exists.

use std::sync::Arc;

use cinelog_core::entry::{Entry, EntryPatch, NewEntry};

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::notify::{Notice, NoticeBus};
use crate::retry::{with_retries, RetryConfig};

/// What the mutation did to the record, for notice wording.
#[derive(Debug, Clone, Copy)]
enum Verb {
    Create,
    Update,
    Delete,
}

impl Verb {
    fn lowercase(self) -> &'static str {
        match self {
            Verb::Create => "creating",
            Verb::Update => "updating",
            Verb::Delete => "deleting",
        }
    }
}

pub struct EntryMutator {
    client: Arc<ApiClient>,
    notices: Arc<NoticeBus>,
    retry: RetryConfig,
}

impl EntryMutator {
    pub fn new(client: Arc<ApiClient>, notices: Arc<NoticeBus>) -> Self {
        Self {
            client,
            notices,
            retry: RetryConfig::for_mutations(),
        }
    }

    pub async fn create(&self, input: &NewEntry) -> Result<Entry, ClientError> {
        let result = with_retries(&self.retry, || self.client.create_entry(input)).await;
        match &result {
            Ok(_) => self
                .notices
                .publish(Notice::success("Entry created successfully!")),
            Err(err) => self.notices.publish(failure_notice(err, Verb::Create)),
        }
        result
    }

    pub async fn update(&self, id: &str, patch: &EntryPatch) -> Result<Entry, ClientError> {
        let result = with_retries(&self.retry, || self.client.update_entry(id, patch)).await;
        match &result {
            Ok(_) => self
                .notices
                .publish(Notice::success("Entry updated successfully!")),
            Err(err) => self.notices.publish(failure_notice(err, Verb::Update)),
        }
        result
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let result = with_retries(&self.retry, || self.client.delete_entry(id)).await;
        match &result {
            Ok(()) => self
                .notices
                .publish(Notice::success("Entry deleted successfully!")),
            Err(err) if err.is_not_found() => {
                // Someone else got there first; the feed is stale either way.
                self.notices.publish(
                    Notice::warning("Entry was already deleted or not found.")
                        .with_title("Entry Not Found"),
                );
            }
            Err(err) => self.notices.publish(failure_notice(err, Verb::Delete)),
        }
        result
    }
}

/// Whether the caller must invalidate its feed after a delete attempt.
///
/// True on success and on a 404: in both cases the buffered pages refer to
/// a record set that has changed underneath them.
pub fn delete_requires_invalidation(result: &Result<(), ClientError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => err.is_not_found(),
    }
}

/// Translate a failed mutation into the notice a user should see.
fn failure_notice(err: &ClientError, verb: Verb) -> Notice {
    if err.is_network_error() || err.is_timeout_error() {
        return Notice::error(err.message.clone()).with_title("Connection Problem");
    }
    if err.is_not_found() {
        return Notice::error("Entry not found. It may have been deleted by another user.")
            .with_title("Entry Not Found");
    }
    if err.is_validation_error() {
        return Notice::error(err.message.clone()).with_title("Validation Error");
    }
    if err.is_server_error() {
        return Notice::error(format!(
            "Server error occurred while {} entry. Please try again.",
            verb.lowercase()
        ))
        .with_title("Server Error");
    }
    Notice::error(err.message.clone())
}
