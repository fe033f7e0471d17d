use std::sync::Arc;

use cinelog_db::{EntryService, EntryStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The entry service
/// is held over a trait object so the binary wires in the Postgres store
/// while tests inject the in-memory one.
#[derive(Clone)]
pub struct AppState {
    /// Entry service over whichever store the process was started with.
    pub service: EntryService<dyn EntryStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
