/// Entry identifiers are opaque string tokens (`[A-Za-z0-9_-]+`).
///
/// The server mints UUIDv7 values so that id order correlates with
/// insertion order, but nothing outside the store layer may rely on that.
pub type EntryId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
