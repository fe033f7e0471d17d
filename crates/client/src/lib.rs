//! Cinelog HTTP client.
//!
//! Typed access to the catalog API plus the pieces a UI needs on top of
//! it: a retrying fetch layer, the infinite-scroll consumption state
//! machine, a notification bus, and mutation wrappers that translate
//! failures into user-facing notices.

pub mod error;
pub mod feed;
pub mod http;
pub mod mutations;
pub mod notify;
pub mod retry;
pub mod source;

pub use error::ClientError;
pub use feed::{FeedStatus, InfiniteFeed};
pub use http::ApiClient;
pub use mutations::EntryMutator;
pub use notify::{Notice, NoticeBus, NoticeLevel};
pub use retry::RetryConfig;
pub use source::PageSource;
