//! In-process notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NoticeBus`] is owned by the application root and handed to whatever
//! needs to announce or render user-facing notices. There is no global
//! registry: consumers hold a subscription handle and drop it to
//! unsubscribe.

use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One user-facing notification.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    /// Optional short heading (e.g. "Validation Error").
    pub title: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::untitled(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::untitled(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::untitled(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::untitled(NoticeLevel::Error, message)
    }

    fn untitled(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            title: None,
            message: message.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// In-process fan-out bus for [`Notice`]s.
///
/// Any number of subscribers independently receive every published notice.
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Create a bus with a specific channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notice to all current subscribers.
    ///
    /// If there are no active subscribers the notice is silently dropped.
    pub fn publish(&self, notice: Notice) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(notice);
    }

    /// Scoped subscription handle; drop it to unsubscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_notices() {
        let bus = NoticeBus::default();
        let mut rx = bus.subscribe();

        bus.publish(Notice::success("Entry created successfully!"));

        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Entry created successfully!");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let bus = NoticeBus::default();
        bus.publish(Notice::info("nobody listening"));
    }

    #[tokio::test]
    async fn each_subscriber_sees_every_notice() {
        let bus = NoticeBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(Notice::warning("heads up").with_title("Connection Lost"));

        for rx in [&mut a, &mut b] {
            let notice = rx.recv().await.unwrap();
            assert_eq!(notice.level, NoticeLevel::Warning);
            assert_eq!(notice.title.as_deref(), Some("Connection Lost"));
        }
    }
}
