//! Non-blocking user notifications for request outcomes.

use tokio::sync::mpsc;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn from_error(err: &ClientError) -> Self {
        Self::error(user_message(err))
    }
}

/// Receives notifications. Implementations must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            log::debug!("Notification dropped: receiver is gone");
        }
    }
}

/// Sink that only logs, for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Error => log::error!("{}", notification.message),
            Level::Success | Level::Info => log::info!("{}", notification.message),
        }
    }
}

/// Text shown to the user for a failed request.
pub fn user_message(err: &ClientError) -> String {
    match err {
        ClientError::Validation(message) | ClientError::Rejected(message) => message.clone(),
        ClientError::Api { message, .. } => message.clone(),
        ClientError::Unauthorized(_) => {
            "Your session has expired. Please sign in again.".to_string()
        }
        ClientError::Network(inner) if inner.is_timeout() => {
            "The server took too long to respond.".to_string()
        }
        ClientError::Network(_) => "Unable to reach the server.".to_string(),
        ClientError::Decode(_) | ClientError::Serialization(_) => {
            "The server sent an unexpected response.".to_string()
        }
        ClientError::Storage(_) | ClientError::Config(_) => {
            "Something went wrong. Please try again.".to_string()
        }
    }
}
