//! Progress sinks.

use std::sync::{Mutex, mpsc};

use tracing::{error, info};

/// A progress message produced by a job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskMessage {
    /// Ordinary progress line.
    Info(String),
    /// Failure line; marks the task as failed.
    Error(String),
}

impl TaskMessage {
    /// Message text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Error(text) => text,
        }
    }
}

/// Destination for human-readable progress messages.
pub trait ProgressSink: Send + Sync {
    /// Report progress.
    fn send(&self, message: String);

    /// Report a failure.
    fn error(&self, message: String);
}

/// Sink feeding a [`crate::TaskRunner`] through an `mpsc` channel.
///
/// Messages sent after the receiving runner was reset are dropped.
pub struct ChannelSink {
    tx: mpsc::Sender<TaskMessage>,
}

impl ChannelSink {
    /// Create a sink from a channel sender.
    pub(crate) fn new(tx: mpsc::Sender<TaskMessage>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn send(&self, message: String) {
        let _ = self.tx.send(TaskMessage::Info(message));
    }

    fn error(&self, message: String) {
        let _ = self.tx.send(TaskMessage::Error(message));
    }
}

/// In-memory sink that keeps every message in order.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<TaskMessage>>,
}

impl MessageLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in arrival order.
    pub fn messages(&self) -> Vec<TaskMessage> {
        self.lock().clone()
    }

    /// Text of every message in arrival order.
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(|m| m.text().to_owned()).collect()
    }

    /// Text of the error messages only.
    pub fn errors(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|m| match m {
                TaskMessage::Error(text) => Some(text.clone()),
                TaskMessage::Info(_) => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TaskMessage>> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ProgressSink for MessageLog {
    fn send(&self, message: String) {
        self.lock().push(TaskMessage::Info(message));
    }

    fn error(&self, message: String) {
        self.lock().push(TaskMessage::Error(message));
    }
}

/// Sink that forwards messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn send(&self, message: String) {
        info!("{}", message);
    }

    fn error(&self, message: String) {
        error!("{}", message);
    }
}
