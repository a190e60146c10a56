//! Background task runner.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use tracing::{error, info};

use crate::sink::{ChannelSink, ProgressSink, TaskMessage};

/// Lifecycle of a [`TaskRunner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    /// Nothing started since creation or the last reset.
    Idle,
    /// Job started; the terminal entry has not been appended yet.
    Running,
    /// Job finished without reporting an error.
    Complete,
    /// Job returned an error, panicked or reported an error message.
    Error,
}

impl TaskState {
    /// Whether the run has been finalized.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Complete => "complete",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// One line of a task log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Message text.
    pub message: String,
    /// Whether the line reports a failure.
    pub is_error: bool,
    /// Terminal state, set only on the final entry.
    pub terminal: Option<TaskState>,
}

/// Error starting a task.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// A job is still running on this runner.
    #[error("{0} is already running")]
    AlreadyRunning(String),

    /// The OS refused to spawn the job thread.
    #[error("failed to spawn {name} thread")]
    Spawn {
        /// Task name.
        name: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Runs one job at a time on a background thread and collects its progress.
///
/// The job receives a [`ChannelSink`]; [`poll`](Self::poll) drains whatever
/// has arrived into the log and, once the thread has finished, appends a
/// single `"<name> complete"` or `"<name> error"` entry.
pub struct TaskRunner {
    name: String,
    state: TaskState,
    log: Vec<LogEntry>,
    rx: Option<mpsc::Receiver<TaskMessage>>,
    handle: Option<JoinHandle<()>>,
}

impl TaskRunner {
    /// Create an idle runner; `name` prefixes the terminal log entry.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: TaskState::Idle,
            log: Vec::new(),
            rx: None,
            handle: None,
        }
    }

    /// Task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Accumulated log of the current or last run.
    #[must_use]
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Whether the job thread is still executing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether a started job has finished (finalized or not).
    #[must_use]
    pub fn is_done(&self) -> bool {
        match &self.handle {
            Some(handle) => handle.is_finished(),
            None => self.state.is_terminal(),
        }
    }

    /// Clear log and state. A still-running job is detached and its
    /// remaining messages are discarded.
    pub fn reset(&mut self) {
        self.log.clear();
        self.state = TaskState::Idle;
        self.rx = None;
        self.handle = None;
    }

    /// Start `job` on a new thread.
    ///
    /// Errors returned by the job and panics inside it are reported as an
    /// error message and leave the runner in [`TaskState::Error`].
    pub fn start<F, E>(&mut self, job: F) -> Result<(), TaskError>
    where
        F: FnOnce(&ChannelSink) -> Result<(), E> + Send + 'static,
        E: fmt::Display,
    {
        if self.is_running() {
            return Err(TaskError::AlreadyRunning(self.name.clone()));
        }
        self.reset();

        let (tx, rx) = mpsc::channel();
        let name = self.name.clone();
        let handle = thread::Builder::new()
            .name(self.name.to_lowercase())
            .spawn(move || {
                let sink = ChannelSink::new(tx);
                match catch_unwind(AssertUnwindSafe(|| job(&sink))) {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        error!("{} failed: {}", name, e);
                        sink.error(format!("{name} thread error: {e}"));
                    }
                    Err(payload) => {
                        let reason = panic_message(payload.as_ref());
                        error!("{} panicked: {}", name, reason);
                        sink.error(format!("{name} thread error: {reason}"));
                    }
                }
            })
            .map_err(|source| TaskError::Spawn {
                name: self.name.clone(),
                source,
            })?;

        info!("Started {}", self.name);
        self.state = TaskState::Running;
        self.rx = Some(rx);
        self.handle = Some(handle);
        Ok(())
    }

    /// Drain available messages into the log and finalize a finished job.
    ///
    /// Returns the entries appended by this call.
    pub fn poll(&mut self) -> &[LogEntry] {
        let start = self.log.len();

        let messages: Vec<TaskMessage> = self
            .rx
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default();
        for message in messages {
            self.record(message);
        }

        if self.handle.as_ref().is_some_and(JoinHandle::is_finished) {
            // The sender is gone once the thread exits, so one more drain
            // collects anything sent between the first drain and exit.
            let late: Vec<TaskMessage> = self
                .rx
                .take()
                .map(|rx| rx.try_iter().collect())
                .unwrap_or_default();
            for message in late {
                self.record(message);
            }
            self.join();
            self.finalize();
        }

        &self.log[start..]
    }

    /// Block until the job finishes, passing each new entry to `on_entry`.
    ///
    /// Returns the terminal state.
    pub fn wait(&mut self, mut on_entry: impl FnMut(&LogEntry)) -> TaskState {
        if let Some(rx) = self.rx.take() {
            for message in rx.iter() {
                self.record(message);
                if let Some(entry) = self.log.last() {
                    on_entry(entry);
                }
            }
        }
        self.join();
        let before = self.log.len();
        self.finalize();
        for entry in &self.log[before..] {
            on_entry(entry);
        }
        self.state
    }

    fn record(&mut self, message: TaskMessage) {
        let entry = match message {
            TaskMessage::Info(message) => LogEntry {
                message,
                is_error: false,
                terminal: None,
            },
            TaskMessage::Error(message) => LogEntry {
                message,
                is_error: true,
                terminal: None,
            },
        };
        self.log.push(entry);
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            self.log.push(LogEntry {
                message: format!("{} thread error: panic", self.name),
                is_error: true,
                terminal: None,
            });
        }
    }

    fn finalize(&mut self) {
        if self.state != TaskState::Running {
            return;
        }
        self.state = if self.log.iter().any(|e| e.is_error) {
            TaskState::Error
        } else {
            TaskState::Complete
        };
        self.log.push(LogEntry {
            message: format!("{} {}", self.name, self.state),
            is_error: self.state == TaskState::Error,
            terminal: Some(self.state),
        });
        info!("{} {}", self.name, self.state);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_owned()
    }
}
