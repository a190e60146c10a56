//! Background jobs with streamed progress.
//!
//! Long-running exports and uploads report progress through a
//! [`ProgressSink`]. A [`TaskRunner`] runs one job at a time on its own
//! thread, collects the job's messages from an `mpsc` channel into a
//! persistent log and appends exactly one terminal entry once the job
//! has finished.
//!
//! # Example
//!
//! ```ignore
//! use c2g_task::{ProgressSink, TaskRunner};
//!
//! let mut runner = TaskRunner::new("Exporter");
//! runner.start(|sink| {
//!     sink.send("Saved page 'Q3'".to_owned());
//!     Ok::<_, std::io::Error>(())
//! })?;
//! let state = runner.wait(|entry| eprintln!("{}", entry.message));
//! ```

mod runner;
mod sink;

pub use runner::{LogEntry, TaskError, TaskRunner, TaskState};
pub use sink::{ChannelSink, MessageLog, ProgressSink, TaskMessage, TracingSink};
