//! CLI command implementations.

pub(crate) mod export;
pub(crate) mod serve;
pub(crate) mod spaces;
pub(crate) mod tree;
pub(crate) mod upload;

use std::sync::Arc;

use c2g_config::Config;
use c2g_confluence::{ConfluenceApi, ConfluenceClient};
use c2g_task::{TaskRunner, TaskState};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use export::ExportArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use tree::TreeArgs;
pub(crate) use upload::UploadArgs;

/// Confluence client from the validated `[confluence]` section.
fn confluence_client(config: &Config) -> Result<Arc<dyn ConfluenceApi>, CliError> {
    let conf = config.require_confluence()?;
    Ok(Arc::new(ConfluenceClient::from_config(
        &conf.base_url,
        &conf.username,
        &conf.api_token,
    )))
}

/// Stream a started task's log to the terminal until it finishes.
fn follow_task(runner: &mut TaskRunner, output: &Output) -> Result<(), CliError> {
    let state = runner.wait(|entry| output.task_entry(entry));
    tracing::debug!(task = runner.name(), %state, "Task finished");
    match state {
        TaskState::Error => Err(CliError::TaskFailed(runner.name().to_owned())),
        _ => Ok(()),
    }
}
