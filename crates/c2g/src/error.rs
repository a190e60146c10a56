//! CLI error types.

use c2g_config::ConfigError;
use c2g_confluence::ConfluenceError;
use c2g_task::TaskError;
use c2g_tree::TreeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Confluence(#[from] ConfluenceError),

    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Task(#[from] TaskError),

    #[error("{0} finished with errors")]
    TaskFailed(String),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
