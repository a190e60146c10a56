//! `c2g spaces` command implementation.

use std::path::Path;

use c2g_config::Config;

use crate::commands::confluence_client;
use crate::error::CliError;
use crate::output::Output;

/// List global spaces, one per line.
pub(crate) fn execute(config_path: Option<&Path>) -> Result<(), CliError> {
    let output = Output::new();
    let config = Config::load(config_path, None)?;
    let confluence = confluence_client(&config)?;

    let spaces = confluence.list_global_spaces()?;
    let width = spaces.iter().map(|s| s.space_key.len()).max().unwrap_or(0);
    for space in &spaces {
        output.line(&format!(
            "{:<width$}  {}  {}{}",
            space.space_key,
            space.name,
            confluence.site_base_url(),
            space.webui
        ));
    }
    output.success(&format!("{} spaces", spaces.len()));
    Ok(())
}
