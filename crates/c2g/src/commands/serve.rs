//! `c2g serve` command implementation.

use std::path::Path;

use c2g_config::{CliSettings, Config};
use c2g_server::{run_server, server_config_from_config};
use clap::Args;

use crate::commands::confluence_client;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    pub(crate) async fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let server_config = server_config_from_config(&config)?;
        let confluence = confluence_client(&config)?;

        output.info(&format!(
            "Starting server on {}:{}",
            server_config.host, server_config.port
        ));
        output.info(&format!("Confluence: {}", confluence.site_base_url()));
        output.info(&format!("Default space: {}", server_config.default_space));

        run_server(server_config, confluence)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
