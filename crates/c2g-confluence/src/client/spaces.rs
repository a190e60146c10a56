//! Space operations for Confluence API.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Space, SpaceInfo};

/// Page size for space listings.
const SPACE_LIMIT: usize = 30;

impl ConfluenceClient {
    /// List all global spaces.
    pub(crate) fn list_global_spaces(&self) -> Result<Vec<SpaceInfo>, ConfluenceError> {
        let url = format!("{}/space", self.api_url());

        info!("Listing global spaces");

        let spaces: Vec<Space> =
            self.get_all(&url, &[("type", "global".to_owned())], SPACE_LIMIT)?;

        info!("Found {} global spaces", spaces.len());
        Ok(spaces.into_iter().map(SpaceInfo::from).collect())
    }
}
