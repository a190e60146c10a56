//! Confluence API types.
//!
//! Raw response types mirror the REST payloads; [`PageInfo`] and
//! [`SpaceInfo`] are the validated values handed to callers.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfluenceError;

/// Page metadata needed to build a page tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Last update time.
    pub modified: DateTime<Utc>,
    /// Web UI path relative to the site base URL.
    pub webui: String,
}

/// Global space summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceInfo {
    /// Space key (e.g., "NL").
    pub space_key: String,
    /// Display name.
    pub name: String,
    /// Numeric space ID as a string.
    pub id: String,
    /// Web UI path relative to the site base URL.
    pub webui: String,
}

/// Paged result envelope used by list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct PagedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(rename = "_links", default)]
    pub links: Option<PageLinks>,
}

impl<T> PagedResponse<T> {
    /// Whether the server advertises another page of results.
    pub(crate) fn has_next(&self) -> bool {
        self.links.as_ref().is_some_and(|l| l.next.is_some())
    }
}

/// Pagination and hypermedia links.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub webui: Option<String>,
}

/// Content item as returned by `/rest/api/content`.
#[derive(Debug, Deserialize)]
pub(crate) struct Content {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub history: Option<History>,
    #[serde(default)]
    pub body: Option<Body>,
    #[serde(rename = "_links", default)]
    pub links: Option<PageLinks>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct History {
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<LastUpdated>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LastUpdated {
    pub when: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Body {
    #[serde(default)]
    pub export_view: Option<BodyValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BodyValue {
    pub value: String,
}

/// Space item as returned by `/rest/api/space`.
#[derive(Debug, Deserialize)]
pub(crate) struct Space {
    pub id: u64,
    pub key: String,
    pub name: String,
    #[serde(rename = "_links", default)]
    pub links: Option<PageLinks>,
}

impl Content {
    pub(crate) fn webui(&self) -> String {
        self.links
            .as_ref()
            .and_then(|l| l.webui.clone())
            .unwrap_or_default()
    }

    /// Convert into [`PageInfo`], requiring `history.lastUpdated`.
    pub(crate) fn into_page_info(self) -> Result<PageInfo, ConfluenceError> {
        let when = self
            .history
            .as_ref()
            .and_then(|h| h.last_updated.as_ref())
            .map(|l| l.when.as_str())
            .ok_or_else(|| {
                ConfluenceError::InvalidResponse(format!(
                    "page {} has no history.lastUpdated",
                    self.id
                ))
            })?;
        let modified = parse_timestamp(when)?;
        let webui = self.webui();
        Ok(PageInfo {
            id: self.id,
            title: self.title,
            modified,
            webui,
        })
    }
}

impl From<Space> for SpaceInfo {
    fn from(space: Space) -> Self {
        Self {
            space_key: space.key,
            name: space.name,
            id: space.id.to_string(),
            webui: space.links.and_then(|l| l.webui).unwrap_or_default(),
        }
    }
}

/// Parse a Confluence timestamp.
///
/// Cloud returns RFC 3339 (`2024-08-25T10:00:00.000Z`); Server/Data Center
/// may return a numeric offset without a colon (`2024-08-25T10:00:00.000+0200`).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ConfluenceError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| ConfluenceError::InvalidResponse(format!("bad timestamp {value:?}: {e}")))
}
