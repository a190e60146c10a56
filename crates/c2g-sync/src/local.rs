//! Local folder scanning.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::SyncError;

/// Suffix removed from exported file names to get the remote title.
pub const EXPORT_SUFFIX: &str = ".html";

/// Kind of local entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
}

/// An entry of a local folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalEntry {
    /// File or directory name.
    pub name: String,
    /// Full path.
    pub path: PathBuf,
    /// Entry kind.
    pub kind: LocalKind,
}

impl LocalEntry {
    /// Remote name this entry maps to.
    ///
    /// Files drop the `.html` export suffix; other names are used as-is.
    #[must_use]
    pub fn title(&self) -> &str {
        match self.kind {
            LocalKind::File => self
                .name
                .strip_suffix(EXPORT_SUFFIX)
                .unwrap_or(&self.name),
            LocalKind::Dir => &self.name,
        }
    }
}

/// List the entries of `dir`, sorted by name.
///
/// Dot-prefixed names are kept, since page titles such as `.NET Guide` are
/// exported as-is. Names that are not valid UTF-8 are skipped with a
/// warning.
pub fn scan_local(dir: &Path) -> Result<Vec<LocalEntry>, SyncError> {
    let io_err = |source| SyncError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };
        let kind = if path.is_dir() {
            LocalKind::Dir
        } else {
            LocalKind::File
        };
        entries.push(LocalEntry { name, path, kind });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
