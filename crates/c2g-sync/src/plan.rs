//! Per-folder reconciliation planning.
//!
//! [`plan_level`] decides what to do for one local folder and its remote
//! counterpart without touching Drive; [`crate::FolderSync`] carries the
//! actions out.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use c2g_gdrive::RemoteEntry;
use tracing::debug;

use crate::local::{LocalEntry, LocalKind};
use crate::options::SyncOptions;

/// One reconciliation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncAction {
    /// Remote file with no local counterpart.
    DeleteOrphan {
        /// Remote entry to delete.
        entry: RemoteEntry,
    },
    /// Local subfolder; recurse into the remote folder, creating it when
    /// `remote_id` is `None`.
    EnterFolder {
        /// Folder name.
        name: String,
        /// Local folder path.
        path: PathBuf,
        /// Existing remote folder ID.
        remote_id: Option<String>,
    },
    /// Remote file exists and `skip_existing` is set.
    Skip {
        /// Remote title.
        title: String,
    },
    /// Replace the content of an existing remote file.
    Update {
        /// Remote title.
        title: String,
        /// Local file path.
        path: PathBuf,
        /// Existing remote file ID.
        file_id: String,
    },
    /// Create a new remote file.
    Upload {
        /// Remote title.
        title: String,
        /// Local file path.
        path: PathBuf,
    },
}

/// Ordered actions for one folder level: deletions first, then local
/// entries in name order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelPlan {
    /// Actions in execution order.
    pub actions: Vec<SyncAction>,
}

/// Plan the reconciliation of one local folder against its remote listing.
#[must_use]
pub fn plan_level(
    local: &[LocalEntry],
    remote: &[RemoteEntry],
    options: &SyncOptions,
) -> LevelPlan {
    let mut actions = Vec::new();

    if options.delete_orphans {
        let local_files: HashSet<&str> = local
            .iter()
            .filter(|e| e.kind == LocalKind::File)
            .map(LocalEntry::title)
            .collect();
        let local_dirs: HashSet<&str> = local
            .iter()
            .filter(|e| e.kind == LocalKind::Dir)
            .map(|e| e.name.as_str())
            .collect();

        for entry in remote {
            if entry.is_hidden() || entry.is_folder() {
                continue;
            }
            let name = entry.name.as_str();
            if !local_files.contains(name) && !local_dirs.contains(name) {
                actions.push(SyncAction::DeleteOrphan {
                    entry: entry.clone(),
                });
            }
        }
    }

    let mut remote_files: HashMap<&str, &RemoteEntry> = HashMap::new();
    let mut remote_folders: HashMap<&str, &RemoteEntry> = HashMap::new();
    for entry in remote {
        let by_name = if entry.is_folder() {
            &mut remote_folders
        } else {
            &mut remote_files
        };
        by_name.entry(entry.name.as_str()).or_insert(entry);
    }

    for entry in local {
        let action = match entry.kind {
            LocalKind::Dir => SyncAction::EnterFolder {
                name: entry.name.clone(),
                path: entry.path.clone(),
                remote_id: remote_folders.get(entry.name.as_str()).map(|f| f.id.clone()),
            },
            LocalKind::File => {
                let title = entry.title().to_owned();
                match remote_files.get(title.as_str()) {
                    Some(_) if options.skip_existing => SyncAction::Skip { title },
                    Some(existing) => SyncAction::Update {
                        file_id: existing.id.clone(),
                        title,
                        path: entry.path.clone(),
                    },
                    None => SyncAction::Upload {
                        title,
                        path: entry.path.clone(),
                    },
                }
            }
        };
        actions.push(action);
    }

    debug!("Planned {} actions", actions.len());
    LevelPlan { actions }
}

#[cfg(test)]
mod tests {
    use c2g_gdrive::{FOLDER_MIME_TYPE, GOOGLE_DOC_MIME_TYPE};
    use pretty_assertions::assert_eq;

    use super::*;

    fn file(name: &str) -> LocalEntry {
        LocalEntry {
            name: name.to_owned(),
            path: PathBuf::from("/x").join(name),
            kind: LocalKind::File,
        }
    }

    fn dir(name: &str) -> LocalEntry {
        LocalEntry {
            name: name.to_owned(),
            path: PathBuf::from("/x").join(name),
            kind: LocalKind::Dir,
        }
    }

    fn doc(id: &str, name: &str) -> RemoteEntry {
        RemoteEntry {
            id: id.to_owned(),
            name: name.to_owned(),
            mime_type: GOOGLE_DOC_MIME_TYPE.to_owned(),
        }
    }

    fn folder(id: &str, name: &str) -> RemoteEntry {
        RemoteEntry {
            id: id.to_owned(),
            name: name.to_owned(),
            mime_type: FOLDER_MIME_TYPE.to_owned(),
        }
    }

    #[test]
    fn test_empty_remote_uploads_everything() {
        let plan = plan_level(&[file("A.html"), dir("B")], &[], &SyncOptions::default());

        assert_eq!(
            plan.actions,
            vec![
                SyncAction::Upload {
                    title: "A".to_owned(),
                    path: PathBuf::from("/x/A.html"),
                },
                SyncAction::EnterFolder {
                    name: "B".to_owned(),
                    path: PathBuf::from("/x/B"),
                    remote_id: None,
                },
            ]
        );
    }

    #[test]
    fn test_existing_file_is_updated_or_skipped() {
        let local = [file("A.html")];
        let remote = [doc("d1", "A")];

        let update = plan_level(&local, &remote, &SyncOptions::default());
        let skip = plan_level(
            &local,
            &remote,
            &SyncOptions {
                skip_existing: true,
                ..SyncOptions::default()
            },
        );

        assert_eq!(
            update.actions,
            vec![SyncAction::Update {
                title: "A".to_owned(),
                path: PathBuf::from("/x/A.html"),
                file_id: "d1".to_owned(),
            }]
        );
        assert_eq!(
            skip.actions,
            vec![SyncAction::Skip {
                title: "A".to_owned()
            }]
        );
    }

    #[test]
    fn test_existing_folder_is_reused() {
        let plan = plan_level(&[dir("B")], &[folder("f1", "B")], &SyncOptions::default());

        assert_eq!(
            plan.actions,
            vec![SyncAction::EnterFolder {
                name: "B".to_owned(),
                path: PathBuf::from("/x/B"),
                remote_id: Some("f1".to_owned()),
            }]
        );
    }

    #[test]
    fn test_remote_folder_does_not_match_local_file() {
        let plan = plan_level(&[file("B.html")], &[folder("f1", "B")], &SyncOptions::default());

        assert!(matches!(&plan.actions[0], SyncAction::Upload { title, .. } if title == "B"));
    }

    #[test]
    fn test_orphan_scope() {
        let local = [file("A.html"), dir("Sub")];
        let remote = [
            doc("d1", "A"),
            doc("d2", "Orphan"),
            doc("d3", ".hidden"),
            folder("f1", "KeepMe"),
            doc("d4", "Sub"),
        ];
        let options = SyncOptions {
            delete_orphans: true,
            ..SyncOptions::default()
        };

        let plan = plan_level(&local, &remote, &options);

        let deletions: Vec<_> = plan
            .actions
            .iter()
            .filter_map(|a| match a {
                SyncAction::DeleteOrphan { entry } => Some(entry.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(deletions, vec!["Orphan"]);
        assert!(matches!(plan.actions[0], SyncAction::DeleteOrphan { .. }));
    }

    #[test]
    fn test_no_deletions_without_option() {
        let plan = plan_level(&[], &[doc("d2", "Orphan")], &SyncOptions::default());
        assert!(plan.actions.is_empty());
    }
}
