//! Directory traversal: finds every source file under the root, skipping
//! ignored packages and hidden directories.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::ExploreConfig;
use crate::error::{PdgError, Result};
use crate::language::detect_language;
use crate::utils::ignore::IgnoreRules;
use crate::utils::paths::{namespace_of_file, to_namespace};

/// A source file found by the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Dotted namespace of the containing directory
    pub context: String,
    pub language: &'static str,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Whether the walk should descend into `entry`
fn keep_entry(entry: &DirEntry, root: &Path, ignore: &IgnoreRules) -> bool {
    if !entry.file_type().is_dir() {
        return true;
    }
    if is_hidden(entry) {
        return false;
    }
    match to_namespace(entry.path(), root) {
        Ok(namespace) if ignore.is_ignored(&namespace) => {
            debug!("Skipping ignored package {}", namespace);
            false
        }
        _ => true,
    }
}

/// Check that the root exists and is a directory
pub fn check_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(PdgError::RootNotFound(root.to_path_buf()))
    }
}

/// Collect the source files under the configured root, in file-name order
///
/// A missing root is an error. Unreadable directories below it are logged and
/// skipped.
pub fn collect_source_files(config: &ExploreConfig) -> Result<Vec<SourceFile>> {
    let root = config.root.as_path();
    check_root(root)?;

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| keep_entry(e, root, &config.ignore));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let path = err.path().unwrap_or(root).to_path_buf();
                return Err(PdgError::Io {
                    path,
                    source: err.into(),
                });
            }
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let Some(language) = detect_language(entry.path()) else {
            continue;
        };
        let context = match namespace_of_file(entry.path(), root) {
            Ok(context) => context,
            Err(err) => {
                warn!("Skipping {}: {:#}", entry.path().display(), err);
                continue;
            }
        };

        files.push(SourceFile {
            path: entry.into_path(),
            context,
            language,
        });
    }

    Ok(files)
}
