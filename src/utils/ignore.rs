//! Utilities for handling .pdgignore rules
//!
//! Rules name namespaces, not files: `com.acme.gen` skips exactly that package
//! directory, while an entry containing a glob metacharacter (`*.internal`,
//! `com.acme.test?`) is matched against the dotted namespace path.
//!
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the ignore file looked up in the source root
pub const IGNORE_FILE_NAME: &str = ".pdgignore";

/// Load ignore entries from `.pdgignore` in the source root
///
/// Returns the raw entries. Empty lines and comments (lines starting with #) are skipped.
///
/// # Examples
///
/// ```text
/// # .pdgignore file content
/// com.acme.generated
/// *.internal
/// ```
pub fn load_pdgignore(root: &Path) -> Result<Vec<String>> {
    let ignore_file = root.join(IGNORE_FILE_NAME);

    if !ignore_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&ignore_file)
        .with_context(|| format!("Failed to read {}", ignore_file.display()))?;

    let entries: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect();

    if !entries.is_empty() {
        debug!(
            "Loaded {} ignore entries from {}",
            entries.len(),
            IGNORE_FILE_NAME
        );
    }

    Ok(entries)
}

/// Packages excluded from exploration
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    packages: BTreeSet<String>,
    patterns: Vec<glob::Pattern>,
}

impl IgnoreRules {
    /// Ignore exactly this dotted namespace path
    pub fn add_package(&mut self, package: impl Into<String>) {
        self.packages.insert(package.into());
    }

    pub fn add_pattern(&mut self, pattern: &str) -> Result<()> {
        let compiled = glob::Pattern::new(pattern)
            .with_context(|| format!("Invalid ignore pattern '{}'", pattern))?;
        self.patterns.push(compiled);
        Ok(())
    }

    /// Route an ignore-file entry: entries with glob metacharacters become
    /// patterns, everything else an exact package
    pub fn add_rule(&mut self, entry: &str) -> Result<()> {
        if entry.contains(['*', '?', '[']) {
            self.add_pattern(entry)
        } else {
            self.add_package(entry);
            Ok(())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.patterns.is_empty()
    }

    /// Whether the directory with this dotted namespace path is skipped
    ///
    /// Only the matching directory is tested here; its subtree is skipped by the
    /// walker pruning the directory itself.
    pub fn is_ignored(&self, namespace: &str) -> bool {
        if namespace.is_empty() {
            return false;
        }
        self.packages.contains(namespace) || self.patterns.iter().any(|p| p.matches(namespace))
    }
}
