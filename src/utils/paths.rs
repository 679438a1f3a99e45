// Path to namespace conversion
//
// A directory below the source root maps to a dotted namespace path: the
// relative components joined with '.'. The root itself is the empty namespace.

use anyhow::{Context, Result};
use std::path::{Component, Path};

/// Convert a directory under `root` to its dotted namespace path
///
/// # Examples
/// ```text
/// to_namespace("/src/com/acme", "/src")  // => "com.acme"
/// to_namespace("/src", "/src")           // => ""
/// ```
pub fn to_namespace(dir: &Path, root: &Path) -> Result<String> {
    let relative = dir.strip_prefix(root).with_context(|| {
        format!(
            "Directory '{}' is not within source root '{}'",
            dir.display(),
            root.display()
        )
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        if let Component::Normal(name) = component {
            // Non-UTF-8 directory names are kept lossily rather than rejected
            segments.push(name.to_string_lossy().into_owned());
        }
    }

    Ok(segments.join("."))
}

/// Namespace of the directory holding `file`
pub fn namespace_of_file(file: &Path, root: &Path) -> Result<String> {
    let parent = file
        .parent()
        .with_context(|| format!("File '{}' has no parent directory", file.display()))?;
    to_namespace(parent, root)
}
