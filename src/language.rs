//! Language Support - source languages the extractor understands
//!
//! Languages are identified by lowercase name. Anything that maps to `None`
//! here is skipped by the explorer without an error.

use std::path::Path;

/// Every language with an extractor
pub const SUPPORTED_LANGUAGES: &[&str] = &["java"];

/// Detect language from file extension
///
/// Returns the language name understood by `extractors::factory`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "java" => Some("java"),
        _ => None,
    }
}

/// Detect language from a file path
pub fn detect_language(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(detect_language_from_extension)
}

/// Keywords opening a header line (namespace declaration or import)
pub fn header_keywords(language: &str) -> &'static [&'static str] {
    match language {
        "java" => &["package", "import"],
        _ => &[],
    }
}
