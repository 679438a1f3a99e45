//! Shared extractor factory - single place that maps a language to its extractor
//!
//! The explorer never names a language extractor directly; it asks this module
//! for one by language name and drives it through the same three steps:
//! fragments, skeleton, populate.

use crate::config::ExtractionOptions;
use crate::extractors::fragment::Fragment;
use crate::extractors::java::JavaExtractor;
use crate::model::Definition;
use std::path::Path;

/// A language extractor bound to one namespace
pub enum SourceExtractor {
    Java(JavaExtractor),
}

impl SourceExtractor {
    pub fn language(&self) -> &'static str {
        match self {
            SourceExtractor::Java(_) => "java",
        }
    }

    pub fn fragments(&self, source: &str) -> Vec<Fragment> {
        match self {
            SourceExtractor::Java(_) => JavaExtractor::fragments(source),
        }
    }

    pub fn skeleton(&self, fragment: &Fragment) -> Option<Definition> {
        match self {
            SourceExtractor::Java(extractor) => extractor.skeleton(fragment),
        }
    }

    pub fn populate(&self, fragment: &Fragment, definition: &mut Definition, neighbours: &[String]) {
        match self {
            SourceExtractor::Java(extractor) => extractor.populate(fragment, definition, neighbours),
        }
    }
}

/// Create the extractor for `language`, or `None` when the language has none
///
/// # Example
/// ```rust
/// use pdg_core::config::ExtractionOptions;
/// use pdg_core::extractors::factory::extractor_for_language;
///
/// let extractor = extractor_for_language("java", "com.acme", ExtractionOptions::default());
/// assert!(extractor.is_some());
/// assert!(extractor_for_language("cobol", "", ExtractionOptions::default()).is_none());
/// ```
pub fn extractor_for_language(
    language: &str,
    context: &str,
    options: ExtractionOptions,
) -> Option<SourceExtractor> {
    match language {
        "java" => Some(SourceExtractor::Java(JavaExtractor::new(context, options))),
        _ => None,
    }
}

/// Create the extractor for a file, routed by its extension
pub fn extractor_for_path(
    path: &Path,
    context: &str,
    options: ExtractionOptions,
) -> Option<SourceExtractor> {
    let language = crate::language::detect_language(path)?;
    extractor_for_language(language, context, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_by_extension() {
        let options = ExtractionOptions::default();
        let extractor = extractor_for_path(Path::new("src/geo/Shape.java"), "geo", options).unwrap();
        assert_eq!(extractor.language(), "java");
        assert!(extractor_for_path(Path::new("src/geo/notes.txt"), "geo", options).is_none());
    }

    #[test]
    fn test_three_step_extraction() {
        let extractor = extractor_for_language("java", "geo", ExtractionOptions::default()).unwrap();
        let fragments = extractor.fragments("class A {\n}\nclass B {\n}\n");
        assert_eq!(fragments.len(), 2);

        let mut definition = extractor.skeleton(&fragments[1]).unwrap();
        assert_eq!(definition.full_name(), "geo/B");
        extractor.populate(&fragments[1], &mut definition, &["geo/A".to_string()]);
        assert!(definition.unresolved().associations.is_empty());
    }
}
