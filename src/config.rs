//! Extraction and exploration settings
//!
//! Options are plain values passed to the extractor and explorer; nothing here is
//! global.

use std::path::{Path, PathBuf};

use crate::utils::ignore::IgnoreRules;

/// Which members survive extraction
///
/// Filtering happens while members are extracted: an excluded member never
/// reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Keep fields (and enum constants)
    pub include_instance_variables: bool,
    /// Keep functions and constructors
    pub include_functions: bool,
    /// Keep members declared `private`
    pub include_private: bool,
    /// Keep compile-time constants, i.e. members that are both `static` and `final`
    pub include_constants: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            include_instance_variables: true,
            include_functions: true,
            include_private: true,
            include_constants: false,
        }
    }
}

impl ExtractionOptions {
    /// Every member kind and visibility is kept
    pub fn all() -> Self {
        Self {
            include_instance_variables: true,
            include_functions: true,
            include_private: true,
            include_constants: true,
        }
    }

    pub fn with_instance_variables(mut self, include: bool) -> Self {
        self.include_instance_variables = include;
        self
    }

    pub fn with_functions(mut self, include: bool) -> Self {
        self.include_functions = include;
        self
    }

    pub fn with_private(mut self, include: bool) -> Self {
        self.include_private = include;
        self
    }

    pub fn with_constants(mut self, include: bool) -> Self {
        self.include_constants = include;
        self
    }
}

/// Everything the explorer needs to run over one source tree
#[derive(Debug, Clone)]
pub struct ExploreConfig {
    pub root: PathBuf,
    pub options: ExtractionOptions,
    pub ignore: IgnoreRules,
}

impl ExploreConfig {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options: ExtractionOptions::default(),
            ignore: IgnoreRules::default(),
        }
    }

    pub fn with_options(mut self, options: ExtractionOptions) -> Self {
        self.options = options;
        self
    }

    /// Skip the directory whose namespace path is exactly `package` (e.g. `com.acme.gen`)
    pub fn ignore_package(mut self, package: impl Into<String>) -> Self {
        self.ignore.add_package(package);
        self
    }

    /// Merge the rules found in `<root>/.pdgignore`, if any
    pub fn with_ignore_file(mut self) -> anyhow::Result<Self> {
        let entries = crate::utils::ignore::load_pdgignore(&self.root)?;
        for entry in entries {
            self.ignore.add_rule(&entry)?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hides_constants_only() {
        let opts = ExtractionOptions::default();
        assert!(opts.include_instance_variables);
        assert!(opts.include_functions);
        assert!(opts.include_private);
        assert!(!opts.include_constants);
    }

    #[test]
    fn test_builder_setters() {
        let opts = ExtractionOptions::all()
            .with_functions(false)
            .with_private(false);
        assert!(!opts.include_functions);
        assert!(!opts.include_private);
        assert!(opts.include_constants);

        let config = ExploreConfig::new("/src")
            .with_options(opts)
            .ignore_package("com.acme.gen");
        assert_eq!(config.options, opts);
        assert!(config.ignore.is_ignored("com.acme.gen"));
        assert!(!config.ignore.is_ignored("com.acme"));
    }
}
