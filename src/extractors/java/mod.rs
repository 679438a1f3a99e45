/// Java extractor: recovers definitions, members and raw references from Java source
///
/// This module is organized into focused sub-modules:
/// - helpers: Shared utility functions (predicates, tokenizing, type text)
/// - classes: Definition kind, name, abstractness, parent and contracts
/// - methods: Method and constructor extraction
/// - fields: Field and enum constant extraction
/// - relationships: Import and same-package association candidates
///
/// Extraction runs in two steps so the explorer can index every definition
/// before any body is searched for neighbour names: `skeleton` builds the bare
/// definition, `populate` fills in members and raw references.
mod classes;
mod fields;
mod helpers;
mod methods;
mod relationships;

use crate::config::ExtractionOptions;
use crate::extractors::fragment::{self, brace_delta, Fragment};
use crate::extractors::normalize::normalize;
use crate::model::{Definition, DefinitionKeyword, RawReferences};
use fields::ConstantList;
use tracing::debug;

pub(crate) use helpers::{is_definition_line, is_header_line};

/// Java extractor for one namespace
pub struct JavaExtractor {
    context: String,
    options: ExtractionOptions,
}

impl JavaExtractor {
    pub fn new(context: impl Into<String>, options: ExtractionOptions) -> Self {
        Self {
            context: context.into(),
            options,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn options(&self) -> ExtractionOptions {
        self.options
    }

    /// Normalize a source file and cut it into one fragment per definition
    pub fn fragments(source: &str) -> Vec<Fragment> {
        let lines = normalize(source);
        fragment::split(&lines, is_header_line, is_definition_line)
    }

    /// Kind, name and abstract flag of a fragment; `None` when it declares nothing
    pub fn skeleton(&self, fragment: &Fragment) -> Option<Definition> {
        classes::build_skeleton(fragment.body.iter().map(String::as_str), &self.context)
    }

    /// Fill a skeleton with the members and raw references found in its fragment
    ///
    /// `neighbours` are the full names of definitions in the same namespace, in
    /// the order raw associations should be recorded.
    pub fn populate(&self, fragment: &Fragment, definition: &mut Definition, neighbours: &[String]) {
        let body: Vec<&str> = fragment.body.iter().map(String::as_str).collect();
        let Some(def_index) = body.iter().position(|line| is_definition_line(line)) else {
            return;
        };
        let def_line = body[def_index];
        let keyword = definition.keyword();

        let raw = RawReferences {
            inheritance: classes::extract_inheritance(keyword, def_line),
            realizations: classes::extract_realizations(keyword, def_line),
            associations: relationships::extract_raw_associations(
                fragment.header.iter().map(String::as_str),
                body.iter().copied(),
                definition.name(),
                neighbours,
            ),
        };

        self.extract_members(&body[def_index..], definition);
        definition.set_unresolved(raw);

        debug!(
            "Extracted {} ({} functions, {} fields)",
            definition.full_name(),
            definition.functions().len(),
            definition.instance_variables().len()
        );
    }

    /// Walk the lines directly inside the definition's braces; deeper lines are
    /// method bodies or initializers and never declare members
    fn extract_members(&self, lines: &[&str], definition: &mut Definition) {
        let Some((def_line, rest)) = lines.split_first() else {
            return;
        };
        let mut depth = brace_delta(def_line);
        let mut skip_next = false;
        let mut expect_enum_constants = true;

        for line in rest {
            let level = depth;
            depth += brace_delta(line);
            if level != 1 {
                continue;
            }

            if helpers::is_annotation_line(line) {
                if helpers::contains_word(line, "Override") {
                    skip_next = true;
                }
                continue;
            }
            if skip_next {
                skip_next = false;
                continue;
            }

            let decl = helpers::strip_annotations(line);
            if decl.is_empty() || decl == "}" {
                continue;
            }

            if expect_enum_constants {
                match fields::extract_enum_constants(self, &decl, definition) {
                    ConstantList::Continues => continue,
                    ConstantList::Ends => {
                        expect_enum_constants = false;
                        continue;
                    }
                    ConstantList::NotConstants => expect_enum_constants = false,
                }
            }

            if fields::is_instance_variable_candidate(&decl) {
                if definition.keyword() != DefinitionKeyword::Interface {
                    fields::extract_instance_variables(self, &decl, definition);
                }
                continue;
            }
            methods::extract_function(self, &decl, definition);
        }
    }

    /// Extract every definition of one file, with `neighbours` already known
    pub fn extract_definitions(&self, source: &str, neighbours: &[String]) -> Vec<Definition> {
        Self::fragments(source)
            .iter()
            .filter_map(|fragment| {
                let mut definition = self.skeleton(fragment)?;
                self.populate(fragment, &mut definition, neighbours);
                Some(definition)
            })
            .collect()
    }
}
