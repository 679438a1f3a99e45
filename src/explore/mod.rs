//! Project explorer: walks a source tree and builds the resolved model.
//!
//! Three phases with a barrier between each:
//! 1. walk and split every file into fragments, index skeleton definitions by
//!    full name and record them in the cluster tree;
//! 2. extract members and raw references of every fragment in parallel, with
//!    the same-package names from the finished cluster tree;
//! 3. resolve raw references against the complete universe.

pub mod resolve;
pub mod walk;

use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use tracing::{debug, info, warn};

use crate::cluster::Cluster;
use crate::config::{ExploreConfig, ExtractionOptions};
use crate::error::{PdgError, Result};
use crate::extractors::factory::extractor_for_language;
use crate::extractors::fragment::Fragment;
use crate::model::{Definition, DefinitionKeyword};

pub use walk::SourceFile;

/// A definition waiting for phase two
struct Pending {
    definition: Definition,
    fragment: Fragment,
    language: &'static str,
}

/// The resolved model of one source tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct Project {
    definitions: BTreeMap<String, Definition>,
    clusters: Cluster,
}

impl Project {
    /// Explore the tree described by `config`
    pub fn explore(config: &ExploreConfig) -> Result<Project> {
        info!("Exploring {}", config.root.display());
        let files = walk::collect_source_files(config)?;
        info!("Found {} source files", files.len());

        let per_file: Vec<Vec<Pending>> = files
            .par_iter()
            .map(|file| read_skeletons(file, config.options))
            .collect();

        let mut clusters = Cluster::root();
        let mut pending: Vec<Pending> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();
        for entry in per_file.into_iter().flatten() {
            let full_name = entry.definition.full_name();
            if seen.contains(&full_name) {
                warn!("Duplicate definition {}; keeping the first one found", full_name);
                continue;
            }
            clusters.add_component(&entry.definition.context_segments(), full_name.clone());
            seen.insert(full_name);
            pending.push(entry);
        }

        info!("Extracting members of {} definitions", pending.len());
        pending.par_iter_mut().for_each(|entry| {
            let context = entry.definition.context().to_string();
            let neighbours: Vec<String> = clusters
                .get_cluster(&crate::model::namespace_segments(&context))
                .map(|cluster| cluster.components().iter().cloned().collect())
                .unwrap_or_default();
            if let Some(extractor) = extractor_for_language(entry.language, &context, config.options) {
                extractor.populate(&entry.fragment, &mut entry.definition, &neighbours);
            }
        });

        let definitions: BTreeMap<String, Definition> = pending
            .into_iter()
            .map(|entry| (entry.definition.full_name(), entry.definition))
            .collect();

        let mut project = Project {
            definitions,
            clusters,
        };
        project.resolve();
        Ok(project)
    }

    /// Build a project from definitions whose raw references are already set,
    /// then resolve it
    pub fn from_definitions(definitions: impl IntoIterator<Item = Definition>) -> Project {
        let mut project = Project::default();
        for definition in definitions {
            let full_name = definition.full_name();
            if project.definitions.contains_key(&full_name) {
                warn!("Duplicate definition {}; keeping the first one found", full_name);
                continue;
            }
            project
                .clusters
                .add_component(&definition.context_segments(), full_name.clone());
            project.definitions.insert(full_name, definition);
        }
        project.resolve();
        project
    }

    /// Run the resolution pass again; bindings are rebuilt from scratch
    pub fn resolve(&mut self) {
        resolve::resolve(&mut self.definitions);
    }

    fn of_kind(&self, keyword: DefinitionKeyword) -> impl Iterator<Item = &Definition> {
        self.definitions
            .values()
            .filter(move |d| d.keyword() == keyword)
    }

    pub fn classes(&self) -> impl Iterator<Item = &Definition> {
        self.of_kind(DefinitionKeyword::Class)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &Definition> {
        self.of_kind(DefinitionKeyword::Interface)
    }

    pub fn enums(&self) -> impl Iterator<Item = &Definition> {
        self.of_kind(DefinitionKeyword::Enum)
    }

    /// All definitions in full-name order
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    pub fn get(&self, full_name: &str) -> Option<&Definition> {
        self.definitions.get(full_name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Root of the cluster tree
    pub fn cluster_root(&self) -> &Cluster {
        &self.clusters
    }

    /// The resolved model as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The resolved model as a Graphviz DOT class diagram
    pub fn to_dot(&self) -> String {
        crate::render::dot::render(self)
    }
}

/// Phase one for a single file: read, split and build skeletons
///
/// An unreadable file is logged and contributes nothing.
fn read_skeletons(file: &SourceFile, options: ExtractionOptions) -> Vec<Pending> {
    let bytes = match fs::read(&file.path) {
        Ok(bytes) => bytes,
        Err(source) => {
            let err = PdgError::Io {
                path: file.path.clone(),
                source,
            };
            warn!("Skipping file: {}", err);
            return Vec::new();
        }
    };
    let source = String::from_utf8_lossy(&bytes);

    let Some(extractor) = extractor_for_language(file.language, &file.context, options) else {
        return Vec::new();
    };

    let pending: Vec<Pending> = extractor
        .fragments(&source)
        .into_iter()
        .filter_map(|fragment| {
            let definition = extractor.skeleton(&fragment)?;
            Some(Pending {
                definition,
                fragment,
                language: file.language,
            })
        })
        .collect();

    debug!(
        "{}: {} definitions",
        file.path.display(),
        pending.len()
    );
    pending
}
