// pdg_core - Java source trees to UML class models
//
// Text in, model out: a line-oriented normalizer and extractor recover classes,
// interfaces and enums from source without a compiler front end, an explorer
// walks the tree and resolves names across files, and the render layer turns
// the result into a Graphviz class diagram.

pub mod cluster;
pub mod config;
pub mod error;
pub mod explore;
pub mod extractors;
pub mod language;
pub mod model;
pub mod render;
pub mod utils;

pub use cluster::Cluster;
pub use config::{ExploreConfig, ExtractionOptions};
pub use error::{PdgError, Result};
pub use explore::Project;
pub use model::{ClassComponent, Definition, DefinitionKeyword, Visibility};
