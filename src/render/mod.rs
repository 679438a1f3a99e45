//! Diagram projection: the resolved model as nodes, edges and nested clusters
//!
//! `edges` decides which relationships are drawn and how mutual associations
//! collapse; `dot` turns that into Graphviz text.

pub mod dot;
pub mod edges;

pub use dot::render;
pub use edges::{project_edges, Edge, EdgeKind, NodeIndex};
