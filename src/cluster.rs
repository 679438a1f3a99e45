//! Cluster tree: definitions grouped by namespace path
//!
//! A trie keyed by namespace segments. Each node keeps the full names declared
//! directly at its path and its children in insertion order. The root has an
//! empty address.

use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cluster {
    address: Vec<String>,
    components: BTreeSet<String>,
    children: Vec<Cluster>,
}

impl Cluster {
    /// The root cluster, with an empty address
    pub fn root() -> Self {
        Self::default()
    }

    fn with_address(address: Vec<String>) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }

    /// Path segments from the root to this cluster
    pub fn segments(&self) -> &[String] {
        &self.address
    }

    /// Dotted address; empty for the root
    pub fn address(&self) -> String {
        self.address.join(".")
    }

    /// Last address segment; empty for the root
    pub fn label(&self) -> &str {
        self.address.last().map(String::as_str).unwrap_or("")
    }

    pub fn depth(&self) -> usize {
        self.address.len()
    }

    /// Full names declared directly in this cluster, in sorted order
    pub fn components(&self) -> &BTreeSet<String> {
        &self.components
    }

    pub fn children(&self) -> &[Cluster] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.children.is_empty()
    }

    fn child(&self, segment: &str) -> Option<&Cluster> {
        self.children.iter().find(|c| c.label() == segment)
    }

    fn child_or_insert(&mut self, segment: &str) -> &mut Cluster {
        let index = match self.children.iter().position(|c| c.label() == segment) {
            Some(index) => index,
            None => {
                let mut address = self.address.clone();
                address.push(segment.to_string());
                self.children.push(Cluster::with_address(address));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Create every cluster along `path` that does not exist yet
    pub fn add_cluster<S: AsRef<str>>(&mut self, path: &[S]) -> &mut Cluster {
        path.iter()
            .fold(self, |node, segment| node.child_or_insert(segment.as_ref()))
    }

    /// Record `full_name` at the cluster reached by `path`, creating it if needed
    pub fn add_component<S: AsRef<str>>(&mut self, path: &[S], full_name: impl Into<String>) {
        self.add_cluster(path).components.insert(full_name.into());
    }

    /// Cluster at `path`; absent when any segment is missing
    pub fn get_cluster<S: AsRef<str>>(&self, path: &[S]) -> Option<&Cluster> {
        path.iter()
            .try_fold(self, |node, segment| node.child(segment.as_ref()))
    }

    /// Every cluster of the tree, depth-first, parents before children
    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_get_component() {
        let mut root = Cluster::root();
        root.add_component(&["a", "b"], "a.b/Foo");

        let cluster = root.get_cluster(&["a", "b"]).unwrap();
        assert!(cluster.components().contains("a.b/Foo"));
        assert_eq!(cluster.address(), "a.b");
        assert_eq!(cluster.label(), "b");
        assert!(root.get_cluster(&["a", "x"]).is_none());
        assert!(root.get_cluster(&["a"]).unwrap().components().is_empty());
    }

    #[test]
    fn test_root_path_and_lookup_does_not_create() {
        let mut root = Cluster::root();
        let empty: [&str; 0] = [];
        root.add_component(&empty, "/Main");
        assert!(root.components().contains("/Main"));
        assert_eq!(root.get_cluster(&empty), Some(&root));

        assert!(root.get_cluster(&["missing"]).is_none());
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_add_cluster_reuses_nodes() {
        let mut root = Cluster::root();
        root.add_cluster(&["com", "acme"]);
        root.add_cluster(&["com", "acme", "model"]);
        root.add_component(&["com", "other"], "com.other/X");

        let com = root.get_cluster(&["com"]).unwrap();
        let labels: Vec<&str> = com.children().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["acme", "other"]);
        assert_eq!(root.get_cluster(&["com", "acme", "model"]).unwrap().depth(), 3);

        let addresses: Vec<String> = root.iter().map(Cluster::address).collect();
        assert_eq!(
            addresses,
            vec!["", "com", "com.acme", "com.acme.model", "com.other"]
        );
    }
}
