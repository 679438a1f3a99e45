// Relationship projection
//
// Node ids enumerate classes, then interfaces, then enums, each in full-name
// order. A mutual association is drawn once, from the lower id, undirected.

use std::collections::HashMap;

use crate::explore::Project;
use crate::model::{Definition, DefinitionKeyword};

/// Stable diagram identity of every definition in a project
#[derive(Debug, Clone, Default)]
pub struct NodeIndex<'a> {
    order: Vec<&'a Definition>,
    ids: HashMap<String, usize>,
}

impl<'a> NodeIndex<'a> {
    pub fn new(project: &'a Project) -> Self {
        let order: Vec<&Definition> = project
            .classes()
            .chain(project.interfaces())
            .chain(project.enums())
            .collect();
        let ids = order
            .iter()
            .enumerate()
            .map(|(id, def)| (def.full_name(), id))
            .collect();
        Self { order, ids }
    }

    pub fn id(&self, full_name: &str) -> Option<usize> {
        self.ids.get(full_name).copied()
    }

    /// Definitions paired with their ids, in id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Definition)> + '_ {
        self.order.iter().copied().enumerate()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Inheritance,
    /// Keyword of the realizing definition; it picks the line style
    Realization(DefinitionKeyword),
    /// `mutual` edges stand for a pair of associations and carry no arrowhead
    Association { mutual: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeKind,
}

/// Every relationship edge of `project`, grouped by source node
///
/// Per source: inheritance, then realizations, then associations, each in
/// model order. Targets outside the index are skipped.
pub fn project_edges(project: &Project, nodes: &NodeIndex<'_>) -> Vec<Edge> {
    let mut edges = Vec::new();

    for (from, def) in nodes.iter() {
        if let Some(to) = def.inheritance().and_then(|parent| nodes.id(parent)) {
            edges.push(Edge {
                from,
                to,
                kind: EdgeKind::Inheritance,
            });
        }

        for to in def.realizations().iter().filter_map(|r| nodes.id(r)) {
            edges.push(Edge {
                from,
                to,
                kind: EdgeKind::Realization(def.keyword()),
            });
        }

        let own = def.full_name();
        for target in def.associations() {
            let (Some(to), Some(other)) = (nodes.id(target), project.get(target)) else {
                continue;
            };
            let mutual = other.has_associate(&own);
            if mutual && from > to {
                continue;
            }
            edges.push(Edge {
                from,
                to,
                kind: EdgeKind::Association { mutual },
            });
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawAssociation, RawReferences};

    fn with_raw(mut def: Definition, raw: RawReferences) -> Definition {
        def.set_unresolved(raw);
        def
    }

    fn neighbours(names: &[&str]) -> RawReferences {
        RawReferences {
            associations: names
                .iter()
                .map(|n| RawAssociation::Neighbor(n.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_follow_kind_then_full_name() {
        let project = Project::from_definitions(vec![
            Definition::enumeration("Color", "a"),
            Definition::interface("Shape", "a"),
            Definition::class("Zed", "a"),
            Definition::class("Alpha", "b"),
        ]);
        let nodes = NodeIndex::new(&project);
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes.id("a/Zed"), Some(0));
        assert_eq!(nodes.id("b/Alpha"), Some(1));
        assert_eq!(nodes.id("a/Shape"), Some(2));
        assert_eq!(nodes.id("a/Color"), Some(3));
        assert_eq!(nodes.id("a/Missing"), None);
    }

    #[test]
    fn test_mutual_association_is_drawn_once() {
        let project = Project::from_definitions(vec![
            with_raw(Definition::class("A", "p"), neighbours(&["p/B", "p/C"])),
            with_raw(Definition::class("B", "p"), neighbours(&["p/A"])),
            Definition::class("C", "p"),
        ]);
        let nodes = NodeIndex::new(&project);
        let edges = project_edges(&project, &nodes);
        assert_eq!(
            edges,
            vec![
                Edge {
                    from: 0,
                    to: 1,
                    kind: EdgeKind::Association { mutual: true }
                },
                Edge {
                    from: 0,
                    to: 2,
                    kind: EdgeKind::Association { mutual: false }
                },
            ]
        );
    }

    #[test]
    fn test_inheritance_and_realization_edges() {
        let project = Project::from_definitions(vec![
            with_raw(
                Definition::class("Car", "g"),
                RawReferences {
                    inheritance: Some("Vehicle".into()),
                    realizations: vec!["Drivable".into()],
                    ..Default::default()
                },
            ),
            Definition::class("Vehicle", "g"),
            Definition::interface("Drivable", "g"),
            with_raw(
                Definition::enumeration("Gear", "g"),
                RawReferences {
                    realizations: vec!["Drivable".into()],
                    ..Default::default()
                },
            ),
        ]);
        let nodes = NodeIndex::new(&project);
        let edges = project_edges(&project, &nodes);
        let car = nodes.id("g/Car").unwrap();
        let drivable = nodes.id("g/Drivable").unwrap();
        assert_eq!(
            edges,
            vec![
                Edge {
                    from: car,
                    to: nodes.id("g/Vehicle").unwrap(),
                    kind: EdgeKind::Inheritance
                },
                Edge {
                    from: car,
                    to: drivable,
                    kind: EdgeKind::Realization(DefinitionKeyword::Class)
                },
                Edge {
                    from: nodes.id("g/Gear").unwrap(),
                    to: drivable,
                    kind: EdgeKind::Realization(DefinitionKeyword::Enum)
                },
            ]
        );
    }
}
