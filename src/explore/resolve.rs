//! Resolution pass: binds raw names to definitions.
//!
//! Bindings are computed for every definition in parallel against the
//! read-only universe, then applied in full-name order. Every definition's
//! bindings are cleared first, so running the pass again over the same
//! universe gives the same result.
//!
//! Simple-name lookups pick one candidate: same namespace first, then the
//! longest shared namespace prefix, then the shallowest namespace, then the
//! smallest full name.

use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use crate::model::{
    namespace_of, namespace_segments, simple_name, Definition, DefinitionKeyword, RawAssociation,
};

/// Full names indexed by simple name, each list in full-name order
type SimpleNameIndex<'a> = HashMap<&'a str, Vec<&'a str>>;

/// Everything one definition gets bound to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pub inheritance: Option<String>,
    pub realizations: Vec<String>,
    pub associations: Vec<String>,
}

fn build_index(universe: &BTreeMap<String, Definition>) -> SimpleNameIndex<'_> {
    let mut index: SimpleNameIndex<'_> = HashMap::new();
    for full_name in universe.keys() {
        index
            .entry(simple_name(full_name))
            .or_default()
            .push(full_name.as_str());
    }
    index
}

/// Number of leading namespace segments two contexts share
fn shared_prefix(a: &str, b: &str) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    a.split('.')
        .zip(b.split('.'))
        .take_while(|(x, y)| x == y)
        .count()
}

/// Pick the best definition named `name` as seen from `context`
fn best_candidate<'a, F>(
    universe: &BTreeMap<String, Definition>,
    index: &SimpleNameIndex<'a>,
    name: &str,
    context: &str,
    own_full_name: &str,
    accept: F,
) -> Option<&'a str>
where
    F: Fn(&Definition) -> bool,
{
    index
        .get(name)?
        .iter()
        .copied()
        .filter(|full| *full != own_full_name)
        .filter(|full| universe.get(*full).is_some_and(&accept))
        .min_by_key(|&full| {
            let candidate_context = namespace_of(full);
            (
                candidate_context != context,
                Reverse(shared_prefix(candidate_context, context)),
                namespace_segments(candidate_context).len(),
                full,
            )
        })
}

/// Compute the bindings of one definition
fn compute_bindings(
    definition: &Definition,
    universe: &BTreeMap<String, Definition>,
    index: &SimpleNameIndex<'_>,
) -> Bindings {
    let own = definition.full_name();
    let context = definition.context();
    let raw = definition.unresolved();
    let mut bindings = Bindings::default();

    if definition.keyword() == DefinitionKeyword::Class {
        bindings.inheritance = raw.inheritance.as_deref().and_then(|name| {
            best_candidate(universe, index, name, context, &own, |d| {
                d.keyword() == DefinitionKeyword::Class
            })
            .map(str::to_string)
        });
    }

    for name in &raw.realizations {
        let bound = best_candidate(universe, index, name, context, &own, |d| {
            d.keyword() == DefinitionKeyword::Interface
        });
        if let Some(full) = bound {
            if !bindings.realizations.iter().any(|r| r == full) {
                bindings.realizations.push(full.to_string());
            }
        }
    }

    // Names already drawn as inheritance or realization never become associations
    let barred: HashSet<&str> = bindings
        .realizations
        .iter()
        .chain(bindings.inheritance.iter())
        .map(|full| simple_name(full))
        .collect();

    let push = |full: &str, out: &mut Vec<String>| {
        if full != own && !barred.contains(simple_name(full)) && !out.iter().any(|a| a == full) {
            out.push(full.to_string());
        }
    };

    let mut associations = Vec::new();
    for association in &raw.associations {
        match association {
            RawAssociation::Import(full) => {
                if universe.contains_key(full) {
                    push(full.as_str(), &mut associations);
                }
            }
            RawAssociation::WildcardImport(namespace) => {
                for (full, candidate) in universe {
                    if candidate.context() == namespace {
                        push(full.as_str(), &mut associations);
                    }
                }
            }
            RawAssociation::Neighbor(full) => {
                let target = if universe.contains_key(full) {
                    Some(full.as_str())
                } else {
                    best_candidate(universe, index, simple_name(full), context, &own, |_| true)
                };
                if let Some(target) = target {
                    push(target, &mut associations);
                }
            }
        }
    }
    bindings.associations = associations;
    bindings
}

/// Bind every definition's raw references against the whole universe
pub fn resolve(definitions: &mut BTreeMap<String, Definition>) {
    let computed: Vec<(String, Bindings)> = {
        let universe: &BTreeMap<String, Definition> = definitions;
        let index = build_index(universe);
        let names: Vec<&String> = universe.keys().collect();
        names
            .par_iter()
            .filter_map(|full| {
                let definition = universe.get(*full)?;
                Some(((*full).clone(), compute_bindings(definition, universe, &index)))
            })
            .collect()
    };

    let mut unresolved_parents = 0usize;
    for (full_name, bindings) in computed {
        let Some(definition) = definitions.get_mut(&full_name) else {
            continue;
        };
        definition.clear_bindings();

        if definition.unresolved().inheritance.is_some() && bindings.inheritance.is_none() {
            unresolved_parents += 1;
        }
        if bindings.inheritance.is_some() {
            if let Err(err) = definition.set_inheritance(bindings.inheritance) {
                debug!("Inheritance not bound for {}: {}", full_name, err);
            }
        }
        for realization in bindings.realizations {
            definition.add_realization(realization);
        }
        for association in bindings.associations {
            definition.add_association(association);
        }
    }

    info!(
        "Resolved {} definitions ({} parents outside the scanned tree)",
        definitions.len(),
        unresolved_parents
    );
}
