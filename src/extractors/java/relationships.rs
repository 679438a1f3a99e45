/// Raw association extraction: imports and same-package name mentions
use crate::model::{form_full_name, simple_name, RawAssociation};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::helpers;

/// `import [static] a.b.C[.*];`
static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^import\s+(static\s+)?([A-Za-z_$][\w$.]*?)(\.\*)?\s*;?$").unwrap()
});

/// Split a dotted path into namespace and simple name
fn split_qualified(path: &str) -> (&str, &str) {
    path.rsplit_once('.').unwrap_or(("", path))
}

/// Turn an import statement into a raw association
///
/// A static import names a member, so the owning type is kept. A wildcard over
/// a package is kept as a namespace marker.
pub(super) fn extract_import(line: &str) -> Option<RawAssociation> {
    let captures = IMPORT_RE.captures(line)?;
    let is_static = captures.get(1).is_some();
    let path = captures.get(2)?.as_str();
    let is_wildcard = captures.get(3).is_some();

    let type_path = if is_static && !is_wildcard {
        split_qualified(path).0
    } else {
        path
    };
    if type_path.is_empty() {
        return None;
    }

    if is_wildcard && !is_static {
        return Some(RawAssociation::WildcardImport(type_path.to_string()));
    }
    let (namespace, name) = split_qualified(type_path);
    Some(RawAssociation::Import(form_full_name(namespace, name)))
}

/// `[visibility] Name(` where `Name` is the definition's own name
fn is_constructor_line(line: &str, name: &str) -> bool {
    let rest = match helpers::leading_visibility(line) {
        Some(_) => line
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim_start())
            .unwrap_or(""),
        None => line,
    };
    rest.strip_prefix(name)
        .is_some_and(|after| after.trim_start().starts_with('('))
}

/// Raw associations of one fragment
///
/// Imports come from the header. Every other line is searched for the simple
/// names of `neighbours` (full names, in the order they should be recorded).
/// The definition's own name is not counted on its definition line or its
/// constructor lines.
pub(super) fn extract_raw_associations<'a>(
    header: impl IntoIterator<Item = &'a str>,
    body: impl IntoIterator<Item = &'a str>,
    own_name: &str,
    neighbours: &[String],
) -> Vec<RawAssociation> {
    let mut associations: Vec<RawAssociation> = Vec::new();

    for line in header {
        if let Some(import) = extract_import(line) {
            if !associations.contains(&import) {
                associations.push(import);
            }
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for line in body {
        if helpers::is_header_line(line) {
            continue;
        }
        for full_name in neighbours {
            if seen.contains(full_name.as_str()) {
                continue;
            }
            let name = simple_name(full_name);
            if !helpers::contains_word(line, name) {
                continue;
            }
            if name == own_name
                && (helpers::is_definition_line(line) || is_constructor_line(line, own_name))
            {
                continue;
            }
            seen.insert(full_name.as_str());
            associations.push(RawAssociation::Neighbor(full_name.clone()));
        }
    }

    associations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_forms() {
        assert_eq!(
            extract_import("import a.b.Foo;"),
            Some(RawAssociation::Import("a.b/Foo".into()))
        );
        assert_eq!(
            extract_import("import a.b.*;"),
            Some(RawAssociation::WildcardImport("a.b".into()))
        );
        assert_eq!(
            extract_import("import static a.b.Util.max;"),
            Some(RawAssociation::Import("a.b/Util".into()))
        );
        assert_eq!(
            extract_import("import static a.b.Util.*;"),
            Some(RawAssociation::Import("a.b/Util".into()))
        );
        assert_eq!(extract_import("package a.b;"), None);
    }

    #[test]
    fn test_neighbour_mentions() {
        let neighbours = vec![
            "garage/Car".to_string(),
            "garage/Engine".to_string(),
            "garage/Wheel".to_string(),
        ];
        let header = ["package garage;", "import tools.Wrench;"];
        let body = [
            "public class Car {",
            "private Engine engine;",
            "private Engine spare;",
            "public Car(Engine e) {",
            "}",
            "public Car copy() {",
            "}",
        ];
        let raw = extract_raw_associations(header, body, "Car", &neighbours);
        assert_eq!(
            raw,
            vec![
                RawAssociation::Import("tools/Wrench".into()),
                RawAssociation::Neighbor("garage/Engine".into()),
                RawAssociation::Neighbor("garage/Car".into()),
            ]
        );
    }

    #[test]
    fn test_own_name_on_definition_and_constructor_lines_ignored() {
        let neighbours = vec!["garage/Car".to_string()];
        let body = ["public class Car {", "Car() {", "}", "private Car(int x) {", "}"];
        let raw = extract_raw_associations(std::iter::empty(), body, "Car", &neighbours);
        assert!(raw.is_empty());
    }

    #[test]
    fn test_package_line_is_not_a_mention() {
        let neighbours = vec!["garage/garage".to_string()];
        let raw = extract_raw_associations(std::iter::empty(), ["package garage;"], "Car", &neighbours);
        assert!(raw.is_empty());
    }
}
