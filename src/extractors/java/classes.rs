/// Definition-level extraction: kind, name, abstractness, parent and contracts
use crate::model::{Definition, DefinitionKeyword};

use super::helpers;

/// Kind and name from the first definition line of a fragment
///
/// Generic parameters are not part of the name: `class Box<T>` is `Box`.
pub(super) fn find_definition<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> Option<(DefinitionKeyword, String, &'a str)> {
    lines.into_iter().find_map(|line| {
        let captures = helpers::DEFINITION_RE.captures(line)?;
        let keyword = DefinitionKeyword::from_keyword(captures.get(1)?.as_str())?;
        let name = captures.get(2)?.as_str().to_string();
        Some((keyword, name, line))
    })
}

/// Skeleton definition (kind, name, abstract flag) of a fragment, or `None`
/// when the fragment has no definition line
pub(super) fn build_skeleton<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    context: &str,
) -> Option<Definition> {
    let (keyword, name, line) = find_definition(lines)?;
    let mut definition = Definition::new(keyword, name, context);
    if keyword == DefinitionKeyword::Class && helpers::contains_word(line, "abstract") {
        // Only classes accept the flag; the match above guarantees it
        definition.set_abstract(true).ok()?;
    }
    Some(definition)
}

/// Keywords that end a name list on a definition line
const CLAUSE_KEYWORDS: &[&str] = &["extends", "implements", "permits", "{"];

/// Whether a token can be read as a type name (`Foo`, `a.b.Foo`)
fn is_type_name(token: &str) -> bool {
    token.starts_with(|c: char| c.is_alphabetic() || c == '_' || c == '$')
        && token
            .split('.')
            .all(|segment| !segment.is_empty() && segment.chars().all(helpers::is_identifier_char))
}

/// Simple names listed after `keyword` on a definition line
///
/// The keyword only counts outside angle brackets, so bounds in the type
/// parameter list (`Box<T extends Comparable<T>>`) are never read as clauses.
/// Generic arguments are skipped and qualified names reduced to their last
/// segment. The list ends at the body brace or the next clause keyword.
fn names_after(line: &str, keyword: &str) -> Vec<String> {
    let tokens = helpers::tokenize(line);
    let mut depth = 0i32;
    let position = tokens.iter().position(|token| {
        match token.as_str() {
            "<" => depth += 1,
            ">" => depth -= 1,
            _ => {}
        }
        depth == 0 && token == keyword
    });
    let Some(position) = position else {
        return Vec::new();
    };

    let mut names = Vec::new();
    let mut index = position + 1;
    while let Some(token) = tokens.get(index) {
        if CLAUSE_KEYWORDS.contains(&token.as_str()) {
            break;
        }
        if token == "<" {
            index = helpers::skip_type_parameters(&tokens, index);
            continue;
        }
        if is_type_name(token) {
            names.push(helpers::simple_type_name(token).to_string());
        }
        index += 1;
    }
    names
}

/// Raw parent name of a class (`extends`); interfaces and enums have none
pub(super) fn extract_inheritance(keyword: DefinitionKeyword, line: &str) -> Option<String> {
    if keyword != DefinitionKeyword::Class {
        return None;
    }
    names_after(line, "extends").into_iter().next()
}

/// Raw names of realized contracts: `implements` for classes and enums,
/// `extends` for interfaces
pub(super) fn extract_realizations(keyword: DefinitionKeyword, line: &str) -> Vec<String> {
    match keyword {
        DefinitionKeyword::Interface => names_after(line, "extends"),
        DefinitionKeyword::Class | DefinitionKeyword::Enum => names_after(line, "implements"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_definition_line_wins() {
        let lines = ["package a;", "public class Box<T> {", "class Other {"];
        let (keyword, name, line) = find_definition(lines).unwrap();
        assert_eq!(keyword, DefinitionKeyword::Class);
        assert_eq!(name, "Box");
        assert_eq!(line, "public class Box<T> {");
    }

    #[test]
    fn test_no_definition_line() {
        assert!(find_definition(["package a;", "import b.C;"]).is_none());
        assert!(build_skeleton(["int x;"], "a").is_none());
    }

    #[test]
    fn test_abstract_skeleton() {
        let def = build_skeleton(["public abstract class Shape {"], "geo").unwrap();
        assert!(def.is_abstract());
        assert_eq!(def.full_name(), "geo/Shape");

        let def = build_skeleton(["public enum Color {"], "geo").unwrap();
        assert_eq!(def.keyword(), DefinitionKeyword::Enum);
        assert!(!def.is_abstract());
    }

    #[test]
    fn test_inheritance_first_match_simple_name() {
        let line = "public class Car extends a.b.Vehicle<Wheel> implements Drivable {";
        assert_eq!(
            extract_inheritance(DefinitionKeyword::Class, line),
            Some("Vehicle".to_string())
        );
        assert_eq!(
            extract_realizations(DefinitionKeyword::Class, line),
            vec!["Drivable".to_string()]
        );
    }

    #[test]
    fn test_realizations_skip_generics() {
        let line = "class Repo implements Store<Map<K, V>>, java.io.Serializable, Comparable<Repo> {";
        assert_eq!(
            extract_realizations(DefinitionKeyword::Class, line),
            vec!["Store", "Serializable", "Comparable"]
        );
    }

    #[test]
    fn test_interface_extends_are_realizations() {
        let line = "public interface Shape extends Drawable, Sized {";
        assert_eq!(extract_inheritance(DefinitionKeyword::Interface, line), None);
        assert_eq!(
            extract_realizations(DefinitionKeyword::Interface, line),
            vec!["Drawable", "Sized"]
        );
    }

    #[test]
    fn test_type_parameter_bounds_are_not_clauses() {
        let line = "public class Box<T extends Comparable<T>> extends Container implements Sized {";
        assert_eq!(
            extract_inheritance(DefinitionKeyword::Class, line),
            Some("Container".to_string())
        );
        assert_eq!(
            extract_realizations(DefinitionKeyword::Class, line),
            vec!["Sized"]
        );

        let line = "class Pair<K extends Key, V> implements Entry<K, V> {";
        assert_eq!(extract_inheritance(DefinitionKeyword::Class, line), None);
        assert_eq!(
            extract_realizations(DefinitionKeyword::Class, line),
            vec!["Entry"]
        );
    }

    #[test]
    fn test_interface_bound_and_contract() {
        let line = "public interface Repo<T extends Entity> extends Base {";
        assert_eq!(
            extract_realizations(DefinitionKeyword::Interface, line),
            vec!["Base"]
        );

        let line = "interface Sorted<T extends Comparable<? super T>> {";
        assert!(extract_realizations(DefinitionKeyword::Interface, line).is_empty());
    }

    #[test]
    fn test_enum_implements() {
        let line = "enum Op implements IntBinaryOperator {";
        assert_eq!(
            extract_realizations(DefinitionKeyword::Enum, line),
            vec!["IntBinaryOperator"]
        );
    }
}
