/// Field and enum constant extraction
use crate::model::{Definition, DefinitionKeyword, Visibility};
use tracing::debug;

use super::helpers;
use super::JavaExtractor;

/// A field line: explicit visibility, no call parenthesis, no body brace and
/// no `abstract`, all checked before any initializer
pub(super) fn is_instance_variable_candidate(decl: &str) -> bool {
    let head = helpers::declaration_head(decl);
    helpers::leading_visibility(head).is_some()
        && !head.contains('{')
        && !head.contains('(')
        && !helpers::contains_word(head, "abstract")
        && !helpers::is_definition_line(head)
}

/// Index of the `,` ending an initializer that starts at `start`, or the end
/// of the token list
fn skip_initializer(tokens: &[String], start: usize) -> usize {
    let mut depth = 0i32;
    let mut index = start;
    while let Some(token) = tokens.get(index) {
        match token.as_str() {
            "(" | "{" | "<" => depth += 1,
            ")" | "}" | ">" => depth -= 1,
            "," if depth <= 0 => return index,
            _ => {}
        }
        index += 1;
    }
    index
}

/// Move C-style array brackets from a declarator name to its type
fn split_array_suffix(name: &str, type_text: &str) -> (String, String) {
    match name.find('[') {
        Some(at) => (
            name[..at].to_string(),
            format!("{}{}", type_text, &name[at..]),
        ),
        None => (name.to_string(), type_text.to_string()),
    }
}

fn add_variable(
    definition: &mut Definition,
    visibility: Visibility,
    name: &str,
    type_name: &str,
    is_static: bool,
    is_final: bool,
) {
    if let Err(err) = definition.add_instance_variable(visibility, name, type_name, is_static, is_final)
    {
        debug!("Dropping field {} of {}: {}", name, definition.full_name(), err);
    }
}

/// Extract every declarator of a field line into `definition`, honouring the
/// member filters
pub(super) fn extract_instance_variables(
    extractor: &JavaExtractor,
    decl: &str,
    definition: &mut Definition,
) {
    let options = extractor.options();
    let head = helpers::declaration_head(decl);
    let Some(visibility) = helpers::leading_visibility(head) else {
        return;
    };
    let is_static = helpers::contains_word(head, "static");
    let is_final = helpers::contains_word(head, "final");

    if !options.include_instance_variables
        || (!options.include_private && visibility == Visibility::Private)
        || (!options.include_constants && is_static && is_final)
    {
        return;
    }

    let tokens = helpers::tokenize(decl);
    let (type_text, mut index) = helpers::compile_type(&tokens, 1);
    if type_text.is_empty() {
        return;
    }

    while let Some(token) = tokens.get(index) {
        match token.as_str() {
            "," => index += 1,
            "=" => index = skip_initializer(&tokens, index + 1),
            name => {
                let (name, type_name) = split_array_suffix(name, &type_text);
                add_variable(definition, visibility, &name, &type_name, is_static, is_final);
                index += 1;
            }
        }
    }
}

/// Where an enum constant list stands after one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ConstantList {
    /// The line is not part of a constant list
    NotConstants,
    /// Constants read; more may follow on later lines
    Continues,
    /// Constants read up to the closing `;`
    Ends,
}

/// Read an enum constant line (`RED, GREEN(0x00ff00), BLUE;`)
///
/// Each constant becomes a public static final field typed as the enum
/// itself. A constant with a class body (`A {`) leaves the list open: its body
/// sits one brace level deeper and the next constants follow after it.
pub(super) fn extract_enum_constants(
    extractor: &JavaExtractor,
    line: &str,
    definition: &mut Definition,
) -> ConstantList {
    if definition.keyword() != DefinitionKeyword::Enum {
        return ConstantList::NotConstants;
    }
    let text = line.trim();
    let closed = text.ends_with(';');
    let text = text.trim_end_matches(';').trim();
    let text = text.strip_suffix('{').map(str::trim_end).unwrap_or(text);
    if text.is_empty() || text == "}" || helpers::leading_visibility(text).is_some() {
        return ConstantList::NotConstants;
    }

    let entries: Vec<&str> = helpers::split_top_level(text, ',')
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();
    let names: Vec<&str> = entries
        .iter()
        .map(|entry| entry.split('(').next().unwrap_or(entry).trim())
        .collect();
    if entries.is_empty()
        || !entries
            .iter()
            .all(|entry| helpers::ENUM_CONSTANT_RE.is_match(entry))
        || names
            .iter()
            .any(|name| *name == definition.name() || *name == "static")
    {
        return ConstantList::NotConstants;
    }

    let options = extractor.options();
    if options.include_instance_variables && options.include_constants {
        let enum_name = definition.name().to_string();
        for name in names {
            add_variable(definition, Visibility::Public, name, &enum_name, true, true);
        }
    }

    if closed {
        ConstantList::Ends
    } else {
        ConstantList::Continues
    }
}
