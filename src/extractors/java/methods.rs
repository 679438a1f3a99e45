/// Method and constructor extraction
use crate::model::{Argument, Definition, DefinitionKeyword, FunctionFlags, Visibility};

use super::helpers;
use super::JavaExtractor;

/// Visibility a member line declares, or the implicit one its container grants
///
/// Interface members are public without a keyword. An enum constructor has
/// no keyword either and is recognised by the enum's own name.
fn effective_visibility(decl: &str, definition: &Definition) -> Option<Visibility> {
    if let Some(visibility) = helpers::leading_visibility(decl) {
        return Some(visibility);
    }
    match definition.keyword() {
        DefinitionKeyword::Interface => Some(Visibility::Public),
        DefinitionKeyword::Enum if is_named_call(decl, definition.name()) => {
            Some(Visibility::Package)
        }
        _ => None,
    }
}

/// `Name(` at the start of a line
fn is_named_call(decl: &str, name: &str) -> bool {
    decl.strip_prefix(name)
        .is_some_and(|rest| rest.trim_start().starts_with('('))
}

/// A function line: visibility, a parameter list, no instantiation and no assignment
pub(super) fn is_function_candidate(decl: &str, definition: &Definition) -> bool {
    effective_visibility(decl, definition).is_some()
        && !helpers::contains_word(decl, "new")
        && decl.contains('(')
        && !decl.contains('=')
        && !helpers::is_definition_line(decl)
}

/// Parameters between the parenthesis at `start - 1` and its close
fn parse_arguments(tokens: &[String], start: usize) -> Vec<Argument> {
    let mut arguments = Vec::new();
    let mut index = start;
    loop {
        match tokens.get(index).map(String::as_str) {
            None | Some(")") => break,
            Some(",") => {
                index += 1;
                continue;
            }
            Some(_) => {}
        }

        let (type_text, next) = helpers::compile_type(tokens, index);
        let Some(name) = tokens.get(next) else {
            break;
        };
        if name == ")" || name == "," {
            // A type with no name is not a parameter list we understand
            break;
        }
        match name.find('[') {
            Some(at) => arguments.push(Argument::new(
                &name[..at],
                format!("{}{}", type_text, &name[at..]),
            )),
            None => arguments.push(Argument::new(name.as_str(), type_text)),
        }
        index = next + 1;
    }
    arguments
}

/// Extract a function or constructor line into `definition`
///
/// Returns whether the line was a function line, whether or not the filters
/// let it through.
pub(super) fn extract_function(
    extractor: &JavaExtractor,
    decl: &str,
    definition: &mut Definition,
) -> bool {
    if !is_function_candidate(decl, definition) {
        return false;
    }
    let Some(declared) = effective_visibility(decl, definition) else {
        return false;
    };

    let tokens = helpers::tokenize(decl);
    let type_index = if helpers::leading_visibility(decl).is_some() {
        1
    } else {
        0
    };
    let type_index = helpers::skip_type_parameters(&tokens, type_index);
    let Some(arg_start) = tokens.iter().position(|t| t == "(") else {
        return false;
    };
    let Some(name) = arg_start.checked_sub(1).and_then(|at| tokens.get(at)) else {
        return false;
    };
    let name = name.clone();
    let arguments = parse_arguments(&tokens, arg_start + 1);

    let is_constructor = type_index + 1 >= arg_start;
    let visibility = if is_constructor && definition.keyword() == DefinitionKeyword::Enum {
        Visibility::MINIMAL
    } else {
        declared
    };

    let options = extractor.options();
    if !options.include_functions || (!options.include_private && visibility == Visibility::Private)
    {
        return true;
    }

    if is_constructor {
        definition.add_constructor(visibility, name, arguments);
        return true;
    }

    let (return_type, _) = helpers::compile_type(&tokens, type_index);
    let has_body = decl.contains('{');
    let flags = FunctionFlags {
        is_abstract: helpers::contains_word(decl, "abstract")
            || (definition.keyword() == DefinitionKeyword::Interface
                && !has_body
                && !helpers::contains_word(decl, "static")),
        is_static: helpers::contains_word(decl, "static"),
        is_final: helpers::contains_word(decl, "final"),
    };
    definition.add_function(visibility, name, return_type, arguments, flags);
    true
}
