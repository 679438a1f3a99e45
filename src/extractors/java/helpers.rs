/// Helper functions for Java extraction
/// Handles line predicates, tokenizing, modifiers, visibility and type text
use crate::language::header_keywords;
use crate::model::Visibility;
use regex::Regex;
use std::sync::LazyLock;

/// A definition line: optional visibility, any modifiers, then the kind keyword and a name
pub(super) static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:public|private|protected)\s+)?(?:(?:static|final|abstract|strictfp|sealed|non-sealed)\s+)*(class|interface|enum)\s+([A-Za-z_$][\w$]*)",
    )
    .unwrap()
});

/// Annotations with their optional argument list, anywhere in a line
static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z_$][\w$.]*(?:\s*\([^)]*\))?").unwrap());

/// Enum constant entry: an identifier with an optional argument list
pub(super) static ENUM_CONSTANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*\s*(?:\(.*\))?$").unwrap());

/// Modifiers dropped from the token stream before names and types are read
const MODIFIER_WORDS: &[&str] = &[
    "static",
    "final",
    "abstract",
    "volatile",
    "transient",
    "synchronized",
    "native",
    "default",
    "strictfp",
];

const VISIBILITY_WORDS: &[&str] = &["public", "private", "protected"];

/// Tokens padded with spaces so they always stand alone
const PADDED_TOKENS: &[char] = &['(', ')', '<', '>', ',', '{', '}', '='];

pub(super) fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Whether `word` occurs in `line` as a whole identifier
pub(super) fn contains_word(line: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    line.match_indices(word).any(|(start, _)| {
        let before = line[..start].chars().next_back();
        let after = line[start + word.len()..].chars().next();
        !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
    })
}

/// Package and import lines are copied into every fragment of a file
pub(crate) fn is_header_line(line: &str) -> bool {
    header_keywords("java").iter().any(|keyword| {
        line.strip_prefix(keyword)
            .is_some_and(|rest| rest.starts_with(' '))
    })
}

pub(crate) fn is_definition_line(line: &str) -> bool {
    DEFINITION_RE.is_match(line)
}

pub(super) fn is_annotation_line(line: &str) -> bool {
    line.starts_with('@')
}

/// Remove every annotation from a line
pub(super) fn strip_annotations(line: &str) -> String {
    ANNOTATION_RE.replace_all(line, " ").trim().to_string()
}

/// Visibility keyword opening a line, if it has one
pub(super) fn leading_visibility(line: &str) -> Option<Visibility> {
    let first = line.split_whitespace().next()?;
    VISIBILITY_WORDS
        .contains(&first)
        .then(|| Visibility::from_keyword(first))
}

/// Declaration part of a line, before the first assignment
pub(super) fn declaration_head(line: &str) -> &str {
    line.split_once('=').map(|(head, _)| head).unwrap_or(line)
}

/// Split a line into tokens: padded punctuation stands alone, `...` sticks to
/// its type, modifiers and annotations are dropped
pub(super) fn tokenize(line: &str) -> Vec<String> {
    let line = strip_annotations(line);
    let mut padded = String::with_capacity(line.len() * 2);
    for ch in line.chars() {
        if ch == ';' {
            padded.push(' ');
        } else if PADDED_TOKENS.contains(&ch) {
            padded.push(' ');
            padded.push(ch);
            padded.push(' ');
        } else {
            padded.push(ch);
        }
    }

    let mut tokens: Vec<String> = Vec::new();
    for token in padded.split_whitespace() {
        if MODIFIER_WORDS.contains(&token) {
            continue;
        }
        if token == "..." {
            if let Some(last) = tokens.last_mut() {
                last.push_str("...");
                continue;
            }
        }
        tokens.push(token.to_string());
    }
    tokens
}

fn push_type_token(buffer: &mut String, token: &str) {
    if token == "," {
        buffer.push_str(", ");
        return;
    }
    let joins_words = buffer
        .chars()
        .next_back()
        .is_some_and(|c| is_identifier_char(c) || c == '?')
        && token
            .chars()
            .next()
            .is_some_and(|c| is_identifier_char(c) || c == '?');
    if joins_words {
        buffer.push(' ');
    }
    buffer.push_str(token);
}

/// Compile the type starting at `start`, skipping a balanced `<...>` argument
/// list and keeping array or varargs suffixes. Returns the type text and the
/// index of the first token after it.
pub(super) fn compile_type(tokens: &[String], start: usize) -> (String, usize) {
    let mut buffer = String::new();
    let Some(first) = tokens.get(start) else {
        return (buffer, start);
    };
    buffer.push_str(first);
    let mut index = start + 1;

    if tokens.get(index).is_some_and(|t| t == "<") {
        let mut depth = 0i32;
        while let Some(token) = tokens.get(index) {
            match token.as_str() {
                "<" => depth += 1,
                ">" => depth -= 1,
                _ => {}
            }
            push_type_token(&mut buffer, token);
            index += 1;
            if depth <= 0 {
                break;
            }
        }
    }

    while let Some(token) = tokens.get(index) {
        if token.starts_with('[') || token == "..." {
            buffer.push_str(token);
            index += 1;
        } else {
            break;
        }
    }

    (buffer, index)
}

/// Index just past a balanced `<...>` run starting at `start`, or `start` when
/// no run opens there
pub(super) fn skip_type_parameters(tokens: &[String], start: usize) -> usize {
    if !tokens.get(start).is_some_and(|t| t == "<") {
        return start;
    }
    let mut depth = 0i32;
    let mut index = start;
    while let Some(token) = tokens.get(index) {
        match token.as_str() {
            "<" => depth += 1,
            ">" => depth -= 1,
            _ => {}
        }
        index += 1;
        if depth <= 0 {
            break;
        }
    }
    index
}

/// Simple name of a possibly qualified, possibly generic type (`a.b.Foo<T>` -> `Foo`)
pub(super) fn simple_type_name(type_text: &str) -> &str {
    let base = type_text.split('<').next().unwrap_or(type_text);
    base.rsplit('.').next().unwrap_or(base).trim()
}

/// Split on commas that are not nested inside brackets
pub(super) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth -= 1,
            c if c == separator && depth == 0 => {
                parts.push(&text[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_definition_line_detection() {
        assert!(is_definition_line("public class Foo {"));
        assert!(is_definition_line("public abstract static class Foo<T> extends Bar {"));
        assert!(is_definition_line("interface Shape {"));
        assert!(is_definition_line("final enum Color {"));
        assert!(!is_definition_line("public int classCount;"));
        assert!(!is_definition_line("public Class<?> type;"));
        assert!(!is_definition_line("return new Foo();"));
    }

    #[test]
    fn test_contains_word_respects_boundaries() {
        assert!(contains_word("private Engine engine;", "Engine"));
        assert!(!contains_word("private EngineRoom room;", "Engine"));
        assert!(!contains_word("private MyEngine e;", "Engine"));
        assert!(contains_word("List<Engine> all;", "Engine"));
        assert!(!contains_word("int $Engine;", "Engine"));
    }

    #[test]
    fn test_tokenize_drops_modifiers_and_annotations() {
        assert_eq!(
            tokenize("public static final Map<String, Integer> COUNTS = new HashMap<>();"),
            strings(&[
                "public", "Map", "<", "String", ",", "Integer", ">", "COUNTS", "=", "new",
                "HashMap", "<", ">", "(", ")"
            ])
        );
        assert_eq!(
            tokenize("public void log(@NonNull String fmt, Object ... args) {"),
            strings(&["public", "void", "log", "(", "String", "fmt", ",", "Object...", "args", ")", "{"])
        );
    }

    #[test]
    fn test_compile_nested_generic_type() {
        let tokens = tokenize("Map<String, List<Integer>> index");
        let (type_text, next) = compile_type(&tokens, 0);
        assert_eq!(type_text, "Map<String, List<Integer>>");
        assert_eq!(tokens[next], "index");

        let tokens = tokenize("List<? extends Shape>[] shapes");
        let (type_text, next) = compile_type(&tokens, 0);
        assert_eq!(type_text, "List<? extends Shape>[]");
        assert_eq!(tokens[next], "shapes");
    }

    #[test]
    fn test_leading_visibility() {
        assert_eq!(leading_visibility("public int x;"), Some(Visibility::Public));
        assert_eq!(leading_visibility("protected void f() {"), Some(Visibility::Protected));
        assert_eq!(leading_visibility("int x;"), None);
        assert_eq!(leading_visibility("publicity x;"), None);
    }

    #[test]
    fn test_simple_type_name_and_split() {
        assert_eq!(simple_type_name("a.b.Foo<T>"), "Foo");
        assert_eq!(simple_type_name("Bar"), "Bar");
        assert_eq!(
            split_top_level("RED(1, 2), GREEN, BLUE(f(3))", ','),
            vec!["RED(1, 2)", " GREEN", " BLUE(f(3))"]
        );
    }
}
