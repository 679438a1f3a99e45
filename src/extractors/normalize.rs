//! Text normalizer: raw source text to one statement per line.
//!
//! The passes run in a fixed order and each one assumes the previous ones ran:
//! literal bodies are blanked before comments are stripped (so `"http://"` is not
//! a comment), and comments are stripped before braces are counted or split on.

use regex::Regex;
use std::sync::LazyLock;

/// String literal on a single line, escapes already removed
static STRING_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"\n]*""#).unwrap());

/// Character literal; at most two chars between the quotes once escapes are gone
static CHAR_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^'\n]{0,2}'").unwrap());

/// Block comments (first close wins) or line comments, whichever starts first
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").unwrap());

/// An annotation opening a line, with its optional argument list
static LEADING_ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*@[A-Za-z_$][\w$.]*(?:[ \t]*\([^)]*\))?)").unwrap()
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Statement terminator inserted after annotations and split on later
const TERMINATOR: char = ';';

/// Normalize a whole file into trimmed, non-empty statement lines
pub fn normalize(source: &str) -> Vec<String> {
    let text = blank_literals(source);
    let text = strip_comments(&text);
    let text = terminate_annotations(&text);
    split_statements(&text)
}

/// Drop escape sequences, then empty every string and character literal
pub fn blank_literals(source: &str) -> String {
    let text = source
        .replace("\\\\", "")
        .replace("\\\"", "")
        .replace("\\'", "");
    let text = STRING_LITERAL_RE.replace_all(&text, "\"\"");
    CHAR_LITERAL_RE.replace_all(&text, "''").into_owned()
}

pub fn strip_comments(text: &str) -> String {
    COMMENT_RE.replace_all(text, "").into_owned()
}

/// Put a terminator after each annotation that opens a line, so it cannot fuse
/// with the declaration after it. Works on the last line too: no trailing
/// newline is needed.
pub fn terminate_annotations(text: &str) -> String {
    LEADING_ANNOTATION_RE
        .replace_all(text, format!("${{1}}{}", TERMINATOR))
        .into_owned()
}

/// Collapse the text to one line, then break after terminators and opening
/// braces and around closing braces
pub fn split_statements(text: &str) -> Vec<String> {
    let flat = WHITESPACE_RE.replace_all(text, " ");

    let mut broken = String::with_capacity(flat.len() + flat.len() / 8);
    for ch in flat.chars() {
        match ch {
            ';' | '{' => {
                broken.push(ch);
                broken.push('\n');
            }
            '}' => {
                broken.push('\n');
                broken.push(ch);
                broken.push('\n');
            }
            _ => broken.push(ch),
        }
    }

    broken
        .lines()
        .map(|line| WHITESPACE_RE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty() && line != ";")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_statement_per_line() {
        let source = "package a.b;\n\npublic class Foo {\n    private int x;\n    public int getX() { return x; }\n}\n";
        let lines = normalize(source);
        assert_eq!(
            lines,
            vec![
                "package a.b;",
                "public class Foo {",
                "private int x;",
                "public int getX() {",
                "return x;",
                "}",
                "}",
            ]
        );
    }

    #[test]
    fn test_literal_braces_never_split() {
        let source = r#"public class Foo {
    private String open = "{ ( }";
    private char brace = '{';
    private String quoted = "say \"}\" now";
}"#;
        let lines = normalize(source);
        assert_eq!(
            lines,
            vec![
                "public class Foo {",
                "private String open = \"\";",
                "private char brace = '';",
                "private String quoted = \"\";",
                "}",
            ]
        );
    }

    #[test]
    fn test_comments_removed_but_urls_in_strings_survive_blanking() {
        let source = "// header { \npublic class Foo { /* block\n } spanning */\n private String url = \"http://x\"; // trailing }\n}";
        let lines = normalize(source);
        assert_eq!(
            lines,
            vec!["public class Foo {", "private String url = \"\";", "}"]
        );
    }

    #[test]
    fn test_block_comment_containing_slashes() {
        let lines = normalize("/* see http://example.com */ public class Foo {}");
        assert_eq!(lines, vec!["public class Foo {", "}"]);
    }

    #[test]
    fn test_annotation_gets_its_own_line() {
        let source = "public class Foo {\n  @Override\n  public String toString() { return null; }\n  @SuppressWarnings(\"x\") private int y;\n}";
        let lines = normalize(source);
        assert_eq!(
            lines,
            vec![
                "public class Foo {",
                "@Override;",
                "public String toString() {",
                "return null;",
                "}",
                "@SuppressWarnings(\"\");",
                "private int y;",
                "}",
            ]
        );
    }

    #[test]
    fn test_annotation_at_end_of_file_is_terminated() {
        let lines = normalize("public class Foo {\n}\n@Deprecated");
        assert_eq!(lines.last().map(String::as_str), Some("@Deprecated;"));
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        assert!(normalize("").is_empty());
        assert!(normalize("  \n\t // only a comment\n").is_empty());
    }
}
