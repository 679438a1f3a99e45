//! Fragment splitting: one logical definition per fragment.
//!
//! A file with several definition lines (siblings or nested types) is cut into
//! one fragment per definition. Each fragment repeats the file's header lines
//! (package and imports) and keeps only the body lines that belong to its own
//! definition; lines of a nested definition go to the nested fragment.

use serde::Serialize;

/// The normalized lines of one logical definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fragment {
    /// Package and import lines shared by every fragment of a file
    pub header: Vec<String>,
    /// Definition line and the lines of its body
    pub body: Vec<String>,
}

impl Fragment {
    pub fn new(header: Vec<String>, body: Vec<String>) -> Self {
        Self { header, body }
    }

    /// Header lines followed by body lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .chain(self.body.iter())
            .map(String::as_str)
    }
}

/// Net brace depth change of one line
pub fn brace_delta(line: &str) -> i32 {
    line.chars().fold(0, |depth, ch| match ch {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

struct OpenFragment {
    start: usize,
    body: Vec<String>,
    depth: i32,
    opened: bool,
}

impl OpenFragment {
    fn push(&mut self, line: &str) {
        let delta = brace_delta(line);
        if line.contains('{') {
            self.opened = true;
        }
        self.depth += delta;
        self.body.push(line.to_string());
    }

    fn is_closed(&self) -> bool {
        self.opened && self.depth <= 0
    }
}

/// Split normalized lines into fragments
///
/// `is_header` picks the lines copied into every fragment, `is_definition` the
/// lines that open a new one. A file with at most one definition line comes
/// back as a single fragment. Fragments are returned in the order their
/// definition lines appear.
pub fn split<H, D>(lines: &[String], is_header: H, is_definition: D) -> Vec<Fragment>
where
    H: Fn(&str) -> bool,
    D: Fn(&str) -> bool,
{
    let header: Vec<String> = lines
        .iter()
        .filter(|line| is_header(line.as_str()))
        .cloned()
        .collect();

    let definitions = lines
        .iter()
        .filter(|line| is_definition(line.as_str()))
        .count();
    if definitions <= 1 {
        let body = lines
            .iter()
            .filter(|line| !is_header(line.as_str()))
            .cloned()
            .collect();
        return vec![Fragment::new(header, body)];
    }

    let mut stack: Vec<OpenFragment> = Vec::new();
    let mut done: Vec<(usize, Vec<String>)> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if is_header(line.as_str()) {
            continue;
        }

        if is_definition(line.as_str()) {
            let mut open = OpenFragment {
                start: index,
                body: Vec::new(),
                depth: 0,
                opened: false,
            };
            open.push(line);
            stack.push(open);
        } else if let Some(top) = stack.last_mut() {
            top.push(line);
        } else {
            // Stray text before the first definition has no owner
            continue;
        }

        while stack.last().is_some_and(OpenFragment::is_closed) {
            if let Some(closed) = stack.pop() {
                done.push((closed.start, closed.body));
            }
        }
    }

    // Unbalanced input: whatever is still open ends at end of file
    done.extend(stack.into_iter().map(|open| (open.start, open.body)));
    done.sort_by_key(|(start, _)| *start);

    done.into_iter()
        .map(|(_, body)| Fragment::new(header.clone(), body))
        .collect()
}
