//! Graphviz DOT emission
//!
//! Nodes are HTML-like record labels; clusters become nested
//! `subgraph cluster_*` blocks. Layout is left to Graphviz.

use std::fmt::Write;

use super::edges::{project_edges, Edge, EdgeKind, NodeIndex};
use crate::cluster::Cluster;
use crate::explore::Project;
use crate::model::{ClassComponent, Definition, DefinitionKeyword};

const TOP_FONT_SIZE: usize = 30;
const MIN_FONT_SIZE: usize = 8;

/// Render the whole project as a `digraph`
pub fn render(project: &Project) -> String {
    let nodes = NodeIndex::new(project);
    let mut output = String::new();

    output.push_str("digraph G {\n");
    output.push_str("\tnode[shape=record,style=filled,fillcolor=gray95];\n");
    output.push_str("\tedge[concentrate=true];\n");
    output.push_str("\tgraph[splines = ortho, ranksep = 1, ratio = fill, color=blue];\n");
    output.push_str("\trankdir = TB;\n\n");

    for (id, def) in nodes.iter() {
        let _ = writeln!(output, "\tn{} [label = <{{{}}}>];", id, node_label(def));
    }

    let root = project.cluster_root();
    for full_name in root.components() {
        if let Some(id) = nodes.id(full_name) {
            let _ = writeln!(output, "\tn{};", id);
        }
    }
    for child in root.children() {
        render_cluster(&mut output, child, &nodes, 1);
    }

    for edge in project_edges(project, &nodes) {
        let _ = writeln!(output, "\tn{} -> n{}[{}];", edge.from, edge.to, edge_attributes(&edge));
    }

    output.push_str("}\n");
    output
}

fn render_cluster(output: &mut String, cluster: &Cluster, nodes: &NodeIndex<'_>, depth: usize) {
    let address = cluster.address();
    let font_size = TOP_FONT_SIZE
        .saturating_sub(4 * (depth - 1))
        .max(MIN_FONT_SIZE);

    write_indent(output, depth);
    let _ = writeln!(output, "subgraph cluster_{} {{", address.replace('.', "_"));
    write_indent(output, depth + 1);
    let _ = writeln!(output, "label = \"{}\";", escape_dot_label(&address));
    write_indent(output, depth + 1);
    let _ = writeln!(output, "fontsize = {};", font_size);
    write_indent(output, depth + 1);
    let _ = writeln!(output, "penwidth = {};", depth);

    for full_name in cluster.components() {
        if let Some(id) = nodes.id(full_name) {
            write_indent(output, depth + 1);
            let _ = writeln!(output, "n{};", id);
        }
    }
    for child in cluster.children() {
        render_cluster(output, child, nodes, depth + 1);
    }

    write_indent(output, depth);
    output.push_str("}\n");
}

/// Record label body: title | variables | functions
fn node_label(def: &Definition) -> String {
    let name = escape_html(def.name());
    let title = match def.keyword() {
        DefinitionKeyword::Class if def.is_abstract() => format!("<i>{}</i>", name),
        DefinitionKeyword::Class => name,
        DefinitionKeyword::Interface => format!("&lt;&lt;interface&gt;&gt;<BR/>{}", name),
        DefinitionKeyword::Enum => format!("&lt;&lt;enumeration&gt;&gt;<BR/>{}", name),
    };
    let variables: Vec<String> = def.instance_variables().iter().map(member_label).collect();
    let functions: Vec<String> = def.functions().iter().map(member_label).collect();
    format!("{}|{}|{}", title, variables.join("<BR/>"), functions.join("<BR/>"))
}

/// One member line, e.g. `+area(scale : double) : double`
pub fn member_label(member: &ClassComponent) -> String {
    let mut text = format!("{}{}", member.visibility.glyph(), member.name);
    if member.is_instance_variable() {
        let _ = write!(text, " : {}", member.type_name);
    } else {
        let arguments: Vec<String> = member
            .arguments()
            .iter()
            .map(|arg| format!("{} : {}", arg.name, arg.type_name))
            .collect();
        let _ = write!(text, "({})", arguments.join(", "));
        if let Some(ret) = member.return_type() {
            let _ = write!(text, " : {}", ret);
        }
    }

    let mut label = escape_html(&text);
    if member.is_abstract() {
        label = format!("<u>{}</u>", label);
    }
    if member.is_static() {
        label = format!("<i>{}</i>", label);
    }
    if member.is_final() {
        label = format!("<b>{}</b>", label);
    }
    label
}

fn edge_attributes(edge: &Edge) -> &'static str {
    match edge.kind {
        EdgeKind::Inheritance => "arrowhead=onormal",
        EdgeKind::Realization(DefinitionKeyword::Class) => "arrowhead=onormal, style=dashed",
        EdgeKind::Realization(DefinitionKeyword::Interface) => "arrowhead=onormal, style=solid",
        EdgeKind::Realization(DefinitionKeyword::Enum) => "arrowhead=onormal, style=dotted",
        EdgeKind::Association { mutual: true } => "arrowhead=none",
        EdgeKind::Association { mutual: false } => "arrowhead=normal",
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_dot_label(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push('\t');
    }
}
