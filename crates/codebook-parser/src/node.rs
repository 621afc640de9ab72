//! Node block classification and parsing.

use codebook_core::node::{Node, NodeKind};

use crate::fields::bare_field;
use crate::record::{parse_output_edges, parse_parts};

/// Classifies a raw node block by its discriminating markers, first match
/// wins. A block with none of the markers is untyped rather than an error.
pub(crate) fn classify(data: &str) -> NodeKind {
    if data.contains("form_part = 1") {
        NodeKind::Form
    } else if data.contains("ntype = \"call\"") {
        NodeKind::Call
    } else if data.contains("ntype = \"rule\"") {
        NodeKind::Rule
    } else if data.contains("ntype = \"router\"") {
        NodeKind::Router
    } else if data.contains("ntype = \"process\"") {
        NodeKind::Process
    } else {
        NodeKind::NoType
    }
}

/// Parses one blank-line-separated node block.
pub(crate) fn parse_node(data: &str) -> Node {
    let kind = classify(data);
    let id = bare_field(data, "id");
    let is_silent = bare_field(data, "is_silent");
    let start = bare_field(data, "can_start").eq_ignore_ascii_case("1");
    let edges = parse_output_edges(data);
    let parts = parse_parts(data);
    Node::new(kind, id, start, is_silent, edges, parts)
}
