//! Record parsers for the repeated structures inside a node block.

use codebook_core::node::OutputEdge;
use codebook_core::part::{ConceptPart, RuleFragment, ValidationRule};

use crate::blocks::{comma_brace_split, element_block, sibling_blocks};
use crate::fields::{bare_field, quoted_field};

/// Parses the `outputs` list of a node block.
///
/// Children are separated by splitting on `}`; that is safe here because
/// output entries never nest further. Entries with no label, target, or
/// stop marker are dropped.
pub(crate) fn parse_output_edges(data: &str) -> Vec<OutputEdge> {
    let block = element_block(data, "outputs ");
    let mut edges = Vec::new();
    for chunk in block.split('}') {
        if chunk.trim().is_empty() {
            continue;
        }
        let edge = OutputEdge {
            label: quoted_field(chunk, "id"),
            target: bare_field(chunk, "target"),
            can_stop: bare_field(chunk, "can_stop"),
        };
        if !edge.is_blank() {
            edges.push(edge);
        }
    }
    edges
}

/// Parses the `parts` list of a node block into concept parts.
pub(crate) fn parse_parts(data: &str) -> Vec<ConceptPart> {
    let block = element_block(data, "parts ");
    sibling_blocks(&block)
        .iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| parse_part(chunk))
        .collect()
}

fn parse_part(data: &str) -> ConceptPart {
    ConceptPart {
        log: quoted_field(data, "log"),
        name: quoted_field(data, "_name"),
        caption: quoted_field(data, "caption"),
        path: quoted_field(data, "path"),
        data_type: quoted_field(data, "data_type"),
        rule: quoted_field(data, "rule"),
        options: parse_options(data),
        rule_fragments: parse_rule_fragments(data),
        validation_rules: parse_validation_rules(data),
        eligible: false,
    }
}

fn parse_options(data: &str) -> Vec<String> {
    let block = element_block(data, "choices ");
    block
        .split('}')
        .map(|chunk| quoted_field(chunk, "value"))
        .filter(|value| !value.is_empty())
        .collect()
}

/// Rulepart children can nest braces (`leftOrder = {}`), so they are split
/// at `, {` boundaries instead of on `}`.
fn parse_rule_fragments(data: &str) -> Vec<RuleFragment> {
    let block = element_block(data, "ruleparts ");
    comma_brace_split(&block)
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| RuleFragment {
            element_operator: quoted_field(chunk, "elementOperator"),
            operator: quoted_field(chunk, "operator"),
            test: quoted_field(chunk, "test"),
            reference: quoted_field(chunk, "reference"),
        })
        .filter(|fragment| !fragment.reference.is_empty())
        .collect()
}

fn parse_validation_rules(data: &str) -> Vec<ValidationRule> {
    let block = element_block(data, "validation_rules ");
    comma_brace_split(&block)
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| ValidationRule {
            rule_type: quoted_field(chunk, "type"),
            message: quoted_field(chunk, "message"),
        })
        .filter(|rule| !rule.rule_type.is_empty() || !rule.message.is_empty())
        .collect()
}
