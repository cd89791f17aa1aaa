//! Post-processors run once every block has been interpreted.

use crate::model::{DocNode, Parameter};

/// Fill in a missing short description from the text before its first period.
pub fn infer_short_description(node: &mut DocNode) {
    if node.has_short_description() || node.text.is_empty() {
        return;
    }
    let first = node.text.split('.').next().unwrap_or_default();
    node.short_description = first.to_string();
}

/// Rebuild `parameters` and `parameter_signature` from the `@param` tags.
///
/// Each argument reads `name type description...`; missing name or type
/// become `?`. Recomputed from scratch, so repeated calls are stable.
pub fn format_parameters(node: &mut DocNode) {
    node.parameters = node
        .raw_tags
        .iter()
        .filter(|raw| raw.tag == "param")
        .map(|raw| parse_param(&raw.argument))
        .collect();

    let names: Vec<&str> = node.parameters.iter().map(|p| p.name.as_str()).collect();
    node.parameter_signature = format!("({})", names.join(", "));
}

fn parse_param(argument: &str) -> Parameter {
    let mut parts = argument.split_whitespace();
    let name = parts.next().unwrap_or("?").to_string();
    let ty = parts.next().unwrap_or("?").to_string();
    let description = parts.collect::<Vec<_>>().join(" ");
    Parameter {
        name,
        ty,
        description,
    }
}
