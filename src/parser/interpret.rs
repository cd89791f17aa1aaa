//! Block interpreter: maps tags onto a [`DocNode`].

use super::protect;
use super::tokenize::Tokens;
use crate::model::{DocNode, NodeKind};
use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_DOTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.+").unwrap());

/// What a recognised tag does to the node being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEffect {
    /// Sets the kind and takes the argument as the name.
    SetKind(NodeKind),
    SetName,
    SetOwner,
    SetShortDesc,
    /// Only kept in the raw tag list (`@param` and unknown tags).
    Accumulate,
}

/// Tag name → effect.
pub fn effect_for(tag: &str) -> TagEffect {
    match tag {
        "function" | "method" => TagEffect::SetKind(NodeKind::Function),
        "class" | "entity" | "hash" | "object" => TagEffect::SetKind(NodeKind::Entity),
        "module" => TagEffect::SetKind(NodeKind::Module),
        "namespace" => TagEffect::SetKind(NodeKind::Namespace),
        "property" | "member" => TagEffect::SetKind(NodeKind::Property),
        "name" => TagEffect::SetName,
        "shortdesc" => TagEffect::SetShortDesc,
        "memberof" => TagEffect::SetOwner,
        _ => TagEffect::Accumulate,
    }
}

/// Build a node from a tokenized block.
///
/// The returned node may be unnamed or untyped; storing it is the caller's call.
pub fn interpret(tokens: Tokens) -> DocNode {
    let mut node = DocNode::default();

    for raw in &tokens.tags {
        match effect_for(&raw.tag) {
            TagEffect::SetKind(kind) => {
                node.kind = Some(kind);
                node.name = raw.argument.clone();
            }
            TagEffect::SetName => node.name = raw.argument.clone(),
            TagEffect::SetOwner => node.owner = normalize_owner(&raw.argument),
            TagEffect::SetShortDesc => node.short_description = raw.argument.clone(),
            TagEffect::Accumulate => {}
        }
    }
    node.raw_tags = tokens.tags;
    node.name = node.name.trim_matches('.').to_string();

    let folded = RE_WHITESPACE.replace_all(&tokens.text, " ");
    node.text = protect::restore(folded.trim());

    node.qualified_name = match &node.owner {
        Some(owner) => format!("{}.{}", owner, node.name),
        None => node.name.clone(),
    };

    node
}

/// Normalize a `@memberof` path into a dotted hierarchy.
///
/// `~` and `#` member separators and whitespace become dots, dot runs
/// collapse, and leading or trailing dots are dropped.
pub fn normalize_owner(raw: &str) -> Option<String> {
    let dotted = raw.trim().replace(['~', '#'], ".");
    let dotted = RE_WHITESPACE.replace_all(&dotted, ".");
    let dotted = RE_DOTS.replace_all(&dotted, ".");
    let owner = dotted.trim_matches('.');
    if owner.is_empty() {
        None
    } else {
        Some(owner.to_string())
    }
}
