//! Tree assembly: links registered nodes into a forest by qualified name.

use super::DuplicatePolicy;
use crate::error::ParseError;
use crate::model::{DocNode, NodeId, NodeKind, Registries, WithoutParents};
use std::collections::BTreeMap;

/// Result of linking the registries.
#[derive(Debug, Default)]
pub struct Outline {
    pub nodes_by_name: BTreeMap<String, NodeId>,
    pub root_nodes: Vec<NodeId>,
    pub without_parents: WithoutParents,
}

/// Raise the top-level indicator after a node of `seen` kind was stored.
///
/// Namespace beats module beats entity beats function; properties never count.
pub fn raise_top_level(current: NodeKind, seen: NodeKind) -> NodeKind {
    match (current, seen) {
        (_, NodeKind::Namespace) => NodeKind::Namespace,
        (NodeKind::Namespace, NodeKind::Module) => NodeKind::Namespace,
        (_, NodeKind::Module) => NodeKind::Module,
        (NodeKind::Function, NodeKind::Entity) => NodeKind::Entity,
        (current, _) => current,
    }
}

/// Candidate parent key: the qualified name minus its last dot segment.
pub fn parent_key(qualified_name: &str) -> Option<&str> {
    qualified_name
        .rsplit_once('.')
        .map(|(parent, _)| parent)
        .filter(|parent| !parent.is_empty() && *parent != qualified_name)
}

/// Build the combined index, link children to parents and pick the roots.
pub fn assemble(
    nodes: &mut [DocNode],
    registries: &Registries,
    top_level: NodeKind,
    duplicates: DuplicatePolicy,
) -> Result<Outline, ParseError> {
    let mut outline = Outline::default();

    for (kind, id) in registries.iter() {
        let name = nodes[id.0].qualified_name.clone();
        if let Some(previous) = outline.nodes_by_name.insert(name.clone(), id) {
            let existing = nodes[previous.0].kind.unwrap_or(kind);
            if duplicates == DuplicatePolicy::Reject {
                return Err(ParseError::DuplicateName {
                    name,
                    existing,
                    incoming: kind,
                });
            }
            tracing::warn!("{} `{}` shadows {} of the same name", kind, name, existing);
        }
    }

    for kind in NodeKind::LINK_ORDER {
        for (name, &id) in registries.get(kind) {
            let parent = parent_key(name)
                .and_then(|key| outline.nodes_by_name.get(key))
                .copied()
                .filter(|&parent| parent != id);
            match parent {
                Some(parent) => {
                    tracing::debug!("{} `{}` attached to `{}`", kind, name, nodes[parent.0].qualified_name);
                    let parent = &mut nodes[parent.0];
                    parent.children.push(id);
                    parent.child_kinds.mark(kind);
                }
                None => {
                    tracing::debug!("{} `{}` has no parent", kind, name);
                    outline.without_parents.get_mut(kind).push(name.clone());
                }
            }
        }
    }

    outline.root_nodes = registries.get(top_level).values().copied().collect();
    outline.without_parents.get_mut(top_level).clear();

    Ok(outline)
}
