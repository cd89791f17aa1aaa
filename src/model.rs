//! Parsed documentation nodes and the assembled tree.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder short description until one is given or inferred.
pub const SHORT_DESC_MISSING: &str = "(shortdesc missing)";

/// Index of a node in the [`DocSet`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// Deduced generic type of a documented item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Namespace,
    Module,
    Entity,
    Function,
    Property,
}

impl NodeKind {
    /// Order in which registries are indexed and linked during tree assembly.
    /// Functions come before entities; with last-wins indexing this order is
    /// observable when a function and an entity share a qualified name.
    pub const LINK_ORDER: [NodeKind; 5] = [
        NodeKind::Namespace,
        NodeKind::Module,
        NodeKind::Function,
        NodeKind::Entity,
        NodeKind::Property,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Namespace => "namespace",
            NodeKind::Module => "module",
            NodeKind::Entity => "entity",
            NodeKind::Function => "function",
            NodeKind::Property => "property",
        }
    }

    /// Plural heading used when listing nodes of this kind.
    pub fn plural(self) -> &'static str {
        match self {
            NodeKind::Namespace => "Namespaces",
            NodeKind::Module => "Modules",
            NodeKind::Entity => "Entities",
            NodeKind::Function => "Functions",
            NodeKind::Property => "Properties",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `@tag argument` pair as it appeared in the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTag {
    pub tag: String,
    pub argument: String,
}

/// A formatted `@param` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

/// Which kinds of children have been attached to a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildKinds {
    pub has_namespace_children: bool,
    pub has_module_children: bool,
    pub has_entity_children: bool,
    pub has_function_children: bool,
    pub has_property_children: bool,
}

impl ChildKinds {
    pub fn mark(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Namespace => self.has_namespace_children = true,
            NodeKind::Module => self.has_module_children = true,
            NodeKind::Entity => self.has_entity_children = true,
            NodeKind::Function => self.has_function_children = true,
            NodeKind::Property => self.has_property_children = true,
        }
    }

    pub fn has(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Namespace => self.has_namespace_children,
            NodeKind::Module => self.has_module_children,
            NodeKind::Entity => self.has_entity_children,
            NodeKind::Function => self.has_function_children,
            NodeKind::Property => self.has_property_children,
        }
    }
}

/// A single interpreted comment block.
#[derive(Debug, Clone)]
pub struct DocNode {
    /// Own identifier, without owner prefix.
    pub name: String,
    /// `owner.name`, or `name` when there is no owner.
    pub qualified_name: String,
    pub kind: Option<NodeKind>,
    /// Normalized `@memberof` path.
    pub owner: Option<String>,
    pub text: String,
    pub raw_tags: Vec<RawTag>,
    pub short_description: String,
    pub parameters: Vec<Parameter>,
    pub parameter_signature: String,
    pub children: Vec<NodeId>,
    pub child_kinds: ChildKinds,
}

impl Default for DocNode {
    fn default() -> Self {
        DocNode {
            name: String::new(),
            qualified_name: String::new(),
            kind: None,
            owner: None,
            text: String::new(),
            raw_tags: Vec::new(),
            short_description: SHORT_DESC_MISSING.to_string(),
            parameters: Vec::new(),
            parameter_signature: String::new(),
            children: Vec::new(),
            child_kinds: ChildKinds::default(),
        }
    }
}

impl DocNode {
    pub fn has_short_description(&self) -> bool {
        self.short_description != SHORT_DESC_MISSING
    }
}

/// Qualified name → node, one map per kind.
#[derive(Debug, Default)]
pub struct Registries {
    pub namespaces: BTreeMap<String, NodeId>,
    pub modules: BTreeMap<String, NodeId>,
    pub entities: BTreeMap<String, NodeId>,
    pub functions: BTreeMap<String, NodeId>,
    pub properties: BTreeMap<String, NodeId>,
}

impl Registries {
    pub fn get(&self, kind: NodeKind) -> &BTreeMap<String, NodeId> {
        match kind {
            NodeKind::Namespace => &self.namespaces,
            NodeKind::Module => &self.modules,
            NodeKind::Entity => &self.entities,
            NodeKind::Function => &self.functions,
            NodeKind::Property => &self.properties,
        }
    }

    pub fn get_mut(&mut self, kind: NodeKind) -> &mut BTreeMap<String, NodeId> {
        match kind {
            NodeKind::Namespace => &mut self.namespaces,
            NodeKind::Module => &mut self.modules,
            NodeKind::Entity => &mut self.entities,
            NodeKind::Function => &mut self.functions,
            NodeKind::Property => &mut self.properties,
        }
    }

    /// Every registered node, in link order then by qualified name.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, NodeId)> + '_ {
        NodeKind::LINK_ORDER
            .into_iter()
            .flat_map(move |kind| self.get(kind).values().map(move |&id| (kind, id)))
    }
}

/// Qualified names per kind that could not be linked to a parent.
#[derive(Debug, Default, Serialize)]
pub struct WithoutParents {
    pub namespaces: Vec<String>,
    pub modules: Vec<String>,
    pub entities: Vec<String>,
    pub functions: Vec<String>,
    pub properties: Vec<String>,
}

impl WithoutParents {
    pub fn get(&self, kind: NodeKind) -> &Vec<String> {
        match kind {
            NodeKind::Namespace => &self.namespaces,
            NodeKind::Module => &self.modules,
            NodeKind::Entity => &self.entities,
            NodeKind::Function => &self.functions,
            NodeKind::Property => &self.properties,
        }
    }

    pub fn get_mut(&mut self, kind: NodeKind) -> &mut Vec<String> {
        match kind {
            NodeKind::Namespace => &mut self.namespaces,
            NodeKind::Module => &mut self.modules,
            NodeKind::Entity => &mut self.entities,
            NodeKind::Function => &mut self.functions,
            NodeKind::Property => &mut self.properties,
        }
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        NodeKind::LINK_ORDER.iter().all(|&k| self.get(k).is_empty())
    }
}

/// Complete result of one parse run.
#[derive(Debug)]
pub struct DocSet {
    /// Arena of stored nodes. Each slot is held by exactly one registry entry;
    /// a same-kind redefinition replaces its slot in place.
    pub nodes: Vec<DocNode>,
    pub registries: Registries,
    /// Combined qualified name index across all registries.
    pub nodes_by_name: BTreeMap<String, NodeId>,
    pub root_nodes: Vec<NodeId>,
    pub without_parents: WithoutParents,
    /// Highest kind seen while parsing; decides which registry becomes the roots.
    pub top_level: NodeKind,
}

impl DocSet {
    pub fn node(&self, id: NodeId) -> &DocNode {
        &self.nodes[id.0]
    }

    /// Look up a node through the combined index.
    pub fn find(&self, qualified_name: &str) -> Option<&DocNode> {
        self.nodes_by_name
            .get(qualified_name)
            .map(|&id| self.node(id))
    }

    /// Look up a node in the registry of one kind.
    pub fn find_kind(&self, kind: NodeKind, qualified_name: &str) -> Option<&DocNode> {
        self.registries
            .get(kind)
            .get(qualified_name)
            .map(|&id| self.node(id))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &DocNode> + '_ {
        self.node(id).children.iter().map(move |&c| self.node(c))
    }

    pub fn roots(&self) -> impl Iterator<Item = &DocNode> + '_ {
        self.root_nodes.iter().map(move |&id| self.node(id))
    }
}
