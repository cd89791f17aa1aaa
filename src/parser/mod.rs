//! Parser session: extracts `/** ... */` blocks and builds the documentation tree.
//!
//! One [`Parser`] owns the registries for a single run: sources are
//! concatenated with [`Parser::add_source`], then [`Parser::parse`] walks
//! every comment block, runs the post-processors and assembles the tree.

pub mod interpret;
pub mod postprocess;
pub mod protect;
pub mod tokenize;
pub mod tree;

use crate::error::ParseError;
use crate::model::{DocNode, DocSet, NodeId, NodeKind, Registries};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*\*(.+?)\*/").unwrap());

/// How to handle two nodes with the same qualified name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The node registered last wins; a warning is logged.
    #[default]
    Overwrite,
    /// Any duplicate aborts the run.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "reject" => Ok(DuplicatePolicy::Reject),
            _ => Err(format!(
                "unknown duplicate policy: {}. Use overwrite or reject",
                s
            )),
        }
    }
}

/// A single parse run.
#[derive(Debug)]
pub struct Parser {
    source: String,
    nodes: Vec<DocNode>,
    registries: Registries,
    top_level: NodeKind,
    duplicates: DuplicatePolicy,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            source: String::new(),
            nodes: Vec::new(),
            registries: Registries::default(),
            top_level: NodeKind::Function,
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Append source text. No separator is inserted between sources.
    pub fn add_source(&mut self, text: &str) {
        self.source.push_str(text);
    }

    /// Interpret one block interior and store the node if it is named and typed.
    pub fn parse_block(&mut self, block: &str) -> Result<Option<NodeId>, ParseError> {
        tracing::debug!("parsing block: {:?}", block);
        let tokens = tokenize::tokenize(&protect::protect(block));
        let node = interpret::interpret(tokens);
        self.store(node)
    }

    /// Parse every comment block of the accumulated source and build the tree.
    pub fn parse(mut self) -> Result<DocSet, ParseError> {
        let source = std::mem::take(&mut self.source);
        for caps in RE_BLOCK.captures_iter(&source) {
            let block = caps.get(1).ok_or(ParseError::MissingBlock)?;
            self.parse_block(block.as_str())?;
        }
        self.finish()
    }

    /// Run the post-processors and tree assembly over the blocks parsed so far.
    pub fn finish(mut self) -> Result<DocSet, ParseError> {
        for (_, id) in self.registries.iter() {
            postprocess::infer_short_description(&mut self.nodes[id.0]);
        }
        for &id in self.registries.functions.values() {
            postprocess::format_parameters(&mut self.nodes[id.0]);
        }

        let outline = tree::assemble(
            &mut self.nodes,
            &self.registries,
            self.top_level,
            self.duplicates,
        )?;

        Ok(DocSet {
            nodes: self.nodes,
            registries: self.registries,
            nodes_by_name: outline.nodes_by_name,
            root_nodes: outline.root_nodes,
            without_parents: outline.without_parents,
            top_level: self.top_level,
        })
    }

    fn store(&mut self, node: DocNode) -> Result<Option<NodeId>, ParseError> {
        if node.name.is_empty() {
            tracing::debug!("block has no name, skipping");
            return Ok(None);
        }
        let Some(kind) = node.kind else {
            tracing::warn!("`{}` has no type tag and is not documented", node.qualified_name);
            return Ok(None);
        };

        let name = node.qualified_name.clone();
        let id = match self.registries.get(kind).get(&name).copied() {
            Some(_) if self.duplicates == DuplicatePolicy::Reject => {
                return Err(ParseError::DuplicateName {
                    name,
                    existing: kind,
                    incoming: kind,
                });
            }
            Some(previous) => {
                tracing::warn!("{} `{}` defined twice, keeping the later one", kind, name);
                self.nodes[previous.0] = node;
                previous
            }
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(node);
                self.registries.get_mut(kind).insert(name.clone(), id);
                id
            }
        };
        tracing::debug!("stored {} `{}`", kind, name);
        self.top_level = tree::raise_top_level(self.top_level, kind);

        Ok(Some(id))
    }
}
