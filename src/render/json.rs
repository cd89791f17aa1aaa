//! JSON renderer: the whole tree as one nested document.

use super::{Page, Renderer};
use crate::model::{ChildKinds, DocNode, DocSet, NodeKind, Parameter, RawTag, WithoutParents};
use anyhow::Result;
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeView<'a> {
    top_level: NodeKind,
    root_nodes: Vec<NodeView<'a>>,
    without_parents: &'a WithoutParents,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeView<'a> {
    name: &'a str,
    qualified_name: &'a str,
    #[serde(rename = "type")]
    kind: Option<NodeKind>,
    owner: Option<&'a str>,
    short_description: &'a str,
    text: &'a str,
    parameters: &'a [Parameter],
    parameter_signature: &'a str,
    raw_tags: &'a [RawTag],
    #[serde(flatten)]
    child_kinds: ChildKinds,
    children: Vec<NodeView<'a>>,
}

impl<'a> NodeView<'a> {
    fn build(docs: &'a DocSet, node: &'a DocNode) -> Self {
        NodeView {
            name: &node.name,
            qualified_name: &node.qualified_name,
            kind: node.kind,
            owner: node.owner.as_deref(),
            short_description: &node.short_description,
            text: &node.text,
            parameters: &node.parameters,
            parameter_signature: &node.parameter_signature,
            raw_tags: &node.raw_tags,
            child_kinds: node.child_kinds,
            children: node
                .children
                .iter()
                .map(|&id| NodeView::build(docs, docs.node(id)))
                .collect(),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, docs: &DocSet) -> Result<Vec<Page>> {
        let view = TreeView {
            top_level: docs.top_level,
            root_nodes: docs.roots().map(|node| NodeView::build(docs, node)).collect(),
            without_parents: &docs.without_parents,
        };
        let mut contents = serde_json::to_string_pretty(&view)?;
        contents.push('\n');
        Ok(vec![Page {
            file_name: "blockdoc.json".to_string(),
            contents,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use serde_json::Value;

    fn render(source: &str) -> Value {
        let mut parser = Parser::new();
        parser.add_source(source);
        let docs = parser.parse().unwrap();
        let pages = JsonRenderer.render(&docs).unwrap();
        assert_eq!(pages.len(), 1);
        serde_json::from_str(&pages[0].contents).unwrap()
    }

    #[test]
    fn nested_tree() {
        let json = render(
            "/** @module Foo */ /** @function bar\n@memberof Foo\n@param n number count\nDoes it. */",
        );
        assert_eq!(json["topLevel"], "module");
        let foo = &json["rootNodes"][0];
        assert_eq!(foo["qualifiedName"], "Foo");
        assert_eq!(foo["hasFunctionChildren"], true);
        assert_eq!(foo["hasEntityChildren"], false);
        let bar = &foo["children"][0];
        assert_eq!(bar["type"], "function");
        assert_eq!(bar["shortDescription"], "Does it");
        assert_eq!(bar["parameterSignature"], "(n)");
        assert_eq!(bar["parameters"][0]["type"], "number");
        assert_eq!(bar["rawTags"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn orphans_listed() {
        let json = render("/** @namespace N */ /** @property p\n@memberof X */");
        assert_eq!(json["withoutParents"]["properties"][0], "X.p");
        assert_eq!(json["withoutParents"]["namespaces"].as_array().unwrap().len(), 0);
    }
}
