//! HTML renderer: an index page plus one page per documented node.

use super::template::{fill, TemplateSet, Vars, STYLESHEET};
use super::{page_name, Page, Renderer};
use crate::model::{DocNode, DocSet, NodeKind};
use crate::parser::tree::parent_key;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Order of child sections on a page.
const SECTION_ORDER: [NodeKind; 5] = [
    NodeKind::Namespace,
    NodeKind::Module,
    NodeKind::Entity,
    NodeKind::Property,
    NodeKind::Function,
];

pub struct HtmlRenderer {
    templates: TemplateSet,
}

impl HtmlRenderer {
    pub fn new(templates: TemplateSet) -> Self {
        HtmlRenderer { templates }
    }

    fn footer(&self) -> String {
        self.templates.get("footer").unwrap_or_default().to_string()
    }

    fn render_index(&self, docs: &DocSet) -> Result<Page> {
        let index = self.templates.get("index").context("no index template")?;

        let roots: Vec<&DocNode> = docs.roots().collect();
        let mut orphans = String::new();
        for kind in SECTION_ORDER {
            let names = docs.without_parents.get(kind);
            let nodes: Vec<&DocNode> = names
                .iter()
                .filter_map(|name| docs.find_kind(kind, name))
                .collect();
            orphans.push_str(&self.render_section(
                kind,
                &format!("{} without parent", kind.plural()),
                &nodes,
            ));
        }

        let mut vars = Vars::new();
        vars.insert("title", "Documentation".to_string());
        vars.insert(
            "roots",
            self.render_section(docs.top_level, docs.top_level.plural(), &roots),
        );
        vars.insert("orphans", orphans);
        vars.insert("footer", self.footer());

        Ok(Page {
            file_name: "index.html".to_string(),
            contents: fill(index, &vars),
        })
    }

    fn render_node(&self, docs: &DocSet, kind: NodeKind, node: &DocNode) -> Result<Page> {
        let template = self
            .templates
            .for_kind(kind, "")
            .with_context(|| format!("no template for {}", kind))?;

        let (parent_href, parent_name) = match parent_key(&node.qualified_name)
            .and_then(|key| docs.find(key))
        {
            Some(parent) => (
                page_name(&parent.qualified_name, "html"),
                html_escape(&parent.qualified_name),
            ),
            None => ("index.html".to_string(), "Index".to_string()),
        };

        let mut children = String::new();
        for section in SECTION_ORDER {
            if !node.child_kinds.has(section) {
                continue;
            }
            let of_kind: Vec<&DocNode> = node
                .children
                .iter()
                .map(|&id| docs.node(id))
                .filter(|child| child.kind == Some(section))
                .collect();
            children.push_str(&self.render_section(section, section.plural(), &of_kind));
        }

        let mut vars = Vars::new();
        vars.insert("name", html_escape(&node.name));
        vars.insert("qualified_name", html_escape(&node.qualified_name));
        vars.insert("kind", kind.to_string());
        vars.insert("owner", html_escape(node.owner.as_deref().unwrap_or_default()));
        vars.insert("parent_href", parent_href);
        vars.insert("parent_name", parent_name);
        vars.insert("short_description", node.short_description.clone());
        vars.insert("text", node.text.clone());
        vars.insert("signature", html_escape(&node.parameter_signature));
        vars.insert("parameters", render_parameters(node));
        vars.insert("children", children);
        vars.insert("footer", self.footer());

        Ok(Page {
            file_name: page_name(&node.qualified_name, "html"),
            contents: fill(template, &vars),
        })
    }

    /// A titled list of nodes; empty when there are no nodes.
    fn render_section(&self, kind: NodeKind, heading: &str, nodes: &[&DocNode]) -> String {
        if nodes.is_empty() {
            return String::new();
        }
        let item_template = self.templates.for_kind(kind, "_item").unwrap_or_default();
        let items: String = nodes
            .iter()
            .map(|node| {
                let mut vars = Vars::new();
                vars.insert("href", page_name(&node.qualified_name, "html"));
                vars.insert("name", html_escape(&node.name));
                vars.insert("qualified_name", html_escape(&node.qualified_name));
                vars.insert("kind", kind.to_string());
                vars.insert("short_description", node.short_description.clone());
                vars.insert("signature", html_escape(&node.parameter_signature));
                fill(item_template, &vars)
            })
            .collect();

        let section_template = self.templates.for_kind(kind, "_section").unwrap_or_default();
        let mut vars = Vars::new();
        vars.insert("kind", kind.to_string());
        vars.insert("heading", html_escape(heading));
        vars.insert("items", items);
        fill(section_template, &vars)
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, docs: &DocSet) -> Result<Vec<Page>> {
        let mut pages = vec![self.render_index(docs)?];
        let mut written: HashMap<String, String> = HashMap::new();
        for (kind, id) in docs.registries.iter() {
            let node = docs.node(id);
            let page = self.render_node(docs, kind, node)?;
            let previous = written.insert(page.file_name.clone(), node.qualified_name.clone());
            if let Some(earlier) = previous {
                tracing::warn!(
                    "`{}` and `{}` both map to {}, keeping `{}`",
                    earlier,
                    node.qualified_name,
                    page.file_name,
                    node.qualified_name
                );
            }
            pages.push(page);
        }
        pages.push(Page {
            file_name: STYLESHEET.to_string(),
            contents: self.templates.stylesheet().to_string(),
        });
        Ok(pages)
    }
}

fn render_parameters(node: &DocNode) -> String {
    if node.parameters.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str("<h2>Parameters</h2>\n<table class=\"params\">\n");
    out.push_str("  <tr><th>Name</th><th>Type</th><th>Description</th></tr>\n");
    for param in &node.parameters {
        out.push_str(&format!(
            "  <tr><td><code>{}</code></td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&param.name),
            html_escape(&param.ty),
            param.description
        ));
    }
    out.push_str("</table>\n");
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn render(source: &str) -> Vec<Page> {
        let mut parser = Parser::new();
        parser.add_source(source);
        let docs = parser.parse().unwrap();
        HtmlRenderer::new(TemplateSet::default()).render(&docs).unwrap()
    }

    fn page<'a>(pages: &'a [Page], name: &str) -> &'a str {
        &pages
            .iter()
            .find(|p| p.file_name == name)
            .unwrap_or_else(|| panic!("no page {name}"))
            .contents
    }

    const SOURCE: &str = "/** @module Foo\nThe foo module. */\n\
        /** @function bar\n@memberof Foo\n@param n number how many\nDoes a thing. */\n\
        /** @class Lost\n@memberof Nowhere\nAn orphan. */";

    #[test]
    fn one_page_per_node_plus_index_and_css() {
        let pages = render(SOURCE);
        let mut names: Vec<_> = pages.iter().map(|p| p.file_name.as_str()).collect();
        names.sort();
        assert_eq!(
            names,
            ["Foo.bar.html", "Foo.html", "Nowhere.Lost.html", "blockdoc.css", "index.html"]
        );
    }

    #[test]
    fn index_lists_roots_and_orphans() {
        let pages = render(SOURCE);
        let index = page(&pages, "index.html");
        assert!(index.contains("<h2>Modules</h2>"));
        assert!(index.contains("<a href=\"Foo.html\">Foo</a>"));
        assert!(index.contains("<h2>Entities without parent</h2>"));
        assert!(index.contains("<a href=\"Nowhere.Lost.html\">Lost</a>"));
        assert!(!index.contains("${"));
    }

    #[test]
    fn node_page_shows_children_and_parameters() {
        let pages = render(SOURCE);
        let foo = page(&pages, "Foo.html");
        assert!(foo.contains("<h2>Functions</h2>"));
        assert!(foo.contains("<a href=\"Foo.bar.html\">bar</a>(n)"));

        let bar = page(&pages, "Foo.bar.html");
        assert!(bar.contains("<a href=\"Foo.html\">Foo</a>"));
        assert!(bar.contains("<td><code>n</code></td><td>number</td><td>how many</td>"));
        assert!(bar.contains("Does a thing"));
    }

    #[test]
    fn node_named_index_keeps_index_page() {
        let pages = render("/** @module index\nThe index module. */ /** @module Other */");
        let names: Vec<_> = pages.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names.iter().filter(|n| **n == "index.html").count(), 1);
        assert!(names.contains(&"_index.html"));
        assert!(page(&pages, "index.html").contains("<a href=\"_index.html\">index</a>"));
        assert!(page(&pages, "_index.html").contains("The index module"));
    }

    #[test]
    fn kind_template_overrides_generic() {
        let mut parser = Parser::new();
        parser.add_source("/** @function f */");
        let docs = parser.parse().unwrap();
        let mut templates = TemplateSet::default();
        templates.insert("function", "F:${qualified_name}${signature}");
        let pages = HtmlRenderer::new(templates).render(&docs).unwrap();
        assert_eq!(page(&pages, "f.html"), "F:f()");
    }

    #[test]
    fn names_escaped_text_verbatim() {
        let pages = render("/** @function a<b>\nUses <code>x < y</code>. */");
        let node = page(&pages, "a_b_.html");
        assert!(node.contains("a&lt;b&gt;"));
        assert!(node.contains("<code>x &lt; y</code>"));
    }
}
