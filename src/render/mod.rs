//! Renderer module: trait-based format dispatch.

pub mod html;
pub mod json;
pub mod template;

use crate::model::DocSet;
use anyhow::{anyhow, Result};
use template::TemplateSet;

/// One output file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub file_name: String,
    pub contents: String,
}

/// Trait for rendering a parsed [`DocSet`] into output files.
pub trait Renderer {
    fn render(&self, docs: &DocSet) -> Result<Vec<Page>>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, templates: TemplateSet) -> Result<Box<dyn Renderer>> {
    match format {
        "html" => Ok(Box::new(html::HtmlRenderer::new(templates))),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use html or json", format)),
    }
}

/// Output file name for a node: its qualified name with unsafe characters replaced.
///
/// A stem of `index` gets a leading `_` so no node page can replace the index.
pub fn page_name(qualified_name: &str, extension: &str) -> String {
    let mut stem: String = qualified_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '$') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.eq_ignore_ascii_case("index") {
        stem.insert(0, '_');
    }
    format!("{}.{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_name_keeps_dots() {
        assert_eq!(page_name("Foo.bar", "html"), "Foo.bar.html");
    }

    #[test]
    fn page_name_replaces_path_separators() {
        assert_eq!(page_name("../etc/passwd", "html"), ".._etc_passwd.html");
        assert_eq!(page_name("a b<c>", "html"), "a_b_c_.html");
    }

    #[test]
    fn page_name_never_index() {
        assert_eq!(page_name("index", "html"), "_index.html");
        assert_eq!(page_name("Index", "html"), "_Index.html");
        assert_eq!(page_name("index.main", "html"), "index.main.html");
    }

    #[test]
    fn unknown_format_rejected() {
        let err = create_renderer("xml", TemplateSet::default()).err().unwrap();
        assert!(err.to_string().contains("unknown format"));
    }
}
