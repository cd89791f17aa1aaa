//! Template slots with `${name}` placeholders.
//!
//! A set always starts from the built-in templates; a templates directory
//! overrides them slot by slot. Per-kind slots fall back to `generic`.

use crate::model::NodeKind;
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").unwrap());

/// Stylesheet file name, both in a templates directory and in the output.
pub const STYLESHEET: &str = "blockdoc.css";

/// Slot name suffixes: the page itself, a list item, a list section.
pub const SUFFIXES: [&str; 3] = ["", "_item", "_section"];

const BUILTIN: &[(&str, &str)] = &[
    ("index", include_str!("../../templates/index.html")),
    ("footer", include_str!("../../templates/footer.html")),
    ("generic", include_str!("../../templates/generic.html")),
    ("generic_item", include_str!("../../templates/generic_item.html")),
    ("generic_section", include_str!("../../templates/generic_section.html")),
];

const BUILTIN_STYLESHEET: &str = include_str!("../../templates/blockdoc.css");

/// Placeholder name → substituted value.
pub type Vars = HashMap<&'static str, String>;

#[derive(Debug, Clone)]
pub struct TemplateSet {
    slots: HashMap<String, String>,
    stylesheet: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        TemplateSet {
            slots: BUILTIN
                .iter()
                .map(|(name, body)| (name.to_string(), body.to_string()))
                .collect(),
            stylesheet: BUILTIN_STYLESHEET.to_string(),
        }
    }
}

impl TemplateSet {
    /// Every slot name a templates directory may provide.
    pub fn slot_names() -> Vec<String> {
        let mut names = vec!["index".to_string(), "footer".to_string()];
        let bases = std::iter::once("generic").chain(NodeKind::LINK_ORDER.iter().map(|k| k.as_str()));
        for base in bases {
            for suffix in SUFFIXES {
                names.push(format!("{}{}", base, suffix));
            }
        }
        names
    }

    /// Built-in templates overridden by `<slot>.html` files found in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("templates directory not found: {}", dir.display());
        }
        let mut set = TemplateSet::default();
        for name in Self::slot_names() {
            let path = dir.join(format!("{}.html", name));
            if path.is_file() {
                tracing::debug!("reading template {}", path.display());
                let body = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read template: {}", path.display()))?;
                set.slots.insert(name, body);
            }
        }
        let css = dir.join(STYLESHEET);
        if css.is_file() {
            set.stylesheet = std::fs::read_to_string(&css)
                .with_context(|| format!("failed to read stylesheet: {}", css.display()))?;
        }
        Ok(set)
    }

    #[allow(dead_code)]
    pub fn insert(&mut self, name: &str, body: &str) {
        self.slots.insert(name.to_string(), body.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }

    /// Slot for a kind, falling back to the generic slot with the same suffix.
    pub fn for_kind(&self, kind: NodeKind, suffix: &str) -> Option<&str> {
        self.get(&format!("{}{}", kind.as_str(), suffix))
            .or_else(|| self.get(&format!("generic{}", suffix)))
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }
}

/// Substitute placeholders in one pass. Unknown placeholders are kept as written.
pub fn fill(template: &str, vars: &Vars) -> String {
    RE_PLACEHOLDER
        .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fill_substitutes_known_placeholders() {
        let mut vars = Vars::new();
        vars.insert("name", "Foo".to_string());
        assert_eq!(fill("<h1>${name}</h1>${other}", &vars), "<h1>Foo</h1>${other}");
    }

    #[test]
    fn fill_is_single_pass() {
        let mut vars = Vars::new();
        vars.insert("a", "${b}".to_string());
        vars.insert("b", "nope".to_string());
        assert_eq!(fill("${a}", &vars), "${b}");
    }

    #[test]
    fn kind_falls_back_to_generic() {
        let mut set = TemplateSet::default();
        set.insert("function_item", "F");
        assert_eq!(set.for_kind(NodeKind::Function, "_item"), Some("F"));
        assert_eq!(
            set.for_kind(NodeKind::Entity, "_item"),
            set.get("generic_item")
        );
    }

    #[test]
    fn slot_names_cover_every_kind() {
        let names = TemplateSet::slot_names();
        assert_eq!(names.len(), 2 + 6 * 3);
        assert!(names.contains(&"property_section".to_string()));
        assert!(names.contains(&"generic".to_string()));
    }

    #[test]
    fn load_overrides_slot_by_slot() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("module.html"), "M ${name}").unwrap();
        std::fs::write(dir.path().join("blockdoc.css"), "body {}").unwrap();
        let set = TemplateSet::load(dir.path()).unwrap();
        assert_eq!(set.get("module"), Some("M ${name}"));
        assert!(set.get("index").unwrap().contains("${roots}"));
        assert_eq!(set.stylesheet(), "body {}");
    }

    #[test]
    fn load_missing_dir_fails() {
        assert!(TemplateSet::load(Path::new("/no/such/templates")).is_err());
    }
}
