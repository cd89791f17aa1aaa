//! Run configuration: an optional JSON config file layered under CLI flags.

use crate::error::ConfigError;
use crate::parser::DuplicatePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One configuration layer. Every field is optional so layers can be merged.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Layer {
    pub files: Vec<String>,
    pub outputdir: Option<PathBuf>,
    pub templatesdir: Option<PathBuf>,
    pub debug: Option<bool>,
    pub format: Option<String>,
    pub duplicates: Option<String>,
}

impl Layer {
    /// Load a layer from a JSON config file.
    ///
    /// The path is tried as given, then relative to the working directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = locate(path).ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?;
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Lay `over` on top of `self`: given values win, files are appended
    /// unless already listed.
    pub fn merge(mut self, over: Layer) -> Layer {
        for file in over.files {
            if !self.files.contains(&file) {
                self.files.push(file);
            }
        }
        Layer {
            files: self.files,
            outputdir: over.outputdir.or(self.outputdir),
            templatesdir: over.templatesdir.or(self.templatesdir),
            debug: over.debug.or(self.debug),
            format: over.format.or(self.format),
            duplicates: over.duplicates.or(self.duplicates),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub struct Settings {
    pub files: Vec<String>,
    pub output_dir: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub debug: bool,
    pub format: String,
    pub duplicates: DuplicatePolicy,
}

impl Settings {
    /// Apply defaults to a merged layer.
    pub fn from_layer(layer: Layer) -> anyhow::Result<Self> {
        let duplicates = match layer.duplicates.as_deref() {
            Some(policy) => policy.parse().map_err(anyhow::Error::msg)?,
            None => DuplicatePolicy::default(),
        };
        Ok(Settings {
            files: layer.files,
            output_dir: layer.outputdir.unwrap_or_else(|| PathBuf::from(".")),
            templates_dir: layer.templatesdir,
            debug: layer.debug.unwrap_or(false),
            format: layer.format.unwrap_or_else(|| "html".to_string()),
            duplicates,
        })
    }
}

fn locate(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    let candidate = std::env::current_dir().ok()?.join(path);
    candidate.is_file().then_some(candidate)
}
