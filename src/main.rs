//! blockdoc: generate hierarchical HTML documentation from `/** ... */` comment blocks.
//!
//! Input files are concatenated in the order given, every `/** ... */`
//! block is interpreted through its `@tags`, and the resulting nodes are
//! linked into a tree by their dotted qualified names:
//!
//! `blockdoc -o docs src/*.js`
//! `blockdoc -c blockdoc.json -f json`

mod config;
mod error;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::Parser as _;
use render::template::TemplateSet;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(
    name = "blockdoc",
    about = "Generate hierarchical HTML documentation from /** ... */ comment blocks"
)]
struct Cli {
    /// Input files, directories or glob patterns, concatenated in order
    files: Vec<String>,

    /// JSON config file; command line flags override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Output directory (default: current directory)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Directory of templates overriding the built-in ones
    #[arg(short = 't', long)]
    templates: Option<PathBuf>,

    /// Output format: html (default), json
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Duplicate qualified names: overwrite (default) or reject
    #[arg(long)]
    duplicates: Option<String>,
}

impl Cli {
    fn into_layer(self) -> config::Layer {
        config::Layer {
            files: self.files,
            outputdir: self.output,
            templatesdir: self.templates,
            debug: self.debug.then_some(true),
            format: self.format,
            duplicates: self.duplicates,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let base = match cli.config.as_deref() {
        Some(path) => config::Layer::load(path)?,
        None => config::Layer::default(),
    };
    let settings = config::Settings::from_layer(base.merge(cli.into_layer()))?;

    init_logging(settings.debug);
    tracing::debug!("resolved settings: {:?}", settings);

    let input_files = expand_inputs(&settings.files)?;
    if input_files.is_empty() {
        anyhow::bail!("no input files given");
    }

    let templates = match settings.templates_dir.as_deref() {
        Some(dir) => TemplateSet::load(dir)?,
        None => TemplateSet::default(),
    };
    let renderer = render::create_renderer(&settings.format, templates)?;

    let mut parser = parser::Parser::new().with_duplicates(settings.duplicates);
    for path in &input_files {
        tracing::debug!("adding {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parser.add_source(&content);
    }
    let docs = parser.parse().context("failed to parse documentation")?;

    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            settings.output_dir.display()
        )
    })?;

    for page in renderer.render(&docs)? {
        let out_path = settings.output_dir.join(&page.file_name);
        fs::write(&out_path, &page.contents)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        tracing::debug!("wrote {}", out_path.display());
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the `--debug` flag.
fn init_logging(debug: bool) {
    let default = if debug { "blockdoc=debug" } else { "blockdoc=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// File extensions picked up when a directory is given.
const SUPPORTED_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts"];

/// Expand inputs into an ordered, duplicate-free list of file paths.
///
/// Plain paths must exist. Directories are scanned (non-recursive) for
/// supported files, glob patterns expand to their sorted matches.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        let mut found = Vec::new();
        if path.is_file() {
            found.push(path.to_path_buf());
        } else if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                let supported = p
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
                if p.is_file() && supported {
                    found.push(p);
                }
            }
            found.sort();
        } else if is_glob(pattern) {
            found = glob::glob(pattern)
                .with_context(|| format!("invalid glob pattern: {}", pattern))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect();
            found.sort();
            if found.is_empty() {
                tracing::warn!("no files matched: {}", pattern);
            }
        } else {
            anyhow::bail!("file {} does not exist", pattern);
        }

        for file in found {
            if !files.contains(&file) {
                files.push(file);
            }
        }
    }
    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn glob_detection() {
        assert!(is_glob("src/*.js"));
        assert!(is_glob("file?.js"));
        assert!(!is_glob("src/main.js"));
    }

    #[test]
    fn inputs_keep_given_order() {
        let dir = TempDir::new().unwrap();
        let b = dir.path().join("b.js");
        let a = dir.path().join("a.js");
        fs::write(&b, "").unwrap();
        fs::write(&a, "").unwrap();
        let patterns = vec![
            b.to_string_lossy().to_string(),
            a.to_string_lossy().to_string(),
            b.to_string_lossy().to_string(),
        ];
        assert_eq!(expand_inputs(&patterns).unwrap(), vec![b, a]);
    }

    #[test]
    fn directory_scans_supported_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("z.js"), "").unwrap();
        fs::write(dir.path().join("a.ts"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("view.tsx"), "").unwrap();
        let found = expand_inputs(&[dir.path().to_string_lossy().to_string()]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.ts", "z.js"]);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = expand_inputs(&["/no/such/file.js".to_string()]).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn unmatched_glob_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.js", dir.path().display());
        assert!(expand_inputs(&[pattern]).unwrap().is_empty());
    }
}
