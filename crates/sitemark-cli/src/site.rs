//! Static site generation: content tree in, HTML tree out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::template::{rewrite_base_path, Template};

const MARKDOWN_EXT: &str = "md";
const HTML_EXT: &str = "html";

/// Convert one document into a full page.
///
/// The body is built before the title is looked up, so a malformed block
/// is reported even when the heading is missing as well.
pub fn generate_page(
    source: &str,
    template: &Template,
    base_path: &str,
) -> sitemark_core::Result<String> {
    let root = sitemark_core::build(source)?;
    let title = sitemark_core::extract_title(source)?;
    let content = root.to_markup()?;
    Ok(rewrite_base_path(
        &template.render(title, &content),
        base_path,
    ))
}

/// A document that could not be converted.
#[derive(Debug, Clone)]
pub struct PageFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a site build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages written, relative to the output directory.
    pub pages: Vec<PathBuf>,
    pub static_files: usize,
    pub failures: Vec<PageFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Site {
    config: SiteConfig,
    keep_going: bool,
}

impl Site {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            keep_going: false,
        }
    }

    /// Skip failing documents instead of aborting the build.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn build(&self) -> Result<BuildReport> {
        let config = &self.config;
        self.check_layout()?;
        let template = Template::load(&config.template)?;

        if config.output_dir.exists() {
            debug!(dir = %config.output_dir.display(), "removing output directory");
            fs::remove_dir_all(&config.output_dir).with_context(|| {
                format!("failed to remove '{}'", config.output_dir.display())
            })?;
        }
        fs::create_dir_all(&config.output_dir)
            .with_context(|| format!("failed to create '{}'", config.output_dir.display()))?;

        let mut report = BuildReport::default();

        if config.static_dir.is_dir() {
            report.static_files = copy_dir_recursive(&config.static_dir, &config.output_dir)?;
            info!(
                files = report.static_files,
                from = %config.static_dir.display(),
                "copied static files"
            );
        } else {
            debug!(dir = %config.static_dir.display(), "no static directory");
        }

        for relative in markdown_files(&config.content_dir)? {
            let source_path = config.content_dir.join(&relative);
            let target = relative.with_extension(HTML_EXT);

            match self.write_page(&source_path, &target, &template) {
                Ok(()) => {
                    info!(page = %target.display(), "wrote page");
                    report.pages.push(target);
                }
                Err(err) if self.keep_going => {
                    warn!(path = %source_path.display(), "skipping page: {:#}", err);
                    report.failures.push(PageFailure {
                        path: source_path,
                        message: format!("{:#}", err),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(report)
    }

    fn write_page(&self, source_path: &Path, target: &Path, template: &Template) -> Result<()> {
        let source = fs::read_to_string(source_path)
            .with_context(|| format!("failed to read '{}'", source_path.display()))?;
        let html = generate_page(&source, template, &self.config.base_path)
            .with_context(|| format!("failed to convert '{}'", source_path.display()))?;

        let dest = self.config.output_dir.join(target);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }
        fs::write(&dest, html).with_context(|| format!("failed to write '{}'", dest.display()))
    }

    /// The output directory is wiped, so it must not hold the content or
    /// static trees. Static files are copied into it, so the static tree
    /// must not hold the output either.
    fn check_layout(&self) -> Result<()> {
        let config = &self.config;
        if !config.content_dir.is_dir() {
            bail!("content directory '{}' not found", config.content_dir.display());
        }
        let content = resolve(&config.content_dir)?;
        let output = resolve(&config.output_dir)?;

        if content.starts_with(&output) {
            bail!(
                "output directory '{}' contains the content directory '{}'",
                config.output_dir.display(),
                config.content_dir.display()
            );
        }

        if config.static_dir.is_dir() {
            let static_dir = resolve(&config.static_dir)?;
            if static_dir.starts_with(&output) {
                bail!(
                    "output directory '{}' contains the static directory '{}'",
                    config.output_dir.display(),
                    config.static_dir.display()
                );
            }
            if output.starts_with(&static_dir) {
                bail!(
                    "static directory '{}' contains the output directory '{}'",
                    config.static_dir.display(),
                    config.output_dir.display()
                );
            }
        }
        Ok(())
    }
}

/// Canonical form of `path`. A path that does not exist yet is resolved
/// through its nearest existing ancestor, so symlinked parents compare
/// equal to their canonical targets.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("failed to resolve '{}'", path.display()))?;

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => return Ok(absolute.clone()),
        }
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("failed to resolve '{}'", path.display()))?;
    resolved.extend(missing.into_iter().rev());
    Ok(resolved)
}

/// Directory entries sorted by name, for a deterministic build order.
fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory '{}'", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to read directory '{}'", dir.display()))?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

/// Copy a directory tree into `dest`, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest).with_context(|| format!("failed to create '{}'", dest.display()))?;

    let mut copied = 0;
    for entry in sorted_entries(src)? {
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if from.is_dir() {
            copied += copy_dir_recursive(&from, &to)?;
        } else {
            debug!(from = %from.display(), to = %to.display(), "copy");
            fs::copy(&from, &to).with_context(|| {
                format!("failed to copy '{}' to '{}'", from.display(), to.display())
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Markdown files under `root`, as paths relative to it.
fn markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_markdown(root, Path::new(""), &mut files)?;
    Ok(files)
}

fn collect_markdown(root: &Path, relative: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in sorted_entries(&root.join(relative))? {
        let path = entry.path();
        let child = relative.join(entry.file_name());
        if path.is_dir() {
            collect_markdown(root, &child, files)?;
        } else if path.extension().is_some_and(|ext| ext == MARKDOWN_EXT) {
            files.push(child);
        }
    }
    Ok(())
}
