//! Page templates and link rewriting.

use std::path::Path;

use anyhow::Context;
use thiserror::Error;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";
const PLACEHOLDER_OPEN: &str = "{{ ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template has no {0} placeholder")]
    MissingPlaceholder(&'static str),
}

/// An HTML page with title and content placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    /// Wrap a template string, requiring both placeholders.
    pub fn new(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        for placeholder in [TITLE_PLACEHOLDER, CONTENT_PLACEHOLDER] {
            if !source.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder(placeholder));
            }
        }
        Ok(Self { source })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template '{}'", path.display()))?;
        Template::new(source).with_context(|| format!("invalid template '{}'", path.display()))
    }

    /// Substitute every occurrence of both placeholders in a single pass,
    /// so placeholder text inside `title` or `content` is left alone.
    pub fn render(&self, title: &str, content: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + title.len() + content.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
            let (before, candidate) = rest.split_at(start);
            out.push_str(before);
            if let Some(after) = candidate.strip_prefix(TITLE_PLACEHOLDER) {
                out.push_str(title);
                rest = after;
            } else if let Some(after) = candidate.strip_prefix(CONTENT_PLACEHOLDER) {
                out.push_str(content);
                rest = after;
            } else {
                out.push_str(PLACEHOLDER_OPEN);
                rest = &candidate[PLACEHOLDER_OPEN.len()..];
            }
        }
        out.push_str(rest);
        out
    }
}

/// Point root-relative `href`/`src` attributes at `base`.
///
/// `base` must start and end with `/`; the site root (`/`) leaves the
/// text unchanged.
pub fn rewrite_base_path(html: &str, base: &str) -> String {
    if base == "/" {
        return html.to_string();
    }
    html.replace("href=\"/", &format!("href=\"{}", base))
        .replace("src=\"/", &format!("src=\"{}", base))
}
