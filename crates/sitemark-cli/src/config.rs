//! Site configuration loaded from `site.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {}", config_path.display())]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}", config_path.display())]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where the site generator reads from and writes to.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Tree of `.md` documents to convert.
    pub content_dir: PathBuf,
    /// Destination tree; wiped and recreated on every build.
    pub output_dir: PathBuf,
    /// Assets copied verbatim into the output tree.
    pub static_dir: PathBuf,
    /// Page template holding the `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
    /// Prefix replacing the leading `/` of root-relative links.
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("public"),
            static_dir: PathBuf::from("static"),
            template: PathBuf::from("template.html"),
            base_path: "/".to_string(),
        }
    }
}

impl SiteConfig {
    /// Config file looked up in the working directory when none is given.
    pub const DEFAULT_FILE: &'static str = "site.toml";

    /// Load a config file. Returns `Ok(None)` if the file does not exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let mut config: SiteConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.base_path = normalize_base_path(&config.base_path);

        Ok(Some(config))
    }
}

/// Make a base path start and end with `/`. Empty means the site root.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
