//! Configuration system for doctree.
//!
//! Loads config from:
//! 1. Global: ~/.config/doctree/config.toml
//! 2. Per-project: .doctree/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [build]
//! filter_base_members = true
//! fail_fast = false
//! parallel = true
//! namespace_policy = "reject"
//!
//! [render]
//! format = "markdown"
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use doctree_model::NamespacePolicy;

use crate::builder::BuildOptions;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Build configuration. Unset values fall back to [`BuildOptions::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BuildConfig {
    /// Drop members inherited unchanged from the universal base type.
    pub filter_base_members: Option<bool>,
    /// Abort on the first failing type.
    pub fail_fast: Option<bool>,
    /// Build type models in parallel.
    pub parallel: Option<bool>,
    /// How namespaces with empty segments are handled.
    pub namespace_policy: Option<NamespacePolicy>,
}

/// Render configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RenderConfig {
    /// Renderer name (`json`, `markdown`, or any registered renderer).
    pub format: Option<String>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DoctreeConfig {
    pub build: BuildConfig,
    pub render: RenderConfig,
}

impl DoctreeConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/doctree/config.toml,
    /// then merges with per-project config from .doctree/config.toml.
    /// Missing files are skipped; unreadable or malformed ones are errors.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        Self::load_layers(Self::global_config_path().as_deref(), root)
    }

    /// Load from an explicit global config path and a project root.
    pub fn load_layers(global: Option<&Path>, root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(global) = global
            && let Some(layer) = Self::load_file(global)?
        {
            config = config.merge(layer);
        }

        let project_path = Self::project_config_path(root);
        if let Some(layer) = Self::load_file(&project_path)? {
            config = config.merge(layer);
        }

        Ok(config)
    }

    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(".doctree").join("config.toml")
    }

    /// Get the global config path.
    pub fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("doctree").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Merge another config into this one; values set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            build: BuildConfig {
                filter_base_members: other
                    .build
                    .filter_base_members
                    .or(self.build.filter_base_members),
                fail_fast: other.build.fail_fast.or(self.build.fail_fast),
                parallel: other.build.parallel.or(self.build.parallel),
                namespace_policy: other
                    .build
                    .namespace_policy
                    .or(self.build.namespace_policy),
            },
            render: RenderConfig {
                format: other.render.format.or(self.render.format),
            },
        }
    }

    /// Build options with unset values taken from the defaults.
    pub fn build_options(&self) -> BuildOptions {
        let defaults = BuildOptions::default();
        BuildOptions {
            filter_base_members: self
                .build
                .filter_base_members
                .unwrap_or(defaults.filter_base_members),
            fail_fast: self.build.fail_fast.unwrap_or(defaults.fail_fast),
            parallel: self.build.parallel.unwrap_or(defaults.parallel),
            namespace_policy: self
                .build
                .namespace_policy
                .unwrap_or(defaults.namespace_policy),
        }
    }

    pub fn format(&self) -> &str {
        self.render.format.as_deref().unwrap_or("markdown")
    }
}
