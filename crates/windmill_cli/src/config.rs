//! Windmill configuration file handling
//!
//! `windmill.toml` is optional. When present it may set:
//! - `[pagination] results_per_page` - default page size for `windmill pages`
//! - `[theme] path` - theme file merged over the built-in theme
//! - `[theme] mode` - `"light"` or `"dark"`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use windmill_cn::DEFAULT_RESULTS_PER_PAGE;
use windmill_theme::{ColorScheme, Theme};

pub const CONFIG_FILE: &str = "windmill.toml";

/// Contents of windmill.toml
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WindmillConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Directory the config was loaded from, for resolving relative paths
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PaginationConfig {
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            results_per_page: default_results_per_page(),
        }
    }
}

fn default_results_per_page() -> usize {
    DEFAULT_RESULTS_PER_PAGE
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Theme file, relative to the config directory
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub mode: Option<ColorScheme>,
}

impl WindmillConfig {
    /// Load windmill.toml from `path`, falling back to defaults when absent
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, path.display());
            return Ok(Self {
                base_dir: path.to_path_buf(),
                ..Self::default()
            });
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: WindmillConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        config.base_dir = path.to_path_buf();

        tracing::debug!("loaded {}", config_path.display());
        Ok(config)
    }

    /// The built-in theme with the configured file and mode applied
    pub fn resolve_theme(&self) -> Result<Theme> {
        let mut theme = Theme::windmill();

        if let Some(ref path) = self.theme.path {
            let path = self.base_dir.join(path);
            let overrides = Theme::load(&path)
                .with_context(|| format!("Failed to load theme {}", path.display()))?;
            theme = theme.merge(overrides);
        }
        if let Some(mode) = self.theme.mode {
            theme.mode = Some(mode);
        }

        Ok(theme)
    }
}
