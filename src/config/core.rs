use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::SettingsOverrides;
use crate::discovery::{DEFAULT_EXTENSIONS, Extensions};
use crate::external::DEFAULT_FORMATTER;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository-level config file, searched from the current directory upwards
pub const REPO_CONFIG_FILE: &str = "cppfmt.toml";

/// Prefix for environment variable overrides (`CPPFMT_JOBS=4`)
pub const ENV_PREFIX: &str = "CPPFMT_";

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// File name suffixes to format
    pub extensions: Vec<String>,

    /// Formatter program name or path
    pub formatter: String,

    /// Worker threads (0 = one per logical CPU)
    pub jobs: usize,

    /// Follow symbolic links to directories during discovery
    pub follow_symlinks: bool,

    /// Report planned work without running the formatter
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            formatter: DEFAULT_FORMATTER.to_string(),
            jobs: 0,
            follow_symlinks: false,
            dry_run: false,
        }
    }
}

impl Settings {
    /// Reject settings that would make every run a silent no-op
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            bail!("At least one file extension must be configured");
        }
        if self.extensions.iter().any(|ext| ext.is_empty()) {
            bail!("File extensions cannot be empty strings");
        }
        if self.formatter.trim().is_empty() {
            bail!("Formatter program cannot be empty");
        }
        Ok(())
    }

    pub fn extensions(&self) -> Extensions {
        Extensions::new(&self.extensions)
    }
}

pub struct CppfmtConfig {
    figment: Figment,
}

impl CppfmtConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        // If custom config is specified, use only that + defaults + env vars
        if let Some(custom_path) = custom_config {
            if !custom_path.is_file() {
                bail!("Config file not found: {}", custom_path.display());
            }
            figment = figment.merge(Toml::file(custom_path));
        } else {
            // Standard priority: user config -> repo config
            if let Some(user_config) = Self::user_config_path() {
                figment = figment.merge(Toml::file(user_config));
            }
            figment = figment.merge(Toml::file(REPO_CONFIG_FILE));
        }

        // Environment variables beat every file
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        Ok(CppfmtConfig { figment })
    }

    /// Layer command-line overrides on top of everything loaded so far
    pub fn with_overrides(self, overrides: &SettingsOverrides) -> Self {
        CppfmtConfig {
            figment: self.figment.merge(Serialized::defaults(overrides)),
        }
    }

    /// Extract and validate the merged settings
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .context("Failed to resolve configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    fn user_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config/cppfmt/config.toml"))
    }
}
