//! Configuration management for cppfmt
//!
//! Settings are merged with figment from, lowest to highest priority:
//! embedded defaults, the user config, the repository `cppfmt.toml`,
//! `CPPFMT_*` environment variables and finally command-line flags.

mod core;
mod overrides;

pub use self::core::{CppfmtConfig, ENV_PREFIX, REPO_CONFIG_FILE, Settings};
pub use overrides::SettingsOverrides;
