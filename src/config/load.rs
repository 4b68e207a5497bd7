//! The main config loading module for tern.
//!
//! Handles loading and deserializing settings from `tern.toml`.
//!
//! Provides the main [Config] struct and the internal [RawConfig] used for parsing.
//! Also writes the commented default config for `tern --init`.

use crate::config::{FindOptions, General, InternalGeneral, Keys, PreviewOptions};
use crate::utils::get_home;

use serde::Deserialize;
use thiserror::Error;

use std::path::{Path, PathBuf};
use std::{fs, io};

/// Errors raised while reading configuration or theme files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid theme file {}: {source}", .path.display())]
    Themes {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw configuration as read from the toml file.
///
/// Converted into [Config], which holds validated values.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    preview: PreviewOptions,
    find: FindOptions,
    keys: Keys,
}

/// Processed configuration used by tern.
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    preview: PreviewOptions,
    find: FindOptions,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            preview: raw.preview,
            find: raw.find,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Loads the configuration from [Config::default_path].
    ///
    /// A missing file yields the internal defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads the configuration from `path`.
    ///
    /// The theme file defaults to `themes.json` beside the config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::parse(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        if let Some(dir) = path.parent() {
            config.general.default_themes_file(dir.join("themes.json"));
        }
        Ok(config)
    }

    /// Parses tern.toml contents.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn preview(&self) -> &PreviewOptions {
        &self.preview
    }

    #[inline]
    pub fn find(&self) -> &FindOptions {
        &self.find
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the TERN_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/tern/tern.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("TERN_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("tern/tern.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/tern/tern.toml");
        }
        PathBuf::from("tern.toml")
    }

    /// Writes the commented default configuration to `path`.
    /// Refuses to overwrite an existing file.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {}", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {}", path.display());
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

const DEFAULT_TOML: &str = r##"# tern.toml - default configuration for tern
#
# Commented values are the internal defaults.

[general]
show_hidden = false
theme = "tokyo-night"
# Custom themes, a JSON array of { "id", "name", "dark", "colors": { role = "#RRGGBB" } }
# themes_file = "~/.config/tern/themes.json"
# log_level = "warn"

[preview]
# max_bytes = 1000000
# max_lines = 1000
# dir_peek = 50
# probe_bytes = 8192
# tab_width = 4
# line_scan_bytes = 4194304
# syntax_highlighting = true
# markdown = true

[find]
# max_candidates = 10000
# max_results = 100
# min_score = 0
# batch = 256

# [keys]
# go_up = ["k", "Up"]
# go_down = ["j", "Down"]
# go_parent = ["h"]
# activate = ["l", "Enter"]
# toggle_hidden = ["."]
# find = ["Ctrl+f"]
# help = ["/"]
# settings = ["s"]
# quit = ["q", "Ctrl+c"]
"##;
