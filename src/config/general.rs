//! The general configuration settings for tern.
//!
//! [General] is deserialized from the `[general]` table of tern.toml and converted into
//! [InternalGeneral], which holds the validated values.

use crate::config::presets::DEFAULT_THEME_ID;
use crate::utils::expand_home_path;

use log::LevelFilter;
use serde::Deserialize;

use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    theme: String,
    themes_file: Option<String>,
    log_level: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: false,
            theme: DEFAULT_THEME_ID.to_string(),
            themes_file: None,
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InternalGeneral {
    show_hidden: bool,
    theme: String,
    themes_file: Option<PathBuf>,
    log_level: LevelFilter,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            show_hidden: g.show_hidden,
            theme: g.theme.trim().to_lowercase(),
            themes_file: g.themes_file.as_deref().map(expand_home_path),
            log_level: parse_level(&g.log_level),
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    #[inline]
    pub fn themes_file(&self) -> Option<&Path> {
        self.themes_file.as_deref()
    }

    #[inline]
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Uses `path` as the theme file unless one was configured.
    pub(crate) fn default_themes_file(&mut self, path: PathBuf) {
        if self.themes_file.is_none() {
            self.themes_file = Some(path);
        }
    }
}

impl Default for InternalGeneral {
    fn default() -> Self {
        InternalGeneral::from(General::default())
    }
}

/// Parses a level name ("off", "error", "warn", "info", "debug", "trace").
///
/// Unknown names fall back to warn.
pub fn parse_level(s: &str) -> LevelFilter {
    s.trim().parse().unwrap_or(LevelFilter::Warn)
}
