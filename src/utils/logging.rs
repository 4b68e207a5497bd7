//! File logging for tern.
//!
//! The terminal belongs to the TUI, so log records go to `<cache dir>/tern/tern.log`
//! through simplelog's [WriteLogger]. The level comes from the config unless the
//! `TERN_LOG` environment variable names one.

use crate::config::general::parse_level;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use std::fs::{self, File};
use std::path::PathBuf;

pub const LOG_ENV: &str = "TERN_LOG";

/// Location of the log file, if a cache directory exists.
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("tern").join("tern.log"))
}

/// Level from `TERN_LOG` when set, otherwise `configured`.
pub fn effective_level(configured: LevelFilter, env_value: Option<&str>) -> LevelFilter {
    match env_value {
        Some(value) if !value.trim().is_empty() => parse_level(value),
        _ => configured,
    }
}

/// Installs the file logger. Failures leave logging disabled.
pub fn init(configured: LevelFilter) {
    let env_value = std::env::var(LOG_ENV).ok();
    let level = effective_level(configured, env_value.as_deref());
    if level == LevelFilter::Off {
        return;
    }

    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_overrides_config() {
        assert_eq!(
            effective_level(LevelFilter::Warn, Some("debug")),
            LevelFilter::Debug
        );
        assert_eq!(effective_level(LevelFilter::Info, Some("  ")), LevelFilter::Info);
        assert_eq!(effective_level(LevelFilter::Error, None), LevelFilter::Error);
    }
}
