//! Helpers for tern.
//!
//! - Colour parsing from names or hex codes
//! - Home directory lookup, `~` expansion and shortening
//! - Clamping numeric settings into their allowed range

use ratatui::style::Color;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Parses a colour name or hex code (`#RRGGBB` or `#RGB`).
///
/// Returns None for anything unrecognised.
pub fn try_parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let named = match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => {
            let hex = s.strip_prefix('#')?;
            let expanded = match hex.len() {
                6 => hex.to_string(),
                3 => hex.chars().flat_map(|c| [c, c]).collect(),
                _ => return None,
            };
            let rgb = u32::from_str_radix(&expanded, 16).ok()?;
            return Some(Color::Rgb(
                ((rgb >> 16) & 0xFF) as u8,
                ((rgb >> 8) & 0xFF) as u8,
                (rgb & 0xFF) as u8,
            ));
        }
    };
    Some(named)
}

pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` to the home directory.
pub fn expand_home_path(path: &str) -> PathBuf {
    if path == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Absolute form of `path` with `.` and `..` resolved.
///
/// Falls back to the lexical absolute path when `path` cannot be resolved on disk.
pub fn resolve_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Shortens the home directory prefix of `path` to `~`.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        let mut short = stripped.display().to_string();
        if short.starts_with(MAIN_SEPARATOR) {
            short.remove(0);
        }
        return format!("~{}{}", MAIN_SEPARATOR, short);
    }
    readable_path(path)
}

pub fn readable_path(path: &Path) -> String {
    #[cfg(windows)]
    {
        let display = path.display().to_string();
        display
            .strip_prefix(r"\\?\")
            .unwrap_or(&display)
            .to_string()
    }
    #[cfg(not(windows))]
    {
        path.display().to_string()
    }
}

/// Clamps a numeric setting into `min..=max`, logging when the configured value was out of range.
pub fn clamp_setting<T>(name: &str, value: T, min: T, max: T) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    let clamped = if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    };
    if clamped != value {
        log::warn!("{name}={value} out of range ({min}..={max}), clamped to {clamped}");
    }
    clamped
}
