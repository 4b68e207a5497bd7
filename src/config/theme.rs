//! Colour themes for tern.
//!
//! A theme is a [ThemeRecord]: an id, a display name, a dark/light flag and a [Palette] of
//! thirteen colour roles. The [ThemeRegistry] holds the built-in presets plus any custom
//! themes read from the JSON theme file. The theme in use is an explicit [ActiveTheme]
//! value owned by the app state. Changing it notifies every [ThemeObserver].

use crate::config::ConfigError;
use crate::config::presets::{DEFAULT_THEME_ID, TOKYO_NIGHT, builtin_themes};
use crate::utils::try_parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The thirteen colour roles every theme defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub surface_light: Color,
    pub text: Color,
    pub blue: Color,
    pub cyan: Color,
    pub green: Color,
    pub purple: Color,
    pub purple_light: Color,
    pub pink: Color,
    pub yellow: Color,
    pub orange: Color,
    pub border: Color,
}

impl Palette {
    pub const ROLES: [&'static str; 13] = [
        "background",
        "surface",
        "surface_light",
        "text",
        "blue",
        "cyan",
        "green",
        "purple",
        "purple_light",
        "pink",
        "yellow",
        "orange",
        "border",
    ];

    /// Mutable slot for a named role, if the name is known.
    fn role_mut(&mut self, role: &str) -> Option<&mut Color> {
        let slot = match role {
            "background" => &mut self.background,
            "surface" => &mut self.surface,
            "surface_light" => &mut self.surface_light,
            "text" => &mut self.text,
            "blue" => &mut self.blue,
            "cyan" => &mut self.cyan,
            "green" => &mut self.green,
            "purple" => &mut self.purple,
            "purple_light" => &mut self.purple_light,
            "pink" => &mut self.pink,
            "yellow" => &mut self.yellow,
            "orange" => &mut self.orange,
            "border" => &mut self.border,
            _ => return None,
        };
        Some(slot)
    }
}

impl Default for Palette {
    fn default() -> Self {
        TOKYO_NIGHT
    }
}

/// A named, complete theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRecord {
    id: String,
    name: String,
    dark: bool,
    palette: Palette,
}

impl ThemeRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, dark: bool, palette: Palette) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dark,
            palette,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    // Styles used by the ui. Everything derives from the palette.

    pub fn base_style(&self) -> Style {
        Style::default()
            .fg(self.palette.text)
            .bg(self.palette.background)
    }

    pub fn surface_style(&self) -> Style {
        Style::default()
            .fg(self.palette.text)
            .bg(self.palette.surface)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.palette.border)
    }

    pub fn focus_border_style(&self) -> Style {
        Style::default().fg(self.palette.blue)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.palette.purple_light)
            .add_modifier(Modifier::BOLD)
    }

    pub fn directory_style(&self) -> Style {
        Style::default()
            .fg(self.palette.blue)
            .add_modifier(Modifier::BOLD)
    }

    pub fn entry_style(&self) -> Style {
        Style::default().fg(self.palette.text)
    }

    pub fn symlink_style(&self) -> Style {
        Style::default().fg(self.palette.cyan)
    }

    pub fn executable_style(&self) -> Style {
        Style::default().fg(self.palette.green)
    }

    pub fn dim_style(&self) -> Style {
        Style::default()
            .fg(self.palette.border)
            .add_modifier(Modifier::DIM)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.palette.surface_light)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.palette.cyan)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.palette.purple)
    }

    pub fn value_style(&self) -> Style {
        Style::default().fg(self.palette.yellow)
    }

    pub fn notice_style(&self) -> Style {
        Style::default()
            .fg(self.palette.orange)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.palette.pink)
    }

    pub fn status_style(&self) -> Style {
        Style::default()
            .fg(self.palette.text)
            .bg(self.palette.surface)
    }

    pub fn marker_style(&self) -> Style {
        Style::default()
            .fg(self.palette.pink)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for ThemeRecord {
    fn default() -> Self {
        ThemeRecord::new(DEFAULT_THEME_ID, "Tokyo Night", true, TOKYO_NIGHT)
    }
}

/// One entry of the JSON theme file.
#[derive(Deserialize, Debug)]
struct RawTheme {
    id: String,
    name: Option<String>,
    #[serde(default = "default_dark")]
    dark: bool,
    #[serde(default)]
    colors: HashMap<String, String>,
}

fn default_dark() -> bool {
    true
}

impl From<RawTheme> for ThemeRecord {
    fn from(raw: RawTheme) -> Self {
        let mut palette = TOKYO_NIGHT;
        for (role, value) in &raw.colors {
            let Some(slot) = palette.role_mut(role) else {
                log::warn!("theme '{}': unknown colour role '{role}'", raw.id);
                continue;
            };
            match try_parse_color(value) {
                Some(color) => *slot = color,
                None => log::warn!("theme '{}': invalid colour '{value}' for {role}", raw.id),
            }
        }
        let name = raw.name.unwrap_or_else(|| raw.id.clone());
        ThemeRecord::new(raw.id, name, raw.dark, palette)
    }
}

/// Parses the JSON theme file contents into records.
pub fn parse_theme_file(content: &str) -> Result<Vec<ThemeRecord>, serde_json::Error> {
    let raw: Vec<RawTheme> = serde_json::from_str(content)?;
    Ok(raw.into_iter().map(ThemeRecord::from).collect())
}

/// Every selectable theme in presentation order.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<ThemeRecord>,
}

impl ThemeRegistry {
    /// The built-in presets only.
    pub fn builtin() -> Self {
        Self {
            themes: builtin_themes(),
        }
    }

    /// Built-in presets plus the custom themes in `themes_file`.
    ///
    /// A missing file is not an error. A malformed file is logged and ignored.
    pub fn load(themes_file: Option<&Path>) -> Self {
        let mut registry = Self::builtin();
        if let Some(path) = themes_file
            && path.exists()
        {
            match registry.merge_file(path) {
                Ok(n) => log::info!("loaded {n} custom themes from {}", path.display()),
                Err(e) => log::warn!("{e}"),
            }
        }
        registry
    }

    /// Reads and merges one theme file. Returns the number of records merged.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records = parse_theme_file(&content).map_err(|source| ConfigError::Themes {
            path: path.to_path_buf(),
            source,
        })?;
        let n = records.len();
        for record in records {
            self.insert(record);
        }
        Ok(n)
    }

    /// Adds a record. A record with an existing id replaces it in place.
    pub fn insert(&mut self, record: ThemeRecord) {
        match self.position(record.id()) {
            Some(i) => self.themes[i] = record,
            None => self.themes.push(record),
        }
    }

    #[inline]
    pub fn themes(&self) -> &[ThemeRecord] {
        &self.themes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ThemeRecord> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.themes.iter().position(|t| t.id == id)
    }

    /// Looks up `id`, falling back to the default theme.
    pub fn resolve(&self, id: &str) -> ThemeRecord {
        match self.get(id) {
            Some(record) => record.clone(),
            None => {
                log::warn!("unknown theme '{id}', using {DEFAULT_THEME_ID}");
                self.get(DEFAULT_THEME_ID).cloned().unwrap_or_default()
            }
        }
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Anything whose output depends on the active theme.
pub trait ThemeObserver {
    fn theme_changed(&mut self, theme: &ThemeRecord);
}

/// The theme currently in use.
///
/// The generation increases on every change so cached renderings can tell they are stale.
#[derive(Debug, Clone)]
pub struct ActiveTheme {
    record: ThemeRecord,
    generation: u64,
}

impl ActiveTheme {
    pub fn new(record: ThemeRecord) -> Self {
        Self {
            record,
            generation: 0,
        }
    }

    #[inline]
    pub fn record(&self) -> &ThemeRecord {
        &self.record
    }

    #[inline]
    pub fn id(&self) -> &str {
        self.record.id()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switches to `record` and notifies `observers`.
    ///
    /// Returns false without notifying when `record` is already active.
    pub fn set(&mut self, record: ThemeRecord, observers: &mut [&mut dyn ThemeObserver]) -> bool {
        if record == self.record {
            return false;
        }
        self.record = record;
        self.generation = self.generation.wrapping_add(1);
        log::info!("theme changed to {}", self.record.id());
        for observer in observers.iter_mut() {
            observer.theme_changed(&self.record);
        }
        true
    }
}

impl Default for ActiveTheme {
    fn default() -> Self {
        Self::new(ThemeRecord::default())
    }
}

impl std::ops::Deref for ActiveTheme {
    type Target = ThemeRecord;

    fn deref(&self) -> &ThemeRecord {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct Counter {
        seen: Vec<String>,
    }

    impl ThemeObserver for Counter {
        fn theme_changed(&mut self, theme: &ThemeRecord) {
            self.seen.push(theme.id().to_string());
        }
    }

    #[test]
    fn builtin_has_eight_presets_default_first() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.themes()[0].id(), DEFAULT_THEME_ID);
        assert_eq!(
            registry.get("nord").map(|t| t.palette().background),
            Some(Color::Rgb(0x2e, 0x34, 0x40))
        );
    }

    #[test]
    fn custom_theme_inherits_missing_roles() -> Result<(), Box<dyn std::error::Error>> {
        let json = r##"[{"id": "paper", "name": "Paper", "dark": false,
            "colors": {"background": "#ffffff", "text": "#000", "sparkle": "#123456"}}]"##;
        let records = parse_theme_file(json)?;
        assert_eq!(records.len(), 1);
        let paper = &records[0];
        assert!(!paper.is_dark());
        assert_eq!(paper.palette().background, Color::Rgb(255, 255, 255));
        assert_eq!(paper.palette().text, Color::Rgb(0, 0, 0));
        assert_eq!(paper.palette().blue, TOKYO_NIGHT.blue);
        Ok(())
    }

    #[test]
    fn custom_file_replaces_builtin_id() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        write!(file, r##"[{{"id": "nord", "colors": {{"pink": "#010203"}}}}, {{"id": "mine"}}]"##)?;

        let registry = ThemeRegistry::load(Some(file.path()));
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.position("nord"), Some(2));
        assert_eq!(
            registry.get("nord").map(|t| t.palette().pink),
            Some(Color::Rgb(1, 2, 3))
        );
        assert_eq!(registry.get("mine").map(|t| t.name()), Some("mine"));
        Ok(())
    }

    #[test]
    fn malformed_file_keeps_builtins() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{{ not json")?;

        let mut registry = ThemeRegistry::builtin();
        assert!(matches!(
            registry.merge_file(file.path()),
            Err(ConfigError::Themes { .. })
        ));
        assert_eq!(ThemeRegistry::load(Some(file.path())).len(), 8);
        Ok(())
    }

    #[test]
    fn unknown_id_resolves_to_default() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.resolve("nope").id(), DEFAULT_THEME_ID);
        assert_eq!(registry.resolve("dracula").id(), "dracula");
    }

    #[test]
    fn active_theme_notifies_and_bumps_generation() {
        let registry = ThemeRegistry::builtin();
        let mut active = ActiveTheme::default();
        let mut counter = Counter { seen: Vec::new() };

        {
            let mut observers: [&mut dyn ThemeObserver; 1] = [&mut counter];
            assert!(!active.set(registry.resolve(DEFAULT_THEME_ID), &mut observers));
            assert_eq!(active.generation(), 0);
            assert!(active.set(registry.resolve("dracula"), &mut observers));
        }
        assert_eq!(active.generation(), 1);
        assert_eq!(active.id(), "dracula");
        assert_eq!(counter.seen, vec!["dracula".to_string()]);
    }
}
