//! Application state and main controller for tern.
//!
//! [AppState] owns everything the event loop needs:
//! - the configuration and the keymap built from it
//! - the [DirectoryModel] and the [PreviewPane]
//! - the [ModalStack] of help, fuzzy-find and settings overlays
//! - the theme registry and the [ActiveTheme]
//! - the transient status message
//!
//! Input handlers live in [crate::app::handlers].

use crate::app::keymap::{Action, Keymap};
use crate::app::modal::{Modal, ModalStack};
use crate::app::nav::DirectoryModel;
use crate::app::preview::PreviewPane;
use crate::config::{ActiveTheme, Config, ThemeObserver, ThemeRegistry};
use crate::core::{FsError, Highlighter, PlainHighlighter, PreviewRenderer, SyntectHighlighter};
use crate::utils::{resolve_path, shorten_home_path};

use crossterm::event::{KeyCode, KeyEvent};

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Outcome of one processed keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    /// The key had no meaning in the current state.
    Continue,
    Consumed,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    level: StatusLevel,
    expires: Instant,
}

impl StatusMessage {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn level(&self) -> StatusLevel {
        self.level
    }
}

pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,

    pub(super) nav: DirectoryModel,
    pub(super) preview: PreviewPane,
    pub(super) modals: ModalStack,

    pub(super) themes: ThemeRegistry,
    pub(super) theme: ActiveTheme,

    pub(super) status: Option<StatusMessage>,
}

impl<'a> AppState<'a> {
    pub fn new(config: &'a Config) -> io::Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::from_dir(config, &current_dir)
    }

    /// Opens `initial_path`. A file opens its parent with the cursor on it.
    pub fn from_dir(config: &'a Config, initial_path: &Path) -> io::Result<Self> {
        let themes = ThemeRegistry::load(config.general().themes_file());
        Self::with_themes(config, initial_path, themes)
    }

    /// Like [AppState::from_dir] with an explicit theme registry.
    pub fn with_themes(
        config: &'a Config,
        initial_path: &Path,
        themes: ThemeRegistry,
    ) -> io::Result<Self> {
        let initial_path = resolve_path(initial_path);
        let theme = ActiveTheme::new(themes.resolve(config.general().theme()));

        let highlighter: Box<dyn Highlighter> = if config.preview().syntax_highlighting() {
            Box::new(SyntectHighlighter::new(theme.is_dark()))
        } else {
            Box::new(PlainHighlighter)
        };
        let renderer = PreviewRenderer::new(highlighter, config.preview().limits())
            .with_markdown(config.preview().markdown());

        let show_hidden = config.general().show_hidden();
        let (dir, focus) = if initial_path.is_file()
            && let Some(parent) = initial_path.parent()
        {
            (parent.to_path_buf(), initial_path.file_name())
        } else {
            (initial_path.clone(), None)
        };

        let mut app = Self {
            config,
            keymap: Keymap::from_config(config),
            nav: DirectoryModel::empty(&dir, show_hidden),
            preview: PreviewPane::new(renderer),
            modals: ModalStack::new(),
            themes,
            theme,
            status: None,
        };

        if let Err(e) = app.nav.open_at(&dir, focus) {
            log::warn!("initial load failed: {e}");
            app.report_error(&e);
        }
        app.refresh_preview();
        Ok(app)
    }

    // Getters/ accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    #[inline]
    pub fn nav(&self) -> &DirectoryModel {
        &self.nav
    }

    #[inline]
    pub fn preview(&self) -> &PreviewPane {
        &self.preview
    }

    #[inline]
    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }

    #[inline]
    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    #[inline]
    pub fn theme(&self) -> &ActiveTheme {
        &self.theme
    }

    #[inline]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    // Status messages

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            expires: Instant::now() + STATUS_TTL,
        });
    }

    pub(super) fn report_error(&mut self, e: &FsError) {
        let text = format!("{}: {}", shorten_home_path(e.path()), e.reason());
        self.set_status(text, StatusLevel::Error);
    }

    /// Periodic work between input events.
    ///
    /// Expires the status message and advances fuzzy enumeration. Returns true when a
    /// redraw is needed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        if let Some(status) = &self.status
            && Instant::now() >= status.expires
        {
            self.status = None;
            changed = true;
        }

        if let Some(Modal::Fuzzy(find)) = self.modals.top_mut() {
            changed |= find.pump();
        }
        changed
    }

    /// Central key handler.
    ///
    /// The top modal takes every key while open. Otherwise keys go through the keymap.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        if !self.modals.is_empty() {
            return self.handle_modal_key(key);
        }

        // nothing to dismiss
        if key.code == KeyCode::Esc {
            return KeypressResult::Continue;
        }

        match self.keymap.lookup(key) {
            Some(Action::Nav(nav_act)) => self.handle_nav_action(nav_act),
            Some(Action::Modal(modal_act)) => self.handle_modal_action(modal_act),
            Some(Action::System(sys_act)) => self.handle_sys_action(sys_act),
            None => KeypressResult::Continue,
        }
    }

    /// Re-renders the preview for the current selection.
    pub(super) fn refresh_preview(&mut self) {
        match self.nav.selected_entry() {
            Some(entry) => {
                let path = entry.path().to_path_buf();
                self.preview.show(&path, self.nav.show_hidden());
            }
            None => self.preview.clear(),
        }
    }

    /// Makes the registry entry at `index` the active theme.
    pub fn set_active_theme(&mut self, index: usize) {
        let Some(record) = self.themes.themes().get(index).cloned() else {
            return;
        };
        let name = record.name().to_string();
        let mut observers: [&mut dyn ThemeObserver; 1] = [&mut self.preview];
        if self.theme.set(record, &mut observers) {
            self.set_status(format!("Theme: {name}"), StatusLevel::Info);
        }
    }
}
