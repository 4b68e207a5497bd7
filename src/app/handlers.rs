//! Input action handler methods for tern.
//!
//! This module implements the [AppState] methods that process browsing actions and the keys
//! sent to the open modal.

use crate::app::find_state::FindState;
use crate::app::keymap::{ModalAction, NavAction, SystemAction};
use crate::app::modal::{Modal, SettingsState};
use crate::app::nav::Activation;
use crate::app::state::{AppState, KeypressResult, StatusLevel};
use crate::core::FsError;

use crossterm::event::{KeyCode::*, KeyEvent, KeyModifiers};
use std::path::PathBuf;

impl<'a> AppState<'a> {
    // Browsing

    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        match action {
            NavAction::GoUp => self.move_selection(-1),
            NavAction::GoDown => self.move_selection(1),
            NavAction::Activate => match self.nav.enter_selected() {
                Ok(Activation::Entered) => self.refresh_preview(),
                // the preview already shows the selected file
                Ok(Activation::OpenPreview) | Ok(Activation::Nothing) => {}
                Err(e) => {
                    self.report_error(&e);
                    if matches!(e, FsError::NotFound { .. }) {
                        self.drop_stale_entries();
                    }
                }
            },
            NavAction::GoParent => match self.nav.go_parent() {
                Ok(true) => self.refresh_preview(),
                Ok(false) => {}
                Err(e) => self.report_error(&e),
            },
            NavAction::ToggleHidden => match self.nav.toggle_hidden() {
                Ok(()) => {
                    let text = if self.nav.show_hidden() {
                        "Showing hidden files"
                    } else {
                        "Hiding hidden files"
                    };
                    self.set_status(text, StatusLevel::Info);
                    self.refresh_preview();
                }
                Err(e) => self.report_error(&e),
            },
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_modal_action(&mut self, action: ModalAction) -> KeypressResult {
        let modal = match action {
            ModalAction::Help => Modal::Help,
            ModalAction::Find => {
                let root = self.nav.current_dir().to_path_buf();
                Modal::Fuzzy(Box::new(FindState::from_config(root, self.config.find())))
            }
            ModalAction::Settings => {
                let active = self.themes.position(self.theme.id()).unwrap_or(0);
                Modal::Settings(SettingsState::new(active, self.themes.len()))
            }
        };
        self.modals.push(modal);
        KeypressResult::Consumed
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => KeypressResult::Quit,
        }
    }

    /// Re-lists the current directory after an entry vanished underneath it.
    fn drop_stale_entries(&mut self) {
        match self.nav.reload() {
            Ok(()) => self.refresh_preview(),
            Err(e) => log::warn!("reload of {} failed: {e}", self.nav.current_dir().display()),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let before = self.nav.cursor();
        if self.nav.move_cursor(delta) != before {
            self.refresh_preview();
        }
    }

    // Modals

    /// Routes `key` to the top modal. The directory model is never touched here except by
    /// the final step of a fuzzy selection.
    pub(super) fn handle_modal_key(&mut self, key: KeyEvent) -> KeypressResult {
        let Some(top) = self.modals.top_mut() else {
            return KeypressResult::Continue;
        };
        match top {
            Modal::Help => match key.code {
                Esc | Char('q') => {
                    self.modals.pop();
                    KeypressResult::Consumed
                }
                _ => KeypressResult::Continue,
            },
            Modal::Fuzzy(find) => {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    Esc => {
                        self.modals.pop();
                    }
                    Enter => {
                        let chosen = find
                            .selected_candidate()
                            .map(|c| (c.path().to_path_buf(), c.is_dir()));
                        if let Some((path, is_dir)) = chosen {
                            self.modals.pop();
                            self.open_candidate(path, is_dir);
                        }
                    }
                    Up => find.move_selection(-1),
                    Down => find.move_selection(1),
                    Char('p') if ctrl => find.move_selection(-1),
                    Char('n') if ctrl => find.move_selection(1),
                    Backspace => {
                        find.pop_char();
                    }
                    Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                        find.push_char(c)
                    }
                    _ => return KeypressResult::Continue,
                }
                KeypressResult::Consumed
            }
            Modal::Settings(settings) => {
                match key.code {
                    Esc | Char('q') => {
                        self.modals.pop();
                    }
                    Up | Char('k') => settings.move_selection(-1),
                    Down | Char('j') => settings.move_selection(1),
                    Enter => {
                        let index = settings.selected();
                        self.modals.pop();
                        self.set_active_theme(index);
                    }
                    _ => return KeypressResult::Continue,
                }
                KeypressResult::Consumed
            }
        }
    }

    /// Shows a fuzzy-find result: a directory is opened, a file opens its parent with the
    /// cursor on it.
    fn open_candidate(&mut self, path: PathBuf, is_dir: bool) {
        let result = if is_dir {
            self.nav.open_at(&path, None)
        } else {
            match path.parent() {
                Some(parent) => self.nav.open_at(parent, path.file_name()),
                None => Ok(()),
            }
        };
        match result {
            Ok(()) => self.refresh_preview(),
            Err(e) => self.report_error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::modal::ModalKind;
    use crate::app::state::{AppState, KeypressResult, StatusLevel};
    use crate::config::{Config, ThemeRegistry};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn press(app: &mut AppState, code: KeyCode) -> KeypressResult {
        app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn help_ignores_everything_but_esc_and_q() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        for name in ["a", "b", "c"] {
            File::create(temp.path().join(name))?;
        }
        let mut app = AppState::with_themes(&config, temp.path(), ThemeRegistry::builtin())?;

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.modals().top_kind(), Some(ModalKind::Help));

        assert_eq!(press(&mut app, KeyCode::Char('j')), KeypressResult::Continue);
        press(&mut app, KeyCode::Char('.'));
        assert_eq!(app.nav().cursor(), Some(0));
        assert!(!app.nav().show_hidden());

        assert_eq!(press(&mut app, KeyCode::Char('q')), KeypressResult::Consumed);
        assert!(app.modals().is_empty());
        Ok(())
    }

    #[test]
    fn fuzzy_select_file_opens_parent_on_it() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        let src = temp.path().join("src");
        fs::create_dir(&src)?;
        for name in ["app.rs", "lib.rs", "main.rs"] {
            File::create(src.join(name))?;
        }
        let mut app = AppState::with_themes(&config, temp.path(), ThemeRegistry::builtin())?;

        app.handle_keypress(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL));
        type_str(&mut app, "main");
        press(&mut app, KeyCode::Enter);

        assert!(app.modals().is_empty());
        assert_eq!(app.nav().current_dir(), src.as_path());
        assert_eq!(
            app.nav().selected_entry().map(|e| e.name_str().into_owned()),
            Some("main.rs".to_string())
        );
        assert_eq!(app.preview().target(), Some(src.join("main.rs").as_path()));
        Ok(())
    }

    #[test]
    fn fuzzy_esc_leaves_model_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::create_dir(temp.path().join("docs"))?;
        File::create(temp.path().join("a.txt"))?;
        File::create(temp.path().join("b.txt"))?;
        let mut app = AppState::with_themes(&config, temp.path(), ThemeRegistry::builtin())?;
        press(&mut app, KeyCode::Down);

        app.handle_keypress(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL));
        type_str(&mut app, "jk.q");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Esc);

        assert!(app.modals().is_empty());
        assert_eq!(app.nav().current_dir(), temp.path());
        assert_eq!(app.nav().cursor(), Some(1));
        Ok(())
    }

    #[test]
    fn settings_applies_theme_and_pops() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        let mut app = AppState::with_themes(&config, temp.path(), ThemeRegistry::builtin())?;
        let generation = app.theme().generation();

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.modals().top_kind(), Some(ModalKind::Settings));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);

        assert!(app.modals().is_empty());
        assert_eq!(app.theme().id(), "dracula");
        assert_eq!(app.theme().generation(), generation + 1);
        Ok(())
    }

    #[test]
    fn quit_only_from_browsing() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        let mut app = AppState::with_themes(&config, temp.path(), ThemeRegistry::builtin())?;

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeypressResult::Consumed);
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeypressResult::Quit);
        Ok(())
    }

    #[test]
    fn entering_a_vanished_directory_reports_and_relists() -> Result<(), Box<dyn std::error::Error>>
    {
        let config = Config::default();
        let temp = tempdir()?;
        fs::create_dir(temp.path().join("gone"))?;
        File::create(temp.path().join("kept.txt"))?;
        let mut app = AppState::with_themes(&config, temp.path(), ThemeRegistry::builtin())?;

        fs::remove_dir(temp.path().join("gone"))?;
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.nav().current_dir(), temp.path());
        assert_eq!(app.nav().len(), 1);
        assert_eq!(app.status().map(|s| s.level()), Some(StatusLevel::Error));
        assert_eq!(app.preview().target(), Some(temp.path().join("kept.txt").as_path()));
        Ok(())
    }

    #[test]
    fn activate_and_parent_move_between_directories() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        let sub = temp.path().join("sub");
        fs::create_dir(&sub)?;
        File::create(sub.join("inner.txt"))?;
        let mut app = AppState::with_themes(&config, temp.path(), ThemeRegistry::builtin())?;

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.nav().current_dir(), sub.as_path());
        assert_eq!(app.preview().target(), Some(sub.join("inner.txt").as_path()));

        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.nav().current_dir(), temp.path());
        assert_eq!(app.preview().target(), Some(sub.as_path()));
        Ok(())
    }
}
