//! Key mapping and action dispatch for tern.
//!
//! Maps key events to actions, parsing the key strings from the config.

use crate::config::Config;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in browsing mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Nav(NavAction),
    Modal(ModalAction),
    System(SystemAction),
}

/// Actions that change the directory model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    GoUp,
    GoDown,
    GoParent,
    Activate,
    ToggleHidden,
}

/// Actions that open a modal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModalAction {
    Find,
    Help,
    Settings,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
}

impl Action {
    /// Human readable description used by the help dialog.
    pub fn description(&self) -> &'static str {
        match self {
            Action::Nav(NavAction::GoDown) => "Move selection down",
            Action::Nav(NavAction::GoUp) => "Move selection up",
            Action::Nav(NavAction::Activate) => "Enter directory or select file",
            Action::Nav(NavAction::GoParent) => "Go back to parent directory",
            Action::Nav(NavAction::ToggleHidden) => "Toggle hidden files",
            Action::Modal(ModalAction::Find) => "Fuzzy find files",
            Action::Modal(ModalAction::Settings) => "Settings (change color scheme)",
            Action::Modal(ModalAction::Help) => "Show this help",
            Action::System(SystemAction::Quit) => "Quit application",
        }
    }
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    /// Display form such as "Ctrl+F", "Enter" or "j".
    pub fn label(&self) -> String {
        let mut out = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            out.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            out.push_str("Alt+");
        }
        match self.code {
            KeyCode::Char(' ') => out.push_str("Space"),
            KeyCode::Char(c) if self.modifiers.contains(KeyModifiers::CONTROL) => {
                out.push(c.to_ascii_uppercase())
            }
            KeyCode::Char(c) => out.push(c),
            KeyCode::Up => out.push_str("Up"),
            KeyCode::Down => out.push_str("Down"),
            KeyCode::Left => out.push_str("Left"),
            KeyCode::Right => out.push_str("Right"),
            KeyCode::Enter => out.push_str("Enter"),
            KeyCode::Esc => out.push_str("Esc"),
            KeyCode::Backspace => out.push_str("Backspace"),
            KeyCode::Tab => out.push_str("Tab"),
            KeyCode::F(n) => out.push_str(&format!("F{n}")),
            other => out.push_str(&format!("{other:?}")),
        }
        out
    }
}

/// Mapping from key to action, built from the config.
///
/// Bindings keep their configured order so the help dialog lists them as written.
pub struct Keymap {
    map: HashMap<Key, Action>,
    bindings: Vec<(Action, Vec<Key>)>,
}

impl Keymap {
    #[rustfmt::skip]
    pub fn from_config(config: &Config) -> Self {
        let mut map = HashMap::new();
        let mut bindings = Vec::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bindings.push(($action, bind($keys, $action, &mut map)));
            };
        }

        use NavAction as N;
        use ModalAction as M;
        use SystemAction as S;

        bind!(keys.go_down(),       Action::Nav(N::GoDown));
        bind!(keys.go_up(),         Action::Nav(N::GoUp));
        bind!(keys.activate(),      Action::Nav(N::Activate));
        bind!(keys.go_parent(),     Action::Nav(N::GoParent));
        bind!(keys.toggle_hidden(), Action::Nav(N::ToggleHidden));

        bind!(keys.find(),          Action::Modal(M::Find));
        bind!(keys.settings(),      Action::Modal(M::Settings));
        bind!(keys.help(),          Action::Modal(M::Help));

        bind!(keys.quit(),          Action::System(S::Quit));

        Keymap { map, bindings }
    }

    /// Looks up the action for a given key event.
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }

    /// Every action with the keys bound to it, in display order.
    pub fn bindings(&self) -> &[(Action, Vec<Key>)] {
        &self.bindings
    }

    /// Keys bound to `action`.
    pub fn keys_for(&self, action: Action) -> &[Key] {
        self.bindings
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, keys)| keys.as_slice())
            .unwrap_or(&[])
    }
}

pub(crate) fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    // a lone "+" or "-" is the key itself, not a separator
    if input == "+" || input == "-" {
        return Some(Key {
            code: KeyCode::Char(input.chars().next()?),
            modifiers,
        });
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    } else if modifiers.contains(KeyModifiers::CONTROL) {
                        c = c.to_ascii_lowercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) -> Vec<Key> {
    let mut bound = Vec::with_capacity(key_list.len());
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
                bound.push(key);
            }
            None => log::warn!("ignoring unparseable key binding '{k}'"),
        }
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_key_syntaxes() {
        assert_eq!(
            parse_key("Ctrl+f"),
            Some(Key {
                code: KeyCode::Char('f'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(parse_key("<c-f>"), parse_key("Ctrl+f"));
        assert_eq!(parse_key("Ctrl+F"), parse_key("Ctrl+f"));
        assert_eq!(parse_key("Enter").map(|k| k.code), Some(KeyCode::Enter));
        assert_eq!(parse_key(".").map(|k| k.code), Some(KeyCode::Char('.')));
        assert_eq!(parse_key("-").map(|k| k.code), Some(KeyCode::Char('-')));
        assert_eq!(parse_key("f5").map(|k| k.code), Some(KeyCode::F(5)));
        assert_eq!(parse_key("hyper+x"), None);
    }

    #[test]
    fn default_bindings_resolve() {
        let keymap = Keymap::from_config(&Config::default());
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::GoDown))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Down, KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::GoDown))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('f'), KeyModifiers::CONTROL)),
            Some(Action::Modal(ModalAction::Find))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('/'), KeyModifiers::NONE)),
            Some(Action::Modal(ModalAction::Help))
        );
        assert_eq!(keymap.lookup(press(KeyCode::Esc, KeyModifiers::NONE)), None);
    }

    #[test]
    fn shifted_punctuation_falls_back_to_unshifted() {
        let keymap = Keymap::from_config(&Config::default());
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('/'), KeyModifiers::SHIFT)),
            Some(Action::Modal(ModalAction::Help))
        );
    }

    #[test]
    fn labels_read_like_help_rows() {
        let keymap = Keymap::from_config(&Config::default());
        let labels: Vec<String> = keymap
            .keys_for(Action::Modal(ModalAction::Find))
            .iter()
            .map(Key::label)
            .collect();
        assert_eq!(labels, vec!["Ctrl+F".to_string()]);
        assert_eq!(keymap.bindings().len(), 9);
    }
}
