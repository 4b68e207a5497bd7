//! Key configuration for tern.
//!
//! Each action maps to a list of key strings read from the `[keys]` table of tern.toml.
//! The strings are parsed into key events by [crate::app::keymap].

use serde::Deserialize;

/// Key strings per action.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    go_up: Vec<String>,
    go_down: Vec<String>,
    go_parent: Vec<String>,
    activate: Vec<String>,
    toggle_hidden: Vec<String>,
    find: Vec<String>,
    help: Vec<String>,
    settings: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    go_up,
    go_down,
    go_parent,
    activate,
    toggle_hidden,
    find,
    help,
    settings,
    quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            go_up: vec!["k".into(), "Up".into()],
            go_down: vec!["j".into(), "Down".into()],
            go_parent: vec!["h".into()],
            activate: vec!["l".into(), "Enter".into()],
            toggle_hidden: vec![".".into()],

            find: vec!["Ctrl+f".into()],
            help: vec!["/".into()],
            settings: vec!["s".into()],

            quit: vec!["q".into(), "Ctrl+c".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_other_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let keys: Keys = toml::from_str(r#"find = ["<c-p>"]"#)?;
        assert_eq!(keys.find(), ["<c-p>".to_string()]);
        assert_eq!(keys.go_down(), ["j".to_string(), "Down".to_string()]);
        Ok(())
    }
}
