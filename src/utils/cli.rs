//! Command-line argument parsing and help for tern.
//!
//! This module handles the flags used for help, version, config initialization and the
//! key binding listing.
//!
//! When invoked with no args/flags (tern), tern simply launches the TUI in the current
//! directory.

use crate::app::Keymap;
use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

/// Parses the process arguments and runs any flag that exits immediately.
pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

/// Parses `args` (without the program name).
pub fn parse_args(args: &[String]) -> CliAction {
    let Some(first) = args.first() else {
        return CliAction::RunApp;
    };

    if args.len() > 1 {
        eprintln!("Error: tern accepts only one argument at a time.");
        eprintln!("Usage: tern [PATH] or tern [OPTION]");
        return CliAction::Exit;
    }

    match first.as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--keybinds" => {
            print_keybinds();
            CliAction::Exit
        }
        "--init" => {
            let config_path = Config::default_path();
            match Config::generate_default(&config_path) {
                Ok(()) => println!("Default config written to {}", config_path.display()),
                Err(e) => eprintln!("Error: {}", e),
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            print_help();
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("tern {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"tern - A keyboard-driven terminal file browser

USAGE:
  tern [PATH]

PATH:
  Directory to open (defaults to current directory).
  A file opens its directory with the file selected.

OPTIONS:
      --init              Generate the default configuration file
      --keybinds          Display the active key bindings
  -h, --help              Print help information
  -v, --version           Display the current installed version of tern

ENVIRONMENT:
  TERN_CONFIG             Override the default config path
  TERN_LOG                Override the log level (off, error, warn, info, debug, trace)
"#
    );
}

/// Key binding table for the loaded config, one action per line.
pub fn keybinds_text(config: &Config) -> String {
    let keymap = Keymap::from_config(config);
    let mut out = String::from("Key bindings\n\n");
    for (action, keys) in keymap.bindings() {
        let labels = keys.iter().map(|k| k.label()).collect::<Vec<_>>().join(", ");
        out.push_str(&format!("  {:<24}{}\n", labels, action.description()));
    }
    out.push_str(&format!("  {:<24}{}\n", "Esc", "Close the open dialog"));
    out
}

fn print_keybinds() {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {e}, showing the default bindings");
        Config::default()
    });
    print!("{}", keybinds_text(&config));
}
