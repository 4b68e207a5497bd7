//! main.rs
//! Entry point for tern

use tern_tui::app::AppState;
use tern_tui::config::Config;
use tern_tui::core::terminal;
use tern_tui::utils::cli::{CliAction, handle_args};
use tern_tui::utils::{expand_home_path, logging};

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[tern] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let initial_path = match handle_args() {
        CliAction::Exit => return Ok(()),
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path_arg) => {
            let target = expand_home_path(&path_arg);
            if !target.exists() {
                eprintln!("\n[tern] Error: Path '{}' cannot be opened.", path_arg);
                std::process::exit(1);
            }
            Some(target)
        }
    };

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    logging::init(config.general().log_level());
    if let Some(e) = config_error {
        log::warn!("{e}, using default configuration");
    }
    log::info!("tern {} starting", env!("CARGO_PKG_VERSION"));

    let mut app = match initial_path {
        Some(path) => AppState::from_dir(&config, &path)?,
        None => AppState::new(&config)?,
    };
    terminal::run_terminal(&mut app)
}
