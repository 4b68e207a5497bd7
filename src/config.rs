//! Configuration for tern.
//!
//! - [load]: the [Config] struct, config file discovery and `--init`.
//! - [general]: the `[general]` table.
//! - [options]: the `[preview]` and `[find]` tables.
//! - [input]: the `[keys]` table.
//! - [theme]: palettes, the theme registry and the active theme.
//! - [presets]: built-in colour schemes.

pub mod general;
pub mod input;
pub mod load;
pub mod options;
pub mod presets;
pub mod theme;

pub use general::{General, InternalGeneral};
pub use input::Keys;
pub use load::{Config, ConfigError};
pub use options::{FindOptions, PreviewOptions};
pub use theme::{ActiveTheme, Palette, ThemeObserver, ThemeRecord, ThemeRegistry};
