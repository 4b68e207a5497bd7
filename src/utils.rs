//! Miscellaneous utility functions for tern.
//!
//! - [helpers]: colour parsing, path resolution, home-path expansion and shortening, setting clamps.
//! - [cli]: command-line flags.
//! - [logging]: the file logger.

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{
    clamp_setting, expand_home_path, get_home, readable_path, resolve_path, shorten_home_path,
    try_parse_color,
};
