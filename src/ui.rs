//! Terminal UI for tern, drawn with ratatui.
//!
//! - [render]: the per-frame entry point and screen layout.
//! - [panes]: info boxes, file list and preview pane.
//! - [widgets]: dialog helpers plus the status line and modal dialogs.
//! - [icons]: file list glyphs.

pub mod icons;
pub mod panes;
pub mod render;
pub mod widgets;

pub use render::render;
