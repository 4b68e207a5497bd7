//! Built-in colour schemes for tern.
//!
//! Each preset is a [Palette] plus an id and a display name. Tokyo Night is the default.

use crate::config::theme::{Palette, ThemeRecord};
use ratatui::style::Color;

pub const DEFAULT_THEME_ID: &str = "tokyo-night";

pub const TOKYO_NIGHT: Palette = Palette {
    background: Color::Rgb(0x1a, 0x1b, 0x26),
    surface: Color::Rgb(0x1f, 0x23, 0x35),
    surface_light: Color::Rgb(0x24, 0x28, 0x3b),
    text: Color::Rgb(0xc0, 0xca, 0xf5),
    blue: Color::Rgb(0x7a, 0xa2, 0xf7),
    cyan: Color::Rgb(0x7d, 0xcf, 0xff),
    green: Color::Rgb(0x9e, 0xce, 0x6a),
    purple: Color::Rgb(0x9d, 0x7c, 0xd8),
    purple_light: Color::Rgb(0xbb, 0x9a, 0xf7),
    pink: Color::Rgb(0xf7, 0x76, 0x8e),
    yellow: Color::Rgb(0xe0, 0xaf, 0x68),
    orange: Color::Rgb(0xff, 0x9e, 0x64),
    border: Color::Rgb(0x56, 0x5f, 0x89),
};

const DRACULA: Palette = Palette {
    background: Color::Rgb(0x28, 0x2a, 0x36),
    surface: Color::Rgb(0x21, 0x22, 0x2c),
    surface_light: Color::Rgb(0x34, 0x37, 0x46),
    text: Color::Rgb(0xf8, 0xf8, 0xf2),
    blue: Color::Rgb(0x62, 0x72, 0xa4),
    cyan: Color::Rgb(0x8b, 0xe9, 0xfd),
    green: Color::Rgb(0x50, 0xfa, 0x7b),
    purple: Color::Rgb(0xbd, 0x93, 0xf9),
    purple_light: Color::Rgb(0xbd, 0x93, 0xf9),
    pink: Color::Rgb(0xff, 0x79, 0xc6),
    yellow: Color::Rgb(0xf1, 0xfa, 0x8c),
    orange: Color::Rgb(0xff, 0xb8, 0x6c),
    border: Color::Rgb(0x44, 0x47, 0x5a),
};

const NORD: Palette = Palette {
    background: Color::Rgb(0x2e, 0x34, 0x40),
    surface: Color::Rgb(0x3b, 0x42, 0x52),
    surface_light: Color::Rgb(0x43, 0x4c, 0x5e),
    text: Color::Rgb(0xec, 0xef, 0xf4),
    blue: Color::Rgb(0x5e, 0x81, 0xac),
    cyan: Color::Rgb(0x88, 0xc0, 0xd0),
    green: Color::Rgb(0xa3, 0xbe, 0x8c),
    purple: Color::Rgb(0xb4, 0x8e, 0xad),
    purple_light: Color::Rgb(0xb4, 0x8e, 0xad),
    pink: Color::Rgb(0xd0, 0x87, 0x70),
    yellow: Color::Rgb(0xeb, 0xcb, 0x8b),
    orange: Color::Rgb(0xd0, 0x87, 0x70),
    border: Color::Rgb(0x4c, 0x56, 0x6a),
};

const CATPPUCCIN_MOCHA: Palette = Palette {
    background: Color::Rgb(0x1e, 0x1e, 0x2e),
    surface: Color::Rgb(0x18, 0x18, 0x25),
    surface_light: Color::Rgb(0x31, 0x32, 0x44),
    text: Color::Rgb(0xcd, 0xd6, 0xf4),
    blue: Color::Rgb(0x89, 0xb4, 0xfa),
    cyan: Color::Rgb(0x89, 0xdc, 0xeb),
    green: Color::Rgb(0xa6, 0xe3, 0xa1),
    purple: Color::Rgb(0xcb, 0xa6, 0xf7),
    purple_light: Color::Rgb(0xf5, 0xc2, 0xe7),
    pink: Color::Rgb(0xf5, 0xc2, 0xe7),
    yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
    orange: Color::Rgb(0xfa, 0xb3, 0x87),
    border: Color::Rgb(0x45, 0x47, 0x5a),
};

const GRUVBOX_DARK: Palette = Palette {
    background: Color::Rgb(0x28, 0x28, 0x28),
    surface: Color::Rgb(0x1d, 0x20, 0x21),
    surface_light: Color::Rgb(0x3c, 0x38, 0x36),
    text: Color::Rgb(0xeb, 0xdb, 0xb2),
    blue: Color::Rgb(0x45, 0x85, 0x88),
    cyan: Color::Rgb(0x68, 0x9d, 0x6a),
    green: Color::Rgb(0x98, 0x97, 0x1a),
    purple: Color::Rgb(0xb1, 0x62, 0x86),
    purple_light: Color::Rgb(0xd3, 0x86, 0x9b),
    pink: Color::Rgb(0xd3, 0x86, 0x9b),
    yellow: Color::Rgb(0xd7, 0x99, 0x21),
    orange: Color::Rgb(0xd6, 0x5d, 0x0e),
    border: Color::Rgb(0x50, 0x49, 0x45),
};

const SOLARIZED_DARK: Palette = Palette {
    background: Color::Rgb(0x00, 0x2b, 0x36),
    surface: Color::Rgb(0x07, 0x36, 0x42),
    surface_light: Color::Rgb(0x07, 0x36, 0x42),
    text: Color::Rgb(0x83, 0x94, 0x96),
    blue: Color::Rgb(0x26, 0x8b, 0xd2),
    cyan: Color::Rgb(0x2a, 0xa1, 0x98),
    green: Color::Rgb(0x85, 0x99, 0x00),
    purple: Color::Rgb(0x6c, 0x71, 0xc4),
    purple_light: Color::Rgb(0xd3, 0x36, 0x82),
    pink: Color::Rgb(0xd3, 0x36, 0x82),
    yellow: Color::Rgb(0xb5, 0x89, 0x00),
    orange: Color::Rgb(0xcb, 0x4b, 0x16),
    border: Color::Rgb(0x58, 0x6e, 0x75),
};

const ONE_DARK: Palette = Palette {
    background: Color::Rgb(0x28, 0x2c, 0x34),
    surface: Color::Rgb(0x21, 0x25, 0x2b),
    surface_light: Color::Rgb(0x2c, 0x31, 0x3c),
    text: Color::Rgb(0xab, 0xb2, 0xbf),
    blue: Color::Rgb(0x61, 0xaf, 0xef),
    cyan: Color::Rgb(0x56, 0xb6, 0xc2),
    green: Color::Rgb(0x98, 0xc3, 0x79),
    purple: Color::Rgb(0xc6, 0x78, 0xdd),
    purple_light: Color::Rgb(0xc6, 0x78, 0xdd),
    pink: Color::Rgb(0xe0, 0x6c, 0x75),
    yellow: Color::Rgb(0xe5, 0xc0, 0x7b),
    orange: Color::Rgb(0xd1, 0x9a, 0x66),
    border: Color::Rgb(0x3e, 0x44, 0x51),
};

const MONOKAI_PRO: Palette = Palette {
    background: Color::Rgb(0x2d, 0x2a, 0x2e),
    surface: Color::Rgb(0x22, 0x1f, 0x22),
    surface_light: Color::Rgb(0x40, 0x3e, 0x41),
    text: Color::Rgb(0xfc, 0xfc, 0xfa),
    blue: Color::Rgb(0x78, 0xdc, 0xe8),
    cyan: Color::Rgb(0x78, 0xdc, 0xe8),
    green: Color::Rgb(0xa9, 0xdc, 0x76),
    purple: Color::Rgb(0xab, 0x9d, 0xf2),
    purple_light: Color::Rgb(0xab, 0x9d, 0xf2),
    pink: Color::Rgb(0xff, 0x61, 0x88),
    yellow: Color::Rgb(0xff, 0xd8, 0x66),
    orange: Color::Rgb(0xfc, 0x98, 0x67),
    border: Color::Rgb(0x5b, 0x59, 0x5c),
};

/// All presets in presentation order.
pub fn builtin_themes() -> Vec<ThemeRecord> {
    [
        (DEFAULT_THEME_ID, "Tokyo Night", TOKYO_NIGHT),
        ("dracula", "Dracula", DRACULA),
        ("nord", "Nord", NORD),
        ("catppuccin-mocha", "Catppuccin Mocha", CATPPUCCIN_MOCHA),
        ("gruvbox-dark", "Gruvbox Dark", GRUVBOX_DARK),
        ("solarized-dark", "Solarized Dark", SOLARIZED_DARK),
        ("one-dark", "One Dark", ONE_DARK),
        ("monokai-pro", "Monokai Pro", MONOKAI_PRO),
    ]
    .into_iter()
    .map(|(id, name, palette)| ThemeRecord::new(id, name, true, palette))
    .collect()
}
