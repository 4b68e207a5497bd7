//! Module for mapping file entries to list glyphs.
//!
//! Directories get `▸`. Files are grouped by extension (or by a few well known names) and
//! each group has one glyph. Anything unknown falls back to `·`.

use crate::core::DirectoryEntry;

use phf::phf_map;

pub const DIR_GLYPH: &str = "▸";
pub const DEFAULT_GLYPH: &str = "·";

/// Extension groups shown in the file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileGroup {
    Python,
    Script,
    Document,
    Data,
    Image,
    Archive,
    Other,
}

impl FileGroup {
    pub fn glyph(self) -> &'static str {
        match self {
            FileGroup::Python => "λ",
            FileGroup::Script => "$",
            FileGroup::Document => "≡",
            FileGroup::Data => "◆",
            FileGroup::Image => "◐",
            FileGroup::Archive => "▣",
            FileGroup::Other => DEFAULT_GLYPH,
        }
    }
}

/// File extension to group mapping.
/// Keys are lowercase.
static EXT_GROUP_MAP: phf::Map<&'static str, FileGroup> = phf_map! {
    "py" => FileGroup::Python,
    "pyi" => FileGroup::Python,
    "pyw" => FileGroup::Python,
    "ipynb" => FileGroup::Python,

    "sh" => FileGroup::Script,
    "bash" => FileGroup::Script,
    "zsh" => FileGroup::Script,
    "fish" => FileGroup::Script,
    "ps1" => FileGroup::Script,
    "bat" => FileGroup::Script,
    "cmd" => FileGroup::Script,
    "js" => FileGroup::Script,
    "ts" => FileGroup::Script,
    "rb" => FileGroup::Script,
    "pl" => FileGroup::Script,
    "lua" => FileGroup::Script,

    "md" => FileGroup::Document,
    "markdown" => FileGroup::Document,
    "rst" => FileGroup::Document,
    "txt" => FileGroup::Document,
    "pdf" => FileGroup::Document,
    "doc" => FileGroup::Document,
    "docx" => FileGroup::Document,
    "odt" => FileGroup::Document,
    "rtf" => FileGroup::Document,
    "tex" => FileGroup::Document,
    "org" => FileGroup::Document,

    "json" => FileGroup::Data,
    "toml" => FileGroup::Data,
    "yaml" => FileGroup::Data,
    "yml" => FileGroup::Data,
    "xml" => FileGroup::Data,
    "csv" => FileGroup::Data,
    "tsv" => FileGroup::Data,
    "ini" => FileGroup::Data,
    "cfg" => FileGroup::Data,
    "conf" => FileGroup::Data,
    "sql" => FileGroup::Data,
    "db" => FileGroup::Data,
    "sqlite" => FileGroup::Data,
    "lock" => FileGroup::Data,

    "png" => FileGroup::Image,
    "jpg" => FileGroup::Image,
    "jpeg" => FileGroup::Image,
    "gif" => FileGroup::Image,
    "bmp" => FileGroup::Image,
    "svg" => FileGroup::Image,
    "webp" => FileGroup::Image,
    "ico" => FileGroup::Image,
    "tiff" => FileGroup::Image,
    "psd" => FileGroup::Image,

    "zip" => FileGroup::Archive,
    "tar" => FileGroup::Archive,
    "gz" => FileGroup::Archive,
    "tgz" => FileGroup::Archive,
    "bz2" => FileGroup::Archive,
    "xz" => FileGroup::Archive,
    "zst" => FileGroup::Archive,
    "7z" => FileGroup::Archive,
    "rar" => FileGroup::Archive,
    "deb" => FileGroup::Archive,
    "rpm" => FileGroup::Archive,
    "jar" => FileGroup::Archive,
    "iso" => FileGroup::Archive,
};

/// Special file names
/// Matched before the extension.
static SPECIAL_FILE_MAP: phf::Map<&'static str, FileGroup> = phf_map! {
    "Makefile" => FileGroup::Script,
    "Dockerfile" => FileGroup::Script,
    "PKGBUILD" => FileGroup::Script,
    ".bashrc" => FileGroup::Script,
    ".zshrc" => FileGroup::Script,
    "README" => FileGroup::Document,
    "LICENSE" => FileGroup::Document,
    "COPYING" => FileGroup::Document,
    "TODO" => FileGroup::Document,
    ".env" => FileGroup::Data,
    ".gitignore" => FileGroup::Data,
    "requirements.txt" => FileGroup::Python,
    "setup.py" => FileGroup::Python,
    "Pipfile" => FileGroup::Python,
};

/// Group of a file named `name`.
pub fn file_group(name: &str) -> FileGroup {
    if let Some(group) = SPECIAL_FILE_MAP.get(name) {
        return *group;
    }

    if let Some(dot_idx) = name.rfind('.')
        && dot_idx > 0
        && dot_idx < name.len() - 1
    {
        let ext = name[dot_idx + 1..].to_ascii_lowercase();
        if let Some(group) = EXT_GROUP_MAP.get(ext.as_str()) {
            return *group;
        }
    }
    FileGroup::Other
}

/// Glyph shown in front of `entry` in the file list.
pub fn entry_glyph(entry: &DirectoryEntry) -> &'static str {
    if entry.is_dir() {
        return DIR_GLYPH;
    }
    file_group(&entry.name_str()).glyph()
}
