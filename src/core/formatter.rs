//! Ordering and display formatting for tern.
//!
//! Holds the listing sort rule shared by the file list and the directory peek,
//! plus the formatting helpers used by the info boxes and the preview pane:
//! permission strings, human readable sizes, timestamps and line sanitising.

use crate::core::fm::{ChildCounts, DirectoryEntry, EntryKind};

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use unicode_width::UnicodeWidthChar;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::time::SystemTime;

/// Directories before files, then case-insensitive name, then the raw name so the
/// order is total.
pub fn compare_listing(
    a_dir: bool,
    a_lower: &str,
    a_raw: &str,
    b_dir: bool,
    b_lower: &str,
    b_raw: &str,
) -> Ordering {
    match (a_dir, b_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a_lower.cmp(b_lower).then_with(|| a_raw.cmp(b_raw)),
    }
}

/// Sorts entries in place with [compare_listing].
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| {
        compare_listing(
            a.is_dir(),
            a.lowercase_name(),
            &a.name_str(),
            b.is_dir(),
            b.lowercase_name(),
            &b.name_str(),
        )
    });
}

/// Formats permission bits in the unix `drwxr-xr-x` style.
///
/// Returns "-" when the mode is unknown.
pub fn format_permissions(kind: EntryKind, mode: Option<u32>) -> String {
    let Some(mode) = mode else {
        return "-".to_string();
    };
    let first = match kind {
        EntryKind::Directory => 'd',
        EntryKind::Symlink => 'l',
        _ => '-',
    };
    let mut chars = [first, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    for (i, shift) in [6u32, 3, 0].into_iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1 != 0 {
            chars[base + 2] = 'x';
        }
    }
    chars.iter().collect()
}

/// Human readable size, "-" for directories and unknown sizes.
pub fn format_file_size(size: Option<u64>, is_dir: bool) -> String {
    match size {
        Some(sz) if !is_dir => format_size(sz, DECIMAL),
        _ => "-".to_string(),
    }
}

pub fn format_file_time(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%Y-%m-%d %H:%M:%S").to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// "N dirs, M files" with singular forms.
pub fn format_child_counts(counts: ChildCounts) -> String {
    let dirs = if counts.dirs == 1 { "dir" } else { "dirs" };
    let files = if counts.files == 1 { "file" } else { "files" };
    format!("{} {dirs}, {} {files}", counts.dirs, counts.files)
}

/// Expands tabs, drops control characters and clips the line to `max_width` columns.
///
/// Returns the cleaned line and whether it was clipped.
pub fn sanitize_line(line: &str, tab_width: usize, max_width: usize) -> (String, bool) {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(line.len().min(max_width));
    let mut current_w = 0;

    for ch in line.chars() {
        if ch == '\t' {
            let space_count = tab_width - (current_w % tab_width);
            if current_w + space_count > max_width {
                return (out, true);
            }
            out.extend(std::iter::repeat_n(' ', space_count));
            current_w += space_count;
            continue;
        }

        if ch.is_control() {
            continue;
        }

        let w = ch.width().unwrap_or(0);
        if current_w + w > max_width {
            return (out, true);
        }
        out.push(ch);
        current_w += w;
    }
    (out, false)
}

/// Normalize separators in a given string to use forward slashes.
pub fn normalize_separators(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn sort_puts_directories_first_case_insensitively() -> Result<(), Box<dyn std::error::Error>>
    {
        let dir = tempdir()?;
        let mut names = vec!["beta.txt", "Alpha.txt", "zeta", "Docs", "apple"];
        names.shuffle(&mut rand::rng());
        for name in &names {
            if name.contains('.') {
                File::create(dir.path().join(name))?;
            } else {
                fs::create_dir(dir.path().join(name))?;
            }
        }

        let mut entries: Vec<DirectoryEntry> = fs::read_dir(dir.path())?
            .filter_map(Result::ok)
            .map(|e| DirectoryEntry::from_path(e.path()))
            .collect();
        sort_entries(&mut entries);

        let sorted: Vec<String> = entries.iter().map(|e| e.name_str().into_owned()).collect();
        assert_eq!(sorted, vec!["apple", "Docs", "zeta", "Alpha.txt", "beta.txt"]);
        Ok(())
    }

    #[test]
    fn permissions_render_unix_style() {
        assert_eq!(
            format_permissions(EntryKind::Directory, Some(0o755)),
            "drwxr-xr-x"
        );
        assert_eq!(format_permissions(EntryKind::File, Some(0o640)), "-rw-r-----");
        assert_eq!(format_permissions(EntryKind::File, None), "-");
    }

    #[test]
    fn sizes_and_counts() {
        let size = format_file_size(Some(1_500), false);
        assert!(size.starts_with("1.5") && size.ends_with("kB"), "{size}");
        assert_eq!(format_file_size(Some(10), true), "-");
        assert_eq!(format_file_size(None, false), "-");
        assert_eq!(
            format_child_counts(ChildCounts { dirs: 1, files: 3 }),
            "1 dir, 3 files"
        );
    }

    #[test]
    fn sanitize_expands_tabs_and_strips_controls() {
        let (line, clipped) = sanitize_line("a\tb\u{7}c", 4, 80);
        assert_eq!(line, "a   bc");
        assert!(!clipped);

        let (line, clipped) = sanitize_line("abcdefgh", 4, 5);
        assert_eq!(line, "abcde");
        assert!(clipped);
    }

    #[test]
    fn separators_are_normalized() {
        assert_eq!(normalize_separators("a\\b\\c.rs"), "a/b/c.rs");
        assert!(matches!(normalize_separators("a/b"), Cow::Borrowed(_)));
    }
}
