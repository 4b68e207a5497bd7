//! Directory listing for tern.
//!
//! Provides [DirectoryEntry], the per-node record shown in the file list and info boxes,
//! and [read_entries], which enumerates the direct children of a directory.
//! Entries that cannot be `stat`'d are still listed, with their metadata left empty.

use crate::core::error::{FsError, FsResult};
use crate::core::formatter::sort_entries;

use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Coarse kind of a filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

/// Direct child counts of a directory. Hidden children are included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChildCounts {
    pub dirs: usize,
    pub files: usize,
}

impl ChildCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.dirs + self.files
    }
}

/// A single node of a directory listing.
///
/// `size`, `modified` and `mode` are `None` when the entry could not be stat'd;
/// such entries carry the `IS_UNREADABLE` flag.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    path: PathBuf,
    name: Box<OsStr>,
    lowercase_name: Box<str>,
    kind: EntryKind,
    flags: u8,
    size: Option<u64>,
    modified: Option<SystemTime>,
    mode: Option<u32>,
    children: Option<ChildCounts>,
}

impl DirectoryEntry {
    pub(crate) const IS_DIR: u8 = 1 << 0;
    pub(crate) const IS_HIDDEN: u8 = 1 << 1;
    pub(crate) const IS_SYMLINK: u8 = 1 << 2;
    pub(crate) const IS_BROKEN_SYM: u8 = 1 << 3;
    pub(crate) const IS_EXECUTABLE: u8 = 1 << 4;
    pub(crate) const IS_UNREADABLE: u8 = 1 << 5;

    #[cfg(unix)]
    const EXEC_FLAG: u32 = 0o111;

    /// Builds an entry for `path`, reading its metadata.
    ///
    /// Never fails: a failed `stat` yields an entry marked unreadable.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| path.as_os_str().to_os_string());

        let link_meta = fs::symlink_metadata(&path).ok();
        let is_symlink = link_meta
            .as_ref()
            .is_some_and(|m| m.file_type().is_symlink());

        let meta = if is_symlink {
            fs::metadata(&path).ok()
        } else {
            link_meta
        };

        let mut flags = 0u8;
        if is_hidden_name(&name) {
            flags |= Self::IS_HIDDEN;
        }
        if is_symlink {
            flags |= Self::IS_SYMLINK;
            if meta.is_none() {
                flags |= Self::IS_BROKEN_SYM;
            }
        }

        let Some(meta) = meta else {
            if !is_symlink {
                flags |= Self::IS_UNREADABLE;
            }
            let kind = if is_symlink {
                EntryKind::Symlink
            } else {
                EntryKind::Other
            };
            return Self::new(path, name, kind, flags, None);
        };

        let kind = if is_symlink {
            EntryKind::Symlink
        } else if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        if meta.is_dir() {
            flags |= Self::IS_DIR;
        }
        if is_executable(&meta) {
            flags |= Self::IS_EXECUTABLE;
        }

        let mut entry = Self::new(path, name, kind, flags, Some(&meta));
        if entry.is_dir() {
            entry.children = child_counts(&entry.path).ok();
        }
        entry
    }

    fn new(
        path: PathBuf,
        name: OsString,
        kind: EntryKind,
        flags: u8,
        meta: Option<&Metadata>,
    ) -> Self {
        let lowercase_name = name.to_string_lossy().to_lowercase().into_boxed_str();
        let is_file = meta.is_some_and(|m| m.is_file());
        Self {
            path,
            name: name.into_boxed_os_str(),
            lowercase_name,
            kind,
            flags,
            size: meta.filter(|_| is_file).map(Metadata::len),
            modified: meta.and_then(|m| m.modified().ok()),
            mode: meta.map(permission_bits),
            children: None,
        }
    }

    // Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> std::borrow::Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn lowercase_name(&self) -> &str {
        &self.lowercase_name
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn mode(&self) -> Option<u32> {
        self.mode
    }

    #[inline]
    pub fn children(&self) -> Option<ChildCounts> {
        self.children
    }

    /// True for directories and for symlinks that resolve to one.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    #[inline]
    pub fn is_broken_symlink(&self) -> bool {
        self.flags & Self::IS_BROKEN_SYM != 0
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.flags & Self::IS_EXECUTABLE != 0
    }

    #[inline]
    pub fn is_unreadable(&self) -> bool {
        self.flags & (Self::IS_UNREADABLE | Self::IS_BROKEN_SYM) != 0
    }
}

/// Hidden entries start with a dot.
#[inline]
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

#[cfg(unix)]
fn permission_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(meta: &Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

#[cfg(unix)]
fn is_executable(meta: &Metadata) -> bool {
    meta.is_file() && permission_bits(meta) & DirectoryEntry::EXEC_FLAG != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &Metadata) -> bool {
    false
}

/// Reads the direct children of `path`, filtered by `show_hidden` and sorted
/// directories first, then case-insensitively by name.
pub fn read_entries(path: &Path, show_hidden: bool) -> FsResult<Vec<DirectoryEntry>> {
    let meta = fs::metadata(path).map_err(|e| FsError::io(path, e))?;
    if !meta.is_dir() {
        return Err(FsError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let mut entries = Vec::with_capacity(64);
    for entry in fs::read_dir(path).map_err(|e| FsError::io(path, e))? {
        // entries can vanish between readdir and stat
        let Ok(entry) = entry else { continue };
        if !show_hidden && is_hidden_name(&entry.file_name()) {
            continue;
        }
        entries.push(DirectoryEntry::from_path(entry.path()));
    }

    sort_entries(&mut entries);
    Ok(entries)
}

/// Counts the direct subdirectories and files of `path`, without following symlinks.
pub fn child_counts(path: &Path) -> FsResult<ChildCounts> {
    let mut counts = ChildCounts::default();
    for entry in fs::read_dir(path).map_err(|e| FsError::io(path, e))? {
        let Ok(entry) = entry else { continue };
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => counts.dirs += 1,
            _ => counts.files += 1,
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn entry_from_file_has_metadata() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let file_path = tmp.path().join("hello.txt");
        let mut file = File::create(&file_path)?;
        write!(file, "abc123")?;

        let entry = DirectoryEntry::from_path(file_path.clone());
        assert_eq!(entry.kind(), EntryKind::File);
        assert_eq!(entry.name_str(), "hello.txt");
        assert_eq!(entry.size(), Some(6));
        assert!(entry.mode().is_some());
        assert!(entry.modified().is_some());
        assert!(!entry.is_dir());
        assert_eq!(entry.path(), file_path);
        Ok(())
    }

    #[test]
    fn entry_from_directory_counts_children() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let dir = tmp.path().join("sub");
        fs::create_dir(&dir)?;
        fs::create_dir(dir.join("inner"))?;
        File::create(dir.join("a.txt"))?;
        File::create(dir.join(".hidden"))?;

        let entry = DirectoryEntry::from_path(dir);
        assert_eq!(entry.kind(), EntryKind::Directory);
        assert!(entry.is_dir());
        assert_eq!(entry.size(), None);
        assert_eq!(entry.children(), Some(ChildCounts { dirs: 1, files: 2 }));
        Ok(())
    }

    #[test]
    fn vanished_entry_is_marked_unreadable() {
        let entry = DirectoryEntry::from_path(PathBuf::from("/path/does/not/exist/x"));
        assert!(entry.is_unreadable());
        assert_eq!(entry.size(), None);
        assert_eq!(entry.mode(), None);
    }

    #[cfg(unix)]
    #[test]
    fn broken_symlink_is_listed() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let link = tmp.path().join("dangling");
        std::os::unix::fs::symlink(tmp.path().join("missing"), &link)?;

        let entries = read_entries(tmp.path(), false)?;
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_symlink());
        assert!(entries[0].is_broken_symlink());
        assert!(entries[0].is_unreadable());
        Ok(())
    }

    #[test]
    fn read_entries_filters_hidden() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join(".secret"))?;
        File::create(tmp.path().join("visible"))?;

        let shown = read_entries(tmp.path(), false)?;
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name_str(), "visible");

        let all = read_entries(tmp.path(), true)?;
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|e| e.is_hidden()));
        Ok(())
    }

    #[test]
    fn read_entries_nonexistent() {
        let result = read_entries(Path::new("/path/does/not/exist"), false);
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn read_entries_on_file() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let file = tmp.path().join("plain.txt");
        File::create(&file)?;
        let result = read_entries(&file, false);
        assert!(matches!(result, Err(FsError::NotADirectory { .. })));
        Ok(())
    }
}
