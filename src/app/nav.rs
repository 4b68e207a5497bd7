//! Directory model for tern.
//!
//! [DirectoryModel] is the single source of truth for the current directory, its sorted
//! entries, the cursor and the hidden-file flag. Every directory change rebuilds the entry
//! list from disk. A failed load leaves the model untouched.

use crate::core::{DirectoryEntry, FsResult, read_entries};
use crate::utils::resolve_path;

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// What [DirectoryModel::enter_selected] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The selected directory is now the current one.
    Entered,
    /// The selection is a file. The model is unchanged.
    OpenPreview,
    /// Nothing is selected.
    Nothing,
}

/// Cursor remembered for a directory that was left.
#[derive(Debug, Clone)]
struct SavedPosition {
    index: usize,
    name: OsString,
}

#[derive(Debug)]
pub struct DirectoryModel {
    current_dir: PathBuf,
    entries: Vec<DirectoryEntry>,
    cursor: Option<usize>,
    show_hidden: bool,
    positions: HashMap<PathBuf, SavedPosition>,
}

impl DirectoryModel {
    /// Lists `path` (direct children only) with the cursor on the first entry.
    pub fn load(path: &Path, show_hidden: bool) -> FsResult<Self> {
        let path = resolve_path(path);
        let entries = read_entries(&path, show_hidden)?;
        let cursor = if entries.is_empty() { None } else { Some(0) };
        Ok(Self {
            current_dir: path,
            entries,
            cursor,
            show_hidden,
            positions: HashMap::new(),
        })
    }

    /// A valid model with no entries, used when the very first load fails.
    pub fn empty(path: &Path, show_hidden: bool) -> Self {
        Self {
            current_dir: resolve_path(path),
            entries: Vec::new(),
            cursor: None,
            show_hidden,
            positions: HashMap::new(),
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    // Navigation

    /// Moves the cursor by `delta`, clamped to the entry range. Never wraps.
    pub fn move_cursor(&mut self, delta: isize) -> Option<usize> {
        let cursor = self.cursor?;
        let last = self.entries.len().saturating_sub(1);
        let next = cursor.saturating_add_signed(delta).min(last);
        self.cursor = Some(next);
        self.cursor
    }

    /// Enters the selected directory, or reports that a file is selected.
    ///
    /// Returning to a directory later restores the cursor that was saved here.
    pub fn enter_selected(&mut self) -> FsResult<Activation> {
        let Some(entry) = self.selected_entry() else {
            return Ok(Activation::Nothing);
        };
        if !entry.is_dir() {
            return Ok(Activation::OpenPreview);
        }
        let target = entry.path().to_path_buf();
        self.change_dir(target, None)?;
        Ok(Activation::Entered)
    }

    /// Loads the parent directory with the cursor on the directory just left.
    ///
    /// Returns false at the filesystem root.
    pub fn go_parent(&mut self) -> FsResult<bool> {
        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            return Ok(false);
        };
        let child = self.current_dir.file_name().map(OsStr::to_os_string);
        self.change_dir(parent, child.as_deref())?;
        Ok(true)
    }

    /// Re-lists the current directory with the hidden flag flipped. The cursor resets to 0.
    pub fn toggle_hidden(&mut self) -> FsResult<()> {
        let show_hidden = !self.show_hidden;
        let entries = read_entries(&self.current_dir, show_hidden)?;
        self.show_hidden = show_hidden;
        self.replace(self.current_dir.clone(), entries, Some(0));
        Ok(())
    }

    /// Loads `dir` with the cursor on `focus` when present.
    pub fn open_at(&mut self, dir: &Path, focus: Option<&OsStr>) -> FsResult<()> {
        self.change_dir(resolve_path(dir), focus)
    }

    /// Re-lists the current directory keeping the cursor on the same name when possible.
    pub fn reload(&mut self) -> FsResult<()> {
        let entries = read_entries(&self.current_dir, self.show_hidden)?;
        let focus = self.selected_entry().map(|e| e.name().to_os_string());
        let fallback = self.cursor.unwrap_or(0);
        let index = focus
            .as_deref()
            .and_then(|name| entries.iter().position(|e| e.name() == name))
            .unwrap_or(fallback);
        self.replace(self.current_dir.clone(), entries, Some(index));
        Ok(())
    }

    fn save_position(&mut self) {
        if let (Some(index), Some(entry)) = (self.cursor, self.selected_entry()) {
            let name = entry.name().to_os_string();
            self.positions
                .insert(self.current_dir.clone(), SavedPosition { index, name });
        }
    }

    /// Lists `dir` and swaps it in. On error nothing changes.
    fn change_dir(&mut self, dir: PathBuf, focus: Option<&OsStr>) -> FsResult<()> {
        let entries = read_entries(&dir, self.show_hidden)?;
        self.save_position();

        let index = match focus {
            Some(name) => entries.iter().position(|e| e.name() == name).unwrap_or(0),
            None => match self.positions.get(&dir) {
                Some(saved) => entries
                    .iter()
                    .position(|e| e.name() == saved.name.as_os_str())
                    .unwrap_or(saved.index),
                None => 0,
            },
        };
        log::debug!("entered {} ({} entries)", dir.display(), entries.len());
        self.replace(dir, entries, Some(index));
        Ok(())
    }

    fn replace(&mut self, dir: PathBuf, entries: Vec<DirectoryEntry>, index: Option<usize>) {
        self.cursor = if entries.is_empty() {
            None
        } else {
            Some(index.unwrap_or(0).min(entries.len() - 1))
        };
        self.current_dir = dir;
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FsError;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn names(model: &DirectoryModel) -> Vec<String> {
        model
            .entries()
            .iter()
            .map(|e| e.name_str().into_owned())
            .collect()
    }

    #[test]
    fn load_sorts_dirs_first_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("b.txt"))?;
        File::create(dir.path().join("A.txt"))?;
        fs::create_dir(dir.path().join("zeta"))?;
        fs::create_dir(dir.path().join("Alpha"))?;

        let model = DirectoryModel::load(dir.path(), false)?;
        assert_eq!(names(&model), vec!["Alpha", "zeta", "A.txt", "b.txt"]);
        assert_eq!(model.cursor(), Some(0));
        Ok(())
    }

    #[test]
    fn cursor_clamps_without_wrapping() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for name in ["a", "b", "c"] {
            File::create(dir.path().join(name))?;
        }
        let mut model = DirectoryModel::load(dir.path(), false)?;
        assert_eq!(model.move_cursor(-1), Some(0));
        assert_eq!(model.move_cursor(10), Some(2));
        assert_eq!(model.move_cursor(1), Some(2));
        assert_eq!(model.move_cursor(-1), Some(1));
        Ok(())
    }

    #[test]
    fn empty_directory_has_no_cursor() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut model = DirectoryModel::load(dir.path(), false)?;
        assert_eq!(model.cursor(), None);
        assert_eq!(model.move_cursor(1), None);
        assert!(model.selected_entry().is_none());
        assert_eq!(model.enter_selected()?, Activation::Nothing);
        Ok(())
    }

    #[test]
    fn parent_round_trip_restores_cursor() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let b = dir.path().join("b");
        fs::create_dir(&b)?;
        File::create(b.join("a.txt"))?;
        File::create(b.join("c.txt"))?;
        File::create(b.join("d.txt"))?;

        let mut model = DirectoryModel::load(&b, false)?;
        model.move_cursor(1);
        assert_eq!(model.selected_entry().map(|e| e.name_str().into_owned()), Some("c.txt".into()));

        assert!(model.go_parent()?);
        assert_eq!(model.current_dir(), dir.path());
        assert_eq!(model.selected_entry().map(|e| e.path().to_path_buf()), Some(b.clone()));

        assert_eq!(model.enter_selected()?, Activation::Entered);
        assert_eq!(model.current_dir(), b.as_path());
        assert_eq!(model.selected_entry().map(|e| e.name_str().into_owned()), Some("c.txt".into()));
        Ok(())
    }

    #[test]
    fn restore_follows_name_after_insertions() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let b = dir.path().join("b");
        fs::create_dir(&b)?;
        File::create(b.join("m.txt"))?;
        File::create(b.join("n.txt"))?;

        let mut model = DirectoryModel::load(&b, false)?;
        model.move_cursor(1);
        model.go_parent()?;
        File::create(b.join("a.txt"))?;
        model.enter_selected()?;
        assert_eq!(model.selected_entry().map(|e| e.name_str().into_owned()), Some("n.txt".into()));
        assert_eq!(model.cursor(), Some(2));
        Ok(())
    }

    #[test]
    fn selecting_a_file_is_a_model_no_op() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("notes.md"))?;
        let mut model = DirectoryModel::load(dir.path(), false)?;
        assert_eq!(model.enter_selected()?, Activation::OpenPreview);
        assert_eq!(model.current_dir(), dir.path());
        Ok(())
    }

    #[test]
    fn toggle_hidden_twice_restores_entries() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join(".env"))?;
        File::create(dir.path().join("a"))?;
        File::create(dir.path().join("b"))?;

        let mut model = DirectoryModel::load(dir.path(), false)?;
        let before = names(&model);
        model.move_cursor(1);

        model.toggle_hidden()?;
        assert!(model.show_hidden());
        assert_eq!(model.len(), 3);
        assert_eq!(model.cursor(), Some(0));

        model.toggle_hidden()?;
        assert_eq!(names(&model), before);
        Ok(())
    }

    #[test]
    fn failed_enter_keeps_previous_model() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let gone = dir.path().join("gone");
        fs::create_dir(&gone)?;
        File::create(dir.path().join("z.txt"))?;

        let mut model = DirectoryModel::load(dir.path(), false)?;
        fs::remove_dir(&gone)?;

        let err = model.enter_selected().err().ok_or("expected an error")?;
        assert!(matches!(err, FsError::NotFound { .. }));
        assert_eq!(model.current_dir(), dir.path());
        assert_eq!(model.len(), 2);
        assert_eq!(model.cursor(), Some(0));
        Ok(())
    }

    #[test]
    fn open_at_focuses_named_entry() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let sub = dir.path().join("src");
        fs::create_dir(&sub)?;
        for name in ["a.rs", "b.rs", "main.rs"] {
            File::create(sub.join(name))?;
        }
        let mut model = DirectoryModel::load(dir.path(), false)?;
        model.open_at(&sub, Some(OsStr::new("main.rs")))?;
        assert_eq!(model.cursor(), Some(2));
        Ok(())
    }
}
