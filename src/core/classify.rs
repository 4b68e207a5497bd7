//! Content classification for previews.
//!
//! [ContentClassifier] decides how a path should be previewed by reading a bounded probe
//! from the start of the file. Nothing past the probe is read here.

use crate::core::error::FsError;
use crate::core::fm::{ChildCounts, child_counts};
use crate::core::highlight::{Highlighter, Language};

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Default probe size in bytes.
pub const DEFAULT_PROBE_BYTES: usize = 8 * 1024;

/// Share of suspicious control bytes, in percent, above which a probe is binary.
const NON_PRINTABLE_PERCENT: usize = 30;

/// Preview category of a filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Directory(ChildCounts),
    Text(Language),
    Binary { size: u64 },
    Unreadable(String),
}

impl Classification {
    pub fn label(&self) -> &str {
        match self {
            Self::Directory(_) => "directory",
            Self::Text(lang) => lang.name(),
            Self::Binary { .. } => "binary",
            Self::Unreadable(_) => "unreadable",
        }
    }
}

pub struct ContentClassifier<'a> {
    highlighter: &'a dyn Highlighter,
    probe_bytes: usize,
}

impl<'a> ContentClassifier<'a> {
    pub fn new(highlighter: &'a dyn Highlighter, probe_bytes: usize) -> Self {
        Self {
            highlighter,
            probe_bytes: probe_bytes.max(1),
        }
    }

    /// Classifies `path`. I/O failures become [Classification::Unreadable].
    pub fn classify(&self, path: &Path) -> Classification {
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) => return Classification::Unreadable(unreadable_reason(path, e)),
        };

        if meta.is_dir() {
            return match child_counts(path) {
                Ok(counts) => Classification::Directory(counts),
                Err(e) => Classification::Unreadable(e.reason()),
            };
        }

        // fifos and devices would block or never end
        if !meta.is_file() {
            return Classification::Unreadable("Not a regular file".to_string());
        }

        let probe = match read_probe(path, self.probe_bytes) {
            Ok(probe) => probe,
            Err(e) => return Classification::Unreadable(FsError::io(path, e).reason()),
        };

        if looks_binary(&probe) {
            return Classification::Binary { size: meta.len() };
        }

        let Some(text) = decode_probe(&probe) else {
            return Classification::Binary { size: meta.len() };
        };

        let first_line = text.lines().next();
        let language = self
            .highlighter
            .classify(path, first_line)
            .unwrap_or_else(Language::plain);
        Classification::Text(language)
    }
}

fn read_probe(path: &Path, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut probe = Vec::with_capacity(limit.min(DEFAULT_PROBE_BYTES));
    File::open(path)?.take(limit as u64).read_to_end(&mut probe)?;
    Ok(probe)
}

fn unreadable_reason(path: &Path, err: std::io::Error) -> String {
    let dangling = err.kind() == std::io::ErrorKind::NotFound
        && fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink());
    if dangling {
        "Broken symbolic link".to_string()
    } else {
        FsError::io(path, err).reason()
    }
}

/// A NUL byte or a high ratio of control bytes marks binary content.
pub fn looks_binary(probe: &[u8]) -> bool {
    if probe.is_empty() {
        return false;
    }
    if probe.contains(&0) {
        return true;
    }
    let suspicious = probe.iter().filter(|&&b| is_suspicious(b)).count();
    suspicious * 100 > probe.len() * NON_PRINTABLE_PERCENT
}

#[inline]
fn is_suspicious(b: u8) -> bool {
    match b {
        b'\n' | b'\r' | b'\t' | 0x0c | 0x1b => false,
        0x7f => true,
        _ => b < 0x20,
    }
}

/// Decodes the probe as UTF-8. A multi-byte sequence cut by the probe boundary is accepted.
fn decode_probe(probe: &[u8]) -> Option<&str> {
    match std::str::from_utf8(probe) {
        Ok(text) => Some(text),
        Err(e) if e.error_len().is_none() => std::str::from_utf8(&probe[..e.valid_up_to()]).ok(),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::highlight::{PlainHighlighter, SyntectHighlighter};
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn classify_with_syntect(path: &Path) -> Classification {
        let hl = SyntectHighlighter::default();
        ContentClassifier::new(&hl, DEFAULT_PROBE_BYTES).classify(path)
    }

    #[test]
    fn directory_reports_child_counts() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        File::create(dir.path().join("a.txt"))?;
        File::create(dir.path().join("b.txt"))?;

        let class = classify_with_syntect(dir.path());
        assert_eq!(
            class,
            Classification::Directory(ChildCounts { dirs: 1, files: 2 })
        );
        Ok(())
    }

    #[test]
    fn rust_source_gets_language_hint() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("lib.rs");
        fs::write(&path, "pub fn answer() -> u32 { 42 }\n")?;

        match classify_with_syntect(&path) {
            Classification::Text(lang) => assert_eq!(lang.name(), "Rust"),
            other => panic!("expected text, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn unknown_extension_falls_back_to_plain() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("notes.qqq");
        fs::write(&path, "just some words\n")?;

        let class = ContentClassifier::new(&PlainHighlighter, 64).classify(&path);
        assert_eq!(class, Classification::Text(Language::plain()));
        Ok(())
    }

    #[test]
    fn nul_byte_is_binary() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("blob.bin");
        let mut file = File::create(&path)?;
        file.write_all(b"abc\0def")?;

        assert_eq!(
            classify_with_syntect(&path),
            Classification::Binary { size: 7 }
        );
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_binary() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("latin1.txt");
        fs::write(&path, [b'c', b'a', b'f', 0xe9, b' ', b'o', b'k'])?;

        assert!(matches!(
            classify_with_syntect(&path),
            Classification::Binary { .. }
        ));
        Ok(())
    }

    #[test]
    fn control_heavy_probe_is_binary() {
        let probe: Vec<u8> = (0..100u8).map(|i| if i % 2 == 0 { 0x01 } else { b'a' }).collect();
        assert!(looks_binary(&probe));
        assert!(!looks_binary(b"plain text\twith tabs\r\n"));
    }

    #[test]
    fn probe_boundary_inside_multibyte_char_is_text() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("crab.txt");
        // "ab" then a 4 byte crab; a 4 byte probe cuts the crab
        fs::write(&path, "ab🦀")?;

        let class = ContentClassifier::new(&PlainHighlighter, 4).classify(&path);
        assert_eq!(class, Classification::Text(Language::plain()));
        Ok(())
    }

    #[test]
    fn empty_file_is_text() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("empty");
        File::create(&path)?;
        assert_eq!(
            ContentClassifier::new(&PlainHighlighter, 16).classify(&path),
            Classification::Text(Language::plain())
        );
        Ok(())
    }

    #[test]
    fn missing_file_is_unreadable() {
        let class = classify_with_syntect(Path::new("/path/does/not/exist.txt"));
        assert_eq!(
            class,
            Classification::Unreadable("File not found".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_unreadable() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(dir.path().join("gone"), &link)?;
        assert_eq!(
            classify_with_syntect(&link),
            Classification::Unreadable("Broken symbolic link".to_string())
        );
        Ok(())
    }
}
