//! Preview rendering for tern.
//!
//! [PreviewRenderer] turns a path and its [Classification] into a bounded, render-ready
//! [Preview]. Text is read up to a byte ceiling and a line ceiling and only the retained
//! lines are highlighted. Markdown files are formatted from those same retained lines.
//! Failures never escape: they become notices.

use crate::core::classify::{Classification, ContentClassifier, DEFAULT_PROBE_BYTES};
use crate::core::error::{FsError, FsResult};
use crate::core::fm::is_hidden_name;
use crate::core::formatter::{compare_listing, format_file_size, sanitize_line};
use crate::core::highlight::{Highlighter, Language, SyntectHighlighter};
use crate::core::markdown::{is_markdown_path, render_markdown};

use ratatui::text::Line;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Display columns kept per line. Longer lines are clipped before highlighting.
const MAX_LINE_WIDTH: usize = 2048;

/// Ceilings applied while building a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLimits {
    pub max_bytes: usize,
    pub max_lines: usize,
    pub dir_peek: usize,
    pub probe_bytes: usize,
    pub tab_width: usize,
    /// Bytes scanned past the retained region to count the full file's lines.
    pub line_scan_bytes: u64,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            max_bytes: 1_000_000,
            max_lines: 1_000,
            dir_peek: 50,
            probe_bytes: DEFAULT_PROBE_BYTES,
            tab_width: 4,
            line_scan_bytes: 4 * 1024 * 1024,
        }
    }
}

/// Line count of the full file. `AtLeast` when counting stopped at the scan limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCount {
    Exact(usize),
    AtLeast(usize),
}

impl LineCount {
    pub fn value(&self) -> usize {
        match self {
            Self::Exact(n) | Self::AtLeast(n) => *n,
        }
    }
}

/// A child shown in a directory peek.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeekEntry {
    pub name: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone)]
pub enum PreviewContent {
    Text(Vec<Line<'static>>),
    Directory {
        summary: String,
        entries: Vec<PeekEntry>,
        total: usize,
    },
    Notice(String),
}

/// The rendered preview of one path.
#[derive(Debug, Clone)]
pub struct Preview {
    path: PathBuf,
    classification: Classification,
    content: PreviewContent,
    retained: usize,
    truncated: bool,
    total_bytes: Option<u64>,
    total_lines: Option<LineCount>,
}

impl Preview {
    fn notice(path: &Path, classification: Classification, text: String) -> Self {
        Self {
            path: path.to_path_buf(),
            classification,
            content: PreviewContent::Notice(text),
            retained: 0,
            truncated: false,
            total_bytes: None,
            total_lines: None,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    #[inline]
    pub fn content(&self) -> &PreviewContent {
        &self.content
    }

    /// True when a ceiling was reached before the end of the file.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    #[inline]
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    #[inline]
    pub fn total_lines(&self) -> Option<LineCount> {
        self.total_lines
    }

    /// Number of source lines (or peeked entries) kept for display.
    ///
    /// For markdown this counts file lines read, not the formatted lines shown.
    #[inline]
    pub fn retained_lines(&self) -> usize {
        self.retained
    }
}

/// Owns the highlighting backend and builds previews.
pub struct PreviewRenderer {
    highlighter: Box<dyn Highlighter>,
    limits: PreviewLimits,
    markdown: bool,
}

impl PreviewRenderer {
    pub fn new(highlighter: Box<dyn Highlighter>, limits: PreviewLimits) -> Self {
        Self {
            highlighter,
            limits,
            markdown: true,
        }
    }

    /// Turns formatted markdown previews on or off. On by default.
    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    #[inline]
    pub fn limits(&self) -> &PreviewLimits {
        &self.limits
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.highlighter.set_dark(dark);
    }

    pub fn classifier(&self) -> ContentClassifier<'_> {
        ContentClassifier::new(self.highlighter.as_ref(), self.limits.probe_bytes)
    }

    /// Classifies then renders `path`.
    pub fn preview(&self, path: &Path, show_hidden: bool) -> Preview {
        let classification = self.classifier().classify(path);
        log::debug!("preview {} as {}", path.display(), classification.label());
        self.render(path, classification, show_hidden)
    }

    /// Renders an already classified path.
    pub fn render(
        &self,
        path: &Path,
        classification: Classification,
        show_hidden: bool,
    ) -> Preview {
        match classification {
            Classification::Directory(_) => match self.peek_directory(path, show_hidden) {
                Ok(content) => Preview {
                    path: path.to_path_buf(),
                    classification,
                    retained: match &content {
                        PreviewContent::Directory { entries, .. } => entries.len(),
                        _ => 0,
                    },
                    content,
                    truncated: false,
                    total_bytes: None,
                    total_lines: None,
                },
                Err(e) => Preview::notice(path, Classification::Unreadable(e.reason()), e.reason()),
            },
            Classification::Text(language) => match self.render_text(path, &language) {
                Ok(preview) => preview,
                Err(e) => Preview::notice(path, Classification::Unreadable(e.reason()), e.reason()),
            },
            Classification::Binary { size } => {
                let text = format!(
                    "Binary file, {size} bytes ({})",
                    format_file_size(Some(size), false)
                );
                let mut preview = Preview::notice(path, classification, text);
                preview.total_bytes = Some(size);
                preview
            }
            Classification::Unreadable(ref reason) => {
                let text = reason.clone();
                Preview::notice(path, classification, text)
            }
        }
    }

    fn render_text(&self, path: &Path, language: &Language) -> FsResult<Preview> {
        let read = read_bounded(path, &self.limits)?;

        if read.total_bytes == 0 {
            let mut preview = Preview::notice(
                path,
                Classification::Text(language.clone()),
                "Empty file".to_string(),
            );
            preview.total_bytes = Some(0);
            preview.total_lines = Some(LineCount::Exact(0));
            return Ok(preview);
        }

        let lines: Vec<String> = read
            .lines
            .iter()
            .map(|line| sanitize_line(line, self.limits.tab_width, MAX_LINE_WIDTH).0)
            .collect();
        let styled = if self.markdown && is_markdown_path(path) {
            render_markdown(&lines.join("\n"), self.highlighter.as_ref())
        } else {
            self.highlighter.render(&lines, language)
        };

        Ok(Preview {
            path: path.to_path_buf(),
            classification: Classification::Text(language.clone()),
            retained: lines.len(),
            content: PreviewContent::Text(styled),
            truncated: read.truncated,
            total_bytes: Some(read.total_bytes),
            total_lines: Some(read.total_lines),
        })
    }

    /// Lists the first `dir_peek` children of `path` without building a full model.
    fn peek_directory(&self, path: &Path, show_hidden: bool) -> FsResult<PreviewContent> {
        let mut children: Vec<(PeekEntry, String)> = Vec::new();
        let (mut dirs, mut files) = (0usize, 0usize);

        for entry in fs::read_dir(path).map_err(|e| FsError::io(path, e))? {
            let Ok(entry) = entry else { continue };
            let name = entry.file_name();
            if !show_hidden && is_hidden_name(&name) {
                continue;
            }
            let is_dir = match entry.file_type() {
                Ok(ft) if ft.is_symlink() => entry.path().is_dir(),
                Ok(ft) => ft.is_dir(),
                Err(_) => false,
            };
            if is_dir {
                dirs += 1;
            } else {
                files += 1;
            }
            let name = name.to_string_lossy().into_owned();
            let lower = name.to_lowercase();
            children.push((PeekEntry { name, is_dir }, lower));
        }

        children.sort_by(|(a, a_low), (b, b_low)| {
            compare_listing(a.is_dir, a_low, &a.name, b.is_dir, b_low, &b.name)
        });
        let total = children.len();
        let entries = children
            .into_iter()
            .take(self.limits.dir_peek)
            .map(|(entry, _)| entry)
            .collect();

        let dir_word = if dirs == 1 { "directory" } else { "directories" };
        let file_word = if files == 1 { "file" } else { "files" };
        Ok(PreviewContent::Directory {
            summary: format!("{dirs} {dir_word}, {files} {file_word}"),
            entries,
            total,
        })
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(Box::new(SyntectHighlighter::default()), PreviewLimits::default())
    }
}

struct BoundedRead {
    lines: Vec<String>,
    truncated: bool,
    total_bytes: u64,
    total_lines: LineCount,
}

/// Reads lines until EOF, the byte ceiling or the line ceiling, whichever comes first.
fn read_bounded(path: &Path, limits: &PreviewLimits) -> FsResult<BoundedRead> {
    let file = File::open(path).map_err(|e| FsError::io(path, e))?;
    let total_bytes = file.metadata().map_err(|e| FsError::io(path, e))?.len();
    let mut reader = BufReader::new(file);

    let mut lines = Vec::new();
    let mut buf = Vec::with_capacity(256);
    let mut consumed = 0usize;
    let mut newlines = 0usize;
    let mut last_byte = None;
    let mut ceiling_hit = false;

    loop {
        if lines.len() >= limits.max_lines || consumed >= limits.max_bytes {
            ceiling_hit = true;
            break;
        }
        buf.clear();
        let remaining = (limits.max_bytes - consumed) as u64;
        let n = (&mut reader)
            .take(remaining)
            .read_until(b'\n', &mut buf)
            .map_err(|e| FsError::io(path, e))?;
        if n == 0 {
            break;
        }
        consumed += n;
        last_byte = buf.last().copied();
        if buf.last() == Some(&b'\n') {
            newlines += 1;
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if consumed >= limits.max_bytes {
            trim_split_char(&mut buf);
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }

    let at_eof = reader
        .fill_buf()
        .map_err(|e| FsError::io(path, e))?
        .is_empty();
    let truncated = ceiling_hit && !at_eof;

    let total_lines = if truncated {
        count_remaining_lines(&mut reader, newlines, last_byte, limits.line_scan_bytes)
            .map_err(|e| FsError::io(path, e))?
    } else {
        LineCount::Exact(lines.len())
    };

    Ok(BoundedRead {
        lines,
        truncated,
        total_bytes,
        total_lines,
    })
}

/// Drops a multi-byte character cut in half by the byte ceiling.
fn trim_split_char(buf: &mut Vec<u8>) {
    if let Err(e) = std::str::from_utf8(buf)
        && e.error_len().is_none()
    {
        buf.truncate(e.valid_up_to());
    }
}

/// Continues counting newlines past the retained region, up to `budget` bytes.
fn count_remaining_lines(
    reader: &mut BufReader<File>,
    mut newlines: usize,
    mut last_byte: Option<u8>,
    budget: u64,
) -> std::io::Result<LineCount> {
    let mut scanned = 0u64;
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        if scanned >= budget {
            return Ok(LineCount::AtLeast(newlines + 1));
        }
        newlines += chunk.iter().filter(|&&b| b == b'\n').count();
        last_byte = chunk.last().copied();
        let len = chunk.len();
        scanned += len as u64;
        reader.consume(len);
    }
    let unterminated = usize::from(last_byte.is_some_and(|b| b != b'\n'));
    Ok(LineCount::Exact(newlines + unterminated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::highlight::PlainHighlighter;
    use std::fmt::Write as _;
    use tempfile::tempdir;

    fn plain_renderer(limits: PreviewLimits) -> PreviewRenderer {
        PreviewRenderer::new(Box::new(PlainHighlighter), limits)
    }

    fn text_of(preview: &Preview) -> Vec<String> {
        match preview.content() {
            PreviewContent::Text(lines) => lines
                .iter()
                .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
                .collect(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn long_file_is_cut_at_line_ceiling() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("long.txt");
        let mut body = String::new();
        for i in 0..2000 {
            writeln!(body, "line {i}")?;
        }
        fs::write(&path, &body)?;

        let preview = plain_renderer(PreviewLimits::default()).preview(&path, false);
        assert_eq!(preview.retained_lines(), 1000);
        assert!(preview.is_truncated());
        assert_eq!(preview.total_lines(), Some(LineCount::Exact(2000)));
        assert_eq!(preview.total_bytes(), Some(body.len() as u64));
        assert_eq!(text_of(&preview)[999], "line 999");
        Ok(())
    }

    #[test]
    fn tiny_file_is_complete() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("tiny.txt");
        fs::write(&path, "hello")?;

        let preview = plain_renderer(PreviewLimits::default()).preview(&path, false);
        assert!(!preview.is_truncated());
        assert_eq!(text_of(&preview), vec!["hello".to_string()]);
        assert_eq!(preview.total_bytes(), Some(5));
        assert_eq!(preview.total_lines(), Some(LineCount::Exact(1)));
        Ok(())
    }

    #[test]
    fn exact_line_ceiling_is_not_truncated() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("three.txt");
        fs::write(&path, "a\nb\nc\n")?;

        let limits = PreviewLimits {
            max_lines: 3,
            ..PreviewLimits::default()
        };
        let preview = plain_renderer(limits).preview(&path, false);
        assert!(!preview.is_truncated());
        assert_eq!(preview.retained_lines(), 3);
        Ok(())
    }

    #[test]
    fn byte_ceiling_cuts_single_long_line() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("wide.txt");
        fs::write(&path, "x".repeat(10_000))?;

        let limits = PreviewLimits {
            max_bytes: 100,
            ..PreviewLimits::default()
        };
        let preview = plain_renderer(limits).preview(&path, false);
        assert!(preview.is_truncated());
        assert_eq!(text_of(&preview), vec!["x".repeat(100)]);
        assert_eq!(preview.total_bytes(), Some(10_000));
        assert_eq!(preview.total_lines(), Some(LineCount::Exact(1)));
        Ok(())
    }

    #[test]
    fn line_count_stops_at_scan_budget() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("big.log");
        let mut body = String::new();
        for i in 0..20_000 {
            writeln!(body, "entry {i}")?;
        }
        fs::write(&path, &body)?;

        let limits = PreviewLimits {
            max_lines: 10,
            line_scan_bytes: 1024,
            ..PreviewLimits::default()
        };
        let preview = plain_renderer(limits).preview(&path, false);
        assert!(preview.is_truncated());
        match preview.total_lines() {
            Some(LineCount::AtLeast(n)) => assert!(n > 10 && n < 20_000),
            other => panic!("expected a lower bound, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn byte_ceiling_never_splits_a_character() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("euro.txt");
        fs::write(&path, "abcd€€")?;

        let limits = PreviewLimits {
            max_bytes: 5,
            ..PreviewLimits::default()
        };
        let preview = plain_renderer(limits).preview(&path, false);
        assert!(preview.is_truncated());
        assert_eq!(text_of(&preview), vec!["abcd".to_string()]);
        Ok(())
    }

    #[test]
    fn markdown_is_formatted_from_retained_lines() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("README.md");
        fs::write(&path, "# Title\n\nSome **bold** text.\n\n## Later\n\nnever read\n")?;

        let limits = PreviewLimits {
            max_lines: 3,
            ..PreviewLimits::default()
        };
        let preview = plain_renderer(limits).preview(&path, false);
        let text = text_of(&preview);
        assert_eq!(text, vec!["# Title", "", "Some bold text."]);
        assert_eq!(preview.retained_lines(), 3);
        assert!(preview.is_truncated());

        let raw = plain_renderer(limits).with_markdown(false).preview(&path, false);
        assert_eq!(text_of(&raw)[2], "Some **bold** text.");
        Ok(())
    }

    #[test]
    fn binary_renders_notice() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("blob");
        fs::write(&path, [0u8, 1, 2, 3])?;

        let preview = plain_renderer(PreviewLimits::default()).preview(&path, false);
        match preview.content() {
            PreviewContent::Notice(text) => assert!(text.starts_with("Binary file, 4 bytes")),
            other => panic!("expected notice, got {other:?}"),
        }
        assert!(matches!(
            preview.classification(),
            Classification::Binary { size: 4 }
        ));
        Ok(())
    }

    #[test]
    fn empty_file_renders_notice() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.txt");
        File::create(&path)?;

        let preview = plain_renderer(PreviewLimits::default()).preview(&path, false);
        assert!(matches!(preview.content(), PreviewContent::Notice(t) if t == "Empty file"));
        Ok(())
    }

    #[test]
    fn directory_peek_is_bounded_and_sorted() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for i in 0..8 {
            File::create(dir.path().join(format!("file{i}.txt")))?;
        }
        fs::create_dir(dir.path().join("zdir"))?;
        File::create(dir.path().join(".hidden"))?;

        let limits = PreviewLimits {
            dir_peek: 3,
            ..PreviewLimits::default()
        };
        let preview = plain_renderer(limits).preview(dir.path(), false);
        match preview.content() {
            PreviewContent::Directory {
                summary,
                entries,
                total,
            } => {
                assert_eq!(summary, "1 directory, 8 files");
                assert_eq!(*total, 9);
                assert_eq!(entries.len(), 3);
                assert_eq!(entries[0].name, "zdir");
                assert!(entries[0].is_dir);
                assert_eq!(entries[1].name, "file0.txt");
            }
            other => panic!("expected directory content, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn unreadable_reason_is_verbatim() {
        let renderer = plain_renderer(PreviewLimits::default());
        let preview = renderer.render(
            Path::new("/nowhere"),
            Classification::Unreadable("Permission denied".to_string()),
            false,
        );
        assert!(matches!(preview.content(), PreviewContent::Notice(t) if t == "Permission denied"));
    }

    #[test]
    fn file_vanishing_after_classification_is_a_notice() {
        let renderer = plain_renderer(PreviewLimits::default());
        let preview = renderer.render(
            Path::new("/path/does/not/exist.txt"),
            Classification::Text(Language::plain()),
            false,
        );
        assert!(matches!(
            preview.classification(),
            Classification::Unreadable(_)
        ));
    }
}
