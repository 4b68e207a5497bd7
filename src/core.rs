//! Core runtime logic for tern.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing and per-entry metadata (see [read_entries], [DirectoryEntry]).
//! - [formatter]: ordering rule and display formatting for sizes, times and permissions.
//! - [classify]: content classification from a bounded probe (see [ContentClassifier]).
//! - [highlight]: the [Highlighter] capability and its syntect backend.
//! - [markdown]: formatted rendering of markdown previews.
//! - [preview]: bounded preview rendering (see [PreviewRenderer], [Preview]).
//! - [fuzzy]: the resumable fuzzy-find index (see [FuzzyIndex]).
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//! - [error]: the typed filesystem error [FsError].

pub mod classify;
pub mod error;
pub mod fm;
pub mod formatter;
pub mod fuzzy;
pub mod highlight;
pub mod markdown;
pub mod preview;
pub mod terminal;

pub use classify::{Classification, ContentClassifier};
pub use error::{FsError, FsResult};
pub use fm::{ChildCounts, DirectoryEntry, EntryKind, child_counts, read_entries};
pub use formatter::{
    format_child_counts, format_file_size, format_file_time, format_permissions,
    normalize_separators, sanitize_line,
};
pub use fuzzy::{CandidateKind, FuzzyCandidate, FuzzyIndex, FuzzyMatch, QueryOptions};
pub use highlight::{Highlighter, Language, PlainHighlighter, SyntectHighlighter};
pub use preview::{LineCount, PeekEntry, Preview, PreviewContent, PreviewLimits, PreviewRenderer};
