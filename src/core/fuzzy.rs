//! Fuzzy file finding for tern.
//!
//! [FuzzyIndex] enumerates a subtree incrementally: each call to [FuzzyIndex::step] reads a
//! bounded number of directories from an explicit frontier, so the walk can be resumed
//! between input ticks and dropped at any point. Queries re-score the candidates found so far
//! and never touch the filesystem.
//!
//! Hidden names and everything below them are never enumerated.

use crate::core::fm::is_hidden_name;
use crate::core::formatter::normalize_separators;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Hard ceiling on enumerated candidates.
pub const DEFAULT_MAX_CANDIDATES: usize = 10_000;
/// Results returned by a query.
pub const DEFAULT_MAX_RESULTS: usize = 100;
/// Scores at or below this value are dropped.
pub const DEFAULT_MIN_SCORE: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    File,
    Directory,
}

/// A path found during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyCandidate {
    relative: String,
    path: PathBuf,
    kind: CandidateKind,
}

impl FuzzyCandidate {
    /// Relative path from the index root, always `/` separated.
    #[inline]
    pub fn relative(&self) -> &str {
        &self.relative
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn kind(&self) -> CandidateKind {
        self.kind
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == CandidateKind::Directory
    }
}

/// A scored reference into the candidates of a [FuzzyIndex].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch {
    index: usize,
    score: i64,
}

impl FuzzyMatch {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn score(&self) -> i64 {
        self.score
    }
}

/// Query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub max_results: usize,
    pub min_score: i64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// Ranking order: higher score first, then shorter path, then lexicographic.
pub fn rank_order(a_score: i64, a_path: &str, b_score: i64, b_path: &str) -> Ordering {
    b_score
        .cmp(&a_score)
        .then_with(|| a_path.chars().count().cmp(&b_path.chars().count()))
        .then_with(|| a_path.cmp(b_path))
}

/// Incrementally built candidate list rooted at one directory.
pub struct FuzzyIndex {
    root: PathBuf,
    candidates: Vec<FuzzyCandidate>,
    frontier: VecDeque<PathBuf>,
    max_candidates: usize,
    capped: bool,
    skipped_dirs: usize,
    matcher: SkimMatcherV2,
}

impl FuzzyIndex {
    pub fn new(root: impl Into<PathBuf>, max_candidates: usize) -> Self {
        let root = root.into();
        let mut frontier = VecDeque::new();
        frontier.push_back(root.clone());
        Self {
            root,
            candidates: Vec::new(),
            frontier,
            max_candidates,
            capped: false,
            skipped_dirs: 0,
            matcher: SkimMatcherV2::default(),
        }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn candidates(&self) -> &[FuzzyCandidate] {
        &self.candidates
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// True when the walk has nothing left to read.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.frontier.is_empty()
    }

    /// True when enumeration stopped at the candidate ceiling.
    #[inline]
    pub fn is_capped(&self) -> bool {
        self.capped
    }

    /// Directories that could not be read and were skipped.
    #[inline]
    pub fn skipped_dirs(&self) -> usize {
        self.skipped_dirs
    }

    pub fn get(&self, m: &FuzzyMatch) -> Option<&FuzzyCandidate> {
        self.candidates.get(m.index)
    }

    /// Reads up to `dir_budget` directories from the frontier.
    ///
    /// Returns the number of candidates added.
    pub fn step(&mut self, dir_budget: usize) -> usize {
        let before = self.candidates.len();

        for _ in 0..dir_budget.max(1) {
            let Some(dir) = self.frontier.pop_front() else {
                break;
            };
            self.read_directory(&dir);
            if self.capped {
                self.frontier.clear();
                break;
            }
        }

        let added = self.candidates.len() - before;
        if self.is_complete() {
            log::debug!(
                "fuzzy index for {} complete: {} candidates, capped: {}, skipped dirs: {}",
                self.root.display(),
                self.candidates.len(),
                self.capped,
                self.skipped_dirs
            );
        }
        added
    }

    /// Drives the walk to the end. Intended for tests and small trees.
    pub fn run_to_completion(&mut self) {
        while !self.is_complete() {
            self.step(usize::MAX);
        }
    }

    fn read_directory(&mut self, dir: &Path) {
        let read = match fs::read_dir(dir) {
            Ok(read) => read,
            Err(e) => {
                log::debug!("fuzzy index skipping {}: {e}", dir.display());
                self.skipped_dirs += 1;
                return;
            }
        };

        let mut children: Vec<(std::ffi::OsString, fs::DirEntry)> = read
            .filter_map(Result::ok)
            .filter(|e| !is_hidden_name(&e.file_name()))
            .map(|e| (e.file_name(), e))
            .collect();
        // readdir order is filesystem dependent
        children.sort_by(|a, b| a.0.cmp(&b.0));

        for (_, entry) in children {
            if self.candidates.len() >= self.max_candidates {
                self.capped = true;
                return;
            }
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            // symlinked directories are candidates but never descended into
            let kind = if file_type.is_dir() || (file_type.is_symlink() && path.is_dir()) {
                CandidateKind::Directory
            } else {
                CandidateKind::File
            };
            if file_type.is_dir() {
                self.frontier.push_back(path.clone());
            }
            let Ok(relative) = path.strip_prefix(&self.root) else {
                continue;
            };
            let relative = normalize_separators(&relative.to_string_lossy()).into_owned();
            self.candidates.push(FuzzyCandidate {
                relative,
                path,
                kind,
            });
        }
    }

    /// Scores the current candidates against `query`.
    ///
    /// An empty query returns the first `max_results` candidates in enumeration order.
    pub fn query(&self, query: &str, opts: QueryOptions) -> Vec<FuzzyMatch> {
        let query = query.trim();
        if query.is_empty() {
            return (0..self.candidates.len().min(opts.max_results))
                .map(|index| FuzzyMatch { index, score: 0 })
                .collect();
        }

        let query = normalize_separators(query);
        let mut matches: Vec<FuzzyMatch> = self
            .candidates
            .iter()
            .enumerate()
            .filter_map(|(index, c)| {
                self.matcher
                    .fuzzy_match(&c.relative, &query)
                    .filter(|&score| score > opts.min_score)
                    .map(|score| FuzzyMatch { index, score })
            })
            .collect();

        matches.sort_by(|a, b| {
            rank_order(
                a.score,
                &self.candidates[a.index].relative,
                b.score,
                &self.candidates[b.index].relative,
            )
        });
        matches.truncate(opts.max_results);
        matches
    }
}
