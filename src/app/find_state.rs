//! State of the fuzzy-find modal.
//!
//! Owns the [FuzzyIndex] for one modal session plus the query and its ranked results.
//! The index is advanced a batch at a time from the event loop and every change to the query
//! or the candidate set re-scores without walking the tree again.

use crate::config::FindOptions;
use crate::core::{FuzzyCandidate, FuzzyIndex, FuzzyMatch, QueryOptions};

use std::path::PathBuf;

pub struct FindState {
    index: FuzzyIndex,
    query: String,
    results: Vec<FuzzyMatch>,
    selected: usize,
    opts: QueryOptions,
    batch: usize,
}

impl FindState {
    pub fn new(root: PathBuf, max_candidates: usize, batch: usize, opts: QueryOptions) -> Self {
        let mut state = Self {
            index: FuzzyIndex::new(root, max_candidates),
            query: String::new(),
            results: Vec::new(),
            selected: 0,
            opts,
            batch,
        };
        state.pump();
        state
    }

    pub fn from_config(root: PathBuf, find: &FindOptions) -> Self {
        Self::new(
            root,
            find.max_candidates(),
            find.batch(),
            find.query_options(),
        )
    }

    // Getters / Accessors

    #[inline]
    pub fn index(&self) -> &FuzzyIndex {
        &self.index
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    pub fn results(&self) -> &[FuzzyMatch] {
        &self.results
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// True while enumeration is still running.
    #[inline]
    pub fn is_scanning(&self) -> bool {
        !self.index.is_complete()
    }

    pub fn candidate(&self, m: &FuzzyMatch) -> Option<&FuzzyCandidate> {
        self.index.get(m)
    }

    pub fn selected_candidate(&self) -> Option<&FuzzyCandidate> {
        self.results
            .get(self.selected)
            .and_then(|m| self.index.get(m))
    }

    // Mutators

    /// Advances enumeration by one batch. Returns true when the visible results changed.
    pub fn pump(&mut self) -> bool {
        if self.index.is_complete() {
            return false;
        }
        let added = self.index.step(self.batch);
        if added == 0 && !self.index.is_complete() {
            return false;
        }
        let keep = self.results.get(self.selected).map(FuzzyMatch::index);
        self.refresh(keep);
        true
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh(None);
    }

    /// Removes the last query character. Returns false when the query was already empty.
    pub fn pop_char(&mut self) -> bool {
        if self.query.pop().is_none() {
            return false;
        }
        self.refresh(None);
        true
    }

    /// Moves the selection by `delta`, clamped to the result list.
    pub fn move_selection(&mut self, delta: isize) {
        let last = self.results.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// Re-scores the enumerated candidates against the query.
    ///
    /// `keep` names the candidate to keep selected. Otherwise the selection resets to the top.
    fn refresh(&mut self, keep: Option<usize>) {
        self.results = self.index.query(&self.query, self.opts);

        self.selected = keep
            .and_then(|index| self.results.iter().position(|m| m.index() == index))
            .unwrap_or(0);
    }
}
