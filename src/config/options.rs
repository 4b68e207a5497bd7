//! Preview and fuzzy-find tuning read from the `[preview]` and `[find]` tables.
//!
//! Every value is clamped into a sane range on conversion, so a config file can never make a
//! preview unbounded or a fuzzy walk infinite.

use crate::core::fuzzy::{DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE};
use crate::core::{PreviewLimits, QueryOptions};
use crate::utils::clamp_setting;

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct PreviewOptions {
    max_bytes: usize,
    max_lines: usize,
    dir_peek: usize,
    probe_bytes: usize,
    tab_width: usize,
    line_scan_bytes: u64,
    syntax_highlighting: bool,
    markdown: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        let limits = PreviewLimits::default();
        PreviewOptions {
            max_bytes: limits.max_bytes,
            max_lines: limits.max_lines,
            dir_peek: limits.dir_peek,
            probe_bytes: limits.probe_bytes,
            tab_width: limits.tab_width,
            line_scan_bytes: limits.line_scan_bytes,
            syntax_highlighting: true,
            markdown: true,
        }
    }
}

impl PreviewOptions {
    /// Clamped limits for the preview renderer.
    pub fn limits(&self) -> PreviewLimits {
        PreviewLimits {
            max_bytes: clamp_setting("preview.max_bytes", self.max_bytes, 1024, 64 * 1024 * 1024),
            max_lines: clamp_setting("preview.max_lines", self.max_lines, 1, 100_000),
            dir_peek: clamp_setting("preview.dir_peek", self.dir_peek, 1, 10_000),
            probe_bytes: clamp_setting("preview.probe_bytes", self.probe_bytes, 512, 1024 * 1024),
            tab_width: clamp_setting("preview.tab_width", self.tab_width, 1, 16),
            line_scan_bytes: clamp_setting(
                "preview.line_scan_bytes",
                self.line_scan_bytes,
                0,
                64 * 1024 * 1024,
            ),
        }
    }

    #[inline]
    pub fn syntax_highlighting(&self) -> bool {
        self.syntax_highlighting
    }

    /// Formatted rendering of `.md` and `.markdown` previews.
    #[inline]
    pub fn markdown(&self) -> bool {
        self.markdown
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct FindOptions {
    max_candidates: usize,
    max_results: usize,
    min_score: i64,
    batch: usize,
}

impl Default for FindOptions {
    fn default() -> Self {
        FindOptions {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            max_results: DEFAULT_MAX_RESULTS,
            min_score: DEFAULT_MIN_SCORE,
            batch: 256,
        }
    }
}

impl FindOptions {
    #[inline]
    pub fn max_candidates(&self) -> usize {
        clamp_setting("find.max_candidates", self.max_candidates, 1, 1_000_000)
    }

    /// Directory reads per event-loop tick.
    #[inline]
    pub fn batch(&self) -> usize {
        clamp_setting("find.batch", self.batch, 1, 100_000)
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            max_results: clamp_setting("find.max_results", self.max_results, 1, 10_000),
            min_score: self.min_score,
        }
    }
}
