//! State of the preview pane in tern.
//!
//! Tracks the previewed target and the last rendered [Preview]. Every render is tagged with
//! a request id and only the result for the newest request is applied, so a preview built
//! for an old selection can never replace the current one.

use crate::config::{ThemeObserver, ThemeRecord};
use crate::core::{Preview, PreviewRenderer};

use std::path::{Path, PathBuf};

pub struct PreviewPane {
    renderer: PreviewRenderer,
    current: Option<Preview>,
    target: Option<PathBuf>,
    show_hidden: bool,
    request_id: u64,
}

impl PreviewPane {
    pub fn new(renderer: PreviewRenderer) -> Self {
        Self {
            renderer,
            current: None,
            target: None,
            show_hidden: false,
            request_id: 0,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn current(&self) -> Option<&Preview> {
        self.current.as_ref()
    }

    #[inline]
    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    #[inline]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    #[inline]
    pub fn renderer(&self) -> &PreviewRenderer {
        &self.renderer
    }

    /// Starts a request for `path`. Results of earlier requests are dropped from now on.
    pub fn prepare_new_request(&mut self, path: PathBuf) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.target = Some(path);
        self.request_id
    }

    /// Applies `preview` if it answers the newest request for the current target.
    ///
    /// Returns whether it was applied.
    pub fn update_content(&mut self, preview: Preview, request_id: u64) -> bool {
        if request_id != self.request_id || self.target.as_deref() != Some(preview.path()) {
            log::trace!("dropping stale preview of {}", preview.path().display());
            return false;
        }
        self.current = Some(preview);
        true
    }

    /// Renders `path` and shows it.
    pub fn show(&mut self, path: &Path, show_hidden: bool) {
        self.show_hidden = show_hidden;
        let id = self.prepare_new_request(path.to_path_buf());
        let preview = self.renderer.preview(path, show_hidden);
        self.update_content(preview, id);
    }

    /// Drops the current preview and invalidates outstanding requests.
    pub fn clear(&mut self) {
        self.request_id = self.request_id.wrapping_add(1);
        self.target = None;
        self.current = None;
    }
}

impl ThemeObserver for PreviewPane {
    fn theme_changed(&mut self, theme: &ThemeRecord) {
        self.renderer.set_dark(theme.is_dark());
        if let Some(target) = self.target.clone() {
            self.show(&target, self.show_hidden);
        }
    }
}
