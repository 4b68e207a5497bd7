//! Modal overlays for tern.
//!
//! Help, fuzzy find and settings are modals. The top of the [ModalStack] owns input until it
//! is dismissed and the directory model stays frozen underneath. Modals do not nest.

use crate::app::find_state::FindState;

use std::slice;

/// Deepest allowed stack.
pub const MAX_DEPTH: usize = 1;

pub enum Modal {
    Help,
    Fuzzy(Box<FindState>),
    Settings(SettingsState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Help,
    Fuzzy,
    Settings,
}

impl Modal {
    pub fn kind(&self) -> ModalKind {
        match self {
            Modal::Help => ModalKind::Help,
            Modal::Fuzzy(_) => ModalKind::Fuzzy,
            Modal::Settings(_) => ModalKind::Settings,
        }
    }
}

/// Cursor over the theme list of the settings modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsState {
    selected: usize,
    len: usize,
}

impl SettingsState {
    /// Starts on `selected`, usually the active theme.
    pub fn new(selected: usize, len: usize) -> Self {
        Self {
            selected: selected.min(len.saturating_sub(1)),
            len,
        }
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn move_selection(&mut self, delta: isize) {
        let last = self.len.saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }
}

#[derive(Default)]
pub struct ModalStack {
    modals: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { modals: Vec::new() }
    }

    /// Pushes `modal` unless the stack is full. Returns whether it was pushed.
    pub fn push(&mut self, modal: Modal) -> bool {
        if self.modals.len() >= MAX_DEPTH {
            log::debug!("modal {:?} refused, stack is full", modal.kind());
            return false;
        }
        self.modals.push(modal);
        true
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.modals.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.modals.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.modals.last_mut()
    }

    pub fn top_kind(&self) -> Option<ModalKind> {
        self.top().map(Modal::kind)
    }

    pub fn iter(&self) -> slice::Iter<'_, Modal> {
        self.modals.iter()
    }

    pub fn len(&self) -> usize {
        self.modals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modals.is_empty()
    }
}
