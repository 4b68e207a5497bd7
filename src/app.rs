//! Application state and input handling for tern.
//!
//! - [state]: [AppState], the controller the event loop drives.
//! - [nav]: the [DirectoryModel] of the browsed directory.
//! - [preview]: the [PreviewPane] and its stale-result guard.
//! - [modal]: the [ModalStack] of help, fuzzy-find and settings overlays.
//! - [find_state]: query and results of the fuzzy-find modal.
//! - [keymap]: key bindings built from the config.
//! - [handlers]: the [AppState] methods that act on keys.

pub mod find_state;
pub mod handlers;
pub mod keymap;
pub mod modal;
pub mod nav;
pub mod preview;
pub mod state;

pub use find_state::FindState;
pub use keymap::{Action, Key, Keymap, ModalAction, NavAction, SystemAction};
pub use modal::{Modal, ModalKind, ModalStack, SettingsState};
pub use nav::{Activation, DirectoryModel};
pub use preview::PreviewPane;
pub use state::{AppState, KeypressResult, StatusLevel, StatusMessage};
