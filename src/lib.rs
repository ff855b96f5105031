//! Confirm-before-leaving navigation prompt for GPUI.
//!
//! A [`NavigationPrompt`] sits on a navigation history and holds every
//! navigation away from the current screen while its [`When`] predicate
//! holds, typically while a form has unsaved changes. The app renders the
//! confirmation UI through a render function and resolves the prompt with
//! [`PromptRenderProps::on_confirm`] or [`PromptRenderProps::on_cancel`].
//! Confirming replays the held navigation; cancelling drops it.
//!
//! The same predicate also guards the host's before-unload signal (see
//! [`UnloadSource`]) so closing the window can ask first.
//!
//! # Quick start
//!
//! ```no_run
//! use gpui::{div, IntoElement, ParentElement};
//! use gpui_navigation_prompt::{
//!     when_fn, BlockingHistory, Location, MemoryHistory, PromptConfig, UnloadRegistry,
//! };
//!
//! let history = MemoryHistory::with_initial("/edit").shared();
//! let unload = UnloadRegistry::new();
//!
//! let prompt = PromptConfig::new(|props, _window, _cx| {
//!     div().child("You have unsaved changes").into_any_element()
//! })
//! .when(when_fn(|current, _next| current.pathname() == "/edit"))
//! .mount(&history, &unload);
//!
//! history.borrow_mut().push(Location::parse("/home"));
//! assert!(prompt.is_active());
//!
//! prompt.confirm();
//! assert_eq!(history.borrow().current_path(), "/home");
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `log` | yes | Log through the `log` crate |
//! | `tracing` | no | Log through the `tracing` crate instead |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod blocker;
pub mod error;
pub mod history;
pub mod location;
pub mod logging;
pub mod prompt;
pub mod state;
pub mod unload;
pub mod when;
pub mod widgets;

pub use blocker::{blocker_fn, BlockId, Blocker, NavigationAction, NavigationAttempt};
pub use error::{NavigationError, NavigationResult};
pub use history::{BlockHandle, BlockingHistory, MemoryHistory, ReleaseQueue, SharedHistory};
pub use location::{HistoryAction, Location};
pub use prompt::{
    BeforeHook, NavigationPrompt, Proceed, PromptConfig, PromptHook, PromptTrigger,
    DEFAULT_UNLOAD_MESSAGE,
};
pub use state::PromptState;
pub use unload::{BeforeUnloadEvent, UnloadHandler, UnloadRegistry, UnloadSource};
pub use when::{when_fn, When, WhenFn};
pub use widgets::{NavigationPromptView, PromptRenderProps, RenderPromptFn};
