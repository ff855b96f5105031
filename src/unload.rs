//! Before-unload signal.
//!
//! When the host is about to go away (window close, app quit), it
//! dispatches a [`BeforeUnloadEvent`] to every subscribed handler. A handler
//! that wants the user to confirm sets a message on the event; the host is
//! then expected to show its own "leave anyway?" dialog. Hosts are free to
//! show a generic text instead of the message.
//!
//! [`UnloadSource`] is the subscription seam, and [`UnloadRegistry`] is the
//! in-memory implementation hosts can call from their close path.
//!
//! ```
//! use gpui_navigation_prompt::{BeforeUnloadEvent, UnloadRegistry, UnloadSource};
//! use std::rc::Rc;
//!
//! let registry = UnloadRegistry::new();
//! let subscription = registry.on_before_unload(Rc::new(|event: &mut BeforeUnloadEvent| {
//!     event.set_return_value("Unsaved changes");
//!     Some("Unsaved changes".to_string())
//! }));
//!
//! assert!(registry.dispatch().should_confirm());
//! drop(subscription);
//! assert!(!registry.dispatch().should_confirm());
//! ```

use crate::trace_log;
use gpui::Subscription;
use std::cell::RefCell;
use std::rc::Rc;

/// Event passed to before-unload handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeforeUnloadEvent {
    return_value: Option<String>,
}

impl BeforeUnloadEvent {
    /// Create an event with no confirmation requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the host to confirm with `message`.
    pub fn set_return_value(&mut self, message: impl Into<String>) {
        self.return_value = Some(message.into());
    }

    /// Confirmation message, if a handler asked for one.
    pub fn return_value(&self) -> Option<&str> {
        self.return_value.as_deref()
    }

    /// Whether the host should ask before unloading.
    pub fn should_confirm(&self) -> bool {
        self.return_value.is_some()
    }
}

/// Handler called on unload. Returns the message it set, if any.
pub type UnloadHandler = Rc<dyn Fn(&mut BeforeUnloadEvent) -> Option<String>>;

/// Something that emits before-unload events.
pub trait UnloadSource {
    /// Subscribe `handler`. Dropping the returned subscription unsubscribes.
    fn on_before_unload(&self, handler: UnloadHandler) -> Subscription;
}

#[derive(Default)]
struct RegistryInner {
    handlers: Vec<(usize, UnloadHandler)>,
    next_id: usize,
}

/// In-memory [`UnloadSource`].
///
/// Cloning is cheap and clones share the same handler list.
#[derive(Clone, Default)]
pub struct UnloadRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl UnloadRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscribed handlers.
    pub fn handler_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    /// Run every handler against a fresh event and return it.
    pub fn dispatch(&self) -> BeforeUnloadEvent {
        let handlers: Vec<UnloadHandler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        let mut event = BeforeUnloadEvent::new();
        for handler in handlers {
            handler(&mut event);
        }
        trace_log!(
            "Dispatched before-unload to {} handler(s), confirm: {}",
            self.handler_count(),
            event.should_confirm()
        );
        event
    }
}

impl UnloadSource for UnloadRegistry {
    fn on_before_unload(&self, handler: UnloadHandler) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.handlers.push((id, handler));
            id
        };

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .handlers
                    .retain(|(existing, _)| *existing != id);
            }
        })
    }
}

impl std::fmt::Debug for UnloadRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnloadRegistry")
            .field("handlers", &self.handler_count())
            .finish()
    }
}
