//! The navigation prompt.
//!
//! [`NavigationPrompt`] holds navigations away from a screen until the user
//! decides what to do with them. It ties together three pieces:
//!
//! - a **blocker** registered on the history, which evaluates [`When`] for
//!   each attempt, records the destination and denies the attempt;
//! - a **before-unload handler**, which asks the host to confirm closing
//!   while [`When`] holds;
//! - the **resolution** triggers, [`confirm`](NavigationPrompt::confirm) and
//!   [`cancel`](NavigationPrompt::cancel).
//!
//! # State machine
//!
//! ```text
//!            blocked attempt
//!   Idle ─────────────────────▶ Prompting
//!    ▲                              │
//!    │  cancel: before_cancel ─▶ reset ─▶ after_cancel
//!    └──────────────────────────────┤
//!       confirm: before_confirm ─▶ release block ─▶ navigate
//!                ─▶ register block ─▶ reset ─▶ after_confirm
//! ```
//!
//! `before_*` hooks receive a [`Proceed`] continuation and may hold it as
//! long as they like (for example while their own dialog is open). Nothing
//! happens until [`Proceed::resolve`] is called. `after_*` hooks run
//! synchronously, right after the reset.
//!
//! Each resolution starts a new generation. A `Proceed` handed out before
//! that is stale and resolves to a no-op, so a double-clicked "Leave" button
//! navigates once.
//!
//! # Example
//!
//! ```no_run
//! use gpui::{div, IntoElement, ParentElement};
//! use gpui_navigation_prompt::{MemoryHistory, PromptConfig, UnloadRegistry};
//!
//! let history = MemoryHistory::with_initial("/edit").shared();
//! let unload = UnloadRegistry::new();
//!
//! let prompt = PromptConfig::new(|props, _window, _cx| {
//!     div()
//!         .child(if props.is_active { "Leave without saving?" } else { "" })
//!         .into_any_element()
//! })
//! .when(true)
//! .after_confirm(|| println!("left the editor"))
//! .mount(&history, &unload);
//!
//! assert!(!prompt.is_active());
//! ```

use crate::blocker::{Blocker, NavigationAction, NavigationAttempt};
use crate::history::{BlockHandle, BlockingHistory, SharedHistory};
use crate::location::{HistoryAction, Location};
use crate::state::PromptState;
use crate::unload::{BeforeUnloadEvent, UnloadHandler, UnloadSource};
use crate::when::When;
use crate::widgets::{PromptRenderProps, RenderPromptFn};
use crate::{debug_log, error_log, info_log, trace_log};
use gpui::{AnyElement, App, Subscription, Window};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Message placed on the before-unload event while the prompt is blocking.
pub const DEFAULT_UNLOAD_MESSAGE: &str =
    "Do you want to leave this site?\n\nChanges you made may not be saved.";

/// Reason given to the history when an attempt is held.
const HELD_REASON: &str = "Navigation held for confirmation";

/// Hook with no arguments (`after_cancel`, `after_confirm`).
pub type PromptHook = Rc<dyn Fn()>;

/// Hook receiving a continuation (`before_cancel`, `before_confirm`).
pub type BeforeHook = Rc<dyn Fn(Proceed)>;

type Observer = Rc<dyn Fn(&PromptState)>;

// ============================================================================
// Proceed / PromptTrigger
// ============================================================================

/// Continuation handed to `before_*` hooks.
///
/// Resolving it carries on with the cancel or confirm. Dropping it without
/// resolving leaves the prompt open.
pub struct Proceed {
    resolve: Box<dyn FnOnce()>,
}

impl Proceed {
    fn new(resolve: impl FnOnce() + 'static) -> Self {
        Self {
            resolve: Box::new(resolve),
        }
    }

    /// Continue with the pending resolution.
    pub fn resolve(self) {
        (self.resolve)();
    }
}

impl fmt::Debug for Proceed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proceed").finish_non_exhaustive()
    }
}

/// Zero-argument callback exposed to the render function.
#[derive(Clone)]
pub struct PromptTrigger(Rc<dyn Fn()>);

impl PromptTrigger {
    fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Run the trigger.
    pub fn fire(&self) {
        (self.0)();
    }
}

impl fmt::Debug for PromptTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PromptTrigger(..)")
    }
}

// ============================================================================
// PromptConfig
// ============================================================================

/// Configuration of a prompt, built fluently and then mounted.
pub struct PromptConfig {
    pub(crate) when: When,
    pub(crate) render_if_not_active: bool,
    pub(crate) before_cancel: Option<BeforeHook>,
    pub(crate) after_cancel: Option<PromptHook>,
    pub(crate) before_confirm: Option<BeforeHook>,
    pub(crate) after_confirm: Option<PromptHook>,
    pub(crate) unload_message: String,
    pub(crate) children: RenderPromptFn,
}

impl PromptConfig {
    /// Start a configuration with the render function.
    ///
    /// Defaults: `when` is `false`, nothing is rendered while idle, no
    /// hooks, and [`DEFAULT_UNLOAD_MESSAGE`].
    pub fn new<F>(children: F) -> Self
    where
        F: Fn(PromptRenderProps, &mut Window, &mut App) -> AnyElement + 'static,
    {
        Self {
            when: When::default(),
            render_if_not_active: false,
            before_cancel: None,
            after_cancel: None,
            before_confirm: None,
            after_confirm: None,
            unload_message: DEFAULT_UNLOAD_MESSAGE.to_string(),
            children: Rc::new(children),
        }
    }

    /// Set the blocking predicate (a `bool` or a [`When`]).
    pub fn when(mut self, when: impl Into<When>) -> Self {
        self.when = when.into();
        self
    }

    /// Render children even while idle (they receive `is_active: false`).
    pub fn render_if_not_active(mut self, render: bool) -> Self {
        self.render_if_not_active = render;
        self
    }

    /// Hook run before a cancel takes effect.
    pub fn before_cancel<F>(mut self, hook: F) -> Self
    where
        F: Fn(Proceed) + 'static,
    {
        self.before_cancel = Some(Rc::new(hook));
        self
    }

    /// Hook run after a cancel reset the prompt.
    pub fn after_cancel<F>(mut self, hook: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.after_cancel = Some(Rc::new(hook));
        self
    }

    /// Hook run before a confirm takes effect.
    pub fn before_confirm<F>(mut self, hook: F) -> Self
    where
        F: Fn(Proceed) + 'static,
    {
        self.before_confirm = Some(Rc::new(hook));
        self
    }

    /// Hook run after a confirm navigated and reset the prompt.
    pub fn after_confirm<F>(mut self, hook: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.after_confirm = Some(Rc::new(hook));
        self
    }

    /// Message placed on before-unload events.
    pub fn unload_message(mut self, message: impl Into<String>) -> Self {
        self.unload_message = message.into();
        self
    }

    /// Mount the prompt on `history` and `unload`.
    pub fn mount<H, U>(self, history: &SharedHistory<H>, unload: &U) -> NavigationPrompt<H>
    where
        H: BlockingHistory,
        U: UnloadSource + ?Sized,
    {
        NavigationPrompt::mount(self, history, unload)
    }
}

impl fmt::Debug for PromptConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptConfig")
            .field("when", &self.when)
            .field("render_if_not_active", &self.render_if_not_active)
            .field("before_cancel", &self.before_cancel.is_some())
            .field("after_cancel", &self.after_cancel.is_some())
            .field("before_confirm", &self.before_confirm.is_some())
            .field("after_confirm", &self.after_confirm.is_some())
            .field("unload_message", &self.unload_message)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// NavigationPrompt
// ============================================================================

pub(crate) struct PromptInner<H: BlockingHistory> {
    pub(crate) config: PromptConfig,
    pub(crate) state: PromptState,
    /// Bumped on every resolution; a `Proceed` from an older generation is stale.
    generation: usize,
    history: SharedHistory<H>,
    block: Option<BlockHandle<H>>,
    _unload: Option<Subscription>,
    observers: Vec<(usize, Observer)>,
    next_observer_id: usize,
}

type SharedInner<H> = Rc<RefCell<PromptInner<H>>>;
type WeakInner<H> = Weak<RefCell<PromptInner<H>>>;

/// A mounted navigation prompt.
///
/// Dropping it unmounts: the history blocker and the before-unload
/// subscription are both released.
pub struct NavigationPrompt<H: BlockingHistory> {
    pub(crate) inner: SharedInner<H>,
}

impl<H: BlockingHistory> NavigationPrompt<H> {
    /// Mount a prompt: register its blocker on `history` and its
    /// before-unload handler on `unload`.
    pub fn mount<U>(config: PromptConfig, history: &SharedHistory<H>, unload: &U) -> Self
    where
        U: UnloadSource + ?Sized,
    {
        let inner = Rc::new(RefCell::new(PromptInner {
            config,
            state: PromptState::Idle,
            generation: 0,
            history: Rc::clone(history),
            block: None,
            _unload: None,
            observers: Vec::new(),
            next_observer_id: 0,
        }));

        let block = BlockHandle::register(history, interceptor(Rc::downgrade(&inner)));
        let subscription = unload.on_before_unload(unload_guard(Rc::downgrade(&inner)));
        {
            let mut guard = inner.borrow_mut();
            guard.block = Some(block);
            guard._unload = Some(subscription);
        }

        info_log!(
            "Mounted navigation prompt at '{}'",
            history.borrow().location()
        );
        Self { inner }
    }

    /// Current state.
    pub fn state(&self) -> PromptState {
        self.inner.borrow().state.clone()
    }

    /// Whether a navigation is being held.
    pub fn is_active(&self) -> bool {
        self.inner.borrow().state.is_active()
    }

    /// Whether the predicate currently holds for the current location, with
    /// no attempted destination. This is the check the unload guard uses.
    pub fn is_blocking(&self) -> bool {
        when_holds_now(&self.inner).unwrap_or(false)
    }

    /// Replace the blocking predicate.
    pub fn set_when(&self, when: impl Into<When>) {
        self.inner.borrow_mut().config.when = when.into();
    }

    /// Toggle rendering while idle.
    pub fn set_render_if_not_active(&self, render: bool) {
        self.inner.borrow_mut().config.render_if_not_active = render;
    }

    /// Confirm the held navigation.
    pub fn confirm(&self) {
        start_confirm(&self.inner);
    }

    /// Discard the held navigation.
    pub fn cancel(&self) {
        start_cancel(&self.inner);
    }

    /// Trigger equivalent to [`confirm`](Self::confirm) that does not keep
    /// the prompt alive.
    pub fn confirm_trigger(&self) -> PromptTrigger {
        let weak = Rc::downgrade(&self.inner);
        PromptTrigger::new(move || {
            if let Some(inner) = weak.upgrade() {
                start_confirm(&inner);
            }
        })
    }

    /// Trigger equivalent to [`cancel`](Self::cancel) that does not keep the
    /// prompt alive.
    pub fn cancel_trigger(&self) -> PromptTrigger {
        let weak = Rc::downgrade(&self.inner);
        PromptTrigger::new(move || {
            if let Some(inner) = weak.upgrade() {
                start_cancel(&inner);
            }
        })
    }

    /// Call `observer` after every state change. Dropping the returned
    /// subscription stops the calls.
    ///
    /// A held navigation notifies observers from inside the history's
    /// blocker, while the history is mutably borrowed. Observers must not
    /// borrow the history.
    pub fn observe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&PromptState) + 'static,
    {
        let observer: Observer = Rc::new(observer);
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_observer_id;
            inner.next_observer_id += 1;
            inner.observers.push((id, observer));
            id
        };

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut inner) = inner.try_borrow_mut() {
                    inner.observers.retain(|(existing, _)| *existing != id);
                }
            }
        })
    }

    /// Unmount explicitly. Same as dropping.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<H: BlockingHistory> Drop for NavigationPrompt<H> {
    fn drop(&mut self) {
        debug_log!("Unmounting navigation prompt");
    }
}

impl<H: BlockingHistory> fmt::Debug for NavigationPrompt<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("NavigationPrompt")
                .field("state", &inner.state)
                .field("config", &inner.config)
                .field("block", &inner.block)
                .finish_non_exhaustive(),
            Err(_) => f.write_str("NavigationPrompt(<busy>)"),
        }
    }
}

// ============================================================================
// Interceptor and unload guard
// ============================================================================

fn interceptor<H: BlockingHistory>(weak: WeakInner<H>) -> Blocker {
    Rc::new(move |attempt: &NavigationAttempt| {
        let Some(inner) = weak.upgrade() else {
            return NavigationAction::Continue;
        };

        let Ok(when) = inner.try_borrow().map(|inner| inner.config.when.clone()) else {
            error_log!(
                "Prompt busy during {} to {}; letting it through",
                attempt.action,
                attempt.to
            );
            return NavigationAction::Continue;
        };
        if !when.evaluate(&attempt.from, Some(&attempt.to)) {
            trace_log!("Allowing {} {} -> {}", attempt.action, attempt.from, attempt.to);
            return NavigationAction::Continue;
        }

        debug_log!(
            "Holding {} {} -> {} for confirmation",
            attempt.action,
            attempt.from,
            attempt.to
        );
        set_state(
            &inner,
            PromptState::Prompting {
                action: attempt.action,
                next_location: attempt.to.clone(),
            },
        );
        NavigationAction::deny(HELD_REASON)
    })
}

fn unload_guard<H: BlockingHistory>(weak: WeakInner<H>) -> UnloadHandler {
    Rc::new(move |event: &mut BeforeUnloadEvent| -> Option<String> {
        let inner = weak.upgrade()?;
        if !when_holds_now(&inner)? {
            return None;
        }
        let message = inner.try_borrow().ok()?.config.unload_message.clone();
        debug_log!("Requesting confirmation before unload");
        event.set_return_value(message.clone());
        Some(message)
    })
}

/// Evaluate the predicate for the current location with no destination.
/// `None` if the prompt or the history is busy.
fn when_holds_now<H: BlockingHistory>(inner: &SharedInner<H>) -> Option<bool> {
    let (when, history) = {
        let inner = inner.try_borrow().ok()?;
        (inner.config.when.clone(), Rc::clone(&inner.history))
    };
    let current = history.try_borrow().ok()?.location().clone();
    Some(when.evaluate(&current, None))
}

// ============================================================================
// Resolution
// ============================================================================

fn start_cancel<H: BlockingHistory>(inner: &SharedInner<H>) {
    let (hook, generation) = {
        let inner = inner.borrow();
        (inner.config.before_cancel.clone(), inner.generation)
    };
    let weak = Rc::downgrade(inner);
    let proceed = Proceed::new(move || match weak.upgrade() {
        Some(inner) => finish_cancel(&inner, generation),
        None => {
            trace_log!("Cancel resolved after the prompt was unmounted");
        }
    });

    match hook {
        Some(hook) => hook(proceed),
        None => proceed.resolve(),
    }
}

fn start_confirm<H: BlockingHistory>(inner: &SharedInner<H>) {
    let (hook, generation) = {
        let inner = inner.borrow();
        (inner.config.before_confirm.clone(), inner.generation)
    };
    let weak = Rc::downgrade(inner);
    let proceed = Proceed::new(move || match weak.upgrade() {
        Some(inner) => finish_confirm(&inner, generation),
        None => {
            trace_log!("Confirm resolved after the prompt was unmounted");
        }
    });

    match hook {
        Some(hook) => hook(proceed),
        None => proceed.resolve(),
    }
}

fn finish_cancel<H: BlockingHistory>(inner: &SharedInner<H>, generation: usize) {
    if !is_current(inner, generation) {
        return;
    }
    debug_log!("Navigation prompt cancelled");
    reset(inner);

    let hook = inner.borrow().config.after_cancel.clone();
    if let Some(hook) = hook {
        hook();
    }
}

fn finish_confirm<H: BlockingHistory>(inner: &SharedInner<H>, generation: usize) {
    if !is_current(inner, generation) {
        return;
    }

    let (history, state) = {
        let inner = inner.borrow();
        (Rc::clone(&inner.history), inner.state.clone())
    };
    if history.try_borrow_mut().is_err() {
        error_log!("History busy; confirm ignored");
        return;
    }

    let (action, next_location) = match state {
        PromptState::Prompting {
            action,
            next_location,
        } => (action, next_location),
        PromptState::Idle => (HistoryAction::Push, Location::root()),
    };

    // Our own blocker must be gone before replaying the navigation.
    let previous = inner.borrow_mut().block.take();
    drop(previous);

    let result = {
        let mut history = history.borrow_mut();
        match action {
            HistoryAction::Pop | HistoryAction::Push => history.push(next_location),
            HistoryAction::Replace => history.replace(next_location),
        }
    };
    if result.is_success() {
        debug_log!("Navigation prompt confirmed: {} {:?}", action, result.path());
    } else {
        debug_log!("Confirmed navigation did not complete: {:?}", result);
    }

    let block = BlockHandle::register(&history, interceptor(Rc::downgrade(inner)));
    inner.borrow_mut().block = Some(block);
    reset(inner);

    let hook = inner.borrow().config.after_confirm.clone();
    if let Some(hook) = hook {
        hook();
    }
}

fn is_current<H: BlockingHistory>(inner: &SharedInner<H>, generation: usize) -> bool {
    let current = inner.borrow().generation;
    if current != generation {
        trace_log!(
            "Ignoring stale resolution (generation {} != {})",
            generation,
            current
        );
        return false;
    }
    true
}

/// Back to `Idle` and start a new generation.
fn reset<H: BlockingHistory>(inner: &SharedInner<H>) {
    inner.borrow_mut().generation += 1;
    set_state(inner, PromptState::Idle);
}

fn set_state<H: BlockingHistory>(inner: &SharedInner<H>, state: PromptState) {
    let observers: Vec<Observer> = {
        let mut inner = inner.borrow_mut();
        inner.state = state.clone();
        inner.observers.iter().map(|(_, o)| Rc::clone(o)).collect()
    };
    for observer in observers {
        observer(&state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::unload::UnloadRegistry;
    use crate::when::when_fn;
    use gpui::{div, IntoElement};
    use std::cell::Cell;

    fn config() -> PromptConfig {
        PromptConfig::new(|_, _, _| div().into_any_element())
    }

    fn counter() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn test_when_false_lets_navigation_through() {
        let history = MemoryHistory::new().shared();
        let prompt = config().when(false).mount(&history, &UnloadRegistry::new());

        let result = history.borrow_mut().push(Location::parse("/next"));
        assert!(result.is_success());
        assert_eq!(history.borrow().current_path(), "/next");
        assert_eq!(prompt.state(), PromptState::Idle);
    }

    #[test]
    fn test_blocked_attempt_records_destination() {
        let history = MemoryHistory::new().shared();
        let prompt = config().when(true).mount(&history, &UnloadRegistry::new());

        let result = history.borrow_mut().replace(Location::parse("/settings"));
        assert!(result.is_blocked());
        assert_eq!(history.borrow().current_path(), "/");
        assert_eq!(
            prompt.state(),
            PromptState::Prompting {
                action: HistoryAction::Replace,
                next_location: Location::parse("/settings"),
            }
        );
    }

    #[test]
    fn test_latest_blocked_attempt_wins() {
        let history = MemoryHistory::new().shared();
        let prompt = config().when(true).mount(&history, &UnloadRegistry::new());

        history.borrow_mut().push(Location::parse("/a"));
        history.borrow_mut().push(Location::parse("/b"));
        assert_eq!(prompt.state().next_location(), Some(&Location::parse("/b")));
    }

    #[test]
    fn test_confirm_replays_replace_as_replace() {
        let history = MemoryHistory::with_initial("/form").shared();
        let prompt = config().when(true).mount(&history, &UnloadRegistry::new());

        history.borrow_mut().replace(Location::parse("/done"));
        prompt.confirm();

        assert_eq!(history.borrow().entries().len(), 1);
        assert_eq!(history.borrow().current_path(), "/done");
        assert!(!prompt.is_active());
    }

    #[test]
    fn test_confirm_replays_pop_as_push() {
        let history = MemoryHistory::new().shared();
        history.borrow_mut().push(Location::parse("/form"));
        let prompt = config().when(true).mount(&history, &UnloadRegistry::new());

        assert!(history.borrow_mut().back().is_blocked());
        assert_eq!(prompt.state().pending_action(), Some(HistoryAction::Pop));

        prompt.confirm();
        let paths: Vec<String> = history
            .borrow()
            .entries()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(paths, vec!["/", "/form", "/"]);
    }

    #[test]
    fn test_confirm_while_idle_goes_to_root() {
        let history = MemoryHistory::with_initial("/deep").shared();
        let prompt = config().when(false).mount(&history, &UnloadRegistry::new());

        prompt.confirm();
        assert_eq!(history.borrow().current_path(), "/");
        assert_eq!(history.borrow().entries().len(), 2);
    }

    #[test]
    fn test_confirm_keeps_exactly_one_blocker() {
        let history = MemoryHistory::new().shared();
        let prompt = config().when(true).mount(&history, &UnloadRegistry::new());
        assert_eq!(history.borrow().blocker_count(), 1);

        history.borrow_mut().push(Location::parse("/a"));
        prompt.confirm();
        assert_eq!(history.borrow().blocker_count(), 1);

        // The fresh blocker still holds navigations.
        assert!(history.borrow_mut().push(Location::parse("/b")).is_blocked());
        assert!(prompt.is_active());
    }

    #[test]
    fn test_before_cancel_defers_reset() {
        let history = MemoryHistory::new().shared();
        let pending: Rc<RefCell<Option<Proceed>>> = Rc::new(RefCell::new(None));
        let slot = pending.clone();
        let (after, after_cancel) = counter();
        let prompt = config()
            .when(true)
            .before_cancel(move |proceed| *slot.borrow_mut() = Some(proceed))
            .after_cancel(after_cancel)
            .mount(&history, &UnloadRegistry::new());

        history.borrow_mut().push(Location::parse("/a"));
        prompt.cancel();
        assert!(prompt.is_active());
        assert_eq!(after.get(), 0);

        let proceed = pending.borrow_mut().take().unwrap();
        proceed.resolve();
        assert!(!prompt.is_active());
        assert_eq!(after.get(), 1);
        assert_eq!(history.borrow().current_path(), "/");
    }

    #[test]
    fn test_stale_proceed_is_ignored() {
        let history = MemoryHistory::new().shared();
        let pending: Rc<RefCell<Vec<Proceed>>> = Rc::new(RefCell::new(Vec::new()));
        let slot = pending.clone();
        let prompt = config()
            .when(true)
            .before_confirm(move |proceed| slot.borrow_mut().push(proceed))
            .mount(&history, &UnloadRegistry::new());

        history.borrow_mut().push(Location::parse("/a"));
        prompt.confirm();
        prompt.confirm();

        let mut proceeds: Vec<Proceed> = pending.borrow_mut().drain(..).collect();
        assert_eq!(proceeds.len(), 2);
        let second = proceeds.pop().unwrap();
        let first = proceeds.pop().unwrap();
        first.resolve();
        second.resolve();

        assert_eq!(history.borrow().entries().len(), 2);
        assert_eq!(history.borrow().current_path(), "/a");
    }

    #[test]
    fn test_proceed_after_unmount_is_noop() {
        let history = MemoryHistory::new().shared();
        let pending: Rc<RefCell<Option<Proceed>>> = Rc::new(RefCell::new(None));
        let slot = pending.clone();
        let prompt = config()
            .when(true)
            .before_confirm(move |proceed| *slot.borrow_mut() = Some(proceed))
            .mount(&history, &UnloadRegistry::new());

        history.borrow_mut().push(Location::parse("/a"));
        prompt.confirm();
        prompt.unmount();

        let proceed = pending.borrow_mut().take().unwrap();
        proceed.resolve();
        assert_eq!(history.borrow().current_path(), "/");
        assert_eq!(history.borrow().blocker_count(), 0);
    }

    #[test]
    fn test_set_when_takes_effect() {
        let history = MemoryHistory::new().shared();
        let prompt = config().mount(&history, &UnloadRegistry::new());
        assert!(!prompt.is_blocking());

        prompt.set_when(when_fn(|current, _| current.pathname() == "/"));
        assert!(prompt.is_blocking());
        assert!(history.borrow_mut().push(Location::parse("/x")).is_blocked());
    }

    #[test]
    fn test_observer_sees_transitions() {
        let history = MemoryHistory::new().shared();
        let prompt = config().when(true).mount(&history, &UnloadRegistry::new());
        let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let subscription = prompt.observe(move |state| log.borrow_mut().push(state.is_active()));

        history.borrow_mut().push(Location::parse("/a"));
        prompt.cancel();
        assert_eq!(*seen.borrow(), vec![true, false]);

        drop(subscription);
        history.borrow_mut().push(Location::parse("/b"));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_unload_message_is_configurable() {
        let history = MemoryHistory::new().shared();
        let unload = UnloadRegistry::new();
        let _prompt = config()
            .when(true)
            .unload_message("Draft not saved")
            .mount(&history, &unload);

        assert_eq!(unload.dispatch().return_value(), Some("Draft not saved"));
    }

    #[test]
    fn test_triggers_fired_from_inside_the_blocker() {
        let history = MemoryHistory::new().shared();
        let (confirmed, after_confirm) = counter();
        let (cancelled, after_cancel) = counter();
        let prompt = config()
            .when(true)
            .after_confirm(after_confirm)
            .after_cancel(after_cancel)
            .mount(&history, &UnloadRegistry::new());

        let confirm = prompt.confirm_trigger();
        let cancel = prompt.cancel_trigger();
        let _subscription = prompt.observe(move |state| {
            if state.is_active() {
                confirm.fire();
                cancel.fire();
            }
        });

        // The history is borrowed here: confirm is dropped, cancel resets.
        assert!(history.borrow_mut().push(Location::parse("/a")).is_blocked());
        assert_eq!(history.borrow().current_path(), "/");
        assert_eq!(prompt.state(), PromptState::Idle);
        assert_eq!(confirmed.get(), 0);
        assert_eq!(cancelled.get(), 1);
        assert_eq!(history.borrow().blocker_count(), 1);
    }

    #[test]
    fn test_before_confirm_resolving_synchronously() {
        let history = MemoryHistory::new().shared();
        let (after, after_confirm) = counter();
        let prompt = config()
            .when(true)
            .before_confirm(|proceed| proceed.resolve())
            .after_confirm(after_confirm)
            .mount(&history, &UnloadRegistry::new());

        history.borrow_mut().push(Location::parse("/a"));
        prompt.confirm();

        assert_eq!(history.borrow().current_path(), "/a");
        assert!(!prompt.is_active());
        assert_eq!(after.get(), 1);
        assert_eq!(history.borrow().blocker_count(), 1);
    }

    #[test]
    fn test_before_cancel_resolving_synchronously() {
        let history = MemoryHistory::new().shared();
        let (after, after_cancel) = counter();
        let prompt = config()
            .when(true)
            .before_cancel(|proceed| proceed.resolve())
            .after_cancel(after_cancel)
            .mount(&history, &UnloadRegistry::new());

        history.borrow_mut().push(Location::parse("/a"));
        prompt.cancel();

        assert_eq!(history.borrow().current_path(), "/");
        assert!(!prompt.is_active());
        assert_eq!(after.get(), 1);
    }

    #[test]
    fn test_prompt_dropped_during_push_releases_blocker() {
        let history = MemoryHistory::new().shared();
        let holder: Rc<RefCell<Option<NavigationPrompt<MemoryHistory>>>> =
            Rc::new(RefCell::new(None));
        let prompt = config().when(true).mount(&history, &UnloadRegistry::new());

        let slot = holder.clone();
        let _subscription = prompt.observe(move |_| {
            let prompt = slot.borrow_mut().take();
            drop(prompt);
        });
        *holder.borrow_mut() = Some(prompt);

        // The blocker that is running still denies this attempt.
        assert!(history.borrow_mut().push(Location::parse("/a")).is_blocked());
        assert!(holder.borrow().is_none());
        assert_eq!(history.borrow().blocker_count(), 0);

        assert!(history.borrow_mut().push(Location::parse("/b")).is_success());
        assert_eq!(history.borrow().current_path(), "/b");
    }
}
