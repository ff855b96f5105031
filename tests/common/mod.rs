//! Test utilities for navigation prompt tests
//!
//! Provides fixtures for a mounted prompt and counters for hook calls.

#![allow(dead_code)]

use gpui::{div, IntoElement};
use gpui_navigation_prompt::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Prompt configuration with a render function that draws nothing.
pub fn bare_config() -> PromptConfig {
    PromptConfig::new(|_, _, _| div().into_any_element())
}

/// Shared history starting at `path`.
pub fn history_at(path: &str) -> SharedHistory<MemoryHistory> {
    MemoryHistory::with_initial(path).shared()
}

/// Call counter usable as an `after_*` hook.
#[derive(Clone, Default)]
pub struct Counter(Rc<Cell<usize>>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hook(&self) -> impl Fn() + 'static {
        let count = self.0.clone();
        move || count.set(count.get() + 1)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// Slot capturing `Proceed` continuations handed to a `before_*` hook.
#[derive(Clone, Default)]
pub struct ProceedSlot(Rc<RefCell<Vec<Proceed>>>);

impl ProceedSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hook(&self) -> impl Fn(Proceed) + 'static {
        let slot = self.0.clone();
        move |proceed| slot.borrow_mut().push(proceed)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Resolve the oldest captured continuation.
    pub fn resolve_next(&self) {
        let proceed = self.0.borrow_mut().remove(0);
        proceed.resolve();
    }
}

/// Push `path` and return the outcome.
pub fn push(history: &SharedHistory<MemoryHistory>, path: &str) -> NavigationResult {
    history.borrow_mut().push(Location::parse(path))
}

/// Pathnames of all history entries.
pub fn paths(history: &SharedHistory<MemoryHistory>) -> Vec<String> {
    history
        .borrow()
        .entries()
        .iter()
        .map(|location| location.pathname().to_string())
        .collect()
}
