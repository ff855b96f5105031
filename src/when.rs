//! The blocking predicate.
//!
//! [`When`] decides whether a navigation must be held for confirmation. It
//! is either a fixed flag or a function of the current location and the
//! attempted one:
//!
//! | Variant | Evaluates to |
//! |---------|--------------|
//! | [`When::Static`] | the flag, whatever the locations |
//! | [`When::Predicate`] | `f(current, attempted)` |
//!
//! The attempted location is `None` when there is no concrete destination,
//! which is the case for the unload check.
//!
//! # Example
//!
//! ```
//! use gpui_navigation_prompt::{when_fn, Location, When};
//!
//! let dirty: When = true.into();
//! assert!(dirty.evaluate(&Location::root(), None));
//!
//! let on_edit = when_fn(|current, _next| current.pathname() == "/edit");
//! assert!(on_edit.evaluate(&Location::parse("/edit"), Some(&Location::parse("/home"))));
//! assert!(!on_edit.evaluate(&Location::parse("/home"), Some(&Location::parse("/edit"))));
//! ```

use crate::location::Location;
use std::fmt;
use std::rc::Rc;

/// Function form of the blocking predicate.
pub type WhenFn = Rc<dyn Fn(&Location, Option<&Location>) -> bool>;

/// Whether navigation away should be held.
#[derive(Clone)]
pub enum When {
    /// Always (or never) hold.
    Static(bool),
    /// Decide per navigation.
    Predicate(WhenFn),
}

impl When {
    /// Resolve the predicate for `current` and, if known, the attempted location.
    pub fn evaluate(&self, current: &Location, next: Option<&Location>) -> bool {
        match self {
            Self::Static(flag) => *flag,
            Self::Predicate(f) => f(current, next),
        }
    }
}

impl Default for When {
    fn default() -> Self {
        Self::Static(false)
    }
}

impl From<bool> for When {
    fn from(flag: bool) -> Self {
        Self::Static(flag)
    }
}

impl fmt::Debug for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(flag) => f.debug_tuple("Static").field(flag).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Create a [`When::Predicate`] from a closure.
pub fn when_fn<F>(f: F) -> When
where
    F: Fn(&Location, Option<&Location>) -> bool + 'static,
{
    When::Predicate(Rc::new(f))
}
