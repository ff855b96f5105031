//! Navigation blockers.
//!
//! A blocker is a callback registered with a history. The history consults
//! every registered blocker **before** it moves, passing a
//! [`NavigationAttempt`]. The blocker answers with a [`NavigationAction`]:
//! `Continue` lets the navigation through, `Deny` leaves the history where it
//! is.
//!
//! Blockers are **synchronous**. GPUI is single-threaded, so a blocker that
//! wants to ask the user records the attempt and denies it; the navigation is
//! replayed later once the user has decided (see
//! [`NavigationPrompt`](crate::NavigationPrompt)).
//!
//! # Example
//!
//! ```
//! use gpui_navigation_prompt::{blocker_fn, HistoryAction, Location, NavigationAction, NavigationAttempt};
//!
//! let blocker = blocker_fn(|attempt| {
//!     if attempt.to.pathname() == "/danger" {
//!         NavigationAction::deny("no")
//!     } else {
//!         NavigationAction::Continue
//!     }
//! });
//!
//! let attempt = NavigationAttempt::new(Location::root(), Location::parse("/danger"), HistoryAction::Push);
//! assert!(blocker(&attempt).is_deny());
//! ```

use crate::location::{HistoryAction, Location};
use std::fmt;
use std::rc::Rc;

// ============================================================================
// NavigationAttempt
// ============================================================================

/// A navigation the history is about to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationAttempt {
    /// Where the history currently is.
    pub from: Location,

    /// Where the navigation wants to go.
    pub to: Location,

    /// How the history would move.
    pub action: HistoryAction,
}

impl NavigationAttempt {
    /// Create a new attempt.
    pub fn new(from: Location, to: Location, action: HistoryAction) -> Self {
        Self { from, to, action }
    }
}

// ============================================================================
// NavigationAction
// ============================================================================

/// A blocker's answer to a [`NavigationAttempt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Allow navigation to proceed.
    Continue,

    /// Hold the navigation.
    Deny {
        /// Human-readable reason for denying navigation.
        reason: String,
    },
}

impl NavigationAction {
    /// Alias for [`Continue`](Self::Continue).
    pub fn allow() -> Self {
        Self::Continue
    }

    /// Create a result that holds the navigation.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    /// Check if this action allows navigation to continue.
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Check if this action denies navigation.
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    /// Denial reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Deny { reason } => Some(reason),
            Self::Continue => None,
        }
    }
}

// ============================================================================
// Blocker registration
// ============================================================================

/// Callback consulted by a history before every navigation.
pub type Blocker = Rc<dyn Fn(&NavigationAttempt) -> NavigationAction>;

/// Wrap a closure into a [`Blocker`].
pub fn blocker_fn<F>(f: F) -> Blocker
where
    F: Fn(&NavigationAttempt) -> NavigationAction + 'static,
{
    Rc::new(f)
}

/// Identifier of a registered blocker, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub(crate) usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_action_continue() {
        let action = NavigationAction::allow();
        assert!(action.is_continue());
        assert!(!action.is_deny());
        assert_eq!(action.reason(), None);
    }

    #[test]
    fn test_navigation_action_deny() {
        let action = NavigationAction::deny("Unsaved changes");
        assert!(action.is_deny());
        assert_eq!(action.reason(), Some("Unsaved changes"));
    }

    #[test]
    fn test_blocker_fn_sees_attempt() {
        let blocker = blocker_fn(|attempt| {
            if attempt.action == HistoryAction::Replace {
                NavigationAction::Continue
            } else {
                NavigationAction::deny("push held")
            }
        });

        let push = NavigationAttempt::new(
            Location::root(),
            Location::parse("/a"),
            HistoryAction::Push,
        );
        let replace = NavigationAttempt::new(
            Location::root(),
            Location::parse("/a"),
            HistoryAction::Replace,
        );
        assert!(blocker(&push).is_deny());
        assert!(blocker(&replace).is_continue());
    }

    #[test]
    fn test_block_id_display() {
        assert_eq!(BlockId(3).to_string(), "block#3");
    }
}
