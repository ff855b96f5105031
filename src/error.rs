//! Navigation outcomes reported by a history.
//!
//! - [`NavigationResult`] — the outcome of any history navigation
//!   (`Success`, `Blocked`, `Error`).
//! - [`NavigationError`] — what went wrong when the history could not move
//!   at all.
//!
//! # Examples
//!
//! ```
//! use gpui_navigation_prompt::{HistoryAction, Location, NavigationResult};
//!
//! let result = NavigationResult::Success {
//!     from: Location::root(),
//!     to: Location::parse("/home"),
//!     action: HistoryAction::Push,
//! };
//! assert!(result.is_success());
//! assert_eq!(result.path(), Some("/home"));
//! ```

use crate::blocker::NavigationAttempt;
use crate::location::{HistoryAction, Location};
use std::fmt;

// ============================================================================
// Navigation Result Types
// ============================================================================

/// Outcome of a navigation attempt on a [`BlockingHistory`](crate::BlockingHistory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// The history moved.
    Success {
        from: Location,
        to: Location,
        action: HistoryAction,
    },
    /// A blocker held the navigation; the history did not move.
    Blocked {
        attempt: NavigationAttempt,
        reason: String,
    },
    /// Navigation error
    Error(NavigationError),
}

/// Detailed error variants that can occur during navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// `back()` at the first entry or `forward()` at the last one.
    HistoryExhausted { action: HistoryAction, at: Location },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::HistoryExhausted { action, at } => {
                write!(f, "No history entry for {} from {}", action, at)
            }
        }
    }
}

impl std::error::Error for NavigationError {}

impl NavigationResult {
    /// Check if navigation was successful
    pub fn is_success(&self) -> bool {
        matches!(self, NavigationResult::Success { .. })
    }

    /// Check if navigation was blocked
    pub fn is_blocked(&self) -> bool {
        matches!(self, NavigationResult::Blocked { .. })
    }

    /// Check if there was an error
    pub fn is_error(&self) -> bool {
        matches!(self, NavigationResult::Error(_))
    }

    /// Destination pathname of a successful navigation.
    pub fn path(&self) -> Option<&str> {
        match self {
            NavigationResult::Success { to, .. } => Some(to.pathname()),
            _ => None,
        }
    }

    /// Convert into a `Result`, treating a block as success with no move.
    pub fn into_result(self) -> Result<Option<Location>, NavigationError> {
        match self {
            NavigationResult::Success { to, .. } => Ok(Some(to)),
            NavigationResult::Blocked { .. } => Ok(None),
            NavigationResult::Error(err) => Err(err),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
