//! Prompt state

use crate::location::{HistoryAction, Location};

/// State of a [`NavigationPrompt`](crate::NavigationPrompt).
///
/// `Prompting` always carries the held destination, so "active" and "has a
/// pending location" cannot disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PromptState {
    /// No navigation is being held.
    #[default]
    Idle,
    /// A navigation is held until the user confirms or cancels.
    Prompting {
        /// How the history tried to move.
        action: HistoryAction,
        /// Where it tried to go.
        next_location: Location,
    },
}

impl PromptState {
    /// Whether a navigation is currently held.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Prompting { .. })
    }

    /// The held destination.
    pub fn next_location(&self) -> Option<&Location> {
        match self {
            Self::Prompting { next_location, .. } => Some(next_location),
            Self::Idle => None,
        }
    }

    /// The held action.
    pub fn pending_action(&self) -> Option<HistoryAction> {
        match self {
            Self::Prompting { action, .. } => Some(*action),
            Self::Idle => None,
        }
    }
}
