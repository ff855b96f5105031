//! Blockable navigation history.
//!
//! [`BlockingHistory`] is the seam between the prompt and whatever router
//! owns the navigation stack. The crate ships [`MemoryHistory`], an in-memory
//! stack with back/forward support, which is what GPUI apps without a URL bar
//! need anyway.
//!
//! Histories are shared through [`SharedHistory`] (`Rc<RefCell<_>>`): the
//! application navigates through it, and prompts hold a weak reference to it
//! for their [`BlockHandle`].

use crate::blocker::{BlockId, Blocker, NavigationAction, NavigationAttempt};
use crate::error::{NavigationError, NavigationResult};
use crate::location::{HistoryAction, Location};
use crate::{debug_log, trace_log, warn_log};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A history shared between the app and the prompts guarding it.
pub type SharedHistory<H> = Rc<RefCell<H>>;

// ============================================================================
// BlockingHistory trait
// ============================================================================

/// A navigation history that consults blockers before moving.
///
/// Implementations must call every registered blocker with a
/// [`NavigationAttempt`] before changing the current location, and must not
/// move if any of them answers [`NavigationAction::Deny`].
///
/// Blockers run while the history is mutably borrowed, so a blocker must not
/// borrow the same [`SharedHistory`] again.
pub trait BlockingHistory: 'static {
    /// The current location.
    fn location(&self) -> &Location;

    /// Add a new entry on top of the current one.
    fn push(&mut self, to: Location) -> NavigationResult;

    /// Overwrite the current entry.
    fn replace(&mut self, to: Location) -> NavigationResult;

    /// Register a blocker. It stays active until [`unblock`](Self::unblock)
    /// is called with the returned id.
    fn block(&mut self, blocker: Blocker) -> BlockId;

    /// Remove a blocker. Returns `false` if the id was not registered.
    fn unblock(&mut self, id: BlockId) -> bool;

    /// Queue for releases that arrive while the history is borrowed.
    ///
    /// Histories that return one must drain it before their next
    /// navigation. Without a queue such a blocker stays registered.
    fn release_queue(&self) -> Option<ReleaseQueue> {
        None
    }
}

// ============================================================================
// ReleaseQueue
// ============================================================================

/// Block ids whose handles were dropped while the history was borrowed.
#[derive(Clone, Default)]
pub struct ReleaseQueue(Rc<RefCell<Vec<BlockId>>>);

impl ReleaseQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `id` for removal.
    pub fn defer(&self, id: BlockId) {
        self.0.borrow_mut().push(id);
    }

    /// Take every queued id.
    pub fn drain(&self) -> Vec<BlockId> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Number of queued ids.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl std::fmt::Debug for ReleaseQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReleaseQueue").field(&self.0.borrow()).finish()
    }
}

// ============================================================================
// BlockHandle
// ============================================================================

/// Owned registration of one blocker.
///
/// Dropping the handle (or calling [`release`](Self::release)) removes the
/// blocker from the history. A handle cannot be re-pointed at another
/// blocker; to swap blockers, release this one and register a new handle.
pub struct BlockHandle<H: BlockingHistory> {
    history: Weak<RefCell<H>>,
    id: BlockId,
    queue: Option<ReleaseQueue>,
}

impl<H: BlockingHistory> BlockHandle<H> {
    /// Register `blocker` on `history` and return the owning handle.
    pub fn register(history: &SharedHistory<H>, blocker: Blocker) -> Self {
        let (id, queue) = {
            let mut history = history.borrow_mut();
            (history.block(blocker), history.release_queue())
        };
        debug_log!("Registered navigation blocker {}", id);
        Self {
            history: Rc::downgrade(history),
            id,
            queue,
        }
    }

    /// Id of the registered blocker.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Remove the blocker from the history.
    pub fn release(self) {
        drop(self);
    }
}

impl<H: BlockingHistory> Drop for BlockHandle<H> {
    fn drop(&mut self) {
        let Some(history) = self.history.upgrade() else {
            trace_log!("History gone before {} was released", self.id);
            return;
        };
        match history.try_borrow_mut() {
            Ok(mut history) => {
                if history.unblock(self.id) {
                    debug_log!("Released navigation blocker {}", self.id);
                }
            }
            Err(_) => match &self.queue {
                Some(queue) => {
                    debug_log!("History busy; release of {} deferred", self.id);
                    queue.defer(self.id);
                }
                None => {
                    warn_log!(
                        "History busy while releasing {}; blocker left registered",
                        self.id
                    );
                }
            },
        };
    }
}

impl<H: BlockingHistory> std::fmt::Debug for BlockHandle<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// MemoryHistory
// ============================================================================

/// In-memory navigation stack.
pub struct MemoryHistory {
    /// Navigation history stack
    entries: Vec<Location>,
    /// Current position in history
    current: usize,
    /// Registered blockers, in registration order
    blockers: Vec<(BlockId, Blocker)>,
    next_block_id: usize,
    /// Releases deferred while a blocker was running
    released: ReleaseQueue,
}

impl MemoryHistory {
    /// Create a history positioned at `/`.
    pub fn new() -> Self {
        Self::with_initial(Location::root())
    }

    /// Create a history positioned at `initial`.
    pub fn with_initial(initial: impl Into<Location>) -> Self {
        Self {
            entries: vec![initial.into()],
            current: 0,
            blockers: Vec::new(),
            next_block_id: 0,
            released: ReleaseQueue::new(),
        }
    }

    /// Wrap into a [`SharedHistory`].
    pub fn shared(self) -> SharedHistory<Self> {
        Rc::new(RefCell::new(self))
    }

    /// Current pathname.
    pub fn current_path(&self) -> &str {
        self.location().pathname()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    /// Index of the current entry.
    pub fn index(&self) -> usize {
        self.current
    }

    /// Number of registered blockers, not counting deferred releases.
    pub fn blocker_count(&self) -> usize {
        self.blockers.len().saturating_sub(self.released.len())
    }

    /// Go back in history.
    pub fn back(&mut self) -> NavigationResult {
        if !self.can_go_back() {
            return NavigationResult::Error(NavigationError::HistoryExhausted {
                action: HistoryAction::Pop,
                at: self.location().clone(),
            });
        }
        self.transition(self.current - 1, HistoryAction::Pop)
    }

    /// Go forward in history.
    pub fn forward(&mut self) -> NavigationResult {
        if !self.can_go_forward() {
            return NavigationResult::Error(NavigationError::HistoryExhausted {
                action: HistoryAction::Pop,
                at: self.location().clone(),
            });
        }
        self.transition(self.current + 1, HistoryAction::Pop)
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    /// Move to an existing entry after consulting blockers.
    fn transition(&mut self, index: usize, action: HistoryAction) -> NavigationResult {
        self.drain_released();
        let attempt = NavigationAttempt::new(
            self.location().clone(),
            self.entries[index].clone(),
            action,
        );
        if let Some(reason) = self.check_blockers(&attempt) {
            return NavigationResult::Blocked { attempt, reason };
        }
        self.current = index;
        NavigationResult::Success {
            from: attempt.from,
            to: attempt.to,
            action,
        }
    }

    /// Remove blockers whose handles were dropped mid-navigation.
    fn drain_released(&mut self) {
        for id in self.released.drain() {
            if self.remove_blocker(id) {
                debug_log!("Released deferred navigation blocker {}", id);
            }
        }
    }

    fn remove_blocker(&mut self, id: BlockId) -> bool {
        let before = self.blockers.len();
        self.blockers.retain(|(existing, _)| *existing != id);
        self.blockers.len() != before
    }

    /// First denial among the registered blockers, if any.
    fn check_blockers(&self, attempt: &NavigationAttempt) -> Option<String> {
        for (id, blocker) in &self.blockers {
            if let NavigationAction::Deny { reason } = blocker(attempt) {
                debug_log!(
                    "{} held {} {} -> {}: {}",
                    id,
                    attempt.action,
                    attempt.from,
                    attempt.to,
                    reason
                );
                return Some(reason);
            }
        }
        None
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockingHistory for MemoryHistory {
    fn location(&self) -> &Location {
        &self.entries[self.current]
    }

    fn push(&mut self, to: Location) -> NavigationResult {
        self.drain_released();
        let attempt = NavigationAttempt::new(self.location().clone(), to, HistoryAction::Push);
        if let Some(reason) = self.check_blockers(&attempt) {
            return NavigationResult::Blocked { attempt, reason };
        }

        // Remove forward history when pushing
        self.entries.truncate(self.current + 1);
        self.entries.push(attempt.to.clone());
        self.current += 1;
        trace_log!("PUSH {} -> {}", attempt.from, attempt.to);

        NavigationResult::Success {
            from: attempt.from,
            to: attempt.to,
            action: HistoryAction::Push,
        }
    }

    fn replace(&mut self, to: Location) -> NavigationResult {
        self.drain_released();
        let attempt = NavigationAttempt::new(self.location().clone(), to, HistoryAction::Replace);
        if let Some(reason) = self.check_blockers(&attempt) {
            return NavigationResult::Blocked { attempt, reason };
        }

        self.entries[self.current] = attempt.to.clone();
        trace_log!("REPLACE {} -> {}", attempt.from, attempt.to);

        NavigationResult::Success {
            from: attempt.from,
            to: attempt.to,
            action: HistoryAction::Replace,
        }
    }

    fn block(&mut self, blocker: Blocker) -> BlockId {
        self.drain_released();
        let id = BlockId(self.next_block_id);
        self.next_block_id += 1;
        self.blockers.push((id, blocker));
        id
    }

    fn unblock(&mut self, id: BlockId) -> bool {
        self.drain_released();
        self.remove_blocker(id)
    }

    fn release_queue(&self) -> Option<ReleaseQueue> {
        Some(self.released.clone())
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("entries", &self.entries)
            .field("current", &self.current)
            .field("blockers", &self.blockers.len())
            .field("released", &self.released)
            .finish()
    }
}
