//! View lifecycle and stale-response protection.
//!
//! A view moves `Loading -> Error | Ready` on every fetch. Fetches are numbered
//! with strictly increasing generations, and a [`ViewSlot`] only accepts the
//! result of the newest one, so a slow response can never overwrite the
//! response of a request issued after it.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// The only failure message shown to users.
pub const LOAD_FAILURE: &str = "Failed to load data";

/// State of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> ViewState<T> {
    /// Collapse a fetch result; error detail is logged, never shown.
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                debug!(error = %e, "View load failed");
                Self::Error(LOAD_FAILURE.to_string())
            }
        }
    }
}

/// Monotonic request counter. The first generation handed out is 1.
#[derive(Debug, Default)]
pub struct Generations {
    latest: AtomicU64,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next generation.
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Most recently issued generation, 0 when none was issued.
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest() == generation
    }
}

/// Proof that a fetch was started; redeemed with [`ViewSlot::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// A view state that only the newest fetch may settle.
#[derive(Debug)]
pub struct ViewSlot<T> {
    generations: Generations,
    state: Mutex<ViewState<T>>,
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self {
            generations: Generations::new(),
            state: Mutex::new(ViewState::Loading),
        }
    }
}

impl<T: Clone> ViewSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch: the slot goes back to `Loading` and older tickets
    /// become stale.
    pub fn begin(&self) -> Ticket {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let ticket = Ticket(self.generations.next());
        *state = ViewState::Loading;
        ticket
    }

    /// Store the result of the fetch identified by `ticket` and return the
    /// state it produced, read under the same lock.
    ///
    /// Returns `None` and leaves the slot untouched when a newer fetch has
    /// begun since.
    pub fn settle<E: Display>(&self, ticket: Ticket, result: Result<T, E>) -> Option<ViewState<T>> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !self.generations.is_current(ticket.0) {
            debug!(
                generation = ticket.0,
                latest = self.generations.latest(),
                "Discarding stale response"
            );
            return None;
        }
        *state = ViewState::from_result(result);
        Some(state.clone())
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn latest_generation(&self) -> u64 {
        self.generations.latest()
    }
}
