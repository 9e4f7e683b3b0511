use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::resolve::Resolved;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Empty,
    Populated(Resolved),
}

/// Issued by [`DealBoard::begin`]; only the newest ticket may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Current view plus the sequencing that keeps a slow, superseded response
/// from overwriting a newer one.
#[derive(Debug, Default)]
pub struct DealBoard {
    issued: AtomicU64,
    view: Mutex<ViewState>,
}

impl DealBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        let mut view = self.lock();
        let ticket = Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        *view = ViewState::Loading;
        ticket
    }

    /// Returns `false` and leaves the view alone when `ticket` is stale.
    pub fn complete(&self, ticket: Ticket, resolved: Resolved) -> bool {
        let mut view = self.lock();
        if ticket.0 != self.issued.load(Ordering::SeqCst) {
            debug!(ticket = ticket.0, "discarding stale response");
            return false;
        }
        *view = if resolved.results.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated(resolved)
        };
        true
    }

    /// Runs `fetch` under a fresh ticket and hands back its own outcome, even
    /// when a newer request has taken over the board in the meantime.
    pub async fn track<F>(&self, fetch: F) -> Resolved
    where
        F: Future<Output = Resolved>,
    {
        let ticket = self.begin();
        let resolved = fetch.await;
        self.complete(ticket, resolved.clone());
        resolved
    }

    pub fn view(&self) -> ViewState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.view
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
