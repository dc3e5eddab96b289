use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Orders concurrent fetches of one view.
///
/// Each fetch takes a ticket before it starts; when its response arrives it is
/// applied only if no newer ticket has been issued since. A slow response to
/// an old filter selection therefore never overwrites a newer one.
#[derive(Clone, Debug, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

#[derive(Clone, Debug)]
pub struct RequestTicket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; every earlier ticket becomes stale
    pub fn begin(&self) -> RequestTicket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            id,
            latest: self.latest.clone(),
        }
    }
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}
