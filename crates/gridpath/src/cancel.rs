use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop request for a running search.
///
/// Clones share one flag. The engine clears it when a search starts and
/// checks it once per expansion, so a request made from a step observer or
/// an input handler stops the search before the next node is expanded.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the search holding this token to stop.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub(crate) fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}
