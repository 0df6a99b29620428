//! Monotonic request tags used to discard out-of-order responses.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues strictly increasing sequence numbers, starting at 1.
///
/// A request is tagged when it is issued; its response may only be
/// applied if no response with a higher tag has been applied already.
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag for a request about to be issued.
    pub fn next(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Highest tag issued so far (0 if none).
    pub fn last_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}
