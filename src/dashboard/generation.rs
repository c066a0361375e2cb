use std::sync::atomic::{AtomicU64, Ordering};

/// Request-generation counter.
///
/// Every refresh takes a new generation before it suspends on the network;
/// when it resumes, only the holder of the latest generation may write to the
/// view. Overlapping refreshes therefore resolve to the one issued last, not
/// the one that happened to complete last.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request and return its generation
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether no newer request has started since `generation`
    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }
}
