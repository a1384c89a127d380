//! Counters describing pipeline activity.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct PipelineStats {
    pub enqueued: AtomicU64,
    pub suppressed: AtomicU64,
    pub uploaded_batches: AtomicU64,
    pub uploaded_messages: AtomicU64,
    pub failed_batches: AtomicU64,
    pub lost_messages: AtomicU64,
}

impl PipelineStats {
    pub(crate) fn snapshot(&self) -> Stats {
        Stats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            uploaded_batches: self.uploaded_batches.load(Ordering::Relaxed),
            uploaded_messages: self.uploaded_messages.load(Ordering::Relaxed),
            failed_batches: self.failed_batches.load(Ordering::Relaxed),
            lost_messages: self.lost_messages.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of pipeline counters since construction.
///
/// Returned by [`Analytics::stats()`](crate::Analytics::stats). The queue is
/// unbounded, so `enqueued` running ahead of `uploaded_messages` under
/// sustained load is the signal that the endpoint is not keeping up.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Messages that passed the interceptor chain and entered the queue.
    pub enqueued: u64,

    /// Messages dropped by an interceptor before entering the queue.
    pub suppressed: u64,

    /// Batches delivered to the endpoint.
    pub uploaded_batches: u64,

    /// Messages delivered to the endpoint.
    pub uploaded_messages: u64,

    /// Batches the endpoint rejected or the transport failed to deliver.
    pub failed_batches: u64,

    /// Messages lost with failed batches. They are not re-queued.
    pub lost_messages: u64,
}
