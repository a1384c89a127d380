use std::mem;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::message::Message;
use crate::queue::{Action, Pop, QueueReceiver, Request};
use crate::stats::PipelineStats;
use crate::uploader::{Batch, Uploader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingEntry,
    Accumulating,
    Flushing,
    ShuttingDown,
    Terminated,
}

/// Single consumer of the queue. Drains entries, accumulates the in-progress
/// batch and decides when to flush.
///
/// Two independent triggers: batch size reaching `flush_queue_size`, and
/// `flush_interval` elapsing with a non-empty batch. Either one firing is
/// sufficient. Uploads are awaited in place, so at most one batch is in
/// flight and the endpoint never sees overlapping batches from one client.
pub(crate) struct BatchWorker {
    queue: QueueReceiver,
    uploader: Uploader,
    flush_queue_size: usize,
    flush_interval: Duration,
    batch: Vec<Message>,
    stats: Arc<PipelineStats>,
}

impl BatchWorker {
    pub(crate) fn new(
        queue: QueueReceiver,
        uploader: Uploader,
        flush_queue_size: usize,
        flush_interval: Duration,
        stats: Arc<PipelineStats>,
    ) -> Self {
        Self {
            queue,
            uploader,
            flush_queue_size,
            flush_interval,
            batch: Vec::with_capacity(flush_queue_size),
            stats,
        }
    }

    pub(crate) async fn run(mut self) {
        let mut state = State::AwaitingEntry;

        loop {
            state = match state {
                State::AwaitingEntry | State::Accumulating => self.next_entry().await,
                State::Flushing => {
                    self.flush().await;
                    State::AwaitingEntry
                }
                // Exactly one final flush, then the task ends. Entries pushed
                // concurrently with shutdown are discarded.
                State::ShuttingDown => {
                    self.flush().await;
                    State::Terminated
                }
                State::Terminated => break,
            };
        }

        log::debug!("batch worker terminated");
    }

    async fn next_entry(&mut self) -> State {
        match self.queue.pop_timeout(self.flush_interval).await {
            Pop::Entry(Request::Message(message)) => {
                self.batch.push(message);

                if self.batch.len() >= self.flush_queue_size {
                    State::Flushing
                } else {
                    State::Accumulating
                }
            }
            Pop::Entry(Request::Action(Action::Flush)) => State::Flushing,
            Pop::Entry(Request::Action(Action::Shutdown)) | Pop::Closed => State::ShuttingDown,
            Pop::TimedOut => {
                if self.batch.is_empty() {
                    State::AwaitingEntry
                } else {
                    State::Flushing
                }
            }
        }
    }

    /// Flushing an empty batch skips the upload entirely.
    async fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }

        let sealed = Batch::seal(mem::replace(
            &mut self.batch,
            Vec::with_capacity(self.flush_queue_size),
        ));
        let count = sealed.len();

        match self.uploader.upload(sealed).await {
            Ok(count) => {
                self.stats.uploaded_batches.fetch_add(1, Ordering::Relaxed);
                self.stats
                    .uploaded_messages
                    .fetch_add(count as u64, Ordering::Relaxed);
            }
            Err(err) => {
                self.stats.failed_batches.fetch_add(1, Ordering::Relaxed);
                self.stats
                    .lost_messages
                    .fetch_add(count as u64, Ordering::Relaxed);

                log::error!(
                    "failed to upload batch, dropping {} messages: {}",
                    count,
                    err
                );
            }
        }
    }
}
