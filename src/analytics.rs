use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::builder::AnalyticsBuilder;
use crate::error::Error;
use crate::interceptor::InterceptorChain;
use crate::message::Message;
use crate::queue::{Action, QueueSender, Request};
use crate::stats::{PipelineStats, Stats};

/// The entry point of the pipeline.
///
/// Cheap to clone; all clones share one queue and one batch worker. Producer
/// calls (`enqueue`, `flush`) never block on I/O or on the worker's
/// progress, and never fail for transient backend issues — upload failures
/// surface only through logging and [`stats`](Analytics::stats).
#[derive(Clone)]
pub struct Analytics {
    inner: Arc<AnalyticsInner>,
}

struct AnalyticsInner {
    chain: InterceptorChain,
    queue: QueueSender,
    closed: AtomicBool,
    worker: Mutex<Option<JoinHandle<()>>>,
    stats: Arc<PipelineStats>,
}

impl Analytics {
    pub fn builder(write_key: impl Into<String>) -> AnalyticsBuilder {
        AnalyticsBuilder::new(write_key)
    }

    pub(crate) fn new(
        chain: InterceptorChain,
        queue: QueueSender,
        worker: JoinHandle<()>,
        stats: Arc<PipelineStats>,
    ) -> Self {
        Self {
            inner: Arc::new(AnalyticsInner {
                chain,
                queue,
                closed: AtomicBool::new(false),
                worker: Mutex::new(Some(worker)),
                stats,
            }),
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Runs the interceptor chain and queues the message for upload.
    ///
    /// Suppression by an interceptor is a silent `Ok`, observable only via
    /// logging and stats.
    pub fn enqueue(&self, message: Message) -> Result<(), Error> {
        if self.is_closed() {
            return Err(Error::ClientShutdown);
        }

        let message = match self.inner.chain.run(message) {
            Some(message) => message,
            None => {
                self.inner.stats.suppressed.fetch_add(1, Ordering::Relaxed);
                return Ok(());
            }
        };

        self.inner.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        self.inner
            .queue
            .push(Request::Message(message))
            .map_err(|_| Error::ClientShutdown)
    }

    /// Asks the worker to upload whatever has accumulated. Fire-and-forget:
    /// returns once the signal is queued, ordered after all previously
    /// enqueued messages.
    pub fn flush(&self) -> Result<(), Error> {
        if self.is_closed() {
            return Err(Error::ClientShutdown);
        }

        self.inner
            .queue
            .push(Request::Action(Action::Flush))
            .map_err(|_| Error::ClientShutdown)
    }

    /// Stops the pipeline: the worker drains entries queued before this
    /// call, uploads one final batch and exits. Returns after the worker has
    /// terminated. Any later `enqueue`/`flush`/`shutdown` errors with
    /// [`Error::ClientShutdown`].
    pub async fn shutdown(&self) -> Result<(), Error> {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return Err(Error::ClientShutdown);
        }

        self.inner
            .queue
            .push(Request::Action(Action::Shutdown))
            .map_err(|_| Error::ClientShutdown)?;

        let worker = self.inner.worker.lock().take();
        if let Some(worker) = worker {
            if let Err(err) = worker.await {
                log::error!("batch worker task failed: {}", err);
            }
        }

        Ok(())
    }

    /// [`shutdown`](Analytics::shutdown) for non-async callers. Must not be
    /// called from within a tokio runtime.
    pub fn shutdown_blocking(&self) -> Result<(), Error> {
        futures::executor::block_on(self.shutdown())
    }

    pub fn stats(&self) -> Stats {
        self.inner.stats.snapshot()
    }
}
