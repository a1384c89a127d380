use std::time::Duration;

use tokio::sync::mpsc;

use crate::message::Message;

/// Control entries travel the same queue as data, so a flush or shutdown
/// requested after N messages is observed by the worker only after those N
/// messages.
#[derive(Debug)]
pub(crate) enum Action {
    Flush,
    Shutdown,
}

#[derive(Debug)]
pub(crate) enum Request {
    Message(Message),
    Action(Action),
}

pub(crate) fn channel() -> (QueueSender, QueueReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();

    (QueueSender { tx }, QueueReceiver { rx })
}

/// Producer half. Unbounded: `push` never blocks and only fails once the
/// worker has gone away.
#[derive(Clone)]
pub(crate) struct QueueSender {
    tx: mpsc::UnboundedSender<Request>,
}

impl QueueSender {
    pub(crate) fn push(&self, req: Request) -> Result<(), Request> {
        self.tx.send(req).map_err(|mpsc::error::SendError(req)| req)
    }
}

/// Consumer half, owned by the single batch worker.
pub(crate) struct QueueReceiver {
    rx: mpsc::UnboundedReceiver<Request>,
}

pub(crate) enum Pop {
    Entry(Request),
    TimedOut,
    Closed,
}

impl QueueReceiver {
    /// Blocks the worker until an entry arrives or `duration` elapses.
    /// Timing out lets the caller re-check the time-based flush trigger even
    /// with no traffic.
    pub(crate) async fn pop_timeout(&mut self, duration: Duration) -> Pop {
        match tokio::time::timeout(duration, self.rx.recv()).await {
            Ok(Some(entry)) => Pop::Entry(entry),
            Ok(None) => Pop::Closed,
            Err(_) => Pop::TimedOut,
        }
    }
}
