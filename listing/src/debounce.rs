//! Trailing-edge debounce for search input.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Publishes a value once no newer value has been pushed for `delay`.
///
/// Every push restarts the timer. Settled values are delivered on the
/// [`watch::Receiver`] returned by [`Debouncer::new`]. The background task
/// stops when the debouncer is dropped, and a pending value is discarded.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Send + Sync + 'static,
{
    /// Must be called from within a tokio runtime.
    pub fn new(delay: Duration, initial: T) -> (Self, watch::Receiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = watch::channel(initial);
        let task = tokio::spawn(run(delay, rx, settled_tx));

        (Debouncer { tx, task }, settled_rx)
    }

    pub fn push(&self, value: T) {
        // Only fails once the task is gone, which happens on drop.
        let _ = self.tx.send(value);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(delay: Duration, mut rx: mpsc::UnboundedReceiver<T>, settled_tx: watch::Sender<T>) {
    let mut pending = None;

    loop {
        match pending.take() {
            None => match rx.recv().await {
                Some(value) => pending = Some(value),
                None => break,
            },
            Some(value) => {
                tokio::select! {
                    next = rx.recv() => match next {
                        Some(newer) => pending = Some(newer),
                        None => break,
                    },
                    _ = sleep(delay) => {
                        tracing::trace!("Debounced value settled");
                        if settled_tx.send(value).is_err() {
                            // Nobody is listening anymore.
                            break;
                        }
                    }
                }
            }
        }
    }
}
