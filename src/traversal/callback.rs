//! Continuation and completion callbacks

use crate::error::{Error, Result};
use std::future::Future;
use tokio::sync::oneshot;

/// Continuation handed to an `each_with_done` callback
///
/// The next record is delivered only once this signal is completed. Every
/// completing method takes the signal by value, so it fires at most once.
/// Dropping it without completing stops the traversal with
/// [`Error::DoneSignalDropped`].
#[derive(Debug)]
pub struct DoneSignal {
    sender: oneshot::Sender<Result<()>>,
}

impl DoneSignal {
    pub(crate) fn new() -> (Self, oneshot::Receiver<Result<()>>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Ask for the next record
    pub fn done(self) {
        self.complete(Ok(()));
    }

    /// Stop the traversal with `error`
    pub fn fail(self, error: Error) {
        self.complete(Err(error));
    }

    /// Continue on `Ok`, stop on `Err`
    pub fn complete(self, result: Result<()>) {
        // The receiver is gone only when the traversal itself was dropped
        let _ = self.sender.send(result);
    }
}

/// Wait for the continuation of one record
pub(crate) async fn await_signal(receiver: oneshot::Receiver<Result<()>>) -> Result<()> {
    receiver.await.unwrap_or(Err(Error::DoneSignalDropped))
}

/// Run `operation` and also hand its result to a completion callback
///
/// The callback sees the result by reference; the caller still gets it back.
///
/// ```rust,ignore
/// let rooms = with_callback(rooms.list(ListOptions::new()), |result| match result {
///     Ok(rooms) => info!("fetched {} rooms", rooms.len()),
///     Err(e) => warn!("listing rooms failed: {e}"),
/// })
/// .await?;
/// ```
pub async fn with_callback<T, Fut, C>(operation: Fut, callback: C) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
    C: FnOnce(&Result<T>),
{
    let result = operation.await;
    callback(&result);
    result
}
