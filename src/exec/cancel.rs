// src/exec/cancel.rs

//! Cancellation of a blocking wait on a child process.

use tokio::sync::oneshot;

/// Receiving half of a cancellation request.
///
/// Fires once when the paired [`oneshot::Sender`] sends `()`. Dropping the
/// sender without sending means "never cancel".
#[derive(Debug)]
pub struct CancelSignal {
    rx: Option<oneshot::Receiver<()>>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self { rx: None }
    }

    /// A sender/signal pair. Send `()` to cancel.
    pub fn pair() -> (oneshot::Sender<()>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx: Some(rx) })
    }

    /// Resolves when cancellation is requested; pending forever otherwise.
    pub async fn fired(self) {
        if let Some(rx) = self.rx {
            if rx.await.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

impl From<oneshot::Receiver<()>> for CancelSignal {
    fn from(rx: oneshot::Receiver<()>) -> Self {
        Self { rx: Some(rx) }
    }
}
