//! Execution context handed to plugin factories and the server stage.
//!
//! A [`Context`] carries a shutdown signal backed by a
//! [`tokio::sync::watch`] channel. Composition never consults it; it is
//! forwarded so plugins and the HTTP server can react to cancellation.

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct Context {
    shutdown: watch::Receiver<bool>,
}

/// Cancels every [`Context`] cloned from the one it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl Context {
    /// A context that is never cancelled.
    #[must_use]
    pub fn background() -> Self {
        // The sender is dropped right away: `cancelled` then waits forever.
        let (_tx, rx) = watch::channel(false);
        Self { shutdown: rx }
    }

    #[must_use]
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        (Self { shutdown: rx }, CancelHandle { tx })
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Resolves once the context is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.shutdown.clone();
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn cancel_wakes_every_clone() {
        let (ctx, handle) = Context::with_cancel();
        let clone = ctx.clone();
        assert!(!clone.is_cancelled());

        handle.cancel();

        tokio::time::timeout(Duration::from_secs(1), clone.cancelled())
            .await
            .unwrap();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn background_never_cancels() {
        let ctx = Context::background();
        let result = tokio::time::timeout(Duration::from_secs(60), ctx.cancelled()).await;
        assert!(result.is_err());
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_does_not_cancel() {
        let (ctx, handle) = Context::with_cancel();
        drop(handle);
        let result = tokio::time::timeout(Duration::from_secs(60), ctx.cancelled()).await;
        assert!(result.is_err());
    }
}
