use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{ResolverError, ResolverResult};

/// Per-request cancellation and deadline token.
///
/// Passed as the first argument of every capability method. A context is
/// considered cancelled once its [`CancelHandle`] fires or its deadline passes.
#[derive(Debug, Clone)]
pub struct RequestContext {
    cancelled: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

/// Owner side of a [`RequestContext`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl RequestContext {
    /// Create a cancellable context with an optional deadline.
    pub fn new(timeout: Option<Duration>) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancelled: rx,
            deadline: timeout.map(|t| Instant::now() + t),
        };
        (ctx, CancelHandle { tx })
    }

    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::new(None).0
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail fast with [`ResolverError::Cancelled`] if the context is done.
    pub fn check(&self) -> ResolverResult<()> {
        if self.is_cancelled() {
            Err(ResolverError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) {
        tokio::select! {
            _ = self.cancel_signal() => {}
            _ = self.deadline_elapsed() => {}
        }
    }

    /// Drive `fut` to completion unless the context finishes first.
    ///
    /// `fut` is dropped on cancellation, so it must not hold a partially
    /// applied write across an await point.
    pub async fn guard<T, F>(&self, fut: F) -> ResolverResult<T>
    where
        F: Future<Output = ResolverResult<T>>,
    {
        self.check()?;
        tokio::select! {
            biased;
            _ = self.done() => Err(ResolverError::Cancelled),
            res = fut => res,
        }
    }

    async fn cancel_signal(&self) {
        let mut rx = self.cancelled.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Handle dropped without cancelling.
                std::future::pending::<()>().await;
            }
        }
    }

    async fn deadline_elapsed(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    }
}
