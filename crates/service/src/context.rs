//! Per-call deadline and cancellation.
//!
//! Every storage call receives a [`Context`]. Adapters run their work through
//! [`Context::run`], which drops the in-flight future as soon as the deadline
//! passes or the paired [`Canceller`] fires.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::errors::CarError;

#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Fires the cancel signal of the contexts created with it.
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// No deadline, never cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self { deadline: Some(deadline), cancel: None }
    }

    /// Derive a context that can additionally be cancelled explicitly.
    pub fn cancellable(self) -> (Self, Canceller) {
        let (tx, rx) = watch::channel(false);
        (Self { cancel: Some(rx), ..self }, Canceller { tx })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// The error the context has already fired with, if any.
    pub fn check(&self) -> Result<(), CarError> {
        if self.is_cancelled() {
            return Err(CarError::Cancelled);
        }
        if self.is_expired() {
            return Err(CarError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drive `fut` unless the context fires first.
    ///
    /// A context that has already fired never polls `fut`.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, CarError>
    where
        F: Future<Output = Result<T, CarError>>,
    {
        self.check()?;
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(CarError::Cancelled),
            _ = self.expired() => Err(CarError::DeadlineExceeded),
            res = fut => res,
        }
    }

    async fn cancelled(&self) {
        if let Some(rx) = &self.cancel {
            let mut rx = rx.clone();
            if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
                return;
            }
        }
        // canceller dropped without firing
        std::future::pending::<()>().await
    }

    async fn expired(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    }
}
