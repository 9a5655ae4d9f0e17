//! Cancellation and deadline propagation
//!
//! Every remote call made by the engine runs inside a [`RequestContext`].
//! When the context is cancelled or its deadline passes, the in-flight
//! request future is dropped, which aborts the HTTP call, and the caller
//! receives [`Error::Cancelled`] or [`Error::DeadlineExceeded`].
//!
//! A cancelled call says nothing about the remote state: the server may
//! already have applied the request.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Per-call cancellation signal and deadline
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Triggers cancellation of every context derived from it
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel all associated contexts
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that can be cancelled through the returned handle
    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        (
            Self {
                cancel: Some(rx),
                deadline: None,
            },
            CancelHandle { tx },
        )
    }

    /// Set an absolute deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Set a deadline relative to now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The effective deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once the associated handle has fired
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Fail fast if the context is already done
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Err(Error::DeadlineExceeded);
        }
        Ok(())
    }

    /// Run `fut` until it completes, the context is cancelled, or the
    /// deadline passes, whichever comes first
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        let cancelled = async {
            match self.cancel.clone() {
                Some(mut rx) => {
                    // A dropped handle can never cancel
                    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(Error::Cancelled),
            _ = expired => Err(Error::DeadlineExceeded),
            result = fut => result,
        }
    }
}
