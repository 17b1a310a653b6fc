// Per-call cancellation and deadline.
//
// A director call is a single round trip; the context decides when the
// caller has stopped waiting for it.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::Error;

/// Cancellation token plus optional deadline governing one or more calls.
///
/// Cloning shares the token, so cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that never expires on its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context driven by an existing cancellation token.
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Set an absolute deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel every call sharing this context.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The context error, if the context is already done.
    ///
    /// Explicit cancellation wins over an expired deadline.
    pub fn error(&self) -> Option<Error> {
        if self.cancel.is_cancelled() {
            return Some(Error::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Error::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.error().is_some()
    }

    /// `Err` with the context error if the context is already done.
    pub fn check(&self) -> Result<(), Error> {
        self.error().map_or(Ok(()), Err)
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> Error {
        let Some(deadline) = self.deadline else {
            self.cancel.cancelled().await;
            return Error::Cancelled;
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Error::Cancelled,
            () = tokio::time::sleep_until(deadline) => Error::DeadlineExceeded,
        }
    }

    /// Drive `fut` to completion unless the context finishes first.
    ///
    /// An already-finished context fails without polling `fut`.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Error> {
        self.check()?;
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_context_is_not_done() {
        let ctx = CallContext::new();
        assert!(!ctx.is_done());
        assert!(ctx.check().is_ok());
        assert!(ctx.deadline().is_none());
    }

    #[tokio::test]
    async fn cancelled_context_reports_cancelled() {
        let ctx = CallContext::new();
        ctx.cancel();
        assert!(matches!(ctx.error(), Some(Error::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_expires() {
        let ctx = CallContext::new().with_timeout(Duration::from_secs(5));
        assert!(!ctx.is_done());

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(matches!(ctx.error(), Some(Error::DeadlineExceeded)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_wins_over_expired_deadline() {
        let ctx = CallContext::new().with_timeout(Duration::from_millis(10));
        tokio::time::advance(Duration::from_secs(1)).await;
        ctx.cancel();
        assert!(matches!(ctx.error(), Some(Error::Cancelled)));
    }

    #[tokio::test]
    async fn run_skips_future_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = CallContext::with_cancellation(token);

        let mut polled = false;
        let result = ctx
            .run(async {
                polled = true;
            })
            .await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(!polled);
    }

    #[tokio::test(start_paused = true)]
    async fn run_aborts_pending_future_at_deadline() {
        let ctx = CallContext::new().with_timeout(Duration::from_secs(1));
        let result = ctx.run(std::future::pending::<()>()).await;
        assert!(matches!(result, Err(Error::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn done_without_deadline_waits_for_cancel() {
        let ctx = CallContext::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            canceller.cancel();
        });

        assert!(matches!(ctx.done().await, Error::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn done_with_deadline_reports_expiry() {
        let ctx = CallContext::new().with_timeout(Duration::from_secs(2));
        assert!(matches!(ctx.done().await, Error::DeadlineExceeded));
    }

    #[tokio::test]
    async fn run_returns_output_of_finished_future() {
        let ctx = CallContext::new();
        let result = ctx.run(async { 42 }).await;
        assert!(matches!(result, Ok(42)));
    }
}
