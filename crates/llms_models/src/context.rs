//! Cancellation and deadline carrier threaded through every model call.
//!
//! The generation helpers never look inside a [`Context`]; they hand the
//! same reference to [`Model::generate_content`](crate::llm::Model::generate_content).
//! Adapters decide how to honor it, usually through [`Context::run`].

use crate::llm::GenerationError;
use core::future::Future;
use core::time::Duration;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Carries the cancellation signal and optional deadline of a call.
///
/// Cloning a context shares its cancellation state. Use [`child`](Self::child)
/// for a context that can be cancelled on its own without affecting the parent.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// Creates a context that is never done unless cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context driven by an existing cancellation token.
    #[must_use]
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancellation: token,
            deadline: None,
        }
    }

    /// Sets an absolute deadline. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Sets a deadline relative to now.
    ///
    /// A timeout too large to represent as an [`Instant`] (e.g.
    /// [`Duration::MAX`]) leaves the deadline unchanged.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Derives a context that is cancelled with this one but can also be
    /// cancelled independently. The deadline is inherited.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
            deadline: self.deadline,
        }
    }

    /// Requests cancellation of this context and all of its children.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns the underlying cancellation token.
    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Returns `true` once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` once the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Returns why the context is done, or `None` while it is still live.
    ///
    /// Cancellation takes precedence over an expired deadline.
    #[must_use]
    pub fn err(&self) -> Option<GenerationError> {
        if self.is_cancelled() {
            Some(GenerationError::Cancelled)
        } else if self.is_expired() {
            Some(GenerationError::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Waits until the context is cancelled or its deadline passes.
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    () = self.cancellation.cancelled() => {}
                    () = tokio::time::sleep_until(deadline.into()) => {}
                }
            }
            None => self.cancellation.cancelled().await,
        }
    }

    /// Runs `fut` to completion unless the context finishes first.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Cancelled`] or [`GenerationError::DeadlineExceeded`]
    /// if the context is done before or while `fut` runs.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, GenerationError>
    where
        F: Future<Output = T>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        tokio::select! {
            biased;
            () = self.done() => Err(self.err().unwrap_or(GenerationError::DeadlineExceeded)),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_live() {
        let ctx = Context::new();
        assert!(!ctx.is_cancelled());
        assert!(!ctx.is_expired());
        assert!(ctx.deadline().is_none());
        assert!(ctx.err().is_none());
    }

    #[test]
    fn clones_share_cancellation() {
        let ctx = Context::new();
        let clone = ctx.clone();

        clone.cancel();

        assert!(ctx.is_cancelled());
        assert!(matches!(ctx.err(), Some(GenerationError::Cancelled)));
    }

    #[test]
    fn child_is_cancelled_by_parent_but_not_the_reverse() {
        let parent = Context::new();
        let child = parent.child();
        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());

        let other_child = parent.child();
        parent.cancel();
        assert!(other_child.is_cancelled());
    }

    #[test]
    fn earlier_deadline_wins() {
        let now = Instant::now();
        let early = now + Duration::from_secs(1);
        let late = now + Duration::from_secs(60);

        let ctx = Context::new().with_deadline(early).with_deadline(late);
        assert_eq!(ctx.deadline(), Some(early));
    }

    #[test]
    fn past_deadline_reports_deadline_exceeded() {
        let ctx = Context::new().with_deadline(Instant::now());
        assert!(ctx.is_expired());
        assert!(matches!(ctx.err(), Some(GenerationError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn unrepresentable_timeout_means_no_deadline() {
        let ctx = Context::new().with_timeout(Duration::MAX);
        assert!(ctx.deadline().is_none());
        assert!(ctx.err().is_none());

        let out = ctx.run(async { 7 }).await.unwrap();
        assert_eq!(out, 7);

        let bounded = Context::new()
            .with_timeout(Duration::from_secs(5))
            .with_timeout(Duration::MAX);
        assert!(bounded.deadline().is_some());
    }

    #[tokio::test]
    async fn run_completes_live_future() {
        let ctx = Context::new().with_timeout(Duration::from_secs(30));
        let out = ctx.run(async { 7 }).await.unwrap();
        assert_eq!(out, 7);
    }

    #[tokio::test]
    async fn run_refuses_already_cancelled_context() {
        let ctx = Context::new();
        ctx.cancel();

        let result = ctx.run(async { 7 }).await;
        assert!(matches!(result, Err(GenerationError::Cancelled)));
    }

    #[tokio::test]
    async fn run_stops_pending_future_on_cancel() {
        let ctx = Context::new();
        let canceller = ctx.clone();

        let handle = tokio::spawn(async move { ctx.run(core::future::pending::<()>()).await });
        canceller.cancel();

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(GenerationError::Cancelled)));
    }

    #[tokio::test]
    async fn run_stops_pending_future_at_deadline() {
        let ctx = Context::new().with_timeout(Duration::from_millis(20));

        let result = ctx.run(core::future::pending::<()>()).await;
        assert!(matches!(result, Err(GenerationError::DeadlineExceeded)));
    }
}
