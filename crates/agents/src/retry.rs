use super::*;
use std::future::Future;
use std::time::Duration;

/// Bounded retry with exponential backoff for capability calls.
///
/// Each attempt runs under its own time box. Only transient failures
/// (unavailable transport, malformed payload) are retried; an inapplicable
/// move returns immediately so the caller can prune.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub attempts: u32,
    /// Backoff before the first retry; doubles per attempt.
    pub backoff: Duration,
    /// Time box per attempt.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: bdr_core::CAPABILITY_RETRIES,
            backoff: bdr_core::RETRY_BACKOFF,
            timeout: bdr_core::CAPABILITY_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    /// No retries, no backoff; keeps the per-attempt time box.
    pub fn once() -> Self {
        Self {
            attempts: 0,
            backoff: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Runs `f`, retrying transient failures up to `attempts` extra times.
    /// `what` tags log lines and error causes.
    pub async fn run<T, F, Fut>(&self, what: &str, f: F) -> Result<T, CapabilityError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, CapabilityError>>,
    {
        let mut delay = self.backoff;
        let mut last = CapabilityError::Unavailable(format!("{}: never attempted", what));
        for attempt in 0..=self.attempts {
            if attempt > 0 {
                log::debug!("[retry] {}: attempt {} after {:?}", what, attempt + 1, delay);
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
            match tokio::time::timeout(self.timeout, f()).await {
                Err(_) => {
                    last = CapabilityError::Unavailable(format!("{}: timed out", what));
                }
                Ok(Err(e)) if e.is_transient() => last = e,
                Ok(Err(e)) => return Err(e),
                Ok(Ok(value)) => return Ok(value),
            }
        }
        log::warn!("[retry] {}: giving up after {} attempts", what, self.attempts + 1);
        Err(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::atomic::Ordering;

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();
        let out = policy
            .run("flaky", || async {
                match calls.fetch_add(1, Ordering::SeqCst) {
                    0 | 1 => Err(CapabilityError::Unavailable("down".into())),
                    _ => Ok(42),
                }
            })
            .await;
        assert_eq!(out, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn inapplicable_is_not_retried() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();
        let out: Result<(), _> = policy
            .run("prunable", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(CapabilityError::Inapplicable("no budget".into()))
            })
            .await;
        assert_eq!(out, Err(CapabilityError::Inapplicable("no budget".into())));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_surfaces_last_error() {
        let policy = RetryPolicy::default();
        let out: Result<(), _> = policy
            .run("dead", || async { Err(CapabilityError::Unavailable("still down".into())) })
            .await;
        assert_eq!(out, Err(CapabilityError::Unavailable("still down".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_attempts_time_out() {
        let policy = RetryPolicy::once();
        let out: Result<(), _> = policy
            .run("stuck", || async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            })
            .await;
        assert!(matches!(out, Err(CapabilityError::Unavailable(_))));
    }
}
