//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream calls with a deadline
//! - Pick the deadline by call class (data vs. health probe)
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - The deadline covers connect, response head and body

use std::future::Future;
use std::time::Duration;

use crate::config::TimeoutConfig;

/// Class of upstream call, selecting which configured deadline applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallClass {
    /// Product/order reads and writes.
    Data,
    /// Upstream `/health` probes; these must fail fast.
    Health,
}

impl CallClass {
    pub fn deadline(self, timeouts: &TimeoutConfig) -> Duration {
        match self {
            CallClass::Data => timeouts.data(),
            CallClass::Health => timeouts.health(),
        }
    }
}

/// The wrapped future did not finish before its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deadline of {}ms exceeded", .0.as_millis())]
pub struct DeadlineExceeded(pub Duration);

/// Run `fut` to completion or fail once `deadline` elapses.
///
/// The future is dropped on timeout, which aborts any I/O it owns.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> Result<T, DeadlineExceeded>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| DeadlineExceeded(deadline))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_class_deadlines() {
        let timeouts = TimeoutConfig::default();
        assert_eq!(CallClass::Data.deadline(&timeouts), Duration::from_millis(5000));
        assert_eq!(CallClass::Health.deadline(&timeouts), Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let value = with_deadline(Duration::from_millis(100), async { 7 }).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let slow = tokio::time::sleep(Duration::from_secs(10));
        let err = with_deadline(Duration::from_millis(50), slow).await.unwrap_err();
        assert_eq!(err, DeadlineExceeded(Duration::from_millis(50)));
        assert_eq!(err.to_string(), "deadline of 50ms exceeded");
    }
}
