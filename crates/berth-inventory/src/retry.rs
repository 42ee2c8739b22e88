//! Bounded retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use tracing::error;

use crate::error::{InventoryError, InventoryResult};

/// Retry policy: how many attempts, and how the delay between them grows.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_tries: u32,
    pub initial_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_tries: 5,
            initial_delay: Duration::from_millis(500),
            multiplier: 2.0,
        }
    }
}

/// Run `op` until it succeeds or the policy is exhausted.
///
/// Each failure short of exhaustion is logged with its attempt count and
/// retried after a backoff delay. Exhaustion returns `RetriesExhausted`
/// wrapping the last error; callers decide whether that is fatal.
pub async fn retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> InventoryResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = InventoryResult<T>>,
{
    let mut attempt = 0u32;
    let mut delay = policy.initial_delay;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                error!(count = attempt, error = %err, "retry");
                if attempt >= policy.max_tries {
                    return Err(InventoryError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(err),
                    });
                }
            }
        }

        tokio::time::sleep(delay).await;
        delay = delay.mul_f64(policy.multiplier);
    }
}
