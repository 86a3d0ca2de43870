//! Retry backoff calculation

use std::time::Duration;

/// Base unit for the backoff schedule.
const BASE: Duration = Duration::from_millis(100);

/// Delay before retry `attempt` (1-based): `attempt² × 100ms`.
///
/// Quadratic growth, no jitter. The schedule is short enough that
/// synchronized retries are not a concern for a client SDK.
pub fn delay_for_attempt(attempt: u32) -> Duration {
    BASE * attempt.saturating_mul(attempt)
}
