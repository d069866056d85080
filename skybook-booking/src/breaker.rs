use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,   // Normal operation
    Open,     // Failure detected, failing fast
    HalfOpen, // Testing if the upstream is back
}

/// Tunables for the flight-lookup breaker; all come from configuration.
#[derive(Debug, Clone)]
pub struct BreakerConfig {
    /// Consecutive failures before the circuit trips open.
    pub failure_threshold: usize,
    /// How long the circuit stays open before trial calls are allowed.
    pub open_duration: Duration,
    /// Successful trial calls required to close again.
    pub half_open_trials: usize,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            open_duration: Duration::from_secs(30),
            half_open_trials: 1,
        }
    }
}

/// Explicit Closed/Open/HalfOpen state machine guarding the remote
/// flight lookup. While open, callers must not attempt the call and
/// should fail fast instead.
pub struct CircuitBreaker {
    name: String,
    config: BreakerConfig,
    state: RwLock<CircuitState>,
    failure_count: AtomicUsize,
    half_open_successes: AtomicUsize,
    last_failure: RwLock<Option<Instant>>,
}

impl CircuitBreaker {
    pub fn new(name: &str, config: BreakerConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicUsize::new(0),
            half_open_successes: AtomicUsize::new(0),
            last_failure: RwLock::new(None),
        }
    }

    pub async fn state(&self) -> CircuitState {
        *self.state.read().await
    }

    /// Returns whether a call may proceed. An open circuit transitions
    /// to half-open once the open duration has elapsed.
    pub async fn try_acquire(&self) -> bool {
        let state = *self.state.read().await;
        if state == CircuitState::Closed {
            return true;
        }

        if state == CircuitState::Open {
            let last_fail = *self.last_failure.read().await;
            if let Some(instant) = last_fail {
                if instant.elapsed() > self.config.open_duration {
                    let mut s = self.state.write().await;
                    *s = CircuitState::HalfOpen;
                    self.half_open_successes.store(0, Ordering::SeqCst);
                    tracing::info!("Circuit Breaker [{}] moving to Half-Open", self.name);
                    return true;
                }
            }
            return false;
        }

        // Half-Open allows trial requests through
        true
    }

    pub async fn record_success(&self) {
        let mut state = self.state.write().await;
        match *state {
            CircuitState::HalfOpen => {
                let successes = self.half_open_successes.fetch_add(1, Ordering::SeqCst) + 1;
                if successes >= self.config.half_open_trials {
                    *state = CircuitState::Closed;
                    self.failure_count.store(0, Ordering::SeqCst);
                    tracing::info!("Circuit Breaker [{}] recovered to Closed", self.name);
                }
            }
            CircuitState::Closed => {
                self.failure_count.store(0, Ordering::SeqCst);
            }
            CircuitState::Open => {}
        }
    }

    pub async fn record_failure(&self) {
        let count = self.failure_count.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.write().await;

        if count >= self.config.failure_threshold || *state == CircuitState::HalfOpen {
            *state = CircuitState::Open;
            let mut last = self.last_failure.write().await;
            *last = Some(Instant::now());
            tracing::error!(
                "Circuit Breaker [{}] TRIPPED to Open. Failures: {}",
                self.name,
                count
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(threshold: usize, open_ms: u64, trials: usize) -> CircuitBreaker {
        CircuitBreaker::new(
            "test",
            BreakerConfig {
                failure_threshold: threshold,
                open_duration: Duration::from_millis(open_ms),
                half_open_trials: trials,
            },
        )
    }

    #[tokio::test]
    async fn trips_open_after_threshold_failures() {
        let cb = breaker(3, 60_000, 1);
        assert!(cb.try_acquire().await);

        cb.record_failure().await;
        cb.record_failure().await;
        assert_eq!(cb.state().await, CircuitState::Closed);

        cb.record_failure().await;
        assert_eq!(cb.state().await, CircuitState::Open);
        assert!(!cb.try_acquire().await);
    }

    #[tokio::test]
    async fn success_resets_consecutive_failures() {
        let cb = breaker(2, 60_000, 1);
        cb.record_failure().await;
        cb.record_success().await;
        cb.record_failure().await;
        assert_eq!(cb.state().await, CircuitState::Closed);
    }

    #[tokio::test]
    async fn half_open_trial_closes_on_success() {
        let cb = breaker(1, 1, 1);
        cb.record_failure().await;
        assert_eq!(cb.state().await, CircuitState::Open);

        std::thread::sleep(Duration::from_millis(5));
        assert!(cb.try_acquire().await);
        assert_eq!(cb.state().await, CircuitState::HalfOpen);

        cb.record_success().await;
        assert_eq!(cb.state().await, CircuitState::Closed);
    }

    #[tokio::test]
    async fn half_open_failure_reopens() {
        let cb = breaker(1, 1, 1);
        cb.record_failure().await;
        std::thread::sleep(Duration::from_millis(5));
        assert!(cb.try_acquire().await);

        cb.record_failure().await;
        assert_eq!(cb.state().await, CircuitState::Open);
        assert!(!cb.try_acquire().await);
    }

    #[tokio::test]
    async fn requires_configured_trial_successes_to_close() {
        let cb = breaker(1, 1, 2);
        cb.record_failure().await;
        std::thread::sleep(Duration::from_millis(5));
        assert!(cb.try_acquire().await);

        cb.record_success().await;
        assert_eq!(cb.state().await, CircuitState::HalfOpen);
        cb.record_success().await;
        assert_eq!(cb.state().await, CircuitState::Closed);
    }
}
