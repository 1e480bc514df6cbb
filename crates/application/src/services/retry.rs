use bell_dns_domain::config::DnsQueryConfig;
use bell_dns_domain::DomainError;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Exponential backoff for DNS exchanges.
///
/// Only transport failures ([`DomainError::is_transport`]) are retried; any
/// other error is returned at once. Sleeps go through `tokio::time`, so tests
/// drive the schedule with a paused clock.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    multiplier: f64,
    max_delay: Duration,
    jitter: f64,
    rng: Arc<Mutex<fastrand::Rng>>,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, multiplier: f64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            multiplier: multiplier.max(1.0),
            max_delay: Duration::from_secs(60),
            jitter: 0.0,
            rng: Arc::new(Mutex::new(fastrand::Rng::new())),
        }
    }

    pub fn from_config(cfg: &DnsQueryConfig) -> Self {
        Self::new(
            cfg.max_attempts,
            Duration::from_millis(cfg.retry_base_delay_ms),
            cfg.retry_multiplier,
        )
        .with_max_delay(Duration::from_millis(cfg.retry_max_delay_ms))
        .with_jitter(cfg.retry_jitter)
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Randomisation factor: each delay is drawn from `d * [1 - j, 1 + j]`.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        if let Ok(mut rng) = self.rng.lock() {
            rng.seed(seed);
        }
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay slept after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(32) as i32;
        let nominal = self.base_delay.as_secs_f64() * self.multiplier.powi(exp);
        let capped = nominal.min(self.max_delay.as_secs_f64());

        let factor = if self.jitter > 0.0 {
            let unit = self.rng.lock().map(|mut rng| rng.f64()).unwrap_or(0.5);
            1.0 - self.jitter + 2.0 * self.jitter * unit
        } else {
            1.0
        };

        let micros = (capped * factor * 1_000_000.0).round().max(0.0);
        Duration::from_micros(micros as u64)
    }

    /// Runs `op` until it succeeds, fails with a non-transport error, or the
    /// attempt ceiling is reached. The last error is returned on exhaustion.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transport() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying after transport failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&DnsQueryConfig::default())
    }
}
