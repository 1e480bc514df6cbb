use bell_dns_domain::config::SelectorKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Picks the resolver used for NS discovery.
pub trait NameserverSelector: Send + Sync {
    fn select<'a>(&self, pool: &'a [String]) -> Option<&'a str>;
}

/// Uniform random choice; seedable for reproducible runs.
pub struct RandomSelector {
    rng: Mutex<fastrand::Rng>,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl NameserverSelector for RandomSelector {
    fn select<'a>(&self, pool: &'a [String]) -> Option<&'a str> {
        if pool.is_empty() {
            return None;
        }
        let idx = self
            .rng
            .lock()
            .map(|mut rng| rng.usize(..pool.len()))
            .unwrap_or(0);
        pool.get(idx).map(String::as_str)
    }
}

/// Cycles through the pool in order.
#[derive(Default)]
pub struct RoundRobinSelector {
    next: AtomicUsize,
}

impl RoundRobinSelector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameserverSelector for RoundRobinSelector {
    fn select<'a>(&self, pool: &'a [String]) -> Option<&'a str> {
        if pool.is_empty() {
            return None;
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % pool.len();
        pool.get(idx).map(String::as_str)
    }
}

pub fn build_selector(kind: SelectorKind) -> Arc<dyn NameserverSelector> {
    match kind {
        SelectorKind::Random => Arc::new(RandomSelector::new()),
        SelectorKind::RoundRobin => Arc::new(RoundRobinSelector::new()),
    }
}
