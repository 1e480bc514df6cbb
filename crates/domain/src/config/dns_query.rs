use serde::{Deserialize, Serialize};

/// How the NS discovery server is picked from `dns_servers`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    #[default]
    Random,
    RoundRobin,
}

/// Active resolution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsQueryConfig {
    /// Maximum number of domains resolved concurrently
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Domains fetched per page
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Resolver pool used for NS discovery ("ip:port" or "host:port")
    #[serde(default = "default_dns_servers")]
    pub dns_servers: Vec<String>,

    #[serde(default)]
    pub selector: SelectorKind,

    /// Per-attempt query timeout
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "default_retry_multiplier")]
    pub retry_multiplier: f64,

    #[serde(default = "default_retry_max_delay")]
    pub retry_max_delay_ms: u64,

    /// Randomisation factor applied to each backoff delay (0.0 - 1.0)
    #[serde(default = "default_retry_jitter")]
    pub retry_jitter: f64,

    /// Pause between record types of the same domain
    #[serde(default = "default_type_delay")]
    pub type_delay_secs: u64,

    /// Domains refreshed more recently than this are not re-queried
    #[serde(default = "default_stale_after_hours")]
    pub stale_after_hours: u64,
}

impl Default for DnsQueryConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            batch_size: default_batch_size(),
            dns_servers: default_dns_servers(),
            selector: SelectorKind::default(),
            query_timeout_secs: default_query_timeout(),
            max_attempts: default_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay(),
            retry_multiplier: default_retry_multiplier(),
            retry_max_delay_ms: default_retry_max_delay(),
            retry_jitter: default_retry_jitter(),
            type_delay_secs: default_type_delay(),
            stale_after_hours: default_stale_after_hours(),
        }
    }
}

fn default_max_concurrent() -> usize {
    10
}

fn default_batch_size() -> usize {
    100
}

fn default_dns_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_query_timeout() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_base_delay() -> u64 {
    500
}

fn default_retry_multiplier() -> f64 {
    1.5
}

fn default_retry_max_delay() -> u64 {
    60_000
}

fn default_retry_jitter() -> f64 {
    0.5
}

fn default_type_delay() -> u64 {
    5
}

fn default_stale_after_hours() -> u64 {
    12
}
