pub mod nameserver_selector;
pub mod retry;
pub mod worker_pool;
pub mod zone_parser;

pub use nameserver_selector::{
    build_selector, NameserverSelector, RandomSelector, RoundRobinSelector,
};
pub use retry::RetryPolicy;
pub use worker_pool::{PoolReport, WorkerPool};
pub use zone_parser::ZoneParser;
