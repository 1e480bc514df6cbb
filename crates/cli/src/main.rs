//! # Bell DNS
//!
//! Builds a DNS record store from TLD zone dumps and keeps it fresh by
//! querying each delegated domain's authoritative nameservers.

mod bootstrap;
mod commands;
mod di;

use bell_dns_domain::{CliOverrides, RecordType};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "bell-dns")]
#[command(version)]
#[command(about = "DNS record store fed by zone dumps and live resolution")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,

    /// SQLite database path (overrides config)
    #[arg(long, global = true)]
    database: Option<String>,

    /// Directory of compressed zone dumps (overrides config)
    #[arg(long, global = true)]
    zones_dir: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest every zone dump not processed within the reprocess threshold
    Ingest {
        /// Ingest every dump regardless of when it was last processed
        #[arg(long)]
        force: bool,
    },
    /// Resolve the stale-domain backlog once, resuming from the saved cursor
    Resolve,
    /// Resolve a single stored domain now
    Lookup { domain: String },
    /// Print stored records of a domain
    Records {
        domain: String,
        /// Restrict to these record types (repeatable)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        types: Vec<RecordType>,
    },
    /// Check whether an API key is active
    CheckKey { api_key: String },
    /// Run both engines on intervals until Ctrl-C
    Run {
        #[arg(long, default_value_t = 86400)]
        ingest_interval_secs: u64,
        #[arg(long, default_value_t = 3600)]
        resolve_interval_secs: u64,
        /// Ignore the reprocess threshold on every ingestion run
        #[arg(long)]
        force: bool,
    },
    /// Print the resolution cursor and processed TLDs
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        database_path: cli.database,
        zones_directory: cli.zones_dir,
        log_level: cli.log_level,
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        database = %config.database.path,
        zones_dir = %config.zones.directory,
        resolvers = config.dns_query.dns_servers.len(),
        "Configuration loaded"
    );

    let pool = bootstrap::init_database(&config.database).await?;
    let repos = di::Repositories::new(pool.clone());
    let use_cases = di::UseCases::new(&repos, &config);

    let result = match cli.command {
        Command::Ingest { force } => commands::ingest(&use_cases, force).await,
        Command::Resolve => commands::resolve(&use_cases).await,
        Command::Lookup { domain } => commands::lookup(&use_cases, &domain).await,
        Command::Records { domain, types } => commands::records(&use_cases, &domain, &types).await,
        Command::CheckKey { api_key } => commands::check_key(&use_cases, &api_key).await,
        Command::Run {
            ingest_interval_secs,
            resolve_interval_secs,
            force,
        } => commands::run(&use_cases, ingest_interval_secs, resolve_interval_secs, force).await,
        Command::Status => commands::status(&use_cases).await,
    };

    pool.close().await;
    result
}
