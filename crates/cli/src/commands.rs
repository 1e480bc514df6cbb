use crate::di::UseCases;
use bell_dns_application::use_cases::ApiKeyStatus;
use bell_dns_domain::RecordType;
use bell_dns_jobs::{ActiveResolutionJob, JobRunner, ZoneIngestionJob};
use std::sync::Arc;
use tracing::info;

pub async fn ingest(use_cases: &UseCases, force: bool) -> anyhow::Result<()> {
    let summary = ZoneIngestionJob::new(Arc::clone(&use_cases.ingest_zones))
        .with_force(force)
        .run_once()
        .await?;

    println!(
        "files: {} (ingested {}, fresh {}, failed {}), records: {} ({} new)",
        summary.files_seen,
        summary.ingested,
        summary.skipped_fresh,
        summary.failed,
        summary.records,
        summary.records_inserted
    );
    if summary.failed > 0 {
        anyhow::bail!("{} zone file(s) failed to ingest", summary.failed);
    }
    Ok(())
}

pub async fn resolve(use_cases: &UseCases) -> anyhow::Result<()> {
    let summary = ActiveResolutionJob::new(Arc::clone(&use_cases.resolve_domains))
        .run_once()
        .await?;

    println!(
        "pages: {}, domains: {} (skipped {}, failed {}), records stored: {}, cursor: {}",
        summary.pages,
        summary.domains,
        summary.skipped,
        summary.failed,
        summary.records_stored,
        summary
            .cursor
            .map_or_else(|| "-".to_string(), |id| id.to_string())
    );
    Ok(())
}

pub async fn lookup(use_cases: &UseCases, domain: &str) -> anyhow::Result<()> {
    let outcome = use_cases.resolve_domains.resolve_domain(domain).await?;

    if outcome.skipped {
        println!("{domain}: no nameservers found, nothing resolved");
        return Ok(());
    }
    println!(
        "{domain}: {} record(s) stored via {}{}",
        outcome.records_stored,
        outcome.nameservers.join(", "),
        if outcome.discovered { " (discovered)" } else { "" }
    );
    Ok(())
}

pub async fn records(use_cases: &UseCases, domain: &str, types: &[RecordType]) -> anyhow::Result<()> {
    let records = use_cases.get_records.execute(domain, types).await?;

    for record in &records {
        println!("{}\t{}", record.source.as_str(), record.record_data);
    }
    info!(domain, count = records.len(), "Records listed");
    Ok(())
}

pub async fn check_key(use_cases: &UseCases, api_key: &str) -> anyhow::Result<()> {
    match use_cases.validate_api_key.execute(api_key).await? {
        ApiKeyStatus::Valid => {
            println!("valid");
            Ok(())
        }
        ApiKeyStatus::Inactive => anyhow::bail!("API key is inactive"),
        ApiKeyStatus::Unknown => anyhow::bail!("API key is unknown"),
    }
}

pub async fn run(
    use_cases: &UseCases,
    ingest_interval_secs: u64,
    resolve_interval_secs: u64,
    force: bool,
) -> anyhow::Result<()> {
    let running = JobRunner::new()
        .with_zone_ingestion(
            ZoneIngestionJob::new(Arc::clone(&use_cases.ingest_zones))
                .with_force(force)
                .with_interval(ingest_interval_secs),
        )
        .with_active_resolution(
            ActiveResolutionJob::new(Arc::clone(&use_cases.resolve_domains))
                .with_interval(resolve_interval_secs),
        )
        .start();

    info!("Press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    running.shutdown().await;
    Ok(())
}

pub async fn status(use_cases: &UseCases) -> anyhow::Result<()> {
    let report = use_cases.get_status.execute().await?;

    match report.cursor.last_domain_id {
        Some(id) => println!("cursor: {id}"),
        None => println!("cursor: not started"),
    }
    if let Some(updated_at) = report.cursor.updated_at {
        println!("cursor updated: {updated_at}");
    }
    println!("processed TLDs: {}", report.processed_tlds.len());
    for tld in &report.processed_tlds {
        println!("  {}\t{}", tld.tld, tld.last_processed);
    }
    Ok(())
}
