//! Ingested domains → live queries → QUERY rows and a persisted cursor.

#[path = "../common/mod.rs"]
mod common;

use bell_dns_domain::{RecordData, RecordType};
use common::{Harness, RESOLVER};

const ZONE: &str = "\
alpha.example. 86400 IN NS ns1.example.
beta.example.  86400 IN NS ns1.example.
beta.example.  86400 IN NS ns2.example.
gamma.example. 86400 IN A  192.0.2.30
";

async fn ingested_harness() -> Harness {
    let harness = Harness::new().await;
    harness.write_zone("example", ZONE);
    harness.ingest_use_case().execute(false).await.unwrap();
    harness
}

// ============================================================================
// Backlog sweep
// ============================================================================

#[tokio::test]
async fn test_sweep_stores_live_records_and_advances_cursor() {
    // Arrange
    let harness = ingested_harness().await;
    harness.client.answer(
        "ns1.example",
        "alpha.example",
        vec![RecordData::A("198.51.100.1".parse().unwrap())],
    );
    harness.client.answer(
        "ns1.example",
        "alpha.example",
        vec![RecordData::Mx {
            preference: 10,
            exchange: "mail.alpha.example.".to_string(),
        }],
    );

    // Act
    let summary = harness.resolve_use_case().execute().await.unwrap();

    // Assert - gamma has no nameservers and is never paged
    assert_eq!(summary.domains, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.cursor, Some(harness.domain_id("beta.example").await));

    let live = harness
        .get_records()
        .execute("alpha.example", &[RecordType::A, RecordType::MX])
        .await
        .unwrap();
    assert_eq!(live.len(), 2);
    assert!(live.iter().all(|r| r.source.as_str() == "QUERY"));
    assert_eq!(harness.record_count("MX", "QUERY").await, 1);

    let status = harness.get_status().execute().await.unwrap();
    assert_eq!(status.cursor.last_domain_id, summary.cursor);
    assert!(harness
        .client
        .calls()
        .iter()
        .all(|(_, name, _)| name != "gamma.example"));
}

#[tokio::test]
async fn test_silent_mx_yields_no_records_without_failing_domain() {
    let harness = ingested_harness().await;
    harness.client.answer(
        "ns1.example",
        "alpha.example",
        vec![RecordData::A("198.51.100.1".parse().unwrap())],
    );

    let summary = harness.resolve_use_case().execute().await.unwrap();

    assert_eq!(summary.failed, 0);
    assert_eq!(harness.record_count("MX", "QUERY").await, 0);
    assert_eq!(harness.record_count("A", "QUERY").await, 1);
}

#[tokio::test]
async fn test_unreachable_nameserver_falls_through_to_next() {
    // Arrange
    let harness = ingested_harness().await;
    harness.client.set_down("ns1.example");
    harness.client.answer(
        "ns2.example",
        "beta.example",
        vec![RecordData::A("198.51.100.2".parse().unwrap())],
    );

    // Act
    harness.resolve_use_case().execute().await.unwrap();

    // Assert
    let beta = harness
        .get_records()
        .execute("beta.example", &[RecordType::A])
        .await
        .unwrap();
    assert_eq!(beta.len(), 1);
    assert!(beta[0].record_data.contains("198.51.100.2"));
}

#[tokio::test]
async fn test_second_sweep_resumes_after_cursor() {
    // Arrange
    let harness = ingested_harness().await;
    let resolve = harness.resolve_use_case();
    let first = resolve.execute().await.unwrap();
    let calls_after_first = harness.client.calls().len();

    // Act
    let second = resolve.execute().await.unwrap();

    // Assert
    assert_eq!(first.domains, 2);
    assert_eq!(second.domains, 0);
    assert_eq!(second.cursor, first.cursor);
    assert_eq!(harness.client.calls().len(), calls_after_first);
}

// ============================================================================
// Single-domain lookup
// ============================================================================

#[tokio::test]
async fn test_lookup_discovers_nameservers_for_undelegated_domain() {
    // Arrange
    let harness = ingested_harness().await;
    harness.client.answer(
        RESOLVER,
        "gamma.example",
        vec![RecordData::Ns("ns9.example.".to_string())],
    );
    harness.client.answer(
        "ns9.example",
        "gamma.example",
        vec![RecordData::A("198.51.100.30".parse().unwrap())],
    );

    // Act
    let outcome = harness
        .resolve_use_case()
        .resolve_domain("Gamma.Example.")
        .await
        .unwrap();

    // Assert
    assert!(outcome.discovered);
    assert_eq!(outcome.nameservers, vec!["ns9.example"]);
    assert_eq!(outcome.records_stored, 1);
    let calls = harness.client.calls();
    assert_eq!(calls[0], (RESOLVER.to_string(), "gamma.example".to_string(), RecordType::NS));

    let status = harness.get_status().execute().await.unwrap();
    assert_eq!(status.cursor.last_domain_id, None);
}

#[tokio::test]
async fn test_lookup_of_unknown_domain_is_not_found() {
    let harness = ingested_harness().await;

    let result = harness
        .resolve_use_case()
        .resolve_domain("missing.example")
        .await;

    assert!(result.is_err());
}
