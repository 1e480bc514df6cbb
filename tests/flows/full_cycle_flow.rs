//! Both engines driven through their jobs, the way `bell-dns ingest` and
//! `bell-dns resolve` run them.

#[path = "../common/mod.rs"]
mod common;

use bell_dns_domain::RecordData;
use bell_dns_jobs::{ActiveResolutionJob, ZoneIngestionJob};
use common::Harness;

#[tokio::test]
async fn test_ingest_then_resolve_then_report() {
    // Arrange
    let harness = Harness::new().await;
    harness.write_zone(
        "example",
        "foo.example. 86400 IN NS ns1.example.\nfoo.example. 3600 IN A 93.184.216.34\n",
    );
    harness.write_zone(
        "test",
        "bar.test. 86400 IN NS ns1.test.\n",
    );
    harness.client.answer(
        "ns1.example",
        "foo.example",
        vec![RecordData::Txt(vec!["v=spf1 -all".to_string()])],
    );
    let ingest = ZoneIngestionJob::new(harness.ingest_use_case());
    let resolve = ActiveResolutionJob::new(harness.resolve_use_case());

    // Act
    let ingested = ingest.run_once().await.unwrap();
    let resolved = resolve.run_once().await.unwrap();
    let status = harness.get_status().execute().await.unwrap();

    // Assert
    assert_eq!(ingested.ingested, 2);
    assert_eq!(resolved.domains, 2);
    assert_eq!(harness.record_count("TXT", "QUERY").await, 1);
    assert_eq!(harness.record_count("A", "CZDS").await, 1);

    let tlds: Vec<_> = status.processed_tlds.iter().map(|p| p.tld.as_str()).collect();
    assert_eq!(tlds, vec!["example", "test"]);
    assert_eq!(
        status.cursor.last_domain_id,
        Some(harness.domain_id("bar.test").await.max(harness.domain_id("foo.example").await))
    );
}
