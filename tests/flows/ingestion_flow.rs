//! Zone dumps on disk → SQLite, through the real parser and repositories.

#[path = "../common/mod.rs"]
mod common;

use bell_dns_domain::RecordType;
use common::Harness;

const EXAMPLE_ZONE: &str = "\
$TTL 86400
example.        86400 IN SOA a.nic.example. hostmaster.nic.example. ( 2024010101 1800 900 604800 86400 )
example.        86400 IN NS  a.nic.example.
foo.example.    86400 IN NS  ns1.example.
foo.example.    3600  IN A   93.184.216.34
";

// ============================================================================
// End-to-end ingestion
// ============================================================================

#[tokio::test]
async fn test_zone_dump_yields_domain_and_record_rows() {
    // Arrange
    let harness = Harness::new().await;
    harness.write_zone("example", EXAMPLE_ZONE);

    // Act
    let summary = harness.ingest_use_case().execute(false).await.unwrap();

    // Assert
    assert_eq!(summary.ingested, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(harness.domain_count().await, 1);

    let (name, tld, nameservers): (String, String, String) = sqlx::query_as(
        "SELECT domain_name, tld, nameservers FROM domains",
    )
    .fetch_one(&harness.pool)
    .await
    .unwrap();
    assert_eq!(name, "foo.example");
    assert_eq!(tld, "example");
    assert_eq!(nameservers, r#"["ns1.example"]"#);

    let a_records = harness
        .get_records()
        .execute("foo.example", &[RecordType::A])
        .await
        .unwrap();
    assert_eq!(a_records.len(), 1);
    assert!(a_records[0].record_data.contains("93.184.216.34"));
    assert_eq!(a_records[0].source.as_str(), "CZDS");
    assert_eq!(harness.record_count("A", "CZDS").await, 1);
}

#[tokio::test]
async fn test_rerun_skips_fresh_zone_until_forced() {
    // Arrange
    let harness = Harness::new().await;
    harness.write_zone("example", EXAMPLE_ZONE);
    let ingest = harness.ingest_use_case();
    ingest.execute(false).await.unwrap();
    let first = harness.get_status().execute().await.unwrap().processed_tlds;

    // Act
    let rerun = ingest.execute(false).await.unwrap();
    let forced = ingest.execute(true).await.unwrap();

    // Assert
    assert_eq!(rerun.skipped_fresh, 1);
    assert_eq!(rerun.ingested, 0);
    assert_eq!(forced.ingested, 1);
    assert_eq!(forced.records_inserted, 0);

    let second = harness.get_status().execute().await.unwrap().processed_tlds;
    assert!(second[0].last_processed > first[0].last_processed);
    assert_eq!(harness.record_count("A", "CZDS").await, 1);
}

#[tokio::test]
async fn test_nameserver_set_longer_than_a_batch_is_kept_whole() {
    // Arrange - batch size 2, three NS records for one owner
    let harness = Harness::new().await;
    harness.write_zone(
        "example",
        "\
foo.example. 86400 IN NS ns1.host.net.
foo.example. 86400 IN NS ns2.host.net.
foo.example. 86400 IN NS ns3.host.net.
bar.example. 86400 IN NS ns1.host.net.
",
    );

    // Act
    let summary = harness.ingest_use_case().execute(false).await.unwrap();

    // Assert
    assert_eq!(summary.ingested, 1);
    let nameservers: String =
        sqlx::query_scalar("SELECT nameservers FROM domains WHERE domain_name = 'foo.example'")
            .fetch_one(&harness.pool)
            .await
            .unwrap();
    assert_eq!(
        nameservers,
        r#"["ns1.host.net","ns2.host.net","ns3.host.net"]"#
    );
    assert_eq!(harness.record_count("NS", "CZDS").await, 4);
}

#[tokio::test]
async fn test_malformed_zone_fails_alone_and_keeps_committed_batches() {
    // Arrange - batch size 2, so the first two records commit before the bad line
    let harness = Harness::new().await;
    harness.write_zone("example", EXAMPLE_ZONE);
    harness.write_zone(
        "test",
        "\
good.test. 3600 IN NS ns1.good.test.
good.test. 3600 IN A 192.0.2.7
broken.test. 3600 IN A not-an-address
",
    );

    // Act
    let summary = harness.ingest_use_case().execute(false).await.unwrap();

    // Assert
    assert_eq!(summary.files_seen, 2);
    assert_eq!(summary.ingested, 1);
    assert_eq!(summary.failed, 1);
    let good = harness
        .get_records()
        .execute("good.test", &[])
        .await
        .unwrap();
    assert_eq!(good.len(), 2);

    let processed = harness.get_status().execute().await.unwrap().processed_tlds;
    let tlds: Vec<_> = processed.iter().map(|p| p.tld.as_str()).collect();
    assert_eq!(tlds, vec!["example"]);
}

#[tokio::test]
async fn test_unsupported_types_and_apex_are_not_stored() {
    let harness = Harness::new().await;
    harness.write_zone(
        "example",
        "\
example.     86400 IN NS    a.nic.example.
bar.example. 86400 IN NS    ns1.bar.example.
bar.example. 86400 IN RRSIG NS 8 2 86400 20240101000000 20231201000000 12345 example. AAAA
bar.example. 86400 IN NSEC  baz.example. NS RRSIG NSEC
",
    );

    let summary = harness.ingest_use_case().execute(false).await.unwrap();

    assert_eq!(summary.ingested, 1);
    assert_eq!(summary.records, 1);
    assert_eq!(harness.domain_count().await, 1);
    assert_eq!(harness.record_count("NS", "CZDS").await, 1);
}
