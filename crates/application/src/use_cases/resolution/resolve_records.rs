use bell_dns_domain::{DnsRecord, Domain, RecordType};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::ports::DnsClient;
use crate::services::RetryPolicy;

/// Queries a domain's nameservers, in order, for one record type.
pub struct RecordResolver {
    client: Arc<dyn DnsClient>,
    retry: RetryPolicy,
    timeout: Duration,
}

impl RecordResolver {
    pub fn new(client: Arc<dyn DnsClient>, retry: RetryPolicy, timeout: Duration) -> Self {
        Self {
            client,
            retry,
            timeout,
        }
    }

    /// Records of `record_type` from the first nameserver that answers.
    ///
    /// Nameservers are tried sequentially; one that keeps failing after every
    /// retry is skipped. No answer anywhere yields an empty list.
    pub async fn resolve(
        &self,
        domain: &Domain,
        record_type: RecordType,
        nameservers: &[String],
    ) -> Vec<DnsRecord> {
        for server in nameservers {
            let result = self
                .retry
                .run(|| {
                    self.client
                        .query(server, &domain.name, record_type, self.timeout)
                })
                .await;

            match result {
                Ok(answers) if !answers.is_empty() => {
                    debug!(
                        domain = %domain.name,
                        %record_type,
                        server = %server,
                        answers = answers.len(),
                        "Nameserver answered"
                    );
                    return answers
                        .iter()
                        .map(|rr| DnsRecord::from_answer(domain.id, record_type, rr))
                        .collect();
                }
                Ok(_) => {
                    debug!(domain = %domain.name, %record_type, server = %server, "No answers");
                }
                Err(e) => {
                    warn!(
                        domain = %domain.name,
                        %record_type,
                        server = %server,
                        error = %e,
                        "Nameserver exhausted; trying next"
                    );
                }
            }
        }

        Vec::new()
    }
}
