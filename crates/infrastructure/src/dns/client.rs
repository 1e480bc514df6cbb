use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::UdpTransport;
use async_trait::async_trait;
use bell_dns_application::ports::DnsClient;
use bell_dns_domain::{DomainError, RecordType, ResourceRecord};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DNS_PORT: u16 = 53;

/// Plain UDP client for resolver-pool and authoritative queries.
#[derive(Default)]
pub struct UdpDnsClient;

impl UdpDnsClient {
    pub fn new() -> Self {
        Self
    }

    /// Accepts `ip:port`, a bare IP, or `host[:port]` (resolved via the system resolver).
    async fn resolve_server(server: &str) -> Result<SocketAddr, DomainError> {
        if let Ok(addr) = server.parse::<SocketAddr>() {
            return Ok(addr);
        }
        if let Ok(ip) = server.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, DNS_PORT));
        }

        let host = server.trim_end_matches('.');
        let target = if host.rsplit_once(':').is_some_and(|(_, port)| port.parse::<u16>().is_ok()) {
            host.to_string()
        } else {
            format!("{host}:{DNS_PORT}")
        };

        let mut addrs = tokio::net::lookup_host(target.as_str())
            .await
            .map_err(|e| DomainError::Transport {
                server: server.to_string(),
                reason: format!("cannot resolve server address: {e}"),
            })?;
        let addr = addrs.next().ok_or_else(|| DomainError::Transport {
            server: server.to_string(),
            reason: "server name has no addresses".to_string(),
        })?;
        Ok(addr)
    }
}

#[async_trait]
impl DnsClient for UdpDnsClient {
    #[instrument(skip(self, timeout))]
    async fn query(
        &self,
        server: &str,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let addr = Self::resolve_server(server).await?;
        let (id, query_bytes) = MessageBuilder::build_query(name, record_type)?;

        let response_bytes = UdpTransport::new(addr).send(&query_bytes, timeout).await?;
        let response = ResponseParser::parse(&response_bytes)?;

        if response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response id {} does not match query id {}",
                response.id, id
            )));
        }
        if response.is_server_error() {
            return Err(DomainError::Transport {
                server: server.to_string(),
                reason: format!("server answered {}", response.rcode),
            });
        }
        if response.truncated {
            warn!(server, name, "Truncated UDP response, keeping partial answers");
        }
        if response.is_nxdomain() {
            debug!(server, name, "NXDOMAIN");
        }

        Ok(response.answers)
    }
}
