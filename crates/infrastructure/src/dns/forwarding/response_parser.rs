use super::record_type_map::RecordTypeMapper;
use bell_dns_domain::validators::normalize_name;
use bell_dns_domain::{DomainError, RecordData, ResourceRecord};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Answer section, restricted to record types the store understands.
    pub answers: Vec<ResourceRecord>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    /// Server-side failures; another attempt may succeed.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let answers: Vec<ResourceRecord> = message
            .answers()
            .iter()
            .filter_map(Self::to_resource_record)
            .collect();

        debug!(
            id = message.id(),
            rcode = ?message.response_code(),
            answers = answers.len(),
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            answers,
        })
    }

    fn to_resource_record(record: &Record) -> Option<ResourceRecord> {
        let data = match record.data() {
            RData::A(a) => RecordData::A(a.0),
            RData::AAAA(aaaa) => RecordData::Aaaa(aaaa.0),
            RData::MX(mx) => RecordData::Mx {
                preference: mx.preference(),
                exchange: mx.exchange().to_utf8().to_ascii_lowercase(),
            },
            RData::TXT(txt) => RecordData::Txt(
                txt.txt_data()
                    .iter()
                    .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                    .collect(),
            ),
            RData::NS(ns) => RecordData::Ns(ns.0.to_utf8().to_ascii_lowercase()),
            other => {
                let record_type = RecordTypeMapper::from_hickory(record.record_type())?;
                RecordData::Other {
                    record_type,
                    rdata: other.to_string(),
                }
            }
        };

        Some(ResourceRecord {
            owner: normalize_name(&record.name().to_utf8()),
            ttl: record.ttl(),
            data,
        })
    }
}
