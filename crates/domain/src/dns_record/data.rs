use super::RecordType;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Typed record payload.
///
/// Address, mail-exchange, text and delegation payloads keep their structure;
/// every other supported type carries its presentation-format rdata verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Mx { preference: u16, exchange: String },
    Txt(Vec<String>),
    Ns(String),
    Other { record_type: RecordType, rdata: String },
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::Aaaa(_) => RecordType::AAAA,
            RecordData::Mx { .. } => RecordType::MX,
            RecordData::Txt(_) => RecordType::TXT,
            RecordData::Ns(_) => RecordType::NS,
            RecordData::Other { record_type, .. } => *record_type,
        }
    }

    /// Delegation target without the trailing root label, for NS payloads.
    pub fn nameserver(&self) -> Option<&str> {
        match self {
            RecordData::Ns(host) => {
                let host = host.strip_suffix('.').unwrap_or(host);
                (!host.is_empty()).then_some(host)
            }
            _ => None,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::Aaaa(addr) => write!(f, "{}", addr),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::Txt(strings) => {
                for (i, s) in strings.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str("\"")?;
                    for c in s.chars() {
                        if c == '"' || c == '\\' {
                            f.write_str("\\")?;
                        }
                        write!(f, "{}", c)?;
                    }
                    f.write_str("\"")?;
                }
                Ok(())
            }
            RecordData::Ns(host) => f.write_str(host),
            RecordData::Other { rdata, .. } => f.write_str(rdata),
        }
    }
}

/// One resource record: owner name (no trailing root label), TTL and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub owner: String,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(owner: impl Into<String>, ttl: u32, data: RecordData) -> Self {
        Self {
            owner: owner.into(),
            ttl,
            data,
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Canonical presentation line: `owner.<TAB>ttl<TAB>IN<TAB>TYPE<TAB>rdata`.
    pub fn to_presentation(&self) -> String {
        format!(
            "{}.\t{}\tIN\t{}\t{}",
            self.owner,
            self.ttl,
            self.record_type(),
            self.data
        )
    }
}
