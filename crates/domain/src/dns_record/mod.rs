pub mod data;
pub mod record;
pub mod record_type;
pub mod source;

pub use data::{RecordData, ResourceRecord};
pub use record::DnsRecord;
pub use record_type::RecordType;
pub use source::RecordSource;
