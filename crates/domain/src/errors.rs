use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Malformed zone record at line {line}: {reason}")]
    InvalidZoneRecord { line: usize, reason: String },

    #[error("Transport error querying {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Query to {server} timed out")]
    QueryTimeout { server: String },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl DomainError {
    /// Failures worth another attempt against the same server.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::Transport { .. }
                | DomainError::QueryTimeout { .. }
                | DomainError::InvalidDnsResponse(_)
        )
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::IoError(e.to_string())
    }
}
