use async_trait::async_trait;
use bell_dns_application::ports::DnsClient;
use bell_dns_domain::{DomainError, RecordData, RecordType, ResourceRecord};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

type Key = (String, String, RecordType);

/// DNS client answering from a script keyed by (server, name, type).
///
/// Unscripted questions get an empty answer; servers marked down time out.
#[derive(Default)]
pub struct ScriptedDnsClient {
    answers: Mutex<HashMap<Key, Vec<ResourceRecord>>>,
    down: Mutex<Vec<String>>,
    calls: Mutex<Vec<Key>>,
}

impl ScriptedDnsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, server: &str, name: &str, data: Vec<RecordData>) {
        let record_type = data[0].record_type();
        let records = data
            .into_iter()
            .map(|d| ResourceRecord::new(name, 300, d))
            .collect();
        self.answers
            .lock()
            .unwrap()
            .insert((server.to_string(), name.to_string(), record_type), records);
    }

    pub fn set_down(&self, server: &str) {
        self.down.lock().unwrap().push(server.to_string());
    }

    pub fn calls(&self) -> Vec<(String, String, RecordType)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, server: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _, _)| s == server)
            .count()
    }
}

#[async_trait]
impl DnsClient for ScriptedDnsClient {
    async fn query(
        &self,
        server: &str,
        name: &str,
        record_type: RecordType,
        _timeout: Duration,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let key = (server.to_string(), name.to_string(), record_type);
        self.calls.lock().unwrap().push(key.clone());

        if self.down.lock().unwrap().iter().any(|s| s == server) {
            return Err(DomainError::QueryTimeout {
                server: server.to_string(),
            });
        }
        Ok(self
            .answers
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}
