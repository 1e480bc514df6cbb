mod get_records;
mod validate_api_key;

pub use get_records::GetRecordsUseCase;
pub use validate_api_key::{ApiKeyStatus, ValidateApiKeyUseCase};
