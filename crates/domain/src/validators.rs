use crate::DomainError;

/// Strips a single trailing root-label separator.
pub fn strip_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Owner names are stored lowercase and without the trailing dot.
pub fn normalize_name(name: &str) -> String {
    strip_root(name).to_ascii_lowercase()
}

/// True when `name` is the zone apex of `tld` (case-insensitive, dot-insensitive).
pub fn is_apex(name: &str, tld: &str) -> bool {
    strip_root(name).eq_ignore_ascii_case(strip_root(tld))
}

pub fn validate_domain_name(name: &str) -> Result<(), DomainError> {
    let name = strip_root(name);
    if name.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain name cannot be empty".to_string(),
        ));
    }
    if name.len() > 253 {
        return Err(DomainError::InvalidDomainName(format!(
            "{name} exceeds 253 characters"
        )));
    }
    if name.split('.').any(|label| label.is_empty() || label.len() > 63) {
        return Err(DomainError::InvalidDomainName(format!(
            "{name} has an empty or oversized label"
        )));
    }
    Ok(())
}
