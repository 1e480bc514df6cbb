//! Streaming zone-dump parser.
//!
//! Reads RFC 1035 master-file text line by line and yields [`ZoneBatch`]es of
//! classified records. Understands `$ORIGIN`, `$TTL`, comments, quoted
//! strings, parenthesised continuation lines, relative and inherited owner
//! names, and TTL/class in either order.
//!
//! A batch is cut once it holds `batch_size` records and the owner name
//! changes, so one owner's run of records never straddles two batches.
//!
//! The first malformed entry ends the stream with
//! [`DomainError::InvalidZoneRecord`]; batches yielded before it stay valid.

use bell_dns_domain::validators::{is_apex, normalize_name};
use bell_dns_domain::{DomainError, RecordData, RecordType, ResourceRecord, ZoneBatch, ZoneRecord};
use std::io::BufRead;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::Arc;
use tracing::trace;

const DEFAULT_TTL: u32 = 3600;
const MAX_PREALLOCATED: usize = 4096;

const CLASSES: [&str; 4] = ["IN", "CH", "HS", "CS"];

/// Well-formed types that are read but never stored.
const UNSTORED_TYPES: &[&str] = &[
    "AFSDB", "ANAME", "APL", "CDNSKEY", "CDS", "CERT", "CSYNC", "DHCID", "DLV", "DNAME", "EUI48",
    "EUI64", "HINFO", "HIP", "HTTPS", "IPSECKEY", "KEY", "KX", "LOC", "NAPTR", "NSEC", "NSEC3",
    "NSEC3PARAM", "NULL", "OPENPGPKEY", "RP", "RRSIG", "SIG", "SMIMEA", "SPF", "SSHFP", "SVCB",
    "TA", "TLSA", "URI", "WKS", "ZONEMD",
];

#[derive(Debug)]
struct Token {
    text: String,
    quoted: bool,
}

#[derive(Debug)]
struct Entry {
    line: usize,
    inherits_owner: bool,
    tokens: Vec<Token>,
}

pub struct ZoneParser<R> {
    reader: R,
    tld: Arc<str>,
    batch_size: usize,
    origin: String,
    default_ttl: Option<u32>,
    last_ttl: Option<u32>,
    last_owner: Option<String>,
    line_no: usize,
    raw: Vec<u8>,
    pending: ZoneBatch,
    deferred_error: Option<DomainError>,
    finished: bool,
}

impl<R: BufRead> ZoneParser<R> {
    pub fn new(reader: R, tld: &str, batch_size: usize) -> Self {
        let tld = normalize_name(tld);
        let origin = if tld.is_empty() {
            ".".to_string()
        } else {
            format!("{tld}.")
        };
        let batch_size = batch_size.max(1);

        Self {
            reader,
            tld: Arc::from(tld.as_str()),
            batch_size,
            origin,
            default_ttl: None,
            last_ttl: None,
            last_owner: None,
            line_no: 0,
            raw: Vec::with_capacity(256),
            pending: ZoneBatch::with_capacity(batch_size.min(MAX_PREALLOCATED)),
            deferred_error: None,
            finished: false,
        }
    }

    /// Feeds every batch to `consumer`, stopping at the first parse or
    /// consumer error. Returns the number of records delivered.
    pub fn for_each_batch<F>(self, mut consumer: F) -> Result<usize, DomainError>
    where
        F: FnMut(ZoneBatch) -> Result<(), DomainError>,
    {
        let mut delivered = 0;
        for batch in self {
            let batch = batch?;
            delivered += batch.len();
            consumer(batch)?;
        }
        Ok(delivered)
    }

    fn take_pending(&mut self) -> ZoneBatch {
        std::mem::replace(
            &mut self.pending,
            ZoneBatch::with_capacity(self.batch_size.min(MAX_PREALLOCATED)),
        )
    }

    /// Ends the stream. A full pending batch is still delivered before the error.
    fn fail(&mut self, error: DomainError) -> Option<Result<ZoneBatch, DomainError>> {
        self.finished = true;
        if self.pending.len() >= self.batch_size {
            self.deferred_error = Some(error);
            return Some(Ok(self.take_pending()));
        }
        Some(Err(error))
    }

    fn at_owner_boundary(&self, next: &ZoneRecord) -> bool {
        self.pending.len() >= self.batch_size
            && self
                .pending
                .records
                .last()
                .is_some_and(|last| last.domain_name() != next.domain_name())
    }

    fn malformed(&self, line: usize, reason: impl Into<String>) -> DomainError {
        DomainError::InvalidZoneRecord {
            line,
            reason: format!("{} (tld {})", reason.into(), self.tld),
        }
    }

    /// Reads one logical entry, joining parenthesised continuation lines.
    fn read_entry(&mut self) -> Result<Option<Entry>, DomainError> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        let mut start_line = 0;
        let mut inherits_owner = false;

        loop {
            self.raw.clear();
            let n = self.reader.read_until(b'\n', &mut self.raw)?;
            if n == 0 {
                if depth > 0 {
                    return Err(self.malformed(start_line, "unbalanced parentheses at end of input"));
                }
                return Ok(None);
            }
            self.line_no += 1;

            if tokens.is_empty() && depth == 0 {
                start_line = self.line_no;
                inherits_owner = matches!(self.raw.first(), Some(b' ') | Some(b'\t'));
            }

            let line = String::from_utf8_lossy(&self.raw);
            if let Err(reason) = tokenize(&line, &mut tokens, &mut depth) {
                return Err(self.malformed(self.line_no, reason));
            }

            if depth == 0 && !tokens.is_empty() {
                return Ok(Some(Entry {
                    line: start_line,
                    inherits_owner,
                    tokens,
                }));
            }
        }
    }

    fn process_entry(&mut self, entry: Entry) -> Result<Option<ZoneRecord>, DomainError> {
        let Entry {
            line,
            inherits_owner,
            tokens,
        } = entry;

        if !inherits_owner {
            if let Some(first) = tokens.first() {
                if !first.quoted && first.text.starts_with('$') {
                    self.directive(line, &tokens)?;
                    return Ok(None);
                }
            }
        }

        let mut it = tokens.into_iter();
        let owner = if inherits_owner {
            self.last_owner
                .clone()
                .ok_or_else(|| self.malformed(line, "record without owner name"))?
        } else {
            match it.next() {
                Some(token) => self.qualify(&token.text),
                None => return Ok(None),
            }
        };
        self.last_owner = Some(owner.clone());

        let mut ttl = None;
        let mut class = None;
        let type_text = loop {
            let token = it
                .next()
                .ok_or_else(|| self.malformed(line, "missing record type"))?;
            if token.quoted {
                return Err(self.malformed(line, "quoted string before record type"));
            }
            if ttl.is_none() && token.text.starts_with(|c: char| c.is_ascii_digit()) {
                let value = parse_ttl(&token.text)
                    .ok_or_else(|| self.malformed(line, format!("invalid TTL '{}'", token.text)))?;
                ttl = Some(value);
                continue;
            }
            if class.is_none() && is_class(&token.text) {
                class = Some(token.text.to_ascii_uppercase());
                continue;
            }
            break token.text;
        };

        let ttl = match ttl {
            Some(value) => {
                self.last_ttl = Some(value);
                value
            }
            None => self.default_ttl.or(self.last_ttl).unwrap_or(DEFAULT_TTL),
        };

        let record_type = match RecordType::from_str(&type_text) {
            Ok(rt) => rt,
            Err(_) if is_unstored_type(&type_text) => {
                trace!(owner = %owner, record_type = %type_text, "Skipping unsupported record type");
                return Ok(None);
            }
            Err(_) => {
                return Err(self.malformed(line, format!("unknown record type '{type_text}'")));
            }
        };

        let rdata: Vec<Token> = it.collect();
        let data = self
            .parse_rdata(record_type, &rdata)
            .map_err(|reason| self.malformed(line, reason))?;

        if class.as_deref().is_some_and(|c| c != "IN") {
            trace!(owner = %owner, "Skipping non-IN record");
            return Ok(None);
        }

        let name = normalize_name(&owner);
        if name.is_empty() || is_apex(&name, &self.tld) {
            trace!(owner = %owner, tld = %self.tld, "Skipping apex or empty owner");
            return Ok(None);
        }

        Ok(Some(ZoneRecord::new(
            ResourceRecord::new(name, ttl, data),
            Arc::clone(&self.tld),
        )))
    }

    fn directive(&mut self, line: usize, tokens: &[Token]) -> Result<(), DomainError> {
        let name = tokens[0].text.to_ascii_uppercase();
        match (name.as_str(), &tokens[1..]) {
            ("$ORIGIN", [origin]) => {
                self.origin = self.qualify(&origin.text);
                Ok(())
            }
            ("$TTL", [value]) => {
                let ttl = parse_ttl(&value.text)
                    .ok_or_else(|| self.malformed(line, format!("invalid $TTL '{}'", value.text)))?;
                self.default_ttl = Some(ttl);
                Ok(())
            }
            ("$ORIGIN", _) | ("$TTL", _) => {
                Err(self.malformed(line, format!("{name} expects exactly one argument")))
            }
            ("$INCLUDE", _) => Err(self.malformed(line, "$INCLUDE is not supported")),
            _ => Err(self.malformed(line, format!("unknown directive '{name}'"))),
        }
    }

    /// Absolute, lowercase form of `name` relative to the current origin.
    fn qualify(&self, name: &str) -> String {
        let lower = name.to_ascii_lowercase();
        if lower == "@" {
            self.origin.clone()
        } else if lower.ends_with('.') {
            lower
        } else if self.origin == "." {
            format!("{lower}.")
        } else {
            format!("{lower}.{}", self.origin)
        }
    }

    fn parse_rdata(&self, record_type: RecordType, tokens: &[Token]) -> Result<RecordData, String> {
        match record_type {
            RecordType::A => {
                let text = single(record_type, tokens)?;
                Ipv4Addr::from_str(text)
                    .map(RecordData::A)
                    .map_err(|_| format!("invalid IPv4 address '{text}'"))
            }
            RecordType::AAAA => {
                let text = single(record_type, tokens)?;
                Ipv6Addr::from_str(text)
                    .map(RecordData::Aaaa)
                    .map_err(|_| format!("invalid IPv6 address '{text}'"))
            }
            RecordType::NS => Ok(RecordData::Ns(self.qualify(single(record_type, tokens)?))),
            RecordType::CNAME | RecordType::PTR => Ok(RecordData::Other {
                record_type,
                rdata: self.qualify(single(record_type, tokens)?),
            }),
            RecordType::MX => {
                let fields = fixed(record_type, tokens, 2)?;
                Ok(RecordData::Mx {
                    preference: number(fields[0], "MX preference")?,
                    exchange: self.qualify(fields[1]),
                })
            }
            RecordType::TXT => {
                if tokens.is_empty() {
                    return Err("TXT record without strings".to_string());
                }
                Ok(RecordData::Txt(
                    tokens.iter().map(|t| t.text.clone()).collect(),
                ))
            }
            RecordType::SOA => {
                let fields = fixed(record_type, tokens, 7)?;
                let serial: u32 = number(fields[2], "SOA serial")?;
                let mut timers = Vec::with_capacity(4);
                for field in &fields[3..] {
                    timers.push(
                        parse_ttl(field).ok_or_else(|| format!("invalid SOA timer '{field}'"))?,
                    );
                }
                Ok(RecordData::Other {
                    record_type,
                    rdata: format!(
                        "{} {} {} {} {} {} {}",
                        self.qualify(fields[0]),
                        self.qualify(fields[1]),
                        serial,
                        timers[0],
                        timers[1],
                        timers[2],
                        timers[3]
                    ),
                })
            }
            RecordType::SRV => {
                let fields = fixed(record_type, tokens, 4)?;
                let priority: u16 = number(fields[0], "SRV priority")?;
                let weight: u16 = number(fields[1], "SRV weight")?;
                let port: u16 = number(fields[2], "SRV port")?;
                Ok(RecordData::Other {
                    record_type,
                    rdata: format!("{} {} {} {}", priority, weight, port, self.qualify(fields[3])),
                })
            }
            RecordType::CAA => {
                if tokens.len() != 3 {
                    return Err(format!("CAA expects 3 fields, found {}", tokens.len()));
                }
                let flags: u8 = number(bare(&tokens[0])?, "CAA flags")?;
                let tag = bare(&tokens[1])?;
                if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(format!("invalid CAA tag '{tag}'"));
                }
                let value = RecordData::Txt(vec![tokens[2].text.clone()]);
                Ok(RecordData::Other {
                    record_type,
                    rdata: format!("{} {} {}", flags, tag.to_ascii_lowercase(), value),
                })
            }
            RecordType::DS => {
                let (head, tail) = split_head(record_type, tokens, 3)?;
                let key_tag: u16 = number(head[0], "DS key tag")?;
                let algorithm: u8 = number(head[1], "DS algorithm")?;
                let digest_type: u8 = number(head[2], "DS digest type")?;
                let digest = tail.concat();
                if !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err("DS digest is not hexadecimal".to_string());
                }
                Ok(RecordData::Other {
                    record_type,
                    rdata: format!(
                        "{} {} {} {}",
                        key_tag,
                        algorithm,
                        digest_type,
                        digest.to_ascii_uppercase()
                    ),
                })
            }
            RecordType::DNSKEY => {
                let (head, tail) = split_head(record_type, tokens, 3)?;
                let flags: u16 = number(head[0], "DNSKEY flags")?;
                let protocol: u8 = number(head[1], "DNSKEY protocol")?;
                let algorithm: u8 = number(head[2], "DNSKEY algorithm")?;
                let key = tail.concat();
                if !key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
                {
                    return Err("DNSKEY public key is not base64".to_string());
                }
                Ok(RecordData::Other {
                    record_type,
                    rdata: format!("{} {} {} {}", flags, protocol, algorithm, key),
                })
            }
        }
    }
}

impl<R: BufRead> Iterator for ZoneParser<R> {
    type Item = Result<ZoneBatch, DomainError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.deferred_error.take() {
            return Some(Err(e));
        }
        if self.finished {
            return None;
        }

        loop {
            let entry = match self.read_entry() {
                Ok(Some(entry)) => entry,
                Ok(None) => {
                    self.finished = true;
                    return (!self.pending.is_empty()).then(|| Ok(self.take_pending()));
                }
                Err(e) => return self.fail(e),
            };

            match self.process_entry(entry) {
                Ok(Some(record)) => {
                    if self.at_owner_boundary(&record) {
                        let full = self.take_pending();
                        self.pending.push(record);
                        return Some(Ok(full));
                    }
                    self.pending.push(record);
                }
                Ok(None) => {}
                Err(e) => return self.fail(e),
            }
        }
    }
}

/// Splits one physical line into tokens, tracking parenthesis depth across lines.
fn tokenize(line: &str, tokens: &mut Vec<Token>, depth: &mut usize) -> Result<(), String> {
    let mut chars = line.chars();
    let mut current = String::new();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        quoted: true,
                    });
                    in_quotes = false;
                }
                '\\' => current.push(unescape(&mut chars)?),
                '\r' | '\n' => return Err("unterminated quoted string".to_string()),
                _ => current.push(c),
            }
            continue;
        }

        match c {
            ' ' | '\t' | '\r' | '\n' => flush(&mut current, tokens),
            ';' => break,
            '(' => {
                flush(&mut current, tokens);
                *depth += 1;
            }
            ')' => {
                flush(&mut current, tokens);
                if *depth == 0 {
                    return Err("unbalanced ')'".to_string());
                }
                *depth -= 1;
            }
            '"' => {
                flush(&mut current, tokens);
                in_quotes = true;
            }
            '\\' => {
                current.push('\\');
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted string".to_string());
    }
    flush(&mut current, tokens);
    Ok(())
}

fn flush(current: &mut String, tokens: &mut Vec<Token>) {
    if !current.is_empty() {
        tokens.push(Token {
            text: std::mem::take(current),
            quoted: false,
        });
    }
}

/// Resolves `\X` and `\DDD` escapes inside quoted strings.
fn unescape(chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    let first = chars
        .next()
        .ok_or_else(|| "dangling escape in quoted string".to_string())?;
    if !first.is_ascii_digit() {
        return Ok(first);
    }

    let mut digits = String::with_capacity(3);
    digits.push(first);
    for _ in 0..2 {
        match chars.next() {
            Some(d) if d.is_ascii_digit() => digits.push(d),
            _ => return Err("invalid \\DDD escape".to_string()),
        }
    }
    digits
        .parse::<u8>()
        .map(char::from)
        .map_err(|_| format!("escape \\{digits} out of range"))
}

/// Plain seconds, or BIND-style units (`1h30m`, `2d`, `1w`).
fn parse_ttl(text: &str) -> Option<u32> {
    if text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().ok();
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit = match c.to_ascii_lowercase() {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86_400,
            'w' => 604_800,
            _ => return None,
        };
        if digits.is_empty() {
            return None;
        }
        total = total.checked_add(digits.parse::<u64>().ok()?.checked_mul(unit)?)?;
        digits.clear();
    }
    if !digits.is_empty() {
        total = total.checked_add(digits.parse::<u64>().ok()?)?;
    }
    u32::try_from(total).ok()
}

fn is_class(text: &str) -> bool {
    CLASSES.iter().any(|c| c.eq_ignore_ascii_case(text))
}

fn is_unstored_type(text: &str) -> bool {
    let upper = text.to_ascii_uppercase();
    if let Some(number) = upper.strip_prefix("TYPE") {
        return !number.is_empty() && number.chars().all(|c| c.is_ascii_digit());
    }
    UNSTORED_TYPES.contains(&upper.as_str())
}

fn bare(token: &Token) -> Result<&str, String> {
    if token.quoted {
        Err(format!("unexpected quoted string \"{}\"", token.text))
    } else {
        Ok(&token.text)
    }
}

fn single(record_type: RecordType, tokens: &[Token]) -> Result<&str, String> {
    Ok(fixed(record_type, tokens, 1)?[0])
}

fn fixed(record_type: RecordType, tokens: &[Token], count: usize) -> Result<Vec<&str>, String> {
    if tokens.len() != count {
        return Err(format!(
            "{record_type} expects {count} field(s), found {}",
            tokens.len()
        ));
    }
    tokens.iter().map(bare).collect()
}

fn split_head<'a>(
    record_type: RecordType,
    tokens: &'a [Token],
    head: usize,
) -> Result<(Vec<&'a str>, Vec<&'a str>), String> {
    if tokens.len() <= head {
        return Err(format!(
            "{record_type} expects at least {} fields, found {}",
            head + 1,
            tokens.len()
        ));
    }
    let fields: Vec<&str> = tokens.iter().map(bare).collect::<Result<_, _>>()?;
    let (h, t) = fields.split_at(head);
    Ok((h.to_vec(), t.to_vec()))
}

fn number<T: FromStr>(text: &str, what: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("invalid {what} '{text}'"))
}
