//!
//! Response envelope shared by the gateways
//! -----------------------------------------
//! Filesystem results travel as an ordered list of strings (Entry Records or
//! raw text lines). The list is serialized to JSON and then base64-encoded into
//! a single string, which is placed under a route-specific field next to `ok`.

use std::fmt::{Display, Formatter};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use crate::error::{GatewayError, GatewayResult};

/// Tag of an Entry Record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Error,
}

impl EntryKind {
    pub fn tag(&self) -> &'static str {
        match self {
            EntryKind::File => "[FILE]",
            EntryKind::Dir => "[DIR]",
            EntryKind::Error => "[ERROR]",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "[FILE]" => Some(EntryKind::File),
            "[DIR]" => Some(EntryKind::Dir),
            "[ERROR]" => Some(EntryKind::Error),
            _ => None,
        }
    }
}

/// Four-field record: `[KIND]|name|full_identifier|size`.
///
/// Fields are joined verbatim. A `|` inside a name or path is not escaped, so
/// `parse` only round-trips records whose text fields contain none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub kind: EntryKind,
    pub name: String,
    pub full_identifier: String,
    pub size: u64,
}

impl EntryRecord {
    pub fn file<N: Into<String>, P: Into<String>>(name: N, full: P, size: u64) -> Self {
        EntryRecord { kind: EntryKind::File, name: name.into(), full_identifier: full.into(), size }
    }

    pub fn dir<N: Into<String>, P: Into<String>>(name: N, full: P) -> Self {
        EntryRecord { kind: EntryKind::Dir, name: name.into(), full_identifier: full.into(), size: 0 }
    }

    /// ERROR record carrying the error text and the request path as received.
    pub fn error<M: Into<String>, P: Into<String>>(message: M, request_path: P) -> Self {
        EntryRecord { kind: EntryKind::Error, name: message.into(), full_identifier: request_path.into(), size: 0 }
    }

    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.splitn(4, '|');
        let kind = EntryKind::from_tag(parts.next()?)?;
        let name = parts.next()?.to_string();
        let full_identifier = parts.next()?.to_string();
        let size = parts.next()?.parse::<u64>().ok()?;
        Some(EntryRecord { kind, name, full_identifier, size })
    }
}

impl Display for EntryRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}|{}", self.kind.tag(), self.name, self.full_identifier, self.size)
    }
}

/// Serialize an ordered sequence of strings as base64(JSON array).
pub fn encode_sequence<S: AsRef<str>>(items: &[S]) -> String {
    let arr: Vec<&str> = items.iter().map(|s| s.as_ref()).collect();
    // Serializing a slice of &str cannot fail.
    let raw = serde_json::to_string(&arr).unwrap_or_else(|_| "[]".to_string());
    STANDARD.encode(raw.as_bytes())
}

/// Inverse of [`encode_sequence`].
pub fn decode_sequence(encoded: &str) -> GatewayResult<Vec<String>> {
    let raw = STANDARD.decode(encoded.as_bytes())?;
    serde_json::from_slice::<Vec<String>>(&raw)
        .map_err(|e| GatewayError::io(format!("invalid encoded sequence: {e}")))
}

/// Name of the payload field next to `ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadField {
    Items,
    Content,
    Result,
}

impl PayloadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadField::Items => "items",
            PayloadField::Content => "content",
            PayloadField::Result => "result",
        }
    }
}

/// `{ ok, <field>: EncodedSequence }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub ok: bool,
    pub field: PayloadField,
    pub payload: String,
}

impl Envelope {
    pub fn success<S: AsRef<str>>(field: PayloadField, items: &[S]) -> Self {
        Envelope { ok: true, field, payload: encode_sequence(items) }
    }

    /// Failure envelope holding exactly one ERROR record.
    pub fn failure(field: PayloadField, err: &GatewayError, request_path: &str) -> Self {
        let record = EntryRecord::error(err.message(), request_path);
        Envelope { ok: false, field, payload: encode_sequence(&[record.to_string()]) }
    }

    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("ok".to_string(), json!(self.ok));
        map.insert(self.field.as_str().to_string(), json!(self.payload));
        Value::Object(map)
    }
}
