//! Whitelist input parsing and signature file rendering.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::value::{to_raw_value, RawValue};
use serde_json::Value;
use starknet_types_core::felt::Felt;

use crate::common::{parse_felt_dec, parse_felt_hex};
use crate::error::{Result, SignerError};

/// A claim authorizing `address` to mint `quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhitelistEntry {
    pub address: Felt,
    pub quantity: Felt,
}

/// A whitelist entry together with its signature over
/// `pedersen_hash(address, quantity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedEntry {
    pub address: Felt,
    pub quantity: Felt,
    pub r: Felt,
    pub s: Felt,
}

/// How the `r` and `s` components are written to the signature file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SignatureFormat {
    /// Bare JSON integers, e.g. `"r": 1234`
    #[default]
    Number,
    /// Decimal strings, e.g. `"r": "1234"`
    String,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    address: Option<Value>,
    quantity: Option<Box<RawValue>>,
}

#[derive(Debug, Serialize)]
struct SignatureRecord {
    address: Box<RawValue>,
    quantity: Box<RawValue>,
    r: Box<RawValue>,
    s: Box<RawValue>,
}

fn parse_address(value: &Value) -> std::result::Result<Felt, String> {
    match value {
        Value::String(text) => parse_felt_hex(text).map_err(|reason| format!("address: {reason}")),
        other => Err(format!("address must be a hex string, got {other}")),
    }
}

fn parse_quantity(raw: &RawValue) -> std::result::Result<Felt, String> {
    // Read the token text so large JSON numbers never pass through f64.
    let text = raw.get();
    let digits = match text.as_bytes().first() {
        Some(b'"') => serde_json::from_str::<String>(text).map_err(|e| format!("quantity: {e}"))?,
        Some(b'-' | b'0'..=b'9') => text.to_string(),
        _ => {
            return Err(format!(
                "quantity must be an integer or numeric string, got {text}"
            ))
        }
    };
    parse_felt_dec(&digits).map_err(|reason| format!("quantity: {reason}"))
}

/// Parses a whitelist document: a JSON array of `{address, quantity}` objects.
///
/// # Errors
/// Returns [`SignerError::MalformedWhitelist`] if the document is not an array
/// of objects, and [`SignerError::MalformedEntry`] for the first entry whose
/// address or quantity does not parse
pub fn parse_entries(json: &str) -> Result<Vec<WhitelistEntry>> {
    let raw: Vec<RawEntry> = serde_json::from_str(json).map_err(SignerError::MalformedWhitelist)?;

    raw.iter()
        .enumerate()
        .map(|(index, item)| -> Result<WhitelistEntry> {
            let malformed = |reason: String| SignerError::MalformedEntry { index, reason };
            let address = item
                .address
                .as_ref()
                .ok_or_else(|| malformed("missing address".to_string()))
                .and_then(|value| parse_address(value).map_err(malformed))?;
            let quantity = item
                .quantity
                .as_ref()
                .ok_or_else(|| malformed("missing quantity".to_string()))
                .and_then(|value| parse_quantity(value).map_err(malformed))?;
            Ok(WhitelistEntry { address, quantity })
        })
        .collect()
}

/// Reads and parses the whitelist file at `path`.
pub fn load_whitelist(path: &Path) -> Result<Vec<WhitelistEntry>> {
    let content = fs::read_to_string(path).map_err(|source| SignerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entries(&content)
}

fn json_integer(value: &Felt) -> serde_json::Result<Box<RawValue>> {
    RawValue::from_string(value.to_string())
}

fn json_component(value: &Felt, format: SignatureFormat) -> serde_json::Result<Box<RawValue>> {
    match format {
        SignatureFormat::Number => json_integer(value),
        SignatureFormat::String => to_raw_value(&value.to_string()),
    }
}

/// Renders signed entries as a pretty-printed JSON array with a trailing
/// newline. Addresses and quantities are always bare integers; `format`
/// controls `r` and `s` only.
pub fn render_signatures(entries: &[SignedEntry], format: SignatureFormat) -> Result<String> {
    let records = entries
        .iter()
        .map(|entry| -> serde_json::Result<SignatureRecord> {
            Ok(SignatureRecord {
                address: json_integer(&entry.address)?,
                quantity: json_integer(&entry.quantity)?,
                r: json_component(&entry.r, format)?,
                s: json_component(&entry.s, format)?,
            })
        })
        .collect::<serde_json::Result<Vec<SignatureRecord>>>()
        .map_err(SignerError::Encode)?;

    let mut document = serde_json::to_string_pretty(&records).map_err(SignerError::Encode)?;
    document.push('\n');
    Ok(document)
}
