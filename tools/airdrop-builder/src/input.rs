//! Allowlist loading and validation.
//!
//! Two layouts are accepted:
//! - CSV, one `address,amount` pair per line. Blank lines and `#` comments
//!   are skipped, and so is a leading `address,amount` header.
//! - JSON, an array of `{ "address": "0x…", "amount": "1000" }`. Amounts may
//!   be strings or (up to `u64::MAX`) plain numbers.
//!
//! Amounts are whole numbers in the token's smallest unit.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use airdrop_common::{format_address, parse_address, Address, EligibleEntry};
use cosmwasm_std::Uint256;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::BuildError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// `.json` files are read as JSON, anything else as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// An allowlist row before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub line: usize,
    pub address: String,
    pub amount: String,
}

#[derive(Deserialize)]
struct JsonRecord {
    address: String,
    amount: JsonAmount,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonAmount {
    Text(String),
    Number(u64),
}

pub fn read_csv(content: &str) -> Result<Vec<RawEntry>, BuildError> {
    let mut entries = Vec::new();
    let mut seen_data = false;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split(',').map(str::trim);
        let (address, amount) = match (fields.next(), fields.next(), fields.next()) {
            (Some(address), Some(amount), None) => (address, amount),
            _ => {
                return Err(BuildError::MalformedRecord {
                    line: line_no,
                    reason: "expected `address,amount`".to_string(),
                })
            }
        };

        if !seen_data {
            seen_data = true;
            if address.eq_ignore_ascii_case("address") {
                continue;
            }
        }

        entries.push(RawEntry {
            line: line_no,
            address: address.to_string(),
            amount: amount.to_string(),
        });
    }

    Ok(entries)
}

pub fn read_json(content: &str) -> Result<Vec<RawEntry>, BuildError> {
    let records: Vec<JsonRecord> =
        serde_json::from_str(content).map_err(|e| BuildError::MalformedRecord {
            line: e.line(),
            reason: e.to_string(),
        })?;

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, record)| RawEntry {
            line: index + 1,
            address: record.address,
            amount: match record.amount {
                JsonAmount::Text(text) => text.trim().to_string(),
                JsonAmount::Number(number) => number.to_string(),
            },
        })
        .collect())
}

/// Turn raw rows into entries, rejecting anything that cannot be claimed.
///
/// Duplicates are detected on the decoded bytes, so hex that differs only in
/// case or prefix still counts as the same address.
pub fn validate_entries(raw: Vec<RawEntry>) -> Result<Vec<EligibleEntry>, BuildError> {
    if raw.is_empty() {
        return Err(BuildError::EmptyAllowlist);
    }

    let max = Uint256::from(u128::MAX);
    let mut first_seen: HashMap<Address, usize> = HashMap::with_capacity(raw.len());
    let mut entries = Vec::with_capacity(raw.len());

    for RawEntry {
        line,
        address,
        amount,
    } in raw
    {
        let parsed = parse_address(&address).map_err(|source| BuildError::MalformedAddress {
            line,
            value: address.clone(),
            source,
        })?;
        if parsed == [0u8; 20] {
            return Err(BuildError::ZeroAddress { line });
        }
        let formatted = format_address(&parsed);

        let amount = Uint256::from_str(&amount).map_err(|_| BuildError::MalformedAmount {
            line,
            value: amount.clone(),
        })?;
        if amount.is_zero() {
            return Err(BuildError::ZeroAmount {
                line,
                address: formatted,
            });
        }
        if amount > max {
            return Err(BuildError::AmountTooLarge {
                line,
                address: formatted,
                amount,
                max,
            });
        }

        if let Some(first_line) = first_seen.insert(parsed, line) {
            return Err(BuildError::DuplicateAddress {
                line,
                first_line,
                address: formatted,
            });
        }

        entries.push(EligibleEntry::new(parsed, amount));
    }

    debug!(count = entries.len(), "allowlist validated");
    Ok(entries)
}

pub fn parse_allowlist(content: &str, format: InputFormat) -> Result<Vec<EligibleEntry>, BuildError> {
    let raw = match format {
        InputFormat::Csv => read_csv(content)?,
        InputFormat::Json => read_json(content)?,
    };
    validate_entries(raw)
}

pub fn load_allowlist(
    path: &Path,
    format: Option<InputFormat>,
) -> Result<Vec<EligibleEntry>, BuildError> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    info!(path = %path.display(), ?format, "reading allowlist");

    let content = fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_allowlist(&content, format)
}
