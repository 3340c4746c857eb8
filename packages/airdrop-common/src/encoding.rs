//! Hex encodings shared by the builder files and the contract wire format.
//!
//! Hashes and addresses are written as lower-case hex with a `0x` prefix.
//! Decoding accepts the prefix as optional and either case.

use thiserror::Error;

use crate::merkle::{Address, Hash};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid address length: expected 40 hex chars, got {got}")]
    InvalidLength { got: usize },

    #[error("invalid address hex: {reason}")]
    InvalidHex { reason: String },
}

fn strip_hex_prefix(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

/// Parse a 20-byte account address from hex, with or without `0x`.
pub fn parse_address(value: &str) -> Result<Address, AddressError> {
    let cleaned = strip_hex_prefix(value);
    if cleaned.len() != 40 {
        return Err(AddressError::InvalidLength { got: cleaned.len() });
    }
    let mut address = [0u8; 20];
    hex::decode_to_slice(cleaned, &mut address).map_err(|e| AddressError::InvalidHex {
        reason: e.to_string(),
    })?;
    Ok(address)
}

pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

pub fn encode_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Decode a 32-byte hash. Returns `None` for bad hex or a wrong length.
pub fn decode_hash(value: &str) -> Option<Hash> {
    let mut hash = [0u8; 32];
    hex::decode_to_slice(strip_hex_prefix(value), &mut hash).ok()?;
    Some(hash)
}

/// Decode a proof; `None` if any element is not a 32-byte hash.
pub fn decode_proof(proof: &[String]) -> Option<Vec<Hash>> {
    proof.iter().map(|sibling| decode_hash(sibling)).collect()
}

pub fn encode_proof(proof: &[Hash]) -> Vec<String> {
    proof.iter().map(encode_hash).collect()
}
