use std::path::PathBuf;

use airdrop_common::AddressError;
use cosmwasm_std::Uint256;
use thiserror::Error;

/// Errors raised while reading, building or checking a round.
///
/// `line` is the 1-based line of a CSV allowlist, or the 1-based record
/// index of a JSON allowlist.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("line {line}: malformed address {value:?}: {source}")]
    MalformedAddress {
        line: usize,
        value: String,
        #[source]
        source: AddressError,
    },

    #[error("line {line}: malformed amount {value:?}")]
    MalformedAmount { line: usize, value: String },

    #[error("line {line}: zero address is not allowed")]
    ZeroAddress { line: usize },

    #[error("line {line}: amount for {address} must be greater than zero")]
    ZeroAmount { line: usize, address: String },

    #[error("line {line}: amount {amount} for {address} exceeds the payout limit {max}")]
    AmountTooLarge {
        line: usize,
        address: String,
        amount: Uint256,
        max: Uint256,
    },

    #[error("line {line}: duplicate address {address} (first seen on line {first_line})")]
    DuplicateAddress {
        line: usize,
        first_line: usize,
        address: String,
    },

    #[error("invalid claim period: {days} days (must be between {min} and {max})")]
    InvalidClaimPeriod { days: u64, min: u64, max: u64 },

    #[error("allowlist is empty")]
    EmptyAllowlist,

    #[error("proof for {address} does not verify against root {root}")]
    ProofVerification { address: String, root: String },

    #[error("proof file entry {key} does not match its address {address}")]
    KeyMismatch { key: String, address: String },

    #[error("round {field} mismatch: round file says {expected}, proof file has {actual}")]
    SummaryMismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },

    #[error("address {address} is not in the proof file")]
    AddressNotFound { address: String },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
