use cosmwasm_std::{StdError, Uint256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("claim window closed at {end_time}")]
    ClaimWindowClosed { end_time: u64 },

    #[error("{address} has already claimed")]
    AlreadyClaimed { address: String },

    #[error("claim amount must be nonzero")]
    ZeroAmount,

    #[error("invalid merkle proof for claimant")]
    InvalidMerkleProof,

    #[error("insufficient remaining: requested {requested}, remaining {remaining}")]
    InsufficientRemaining {
        requested: Uint256,
        remaining: Uint256,
    },

    #[error("invalid merkle root: expected 32-byte hex, got {root}")]
    InvalidMerkleRoot { root: String },

    #[error("invalid claim period: {seconds}s (must be between {min} and {max})")]
    InvalidClaimPeriod { seconds: u64, min: u64, max: u64 },

    #[error("claim window end {end_time} is not after current time {now}")]
    InvalidEndTime { end_time: u64, now: u64 },

    #[error("window can only be extended: current end {current}, requested {requested}")]
    WindowNotExtended { current: u64, requested: u64 },

    #[error("invalid claimable cap {cap}: must be nonzero and at least the claimed total {claimed}")]
    InvalidClaimableCap { cap: Uint256, claimed: Uint256 },

    #[error("invalid denom: must not be empty")]
    InvalidDenom,

    #[error("unsupported address {address}: expected 20 canonical bytes, got {len}")]
    UnsupportedAddress { address: String, len: usize },

    #[error("amount {amount} exceeds the bank payout range")]
    AmountTooLarge { amount: Uint256 },
}
