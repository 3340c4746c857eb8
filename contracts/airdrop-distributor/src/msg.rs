use airdrop_common::HashAlgorithm;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Timestamp, Uint256};

use crate::state::AirdropConfig;

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating sender
    pub admin: Option<String>,
    /// Bank denom paid out on claim; the contract must hold enough of it
    pub denom: String,
    /// Root published by the offline builder, 32-byte hex
    pub merkle_root: String,
    /// Claim window length from instantiation
    pub claim_period_seconds: u64,
    /// Upper bound on the sum of all claims
    pub claimable_cap: Uint256,
    /// Must match the algorithm the tree was built with
    pub hash_algorithm: Option<HashAlgorithm>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Claim `amount` for the sender with a Merkle proof of eligibility.
    Claim {
        amount: Uint256,
        /// Sibling hashes, leaf to root, hex-encoded
        proof: Vec<String>,
    },
    /// Replace root, window end and cap. Admin only.
    UpdateRound {
        merkle_root: String,
        end_time: Timestamp,
        claimable_cap: Uint256,
    },
    /// Move the window end forward. Admin only.
    ExtendWindow { end_time: Timestamp },
}

pub struct UpdateRoundParams {
    pub merkle_root: String,
    pub end_time: Timestamp,
    pub claimable_cap: Uint256,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(AirdropConfig)]
    Config {},
    #[returns(ClaimStatusResponse)]
    ClaimStatus { address: String },
    #[returns(StatsResponse)]
    Stats {},
    /// Check a proof without submitting a claim.
    #[returns(bool)]
    VerifyEligibility {
        address: String,
        amount: Uint256,
        proof: Vec<String>,
    },
    #[returns(ClaimsResponse)]
    Claims {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ClaimStatusResponse {
    pub address: String,
    pub claimed: bool,
    pub amount: Uint256,
    pub claimed_at: Option<Timestamp>,
}

#[cw_serde]
pub struct StatsResponse {
    pub merkle_root: String,
    pub total_claimable: Uint256,
    pub total_claimed: Uint256,
    pub remaining: Uint256,
    pub total_claimants: u64,
    pub end_time: Timestamp,
    /// Window open and pool not exhausted
    pub active: bool,
}

#[cw_serde]
pub struct ClaimsResponse {
    pub claims: Vec<ClaimStatusResponse>,
}
