use airdrop_common::HashAlgorithm;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint256};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<AirdropConfig> = Item::new("config");
pub const ROUND: Item<ClaimRound> = Item::new("round");
pub const CLAIM_TOTALS: Item<ClaimTotals> = Item::new("claim_totals");

/// One record per claimant. Written once, never removed.
pub const CLAIMS: Map<&Addr, ClaimRecord> = Map::new("claims");

#[cw_serde]
pub struct AirdropConfig {
    pub admin: Addr,
    /// Bank denom paid out on claim
    pub denom: String,
    pub hash_algorithm: HashAlgorithm,
}

/// Parameters the admin may replace wholesale.
#[cw_serde]
pub struct ClaimRound {
    /// `0x`-prefixed lower-case hex
    pub merkle_root: String,
    /// Claims are accepted while `block.time <= end_time`
    pub end_time: Timestamp,
    pub claimable_cap: Uint256,
    pub updated_at: Timestamp,
}

#[cw_serde]
pub struct ClaimTotals {
    pub total_claimed: Uint256,
    pub total_claimants: u64,
}

#[cw_serde]
pub struct ClaimRecord {
    pub amount: Uint256,
    pub claimed_at: Timestamp,
}
