use airdrop_common::{compute_leaf_hash, verify_merkle_proof};
use cosmwasm_std::{to_json_binary, Addr, Binary, Deps, Env, Order, StdResult, Uint256};
use cw_storage_plus::Bound;

use crate::execute::account_bytes;
use crate::msg::{ClaimStatusResponse, ClaimsResponse, StatsResponse};
use crate::state::{ClaimRecord, CLAIMS, CLAIM_TOTALS, CONFIG, ROUND};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

fn claim_status(address: &Addr, record: Option<ClaimRecord>) -> ClaimStatusResponse {
    match record {
        Some(record) => ClaimStatusResponse {
            address: address.to_string(),
            claimed: true,
            amount: record.amount,
            claimed_at: Some(record.claimed_at),
        },
        None => ClaimStatusResponse {
            address: address.to_string(),
            claimed: false,
            amount: Uint256::zero(),
            claimed_at: None,
        },
    }
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_claim_status(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let record = CLAIMS.may_load(deps.storage, &addr)?;
    to_json_binary(&claim_status(&addr, record))
}

pub fn query_stats(deps: Deps, env: Env) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    let totals = CLAIM_TOTALS.load(deps.storage)?;
    let remaining = round.claimable_cap.saturating_sub(totals.total_claimed);
    let active = env.block.time <= round.end_time && !remaining.is_zero();

    to_json_binary(&StatsResponse {
        merkle_root: round.merkle_root,
        total_claimable: round.claimable_cap,
        total_claimed: totals.total_claimed,
        remaining,
        total_claimants: totals.total_claimants,
        end_time: round.end_time,
        active,
    })
}

/// Whether `(address, amount, proof)` verifies against the current root.
/// Does not look at claim state or the window.
pub fn query_verify_eligibility(
    deps: Deps,
    address: String,
    amount: Uint256,
    proof: Vec<String>,
) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let round = ROUND.load(deps.storage)?;
    let addr = deps.api.addr_validate(&address)?;

    let valid = match account_bytes(deps.api, &addr) {
        Ok(account) => {
            let leaf_hash = compute_leaf_hash(config.hash_algorithm, &account, amount);
            !amount.is_zero()
                && verify_merkle_proof(config.hash_algorithm, &round.merkle_root, &proof, &leaf_hash)
        }
        Err(_) => false,
    };
    to_json_binary(&valid)
}

pub fn query_claims(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|address| deps.api.addr_validate(&address))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let claims = CLAIMS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(addr, record)| claim_status(&addr, Some(record))))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&ClaimsResponse { claims })
}
