use airdrop_common::{compute_leaf_hash, decode_hash, encode_hash, verify_merkle_proof, Address};
use cosmwasm_std::{
    coins, Addr, Api, BankMsg, DepsMut, Env, Event, MessageInfo, Response, Timestamp, Uint128,
    Uint256,
};

use crate::error::ContractError;
use crate::msg::UpdateRoundParams;
use crate::state::{ClaimRecord, CLAIMS, CLAIM_TOTALS, CONFIG, ROUND};

pub const MIN_CLAIM_PERIOD_SECONDS: u64 = 1;
/// 5 years
pub const MAX_CLAIM_PERIOD_SECONDS: u64 = 5 * 365 * 24 * 60 * 60;

pub fn validate_claim_period(seconds: u64) -> Result<(), ContractError> {
    if !(MIN_CLAIM_PERIOD_SECONDS..=MAX_CLAIM_PERIOD_SECONDS).contains(&seconds) {
        return Err(ContractError::InvalidClaimPeriod {
            seconds,
            min: MIN_CLAIM_PERIOD_SECONDS,
            max: MAX_CLAIM_PERIOD_SECONDS,
        });
    }
    Ok(())
}

/// Validate a 32-byte hex root and return it as `0x`-prefixed lower-case hex.
pub fn normalize_merkle_root(root: &str) -> Result<String, ContractError> {
    decode_hash(root)
        .map(|hash| encode_hash(&hash))
        .ok_or_else(|| ContractError::InvalidMerkleRoot {
            root: root.to_string(),
        })
}

pub fn validate_claimable_cap(cap: Uint256, claimed: Uint256) -> Result<(), ContractError> {
    if cap.is_zero() || cap < claimed {
        return Err(ContractError::InvalidClaimableCap { cap, claimed });
    }
    Ok(())
}

/// Canonical 20-byte account identifier of an address, as committed in leaves.
pub fn account_bytes(api: &dyn Api, addr: &Addr) -> Result<Address, ContractError> {
    let canonical = api.addr_canonicalize(addr.as_str())?;
    canonical
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::UnsupportedAddress {
            address: addr.to_string(),
            len: canonical.len(),
        })
}

/// Claim the sender's allocation.
///
/// Checks, in order: window open, not yet claimed, nonzero amount, proof
/// matches the stored root, cap not exceeded. Nothing is written unless all
/// of them pass; the bank transfer is dispatched after the state writes.
pub fn claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint256,
    proof: Vec<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let round = ROUND.load(deps.storage)?;

    if env.block.time > round.end_time {
        return Err(ContractError::ClaimWindowClosed {
            end_time: round.end_time.seconds(),
        });
    }

    if CLAIMS.has(deps.storage, &info.sender) {
        return Err(ContractError::AlreadyClaimed {
            address: info.sender.to_string(),
        });
    }

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let account = account_bytes(deps.api, &info.sender)?;
    let leaf_hash = compute_leaf_hash(config.hash_algorithm, &account, amount);
    if !verify_merkle_proof(config.hash_algorithm, &round.merkle_root, &proof, &leaf_hash) {
        return Err(ContractError::InvalidMerkleProof);
    }

    let mut totals = CLAIM_TOTALS.load(deps.storage)?;
    let remaining = round.claimable_cap.saturating_sub(totals.total_claimed);
    if amount > remaining {
        return Err(ContractError::InsufficientRemaining {
            requested: amount,
            remaining,
        });
    }

    let payout = Uint128::try_from(amount).map_err(|_| ContractError::AmountTooLarge { amount })?;

    CLAIMS.save(
        deps.storage,
        &info.sender,
        &ClaimRecord {
            amount,
            claimed_at: env.block.time,
        },
    )?;

    totals.total_claimed += amount;
    totals.total_claimants += 1;
    CLAIM_TOTALS.save(deps.storage, &totals)?;

    let send_msg = BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: coins(payout.u128(), config.denom.clone()),
    };

    Ok(Response::new()
        .add_message(send_msg)
        .add_attribute("action", "claim")
        .add_attribute("claimant", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("airdrop_claimed")
                .add_attribute("claimant", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("denom", config.denom)
                .add_attribute("total_claimed", totals.total_claimed.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Replace root, window end and cap. Admin only.
/// Existing claim records are kept.
pub fn update_round(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    params: UpdateRoundParams,
) -> Result<Response, ContractError> {
    let UpdateRoundParams {
        merkle_root,
        end_time,
        claimable_cap,
    } = params;

    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update the round".to_string(),
        });
    }

    let merkle_root = normalize_merkle_root(&merkle_root)?;
    ensure_future(end_time, env.block.time)?;

    let totals = CLAIM_TOTALS.load(deps.storage)?;
    validate_claimable_cap(claimable_cap, totals.total_claimed)?;

    let mut round = ROUND.load(deps.storage)?;
    let previous_root = std::mem::replace(&mut round.merkle_root, merkle_root.clone());
    round.end_time = end_time;
    round.claimable_cap = claimable_cap;
    round.updated_at = env.block.time;
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "update_round")
        .add_attribute("merkle_root", merkle_root.clone())
        .add_event(
            Event::new("airdrop_round_updated")
                .add_attribute("previous_root", previous_root)
                .add_attribute("merkle_root", merkle_root)
                .add_attribute("end_time", end_time.seconds().to_string())
                .add_attribute("claimable_cap", claimable_cap.to_string()),
        ))
}

/// Move the window end forward. Admin only.
pub fn extend_window(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    end_time: Timestamp,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can extend the claim window".to_string(),
        });
    }

    let mut round = ROUND.load(deps.storage)?;
    if end_time <= round.end_time {
        return Err(ContractError::WindowNotExtended {
            current: round.end_time.seconds(),
            requested: end_time.seconds(),
        });
    }
    ensure_future(end_time, env.block.time)?;

    let previous_end = round.end_time;
    round.end_time = end_time;
    round.updated_at = env.block.time;
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "extend_window")
        .add_attribute("end_time", end_time.seconds().to_string())
        .add_event(
            Event::new("airdrop_window_extended")
                .add_attribute("previous_end_time", previous_end.seconds().to_string())
                .add_attribute("end_time", end_time.seconds().to_string()),
        ))
}

fn ensure_future(end_time: Timestamp, now: Timestamp) -> Result<(), ContractError> {
    if end_time <= now {
        return Err(ContractError::InvalidEndTime {
            end_time: end_time.seconds(),
            now: now.seconds(),
        });
    }
    Ok(())
}
