use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, UpdateRoundParams};
use crate::query;
use crate::state::{AirdropConfig, ClaimRound, ClaimTotals, CLAIM_TOTALS, CONFIG, ROUND};

const CONTRACT_NAME: &str = "crates.io:airdrop-distributor";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    execute::validate_claim_period(msg.claim_period_seconds)?;
    execute::validate_claimable_cap(msg.claimable_cap, Default::default())?;
    let merkle_root = execute::normalize_merkle_root(&msg.merkle_root)?;
    if msg.denom.trim().is_empty() {
        return Err(ContractError::InvalidDenom);
    }

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender.clone(),
    };

    let config = AirdropConfig {
        admin: admin.clone(),
        denom: msg.denom,
        hash_algorithm: msg.hash_algorithm.unwrap_or_default(),
    };
    CONFIG.save(deps.storage, &config)?;

    let end_time = env.block.time.plus_seconds(msg.claim_period_seconds);
    let round = ClaimRound {
        merkle_root: merkle_root.clone(),
        end_time,
        claimable_cap: msg.claimable_cap,
        updated_at: env.block.time,
    };
    ROUND.save(deps.storage, &round)?;

    CLAIM_TOTALS.save(
        deps.storage,
        &ClaimTotals {
            total_claimed: Default::default(),
            total_claimants: 0,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "airdrop-distributor")
        .add_attribute("admin", admin.to_string())
        .add_attribute("merkle_root", merkle_root)
        .add_attribute("hash_algorithm", config.hash_algorithm.as_str())
        .add_attribute("end_time", end_time.seconds().to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Claim { amount, proof } => execute::claim(deps, env, info, amount, proof),
        ExecuteMsg::UpdateRound {
            merkle_root,
            end_time,
            claimable_cap,
        } => execute::update_round(
            deps,
            env,
            info,
            UpdateRoundParams {
                merkle_root,
                end_time,
                claimable_cap,
            },
        ),
        ExecuteMsg::ExtendWindow { end_time } => {
            execute::extend_window(deps, env, info, end_time)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::ClaimStatus { address } => query::query_claim_status(deps, address),
        QueryMsg::Stats {} => query::query_stats(deps, env),
        QueryMsg::VerifyEligibility {
            address,
            amount,
            proof,
        } => query::query_verify_eligibility(deps, address, amount, proof),
        QueryMsg::Claims { start_after, limit } => query::query_claims(deps, start_after, limit),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
