//! Re-check published round files before they are handed to claimants.

use airdrop_common::{
    compute_leaf_hash, format_address, parse_address, verify_merkle_proof, ProofEntry, ProofFile,
    RoundConfig,
};
use cosmwasm_std::Uint256;
use tracing::{debug, info};

use crate::error::BuildError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub checked: usize,
    pub total_tokens: Uint256,
}

fn verify_entry(config: &RoundConfig, key: &str, entry: &ProofEntry) -> Result<(), BuildError> {
    let address = parse_address(&entry.address).map_err(|source| BuildError::MalformedAddress {
        line: 0,
        value: entry.address.clone(),
        source,
    })?;
    let formatted = format_address(&address);
    if formatted != key {
        return Err(BuildError::KeyMismatch {
            key: key.to_string(),
            address: entry.address.clone(),
        });
    }

    let leaf = compute_leaf_hash(config.hash_algorithm, &address, entry.amount);
    if !verify_merkle_proof(config.hash_algorithm, &config.merkle_root, &entry.proof, &leaf) {
        return Err(BuildError::ProofVerification {
            address: formatted,
            root: config.merkle_root.clone(),
        });
    }
    debug!(address = %formatted, "proof ok");
    Ok(())
}

/// Check every proof in `proofs` against the round root and make sure the
/// round summary agrees with the proof file.
pub fn verify_round(config: &RoundConfig, proofs: &ProofFile) -> Result<VerifyReport, BuildError> {
    let mut total_tokens = Uint256::zero();
    for (key, entry) in proofs {
        verify_entry(config, key, entry)?;
        total_tokens += entry.amount;
    }

    if proofs.len() as u64 != config.total_users {
        return Err(BuildError::SummaryMismatch {
            field: "totalUsers",
            expected: config.total_users.to_string(),
            actual: proofs.len().to_string(),
        });
    }
    if total_tokens != config.total_tokens {
        return Err(BuildError::SummaryMismatch {
            field: "totalTokens",
            expected: config.total_tokens.to_string(),
            actual: total_tokens.to_string(),
        });
    }

    info!(checked = proofs.len(), root = %config.merkle_root, "round verified");
    Ok(VerifyReport {
        checked: proofs.len(),
        total_tokens,
    })
}

/// Look up one address (any hex case, prefix optional) and check its proof.
pub fn verify_address<'a>(
    config: &RoundConfig,
    proofs: &'a ProofFile,
    address: &str,
) -> Result<&'a ProofEntry, BuildError> {
    let parsed = parse_address(address).map_err(|source| BuildError::MalformedAddress {
        line: 0,
        value: address.to_string(),
        source,
    })?;
    let key = format_address(&parsed);
    let entry = proofs
        .get(&key)
        .ok_or_else(|| BuildError::AddressNotFound {
            address: key.clone(),
        })?;
    verify_entry(config, &key, entry)?;
    Ok(entry)
}
