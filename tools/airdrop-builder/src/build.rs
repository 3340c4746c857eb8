use std::path::Path;

use airdrop_common::{
    encode_proof, format_address, EligibleEntry, HashAlgorithm, MerkleTree, ProofEntry, ProofFile,
    RoundConfig, TreeError,
};
use chrono::{DateTime, SecondsFormat, Utc};
use cosmwasm_std::Uint256;
use tracing::{debug, info};

use crate::error::BuildError;
use crate::files::write_json_pair;

/// Claim window bounds in days, matching what the distributor accepts
/// at instantiation (1 second to 5 years, whole days here).
pub const MIN_CLAIM_PERIOD_DAYS: u64 = 1;
pub const MAX_CLAIM_PERIOD_DAYS: u64 = 5 * 365;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub hash_algorithm: HashAlgorithm,
    pub claim_period_days: u64,
    pub generated_at: DateTime<Utc>,
}

impl BuildOptions {
    pub fn new(hash_algorithm: HashAlgorithm, claim_period_days: u64) -> Self {
        Self {
            hash_algorithm,
            claim_period_days,
            generated_at: Utc::now(),
        }
    }
}

/// Everything published for one round.
#[derive(Debug, Clone)]
pub struct RoundArtifacts {
    pub tree: MerkleTree,
    pub proofs: ProofFile,
    pub config: RoundConfig,
}

/// Build the tree, a proof for every entry and the round summary.
///
/// Every proof is checked against the new root before it is returned.
pub fn build_round(
    entries: &[EligibleEntry],
    options: &BuildOptions,
) -> Result<RoundArtifacts, BuildError> {
    let days = options.claim_period_days;
    if !(MIN_CLAIM_PERIOD_DAYS..=MAX_CLAIM_PERIOD_DAYS).contains(&days) {
        return Err(BuildError::InvalidClaimPeriod {
            days,
            min: MIN_CLAIM_PERIOD_DAYS,
            max: MAX_CLAIM_PERIOD_DAYS,
        });
    }

    let tree = MerkleTree::from_entries(options.hash_algorithm, entries).map_err(|e| match e {
        TreeError::Empty => BuildError::EmptyAllowlist,
    })?;
    let root = tree.root_hex();
    info!(
        leaves = tree.leaf_count(),
        depth = tree.depth(),
        algorithm = options.hash_algorithm.as_str(),
        %root,
        "merkle tree built"
    );

    let mut proofs = ProofFile::new();
    let mut total_tokens = Uint256::zero();
    for entry in entries {
        let address = format_address(&entry.address);
        let proof = tree
            .proof_for(entry)
            .filter(|proof| tree.verify(entry, proof))
            .ok_or_else(|| BuildError::ProofVerification {
                address: address.clone(),
                root: root.clone(),
            })?;
        debug!(%address, siblings = proof.len(), "proof generated");

        total_tokens += entry.amount;
        proofs.insert(
            address.clone(),
            ProofEntry {
                address,
                amount: entry.amount,
                proof: encode_proof(&proof),
            },
        );
    }

    let config = RoundConfig {
        merkle_root: root,
        total_tokens,
        total_users: entries.len() as u64,
        claim_period_days: options.claim_period_days,
        generated_at: options
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        hash_algorithm: options.hash_algorithm,
    };

    Ok(RoundArtifacts {
        tree,
        proofs,
        config,
    })
}

pub fn write_artifacts(
    artifacts: &RoundArtifacts,
    proofs_path: &Path,
    round_path: &Path,
) -> Result<(), BuildError> {
    write_json_pair((proofs_path, &artifacts.proofs), (round_path, &artifacts.config))?;
    info!(
        proofs = %proofs_path.display(),
        round = %round_path.display(),
        entries = artifacts.proofs.len(),
        "round files written"
    );
    Ok(())
}
