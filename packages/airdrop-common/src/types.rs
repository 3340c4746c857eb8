use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint256;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::merkle::{compute_leaf_hash, Address, Hash};

/// Hash primitive used for both leaves and internal nodes of a round.
///
/// `Keccak256` produces the same roots as the EVM convention
/// `keccak256(abi.encodePacked(address, uint256))` with sorted-pair proofs.
#[cw_serde]
#[derive(Copy, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Keccak256,
    Sha256,
}

impl HashAlgorithm {
    /// Hash the concatenation of `parts`.
    pub fn digest(&self, parts: &[&[u8]]) -> Hash {
        match self {
            HashAlgorithm::Keccak256 => {
                let mut hasher = Keccak256::new();
                for part in parts {
                    hasher.update(part);
                }
                hasher.finalize().into()
            }
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                for part in parts {
                    hasher.update(part);
                }
                hasher.finalize().into()
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Keccak256 => "keccak256",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

/// One allowlisted account and the amount (smallest token unit) it may claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibleEntry {
    pub address: Address,
    pub amount: Uint256,
}

impl EligibleEntry {
    pub fn new(address: Address, amount: Uint256) -> Self {
        Self { address, amount }
    }

    pub fn leaf_hash(&self, algorithm: HashAlgorithm) -> Hash {
        compute_leaf_hash(algorithm, &self.address, self.amount)
    }
}

/// A single record of the proof distribution file.
#[cw_serde]
pub struct ProofEntry {
    /// Lower-cased `0x` hex address
    pub address: String,
    pub amount: Uint256,
    /// Sibling hashes, leaf to root, `0x` hex
    pub proof: Vec<String>,
}

/// Proof distribution file: lower-cased address -> entry.
pub type ProofFile = BTreeMap<String, ProofEntry>;

/// Round configuration file published next to the proof file.
#[cw_serde]
#[serde(rename_all = "camelCase")]
pub struct RoundConfig {
    pub merkle_root: String,
    /// Sum of all allowlisted amounts in the smallest unit
    pub total_tokens: Uint256,
    pub total_users: u64,
    pub claim_period_days: u64,
    /// RFC 3339 timestamp
    pub generated_at: String,
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
}
