use cosmwasm_std::Uint256;

use crate::encoding::{decode_hash, decode_proof};
use crate::types::HashAlgorithm;

/// 32-byte leaf, node or root value.
pub type Hash = [u8; 32];

/// 20-byte account identifier.
pub type Address = [u8; 20];

/// Compute the leaf hash for an allowlist entry.
///
/// `leaf_hash = H( address_bytes[20] || amount_u256_be[32] )`
///
/// There is no domain prefix: the 52-byte leaf pre-image can never be read
/// as a 64-byte internal node pre-image.
pub fn compute_leaf_hash(algorithm: HashAlgorithm, address: &Address, amount: Uint256) -> Hash {
    algorithm.digest(&[address.as_slice(), amount.to_be_bytes().as_slice()])
}

/// Hash two sibling nodes in sorted order: smaller value first.
///
/// Byte-wise comparison of big-endian hashes is numeric comparison, so a
/// verifier never needs to know which side a sibling was on.
pub fn hash_pair(algorithm: HashAlgorithm, a: &Hash, b: &Hash) -> Hash {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    algorithm.digest(&[first.as_slice(), second.as_slice()])
}

/// Fold a proof from `leaf` up to a root.
pub fn compute_root(algorithm: HashAlgorithm, leaf: &Hash, proof: &[Hash]) -> Hash {
    proof
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(algorithm, &current, sibling))
}

pub fn verify_proof(algorithm: HashAlgorithm, root: &Hash, proof: &[Hash], leaf: &Hash) -> bool {
    compute_root(algorithm, leaf, proof) == *root
}

/// Verify a hex-encoded Merkle proof against a hex-encoded root.
///
/// Any malformed hex or wrong-length value makes the proof invalid.
pub fn verify_merkle_proof(
    algorithm: HashAlgorithm,
    root_hex: &str,
    proof_hex: &[String],
    leaf_hash: &Hash,
) -> bool {
    let Some(expected_root) = decode_hash(root_hex) else {
        return false;
    };
    let Some(proof) = decode_proof(proof_hex) else {
        return false;
    };
    verify_proof(algorithm, &expected_root, &proof, leaf_hash)
}
