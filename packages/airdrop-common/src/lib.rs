pub mod encoding;
pub mod merkle;
pub mod tree;
pub mod types;

pub use encoding::{
    decode_hash, decode_proof, encode_hash, encode_proof, format_address, parse_address,
    AddressError,
};
pub use merkle::{compute_leaf_hash, verify_merkle_proof, verify_proof, Address, Hash};
pub use tree::{MerkleTree, TreeError};
pub use types::{EligibleEntry, HashAlgorithm, ProofEntry, ProofFile, RoundConfig};
