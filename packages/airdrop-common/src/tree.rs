//! Merkle tree construction and proof generation.
//!
//! Leaves are sorted ascending before the tree is built and sibling pairs
//! are hashed in sorted order, so the root depends only on the set of
//! entries. An odd node at the end of a level is carried up unchanged.

use thiserror::Error;

use crate::encoding::encode_hash;
use crate::merkle::{hash_pair, verify_proof, Hash};
use crate::types::{EligibleEntry, HashAlgorithm};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("cannot build a merkle tree without leaves")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    algorithm: HashAlgorithm,
    /// `layers[0]` are the sorted leaves, the last layer holds the root.
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    pub fn new(algorithm: HashAlgorithm, mut leaves: Vec<Hash>) -> Result<Self, TreeError> {
        if leaves.is_empty() {
            return Err(TreeError::Empty);
        }
        leaves.sort_unstable();

        let mut layers = vec![leaves];
        loop {
            let level = &layers[layers.len() - 1];
            if level.len() == 1 {
                break;
            }
            let next_level = level
                .chunks(2)
                .map(|chunk| match chunk {
                    [left, right] => hash_pair(algorithm, left, right),
                    [odd] => *odd,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            layers.push(next_level);
        }

        Ok(Self { algorithm, layers })
    }

    pub fn from_entries(
        algorithm: HashAlgorithm,
        entries: &[EligibleEntry],
    ) -> Result<Self, TreeError> {
        let leaves = entries
            .iter()
            .map(|entry| entry.leaf_hash(algorithm))
            .collect();
        Self::new(algorithm, leaves)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn root(&self) -> Hash {
        // Construction guarantees a last layer with exactly one node.
        self.layers[self.layers.len() - 1][0]
    }

    pub fn root_hex(&self) -> String {
        encode_hash(&self.root())
    }

    /// Number of combination rounds between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Sibling path for the leaf at `index` of the sorted leaf layer.
    pub fn proof_at(&self, index: usize) -> Option<Vec<Hash>> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut current_index = index;
        for level in &self.layers[..self.depth()] {
            // A carried-up node has no sibling at this level.
            if let Some(sibling) = level.get(current_index ^ 1) {
                proof.push(*sibling);
            }
            current_index /= 2;
        }
        Some(proof)
    }

    /// Proof for a leaf value; `None` means the leaf is not in the tree.
    pub fn proof(&self, leaf: &Hash) -> Option<Vec<Hash>> {
        let index = self.leaves().binary_search(leaf).ok()?;
        self.proof_at(index)
    }

    pub fn proof_for(&self, entry: &EligibleEntry) -> Option<Vec<Hash>> {
        self.proof(&entry.leaf_hash(self.algorithm))
    }

    pub fn verify(&self, entry: &EligibleEntry, proof: &[Hash]) -> bool {
        verify_proof(
            self.algorithm,
            &self.root(),
            proof,
            &entry.leaf_hash(self.algorithm),
        )
    }
}
