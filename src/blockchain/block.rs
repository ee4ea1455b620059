use log::debug;
use serde::{Deserialize, Serialize};

use super::hash::{Hash256, sha256};
use crate::error::{ChainError, Result};

/// A single block holding an opaque payload linked to its predecessor's digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub data: String,
    pub previous_hash: Hash256,
    pub nonce: u64,             // Proof-of-Work nonce
    pub hash: Option<Hash256>, // None until mined
}

impl Block {
    /// Create a new block (not mined yet). Call `mine()` to perform PoW.
    pub fn new(data: impl Into<String>, previous_hash: Hash256) -> Self {
        Self {
            data: data.into(),
            previous_hash,
            nonce: 0,
            hash: None,
        }
    }

    /// Canonical preimage: previous digest (lowercase hex), data, then the
    /// nonce in decimal, concatenated with no separators.
    pub fn serialize(&self) -> String {
        format!("{}{}{}", self.previous_hash.to_hex(), self.data, self.nonce)
    }

    /// SHA-256 of the canonical preimage for the current field values.
    pub fn compute_hash(&self) -> Hash256 {
        sha256(self.serialize().as_bytes())
    }

    pub fn digest(&self) -> Option<Hash256> {
        self.hash
    }

    pub fn is_mined(&self) -> bool {
        self.hash.is_some()
    }

    /// Perform Proof-of-Work: walk the nonce upward from its current value
    /// until the digest has at least `difficulty` leading zero bits.
    /// No attempt cap; fails only if the nonce runs out at `u64::MAX`.
    pub fn mine(&mut self, difficulty: u32) -> Result<()> {
        self.search(difficulty, None)
    }

    /// Same search as `mine`, giving up after `max_attempts` hashes.
    /// On failure the block is left unmined with the nonce where the search stopped.
    pub fn mine_bounded(&mut self, difficulty: u32, max_attempts: u64) -> Result<()> {
        self.search(difficulty, Some(max_attempts))
    }

    fn search(&mut self, difficulty: u32, max_attempts: Option<u64>) -> Result<()> {
        let mut attempts: u64 = 0;
        while max_attempts.is_none_or(|max| attempts < max) {
            let hash = self.compute_hash();
            attempts += 1;
            if hash.meets_difficulty(difficulty) {
                self.hash = Some(hash);
                debug!("sealed {:?} at nonce {} ({})", self.data, self.nonce, hash);
                return Ok(());
            }
            self.nonce = match self.nonce.checked_add(1) {
                Some(n) => n,
                None => break,
            };
        }
        Err(ChainError::MiningExhausted {
            data: self.data.clone(),
            attempts,
        })
    }

    /// Validate that the block's cached `hash` matches its content and
    /// satisfies the PoW difficulty. (Does NOT validate chain linkage.)
    pub fn is_valid(&self, difficulty: u32) -> bool {
        match self.hash {
            Some(hash) => hash == self.compute_hash() && hash.meets_difficulty(difficulty),
            None => false,
        }
    }
}
