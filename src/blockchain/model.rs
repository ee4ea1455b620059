use log::{debug, info, warn};

use super::{Block, BlockReport, GENESIS_DATA, HASH_BITS, Hash256};
use crate::config::ChainConfig;
use crate::error::{ChainError, Rejection, Result};

/// What happened to a mined candidate handed to the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MineOutcome {
    /// Appended; the block is now the tip.
    Accepted(Block),
    /// Dropped. Its payload is not returned to the pool.
    Rejected { block: Block, reason: Rejection },
}

impl MineOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MineOutcome::Accepted(_))
    }

    pub fn block(&self) -> &Block {
        match self {
            MineOutcome::Accepted(block) | MineOutcome::Rejected { block, .. } => block,
        }
    }
}

/// Simple in-memory blockchain with Proof-of-Work and a pool of pending payloads.
///
/// The pool is LIFO: `mine()` always takes the most recently submitted payload.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    pool: Vec<String>,
    difficulty: u32,
    max_attempts: Option<u64>,
}

impl Blockchain {
    /// Initialize a new blockchain and mine its genesis block.
    pub fn new(difficulty: u32) -> Result<Self> {
        Self::build(difficulty, None)
    }

    pub fn with_config(config: &ChainConfig) -> Result<Self> {
        Self::build(config.difficulty, config.max_attempts)
    }

    fn build(difficulty: u32, max_attempts: Option<u64>) -> Result<Self> {
        if difficulty > HASH_BITS {
            return Err(ChainError::DifficultyOutOfRange(difficulty));
        }
        let mut bc = Self {
            chain: Vec::new(),
            pool: Vec::new(),
            difficulty,
            max_attempts,
        };

        // Genesis is appended unconditionally: there is no tip to link against.
        let mut genesis = Block::new(GENESIS_DATA, Hash256::empty());
        bc.seal(&mut genesis)?;
        info!("genesis sealed (difficulty={}, nonce={})", difficulty, genesis.nonce);
        bc.chain.push(genesis);
        Ok(bc)
    }

    fn seal(&self, block: &mut Block) -> Result<()> {
        match self.max_attempts {
            Some(max) => block.mine_bounded(self.difficulty, max),
            None => block.mine(self.difficulty),
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    /// Digest of the tip. Only mined blocks are ever appended.
    fn tip_hash(&self) -> Hash256 {
        self.last_block()
            .hash
            .expect("accepted blocks always carry a digest")
    }

    /// Accepted blocks, genesis first. The chain only grows through `add_to_chain`.
    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    /// Queue a payload for mining. Any content is accepted.
    pub fn add_to_pool(&mut self, data: impl Into<String>) {
        self.pool.push(data.into());
        debug!("pool size {}", self.pool.len());
    }

    /// Take the most recently submitted payload, mine it on top of the
    /// current tip and hand it to `add_to_chain`.
    ///
    /// Returns `Ok(None)` when the pool is empty. If the attempt cap is hit
    /// the payload comes back inside `ChainError::MiningExhausted`.
    pub fn mine(&mut self) -> Result<Option<MineOutcome>> {
        let Some(data) = self.pool.pop() else {
            return Ok(None);
        };

        let mut block = Block::new(data, self.tip_hash());
        if let Err(e) = self.seal(&mut block) {
            warn!("mining abandoned: {e}");
            return Err(e);
        }

        let outcome = self.add_to_chain(block);
        if let MineOutcome::Accepted(ref b) = outcome {
            info!("sealed block #{} {}", self.len() - 1, self.report(b).summary());
        }
        Ok(Some(outcome))
    }

    /// Check a candidate against the current tip and difficulty:
    /// stored digest matches its contents, the digest is under the target,
    /// and it links to the tip.
    pub fn validate(&self, block: &Block) -> std::result::Result<(), Rejection> {
        let stored = block.hash.ok_or(Rejection::Unmined)?;
        let recomputed = block.compute_hash();
        if recomputed != stored {
            return Err(Rejection::DigestMismatch);
        }
        if !recomputed.meets_difficulty(self.difficulty) {
            return Err(Rejection::InsufficientWork(self.difficulty));
        }
        if block.previous_hash != self.tip_hash() {
            return Err(Rejection::StaleTip);
        }
        Ok(())
    }

    pub fn is_valid_block(&self, block: &Block) -> bool {
        self.validate(block).is_ok()
    }

    /// Append `block` if it validates; otherwise drop it and say why.
    pub fn add_to_chain(&mut self, block: Block) -> MineOutcome {
        match self.validate(&block) {
            Ok(()) => {
                self.chain.push(block.clone());
                MineOutcome::Accepted(block)
            }
            Err(reason) => {
                warn!("rejected block {:?}: {}", block.data, reason);
                MineOutcome::Rejected { block, reason }
            }
        }
    }

    /// Validate the entire chain: genesis, linkage, hashes and PoW.
    pub fn is_valid_chain(&self) -> bool {
        let Some(genesis) = self.chain.first() else {
            return false;
        };

        if genesis.data != GENESIS_DATA
            || genesis.previous_hash != Hash256::empty()
            || !genesis.is_valid(self.difficulty)
        {
            return false;
        }

        self.chain.windows(2).all(|pair| {
            let (prev, current) = (&pair[0], &pair[1]);
            Some(current.previous_hash) == prev.hash && current.is_valid(self.difficulty)
        })
    }

    pub fn report(&self, block: &Block) -> BlockReport {
        BlockReport::from(block)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }
}
