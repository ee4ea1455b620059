use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Failures that surface to the caller of the chain API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("difficulty {0} out of range (max {max})", max = crate::blockchain::HASH_BITS)]
    DifficultyOutOfRange(u32),

    /// The search gave up before finding a digest under the target.
    /// The payload is handed back so the caller can resubmit it.
    #[error("no proof-of-work found for {data:?} after {attempts} attempts")]
    MiningExhausted { data: String, attempts: u64 },

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("config error: {0}")]
    Config(String),
}

/// Why a mined candidate was refused by the chain.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("block has not been mined")]
    Unmined,

    #[error("stored digest does not match block contents")]
    DigestMismatch,

    #[error("digest does not satisfy difficulty {0}")]
    InsufficientWork(u32),

    #[error("previous digest does not reference the current tip")]
    StaleTip,
}
