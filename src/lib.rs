//! Single-node proof-of-work chain: payloads are queued, mined into
//! hash-linked SHA-256 blocks, and accepted only on top of the current tip.

pub mod blockchain;
pub mod config;
pub mod error;

pub use blockchain::{Block, BlockReport, Blockchain, Hash256, MineOutcome};
pub use config::ChainConfig;
pub use error::{ChainError, Rejection, Result};
