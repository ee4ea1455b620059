pub mod block;
pub mod hash;
pub mod model;
pub mod report;

pub use block::Block;
pub use hash::{Hash256, sha256};
pub use model::{Blockchain, MineOutcome};
pub use report::BlockReport;

/// Output width of the block hash in bits.
pub const HASH_BITS: u32 = 256;

/// Default Proof-of-Work difficulty (leading zero bits).
pub const DEFAULT_DIFFICULTY: u32 = 20;

/// Payload of the genesis block.
pub const GENESIS_DATA: &str = "Origin";
