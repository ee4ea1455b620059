use serde::Serialize;
use std::fmt;

use super::Block;

/// Read-only snapshot of a block for logs and console output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReport {
    pub hash: String,
    pub previous_hash: String,
    pub nonce: u64,
    pub data: String,
}

impl From<&Block> for BlockReport {
    fn from(block: &Block) -> Self {
        Self {
            hash: block.hash.map(|h| h.to_hex()).unwrap_or_default(),
            previous_hash: block.previous_hash.to_hex(),
            nonce: block.nonce,
            data: block.data.clone(),
        }
    }
}

impl BlockReport {
    /// One-line form for log output.
    pub fn summary(&self) -> String {
        format!("hash={} nonce={} data={:?}", self.hash, self.nonce, self.data)
    }
}

impl fmt::Display for BlockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==============================")?;
        writeln!(f, "Hash:          {}", self.hash)?;
        writeln!(f, "Previous Hash: {}", self.previous_hash)?;
        writeln!(f, "Nonce:         {}", self.nonce)?;
        writeln!(f, "Data:          {}", self.data)?;
        write!(f, "==============================")
    }
}

#[cfg(test)]
mod tests {
    use super::BlockReport;
    use crate::blockchain::{Block, Hash256};

    #[test]
    fn report_echoes_block_fields() {
        let mut b = Block::new("Origin", Hash256::empty());
        b.mine(8).unwrap();
        let r = BlockReport::from(&b);
        assert_eq!(r.nonce, 40);
        assert_eq!(r.data, "Origin");
        assert_eq!(r.previous_hash, Hash256::empty().to_hex());
        assert_eq!(r.hash, b.hash.unwrap().to_hex());

        let text = r.to_string();
        assert!(text.contains("Nonce:         40"));
        assert!(text.contains(&r.hash));
    }

    #[test]
    fn summary_is_single_line() {
        let mut b = Block::new("multi\nline", Hash256::empty());
        b.mine(8).unwrap();
        let r = BlockReport::from(&b);
        let line = r.summary();
        assert!(!line.contains('\n'));
        assert!(line.starts_with(&format!("hash={}", r.hash)));
        assert!(line.contains(&format!("nonce={}", r.nonce)));
        assert!(r.to_string().lines().count() > 1);
    }

    #[test]
    fn unmined_report_has_empty_hash() {
        let r = BlockReport::from(&Block::new("x", Hash256::empty()));
        assert!(r.hash.is_empty());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["data"], "x");
        assert_eq!(json["nonce"], 0);
    }
}
