//! Hash-chain bookkeeping and verification

use carbon_types::{LedgerBlock, GENESIS_HASH};
use serde::{Deserialize, Serialize};

/// Head of the chain: what the next block links to.
#[derive(Debug, Clone, Default)]
pub struct ChainHead {
    /// Certificate hash of the last block
    last_hash: Option<String>,

    /// Number of blocks in the chain
    block_count: u64,
}

impl ChainHead {
    /// An empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the head from stored blocks
    pub fn from_blocks(blocks: &[LedgerBlock]) -> Self {
        Self {
            last_hash: blocks.last().map(|b| b.certificate_hash.clone()),
            block_count: blocks.len() as u64,
        }
    }

    /// `previous_hash` for the next block
    pub fn previous_hash(&self) -> String {
        self.last_hash
            .clone()
            .unwrap_or_else(|| GENESIS_HASH.to_string())
    }

    /// `block_id` for the next block
    pub fn next_block_id(&self) -> u64 {
        self.block_count + 1
    }

    /// Advance the head past an appended block
    pub fn update(&mut self, block: &LedgerBlock) {
        self.last_hash = Some(block.certificate_hash.clone());
        self.block_count += 1;
    }

    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    /// Certificate hash of the last block, if any
    pub fn head_hash(&self) -> Option<&str> {
        self.last_hash.as_deref()
    }
}

/// Walks the previous-hash linkage of a ledger.
pub struct ChainVerifier;

impl ChainVerifier {
    /// Check that the first block links to [`GENESIS_HASH`] and that
    /// `block[i].previous_hash == block[i-1].certificate_hash` for all
    /// `i > 0`, stopping at the first broken link.
    ///
    /// Nothing links to the last block, so its `certificate_hash` is only
    /// checked by [`ChainVerifier::verify_anchored`].
    pub fn verify_chain(blocks: &[LedgerBlock]) -> ChainVerificationResult {
        let mut result = ChainVerificationResult {
            valid: true,
            total_blocks: blocks.len(),
            verified_blocks: 0,
            first_invalid_index: None,
            error_message: None,
        };

        for (i, block) in blocks.iter().enumerate() {
            if i == 0 {
                if !block.is_genesis_link() {
                    result.fail(
                        0,
                        format!(
                            "Block {} does not link to {} (got: {})",
                            block.block_id, GENESIS_HASH, block.previous_hash
                        ),
                    );
                    return result;
                }
            } else {
                let expected_prev = &blocks[i - 1].certificate_hash;
                if &block.previous_hash != expected_prev {
                    result.fail(
                        i,
                        format!(
                            "Block {} has broken chain link (expected prev: {}, got: {})",
                            block.block_id, expected_prev, block.previous_hash
                        ),
                    );
                    return result;
                }
            }
            result.verified_blocks = i + 1;
        }

        result
    }

    /// Walk the chain, then check its length and tail hash against a head
    /// recorded as blocks were appended.
    pub fn verify_anchored(blocks: &[LedgerBlock], head: &ChainHead) -> ChainVerificationResult {
        let mut result = Self::verify_chain(blocks);
        if !result.valid {
            return result;
        }

        let recorded = head.block_count() as usize;
        if blocks.len() != recorded {
            let diverged = blocks.len().min(recorded);
            result.verified_blocks = diverged;
            result.fail(
                diverged,
                format!(
                    "Ledger holds {} blocks but the chain head records {}",
                    blocks.len(),
                    recorded
                ),
            );
            return result;
        }

        if let Some(last) = blocks.last() {
            if head.head_hash() != Some(last.certificate_hash.as_str()) {
                result.verified_blocks = blocks.len() - 1;
                result.fail(
                    blocks.len() - 1,
                    format!(
                        "Block {} hash does not match the chain head (expected: {}, got: {})",
                        last.block_id,
                        head.head_hash().unwrap_or(GENESIS_HASH),
                        last.certificate_hash
                    ),
                );
            }
        }

        result
    }
}

/// Outcome of a chain walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainVerificationResult {
    /// Whether every link holds
    pub valid: bool,

    /// Blocks examined
    pub total_blocks: usize,

    /// Blocks verified before the first failure
    pub verified_blocks: usize,

    /// Index of the first block whose link is broken
    pub first_invalid_index: Option<usize>,

    pub error_message: Option<String>,
}

impl ChainVerificationResult {
    fn fail(&mut self, index: usize, message: String) {
        self.valid = false;
        self.first_invalid_index = Some(index);
        self.error_message = Some(message);
    }
}
