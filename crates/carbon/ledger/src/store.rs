//! Ledger persistence backends

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use carbon_types::LedgerBlock;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{LedgerError, Result};

/// Ordered, append-only block storage.
pub trait LedgerStore: Send + Sync {
    /// All blocks in insertion order
    fn read_all(&self) -> Result<Vec<LedgerBlock>>;

    /// Persist one block after the current last block
    fn append_block(&self, block: &LedgerBlock) -> Result<()>;
}

/// In-memory store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryLedgerStore {
    blocks: RwLock<Vec<LedgerBlock>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn read_all(&self) -> Result<Vec<LedgerBlock>> {
        Ok(self.blocks.read().clone())
    }

    fn append_block(&self, block: &LedgerBlock) -> Result<()> {
        self.blocks.write().push(block.clone());
        Ok(())
    }
}

/// JSON-lines file store; one block per line, flushed on every append
pub struct FileLedgerStore {
    path: PathBuf,
}

impl FileLedgerStore {
    /// Open (or prepare) a ledger file, creating parent directories
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
        }
        Ok(Self { path })
    }
}

impl LedgerStore for FileLedgerStore {
    fn read_all(&self) -> Result<Vec<LedgerBlock>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut blocks = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let block: LedgerBlock =
                serde_json::from_str(&line).map_err(|e| LedgerError::Corrupt {
                    line: index + 1,
                    reason: e.to_string(),
                })?;
            blocks.push(block);
        }

        Ok(blocks)
    }

    fn append_block(&self, block: &LedgerBlock) -> Result<()> {
        let mut line = serde_json::to_vec(block)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // One write per block so a line is never split from its newline
        file.write_all(&line)?;
        file.flush()?;
        file.sync_data()?;

        debug!(block_id = block.block_id, path = %self.path.display(), "ledger block persisted");
        Ok(())
    }
}
