//! Ledger inspection commands

use carbon_ledger::CertificateLedger;
use carbon_types::LedgerBlock;
use clap::Subcommand;
use tabled::Tabled;

use crate::output::{
    print_error, print_field, print_heading, print_single, print_success, print_table,
    print_warning, OutputFormat,
};

/// Ledger subcommands
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Show block count and the latest block
    Stats,

    /// Walk the chain and check every previous-hash link
    Check,

    /// List every block
    List,
}

#[derive(Tabled)]
struct BlockRow {
    #[tabled(rename = "Block")]
    block_id: u64,
    #[tabled(rename = "Previous")]
    previous_hash: String,
    #[tabled(rename = "Certificate hash")]
    certificate_hash: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

impl From<&LedgerBlock> for BlockRow {
    fn from(block: &LedgerBlock) -> Self {
        Self {
            block_id: block.block_id,
            previous_hash: short_hash(&block.previous_hash),
            certificate_hash: short_hash(&block.certificate_hash),
            timestamp: block.timestamp.to_rfc3339(),
        }
    }
}

/// Execute a ledger command. Returns `false` when the chain is broken.
pub fn execute(
    command: LedgerCommands,
    ledger: &CertificateLedger,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    match command {
        LedgerCommands::Stats => {
            let stats = ledger.stats()?;
            match format {
                OutputFormat::Text => {
                    print_heading("CarbonChain Ledger");
                    print_field("Total blocks", stats.total_blocks);
                    match &stats.latest_block {
                        Some(block) => {
                            print_field("Latest block", block.block_id);
                            print_field("Latest hash", &block.certificate_hash);
                            print_field("Recorded", block.timestamp.to_rfc3339());
                        }
                        None => print_warning("Ledger is empty"),
                    }
                }
                _ => print_single(&stats, format)?,
            }
            Ok(true)
        }

        LedgerCommands::Check => {
            let result = ledger.verify_chain()?;
            match format {
                OutputFormat::Text => {
                    if result.valid {
                        print_success(&format!("{} blocks verified", result.verified_blocks));
                    } else {
                        print_error(result.error_message.as_deref().unwrap_or("chain broken"));
                        print_field("Verified blocks", result.verified_blocks);
                        if let Some(index) = result.first_invalid_index {
                            print_field("First invalid index", index);
                        }
                    }
                }
                _ => print_single(&result, format)?,
            }
            Ok(result.valid)
        }

        LedgerCommands::List => {
            let blocks = ledger.blocks()?;
            match format {
                OutputFormat::Text => print_table(blocks.iter().map(BlockRow::from).collect()),
                _ => print_single(&blocks, format)?,
            }
            Ok(true)
        }
    }
}

fn short_hash(hash: &str) -> String {
    if hash.chars().count() > 16 {
        format!("{}…", hash.chars().take(16).collect::<String>())
    } else {
        hash.to_string()
    }
}
