//! Carbon credit certificates and the ledger blocks that chain them.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// `previous_hash` of the first block in a ledger.
pub const GENESIS_HASH: &str = "GENESIS";

/// Certificate identifier, formatted `CC-<year>-<4-digit sequence>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(pub String);

impl CertificateId {
    pub fn new(year: i32, sequence: u64) -> Self {
        Self(format!("CC-{}-{:04}", year, sequence))
    }

    /// Identifier for the `sequence`-th certificate issued at `issued_at`.
    pub fn for_issue(issued_at: DateTime<Utc>, sequence: u64) -> Self {
        Self::new(issued_at.year(), sequence)
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A carbon credit certificate. Immutable once hashed: field order is part of
/// the canonical encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub certificate_id: CertificateId,
    pub facility_id: String,
    pub carbon_credits: f64,
    pub emission_reduction_tons: f64,
    pub total_emissions_tons: f64,
    pub baseline_emissions_tons: f64,
    pub generated_at: DateTime<Utc>,
}

/// One link of the certificate hash chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBlock {
    /// 1-based position in the ledger
    pub block_id: u64,
    /// `certificate_hash` of the preceding block, or [`GENESIS_HASH`]
    pub previous_hash: String,
    /// SHA-256 (hex) of the certificate's canonical JSON
    pub certificate_hash: String,
    pub timestamp: DateTime<Utc>,
}

impl LedgerBlock {
    pub fn is_genesis_link(&self) -> bool {
        self.previous_hash == GENESIS_HASH
    }
}

/// Summary of the block recorded for an analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockchainVerification {
    pub block_id: u64,
    pub certificate_hash: String,
    pub block_timestamp: DateTime<Utc>,
    pub verification_status: String,
}

impl From<&LedgerBlock> for BlockchainVerification {
    fn from(block: &LedgerBlock) -> Self {
        Self {
            block_id: block.block_id,
            certificate_hash: block.certificate_hash.clone(),
            block_timestamp: block.timestamp,
            verification_status: "Recorded on CarbonChain Ledger".to_string(),
        }
    }
}

/// Result of checking a certificate against the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CertificateVerification {
    pub is_valid: bool,
    pub message: String,
    pub certificate_hash: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_blocks: usize,
    pub latest_block: Option<LedgerBlock>,
}
