//! Certificate issuance and verification over a [`LedgerStore`]

use std::sync::Arc;

use carbon_types::{
    Certificate, CertificateId, CertificateVerification, LedgerBlock, LedgerStats,
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::hash::certificate_hash;
use crate::integrity::{ChainHead, ChainVerificationResult, ChainVerifier};
use crate::store::{LedgerStore, MemoryLedgerStore};

/// Certificate contents before an id is assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct CertificateDraft {
    pub facility_id: String,
    pub carbon_credits: f64,
    pub emission_reduction_tons: f64,
    pub total_emissions_tons: f64,
    pub baseline_emissions_tons: f64,
    pub generated_at: DateTime<Utc>,
}

impl CertificateDraft {
    /// Stamp the draft as the `sequence`-th certificate of the ledger.
    pub fn into_certificate(self, sequence: u64) -> Certificate {
        Certificate {
            certificate_id: CertificateId::for_issue(self.generated_at, sequence),
            facility_id: self.facility_id,
            carbon_credits: self.carbon_credits,
            emission_reduction_tons: self.emission_reduction_tons,
            total_emissions_tons: self.total_emissions_tons,
            baseline_emissions_tons: self.baseline_emissions_tons,
            generated_at: self.generated_at,
        }
    }
}

/// Append-only certificate ledger.
///
/// Opened once per process. The chain head is cached and every
/// "assign id -> hash -> link -> persist" step runs under one mutex, so
/// concurrent analyses in this process cannot interleave their links.
/// Separate processes appending to the same backing file are not coordinated.
pub struct CertificateLedger {
    store: Arc<dyn LedgerStore>,
    head: Mutex<ChainHead>,
}

impl CertificateLedger {
    /// Open a ledger over an existing store, loading its head.
    pub fn open(store: Arc<dyn LedgerStore>) -> Result<Self> {
        let blocks = store.read_all()?;
        let head = ChainHead::from_blocks(&blocks);
        info!(blocks = head.block_count(), "certificate ledger opened");
        Ok(Self {
            store,
            head: Mutex::new(head),
        })
    }

    /// Empty ledger backed by memory.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryLedgerStore::new()),
            head: Mutex::new(ChainHead::new()),
        }
    }

    /// Number of blocks appended so far.
    pub fn len(&self) -> u64 {
        self.head.lock().block_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assign the next certificate id to `draft`, then hash and append it.
    pub fn issue(&self, draft: CertificateDraft) -> Result<(Certificate, LedgerBlock)> {
        let mut head = self.head.lock();
        let certificate = draft.into_certificate(head.next_block_id());
        let block = self.append_locked(&mut head, &certificate)?;
        Ok((certificate, block))
    }

    /// Hash an already-built certificate and link it onto the chain.
    pub fn append(&self, certificate: &Certificate) -> Result<LedgerBlock> {
        let mut head = self.head.lock();
        self.append_locked(&mut head, certificate)
    }

    fn append_locked(&self, head: &mut ChainHead, certificate: &Certificate) -> Result<LedgerBlock> {
        let block = LedgerBlock {
            block_id: head.next_block_id(),
            previous_hash: head.previous_hash(),
            certificate_hash: certificate_hash(certificate)?,
            timestamp: certificate.generated_at,
        };

        self.store.append_block(&block)?;
        head.update(&block);

        info!(
            block_id = block.block_id,
            certificate_id = %certificate.certificate_id,
            hash = %block.certificate_hash,
            "certificate recorded on ledger"
        );
        Ok(block)
    }

    /// Membership check: valid iff some block carries the recomputed hash.
    pub fn verify(&self, certificate: &Certificate) -> Result<CertificateVerification> {
        let hash = certificate_hash(certificate)?;
        let found = self
            .store
            .read_all()?
            .iter()
            .any(|block| block.certificate_hash == hash);

        let verification = if found {
            CertificateVerification {
                is_valid: true,
                message: "Certificate verified on CarbonChain Ledger".to_string(),
                certificate_hash: hash,
            }
        } else {
            warn!(certificate_id = %certificate.certificate_id, "certificate not found on ledger");
            CertificateVerification {
                is_valid: false,
                message: "Certificate not found in CarbonChain Ledger".to_string(),
                certificate_hash: hash,
            }
        };
        Ok(verification)
    }

    /// Block count and most recent block.
    pub fn stats(&self) -> Result<LedgerStats> {
        let blocks = self.store.read_all()?;
        Ok(LedgerStats {
            total_blocks: blocks.len(),
            latest_block: blocks.last().cloned(),
        })
    }

    /// Snapshot of the chain head recorded by this handle.
    pub fn head(&self) -> ChainHead {
        self.head.lock().clone()
    }

    /// Walk the stored chain and check its tail against the head this
    /// handle recorded at open and on every append.
    pub fn verify_chain(&self) -> Result<ChainVerificationResult> {
        let head = self.head.lock();
        let blocks = self.store.read_all()?;
        let result = ChainVerifier::verify_anchored(&blocks, &head);
        drop(head);
        if result.valid {
            debug!(blocks = result.total_blocks, "ledger chain intact");
        } else {
            warn!(
                first_invalid = ?result.first_invalid_index,
                "ledger chain broken"
            );
        }
        Ok(result)
    }

    /// All stored blocks in order.
    pub fn blocks(&self) -> Result<Vec<LedgerBlock>> {
        self.store.read_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_types::GENESIS_HASH;
    use chrono::TimeZone;

    fn draft(credits: f64) -> CertificateDraft {
        CertificateDraft {
            facility_id: "PLANT-9".into(),
            carbon_credits: credits,
            emission_reduction_tons: credits,
            total_emissions_tons: 80.0,
            baseline_emissions_tons: 80.0 + credits,
            generated_at: Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn first_block_links_to_genesis() {
        let ledger = CertificateLedger::in_memory();
        let (certificate, block) = ledger.issue(draft(3.0)).unwrap();

        assert_eq!(certificate.certificate_id.0, "CC-2025-0001");
        assert_eq!(block.block_id, 1);
        assert_eq!(block.previous_hash, GENESIS_HASH);
        assert_eq!(block.timestamp, certificate.generated_at);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn subsequent_blocks_link_to_predecessor() {
        let ledger = CertificateLedger::in_memory();
        let (_, first) = ledger.issue(draft(1.0)).unwrap();
        let (second_cert, second) = ledger.issue(draft(2.0)).unwrap();

        assert_eq!(second_cert.certificate_id.0, "CC-2025-0002");
        assert_eq!(second.block_id, 2);
        assert_eq!(second.previous_hash, first.certificate_hash);
        assert!(ledger.verify_chain().unwrap().valid);
    }

    #[test]
    fn verify_is_membership() {
        let ledger = CertificateLedger::in_memory();
        let (certificate, _) = ledger.issue(draft(4.0)).unwrap();

        let result = ledger.verify(&certificate).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.message, "Certificate verified on CarbonChain Ledger");

        for i in 0..5 {
            ledger.issue(draft(10.0 + i as f64)).unwrap();
        }
        assert!(ledger.verify(&certificate).unwrap().is_valid);

        let mut forged = certificate.clone();
        forged.carbon_credits = 400.0;
        let result = ledger.verify(&forged).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.message, "Certificate not found in CarbonChain Ledger");
    }

    #[test]
    fn stats_report_latest_block() {
        let ledger = CertificateLedger::in_memory();
        let empty = ledger.stats().unwrap();
        assert_eq!(empty.total_blocks, 0);
        assert!(empty.latest_block.is_none());

        ledger.issue(draft(1.0)).unwrap();
        let (_, last) = ledger.issue(draft(2.0)).unwrap();
        let stats = ledger.stats().unwrap();
        assert_eq!(stats.total_blocks, 2);
        assert_eq!(stats.latest_block, Some(last));
    }

    #[test]
    fn open_resumes_existing_chain() {
        let store: Arc<dyn LedgerStore> = Arc::new(MemoryLedgerStore::new());
        let first = CertificateLedger::open(store.clone()).unwrap();
        let (_, block) = first.issue(draft(1.0)).unwrap();

        let reopened = CertificateLedger::open(store).unwrap();
        assert_eq!(reopened.len(), 1);
        let (certificate, next) = reopened.issue(draft(2.0)).unwrap();
        assert_eq!(certificate.certificate_id.0, "CC-2025-0002");
        assert_eq!(next.previous_hash, block.certificate_hash);
    }

    #[test]
    fn append_external_certificate() {
        let ledger = CertificateLedger::in_memory();
        let certificate = draft(7.0).into_certificate(42);
        let block = ledger.append(&certificate).unwrap();
        assert_eq!(block.block_id, 1);
        assert_eq!(certificate.certificate_id.0, "CC-2025-0042");
        assert!(ledger.verify(&certificate).unwrap().is_valid);
    }
}
