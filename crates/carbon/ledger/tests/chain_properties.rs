//! Property and persistence tests for the certificate hash chain.

use std::sync::Arc;
use std::thread;

use carbon_ledger::{
    CertificateDraft, CertificateLedger, ChainVerifier, FileLedgerStore, LedgerStore,
    MemoryLedgerStore,
};
use carbon_types::GENESIS_HASH;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn draft(facility: &str, credits: f64) -> CertificateDraft {
    CertificateDraft {
        facility_id: facility.to_string(),
        carbon_credits: credits,
        emission_reduction_tons: credits,
        total_emissions_tons: 100.0,
        baseline_emissions_tons: 100.0 + credits,
        generated_at: Utc.with_ymd_and_hms(2025, 9, 14, 12, 0, 0).unwrap(),
    }
}

fn arb_draft() -> impl Strategy<Value = CertificateDraft> {
    ("[A-Z]{2,6}-[0-9]{1,3}", 0u32..100_000, 0u32..100_000).prop_map(
        |(facility, credits, total)| {
            let credits = f64::from(credits) / 100.0;
            let total = f64::from(total) / 100.0;
            CertificateDraft {
                facility_id: facility,
                carbon_credits: credits,
                emission_reduction_tons: credits,
                total_emissions_tons: total,
                baseline_emissions_tons: total + credits,
                generated_at: Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap(),
            }
        },
    )
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Any sequence of appends produces a chain whose links all hold.
    #[test]
    fn appended_chain_always_verifies(drafts in prop::collection::vec(arb_draft(), 0..20)) {
        let ledger = CertificateLedger::in_memory();
        let count = drafts.len();
        for d in drafts {
            ledger.issue(d).unwrap();
        }

        let result = ledger.verify_chain().unwrap();
        prop_assert!(result.valid);
        prop_assert_eq!(result.verified_blocks, count);

        let blocks = ledger.blocks().unwrap();
        for (i, block) in blocks.iter().enumerate() {
            prop_assert_eq!(block.block_id, i as u64 + 1);
        }
        if let Some(first) = blocks.first() {
            prop_assert_eq!(first.previous_hash.as_str(), GENESIS_HASH);
        }
    }

    /// Every issued certificate stays verifiable after later appends.
    #[test]
    fn issued_certificates_remain_members(drafts in prop::collection::vec(arb_draft(), 1..12)) {
        let ledger = CertificateLedger::in_memory();
        let issued: Vec<_> = drafts
            .into_iter()
            .map(|d| ledger.issue(d).unwrap().0)
            .collect();

        for certificate in &issued {
            prop_assert!(ledger.verify(certificate).unwrap().is_valid);
        }
    }

    /// Flipping any stored hash is caught: by the next link, or by the
    /// recorded head when the last block is hit.
    #[test]
    fn tampering_is_detected(len in 1usize..10, target_seed in any::<usize>()) {
        let ledger = CertificateLedger::in_memory();
        for i in 0..len {
            ledger.issue(draft("PLANT-1", i as f64)).unwrap();
        }

        let mut blocks = ledger.blocks().unwrap();
        let target = target_seed % len;
        let tampered = if blocks[target].certificate_hash.starts_with('0') { "1" } else { "0" };
        blocks[target].certificate_hash.replace_range(0..1, tampered);

        let result = ChainVerifier::verify_anchored(&blocks, &ledger.head());
        prop_assert!(!result.valid);
        let expected = if target + 1 < len { target + 1 } else { target };
        prop_assert_eq!(result.first_invalid_index, Some(expected));
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn file_ledger_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger").join("blocks.jsonl");

    let first = {
        let store: Arc<dyn LedgerStore> = Arc::new(FileLedgerStore::new(&path).unwrap());
        let ledger = CertificateLedger::open(store).unwrap();
        let (certificate, _) = ledger.issue(draft("PLANT-1", 5.0)).unwrap();
        ledger.issue(draft("PLANT-2", 6.0)).unwrap();
        certificate
    };

    let store: Arc<dyn LedgerStore> = Arc::new(FileLedgerStore::new(&path).unwrap());
    let ledger = CertificateLedger::open(store).unwrap();
    assert_eq!(ledger.len(), 2);
    assert!(ledger.verify(&first).unwrap().is_valid);

    let (third, block) = ledger.issue(draft("PLANT-3", 7.0)).unwrap();
    assert_eq!(third.certificate_id.0, "CC-2025-0003");
    assert_eq!(block.block_id, 3);
    assert!(ledger.verify_chain().unwrap().valid);
}

#[test]
fn editing_the_ledger_file_breaks_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocks.jsonl");

    let store: Arc<dyn LedgerStore> = Arc::new(FileLedgerStore::new(&path).unwrap());
    let ledger = CertificateLedger::open(store.clone()).unwrap();
    for i in 0..3 {
        ledger.issue(draft("PLANT-1", i as f64)).unwrap();
    }

    let blocks = store.read_all().unwrap();
    let original = blocks[0].certificate_hash.clone();
    let forged = format!("{}{}", if original.starts_with('a') { "b" } else { "a" }, &original[1..]);
    let contents = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, contents.replacen(&original, &forged, 1)).unwrap();

    let reopened = CertificateLedger::open(store).unwrap();
    let result = reopened.verify_chain().unwrap();
    assert!(!result.valid);
    assert_eq!(result.first_invalid_index, Some(1));
}

fn flip_last_hash(path: &std::path::Path, last: &str) {
    let forged = format!("{}{}", if last.starts_with('a') { "b" } else { "a" }, &last[1..]);
    let contents = std::fs::read_to_string(path).unwrap();
    std::fs::write(path, contents.replace(last, &forged)).unwrap();
}

#[test]
fn editing_the_last_block_is_caught_by_the_open_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocks.jsonl");

    let store: Arc<dyn LedgerStore> = Arc::new(FileLedgerStore::new(&path).unwrap());
    let ledger = CertificateLedger::open(store.clone()).unwrap();
    let mut last = None;
    for i in 0..3 {
        last = Some(ledger.issue(draft("PLANT-1", i as f64)).unwrap().1);
    }
    let last = last.unwrap();
    assert!(ledger.verify_chain().unwrap().valid);

    flip_last_hash(&path, &last.certificate_hash);

    let result = ledger.verify_chain().unwrap();
    assert!(!result.valid);
    assert_eq!(result.first_invalid_index, Some(2));
    assert_eq!(result.verified_blocks, 2);
}

#[test]
fn tail_edit_before_open_is_not_detectable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocks.jsonl");

    let store: Arc<dyn LedgerStore> = Arc::new(FileLedgerStore::new(&path).unwrap());
    let ledger = CertificateLedger::open(store.clone()).unwrap();
    ledger.issue(draft("PLANT-1", 1.0)).unwrap();
    let (_, last) = ledger.issue(draft("PLANT-1", 2.0)).unwrap();
    drop(ledger);

    flip_last_hash(&path, &last.certificate_hash);

    // The head is rebuilt from the edited file, so the walk still holds.
    let reopened = CertificateLedger::open(store).unwrap();
    assert!(reopened.verify_chain().unwrap().valid);
}

#[test]
fn concurrent_issuers_keep_the_chain_linked() {
    let ledger = Arc::new(CertificateLedger::open(Arc::new(MemoryLedgerStore::new())).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                for i in 0..10 {
                    ledger
                        .issue(draft(&format!("PLANT-{worker}"), i as f64))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let result = ledger.verify_chain().unwrap();
    assert!(result.valid);
    assert_eq!(result.total_blocks, 80);

    let ids: Vec<u64> = ledger.blocks().unwrap().iter().map(|b| b.block_id).collect();
    assert_eq!(ids, (1..=80).collect::<Vec<_>>());
}
