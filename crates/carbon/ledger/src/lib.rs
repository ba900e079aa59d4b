//! Carbon certificate ledger
//!
//! Append-only, tamper-evident record of every certificate issued by an
//! analysis run. Each block stores the SHA-256 of its certificate's canonical
//! JSON and the hash of the block before it, so
//! `block[i].previous_hash == block[i-1].certificate_hash` for every `i > 1`.
//!
//! ## Components
//!
//! - [`LedgerStore`]: persistence seam (`read_all` / `append_block`), with
//!   [`MemoryLedgerStore`] and the JSON-lines [`FileLedgerStore`]
//! - [`CertificateLedger`]: issues, appends and verifies certificates
//! - [`ChainVerifier`]: walks the previous-hash linkage
//!
//! ## Verification semantics
//!
//! [`CertificateLedger::verify`] answers "was this exact certificate ever
//! recorded?" by searching every block for the recomputed hash. It does not
//! check the block position, so it tolerates reordering and cannot detect a
//! replayed certificate. Use [`CertificateLedger::verify_chain`] to detect
//! tampering with the chain itself.
//!
//! Nothing links to the last block, so the walk alone cannot see an edit to
//! its `certificate_hash`. [`CertificateLedger::verify_chain`] also checks
//! the tail against the [`ChainHead`] the handle recorded at open and on
//! every append. A tail edited before the ledger was opened is rebuilt into
//! that head and goes unnoticed. Keep one open handle per store; a second
//! handle appending to the same store makes the first handle's head stale.

#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod integrity;
pub mod ledger;
pub mod store;

pub use error::{LedgerError, Result};
pub use hash::{canonical_json, certificate_hash};
pub use integrity::{ChainHead, ChainVerificationResult, ChainVerifier};
pub use ledger::{CertificateDraft, CertificateLedger};
pub use store::{FileLedgerStore, LedgerStore, MemoryLedgerStore};
