//! Certificate verification

use std::path::PathBuf;

use anyhow::Context;
use carbon_ledger::CertificateLedger;
use carbon_types::Certificate;
use clap::Args;

use super::read_json;
use crate::output::{print_error, print_field, print_single, print_success, OutputFormat};

/// Arguments for `carbonctl verify`
#[derive(Args)]
pub struct VerifyArgs {
    /// Certificate JSON, or an analysis report containing one (`-` for stdin)
    pub file: PathBuf,
}

/// Check a certificate against the ledger. Returns whether it was found.
pub fn verify(
    args: VerifyArgs,
    ledger: &CertificateLedger,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let mut document = read_json(&args.file)?;
    let document = if document.get("certificate").is_some() {
        document["certificate"].take()
    } else {
        document
    };
    let certificate: Certificate = serde_json::from_value(document)
        .with_context(|| format!("{} does not hold a certificate", args.file.display()))?;

    let verification = ledger.verify(&certificate)?;

    match format {
        OutputFormat::Text => {
            if verification.is_valid {
                print_success(&verification.message);
            } else {
                print_error(&verification.message);
            }
            print_field("Certificate", &certificate.certificate_id);
            print_field("Hash", &verification.certificate_hash);
        }
        _ => print_single(&verification, format)?,
    }

    Ok(verification.is_valid)
}
