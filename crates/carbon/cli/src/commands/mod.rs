//! CLI command implementations

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

pub mod analyze;
pub mod certificate;
pub mod ledger;

/// Read a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}
