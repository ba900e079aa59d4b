//! Configuration for carbonctl

use std::path::PathBuf;
use std::sync::Arc;

use carbon_ledger::{CertificateLedger, FileLedgerStore, LedgerStore, MemoryLedgerStore};
use carbon_types::AnalysisPolicy;
use serde::{Deserialize, Serialize};

/// Main CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarbonConfig {
    /// Certificate ledger backend
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Regulatory and pricing constants
    #[serde(default)]
    pub policy: AnalysisPolicy,
}

/// Certificate ledger backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LedgerConfig {
    /// Process-local ledger, discarded on exit
    #[default]
    Memory,

    /// JSON-lines file, one block per line
    File {
        /// Ledger file path
        path: PathBuf,
    },
}

impl LedgerConfig {
    /// Open the configured ledger, replaying any persisted blocks.
    pub fn open(&self) -> carbon_ledger::Result<CertificateLedger> {
        let store: Arc<dyn LedgerStore> = match self {
            LedgerConfig::Memory => Arc::new(MemoryLedgerStore::new()),
            LedgerConfig::File { path } => Arc::new(FileLedgerStore::new(path)?),
        };
        CertificateLedger::open(store)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CarbonConfig {
    /// Load configuration: defaults, then the optional file, then `CARBON_*`
    /// environment variables (`__` separates nested keys, e.g.
    /// `CARBON_POLICY__REGULATORY_THRESHOLD_TONS`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&CarbonConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CARBON")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
