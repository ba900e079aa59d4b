//! # carbon-types
//!
//! Shared data model for the carbon intelligence core:
//!
//! - **FacilityRecord**: the strongly-typed telemetry snapshot, produced once
//!   at ingestion by coercing a raw JSON payload
//! - **Stage outputs**: risk metrics, compliance, optimization, financial
//!   impact, recommendations, explainability, capture strategy, ESG report
//! - **Certificate / LedgerBlock**: the records hash-chained by `carbon-ledger`
//! - **AnalysisPolicy**: regulatory and pricing constants, overridable by config
//!
//! ## Invariants
//!
//! - No NaN or missing numeric value survives ingestion; every field defaults to 0.
//! - Stage outputs are produced once per analysis and never mutated afterwards.

#![deny(unsafe_code)]

pub mod analysis;
pub mod certificate;
pub mod error;
pub mod numeric;
pub mod policy;
pub mod record;

pub use analysis::{
    CaptureStrategy, CaptureStrategyType, CarbonCredits, ComplianceResult, ComplianceRiskLevel,
    ComplianceStatus, EmissionScale, EsgRating, EsgReport, Explainability, FinancialImpact,
    ImplementationComplexity, InvestmentPriority, OptimizationResult, Recommendation,
    RecommendationKind, RecommendationSet, RiskBreakdown, RiskDriver, RiskLevel, RiskMetrics,
    Tier,
};
pub use certificate::{
    BlockchainVerification, Certificate, CertificateId, CertificateVerification, LedgerBlock,
    LedgerStats, GENESIS_HASH,
};
pub use error::InputShapeError;
pub use policy::AnalysisPolicy;
pub use record::{FacilityRecord, DEFAULT_FACILITY_ID};
