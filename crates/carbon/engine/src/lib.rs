//! # carbon-engine
//!
//! The carbon analysis pipeline. A [`FacilityRecord`](carbon_types::FacilityRecord)
//! flows through a fixed sequence of deterministic stages:
//!
//! ```text
//! risk -> { compliance, optimization -> financial, recommendations -> explainability, capture }
//!      -> ESG report -> certificate ledger append
//! ```
//!
//! Every stage is a pure, synchronous function of the record and earlier
//! stage outputs. The only side effect of an analysis is the certificate
//! appended to the injected [`CertificateLedger`](carbon_ledger::CertificateLedger).
//!
//! The [`simulator`] re-runs risk, optimization and financial stages on a
//! perturbed copy of a record without certifying anything.

#![deny(unsafe_code)]

pub mod capture;
pub mod compliance;
pub mod error;
pub mod explain;
pub mod financial;
pub mod optimization;
pub mod pipeline;
pub mod recommendation;
pub mod report;
pub mod risk;
pub mod simulator;

pub use capture::evaluate_capture;
pub use compliance::evaluate_compliance;
pub use error::{EngineError, Result};
pub use explain::generate_explainability;
pub use financial::{calculate_carbon_credits, calculate_financial_impact};
pub use optimization::calculate_optimization;
pub use pipeline::{AnalysisPipeline, AnalysisReport};
pub use recommendation::generate_recommendations;
pub use report::{generate_esg_report, ReportContext};
pub use risk::{composite_score, compute_risk_metrics, SubRisks};
pub use simulator::{simulate, Adjustment, SimulationResult};
