//! Analysis pipeline: every stage in order, then certification on the ledger.

use std::sync::Arc;

use carbon_ledger::{CertificateDraft, CertificateLedger};
use carbon_types::{
    AnalysisPolicy, BlockchainVerification, CaptureStrategy, CarbonCredits, Certificate,
    ComplianceResult, EsgReport, Explainability, FacilityRecord, FinancialImpact,
    OptimizationResult, RecommendationSet, RiskMetrics,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::capture::evaluate_capture;
use crate::compliance::evaluate_compliance;
use crate::error::Result;
use crate::explain::generate_explainability;
use crate::financial::{calculate_financial_impact, credits_for_policy};
use crate::optimization::calculate_optimization;
use crate::recommendation::generate_recommendations;
use crate::report::{generate_esg_report, ReportContext};
use crate::risk::compute_risk_metrics;
use crate::simulator::{simulate, Adjustment, SimulationResult};

/// Complete output of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: String,
    pub emissions: f64,
    pub metrics: RiskMetrics,
    pub credits: CarbonCredits,
    pub certificate: Certificate,
    pub blockchain_verification: BlockchainVerification,
    pub recommendations: RecommendationSet,
    pub explainability: Explainability,
    pub compliance: ComplianceResult,
    pub optimization: OptimizationResult,
    pub financial_impact: FinancialImpact,
    pub micro_capture: CaptureStrategy,
    pub esg_report: EsgReport,
}

/// Runs the stage sequence against a shared certificate ledger.
///
/// Stages are pure; the ledger append is the only side effect and is
/// serialized inside [`CertificateLedger`].
pub struct AnalysisPipeline {
    policy: AnalysisPolicy,
    ledger: Arc<CertificateLedger>,
}

impl AnalysisPipeline {
    pub fn new(policy: AnalysisPolicy, ledger: Arc<CertificateLedger>) -> Self {
        Self { policy, ledger }
    }

    pub fn ledger(&self) -> &Arc<CertificateLedger> {
        &self.ledger
    }

    /// Coerce a raw payload and analyze it.
    pub fn analyze_value(&self, payload: &Value) -> Result<AnalysisReport> {
        let record = FacilityRecord::from_value(payload)?;
        self.analyze(&record)
    }

    pub fn analyze(&self, record: &FacilityRecord) -> Result<AnalysisReport> {
        self.analyze_at(record, Utc::now())
    }

    /// Analyze with an explicit issue time for the certificate and report.
    #[instrument(skip(self, record), fields(facility_id = %self.facility_id(record)))]
    pub fn analyze_at(
        &self,
        record: &FacilityRecord,
        generated_at: DateTime<Utc>,
    ) -> Result<AnalysisReport> {
        let policy = &self.policy;

        let metrics = compute_risk_metrics(record);
        let credits = credits_for_policy(
            record.previous_month_emission_tons,
            record.total_emission_tons,
            policy,
        );
        let recommendations = generate_recommendations(record, &metrics);
        let explainability = generate_explainability(&metrics, &recommendations);
        let compliance = evaluate_compliance(record, &metrics, policy);
        let optimization = calculate_optimization(record, &metrics);
        let financial_impact = calculate_financial_impact(record, &optimization, policy);
        let micro_capture = evaluate_capture(record, &metrics);

        let esg_report = generate_esg_report(
            &ReportContext {
                record,
                metrics: &metrics,
                compliance: &compliance,
                optimization: &optimization,
                recommendations: &recommendations,
                financial: &financial_impact,
            },
            generated_at,
        );

        let draft = CertificateDraft {
            facility_id: self.facility_id(record).to_string(),
            carbon_credits: credits.carbon_credits,
            emission_reduction_tons: credits.reduction,
            total_emissions_tons: credits.total_emission,
            baseline_emissions_tons: credits.baseline_emission,
            generated_at,
        };
        let (certificate, block) = self.ledger.issue(draft)?;

        info!(
            certificate_id = %certificate.certificate_id,
            risk_score = metrics.carbon_risk_score,
            compliance = %compliance.compliance_status,
            "analysis certified"
        );

        Ok(AnalysisReport {
            analysis_id: Uuid::new_v4().to_string(),
            emissions: record.total_emission_tons,
            metrics,
            credits,
            certificate,
            blockchain_verification: BlockchainVerification::from(&block),
            recommendations,
            explainability,
            compliance,
            optimization,
            financial_impact,
            micro_capture,
            esg_report,
        })
    }

    /// What-if run; never touches the ledger.
    pub fn simulate(&self, record: &FacilityRecord, adjustment: &Adjustment) -> SimulationResult {
        simulate(record, adjustment, &self.policy)
    }

    fn facility_id<'a>(&'a self, record: &'a FacilityRecord) -> &'a str {
        record
            .facility_id
            .as_deref()
            .unwrap_or(&self.policy.default_facility_id)
    }
}
