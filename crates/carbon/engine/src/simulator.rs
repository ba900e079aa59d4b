//! What-if simulation over perturbed inputs.
//!
//! Only the risk, optimization and financial stages are re-run. Compliance,
//! recommendations, explainability and the report are not recomputed.

use carbon_types::numeric::{coerce_number, percent_of, round2};
use carbon_types::{
    AnalysisPolicy, CarbonCredits, FacilityRecord, FinancialImpact, OptimizationResult, RiskMetrics,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::financial::{calculate_financial_impact, credits_for_policy};
use crate::optimization::calculate_optimization;
use crate::risk::compute_risk_metrics;

/// Percentage changes applied multiplicatively to emission figures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    #[serde(default)]
    pub energy_change_percent: f64,
    #[serde(default)]
    pub load_change_percent: f64,
    #[serde(default)]
    pub runtime_change_percent: f64,
}

impl Adjustment {
    pub fn new(energy: f64, load: f64, runtime: f64) -> Self {
        Self {
            energy_change_percent: energy,
            load_change_percent: load,
            runtime_change_percent: runtime,
        }
    }

    /// Read an adjustment payload; absent or non-numeric fields count as 0.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            EngineError::InvalidAdjustment("adjustment payload must be a JSON object".to_string())
        })?;
        Ok(Self::new(
            coerce_number(obj.get("energy_change_percent")),
            coerce_number(obj.get("load_change_percent")),
            coerce_number(obj.get("runtime_change_percent")),
        ))
    }

    /// `(1 + e/100)(1 + l/100)(1 + r/100)`, with non-finite inputs read as 0.
    pub fn factor(&self) -> f64 {
        [
            self.energy_change_percent,
            self.load_change_percent,
            self.runtime_change_percent,
        ]
        .iter()
        .map(|p| if p.is_finite() { 1.0 + p / 100.0 } else { 1.0 })
        .product()
    }

    /// Scale one value, flooring at 0 and rounding to two decimals.
    pub fn apply(&self, value: f64) -> f64 {
        round2((value * self.factor()).max(0.0))
    }

    /// Copy of `record` with total, peak, hourly and forecast emissions scaled.
    pub fn adjust_record(&self, record: &FacilityRecord) -> FacilityRecord {
        FacilityRecord {
            total_emission_tons: self.apply(record.total_emission_tons),
            peak_emission_tons: self.apply(record.peak_emission_tons),
            hourly_emissions: record.hourly_emissions.iter().map(|v| self.apply(*v)).collect(),
            predicted_next_month_emission_tons: record
                .predicted_next_month_emission_tons
                .map(|p| self.apply(p)),
            ..record.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub adjusted_emission: f64,
    pub emission_change_percent: f64,
    pub metrics: RiskMetrics,
    pub credits: CarbonCredits,
    pub optimization: OptimizationResult,
    pub financial_impact: FinancialImpact,
}

/// Re-run the numeric stages against an adjusted copy of `record`.
pub fn simulate(
    record: &FacilityRecord,
    adjustment: &Adjustment,
    policy: &AnalysisPolicy,
) -> SimulationResult {
    let adjusted = adjustment.adjust_record(record);

    let metrics = compute_risk_metrics(&adjusted);
    let optimization = calculate_optimization(&adjusted, &metrics);
    let financial_impact = calculate_financial_impact(&adjusted, &optimization, policy);
    let credits = credits_for_policy(
        record.previous_month_emission_tons,
        adjusted.total_emission_tons,
        policy,
    );

    let emission_change_percent =
        change_percent(record.total_emission_tons, adjusted.total_emission_tons);

    debug!(
        factor = adjustment.factor(),
        adjusted = adjusted.total_emission_tons,
        "what-if scenario simulated"
    );

    SimulationResult {
        adjusted_emission: adjusted.total_emission_tons,
        emission_change_percent: round2(emission_change_percent),
        metrics,
        credits,
        optimization,
        financial_impact,
    }
}

fn change_percent(original: f64, adjusted: f64) -> f64 {
    if original == 0.0 {
        return if adjusted > 0.0 { 100.0 } else { 0.0 };
    }
    percent_of(adjusted - original, original)
}
