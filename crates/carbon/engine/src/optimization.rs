//! Achievable emission improvement.

use carbon_types::numeric::{clamp, round2};
use carbon_types::{FacilityRecord, InvestmentPriority, OptimizationResult, RiskMetrics, Tier};

const MAX_POTENTIAL_PERCENT: f64 = 35.0;
const MAX_SCORE_BOOST: f64 = 40.0;
const MAX_INTENSITY_GAP: f64 = 3.0;

/// Estimate how much of the facility's emission is recoverable.
///
/// potential = 0.15 volatility + 0.15 peak% + 0.20 anomaly rate
///           + 0.10 downtime% + 5 x capped intensity gap + 0.15 risk score
pub fn calculate_optimization(record: &FacilityRecord, metrics: &RiskMetrics) -> OptimizationResult {
    let intensity_gap = (metrics.carbon_intensity - record.industry_benchmark_intensity)
        .max(0.0)
        .min(MAX_INTENSITY_GAP);

    let potential = metrics.volatility * 0.15
        + metrics.peak_percent * 0.15
        + record.anomaly_rate_percent() * 0.20
        + record.downtime_percent() * 0.10
        + intensity_gap * 5.0
        + f64::from(metrics.carbon_risk_score) * 0.15;
    let potential = clamp(potential, 0.0, MAX_POTENTIAL_PERCENT);

    let category = categorize(potential);

    OptimizationResult {
        optimization_potential_percent: round2(potential),
        improvement_category: category,
        investment_priority: InvestmentPriority::from(category),
        sustainability_score_boost: round2(clamp(potential * 1.2, 0.0, MAX_SCORE_BOOST)),
    }
}

fn categorize(potential: f64) -> Tier {
    if potential > 20.0 {
        Tier::High
    } else if potential >= 10.0 {
        Tier::Medium
    } else {
        Tier::Low
    }
}
