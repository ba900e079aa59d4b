//! Financial impact, ROI and carbon credit estimates.

use carbon_types::numeric::{clamp, round2};
use carbon_types::{AnalysisPolicy, CarbonCredits, FacilityRecord, FinancialImpact, OptimizationResult};

const ROI_MIN_PERCENT: f64 = -100.0;
const ROI_MAX_PERCENT: f64 = 500.0;

/// Monetize the optimization potential.
///
/// Credits are issued 1:1 per ton of potential reduction. The avoided
/// penalty applies only when the forecast exceeds the regulatory threshold.
pub fn calculate_financial_impact(
    record: &FacilityRecord,
    optimization: &OptimizationResult,
    policy: &AnalysisPolicy,
) -> FinancialImpact {
    let reduction =
        (record.total_emission_tons * optimization.optimization_potential_percent / 100.0).max(0.0);
    let credits = reduction;

    let value_min = credits * policy.credit_price_min;
    let value_max = credits * policy.credit_price_max;
    let avoided_penalty = avoided_penalty(record.predicted_next(), policy);

    let benefit_min = value_min + avoided_penalty;
    let benefit_max = value_max + avoided_penalty;
    let roi = roi_percent((benefit_min + benefit_max) / 2.0, policy.implementation_cost);

    FinancialImpact {
        potential_reduction_tons: round2(reduction),
        carbon_credits_generated: round2(credits),
        estimated_credit_value_min: round2(value_min),
        estimated_credit_value_max: round2(value_max),
        avoided_compliance_penalty: round2(avoided_penalty),
        total_financial_benefit_min: round2(benefit_min),
        total_financial_benefit_max: round2(benefit_max),
        roi_percent: round2(roi),
    }
}

fn avoided_penalty(predicted: f64, policy: &AnalysisPolicy) -> f64 {
    if predicted > policy.regulatory_threshold_tons {
        (predicted - policy.regulatory_threshold_tons) * policy.penalty_per_ton
    } else {
        0.0
    }
}

fn roi_percent(average_benefit: f64, implementation_cost: f64) -> f64 {
    if implementation_cost == 0.0 {
        return 0.0;
    }
    clamp(
        (average_benefit - implementation_cost) / implementation_cost * 100.0,
        ROI_MIN_PERCENT,
        ROI_MAX_PERCENT,
    )
}

/// Credits earned by emitting less than the baseline.
///
/// Inverted price bounds are swapped so `estimated_value_min <=
/// estimated_value_max` always holds.
pub fn calculate_carbon_credits(
    baseline: f64,
    current: f64,
    price_min: f64,
    price_max: f64,
) -> CarbonCredits {
    let (low, high) = if price_min <= price_max {
        (price_min, price_max)
    } else {
        (price_max, price_min)
    };

    let reduction = (baseline - current).max(0.0);
    let credits = reduction;

    CarbonCredits {
        total_emission: round2(current),
        baseline_emission: round2(baseline),
        reduction: round2(reduction),
        carbon_credits: round2(credits),
        estimated_value_min: round2(credits * low),
        estimated_value_max: round2(credits * high),
    }
}

/// [`calculate_carbon_credits`] priced by the policy.
pub fn credits_for_policy(baseline: f64, current: f64, policy: &AnalysisPolicy) -> CarbonCredits {
    calculate_carbon_credits(baseline, current, policy.credit_price_min, policy.credit_price_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_types::{InvestmentPriority, Tier};

    fn optimization(potential: f64) -> OptimizationResult {
        OptimizationResult {
            optimization_potential_percent: potential,
            improvement_category: Tier::Medium,
            investment_priority: InvestmentPriority::PlannedOptimization,
            sustainability_score_boost: potential * 1.2,
        }
    }

    fn record(total: f64, predicted: Option<f64>) -> FacilityRecord {
        FacilityRecord {
            total_emission_tons: total,
            previous_month_emission_tons: total,
            predicted_next_month_emission_tons: predicted,
            ..Default::default()
        }
    }

    #[test]
    fn credits_and_value_range() {
        let impact = calculate_financial_impact(
            &record(200.0, Some(60.0)),
            &optimization(10.0),
            &AnalysisPolicy::default(),
        );
        assert_eq!(impact.potential_reduction_tons, 20.0);
        assert_eq!(impact.carbon_credits_generated, 20.0);
        assert_eq!(impact.estimated_credit_value_min, 14_000.0);
        assert_eq!(impact.estimated_credit_value_max, 40_000.0);
        assert_eq!(impact.avoided_compliance_penalty, 0.0);
        // avg benefit 27,000 vs 500,000 cost
        assert_eq!(impact.roi_percent, -94.6);
    }

    #[test]
    fn penalty_above_threshold() {
        let impact = calculate_financial_impact(
            &record(100.0, Some(80.0)),
            &optimization(0.0),
            &AnalysisPolicy::default(),
        );
        assert_eq!(impact.avoided_compliance_penalty, 30_000.0);
        assert_eq!(impact.total_financial_benefit_min, 30_000.0);
        assert_eq!(impact.total_financial_benefit_max, 30_000.0);
        assert_eq!(impact.roi_percent, -94.0);
    }

    #[test]
    fn roi_is_clamped() {
        let impact = calculate_financial_impact(
            &record(100.0, Some(2_000.0)),
            &optimization(35.0),
            &AnalysisPolicy::default(),
        );
        assert_eq!(impact.roi_percent, 500.0);

        assert_eq!(roi_percent(1_000.0, 0.0), 0.0);
        assert_eq!(roi_percent(0.0, 500_000.0), -100.0);
    }

    #[test]
    fn credit_calculator() {
        let credits = calculate_carbon_credits(120.0, 100.0, 700.0, 2000.0);
        assert_eq!(credits.reduction, 20.0);
        assert_eq!(credits.carbon_credits, 20.0);
        assert_eq!(credits.estimated_value_min, 14_000.0);
        assert_eq!(credits.estimated_value_max, 40_000.0);

        let none = calculate_carbon_credits(80.0, 100.0, 700.0, 2000.0);
        assert_eq!(none.reduction, 0.0);
        assert_eq!(none.estimated_value_max, 0.0);
    }

    #[test]
    fn inverted_prices_are_swapped() {
        let credits = calculate_carbon_credits(10.0, 5.0, 2000.0, 700.0);
        assert_eq!(credits.estimated_value_min, 3_500.0);
        assert_eq!(credits.estimated_value_max, 10_000.0);
    }
}
