//! Micro carbon capture strategy selection.

use carbon_types::numeric::{clamp_percent, round2};
use carbon_types::{CaptureStrategy, CaptureStrategyType, EmissionScale, FacilityRecord, RiskMetrics, Tier};

/// Share of emission a fully suitable site can capture per month.
const CAPTURE_EFFICIENCY: f64 = 0.25;
/// Hard cap on captured share of total emission.
const MAX_CAPTURE_SHARE: f64 = 0.40;

pub fn classify_scale(total_emission: f64) -> EmissionScale {
    if total_emission < 50.0 {
        EmissionScale::Small
    } else if total_emission <= 200.0 {
        EmissionScale::Medium
    } else {
        EmissionScale::Large
    }
}

/// How well the site fits a capture installation, `[0, 100]`.
pub fn suitability_score(record: &FacilityRecord, metrics: &RiskMetrics) -> f64 {
    let intensity_gap = (metrics.carbon_intensity - record.industry_benchmark_intensity).max(0.0);
    clamp_percent(
        f64::from(metrics.carbon_risk_score) * 0.30
            + metrics.peak_percent * 0.20
            + metrics.volatility * 0.15
            + record.anomaly_rate_percent() * 0.15
            + intensity_gap * 20.0,
    )
}

fn select_strategy(scale: EmissionScale, metrics: &RiskMetrics) -> CaptureStrategyType {
    if metrics.carbon_risk_score > 80 && metrics.volatility > 50.0 {
        return CaptureStrategyType::SyntheticFuelPilot;
    }
    match scale {
        EmissionScale::Small => CaptureStrategyType::Mineralization,
        EmissionScale::Medium => CaptureStrategyType::ModularFlueGasCapture,
        EmissionScale::Large => CaptureStrategyType::OnSiteLiquefaction,
    }
}

fn roi_boost(suitability: f64) -> Tier {
    if suitability > 70.0 {
        Tier::High
    } else if suitability >= 40.0 {
        Tier::Medium
    } else {
        Tier::Low
    }
}

pub fn evaluate_capture(record: &FacilityRecord, metrics: &RiskMetrics) -> CaptureStrategy {
    let total = record.total_emission_tons;
    let scale = classify_scale(total);
    let suitability = suitability_score(record, metrics);
    let strategy = select_strategy(scale, metrics);

    let capture = (total * suitability / 100.0 * CAPTURE_EFFICIENCY).min(total * MAX_CAPTURE_SHARE);

    CaptureStrategy {
        emission_scale: scale,
        capture_strategy_type: strategy,
        suitability_score: round2(suitability),
        estimated_capture_tons: round2(capture),
        implementation_complexity: strategy.complexity(),
        expected_roi_boost: roi_boost(suitability),
    }
}
