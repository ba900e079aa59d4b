//! Risk metrics stage
//!
//! Deterministic, total functions over a [`FacilityRecord`]. Every sub-risk
//! lives in `[0, 100]` before it is weighted into the composite score.

use carbon_types::numeric::{clamp, clamp_percent, mean, percent_of, round2, round_to, std_dev};
use carbon_types::{FacilityRecord, RiskBreakdown, RiskLevel, RiskMetrics};

const INTENSITY_WEIGHT: f64 = 0.30;
const GROWTH_WEIGHT: f64 = 0.20;
const PEAK_WEIGHT: f64 = 0.15;
const VOLATILITY_WEIGHT: f64 = 0.15;
const ANOMALY_FAULT_WEIGHT: f64 = 0.20;

/// Growth at or above this percentage saturates growth risk.
const GROWTH_SATURATION_PERCENT: f64 = 20.0;
/// Peak share at or above this percentage saturates peak risk.
const PEAK_SATURATION_PERCENT: f64 = 70.0;
/// Growth percentages are bounded to this magnitude.
const GROWTH_BOUND_PERCENT: f64 = 200.0;

/// Unrounded sub-risk scores.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubRisks {
    pub intensity: f64,
    pub growth: f64,
    pub peak: f64,
    pub volatility: f64,
    pub anomaly_fault: f64,
}

impl SubRisks {
    fn breakdown(&self) -> RiskBreakdown {
        RiskBreakdown {
            intensity_risk: to_score(self.intensity),
            growth_risk: to_score(self.growth),
            peak_risk: to_score(self.peak),
            volatility_risk: to_score(self.volatility),
            anomaly_fault_risk: to_score(self.anomaly_fault),
        }
    }
}

/// Weighted composite of the sub-risks, rounded and clamped to `[0, 100]`.
///
/// `0.30 I + 0.20 G + 0.15 P + 0.15 V + 0.20 A`
pub fn composite_score(risks: &SubRisks) -> u8 {
    let weighted = INTENSITY_WEIGHT * risks.intensity
        + GROWTH_WEIGHT * risks.growth
        + PEAK_WEIGHT * risks.peak
        + VOLATILITY_WEIGHT * risks.volatility
        + ANOMALY_FAULT_WEIGHT * risks.anomaly_fault;
    to_score(weighted)
}

/// Emission per production unit; 0 without production.
pub fn carbon_intensity(record: &FacilityRecord) -> f64 {
    if record.total_production_units > 0.0 {
        record.total_emission_tons / record.total_production_units
    } else {
        0.0
    }
}

/// Forecast vs previous month, unclamped.
///
/// A zero baseline reports 100 when the facility emits at all (forecast or
/// current), else 0.
fn raw_growth_percent(record: &FacilityRecord) -> f64 {
    let previous = record.previous_month_emission_tons;
    let predicted = record.predicted_next();
    if previous == 0.0 {
        if predicted > 0.0 || record.total_emission_tons > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (predicted - previous) / previous * 100.0
    }
}

/// Coefficient of variation of hourly emissions, clamped to `[0, 100]`.
pub fn volatility(hourly: &[f64]) -> f64 {
    let avg = mean(hourly);
    if avg == 0.0 {
        return 0.0;
    }
    clamp_percent(std_dev(hourly, avg) / avg * 100.0)
}

pub fn intensity_risk(intensity: f64, benchmark: f64) -> f64 {
    if benchmark == 0.0 {
        return 100.0;
    }
    clamp_percent(intensity / benchmark * 100.0)
}

pub fn growth_risk(growth_percent: f64) -> f64 {
    if growth_percent <= 0.0 {
        0.0
    } else if growth_percent >= GROWTH_SATURATION_PERCENT {
        100.0
    } else {
        clamp_percent(growth_percent / GROWTH_SATURATION_PERCENT * 100.0)
    }
}

pub fn peak_risk(peak_percent: f64) -> f64 {
    if peak_percent >= PEAK_SATURATION_PERCENT {
        100.0
    } else {
        clamp_percent(peak_percent / PEAK_SATURATION_PERCENT * 100.0)
    }
}

/// `0.6 x anomaly rate + 0.4 x downtime share`, both clamped first.
pub fn anomaly_fault_risk(record: &FacilityRecord) -> f64 {
    let anomaly = clamp_percent(record.anomaly_rate_percent());
    let fault = record.downtime_percent();
    clamp_percent(0.6 * anomaly + 0.4 * fault)
}

fn forecast_growth_percent(record: &FacilityRecord) -> f64 {
    let total = record.total_emission_tons;
    let predicted = record.predicted_next();
    if total == 0.0 {
        return if predicted > 0.0 { 100.0 } else { 0.0 };
    }
    clamp(
        (predicted - total) / total * 100.0,
        -GROWTH_BOUND_PERCENT,
        GROWTH_BOUND_PERCENT,
    )
}

/// Compute the sub-risks for a record.
pub fn sub_risks(record: &FacilityRecord) -> SubRisks {
    let intensity = carbon_intensity(record);
    let peak_percent = percent_of(record.peak_emission_tons, record.total_emission_tons);

    SubRisks {
        intensity: intensity_risk(intensity, record.industry_benchmark_intensity),
        growth: growth_risk(raw_growth_percent(record)),
        peak: peak_risk(peak_percent),
        volatility: volatility(&record.hourly_emissions),
        anomaly_fault: anomaly_fault_risk(record),
    }
}

/// Run the risk stage.
pub fn compute_risk_metrics(record: &FacilityRecord) -> RiskMetrics {
    let intensity = carbon_intensity(record);
    let growth_rate = clamp(
        raw_growth_percent(record),
        -GROWTH_BOUND_PERCENT,
        GROWTH_BOUND_PERCENT,
    );
    let peak_percent = percent_of(record.peak_emission_tons, record.total_emission_tons);
    let volatility = volatility(&record.hourly_emissions);

    let risks = sub_risks(record);
    let carbon_risk_score = composite_score(&risks);
    let breakdown = risks.breakdown();

    RiskMetrics {
        carbon_intensity: round_intensity(intensity),
        growth_rate: round2(growth_rate),
        peak_percent: round2(peak_percent),
        volatility: round2(volatility),
        carbon_risk_score,
        risk_level: RiskLevel::from_score(carbon_risk_score),
        stability_index: 100 - breakdown.volatility_risk,
        forecast_growth_percent: round2(forecast_growth_percent(record)),
        breakdown,
    }
}

/// Small intensities keep four decimals so they do not collapse to 0.
fn round_intensity(intensity: f64) -> f64 {
    if intensity.abs() < 0.01 {
        round_to(intensity, 4)
    } else {
        round2(intensity)
    }
}

fn to_score(value: f64) -> u8 {
    clamp_percent(value.round()) as u8
}
