//! Regulatory compliance stage.

use carbon_types::{
    AnalysisPolicy, ComplianceResult, ComplianceRiskLevel, ComplianceStatus, FacilityRecord,
    RiskMetrics,
};

const DAYS_PER_MONTH: f64 = 30.0;

/// Classify the facility against the monthly emission threshold.
///
/// A record without a forecast cannot be projected and yields
/// [`ComplianceStatus::InsufficientData`].
pub fn evaluate_compliance(
    record: &FacilityRecord,
    metrics: &RiskMetrics,
    policy: &AnalysisPolicy,
) -> ComplianceResult {
    let Some(predicted) = record.predicted_next_month_emission_tons else {
        return insufficient_data();
    };

    let current = record.total_emission_tons;
    let threshold = policy.regulatory_threshold_tons;

    let status = if predicted > threshold {
        ComplianceStatus::AtRisk
    } else if current > threshold * policy.warning_ratio {
        ComplianceStatus::Warning
    } else {
        ComplianceStatus::Compliant
    };
    let risk_level = status.risk_level();

    ComplianceResult {
        compliance_status: status,
        risk_level,
        projected_threshold_breach_days: breach_days(current, predicted, metrics.growth_rate, threshold),
        regulatory_warning: regulatory_warning(status).to_string(),
        advisory_note: advisory_note(risk_level).to_string(),
    }
}

/// Days until the threshold is crossed at the current monthly increase.
///
/// `None` unless emissions are growing, still below the threshold, and the
/// forecast is above the current month.
fn breach_days(current: f64, predicted: f64, growth_rate: f64, threshold: f64) -> Option<u32> {
    if growth_rate <= 0.0 || current >= threshold {
        return None;
    }
    let monthly_increase = predicted - current;
    if monthly_increase <= 0.0 {
        return None;
    }
    let days = (threshold - current) / monthly_increase * DAYS_PER_MONTH;
    Some(days.round().max(0.0) as u32)
}

fn insufficient_data() -> ComplianceResult {
    let status = ComplianceStatus::InsufficientData;
    ComplianceResult {
        compliance_status: status,
        risk_level: status.risk_level(),
        projected_threshold_breach_days: None,
        regulatory_warning: regulatory_warning(status).to_string(),
        advisory_note: advisory_note(ComplianceRiskLevel::Unknown).to_string(),
    }
}

fn regulatory_warning(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::AtRisk => {
            "Projected emissions exceed regulatory threshold. Immediate emission control strategies are required to avoid penalties."
        }
        ComplianceStatus::Warning => {
            "Facility emissions are approaching regulatory limits. Preventive optimization is advised."
        }
        ComplianceStatus::Compliant => "Facility operates within regulatory emission limits.",
        ComplianceStatus::InsufficientData => "Forecast data unavailable for compliance evaluation.",
    }
}

fn advisory_note(risk_level: ComplianceRiskLevel) -> &'static str {
    match risk_level {
        ComplianceRiskLevel::High => {
            "Deploy high-impact reduction strategies and monitor monthly growth closely."
        }
        ComplianceRiskLevel::Medium => {
            "Implement targeted efficiency improvements to maintain compliance."
        }
        ComplianceRiskLevel::Low => {
            "Continue monitoring emissions and sustain current mitigation strategies."
        }
        ComplianceRiskLevel::Unknown => {
            "Provide emission forecast to enable regulatory risk prediction."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::compute_risk_metrics;

    fn evaluate(current: f64, previous: f64, predicted: Option<f64>) -> ComplianceResult {
        let record = FacilityRecord {
            total_emission_tons: current,
            previous_month_emission_tons: previous,
            predicted_next_month_emission_tons: predicted,
            ..Default::default()
        };
        let metrics = compute_risk_metrics(&record);
        evaluate_compliance(&record, &metrics, &AnalysisPolicy::default())
    }

    #[test]
    fn missing_forecast_is_insufficient_data() {
        let result = evaluate(50.0, 40.0, None);
        assert_eq!(result.compliance_status, ComplianceStatus::InsufficientData);
        assert_eq!(result.risk_level, ComplianceRiskLevel::Unknown);
        assert_eq!(result.projected_threshold_breach_days, None);
        assert!(result.advisory_note.starts_with("Provide emission forecast"));
    }

    #[test]
    fn forecast_above_threshold_is_at_risk() {
        let result = evaluate(60.0, 55.0, Some(75.0));
        assert_eq!(result.compliance_status, ComplianceStatus::AtRisk);
        assert_eq!(result.risk_level, ComplianceRiskLevel::High);
        // (70 - 60) / (75 - 60) * 30 = 20
        assert_eq!(result.projected_threshold_breach_days, Some(20));
    }

    #[test]
    fn near_threshold_is_warning() {
        let result = evaluate(65.0, 66.0, Some(64.0));
        assert_eq!(result.compliance_status, ComplianceStatus::Warning);
        assert_eq!(result.risk_level, ComplianceRiskLevel::Medium);
        assert_eq!(result.projected_threshold_breach_days, None);
    }

    #[test]
    fn low_emitter_is_compliant() {
        let result = evaluate(40.0, 40.0, Some(42.0));
        assert_eq!(result.compliance_status, ComplianceStatus::Compliant);
        assert_eq!(result.risk_level, ComplianceRiskLevel::Low);
        // (70 - 40) / 2 * 30 = 450
        assert_eq!(result.projected_threshold_breach_days, Some(450));
        assert_eq!(
            result.regulatory_warning,
            "Facility operates within regulatory emission limits."
        );
    }

    #[test]
    fn already_over_threshold_has_no_breach_projection() {
        let result = evaluate(90.0, 80.0, Some(95.0));
        assert_eq!(result.compliance_status, ComplianceStatus::AtRisk);
        assert_eq!(result.projected_threshold_breach_days, None);
    }

    #[test]
    fn threshold_comes_from_policy() {
        let record = FacilityRecord {
            total_emission_tons: 60.0,
            previous_month_emission_tons: 60.0,
            predicted_next_month_emission_tons: Some(60.0),
            ..Default::default()
        };
        let metrics = compute_risk_metrics(&record);
        let policy = AnalysisPolicy {
            regulatory_threshold_tons: 50.0,
            ..Default::default()
        };
        let result = evaluate_compliance(&record, &metrics, &policy);
        assert_eq!(result.compliance_status, ComplianceStatus::AtRisk);
    }
}
