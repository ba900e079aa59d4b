use serde::{Deserialize, Serialize};

use crate::record::DEFAULT_FACILITY_ID;

/// Regulatory and pricing constants applied by the analysis stages.
///
/// The defaults are the published values; deployments may override them
/// through configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPolicy {
    /// Maximum allowed monthly emission (tons)
    #[serde(default = "default_threshold")]
    pub regulatory_threshold_tons: f64,
    /// Fraction of the threshold above which current emissions raise a warning
    #[serde(default = "default_warning_ratio")]
    pub warning_ratio: f64,
    /// Lower carbon credit price (currency units per credit)
    #[serde(default = "default_credit_price_min")]
    pub credit_price_min: f64,
    /// Upper carbon credit price (currency units per credit)
    #[serde(default = "default_credit_price_max")]
    pub credit_price_max: f64,
    /// Penalty per ton above the regulatory threshold
    #[serde(default = "default_penalty_per_ton")]
    pub penalty_per_ton: f64,
    /// Fixed implementation cost used for ROI
    #[serde(default = "default_implementation_cost")]
    pub implementation_cost: f64,
    /// Facility id stamped on certificates when the record has none
    #[serde(default = "default_facility_id")]
    pub default_facility_id: String,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            regulatory_threshold_tons: default_threshold(),
            warning_ratio: default_warning_ratio(),
            credit_price_min: default_credit_price_min(),
            credit_price_max: default_credit_price_max(),
            penalty_per_ton: default_penalty_per_ton(),
            implementation_cost: default_implementation_cost(),
            default_facility_id: default_facility_id(),
        }
    }
}

fn default_threshold() -> f64 {
    70.0
}

fn default_warning_ratio() -> f64 {
    0.9
}

fn default_credit_price_min() -> f64 {
    700.0
}

fn default_credit_price_max() -> f64 {
    2000.0
}

fn default_penalty_per_ton() -> f64 {
    3000.0
}

fn default_implementation_cost() -> f64 {
    500_000.0
}

fn default_facility_id() -> String {
    DEFAULT_FACILITY_ID.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let policy = AnalysisPolicy::default();
        assert_eq!(policy.regulatory_threshold_tons, 70.0);
        assert_eq!(policy.credit_price_min, 700.0);
        assert_eq!(policy.credit_price_max, 2000.0);
        assert_eq!(policy.implementation_cost, 500_000.0);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let policy: AnalysisPolicy =
            serde_json::from_str(r#"{ "regulatory_threshold_tons": 90 }"#).unwrap();
        assert_eq!(policy.regulatory_threshold_tons, 90.0);
        assert_eq!(policy.penalty_per_ton, 3000.0);
        assert_eq!(policy.default_facility_id, DEFAULT_FACILITY_ID);
    }
}
