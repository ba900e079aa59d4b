//! Outputs of the analysis stages.
//!
//! Wire names follow the dashboard contract (snake_case fields, human
//! readable enum labels such as `"At Risk"` or `"Very High"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Risk metrics
// ---------------------------------------------------------------------------

/// Overall carbon risk classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// `<= 30` Low, `<= 70` Moderate, otherwise High.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => RiskLevel::Low,
            31..=70 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }
}

/// Three-step tier shared by recommendation priority, improvement category
/// and ROI boost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the five named sub-risks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDriver {
    IntensityRisk,
    GrowthRisk,
    PeakRisk,
    VolatilityRisk,
    AnomalyFaultRisk,
}

impl RiskDriver {
    /// Declaration order, used as the tie-break when ranking drivers.
    pub const ALL: [RiskDriver; 5] = [
        RiskDriver::IntensityRisk,
        RiskDriver::GrowthRisk,
        RiskDriver::PeakRisk,
        RiskDriver::VolatilityRisk,
        RiskDriver::AnomalyFaultRisk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskDriver::IntensityRisk => "Carbon Intensity",
            RiskDriver::GrowthRisk => "Emission Growth",
            RiskDriver::PeakRisk => "Peak Dependency",
            RiskDriver::VolatilityRisk => "Operational Volatility",
            RiskDriver::AnomalyFaultRisk => "Anomalies & Downtime",
        }
    }
}

/// Rounded sub-risk scores, each in `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub intensity_risk: u8,
    pub growth_risk: u8,
    pub peak_risk: u8,
    pub volatility_risk: u8,
    pub anomaly_fault_risk: u8,
}

impl RiskBreakdown {
    pub fn score(&self, driver: RiskDriver) -> u8 {
        match driver {
            RiskDriver::IntensityRisk => self.intensity_risk,
            RiskDriver::GrowthRisk => self.growth_risk,
            RiskDriver::PeakRisk => self.peak_risk,
            RiskDriver::VolatilityRisk => self.volatility_risk,
            RiskDriver::AnomalyFaultRisk => self.anomaly_fault_risk,
        }
    }

    /// Drivers sorted by descending score; ties keep declaration order.
    pub fn ranked(&self) -> Vec<(RiskDriver, u8)> {
        let mut drivers: Vec<_> = RiskDriver::ALL
            .iter()
            .map(|d| (*d, self.score(*d)))
            .collect();
        drivers.sort_by(|a, b| b.1.cmp(&a.1));
        drivers
    }
}

/// Risk-stage output. Read-only for every downstream stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub carbon_intensity: f64,
    pub growth_rate: f64,
    pub peak_percent: f64,
    pub volatility: f64,
    pub carbon_risk_score: u8,
    pub risk_level: RiskLevel,
    pub stability_index: u8,
    pub forecast_growth_percent: f64,
    pub breakdown: RiskBreakdown,
}

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    Warning,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::Warning => "Warning",
            ComplianceStatus::AtRisk => "At Risk",
            ComplianceStatus::InsufficientData => "Insufficient Data",
        }
    }

    /// Regulatory risk implied by a status.
    pub fn risk_level(&self) -> ComplianceRiskLevel {
        match self {
            ComplianceStatus::AtRisk => ComplianceRiskLevel::High,
            ComplianceStatus::Warning => ComplianceRiskLevel::Medium,
            ComplianceStatus::Compliant => ComplianceRiskLevel::Low,
            ComplianceStatus::InsufficientData => ComplianceRiskLevel::Unknown,
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceRiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub compliance_status: ComplianceStatus,
    pub risk_level: ComplianceRiskLevel,
    pub projected_threshold_breach_days: Option<u32>,
    pub regulatory_warning: String,
    pub advisory_note: String,
}

// ---------------------------------------------------------------------------
// Optimization and financial impact
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentPriority {
    #[serde(rename = "Immediate Strategic Investment")]
    ImmediateStrategicInvestment,
    #[serde(rename = "Planned Optimization")]
    PlannedOptimization,
    #[serde(rename = "Performance Monitoring")]
    PerformanceMonitoring,
}

impl From<Tier> for InvestmentPriority {
    fn from(category: Tier) -> Self {
        match category {
            Tier::High => InvestmentPriority::ImmediateStrategicInvestment,
            Tier::Medium => InvestmentPriority::PlannedOptimization,
            Tier::Low => InvestmentPriority::PerformanceMonitoring,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Achievable improvement, `[0, 35]`
    pub optimization_potential_percent: f64,
    pub improvement_category: Tier,
    pub investment_priority: InvestmentPriority,
    /// `[0, 40]`
    pub sustainability_score_boost: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialImpact {
    pub potential_reduction_tons: f64,
    pub carbon_credits_generated: f64,
    pub estimated_credit_value_min: f64,
    pub estimated_credit_value_max: f64,
    pub avoided_compliance_penalty: f64,
    pub total_financial_benefit_min: f64,
    pub total_financial_benefit_max: f64,
    /// `[-100, 500]`
    pub roi_percent: f64,
}

/// Credits earned by cutting emissions below the previous-month baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarbonCredits {
    pub total_emission: f64,
    pub baseline_emission: f64,
    pub reduction: f64,
    pub carbon_credits: f64,
    pub estimated_value_min: f64,
    pub estimated_value_max: f64,
}

// ---------------------------------------------------------------------------
// Recommendations and explainability
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    Operational,
    Efficiency,
    #[serde(rename = "Carbon Capture")]
    CarbonCapture,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub expected_reduction_percent: f64,
    pub confidence_score: f64,
}

/// Never empty; sorted by descending expected reduction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub priority: Tier,
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationSet {
    /// Highest-impact recommendation.
    pub fn top(&self) -> Option<&Recommendation> {
        self.recommendations.first()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Explainability {
    pub risk_explanation: String,
    pub top_drivers: Vec<String>,
    pub projected_impact_summary: String,
    pub strategic_insight: String,
}

// ---------------------------------------------------------------------------
// Carbon capture
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionScale {
    Small,
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureStrategyType {
    #[serde(rename = "CO₂ Mineralization for Construction Blocks")]
    Mineralization,
    #[serde(rename = "Modular Flue Gas Capture Units")]
    ModularFlueGasCapture,
    #[serde(rename = "On-Site CO₂ Liquefaction & Storage")]
    OnSiteLiquefaction,
    #[serde(rename = "Carbon-to-Synthetic Fuel Pilot System")]
    SyntheticFuelPilot,
}

impl CaptureStrategyType {
    pub fn name(&self) -> &'static str {
        match self {
            CaptureStrategyType::Mineralization => "CO₂ Mineralization for Construction Blocks",
            CaptureStrategyType::ModularFlueGasCapture => "Modular Flue Gas Capture Units",
            CaptureStrategyType::OnSiteLiquefaction => "On-Site CO₂ Liquefaction & Storage",
            CaptureStrategyType::SyntheticFuelPilot => "Carbon-to-Synthetic Fuel Pilot System",
        }
    }

    pub fn complexity(&self) -> ImplementationComplexity {
        match self {
            CaptureStrategyType::Mineralization => ImplementationComplexity::Low,
            CaptureStrategyType::ModularFlueGasCapture => ImplementationComplexity::Medium,
            CaptureStrategyType::OnSiteLiquefaction => ImplementationComplexity::High,
            CaptureStrategyType::SyntheticFuelPilot => ImplementationComplexity::VeryHigh,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImplementationComplexity {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureStrategy {
    pub emission_scale: EmissionScale,
    pub capture_strategy_type: CaptureStrategyType,
    pub suitability_score: f64,
    pub estimated_capture_tons: f64,
    pub implementation_complexity: ImplementationComplexity,
    pub expected_roi_boost: Tier,
}

// ---------------------------------------------------------------------------
// ESG report
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EsgRating {
    A,
    B,
    C,
}

impl EsgRating {
    /// `>= 70` A, `>= 40` B, otherwise C.
    pub fn from_points(points: u32) -> Self {
        match points {
            70.. => EsgRating::A,
            40..=69 => EsgRating::B,
            _ => EsgRating::C,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EsgReport {
    pub report_generated_at: DateTime<Utc>,
    pub overall_esg_rating: EsgRating,
    pub executive_summary: String,
    pub environmental_performance: String,
    pub risk_and_compliance: String,
    pub optimization_strategy: String,
    pub financial_impact_summary: String,
    pub forward_outlook: String,
}
