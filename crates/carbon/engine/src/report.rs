//! ESG report assembly.
//!
//! Pure formatting over stage outputs that were already computed; nothing
//! here changes a number.

use carbon_types::numeric::round2;
use carbon_types::{
    ComplianceResult, ComplianceStatus, EsgRating, EsgReport, FacilityRecord, FinancialImpact,
    OptimizationResult, RecommendationSet, RiskMetrics,
};
use chrono::{DateTime, Utc};

/// Everything the report reads.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub record: &'a FacilityRecord,
    pub metrics: &'a RiskMetrics,
    pub compliance: &'a ComplianceResult,
    pub optimization: &'a OptimizationResult,
    pub recommendations: &'a RecommendationSet,
    pub financial: &'a FinancialImpact,
}

/// Points rubric: risk (40/20/0) + compliance (40/20/0) + optimization
/// headroom (20/10/0).
pub fn esg_rating(ctx: &ReportContext<'_>) -> EsgRating {
    let risk_points = match ctx.metrics.carbon_risk_score {
        0..=40 => 40,
        41..=70 => 20,
        _ => 0,
    };
    let compliance_points = match ctx.compliance.compliance_status {
        ComplianceStatus::Compliant => 40,
        ComplianceStatus::Warning => 20,
        ComplianceStatus::AtRisk | ComplianceStatus::InsufficientData => 0,
    };
    let potential = ctx.optimization.optimization_potential_percent;
    let optimization_points = if potential <= 15.0 {
        20
    } else if potential <= 25.0 {
        10
    } else {
        0
    };
    EsgRating::from_points(risk_points + compliance_points + optimization_points)
}

pub fn generate_esg_report(ctx: &ReportContext<'_>, generated_at: DateTime<Utc>) -> EsgReport {
    EsgReport {
        report_generated_at: generated_at,
        overall_esg_rating: esg_rating(ctx),
        executive_summary: executive_summary(ctx),
        environmental_performance: environmental_performance(ctx),
        risk_and_compliance: risk_and_compliance(ctx.compliance),
        optimization_strategy: optimization_strategy(ctx),
        financial_impact_summary: financial_summary(ctx.financial),
        forward_outlook: forward_outlook(ctx),
    }
}

fn executive_summary(ctx: &ReportContext<'_>) -> String {
    format!(
        "The facility recorded total emissions of {} tons with a carbon risk score of {}. \
         Current compliance status is {}. Analysis indicates an optimization potential of {}%, \
         representing significant opportunity for emission reduction and operational efficiency improvement. \
         Strategic interventions are recommended to enhance environmental performance and regulatory alignment.",
        round2(ctx.record.total_emission_tons),
        ctx.metrics.carbon_risk_score,
        ctx.compliance.compliance_status,
        round2(ctx.optimization.optimization_potential_percent),
    )
}

fn environmental_performance(ctx: &ReportContext<'_>) -> String {
    let volatility = round2(ctx.metrics.volatility);
    let downtime = round2(ctx.record.downtime_percent());
    let pattern = if volatility > 50.0 { "unstable" } else { "stable" };
    let operations = if downtime > 40.0 {
        "Significant operational inefficiencies require immediate attention."
    } else {
        "Operational stability is within acceptable parameters."
    };

    format!(
        "Carbon intensity stands at {} tons per production unit. Operational volatility is measured at {}, \
         indicating {} emission patterns. The facility experienced an anomaly rate of {}% and downtime of {}%. \
         {} Enhanced monitoring and process optimization can further improve environmental performance.",
        round2(ctx.metrics.carbon_intensity),
        volatility,
        pattern,
        round2(ctx.record.anomaly_rate_percent()),
        downtime,
        operations,
    )
}

fn risk_and_compliance(compliance: &ComplianceResult) -> String {
    let breach = match compliance.projected_threshold_breach_days {
        Some(days) if days > 0 => format!(
            " Projected threshold breach is estimated in {days} days if current trends continue."
        ),
        _ => String::new(),
    };

    format!(
        "Compliance Status: {}. {}{} Proactive regulatory engagement and emission control strategies are \
         essential to maintain compliance and avoid potential penalties. Continuous monitoring of emission \
         trends is recommended to ensure alignment with environmental regulations.",
        compliance.compliance_status, compliance.regulatory_warning, breach,
    )
}

fn optimization_strategy(ctx: &ReportContext<'_>) -> String {
    let top = ctx
        .recommendations
        .top()
        .map(|r| r.title.as_str())
        .unwrap_or("Maintain current operational practices");

    format!(
        "Primary recommendation: {}. The facility demonstrates an optimization potential of {}%, which can \
         deliver a sustainability score improvement of {} points. Implementation of targeted efficiency measures, \
         process stabilization, and technology upgrades will drive measurable emission reductions. Strategic \
         investment in optimization initiatives is projected to yield significant environmental and operational benefits.",
        top,
        round2(ctx.optimization.optimization_potential_percent),
        round2(ctx.optimization.sustainability_score_boost),
    )
}

fn financial_summary(financial: &FinancialImpact) -> String {
    let roi = round2(financial.roi_percent);
    let verdict = if roi > 0.0 {
        "Financial analysis supports strategic investment in emission reduction programs."
    } else {
        "Further evaluation of cost-benefit scenarios is recommended."
    };

    format!(
        "Projected carbon credit generation: {} credits, valued between ₹{} and ₹{}. Estimated return on \
         investment for optimization initiatives is {}%. {} Carbon credit monetization and compliance penalty \
         avoidance present substantial financial upside for the organization.",
        round2(financial.carbon_credits_generated),
        round2(financial.estimated_credit_value_min),
        round2(financial.estimated_credit_value_max),
        roi,
        verdict,
    )
}

fn forward_outlook(ctx: &ReportContext<'_>) -> String {
    let growth = round2(ctx.metrics.growth_rate);
    let trend = if growth > 0.0 {
        "increasing"
    } else if growth < 0.0 {
        "decreasing"
    } else {
        "stable"
    };
    let outlook = if growth > 10.0 {
        "Immediate intervention is critical to reverse emission trajectory."
    } else if growth > 0.0 {
        "Proactive measures are recommended to stabilize emission trends."
    } else {
        "Current trajectory supports sustainability objectives."
    };

    format!(
        "Forecasted emissions for the next period: {} tons, representing a {} trend with a growth rate of {}%. \
         {} Continued focus on operational excellence, technology adoption, and strategic emission management \
         will position the facility for long-term environmental leadership and regulatory resilience.",
        round2(ctx.record.predicted_next()),
        trend,
        growth,
        outlook,
    )
}
