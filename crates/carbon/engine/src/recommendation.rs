//! Rule-triggered remediation recommendations.

use carbon_types::numeric::{clamp, round2};
use carbon_types::{
    FacilityRecord, Recommendation, RecommendationKind, RecommendationSet, RiskMetrics, Tier,
};

/// Risk score above which carbon capture is recommended.
const CAPTURE_RISK_THRESHOLD: f64 = 75.0;
/// Monthly emission above which the capture capacity is quoted.
const CAPTURE_QUOTE_MIN_TONS: f64 = 50.0;

const LOAD_SHIFTING: &str = "High peak emission dependency detected. Implement load shifting to off-peak hours to distribute energy consumption more evenly throughout the day.";
const PROCESS_STABILIZATION: &str = "High emission volatility indicates unstable operations. Standardize production processes and implement real-time monitoring to reduce fluctuations.";
const MACHINERY_INSPECTION: &str = "Elevated anomaly rate suggests equipment inefficiencies. Schedule comprehensive machinery inspection and preventive maintenance to optimize performance.";
const EFFICIENCY_OPTIMIZATION: &str = "Significant downtime detected. Analyze root causes, optimize workflow scheduling, and implement predictive maintenance to minimize operational interruptions.";
const ENERGY_UPGRADE: &str = "Carbon intensity exceeds industry benchmark. Invest in energy-efficient equipment, optimize combustion processes, and implement waste heat recovery systems.";
const CARBON_CAPTURE: &str = "Deploy a Modular CO₂ Mineralization Unit to capture flue gas emissions and convert them into eco-construction blocks. This carbon utilization strategy transforms waste CO₂ into valuable building materials.";
const MAINTAIN_AND_MONITOR: &str = "Current operations are within acceptable parameters. Continue monitoring emission patterns and maintain existing efficiency measures.";

/// Priority tier from the composite risk score.
pub fn priority_for(score: u8) -> Tier {
    match score {
        71.. => Tier::High,
        40..=70 => Tier::Medium,
        _ => Tier::Low,
    }
}

/// Confidence shared by every recommendation of one run.
fn confidence(volatility: f64) -> f64 {
    clamp(100.0 - volatility, 50.0, 95.0)
}

/// Build the recommendation set.
///
/// Rules fire independently. When none fires a single zero-impact
/// "Maintain & Monitor" entry is returned, so the list is never empty.
pub fn generate_recommendations(record: &FacilityRecord, metrics: &RiskMetrics) -> RecommendationSet {
    let confidence = confidence(metrics.volatility);
    let rec = |kind, title: &str, description: String, reduction: f64| Recommendation {
        kind,
        title: title.to_string(),
        description,
        expected_reduction_percent: reduction,
        confidence_score: confidence,
    };

    let mut recommendations = Vec::new();

    let peak = metrics.peak_percent;
    if peak > 60.0 {
        recommendations.push(rec(
            RecommendationKind::Operational,
            "Load Shifting Strategy",
            LOAD_SHIFTING.to_string(),
            clamp(5.0 + (peak - 60.0) * 0.1, 5.0, 10.0),
        ));
    }

    let volatility = metrics.volatility;
    if volatility > 50.0 {
        recommendations.push(rec(
            RecommendationKind::Operational,
            "Process Stabilization",
            PROCESS_STABILIZATION.to_string(),
            clamp(4.0 + (volatility - 50.0) * 0.08, 4.0, 8.0),
        ));
    }

    let anomaly_rate = record.anomaly_rate_percent();
    if anomaly_rate > 5.0 {
        recommendations.push(rec(
            RecommendationKind::Operational,
            "Machinery Inspection & Maintenance",
            MACHINERY_INSPECTION.to_string(),
            clamp(6.0 + (anomaly_rate - 5.0) * 0.15, 6.0, 12.0),
        ));
    }

    let downtime = record.downtime_percent();
    if downtime > 40.0 {
        recommendations.push(rec(
            RecommendationKind::Operational,
            "Operational Efficiency Optimization",
            EFFICIENCY_OPTIMIZATION.to_string(),
            clamp(3.0 + (downtime - 40.0) * 0.1, 3.0, 7.0),
        ));
    }

    let intensity = metrics.carbon_intensity;
    let benchmark = record.industry_benchmark_intensity;
    if benchmark > 0.0 && intensity > benchmark {
        recommendations.push(rec(
            RecommendationKind::Efficiency,
            "Energy Efficiency Upgrade",
            ENERGY_UPGRADE.to_string(),
            clamp(5.0 + (intensity - benchmark) * 0.5, 5.0, 15.0),
        ));
    }

    let score = f64::from(metrics.carbon_risk_score);
    let has_capture = score > CAPTURE_RISK_THRESHOLD;
    if has_capture {
        recommendations.push(rec(
            RecommendationKind::CarbonCapture,
            "Modular Carbon Capture & Utilization",
            capture_description(record.total_emission_tons),
            clamp(10.0 + (score - CAPTURE_RISK_THRESHOLD) * 0.3, 10.0, 20.0),
        ));
    }

    if recommendations.is_empty() {
        recommendations.push(rec(
            RecommendationKind::Operational,
            "Maintain & Monitor",
            MAINTAIN_AND_MONITOR.to_string(),
            0.0,
        ));
    }

    // sort_by is stable: equal reductions keep rule order
    recommendations.sort_by(|a, b| {
        b.expected_reduction_percent
            .total_cmp(&a.expected_reduction_percent)
    });

    let priority = priority_for(metrics.carbon_risk_score);
    let summary = summary(priority, recommendations.len(), has_capture);

    RecommendationSet {
        priority,
        summary,
        recommendations,
    }
}

fn capture_description(total_emission: f64) -> String {
    if total_emission > CAPTURE_QUOTE_MIN_TONS {
        let capacity = round2(total_emission * 0.15);
        format!(
            "{CARBON_CAPTURE} Potential CO₂ capture capacity: {capacity} tons/month. This presents a significant opportunity for local construction block production and circular economy integration."
        )
    } else {
        CARBON_CAPTURE.to_string()
    }
}

fn summary(priority: Tier, count: usize, has_capture: bool) -> String {
    let plural = if count > 1 { "s" } else { "" };
    let capture = if has_capture {
        " including carbon capture strategy"
    } else {
        ""
    };
    format!("{priority} priority risk level identified. Generated {count} recommendation{plural}{capture}.")
}
