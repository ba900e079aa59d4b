//! Narrative explanation of the risk breakdown.

use carbon_types::numeric::round_to;
use carbon_types::{Explainability, RecommendationSet, RiskMetrics, Tier};

const TOP_DRIVER_COUNT: usize = 2;

pub fn generate_explainability(
    metrics: &RiskMetrics,
    recommendations: &RecommendationSet,
) -> Explainability {
    let top_drivers: Vec<String> = metrics
        .breakdown
        .ranked()
        .into_iter()
        .take(TOP_DRIVER_COUNT)
        .map(|(driver, score)| format!("{} ({}%)", driver.label(), score))
        .collect();

    Explainability {
        risk_explanation: risk_explanation(metrics.carbon_risk_score, &top_drivers),
        top_drivers,
        projected_impact_summary: projected_impact(recommendations),
        strategic_insight: strategic_insight(recommendations.priority).to_string(),
    }
}

fn risk_explanation(score: u8, drivers: &[String]) -> String {
    let drivers = if drivers.is_empty() {
        "operational factors".to_string()
    } else {
        drivers.join(" and ")
    };

    match score {
        71.. => format!(
            "Carbon risk is high, primarily driven by {drivers}. These factors significantly increase emission exposure and operational instability."
        ),
        40..=70 => format!(
            "Carbon risk is moderate, influenced mainly by {drivers}. Targeted optimization can reduce sustainability risk."
        ),
        _ => format!(
            "Carbon risk remains stable. Key factors such as {drivers} are within controlled thresholds."
        ),
    }
}

fn projected_impact(recommendations: &RecommendationSet) -> String {
    let Some(top) = recommendations.top() else {
        return "Continue monitoring emission patterns to identify optimization opportunities."
            .to_string();
    };

    if top.expected_reduction_percent == 0.0 {
        format!(
            "{} will help maintain current emission levels and operational stability.",
            top.title
        )
    } else {
        format!(
            "Implementing {} may reduce emissions by up to {}%, improving overall sustainability performance and financial efficiency.",
            top.title,
            round_to(top.expected_reduction_percent, 1)
        )
    }
}

fn strategic_insight(priority: Tier) -> &'static str {
    match priority {
        Tier::High => "Immediate intervention is recommended. Deploy high-impact strategies to rapidly reduce carbon footprint and ensure compliance.",
        Tier::Medium => "Optimization measures can improve sustainability. Implement recommended actions to enhance efficiency and reduce environmental impact.",
        Tier::Low => "Maintain current operational strategy. Continue monitoring performance metrics and sustaining best practices.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_types::{Recommendation, RecommendationKind, RiskBreakdown, RiskLevel};

    fn metrics(score: u8, breakdown: RiskBreakdown) -> RiskMetrics {
        RiskMetrics {
            carbon_intensity: 1.0,
            growth_rate: 0.0,
            peak_percent: 0.0,
            volatility: 0.0,
            carbon_risk_score: score,
            risk_level: RiskLevel::from_score(score),
            stability_index: 100,
            forecast_growth_percent: 0.0,
            breakdown,
        }
    }

    fn set(priority: Tier, title: &str, reduction: f64) -> RecommendationSet {
        RecommendationSet {
            priority,
            summary: String::new(),
            recommendations: vec![Recommendation {
                kind: RecommendationKind::Operational,
                title: title.into(),
                description: String::new(),
                expected_reduction_percent: reduction,
                confidence_score: 80.0,
            }],
        }
    }

    #[test]
    fn top_two_drivers_with_labels() {
        let breakdown = RiskBreakdown {
            intensity_risk: 100,
            growth_risk: 20,
            peak_risk: 57,
            volatility_risk: 0,
            anomaly_fault_risk: 57,
        };
        let result = generate_explainability(
            &metrics(75, breakdown),
            &set(Tier::High, "Energy Efficiency Upgrade", 9.75),
        );

        assert_eq!(
            result.top_drivers,
            vec!["Carbon Intensity (100%)", "Peak Dependency (57%)"]
        );
        assert!(result
            .risk_explanation
            .starts_with("Carbon risk is high, primarily driven by Carbon Intensity (100%) and Peak Dependency (57%)."));
        assert!(result
            .projected_impact_summary
            .contains("Energy Efficiency Upgrade may reduce emissions by up to 9.8%"));
        assert!(result.strategic_insight.starts_with("Immediate intervention"));
    }

    #[test]
    fn maintain_sentence_for_zero_reduction() {
        let result = generate_explainability(
            &metrics(20, RiskBreakdown::default()),
            &set(Tier::Low, "Maintain & Monitor", 0.0),
        );
        assert_eq!(
            result.projected_impact_summary,
            "Maintain & Monitor will help maintain current emission levels and operational stability."
        );
        assert!(result.risk_explanation.starts_with("Carbon risk remains stable."));
        assert_eq!(
            result.top_drivers,
            vec!["Carbon Intensity (0%)", "Emission Growth (0%)"]
        );
    }

    #[test]
    fn moderate_band() {
        let explanation = risk_explanation(40, &["Peak Dependency (80%)".to_string()]);
        assert!(explanation.starts_with("Carbon risk is moderate"));
        assert!(risk_explanation(10, &[]).contains("operational factors"));
    }
}
