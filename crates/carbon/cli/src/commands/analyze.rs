//! Analysis and what-if simulation commands

use std::path::PathBuf;

use carbon_engine::{Adjustment, AnalysisPipeline, AnalysisReport, SimulationResult};
use carbon_types::{FacilityRecord, RecommendationKind, RiskLevel};
use clap::Args;
use colored::*;
use tabled::Tabled;

use super::read_json;
use crate::output::{print_field, print_heading, print_single, print_table, OutputFormat};

/// Arguments for `carbonctl analyze`
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Facility record JSON file (`-` for stdin)
    pub file: PathBuf,
}

/// Arguments for `carbonctl simulate`
#[derive(Args)]
pub struct SimulateArgs {
    /// Facility record JSON file (`-` for stdin)
    pub file: PathBuf,

    /// Energy consumption change, percent
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub energy: f64,

    /// Production load change, percent
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub load: f64,

    /// Runtime change, percent
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub runtime: f64,

    /// Adjustment JSON file; replaces the percentage flags
    #[arg(long, conflicts_with_all = ["energy", "load", "runtime"])]
    pub adjustment: Option<PathBuf>,
}

#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "Recommendation")]
    title: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Reduction %")]
    reduction: f64,
    #[tabled(rename = "Confidence")]
    confidence: f64,
}

/// Run the full pipeline and certify the result.
pub fn analyze(
    args: AnalyzeArgs,
    pipeline: &AnalysisPipeline,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let payload = read_json(&args.file)?;
    let report = pipeline.analyze_value(&payload)?;

    match format {
        OutputFormat::Text => print_report(&report),
        _ => print_single(&report, format)?,
    }
    Ok(())
}

/// Re-run the numeric stages on an adjusted copy of the record.
pub fn simulate(
    args: SimulateArgs,
    pipeline: &AnalysisPipeline,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let record = FacilityRecord::from_value(&read_json(&args.file)?)?;
    let adjustment = match &args.adjustment {
        Some(path) => Adjustment::from_value(&read_json(path)?)?,
        None => Adjustment::new(args.energy, args.load, args.runtime),
    };

    let result = pipeline.simulate(&record, &adjustment);

    match format {
        OutputFormat::Text => print_simulation(&adjustment, &result),
        _ => print_single(&result, format)?,
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let metrics = &report.metrics;

    print_heading("Carbon Analysis");
    print_field("Analysis", &report.analysis_id);
    print_field("Facility", &report.certificate.facility_id);
    print_field("Emissions", format!("{} t", report.emissions));
    print_field("Carbon intensity", metrics.carbon_intensity);
    print_field(
        "Risk score",
        colorize_risk(metrics.risk_level, metrics.carbon_risk_score),
    );
    print_field("Stability index", metrics.stability_index);
    print_field("Compliance", report.compliance.compliance_status);
    print_field("ESG rating", format!("{:?}", report.esg_report.overall_esg_rating));
    print_field(
        "Certificate",
        format!(
            "{} (block #{})",
            report.certificate.certificate_id, report.blockchain_verification.block_id
        ),
    );
    print_field("Credits", report.credits.carbon_credits);
    print_field(
        "Capture strategy",
        report.micro_capture.capture_strategy_type.name(),
    );
    println!();

    print_heading("Recommendations");
    println!("{}", report.recommendations.summary.dimmed());
    print_table(
        report
            .recommendations
            .recommendations
            .iter()
            .map(|r| RecommendationRow {
                title: r.title.clone(),
                kind: kind_label(r.kind),
                reduction: r.expected_reduction_percent,
                confidence: r.confidence_score,
            })
            .collect(),
    );
    println!();

    print_heading("Insight");
    println!("{}", report.explainability.risk_explanation);
    println!("{}", report.explainability.strategic_insight);
}

fn print_simulation(adjustment: &Adjustment, result: &SimulationResult) {
    print_heading("What-if Simulation");
    print_field("Factor", format!("{:.4}", adjustment.factor()));
    print_field("Adjusted emission", format!("{} t", result.adjusted_emission));
    print_field("Emission change", format!("{}%", result.emission_change_percent));
    print_field(
        "Risk score",
        colorize_risk(result.metrics.risk_level, result.metrics.carbon_risk_score),
    );
    print_field(
        "Optimization potential",
        format!("{}%", result.optimization.optimization_potential_percent),
    );
    print_field("Credits", result.credits.carbon_credits);
    print_field("ROI", format!("{}%", result.financial_impact.roi_percent));
}

fn kind_label(kind: RecommendationKind) -> &'static str {
    match kind {
        RecommendationKind::Operational => "Operational",
        RecommendationKind::Efficiency => "Efficiency",
        RecommendationKind::CarbonCapture => "Carbon Capture",
    }
}

fn colorize_risk(level: RiskLevel, score: u8) -> ColoredString {
    let text = format!("{score} ({level:?})");
    match level {
        RiskLevel::Low => text.green(),
        RiskLevel::Moderate => text.yellow(),
        RiskLevel::High => text.red(),
    }
}
