//! Machine-readable JSON rendering of a model comparison

use crate::compare::{ComparisonReport, OptimalOperatingPoint};
use crate::search::ProfitCurve;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    cost_per_contact: f64,
    revenue_per_response: f64,
    mass_contact_profit: f64,
    best_model: Option<&'a str>,
    models: Vec<JsonModel<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonModel<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    operating_point: Option<&'a OptimalOperatingPoint>,
    /// Optimal profit minus the mass-contact profit
    #[serde(skip_serializing_if = "Option::is_none")]
    uplift: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<&'a ProfitCurve>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn build(report: &ComparisonReport) -> JsonReport<'_> {
    let models = report
        .outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(eval) => JsonModel {
                name: &outcome.name,
                status: "ok",
                operating_point: Some(&eval.operating_point),
                uplift: Some(eval.operating_point.profit - report.mass_contact_profit),
                curve: Some(&eval.curve),
                error: None,
            },
            Err(e) => JsonModel {
                name: &outcome.name,
                status: "failed",
                operating_point: None,
                uplift: None,
                curve: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    JsonReport {
        cost_per_contact: report.cost_model.cost_per_contact(),
        revenue_per_response: report.cost_model.revenue_per_response(),
        mass_contact_profit: report.mass_contact_profit,
        best_model: report.best().map(|(name, _)| name),
        models,
    }
}

/// Render the comparison as pretty-printed JSON
pub fn to_json(report: &ComparisonReport) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(&build(report))?)
}

/// Write the comparison as JSON to `output_path`
pub fn write_json_report(report: &ComparisonReport, output_path: impl AsRef<Path>) -> crate::Result<()> {
    let path = output_path.as_ref();
    let json = to_json(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write JSON report to {}", path.display()))?;
    tracing::info!(path = %path.display(), "JSON report written");
    Ok(())
}
