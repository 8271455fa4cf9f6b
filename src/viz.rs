//! Profit curve charts using Plotters, and the console comparison summary

use crate::compare::ComparisonReport;
use plotters::prelude::*;

/// Color palette for model series, assigned in input order
const SERIES_COLORS: [RGBColor; 5] = [RED, BLUE, GREEN, MAGENTA, CYAN];

/// Vertical axis bounds covering every curve and the mass-contact baseline
///
/// Returns `None` when no model was evaluated successfully.
pub fn profit_axis_range(report: &ComparisonReport) -> Option<(f64, f64)> {
    let (lo, hi) = report
        .successes()
        .filter_map(|(_, eval)| eval.curve.profit_range())
        .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)))?;

    let lo = lo.min(report.mass_contact_profit);
    let hi = hi.max(report.mass_contact_profit);
    let pad = if hi > lo { (hi - lo) * 0.1 } else { 1.0 };
    Some((lo - pad, hi + pad))
}

/// Draw every model's profit curve into one PNG chart
///
/// # Arguments
/// * `report` - Comparison results; failed models are skipped
/// * `output_path` - Path to save the PNG plot
/// * `plot_title` - Title for the plot
///
/// # Returns
/// * Result indicating success or failure
pub fn create_profit_curve_chart(
    report: &ComparisonReport,
    output_path: &str,
    plot_title: Option<&str>,
) -> crate::Result<()> {
    let title = plot_title.unwrap_or("Campaign Profit vs Decision Threshold");
    let Some((y_min, y_max)) = profit_axis_range(report) else {
        anyhow::bail!("No successfully evaluated model to plot");
    };

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..1f64, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Threshold")
        .y_desc("Profit")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (idx, (name, eval)) in report.successes().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];

        chart
            .draw_series(LineSeries::new(
                eval.curve.points().iter().map(|p| (p.threshold, p.profit)),
                color.stroke_width(2),
            ))?
            .label(name.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        // Mark the chosen operating point
        let op = &eval.operating_point;
        chart.draw_series(std::iter::once(Circle::new(
            (op.threshold, op.profit),
            5,
            color.filled(),
        )))?;
    }

    let baseline = report.mass_contact_profit;
    chart
        .draw_series(LineSeries::new(
            vec![(0.0, baseline), (1.0, baseline)],
            BLACK.mix(0.5).stroke_width(1),
        ))?
        .label("contact everyone")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.5)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    tracing::info!(path = output_path, "profit curve chart written");

    Ok(())
}

/// Per-model table rows, with the name column as wide as the longest model name
pub fn comparison_table(report: &ComparisonReport) -> Vec<String> {
    let width = report
        .outcomes
        .iter()
        .map(|o| o.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Model".len());

    let mut lines = vec![
        format!(
            "  {:width$} | Threshold |     Profit |     Uplift |  TP |  FP |  TN |  FN | Precision | Recall",
            "Model"
        ),
        format!(
            "  {}-|-----------|------------|------------|-----|-----|-----|-----|-----------|-------",
            "-".repeat(width)
        ),
    ];

    for outcome in &report.outcomes {
        let line = match &outcome.result {
            Ok(eval) => {
                let op = &eval.operating_point;
                let cm = &op.confusion;
                format!(
                    "  {:width$} | {:9.3} | {:10.2} | {:10.2} | {:3} | {:3} | {:3} | {:3} | {:9.3} | {:6.3}",
                    outcome.name,
                    op.threshold,
                    op.profit,
                    op.profit - report.mass_contact_profit,
                    cm.true_positives,
                    cm.false_positives,
                    cm.true_negatives,
                    cm.false_negatives,
                    cm.precision(),
                    cm.recall()
                )
            }
            Err(e) => format!("  {:width$} | failed: {}", outcome.name, e),
        };
        lines.push(line);
    }

    lines
}

/// Print the per-model operating points to the console
pub fn print_comparison_report(report: &ComparisonReport) {
    println!("\n=== Profit-Optimal Thresholds ===");
    println!(
        "Cost per contact: {:.2}, revenue per response: {:.2}",
        report.cost_model.cost_per_contact(),
        report.cost_model.revenue_per_response()
    );
    println!("Contact-everyone profit: {:.2}", report.mass_contact_profit);

    println!();
    for line in comparison_table(report) {
        println!("{}", line);
    }

    if let Some((name, eval)) = report.best() {
        println!(
            "\nBest model: {} (threshold {:.3}, profit {:.2})",
            name, eval.operating_point.threshold, eval.operating_point.profit
        );
    }
}
