//! ProfitForge: pick profit-optimal contact thresholds for scored customers
//!
//! This is the main entrypoint that orchestrates score loading, threshold
//! search, reporting and plotting.

use anyhow::Result;
use clap::Parser;
use profitforge::{compare, load_scores, report, viz, Args};
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    let default_filter = if args.verbose {
        "profitforge=debug"
    } else {
        "profitforge=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    run_pipeline(&args)
}

/// Load scores, optimize every model, then report and plot
fn run_pipeline(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Validate configuration before touching the data
    let cost_model = args.cost_model()?;
    let candidates = args.candidates()?;
    tracing::debug!(
        cost_per_contact = cost_model.cost_per_contact(),
        revenue_per_response = cost_model.revenue_per_response(),
        candidates = candidates.len(),
        "configuration resolved"
    );

    // Step 2: Load the scored evaluation set
    let data_start = Instant::now();
    let evaluation = load_scores(&args.input, &args.score_columns())?;
    println!(
        "✓ Scores loaded: {} customers, {} models",
        evaluation.actuals.len(),
        evaluation.models.len()
    );
    tracing::debug!(elapsed_ms = data_start.elapsed().as_millis() as u64, "scores loaded");

    // Step 3: Search thresholds and evaluate each model
    let search_start = Instant::now();
    let comparison = compare(
        &evaluation.models,
        &evaluation.actuals,
        &candidates,
        &cost_model,
    )?;
    tracing::debug!(
        elapsed_ms = search_start.elapsed().as_millis() as u64,
        "threshold search finished"
    );

    viz::print_comparison_report(&comparison);

    // Step 4: Chart and optional JSON
    if comparison.successes().next().is_some() {
        viz::create_profit_curve_chart(&comparison, &args.output, None)?;
        println!("\nProfit curves saved to: {}", args.output);
    } else {
        tracing::warn!("no model evaluated successfully, skipping chart");
    }

    if let Some(json_path) = &args.json {
        report::write_json_report(&comparison, json_path)?;
        println!("JSON report saved to: {}", json_path);
    }

    let failed = comparison.failures().count();
    println!(
        "\nTotal processing time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    if failed > 0 {
        anyhow::bail!("{} of {} models failed evaluation", failed, comparison.outcomes.len());
    }

    Ok(())
}
