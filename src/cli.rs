//! Command-line interface definitions and argument parsing

use crate::data::ScoreColumns;
use crate::profit::CostModel;
use crate::search::ThresholdCandidateSet;
use clap::Parser;

/// Pick profit-maximizing contact thresholds for campaign response classifiers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the scored CSV file (one outcome column, one score column per model)
    #[arg(short, long, default_value = "scores.csv")]
    pub input: String,

    /// Name of the outcome column
    #[arg(short, long, default_value = "actual")]
    pub actual: String,

    /// Score columns to compare, comma-separated; defaults to every other column
    #[arg(short, long, value_delimiter = ',')]
    pub models: Vec<String>,

    /// Text outcome counted as a response
    #[arg(long, default_value = "yes")]
    pub positive_label: String,

    /// Text outcome counted as a non-response
    #[arg(long, default_value = "no")]
    pub negative_label: String,

    /// Cost of contacting one customer
    #[arg(long, env = "PROFITFORGE_COST_PER_CONTACT", default_value = "3")]
    pub cost_per_contact: f64,

    /// Revenue earned from one responding customer
    #[arg(long, env = "PROFITFORGE_REVENUE_PER_RESPONSE", default_value = "11")]
    pub revenue_per_response: f64,

    /// Number of evenly spaced thresholds to search (99 gives 0.01..0.99)
    #[arg(short, long, default_value = "99")]
    pub resolution: usize,

    /// Explicit thresholds to search instead of the even grid
    /// Example: --thresholds "0.2,0.5,0.85"
    #[arg(short, long, value_delimiter = ',')]
    pub thresholds: Option<Vec<f64>>,

    /// Output path for the profit curve plot
    #[arg(short, long, default_value = "profit_curves.png")]
    pub output: String,

    /// Also write the comparison as JSON to this path
    #[arg(long)]
    pub json: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validated campaign economics from the cost flags
    pub fn cost_model(&self) -> crate::Result<CostModel> {
        Ok(CostModel::new(self.cost_per_contact, self.revenue_per_response)?)
    }

    /// Threshold grid to search: the explicit list if given, otherwise the even grid
    pub fn candidates(&self) -> crate::Result<ThresholdCandidateSet> {
        match &self.thresholds {
            Some(values) => Ok(ThresholdCandidateSet::new(values.clone())?),
            None => {
                if self.resolution == 0 {
                    anyhow::bail!("Resolution must be at least 1");
                }
                Ok(ThresholdCandidateSet::evenly_spaced(self.resolution)?)
            }
        }
    }

    /// Column layout of the input file
    pub fn score_columns(&self) -> ScoreColumns {
        ScoreColumns {
            actual: self.actual.clone(),
            models: self.models.clone(),
            positive_label: self.positive_label.clone(),
            negative_label: self.negative_label.clone(),
        }
    }
}
