//! ProfitForge: profit-optimal decision thresholds for campaign response models
//!
//! Given each classifier's predicted response probabilities and the observed
//! outcomes, this library sweeps a threshold grid, picks the threshold that
//! maximizes campaign profit under a contact cost and a response revenue, and
//! reports the confusion matrix at that operating point.

pub mod cli;
pub mod compare;
pub mod data;
pub mod error;
pub mod evaluate;
pub mod profit;
pub mod report;
pub mod search;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use compare::{
    compare, evaluate_model, ComparisonReport, ModelEvaluation, ModelOutcome,
    OptimalOperatingPoint,
};
pub use data::{load_scores, ActualVector, BinaryLabel, EvaluationSet, PredictionVector, ScoreColumns};
pub use error::{ThresholdError, ThresholdResult};
pub use evaluate::{evaluate, ConfusionMatrix};
pub use profit::{contact_tally, mass_contact_profit, profit, ContactTally, CostModel};
pub use search::{
    search, ProfitCurve, ProfitPoint, ThresholdCandidateSet, ThresholdSearchOutcome, MAX_RESOLUTION,
};
pub use viz::create_profit_curve_chart;

/// Result type for loading, reporting and CLI glue
pub type Result<T> = anyhow::Result<T>;
