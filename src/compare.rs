//! Side-by-side profit optimization of several classifiers on the same customers

use crate::data::{ActualVector, PredictionVector};
use crate::error::{ThresholdError, ThresholdResult};
use crate::evaluate::{evaluate, ConfusionMatrix};
use crate::profit::{mass_contact_profit, CostModel};
use crate::search::{search, ProfitCurve, ThresholdCandidateSet};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// The chosen decision policy for one model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalOperatingPoint {
    pub threshold: f64,
    pub profit: f64,
    pub confusion: ConfusionMatrix,
}

/// Everything learned about one model: its optimum and the curve behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEvaluation {
    pub operating_point: OptimalOperatingPoint,
    pub curve: ProfitCurve,
}

/// Outcome for one named model. A failure stays attached to its model name.
#[derive(Debug, Clone)]
pub struct ModelOutcome {
    pub name: String,
    pub result: ThresholdResult<ModelEvaluation>,
}

/// Per-model results in the order the models were supplied
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub outcomes: Vec<ModelOutcome>,
    pub cost_model: CostModel,
    /// Profit of contacting every customer, independent of any model
    pub mass_contact_profit: f64,
}

impl ComparisonReport {
    pub fn get(&self, name: &str) -> Option<&ModelOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Successful evaluations, in input order
    pub fn successes(&self) -> impl Iterator<Item = (&str, &ModelEvaluation)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|e| (o.name.as_str(), e)))
    }

    /// Failed models with their errors, in input order
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ThresholdError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
    }

    /// Model with the highest optimal profit; the earliest one wins ties
    pub fn best(&self) -> Option<(&str, &ModelEvaluation)> {
        self.successes().fold(None, |best, candidate| match best {
            Some((_, b)) if candidate.1.operating_point.profit <= b.operating_point.profit => best,
            _ => Some(candidate),
        })
    }
}

/// Search the best threshold for one model and evaluate it there
pub fn evaluate_model(
    predictions: &PredictionVector,
    actuals: &ActualVector,
    candidates: &ThresholdCandidateSet,
    cost_model: &CostModel,
) -> ThresholdResult<ModelEvaluation> {
    let outcome = search(predictions, actuals, candidates, cost_model)?;
    let confusion = evaluate(predictions, actuals, outcome.threshold)?;

    Ok(ModelEvaluation {
        operating_point: OptimalOperatingPoint {
            threshold: outcome.threshold,
            profit: outcome.profit,
            confusion,
        },
        curve: outcome.curve,
    })
}

/// Optimize every model against the same outcomes, candidates and costs
///
/// # Arguments
/// * `models` - Named score vectors; names must be unique
/// * `actuals` - Observed outcomes shared by all models
/// * `candidates` - Threshold grid shared by all models
/// * `cost_model` - Campaign unit economics
///
/// # Returns
/// * `ComparisonReport` with one outcome per model, in input order. A model
///   whose evaluation fails is reported with its error rather than dropped.
pub fn compare(
    models: &[(String, PredictionVector)],
    actuals: &ActualVector,
    candidates: &ThresholdCandidateSet,
    cost_model: &CostModel,
) -> ThresholdResult<ComparisonReport> {
    let mut seen = HashSet::with_capacity(models.len());
    for (name, _) in models {
        if !seen.insert(name.as_str()) {
            return Err(ThresholdError::invalid(format!(
                "model name '{}' appears more than once",
                name
            )));
        }
    }

    let outcomes: Vec<ModelOutcome> = models
        .par_iter()
        .map(|(name, predictions)| {
            let result = evaluate_model(predictions, actuals, candidates, cost_model);
            match &result {
                Ok(eval) => tracing::info!(
                    model = %name,
                    threshold = eval.operating_point.threshold,
                    profit = eval.operating_point.profit,
                    "model optimized"
                ),
                Err(e) => tracing::warn!(model = %name, error = %e, "model evaluation failed"),
            }
            ModelOutcome {
                name: name.clone(),
                result,
            }
        })
        .collect();

    Ok(ComparisonReport {
        outcomes,
        cost_model: *cost_model,
        mass_contact_profit: mass_contact_profit(actuals, cost_model),
    })
}
