//! Confusion matrix of a contact decision at a fixed threshold

use crate::data::{check_aligned, ActualVector, BinaryLabel, PredictionVector};
use crate::error::{ThresholdError, ThresholdResult};
use crate::profit::{check_threshold, is_contacted, CostModel};
use serde::Serialize;

/// Cross-tabulation of contact decisions against observed responses.
///
/// "Positive" means contacted (score at or above the threshold).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Customers the campaign would contact
    pub fn contacted(&self) -> usize {
        self.true_positives + self.false_positives
    }

    /// Share of contacts that respond; 0 when nobody is contacted
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.contacted())
    }

    /// Share of responders that get contacted; 0 when nobody responds
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// Campaign profit implied by these counts
    pub fn profit(&self, cost_model: &CostModel) -> f64 {
        cost_model.profit_for(self.contacted(), self.true_positives)
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Binarize scores at `threshold` and count outcomes against the actual labels
///
/// # Arguments
/// * `predictions` - Classifier scores for the evaluation set
/// * `actuals` - Observed outcomes aligned with `predictions`
/// * `threshold` - Minimum score for a positive decision, in [0, 1]
///
/// # Returns
/// * `ConfusionMatrix` whose counts sum to the evaluation set size
pub fn evaluate(
    predictions: &PredictionVector,
    actuals: &ActualVector,
    threshold: f64,
) -> ThresholdResult<ConfusionMatrix> {
    check_aligned(predictions, actuals)?;
    check_threshold(threshold)?;

    let mut matrix = ConfusionMatrix::default();
    for (&score, &label) in predictions.as_slice().iter().zip(actuals.as_slice()) {
        match (is_contacted(score, threshold), label) {
            (true, BinaryLabel::Positive) => matrix.true_positives += 1,
            (true, BinaryLabel::Negative) => matrix.false_positives += 1,
            (false, BinaryLabel::Negative) => matrix.true_negatives += 1,
            (false, BinaryLabel::Positive) => matrix.false_negatives += 1,
        }
    }

    verify_total(&matrix, actuals.len())?;
    Ok(matrix)
}

fn verify_total(matrix: &ConfusionMatrix, expected: usize) -> ThresholdResult<()> {
    if matrix.total() != expected {
        return Err(ThresholdError::InternalConsistency(format!(
            "confusion matrix counts sum to {} but {} instances were evaluated",
            matrix.total(),
            expected
        )));
    }
    Ok(())
}
