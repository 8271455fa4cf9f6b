//! Campaign profit of contacting every customer scored at or above a threshold

use crate::data::{check_aligned, ActualVector, PredictionVector};
use crate::error::{ThresholdError, ThresholdResult};
use serde::{Deserialize, Serialize};

/// Unit economics of a campaign.
///
/// Every contact costs `cost_per_contact`; only contacted customers who
/// actually respond earn `revenue_per_response`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostModel {
    cost_per_contact: f64,
    revenue_per_response: f64,
}

impl CostModel {
    pub fn new(cost_per_contact: f64, revenue_per_response: f64) -> ThresholdResult<Self> {
        for (name, value) in [
            ("cost_per_contact", cost_per_contact),
            ("revenue_per_response", revenue_per_response),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ThresholdError::invalid(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            cost_per_contact,
            revenue_per_response,
        })
    }

    pub fn cost_per_contact(&self) -> f64 {
        self.cost_per_contact
    }

    pub fn revenue_per_response(&self) -> f64 {
        self.revenue_per_response
    }

    /// Profit from `responders` responses out of `contacted` contacts
    pub fn profit_for(&self, contacted: usize, responders: usize) -> f64 {
        responders as f64 * self.revenue_per_response - contacted as f64 * self.cost_per_contact
    }
}

/// Who gets contacted at a threshold, and how many of them respond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactTally {
    pub contacted: usize,
    pub responders: usize,
}

/// Whether a score leads to a contact. The boundary is inclusive.
#[inline]
pub(crate) fn is_contacted(score: f64, threshold: f64) -> bool {
    score >= threshold
}

pub(crate) fn check_threshold(threshold: f64) -> ThresholdResult<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(ThresholdError::invalid(format!(
            "threshold {} is outside [0, 1]",
            threshold
        )));
    }
    Ok(())
}

/// Count contacts and responders. Inputs must already be validated.
pub(crate) fn tally_unchecked(
    predictions: &PredictionVector,
    actuals: &ActualVector,
    threshold: f64,
) -> ContactTally {
    predictions
        .as_slice()
        .iter()
        .zip(actuals.as_slice())
        .filter(|(score, _)| is_contacted(**score, threshold))
        .fold(
            ContactTally {
                contacted: 0,
                responders: 0,
            },
            |mut tally, (_, label)| {
                tally.contacted += 1;
                if label.is_positive() {
                    tally.responders += 1;
                }
                tally
            },
        )
}

/// Count contacts and responders at `threshold`
pub fn contact_tally(
    predictions: &PredictionVector,
    actuals: &ActualVector,
    threshold: f64,
) -> ThresholdResult<ContactTally> {
    check_aligned(predictions, actuals)?;
    check_threshold(threshold)?;
    Ok(tally_unchecked(predictions, actuals, threshold))
}

/// Profit of a campaign that contacts every customer scored at or above `threshold`
///
/// # Arguments
/// * `predictions` - Classifier scores for the evaluation set
/// * `actuals` - Observed outcomes, same order and length as `predictions`
/// * `threshold` - Minimum score for a contact, in [0, 1]
/// * `cost_model` - Contact cost and response revenue
///
/// # Returns
/// * responders x revenue - contacted x cost
pub fn profit(
    predictions: &PredictionVector,
    actuals: &ActualVector,
    threshold: f64,
    cost_model: &CostModel,
) -> ThresholdResult<f64> {
    let tally = contact_tally(predictions, actuals, threshold)?;
    Ok(cost_model.profit_for(tally.contacted, tally.responders))
}

/// Profit of contacting the whole evaluation set, the no-model baseline
pub fn mass_contact_profit(actuals: &ActualVector, cost_model: &CostModel) -> f64 {
    cost_model.profit_for(actuals.len(), actuals.positives())
}
