//! Profit-maximizing threshold search over a candidate grid

use crate::data::{check_aligned, ActualVector, PredictionVector};
use crate::error::{ThresholdError, ThresholdResult};
use crate::profit::{tally_unchecked, CostModel};
use rayon::prelude::*;
use serde::Serialize;

/// Largest grid `evenly_spaced` will build
pub const MAX_RESOLUTION: usize = 1_000_000;

/// Thresholds to try, strictly increasing and inside (0, 1).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdCandidateSet(Vec<f64>);

impl ThresholdCandidateSet {
    /// Build a candidate set from explicit thresholds
    ///
    /// An empty set is accepted here; searching it is what fails.
    pub fn new(thresholds: Vec<f64>) -> ThresholdResult<Self> {
        if let Some(bad) = thresholds
            .iter()
            .find(|t| !t.is_finite() || **t <= 0.0 || **t >= 1.0)
        {
            return Err(ThresholdError::invalid(format!(
                "candidate threshold {} is outside (0, 1)",
                bad
            )));
        }
        if let Some(pair) = thresholds.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ThresholdError::invalid(format!(
                "candidate thresholds must be strictly increasing, got {} then {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self(thresholds))
    }

    /// `resolution` evenly spaced thresholds: k / (resolution + 1) for k = 1..=resolution
    ///
    /// A resolution of 99 gives 0.01, 0.02, ..., 0.99. Resolutions above
    /// [`MAX_RESOLUTION`] are rejected.
    pub fn evenly_spaced(resolution: usize) -> ThresholdResult<Self> {
        let denom = resolution
            .checked_add(1)
            .filter(|_| resolution <= MAX_RESOLUTION)
            .ok_or_else(|| {
                ThresholdError::invalid(format!(
                    "resolution {} exceeds the maximum of {}",
                    resolution, MAX_RESOLUTION
                ))
            })? as f64;
        Ok(Self((1..=resolution).map(|k| k as f64 / denom).collect()))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Profit and contact counts at one candidate threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitPoint {
    pub threshold: f64,
    pub profit: f64,
    pub contacted: usize,
    pub responders: usize,
}

/// Profit at every candidate threshold, in candidate order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitCurve {
    points: Vec<ProfitPoint>,
}

impl ProfitCurve {
    pub fn points(&self) -> &[ProfitPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Profit recorded for an exact candidate threshold
    pub fn profit_at(&self, threshold: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.threshold == threshold)
            .map(|p| p.profit)
    }

    /// Lowest and highest profit on the curve
    pub fn profit_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?.profit;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (lo.min(p.profit), hi.max(p.profit))
        }))
    }

    /// Index of the first point holding the maximum profit
    fn first_maximum(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, point) in self.points.iter().enumerate() {
            match best {
                Some(b) if point.profit <= self.points[b].profit => {}
                _ => best = Some(idx),
            }
        }
        best
    }
}

/// Best threshold found by [`search`], with the curve it was picked from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdSearchOutcome {
    pub threshold: f64,
    pub profit: f64,
    pub curve: ProfitCurve,
}

/// Find the candidate threshold with the highest campaign profit
///
/// Ties go to the earliest candidate in the set, which is the lowest threshold
/// since candidates are increasing. Per-threshold profits are computed in
/// parallel and then scanned in candidate order.
///
/// # Arguments
/// * `predictions` - Classifier scores for the evaluation set
/// * `actuals` - Observed outcomes aligned with `predictions`
/// * `candidates` - Thresholds to evaluate
/// * `cost_model` - Contact cost and response revenue
///
/// # Returns
/// * The winning threshold, its profit, and the full profit curve
pub fn search(
    predictions: &PredictionVector,
    actuals: &ActualVector,
    candidates: &ThresholdCandidateSet,
    cost_model: &CostModel,
) -> ThresholdResult<ThresholdSearchOutcome> {
    if candidates.is_empty() {
        return Err(ThresholdError::EmptyCandidateSet);
    }
    check_aligned(predictions, actuals)?;

    let points: Vec<ProfitPoint> = candidates
        .as_slice()
        .par_iter()
        .map(|&threshold| {
            let tally = tally_unchecked(predictions, actuals, threshold);
            ProfitPoint {
                threshold,
                profit: cost_model.profit_for(tally.contacted, tally.responders),
                contacted: tally.contacted,
                responders: tally.responders,
            }
        })
        .collect();

    let curve = ProfitCurve { points };
    let best = curve
        .first_maximum()
        .map(|idx| curve.points[idx])
        .ok_or(ThresholdError::EmptyCandidateSet)?;

    tracing::debug!(
        candidates = curve.len(),
        threshold = best.threshold,
        profit = best.profit,
        "threshold search complete"
    );

    Ok(ThresholdSearchOutcome {
        threshold: best.threshold,
        profit: best.profit,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PredictionVector, ActualVector, CostModel) {
        (
            PredictionVector::new(vec![0.8, 0.1, 0.6, 0.3, 0.9]).unwrap(),
            ActualVector::from_raw(&[1, 0, 0, 0, 1]).unwrap(),
            CostModel::new(3.0, 11.0).unwrap(),
        )
    }

    #[test]
    fn test_candidate_validation() {
        assert!(ThresholdCandidateSet::new(vec![0.2, 0.5, 0.85]).is_ok());
        assert!(ThresholdCandidateSet::new(vec![]).is_ok());
        assert!(ThresholdCandidateSet::new(vec![0.0, 0.5]).is_err());
        assert!(ThresholdCandidateSet::new(vec![0.5, 1.0]).is_err());
        assert!(ThresholdCandidateSet::new(vec![0.5, 0.5]).is_err());
        assert!(ThresholdCandidateSet::new(vec![0.6, 0.4]).is_err());
    }

    #[test]
    fn test_evenly_spaced() {
        let grid = ThresholdCandidateSet::evenly_spaced(99).unwrap();
        assert_eq!(grid.len(), 99);
        assert!((grid.as_slice()[0] - 0.01).abs() < 1e-12);
        assert!((grid.as_slice()[98] - 0.99).abs() < 1e-12);
        assert!(grid.as_slice().windows(2).all(|w| w[0] < w[1]));
        assert!(ThresholdCandidateSet::evenly_spaced(0).unwrap().is_empty());
    }

    #[test]
    fn test_evenly_spaced_rejects_oversized_grid() {
        assert_eq!(
            ThresholdCandidateSet::evenly_spaced(MAX_RESOLUTION).unwrap().len(),
            MAX_RESOLUTION
        );
        assert!(matches!(
            ThresholdCandidateSet::evenly_spaced(MAX_RESOLUTION + 1),
            Err(ThresholdError::InvalidInput(_))
        ));
        assert!(matches!(
            ThresholdCandidateSet::evenly_spaced(usize::MAX),
            Err(ThresholdError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_search_picks_most_profitable() {
        let (p, a, cost) = setup();
        let candidates = ThresholdCandidateSet::new(vec![0.2, 0.5, 0.85]).unwrap();
        let outcome = search(&p, &a, &candidates, &cost).unwrap();

        let profits: Vec<f64> = outcome.curve.points().iter().map(|pt| pt.profit).collect();
        assert_eq!(profits, vec![10.0, 13.0, 8.0]);
        assert_eq!(outcome.threshold, 0.5);
        assert_eq!(outcome.profit, 13.0);
        assert_eq!(outcome.curve.profit_at(0.85), Some(8.0));
        assert_eq!(outcome.curve.profit_range(), Some((8.0, 13.0)));
    }

    #[test]
    fn test_ties_resolve_to_first_candidate() {
        // Nobody scores above 0.25, so every candidate yields zero profit
        let p = PredictionVector::new(vec![0.1, 0.2, 0.25]).unwrap();
        let a = ActualVector::from_raw(&[1, 0, 1]).unwrap();
        let cost = CostModel::new(3.0, 11.0).unwrap();
        let candidates = ThresholdCandidateSet::new(vec![0.3, 0.5, 0.7]).unwrap();

        let outcome = search(&p, &a, &candidates, &cost).unwrap();
        assert_eq!(outcome.threshold, 0.3);
        assert_eq!(outcome.profit, 0.0);
    }

    #[test]
    fn test_empty_candidates() {
        let (p, a, cost) = setup();
        let empty = ThresholdCandidateSet::new(vec![]).unwrap();
        assert_eq!(
            search(&p, &a, &empty, &cost).unwrap_err(),
            ThresholdError::EmptyCandidateSet
        );
    }

    #[test]
    fn test_misaligned_inputs() {
        let (p, _, cost) = setup();
        let a = ActualVector::from_raw(&[1, 0]).unwrap();
        let candidates = ThresholdCandidateSet::evenly_spaced(9).unwrap();
        assert!(matches!(
            search(&p, &a, &candidates, &cost),
            Err(ThresholdError::InvalidInput(_))
        ));
    }
}
