//! Integration tests for ProfitForge

use profitforge::{
    compare, evaluate, load_scores, profit, report, search, ActualVector, CostModel,
    PredictionVector, ScoreColumns, ThresholdCandidateSet, ThresholdError,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Create a scored CSV file with two models
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "actual,logistic,forest").unwrap();

    writeln!(file, "1,0.8,0.70").unwrap();
    writeln!(file, "0,0.1,0.15").unwrap();
    writeln!(file, "0,0.6,0.10").unwrap();
    writeln!(file, "0,0.3,0.10").unwrap();
    writeln!(file, "1,0.9,0.95").unwrap();

    file
}

fn preds(values: &[f64]) -> PredictionVector {
    PredictionVector::new(values.to_vec()).unwrap()
}

fn actuals(values: &[i64]) -> ActualVector {
    ActualVector::from_raw(values).unwrap()
}

#[test]
fn test_profit_formula_exactness() {
    let cost = CostModel::new(3.0, 11.0).unwrap();
    let p = profit(
        &preds(&[0.9, 0.2, 0.7, 0.4]),
        &actuals(&[1, 0, 1, 0]),
        0.5,
        &cost,
    )
    .unwrap();
    assert_eq!(p, 16.0);
}

#[test]
fn test_threshold_zero_contacts_everyone() {
    let cost = CostModel::new(3.0, 11.0).unwrap();
    let a = actuals(&[1, 0, 0, 0, 1]);
    let p = profit(&preds(&[0.8, 0.1, 0.6, 0.3, 0.9]), &a, 0.0, &cost).unwrap();
    assert_eq!(p, 2.0 * 11.0 - 5.0 * 3.0);
}

#[test]
fn test_no_contacts_yield_zero_profit() {
    let cost = CostModel::new(3.0, 11.0).unwrap();
    let p = profit(
        &preds(&[0.8, 0.1, 0.6, 0.3, 0.9]),
        &actuals(&[1, 0, 0, 0, 1]),
        1.0,
        &cost,
    )
    .unwrap();
    assert_eq!(p, 0.0);
}

#[test]
fn test_tie_break_picks_first_candidate() {
    let cost = CostModel::new(3.0, 11.0).unwrap();
    let candidates = ThresholdCandidateSet::new(vec![0.3, 0.5, 0.7]).unwrap();
    let outcome = search(
        &preds(&[0.1, 0.2, 0.8]),
        &actuals(&[0, 0, 1]),
        &candidates,
        &cost,
    )
    .unwrap();

    // Every candidate contacts only the 0.8 customer
    assert!(outcome.curve.points().iter().all(|p| p.profit == 8.0));
    assert_eq!(outcome.threshold, 0.3);
}

#[test]
fn test_empty_candidates_fail() {
    let cost = CostModel::new(3.0, 11.0).unwrap();
    let empty = ThresholdCandidateSet::new(Vec::new()).unwrap();
    let err = search(&preds(&[0.4]), &actuals(&[1]), &empty, &cost).unwrap_err();
    assert_eq!(err, ThresholdError::EmptyCandidateSet);
}

#[test]
fn test_length_mismatch_fails() {
    let cost = CostModel::new(1.0, 1.0).unwrap();
    let err = profit(&preds(&[0.1, 0.2]), &actuals(&[1]), 0.5, &cost).unwrap_err();
    assert!(matches!(err, ThresholdError::InvalidInput(_)));
}

#[test]
fn test_end_to_end_scenario() {
    let p = preds(&[0.8, 0.1, 0.6, 0.3, 0.9]);
    let a = actuals(&[1, 0, 0, 0, 1]);
    let candidates = ThresholdCandidateSet::new(vec![0.2, 0.5, 0.85]).unwrap();
    let cost = CostModel::new(3.0, 11.0).unwrap();

    let outcome = search(&p, &a, &candidates, &cost).unwrap();
    let curve: Vec<(f64, f64, usize, usize)> = outcome
        .curve
        .points()
        .iter()
        .map(|pt| (pt.threshold, pt.profit, pt.contacted, pt.responders))
        .collect();
    assert_eq!(
        curve,
        vec![(0.2, 10.0, 4, 2), (0.5, 13.0, 3, 2), (0.85, 8.0, 1, 1)]
    );
    assert_eq!(outcome.threshold, 0.5);
    assert_eq!(outcome.profit, 13.0);

    let cm = evaluate(&p, &a, outcome.threshold).unwrap();
    assert_eq!(cm.true_positives, 2);
    assert_eq!(cm.false_positives, 1);
    assert_eq!(cm.true_negatives, 2);
    assert_eq!(cm.false_negatives, 0);
    assert_eq!(cm.profit(&cost), outcome.profit);
}

#[test]
fn test_csv_to_comparison_pipeline() {
    let test_file = create_test_csv();
    let evaluation = load_scores(test_file.path(), &ScoreColumns::default()).unwrap();

    assert_eq!(evaluation.actuals.len(), 5);
    assert_eq!(evaluation.models.len(), 2);

    let candidates = ThresholdCandidateSet::new(vec![0.2, 0.5, 0.85]).unwrap();
    let cost = CostModel::new(3.0, 11.0).unwrap();
    let comparison = compare(&evaluation.models, &evaluation.actuals, &candidates, &cost).unwrap();

    let names: Vec<&str> = comparison.outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["logistic", "forest"]);
    assert_eq!(comparison.failures().count(), 0);

    let (best_name, best) = comparison.best().unwrap();
    assert_eq!(best_name, "forest");
    assert_eq!(best.operating_point.threshold, 0.2);
    assert_eq!(best.operating_point.profit, 16.0);
    assert_eq!(best.operating_point.confusion.total(), 5);

    let json = report::to_json(&comparison).unwrap();
    assert!(json.contains("\"best_model\": \"forest\""));
}

#[test]
fn test_selected_model_subset() {
    let test_file = create_test_csv();
    let columns = ScoreColumns {
        models: vec!["forest".to_string()],
        ..ScoreColumns::default()
    };
    let evaluation = load_scores(test_file.path(), &columns).unwrap();
    assert_eq!(evaluation.models.len(), 1);
    assert_eq!(evaluation.models[0].0, "forest");
}
