//! Evaluation inputs: typed score and label vectors, and the scored CSV loader

use crate::error::{ThresholdError, ThresholdResult};
use anyhow::Context;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ground-truth campaign outcome for one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryLabel {
    Negative,
    Positive,
}

impl BinaryLabel {
    pub fn is_positive(self) -> bool {
        matches!(self, BinaryLabel::Positive)
    }
}

impl TryFrom<i64> for BinaryLabel {
    type Error = ThresholdError;

    fn try_from(value: i64) -> ThresholdResult<Self> {
        match value {
            0 => Ok(BinaryLabel::Negative),
            1 => Ok(BinaryLabel::Positive),
            other => Err(ThresholdError::invalid(format!(
                "label {} is not 0 or 1",
                other
            ))),
        }
    }
}

impl TryFrom<f64> for BinaryLabel {
    type Error = ThresholdError;

    fn try_from(value: f64) -> ThresholdResult<Self> {
        if value == 0.0 {
            Ok(BinaryLabel::Negative)
        } else if value == 1.0 {
            Ok(BinaryLabel::Positive)
        } else {
            Err(ThresholdError::invalid(format!(
                "label {} is not 0 or 1",
                value
            )))
        }
    }
}

/// Classifier scores for an evaluation set, one per customer, each in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionVector(Vec<f64>);

impl PredictionVector {
    /// Build a prediction vector, rejecting non-finite or out-of-range scores
    pub fn new(scores: Vec<f64>) -> ThresholdResult<Self> {
        if let Some((idx, score)) = scores
            .iter()
            .enumerate()
            .find(|(_, s)| !s.is_finite() || **s < 0.0 || **s > 1.0)
        {
            return Err(ThresholdError::invalid(format!(
                "prediction {} at index {} is outside [0, 1]",
                score, idx
            )));
        }
        Ok(Self(scores))
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

/// Ground-truth labels, ordered the same way as the matching predictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActualVector(Vec<BinaryLabel>);

impl ActualVector {
    pub fn new(labels: Vec<BinaryLabel>) -> Self {
        Self(labels)
    }

    /// Convert raw integer labels, failing on anything other than 0 or 1
    pub fn from_raw(raw: &[i64]) -> ThresholdResult<Self> {
        raw.iter()
            .map(|&v| BinaryLabel::try_from(v))
            .collect::<ThresholdResult<Vec<_>>>()
            .map(Self)
    }

    pub fn as_slice(&self) -> &[BinaryLabel] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of customers that actually responded
    pub fn positives(&self) -> usize {
        self.0.iter().filter(|l| l.is_positive()).count()
    }
}

/// Check that predictions and actuals describe the same non-empty population.
pub(crate) fn check_aligned(
    predictions: &PredictionVector,
    actuals: &ActualVector,
) -> ThresholdResult<()> {
    if predictions.len() != actuals.len() {
        return Err(ThresholdError::invalid(format!(
            "length mismatch: {} predictions vs {} actuals",
            predictions.len(),
            actuals.len()
        )));
    }
    if actuals.is_empty() {
        return Err(ThresholdError::invalid("evaluation set is empty"));
    }
    Ok(())
}

/// Column layout of a scored evaluation file
#[derive(Debug, Clone)]
pub struct ScoreColumns {
    /// Column holding the ground-truth outcome
    pub actual: String,
    /// Score columns to compare; empty means every column except `actual`
    pub models: Vec<String>,
    /// Text value treated as a response when the outcome column is textual
    pub positive_label: String,
    /// Text value treated as a non-response when the outcome column is textual
    pub negative_label: String,
}

impl Default for ScoreColumns {
    fn default() -> Self {
        Self {
            actual: "actual".to_string(),
            models: Vec::new(),
            positive_label: "yes".to_string(),
            negative_label: "no".to_string(),
        }
    }
}

/// Held-out evaluation set: shared outcomes plus one score vector per model
#[derive(Debug, Clone)]
pub struct EvaluationSet {
    pub actuals: ActualVector,
    /// Named score vectors, in column order
    pub models: Vec<(String, PredictionVector)>,
}

/// Load a scored CSV file produced by the upstream classifiers
///
/// # Arguments
/// * `file_path` - Path to the CSV file (header row required)
/// * `columns` - Which columns hold the outcome and the model scores
///
/// # Returns
/// * `EvaluationSet` with validated labels and scores
pub fn load_scores(file_path: impl AsRef<Path>, columns: &ScoreColumns) -> crate::Result<EvaluationSet> {
    let path = file_path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        // Scan every row so integer-looking prefixes don't fix a score column to i64
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .with_context(|| format!("failed to read scores from {}", path.display()))?;

    if df.height() == 0 {
        anyhow::bail!("No rows found in {}", path.display());
    }

    let actuals = extract_actuals(&df, columns)?;

    let model_names: Vec<String> = if columns.models.is_empty() {
        df.get_column_names()
            .into_iter()
            .filter(|name| *name != columns.actual)
            .map(|name| name.to_string())
            .collect()
    } else {
        if columns.models.iter().any(|name| *name == columns.actual) {
            anyhow::bail!(
                "Outcome column '{}' cannot also be a model score column",
                columns.actual
            );
        }
        columns.models.clone()
    };

    if model_names.is_empty() {
        anyhow::bail!("No model score columns found besides '{}'", columns.actual);
    }

    let mut models = Vec::with_capacity(model_names.len());
    for name in model_names {
        let scores = extract_scores(&df, &name)?;
        models.push((name, scores));
    }

    tracing::debug!(
        rows = df.height(),
        models = models.len(),
        path = %path.display(),
        "loaded evaluation set"
    );

    Ok(EvaluationSet { actuals, models })
}

/// Convert the outcome column into typed labels
fn extract_actuals(df: &DataFrame, columns: &ScoreColumns) -> crate::Result<ActualVector> {
    let series = df
        .column(&columns.actual)
        .with_context(|| format!("outcome column '{}' not found", columns.actual))?;

    let labels = if matches!(series.dtype(), DataType::String) {
        series
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                Some(v) if v == columns.positive_label => Ok(BinaryLabel::Positive),
                Some(v) if v == columns.negative_label => Ok(BinaryLabel::Negative),
                Some(v) => anyhow::bail!(
                    "row {}: outcome '{}' is neither '{}' nor '{}'",
                    row,
                    v,
                    columns.positive_label,
                    columns.negative_label
                ),
                None => anyhow::bail!("row {}: missing outcome", row),
            })
            .collect::<crate::Result<Vec<_>>>()?
    } else {
        series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                let value = value.ok_or_else(|| anyhow::anyhow!("row {}: missing outcome", row))?;
                BinaryLabel::try_from(value).with_context(|| format!("row {}", row))
            })
            .collect::<crate::Result<Vec<_>>>()?
    };

    Ok(ActualVector::new(labels))
}

/// Read one model's probability column
fn extract_scores(df: &DataFrame, name: &str) -> crate::Result<PredictionVector> {
    let series = df
        .column(name)
        .with_context(|| format!("score column '{}' not found", name))?;

    let scores = series
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| anyhow::anyhow!("column '{}', row {}: missing score", name, row))
        })
        .collect::<crate::Result<Vec<f64>>>()?;

    PredictionVector::new(scores).with_context(|| format!("column '{}'", name))
}
