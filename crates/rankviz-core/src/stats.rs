use serde::Serialize;

use crate::types::ClassifierResult;

/// Aggregate accuracy figures for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracySummary {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// `max - min`
    pub range: f64,
}

/// Summarize accuracies. Returns `None` for an empty slice.
pub fn summarize(results: &[ClassifierResult]) -> Option<AccuracySummary> {
    if results.is_empty() {
        return None;
    }

    let count = results.len();
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for r in results {
        sum += r.accuracy;
        max = max.max(r.accuracy);
        min = min.min(r.accuracy);
    }

    Some(AccuracySummary {
        count,
        mean: sum / count as f64,
        max,
        min,
        range: max - min,
    })
}
