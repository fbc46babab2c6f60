use std::path::Path;

use serde::Serialize;

use rankviz_core::stats::{summarize, AccuracySummary};
use rankviz_core::types::{rank_by_accuracy, ClassifierResult};

/// JSON view of one parsed report.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub source: String,
    /// Sorted by descending accuracy.
    pub classifiers: Vec<ClassifierResult>,
    pub summary: Option<AccuracySummary>,
}

impl JsonReport {
    pub fn new(source: &Path, results: &[ClassifierResult]) -> Self {
        Self {
            source: source.display().to_string(),
            classifiers: rank_by_accuracy(results),
            summary: summarize(results),
        }
    }
}

/// Format parsed rankings as JSON.
pub fn format_report(source: &Path, results: &[ClassifierResult], compact: bool) -> String {
    let report = JsonReport::new(source, results);
    if compact {
        serde_json::to_string(&report).expect("JsonReport should be serializable")
    } else {
        serde_json::to_string_pretty(&report).expect("JsonReport should be serializable")
    }
}
