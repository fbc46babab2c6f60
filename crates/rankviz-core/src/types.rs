use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One line of the "Classifier Rankings by Accuracy" section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResult {
    /// Rank as written in the report, never recomputed.
    pub rank: u32,
    pub name: String,
    /// Accuracy in percent.
    pub accuracy: f64,
}

impl ClassifierResult {
    pub fn new(rank: u32, name: impl Into<String>, accuracy: f64) -> Self {
        Self {
            rank,
            name: name.into(),
            accuracy,
        }
    }
}

impl fmt::Display for ClassifierResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} {:.2}%", self.rank, self.name, self.accuracy)
    }
}

/// Return a copy of `results` ordered by descending accuracy.
/// Ties keep their original relative order.
pub fn rank_by_accuracy(results: &[ClassifierResult]) -> Vec<ClassifierResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
    ranked
}

/// Which rendering strategy the user asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Chart when the plotting backend is compiled in, otherwise text.
    #[default]
    Auto,
    /// Same fallback as `Auto`, but states the intent explicitly.
    Chart,
    /// Text only; the chart backend is never tried.
    Text,
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererKind::Auto => write!(f, "auto"),
            RendererKind::Chart => write!(f, "chart"),
            RendererKind::Text => write!(f, "text"),
        }
    }
}

impl FromStr for RendererKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(RendererKind::Auto),
            "chart" | "graphical" => Ok(RendererKind::Chart),
            "text" => Ok(RendererKind::Text),
            _ => anyhow::bail!("unknown renderer: {s} (expected auto, chart, or text)"),
        }
    }
}
