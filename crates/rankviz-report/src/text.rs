use colored::Colorize;

use rankviz_core::stats::{summarize, AccuracySummary};
use rankviz_core::types::{rank_by_accuracy, ClassifierResult};

const RULE_WIDTH: usize = 60;
const BLOCK: &str = "█";

/// Terminal bar chart. Always available.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    bar_scale: f64,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { bar_scale: 2.0 }
    }
}

impl TextRenderer {
    /// `bar_scale` is the number of percentage points drawn per block.
    /// Non-positive or non-finite scales fall back to 2.
    pub fn new(bar_scale: f64) -> Self {
        if bar_scale.is_finite() && bar_scale > 0.0 {
            Self { bar_scale }
        } else {
            Self::default()
        }
    }

    pub fn bar_length(&self, accuracy: f64) -> usize {
        // Saturating cast: negative accuracies draw no bar.
        (accuracy / self.bar_scale) as usize
    }

    /// Format the chart and summary for terminal output.
    pub fn format(&self, results: &[ClassifierResult]) -> String {
        let Some(summary) = summarize(results) else {
            return "No classifier data to visualize.\n".to_string();
        };

        let mut out = String::new();

        // Header
        out.push_str(&format!("\n{}\n", "=".repeat(RULE_WIDTH)));
        out.push_str(&format!(
            "{}\n",
            "CLASSIFIER PERFORMANCE VISUALIZATION".bold()
        ));
        out.push_str(&format!("{}\n\n", "=".repeat(RULE_WIDTH)));

        let name_width = results
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0);

        for r in rank_by_accuracy(results) {
            out.push_str(&format!(
                "{:<name_width$} |{} {:.2}%\n",
                r.name,
                BLOCK.repeat(self.bar_length(r.accuracy)),
                r.accuracy,
            ));
        }

        out.push_str(&format!("\n{}\n", "-".repeat(RULE_WIDTH)));
        out.push_str(&format_summary(&summary));
        out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
        out
    }
}

fn format_summary(summary: &AccuracySummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Average Accuracy: {:.2}%\n", summary.mean));
    out.push_str(&format!("Best Performance: {:.2}%\n", summary.max));
    out.push_str(&format!("Worst Performance: {:.2}%\n", summary.min));
    out.push_str(&format!("Performance Range: {:.2}%\n", summary.range));
    out
}
