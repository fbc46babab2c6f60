use std::path::{Path, PathBuf};

use thiserror::Error;

use rankviz_core::config::Config;
use rankviz_core::types::{ClassifierResult, RendererKind};

use crate::chart::{ChartOutput, ChartRenderer};
use crate::text::TextRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Chart rendering is not available in this build (enable the `chart` feature)")]
    Unavailable,

    #[error("No classifier data to visualize.")]
    NoData,

    #[error("failed to draw {}: {message}", path.display())]
    Draw { path: PathBuf, message: String },
}

/// What a render produced.
#[derive(Debug)]
pub enum RenderOutput {
    /// Formatted terminal output, ready to print.
    Text(String),
    /// PNG files written to disk.
    Charts(ChartOutput),
}

/// The rendering strategy chosen for one run.
#[derive(Debug, Clone)]
pub enum Renderer {
    Chart(ChartRenderer),
    Text(TextRenderer),
}

/// Result of [`Renderer::select`].
#[derive(Debug)]
pub struct Selection {
    pub renderer: Renderer,
    /// Why the chart strategy was not used, when it was requested.
    pub fallback: Option<RenderError>,
}

impl Renderer {
    /// Pick a strategy. Charts are tried first unless `kind` is text; if the
    /// plotting backend is missing the text renderer is used instead.
    pub fn select(kind: RendererKind, output_dir: &Path, config: &Config) -> Selection {
        let text = TextRenderer::new(config.render.bar_scale);
        if kind == RendererKind::Text {
            return Selection {
                renderer: Renderer::Text(text),
                fallback: None,
            };
        }

        match ChartRenderer::detect(output_dir, &config.chart) {
            Ok(chart) => Selection {
                renderer: Renderer::Chart(chart),
                fallback: None,
            },
            Err(e) => Selection {
                renderer: Renderer::Text(text),
                fallback: Some(e),
            },
        }
    }

    pub fn render(&self, results: &[ClassifierResult]) -> Result<RenderOutput, RenderError> {
        match self {
            Renderer::Chart(chart) => chart.render(results).map(RenderOutput::Charts),
            Renderer::Text(text) => Ok(RenderOutput::Text(text.format(results))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::backend_available;

    #[test]
    fn test_text_kind_never_tries_chart() {
        let selection =
            Renderer::select(RendererKind::Text, Path::new("results"), &Config::default());
        assert!(matches!(selection.renderer, Renderer::Text(_)));
        assert!(selection.fallback.is_none());
    }

    #[test]
    fn test_auto_prefers_chart_when_available() {
        let selection =
            Renderer::select(RendererKind::Auto, Path::new("results"), &Config::default());
        if backend_available() {
            assert!(matches!(selection.renderer, Renderer::Chart(_)));
            assert!(selection.fallback.is_none());
        } else {
            assert!(matches!(selection.renderer, Renderer::Text(_)));
            assert!(matches!(selection.fallback, Some(RenderError::Unavailable)));
        }
    }

    #[test]
    fn test_text_render_output() {
        let renderer = Renderer::Text(TextRenderer::default());
        let output = renderer
            .render(&[ClassifierResult::new(1, "SVM", 95.0)])
            .unwrap();
        match output {
            RenderOutput::Text(s) => assert!(s.contains("SVM |")),
            RenderOutput::Charts(_) => panic!("text renderer produced charts"),
        }
    }

    #[test]
    fn test_bar_scale_from_config() {
        let mut config = Config::default();
        config.render.bar_scale = 5.0;
        let selection = Renderer::select(RendererKind::Text, Path::new("results"), &config);
        match selection.renderer {
            Renderer::Text(text) => assert_eq!(text.bar_length(95.0), 19),
            Renderer::Chart(_) => panic!("expected text renderer"),
        }
    }
}
