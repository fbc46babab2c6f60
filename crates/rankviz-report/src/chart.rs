//! PNG charts of classifier rankings.
//!
//! Drawing goes through `plotters` and is only compiled with the `chart`
//! feature. Without it, [`ChartRenderer::detect`] reports the backend as
//! unavailable and callers fall back to text.

use std::path::{Path, PathBuf};

use chrono::Local;

use rankviz_core::config::ChartConfig;
use rankviz_core::types::ClassifierResult;

use crate::renderer::RenderError;

/// Viridis anchor colours, dark purple through yellow.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Whether this build can draw PNG charts.
pub fn backend_available() -> bool {
    cfg!(feature = "chart")
}

/// Files written by one chart render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOutput {
    pub comparison: PathBuf,
    pub trends: PathBuf,
}

/// Output paths for a render stamped `YYYYMMDD_HHMMSS`.
pub fn output_paths(dir: &Path, stamp: &str) -> ChartOutput {
    ChartOutput {
        comparison: dir.join(format!("classifier_comparison_{stamp}.png")),
        trends: dir.join(format!("accuracy_trends_{stamp}.png")),
    }
}

/// Colour for the bar at `position` of `count`, interpolated along viridis.
pub fn rank_gradient(position: usize, count: usize) -> (u8, u8, u8) {
    let t = if count <= 1 {
        0.0
    } else {
        position.min(count - 1) as f64 / (count - 1) as f64
    };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lower as f64;
    let (a, b) = (VIRIDIS[lower], VIRIDIS[lower + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Bar comparison plus trend chart, written next to the reports.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    #[cfg_attr(not(feature = "chart"), allow(dead_code))]
    config: ChartConfig,
}

impl ChartRenderer {
    /// Construct a chart renderer if the plotting backend is compiled in.
    pub fn detect(output_dir: &Path, config: &ChartConfig) -> Result<Self, RenderError> {
        if !backend_available() {
            return Err(RenderError::Unavailable);
        }
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            config: config.clone(),
        })
    }

    /// Draw both charts stamped with the current local time.
    pub fn render(&self, results: &[ClassifierResult]) -> Result<ChartOutput, RenderError> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        self.render_stamped(results, &stamp)
    }

    pub fn render_stamped(
        &self,
        results: &[ClassifierResult],
        stamp: &str,
    ) -> Result<ChartOutput, RenderError> {
        if results.is_empty() {
            return Err(RenderError::NoData);
        }
        let output = output_paths(&self.output_dir, stamp);
        self.draw(results, &output)?;
        Ok(output)
    }

    #[cfg(feature = "chart")]
    fn draw(&self, results: &[ClassifierResult], output: &ChartOutput) -> Result<(), RenderError> {
        let ranked = rankviz_core::types::rank_by_accuracy(results);
        draw::comparison(
            &output.comparison,
            &ranked,
            (self.config.comparison_width, self.config.comparison_height),
        )?;
        draw::trends(
            &output.trends,
            &ranked,
            (self.config.trends_width, self.config.trends_height),
        )
    }

    #[cfg(not(feature = "chart"))]
    fn draw(&self, _results: &[ClassifierResult], _output: &ChartOutput) -> Result<(), RenderError> {
        Err(RenderError::Unavailable)
    }
}

#[cfg(feature = "chart")]
mod draw {
    use std::path::Path;

    use plotters::prelude::*;
    use plotters::coord::ranged1d::SegmentedCoord;
    use plotters::coord::types::RangedCoordusize;
    use plotters::style::text_anchor::{HPos, Pos, VPos};

    use rankviz_core::stats::summarize;
    use rankviz_core::types::ClassifierResult;

    use super::rank_gradient;
    use crate::renderer::RenderError;

    const FONT: &str = "sans-serif";
    const DARK_BLUE: RGBColor = RGBColor(0, 0, 139);
    const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);

    fn failed<E: std::fmt::Display>(path: &Path, e: E) -> RenderError {
        RenderError::Draw {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }

    /// One segment per classifier. Integer ranges are inclusive in plotters,
    /// so `n` items span `0..=n - 1`. Callers guarantee `n >= 1`.
    fn categories(n: usize) -> SegmentedCoord<RangedCoordusize> {
        (0usize..n.saturating_sub(1)).into_segmented()
    }

    /// Name shown at a segment of the category axis. Slot 0 is at the
    /// bottom when the axis is vertical.
    fn category_label(names: &[&str], value: &SegmentValue<usize>, bottom_up: bool) -> String {
        let slot = match value {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
            SegmentValue::Last => return String::new(),
        };
        let index = if bottom_up {
            names.len().checked_sub(slot + 1)
        } else {
            Some(slot)
        };
        index
            .and_then(|i| names.get(i))
            .map(|name| name.to_string())
            .unwrap_or_default()
    }

    /// Horizontal bars, best performer on top.
    pub(super) fn comparison(
        path: &Path,
        ranked: &[ClassifierResult],
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let n = ranked.len();
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        let label_width = names.iter().map(|s| s.chars().count()).max().unwrap_or(0) as u32;

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| failed(path, e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Machine Learning Classifier Performance Comparison",
                (FONT, 32).into_font().style(FontStyle::Bold),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(20 + label_width * 9)
            .build_cartesian_2d(0f64..105f64, categories(n))
            .map_err(|e| failed(path, e))?;

        let y_label = |v: &SegmentValue<usize>| category_label(&names, v, true);
        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Accuracy (%)")
            .y_labels(n)
            .y_label_formatter(&y_label)
            .light_line_style(BLACK.mix(0.05))
            .draw()
            .map_err(|e| failed(path, e))?;

        chart
            .draw_series(ranked.iter().enumerate().map(|(i, r)| {
                let slot = n - 1 - i;
                let top = if slot + 1 < n {
                    SegmentValue::Exact(slot + 1)
                } else {
                    SegmentValue::Last
                };
                let (red, green, blue) = rank_gradient(i, n);
                let mut bar = Rectangle::new(
                    [(0.0, SegmentValue::Exact(slot)), (r.accuracy, top)],
                    RGBColor(red, green, blue).filled(),
                );
                bar.set_margin(6, 6, 0, 0);
                bar
            }))
            .map_err(|e| failed(path, e))?;

        let value_style =
            TextStyle::from((FONT, 16).into_font()).pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(ranked.iter().enumerate().map(|(i, r)| {
                Text::new(
                    format!("{:.2}%", r.accuracy),
                    (r.accuracy + 0.3, SegmentValue::CenterOf(n - 1 - i)),
                    value_style.clone(),
                )
            }))
            .map_err(|e| failed(path, e))?;

        root.present().map_err(|e| failed(path, e))?;
        Ok(())
    }

    /// Accuracy line with filled area and a mean reference line.
    pub(super) fn trends(
        path: &Path,
        ranked: &[ClassifierResult],
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let n = ranked.len();
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        let mean = summarize(ranked).map(|s| s.mean).unwrap_or(0.0);

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| failed(path, e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Classifier Accuracy Trends",
                (FONT, 28).into_font().style(FontStyle::Bold),
            )
            .margin(20)
            .x_label_area_size(160)
            .y_label_area_size(60)
            .build_cartesian_2d(categories(n), 0f64..105f64)
            .map_err(|e| failed(path, e))?;

        let x_label = |v: &SegmentValue<usize>| category_label(&names, v, false);
        chart
            .configure_mesh()
            .x_labels(n)
            .x_label_formatter(&x_label)
            .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate270))
            .y_desc("Accuracy (%)")
            .light_line_style(BLACK.mix(0.05))
            .draw()
            .map_err(|e| failed(path, e))?;

        let points: Vec<(SegmentValue<usize>, f64)> = ranked
            .iter()
            .enumerate()
            .map(|(i, r)| (SegmentValue::CenterOf(i), r.accuracy))
            .collect();

        chart
            .draw_series(AreaSeries::new(
                points.iter().cloned(),
                0.0,
                LIGHT_BLUE.mix(0.3),
            ))
            .map_err(|e| failed(path, e))?;
        chart
            .draw_series(LineSeries::new(
                points.iter().cloned(),
                DARK_BLUE.stroke_width(2),
            ))
            .map_err(|e| failed(path, e))?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|p| Circle::new(p.clone(), 6, DARK_BLUE.filled())),
            )
            .map_err(|e| failed(path, e))?;

        chart
            .draw_series(DashedLineSeries::new(
                vec![(SegmentValue::Exact(0), mean), (SegmentValue::Last, mean)],
                10,
                6,
                RED.mix(0.7).stroke_width(2),
            ))
            .map_err(|e| failed(path, e))?
            .label(format!("Average: {mean:.2}%"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.7)));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| failed(path, e))?;

        root.present().map_err(|e| failed(path, e))?;
        Ok(())
    }
}
