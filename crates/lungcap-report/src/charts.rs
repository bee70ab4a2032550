//! Chart rendering
//!
//! Every chart is written twice: `<base>.png` at `figure_size × dpi` pixels
//! and `<base>.svg` at the same physical size. Renderers are generic over the
//! plotters backend so both files share one drawing routine.

use crate::error::{Error, Result};
use crate::style::ReportStyle;
use lungcap_describe::{jitter, BoxStats, Group};
use lungcap_regression::QqPoints;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Base font size in points before scaling
const BASE_FONT_PT: f64 = 10.0;
const JITTER_WIDTH: f64 = 0.15;
const BOX_HALF_WIDTH: f64 = 0.3;

/// Outcome of drawing on backend `DB`
pub type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Pixel measures for one output canvas
#[derive(Debug, Clone, Copy)]
pub struct Canvas {
    /// Device units per typographic point
    pub scale: f64,
    pub font_scale: f64,
}

impl Canvas {
    fn font(&self, factor: f64) -> f64 {
        BASE_FONT_PT * self.font_scale * factor * self.scale
    }

    fn px(&self, points: f64) -> u32 {
        (points * self.scale).round().max(1.0) as u32
    }
}

/// Something that can draw itself on any backend
pub trait Chart {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &ReportStyle,
        canvas: Canvas,
    ) -> DrawResult<DB>;
}

fn plot_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}

/// Render `chart` to `<dir>/<base>.png` and `<dir>/<base>.svg`
#[instrument(skip(chart, style))]
pub fn save_chart<C: Chart>(
    chart: &C,
    dir: &Path,
    base: &str,
    style: &ReportStyle,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let png = dir.join(format!("{base}.png"));
    let svg = dir.join(format!("{base}.svg"));

    {
        let root = BitMapBackend::new(&png, style.pixel_size()).into_drawing_area();
        let canvas = Canvas {
            scale: f64::from(style.dpi) / 72.0,
            font_scale: style.font_scale,
        };
        chart.draw(&root, style, canvas).map_err(plot_error)?;
        root.present().map_err(plot_error)?;
    }
    {
        let root = SVGBackend::new(&svg, style.vector_size()).into_drawing_area();
        let canvas = Canvas {
            scale: 1.0,
            font_scale: style.font_scale,
        };
        chart.draw(&root, style, canvas).map_err(plot_error)?;
        root.present().map_err(plot_error)?;
    }

    debug!(png = %png.display(), svg = %svg.display(), "chart written");
    Ok(vec![png, svg])
}

/// Span of the values, padded by 5% on each side
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

/// Named point cloud
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Scatter plot with one color and marker per series
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Chart for ScatterChart {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &ReportStyle,
        canvas: Canvas,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let all = || self.series.iter().flat_map(|s| s.points.iter().copied());
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", canvas.font(1.2)))
            .margin(canvas.px(8.0))
            .x_label_area_size(canvas.px(36.0))
            .y_label_area_size(canvas.px(44.0))
            .build_cartesian_2d(padded_range(all().map(|p| p.0)), padded_range(all().map(|p| p.1)))?;
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .label_style(("sans-serif", canvas.font(0.8)))
            .axis_desc_style(("sans-serif", canvas.font(1.0)))
            .draw()?;

        let radius = canvas.px(2.5);
        for (i, s) in self.series.iter().enumerate() {
            let color = style.palette.color(i);
            let fill = color.mix(0.7).filled();
            let annotated = if i % 2 == 0 {
                chart
                    .draw_series(s.points.iter().map(|&p| Circle::new(p, radius, fill)))?
            } else {
                chart.draw_series(
                    s.points
                        .iter()
                        .map(|&p| TriangleMarker::new(p, radius + 1, fill)),
                )?
            };
            annotated.label(s.label.as_str()).legend(move |(x, y)| {
                Circle::new((x, y), radius, color.filled())
            });
        }
        chart
            .configure_series_labels()
            .label_font(("sans-serif", canvas.font(0.9)))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
        Ok(())
    }
}

/// Box plot per group with jittered raw points on top
#[derive(Debug, Clone, PartialEq)]
pub struct BoxJitterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub groups: Vec<Group>,
    pub seed: u64,
}

impl BoxJitterChart {
    /// Box statistics per group, in group order
    pub fn box_stats(&self) -> std::result::Result<Vec<BoxStats>, lungcap_core::Error> {
        self.groups.iter().map(|g| BoxStats::from_values(&g.values)).collect()
    }

    /// Horizontal jitter for the points of group `i`, seeded per group
    pub fn offsets(&self, i: usize) -> Vec<f64> {
        let n = self.groups.get(i).map_or(0, |g| g.values.len());
        jitter(n, JITTER_WIDTH, self.seed.wrapping_add(i as u64))
    }
}

impl Chart for BoxJitterChart {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &ReportStyle,
        canvas: Canvas,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let y_range = padded_range(self.groups.iter().flat_map(|g| g.values.iter().copied()));
        let n = self.groups.len() as f64;
        let labels: Vec<&str> = self.groups.iter().map(|g| g.label).collect();
        let x_fmt = |x: &f64| {
            let i = x.round();
            if (x - i).abs() < 1e-6 && i >= 0.0 {
                labels.get(i as usize).map(|l| l.to_string()).unwrap_or_default()
            } else {
                String::new()
            }
        };

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", canvas.font(1.2)))
            .margin(canvas.px(8.0))
            .x_label_area_size(canvas.px(36.0))
            .y_label_area_size(canvas.px(44.0))
            .build_cartesian_2d(-0.5..(n - 0.5), y_range)?;
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .x_labels(2 * self.groups.len() + 1)
            .x_label_formatter(&x_fmt)
            .disable_x_mesh()
            .label_style(("sans-serif", canvas.font(0.8)))
            .axis_desc_style(("sans-serif", canvas.font(1.0)))
            .draw()?;

        let line = canvas.px(1.0);
        for (i, group) in self.groups.iter().enumerate() {
            let Ok(stats) = BoxStats::from_values(&group.values) else {
                continue;
            };
            let color = style.palette.color(i);
            let x = i as f64;
            let (l, r) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(l, stats.q1), (r, stats.q3)],
                color.mix(0.35).filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(l, stats.q1), (r, stats.q3)],
                BLACK.stroke_width(line),
            )))?;
            for segment in [
                vec![(l, stats.median), (r, stats.median)],
                vec![(x, stats.q3), (x, stats.whisker_high)],
                vec![(x, stats.q1), (x, stats.whisker_low)],
                vec![(x - 0.1, stats.whisker_high), (x + 0.1, stats.whisker_high)],
                vec![(x - 0.1, stats.whisker_low), (x + 0.1, stats.whisker_low)],
            ] {
                chart.draw_series(std::iter::once(PathElement::new(
                    segment,
                    BLACK.stroke_width(line),
                )))?;
            }

            let offsets = self.offsets(i);
            chart.draw_series(
                group
                    .values
                    .iter()
                    .zip(offsets)
                    .map(|(&v, dx)| Circle::new((x + dx, v), canvas.px(1.5), color.mix(0.6).filled())),
            )?;
        }
        Ok(())
    }
}

/// Normal Q–Q plot with the 45° reference line
#[derive(Debug, Clone, PartialEq)]
pub struct QqChart {
    pub title: String,
    pub points: QqPoints,
}

impl Chart for QqChart {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &ReportStyle,
        canvas: Canvas,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let [(lo, _), (hi, _)] = self.points.reference_line();
        let range = padded_range([lo, hi]);
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", canvas.font(1.2)))
            .margin(canvas.px(8.0))
            .x_label_area_size(canvas.px(36.0))
            .y_label_area_size(canvas.px(44.0))
            .build_cartesian_2d(range.clone(), range)?;
        chart
            .configure_mesh()
            .x_desc("Theoretical Quantiles")
            .y_desc("Sample Quantiles")
            .label_style(("sans-serif", canvas.font(0.8)))
            .axis_desc_style(("sans-serif", canvas.font(1.0)))
            .draw()?;

        let color = style.palette.color(0);
        chart.draw_series(
            self.points
                .theoretical
                .iter()
                .zip(&self.points.sample)
                .map(|(&t, &s)| Circle::new((t, s), canvas.px(2.0), color.mix(0.7).filled())),
        )?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(lo, lo), (hi, hi)],
            style.palette.color(3).stroke_width(canvas.px(1.2)),
        )))?;
        Ok(())
    }
}

/// Residuals against fitted values with a smoothed trend and a zero line
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualChart {
    pub title: String,
    /// `(fitted, residual)`
    pub points: Vec<(f64, f64)>,
    /// Smoothed trend, sorted by fitted value
    pub trend: Vec<(f64, f64)>,
}

impl Chart for ResidualChart {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &ReportStyle,
        canvas: Canvas,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let x_range = padded_range(self.points.iter().map(|p| p.0));
        let y_range = padded_range(self.points.iter().map(|p| p.1).chain([0.0]));
        let (x0, x1) = (x_range.start, x_range.end);
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", canvas.font(1.2)))
            .margin(canvas.px(8.0))
            .x_label_area_size(canvas.px(36.0))
            .y_label_area_size(canvas.px(44.0))
            .build_cartesian_2d(x_range, y_range)?;
        chart
            .configure_mesh()
            .x_desc("Fitted values")
            .y_desc("Residuals")
            .label_style(("sans-serif", canvas.font(0.8)))
            .axis_desc_style(("sans-serif", canvas.font(1.0)))
            .draw()?;

        let color = style.palette.color(0);
        chart.draw_series(
            self.points
                .iter()
                .map(|&p| Circle::new(p, canvas.px(2.0), color.mix(0.5).filled())),
        )?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x0, 0.0), (x1, 0.0)],
            BLACK.mix(0.6).stroke_width(canvas.px(0.8)),
        )))?;
        chart.draw_series(LineSeries::new(
            self.trend.iter().copied(),
            style.palette.color(3).stroke_width(canvas.px(1.5)),
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let r = padded_range([0.0, 10.0]);
        assert!((r.start + 0.5).abs() < 1e-12);
        assert!((r.end - 10.5).abs() < 1e-12);
        assert_eq!(padded_range([3.0]), 2.5..3.5);
        assert_eq!(padded_range(Vec::<f64>::new()), 0.0..1.0);
        assert!((padded_range([f64::NAN, 1.0, 2.0]).start - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_box_stats_per_group() {
        let chart = BoxJitterChart {
            title: "t".into(),
            x_label: "Gender".into(),
            y_label: "LungCap".into(),
            groups: vec![
                Group {
                    label: "Female",
                    values: vec![1.0, 2.0, 3.0, 4.0, 100.0],
                },
                Group {
                    label: "Male",
                    values: vec![2.0, 3.0, 4.0],
                },
            ],
            seed: 42,
        };
        let stats = chart.box_stats().unwrap();
        assert_eq!(stats[0].outliers, vec![100.0]);
        assert_eq!(stats[1].median, 3.0);
    }

    #[test]
    fn test_jitter_seed_wraps_at_u64_max() {
        let chart = BoxJitterChart {
            title: "t".into(),
            x_label: "Smoke".into(),
            y_label: "LungCap".into(),
            groups: vec![
                Group {
                    label: "No",
                    values: vec![1.0; 4],
                },
                Group {
                    label: "Yes",
                    values: vec![2.0; 3],
                },
            ],
            seed: u64::MAX,
        };
        let second = chart.offsets(1);
        assert_eq!(second.len(), 3);
        assert_eq!(second, jitter(3, JITTER_WIDTH, 0));
        assert!(second.iter().all(|dx| dx.abs() <= JITTER_WIDTH));
        assert_eq!(chart.offsets(0).len(), 4);
        assert!(chart.offsets(2).is_empty());
    }
}
