//! Chart sink using the `plotters` SVG backend
//!
//! Everything is drawn into an in-memory SVG document first, and only written
//! to the output once the whole chart has been drawn.
//!
//! Text is emitted as SVG `<text>` elements, so no fonts are needed at render time.
use std::io::Write;

use plotters::{coord::Shift, prelude::*};

use crate::plotting::{palette::ColorSource, Chart, ChartSink, SeriesKind};

const MAX_LBL_WIDTH: usize = 120;

/// Default image size, in pixels
pub const DEFAULT_SIZE: (u32, u32) = (1024, 400);

/// Writes charts as SVG documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgSink {
    size: (u32, u32),
}
impl SvgSink {
    /// Create a sink producing images of the given size, in pixels
    #[must_use]
    pub fn new(size: (u32, u32)) -> Self {
        Self { size }
    }

    /// Image size, in pixels
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}
impl Default for SvgSink {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl ChartSink for SvgSink {
    type Error = SvgError;

    fn render<W: Write + ?Sized>(&mut self, chart: &Chart, out: &mut W) -> Result<(), Self::Error> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            draw(&root, chart)?;
            root.present()?;
        }

        out.write_all(svg.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

fn draw(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &Chart) -> Result<(), SvgError> {
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(chart.padding)
        .x_label_area_size(if chart.show_x_axis { 30 } else { 0 })
        .y_label_area_size(if chart.show_y_axis { 60 } else { 0 });

    if !chart.title.is_empty() {
        builder.caption(&chart.title, (FontFamily::SansSerif, 16).into_font());
    }

    let mut context = builder.build_cartesian_2d(chart.x_range(), chart.y_range())?;

    //
    // Mesh and axes
    {
        let mut mesh = context.configure_mesh();
        mesh.label_style((FontFamily::SansSerif, 12))
            .x_label_formatter(&format_tick)
            .y_label_formatter(&format_tick);

        if !chart.show_x_axis {
            mesh.disable_x_axis();
        }

        if !chart.show_y_axis {
            mesh.disable_y_axis();
        }

        mesh.draw()?;
    }

    //
    // Series, in order, so later ones land on top
    let mut colors = ColorSource::default();
    for series in &chart.series {
        let color = colors.next_color();
        let label = shorten(series.name());
        let points = series
            .points()
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        match series.kind() {
            SeriesKind::Line => {
                let style = ShapeStyle::from(color).stroke_width(1);
                context
                    .draw_series(LineSeries::new(points, style))?
                    .label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }

            SeriesKind::Markers(size) => {
                let style = ShapeStyle::from(color).filled();
                context
                    .draw_series(points.map(|p| Circle::new(p, size, style)))?
                    .label(label)
                    .legend(move |(x, y)| Circle::new((x + 10, y), size, style));
            }
        }
    }

    if chart.legend {
        context
            .configure_series_labels()
            .label_font((FontFamily::SansSerif, 10))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    Ok(())
}

#[allow(clippy::trivially_copy_pass_by_ref)] // plotters hands us a reference
fn format_tick(v: &f64) -> String {
    if *v == 0.0 || (1e-3..1e3).contains(&v.abs()) {
        format!("{v:.2}")
    } else {
        format!("{v:.2e}")
    }
}

/// Shorten label and add [...] if too long
fn shorten(label: &str) -> String {
    if label.chars().count() > MAX_LBL_WIDTH {
        let mut s: String = label.chars().take(MAX_LBL_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        label.to_string()
    }
}

/// Error occurring while drawing an SVG chart
#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    /// Error drawing the plot
    #[error("Error drawing plot: {0}")]
    Draw(#[from] DrawingAreaErrorKind<std::io::Error>),

    /// Error writing the finished document
    #[error("Error writing SVG: {0}")]
    Io(#[from] std::io::Error),
}
