use std::ops::Range;

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Points joined in order by a line
    Line,

    /// Unconnected dots of the given radius, in pixels
    Markers(i32),
}

/// A named, ordered set of points handed to a [`super::ChartSink`]
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    kind: SeriesKind,
    points: Vec<(f64, f64)>,
}
impl Series {
    /// Creates a connected line series
    pub fn line(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Line,
            points,
        }
    }

    /// Creates a scatter series drawn as dots of radius `size`
    pub fn markers(name: impl Into<String>, points: Vec<(f64, f64)>, size: i32) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Markers(size),
            points,
        }
    }

    /// Legend label for the series
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the series is drawn
    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// The points, in drawing order
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Returns the y-values of the series
    #[must_use]
    pub fn y_values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }
}

/// Everything a sink needs to draw one chart
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Caption drawn above the plot area
    pub title: String,

    /// Series in drawing order. Later series are drawn over earlier ones
    pub series: Vec<Series>,

    /// Whether to draw the x-axis and its labels
    pub show_x_axis: bool,

    /// Whether to draw the y-axis and its labels
    pub show_y_axis: bool,

    /// Space around the plot, in pixels
    pub padding: i32,

    /// Whether to draw a legend listing every series by name
    pub legend: bool,
}
impl Chart {
    /// Creates an empty chart with both axes and the legend shown
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            series: Vec::new(),
            show_x_axis: true,
            show_y_axis: true,
            padding: 20,
            legend: true,
        }
    }

    /// Appends a series
    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Finds a series by name
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// The x-axis range covering every finite point
    #[must_use]
    pub fn x_range(&self) -> Range<f64> {
        let (min, max) = self.bounds(|(x, _)| x);
        widen(min, max, 0.0)
    }

    /// The y-axis range covering every finite point, with 5% headroom
    #[must_use]
    pub fn y_range(&self) -> Range<f64> {
        let (min, max) = self.bounds(|(_, y)| y);
        widen(min, max, 0.05)
    }

    fn bounds(&self, axis: impl Fn((f64, f64)) -> f64) -> (f64, f64) {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().copied().map(&axis))
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
                (min.min(v), max.max(v))
            })
    }
}

/// Pads a range by a fraction of its width, and keeps it from being empty
fn widen(min: f64, max: f64, fraction: f64) -> Range<f64> {
    if min > max {
        return 0.0..1.0;
    }

    let span = max - min;
    if span == 0.0 {
        return (min - 1.0)..(max + 1.0);
    }

    let pad = span * fraction;
    (min - pad)..(max + pad)
}
