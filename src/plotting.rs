//! Rendering a Gaussian process one dimension at a time
//!
//! For a chosen input dimension, the model is evaluated along a dense grid
//! spanning the observed range of that dimension (see [`crate::slice`]), and
//! four series are drawn:
//! - `Mean`: the predicted mean
//! - `+σ = 1` and `-σ = 1`: one standard deviation either side of it
//! - `Known`: the training samples, as dots
//!
//! Mainly used through [`render_dimension`] and [`save_all`].
//! - You can also use [`SlicePlotter`] directly for custom options or a custom [`ChartSink`]
//!
//! ```rust
//! use gpslice::{model::GaussianProcess, nalgebra::DVector, statistics::Estimate};
//!
//! struct Line {
//!     inputs: Vec<DVector<f64>>,
//!     outputs: Vec<f64>,
//! }
//! impl GaussianProcess for Line {
//!     type Error = std::convert::Infallible;
//!     fn dims(&self) -> usize { 1 }
//!     fn raw_data(&self) -> (&[DVector<f64>], &[f64]) { (&self.inputs, &self.outputs) }
//!     fn estimate(&self, x: &DVector<f64>) -> Result<Estimate<f64>, Self::Error> {
//!         Ok(Estimate::new(x[0], 0.1))
//!     }
//! }
//!
//! let model = Line {
//!     inputs: vec![DVector::from_vec(vec![0.0]), DVector::from_vec(vec![1.0])],
//!     outputs: vec![0.0, 1.0],
//! };
//!
//! let mut svg = Vec::new();
//! gpslice::plotting::render_dimension(&model, &mut svg, 0).unwrap();
//! assert!(String::from_utf8(svg).unwrap().contains("Dimension 0/1"));
//! ```
use std::{
    io::Write,
    path::{Path, PathBuf},
};

mod backend;
pub use backend::*;

mod element;
pub use element::*;

mod palette;
pub use palette::ColorSource;

use crate::{
    error::{Error, Result},
    model::GaussianProcess,
    slice::SliceGrid,
    statistics::SigmaBand,
    value::{CoordExt, Value},
};

/// Legend label of the mean curve
pub const MEAN_LABEL: &str = "Mean";

/// Legend label of the `mean + sd` curve
pub const UPPER_LABEL: &str = "+σ = 1";

/// Legend label of the `mean - sd` curve
pub const LOWER_LABEL: &str = "-σ = 1";

/// Legend label of the training samples
pub const KNOWN_LABEL: &str = "Known";

/// Options for slicing and plotting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceOptions {
    /// Number of grid points along the sliced dimension
    pub steps: usize,

    /// Size of the output image in pixels
    pub size: (u32, u32),

    /// Space around the plot, in pixels
    pub padding: i32,

    /// Radius of the dots marking training samples, in pixels
    pub marker_size: i32,

    /// Whether to hide the legend
    pub hide_legend: bool,
}
impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            steps: 1024,
            size: svg::DEFAULT_SIZE,
            padding: 20,
            marker_size: 5,
            hide_legend: false,
        }
    }
}

/// The model evaluated along one dimension
///
/// Holds one [`SigmaBand`] per grid point. Points the grid could not cover
/// (see [`SliceGrid::covered`]) keep an all-zero band.
#[derive(Debug, Clone)]
pub struct SliceBands<T: Value> {
    dim: usize,
    dims: usize,
    xs: Vec<T>,
    bands: Vec<SigmaBand<T>>,
    known: Vec<(T, T)>,
}

impl<T: Value> SliceBands<T> {
    /// Query the model at every covered point of the grid, in grid order.
    ///
    /// # Errors
    /// Returns [`Error::Estimation`] for the first query the model fails on.
    /// No further points are evaluated.
    pub fn evaluate<M: GaussianProcess<T>>(model: &M, grid: &SliceGrid<T>) -> Result<Self> {
        let mut bands = vec![SigmaBand::default(); grid.steps()];
        for ((slot, x), bracket) in bands.iter_mut().zip(grid.xs()).zip(grid.brackets()) {
            let query = bracket.query();
            let estimate = model.estimate(query).map_err(|e| Error::Estimation {
                query: format!("{:?}", query.as_slice()),
                source: Box::new(e),
            })?;

            *slot = estimate.band();
            log::trace!(
                target: "gpslice::plotting",
                "x={x:?} t={:?} mean={:?} var={:?}",
                bracket.t(),
                estimate.mean(),
                estimate.variance()
            );
        }

        Ok(Self {
            dim: grid.dim(),
            dims: model.dims(),
            xs: grid.xs().to_vec(),
            bands,
            known: grid.known().to_vec(),
        })
    }

    /// The dimension this slice runs along
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Grid x-values
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// One band per grid point
    pub fn bands(&self) -> &[SigmaBand<T>] {
        &self.bands
    }

    /// Training samples as `(coordinate, output)`, sorted by coordinate
    pub fn known(&self) -> &[(T, T)] {
        &self.known
    }

    /// Chart title naming the dimension shown
    pub fn title(&self) -> String {
        format!("Gaussian Process: Dimension {}/{}", self.dim, self.dims)
    }

    /// Assemble the chart: mean, upper and lower curves, then the known samples.
    ///
    /// # Errors
    /// Returns an error if a value cannot be represented as `f64`.
    pub fn chart(&self, options: &SliceOptions) -> Result<Chart> {
        let mut chart = Chart::new(self.title())
            .with_series(Series::line(MEAN_LABEL, self.curve(SigmaBand::value)?))
            .with_series(Series::line(UPPER_LABEL, self.curve(SigmaBand::upper)?))
            .with_series(Series::line(LOWER_LABEL, self.curve(SigmaBand::lower)?))
            .with_series(Series::markers(
                KNOWN_LABEL,
                self.known.as_f64()?,
                options.marker_size,
            ));

        chart.show_x_axis = true;
        chart.show_y_axis = true;
        chart.padding = options.padding;
        chart.legend = !options.hide_legend;
        Ok(chart)
    }

    fn curve(&self, f: impl Fn(&SigmaBand<T>) -> T) -> Result<Vec<(f64, f64)>> {
        self.xs
            .iter()
            .zip(&self.bands)
            .map(|(x, band)| Ok((x.to_plot()?, f(band).to_plot()?)))
            .collect()
    }
}

/// Renders slices of a model through a [`ChartSink`]
#[derive(Debug, Clone)]
pub struct SlicePlotter<S: ChartSink = SvgSink> {
    sink: S,
    options: SliceOptions,
}

impl SlicePlotter<SvgSink> {
    /// Create a plotter writing SVG images sized by `options.size`
    #[must_use]
    pub fn new(options: SliceOptions) -> Self {
        Self {
            sink: SvgSink::new(options.size),
            options,
        }
    }
}

impl Default for SlicePlotter<SvgSink> {
    fn default() -> Self {
        Self::new(SliceOptions::default())
    }
}

impl<S: ChartSink> SlicePlotter<S> {
    /// Create a plotter drawing through a custom sink
    pub fn with_sink(sink: S, options: SliceOptions) -> Self {
        Self { sink, options }
    }

    /// The options in use
    pub fn options(&self) -> &SliceOptions {
        &self.options
    }

    /// The sink charts are handed to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Evaluate the model along dimension `dim`
    ///
    /// # Errors
    /// - [`Error::OutOfRange`] if `dim >= model.dims()`
    /// - [`Error::NoData`] or [`Error::MalformedSamples`] for unusable training data
    /// - [`Error::Estimation`] if the model fails on any query
    pub fn slice<T: Value, M: GaussianProcess<T>>(
        &self,
        model: &M,
        dim: usize,
    ) -> Result<SliceBands<T>> {
        let (inputs, outputs) = model.raw_data();
        let grid = SliceGrid::build(inputs, outputs, dim, model.dims(), self.options.steps)?;
        SliceBands::evaluate(model, &grid)
    }

    /// Render dimension `dim` of the model to `out`.
    ///
    /// Nothing is written to `out` unless every step before the sink succeeds.
    ///
    /// # Errors
    /// Everything [`SlicePlotter::slice`] returns, plus [`Error::Sink`] if the
    /// sink fails.
    pub fn render_dimension<T, M, W>(&mut self, model: &M, out: &mut W, dim: usize) -> Result<()>
    where
        T: Value,
        M: GaussianProcess<T>,
        W: Write + ?Sized,
    {
        let chart = self.slice(model, dim)?.chart(&self.options)?;
        self.sink
            .render(&chart, out)
            .map_err(|e| Error::Sink(Box::new(e)))
    }

    /// Render every dimension of the model into a new temporary directory.
    ///
    /// See [`SlicePlotter::save_all_in`]. The directory is not removed
    /// afterwards.
    ///
    /// # Errors
    /// Returns [`Error::Resource`] if the directory cannot be created, or the
    /// first error from rendering a dimension.
    pub fn save_all<T: Value, M: GaussianProcess<T>>(&mut self, model: &M) -> Result<PathBuf> {
        let dir = tempfile::Builder::new().prefix("gp-plots").tempdir()?.keep();
        self.save_all_in(model, &dir)?;
        Ok(dir)
    }

    /// Render every dimension of the model to `<dir>/<dim>.svg`.
    ///
    /// - Creates `dir` if it does not exist.
    /// - Logs each written path at `info` level.
    /// - Stops at the first failing dimension; earlier files are kept and the
    ///   failing dimension's file is never created.
    ///
    /// Returns the written paths, in dimension order.
    ///
    /// # Errors
    /// Returns [`Error::Resource`] if a file cannot be written, or the first
    /// error from rendering a dimension.
    pub fn save_all_in<T: Value, M: GaussianProcess<T>>(
        &mut self,
        model: &M,
        dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let dims = model.dims();
        let mut paths = Vec::with_capacity(dims);
        for dim in 0..dims {
            let mut buffer = Vec::new();
            self.render_dimension(model, &mut buffer, dim)?;

            let path = dir.join(format!("{dim}.svg"));
            std::fs::write(&path, &buffer)?;
            log::info!("{dim}: {}", path.display());
            paths.push(path);
        }

        Ok(paths)
    }
}

/// Render dimension `dim` of the model as SVG to `out`, with default options
///
/// # Errors
/// See [`SlicePlotter::render_dimension`]
pub fn render_dimension<T, M, W>(model: &M, out: &mut W, dim: usize) -> Result<()>
where
    T: Value,
    M: GaussianProcess<T>,
    W: Write + ?Sized,
{
    SlicePlotter::default().render_dimension(model, out, dim)
}

/// Render every dimension of the model as SVG into a new temporary directory,
/// with default options. Returns the directory.
///
/// # Errors
/// See [`SlicePlotter::save_all`]
pub fn save_all<T: Value, M: GaussianProcess<T>>(model: &M) -> Result<PathBuf> {
    SlicePlotter::default().save_all(model)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::test::{MockProcess, RecordingSink};

    fn three_points(variance: f64) -> MockProcess {
        MockProcess::new(
            &[&[0.0], &[1.0], &[2.0]],
            &[0.0, 1.0, 0.0],
            move |x| Ok((1.0 - (x[0] - 1.0).abs(), variance)),
        )
    }

    #[test]
    fn single_dimension_end_to_end() {
        let model = three_points(0.0);
        let mut plotter = SlicePlotter::with_sink(RecordingSink::default(), SliceOptions::default());

        let mut out = Vec::new();
        plotter.render_dimension(&model, &mut out, 0).unwrap();
        assert_eq!(out, b"Gaussian Process: Dimension 0/1");

        let chart = &plotter.sink().charts[0];
        let names: Vec<_> = chart.series.iter().map(Series::name).collect();
        assert_eq!(names, [MEAN_LABEL, UPPER_LABEL, LOWER_LABEL, KNOWN_LABEL]);
        assert!(chart.show_x_axis && chart.show_y_axis && chart.legend);
        assert_eq!(chart.padding, 20);

        let mean = chart.series(MEAN_LABEL).unwrap();
        let upper = chart.series(UPPER_LABEL).unwrap();
        let lower = chart.series(LOWER_LABEL).unwrap();
        assert_eq!(mean.kind(), SeriesKind::Line);
        assert_eq!(mean.points().len(), 1024);
        assert_eq!(mean.points()[0].0, 0.0);
        assert!(mean.points()[1023].0 < 2.0);
        assert_relative_eq!(mean.points()[1023].0, 2.0 - 2.0 / 1024.0, epsilon = 1e-12);

        for ((m, u), l) in mean.points().iter().zip(upper.points()).zip(lower.points()) {
            assert_relative_eq!(m.1, 1.0 - (m.0 - 1.0).abs(), epsilon = 1e-12);
            assert_eq!(m, u);
            assert_eq!(m, l);
        }

        let known = chart.series(KNOWN_LABEL).unwrap();
        assert_eq!(known.kind(), SeriesKind::Markers(5));
        assert_eq!(known.points(), &[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
    }

    #[test]
    fn band_follows_variance() {
        let model = three_points(0.25);
        let bands = SlicePlotter::default().slice(&model, 0).unwrap();

        assert_eq!(bands.bands().len(), 1024);
        for band in bands.bands() {
            assert_relative_eq!(band.upper() - band.value(), 0.5, epsilon = 1e-12);
            assert_relative_eq!(band.value() - band.lower(), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn negative_variance_inverts_band() {
        let model = three_points(-4.0);
        let chart = SlicePlotter::default()
            .slice(&model, 0)
            .unwrap()
            .chart(&SliceOptions::default())
            .unwrap();

        let mean = chart.series(MEAN_LABEL).unwrap().y_values();
        let upper = chart.series(UPPER_LABEL).unwrap().y_values();
        let lower = chart.series(LOWER_LABEL).unwrap().y_values();
        for i in 0..mean.len() {
            assert!(upper[i] < mean[i], "upper {} !< mean {}", upper[i], mean[i]);
            assert!(mean[i] < lower[i], "mean {} !< lower {}", mean[i], lower[i]);
            assert_relative_eq!(mean[i] - upper[i], 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn known_series_is_complete() {
        let model = MockProcess::new(
            &[&[3.0, 0.5], &[1.0, 0.25], &[2.0, -1.0], &[1.0, 9.0]],
            &[30.0, 10.0, 20.0, 11.0],
            |_| Ok((0.0, 1.0)),
        );
        let bands = SlicePlotter::default().slice(&model, 1).unwrap();

        let mut known = bands.known().to_vec();
        known.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(known, [(-1.0, 20.0), (0.25, 10.0), (0.5, 30.0), (9.0, 11.0)]);
    }

    #[test]
    fn out_of_range_dimension() {
        let model = MockProcess::new(&[&[0.0, 0.0], &[1.0, 1.0]], &[0.0, 1.0], |_| Ok((0.0, 0.0)));
        let mut plotter = SlicePlotter::with_sink(RecordingSink::default(), SliceOptions::default());

        let mut out = Vec::new();
        let err = plotter.render_dimension(&model, &mut out, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange {
                requested: 5,
                available: 2
            }
        ));
        let msg = err.to_string();
        assert!(msg.contains('5') && msg.contains('2'), "{msg}");

        let err = plotter.render_dimension(&model, &mut out, 2).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));

        assert!(out.is_empty());
        assert!(plotter.sink().charts.is_empty());
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn estimation_failure_aborts_render() {
        let model = MockProcess::new(&[&[0.0], &[1.0], &[2.0]], &[0.0, 1.0, 0.0], |x| {
            if x[0] > 1.0 {
                Err(x[0])
            } else {
                Ok((0.0, 0.0))
            }
        });
        let mut sink = RecordingSink::default();
        let mut plotter = SlicePlotter::with_sink(&mut sink, SliceOptions::default());

        let mut out = Vec::new();
        let err = plotter.render_dimension(&model, &mut out, 0).unwrap_err();
        assert!(matches!(err, Error::Estimation { .. }));
        assert!(err.to_string().contains("mock estimate failed"), "{err}");

        // Grid points at or below 1.0 are 0..=512, and the first one past it fails
        assert_eq!(model.calls(), 514);
        assert!(out.is_empty());
        assert!(sink.charts.is_empty());
    }

    #[test]
    fn sink_failure_is_propagated() {
        let model = three_points(0.0);
        let mut plotter = SlicePlotter::with_sink(RecordingSink::failing(), SliceOptions::default());

        let err = plotter.render_dimension(&model, &mut Vec::new(), 0).unwrap_err();
        assert!(matches!(err, Error::Sink(_)));
        assert!(err.to_string().contains("sink refused"), "{err}");
    }

    #[test]
    fn single_sample_leaves_grid_unfilled() {
        let model = MockProcess::new(&[&[4.0]], &[7.0], |_| Ok((1.0, 1.0)));
        let options = SliceOptions {
            steps: 16,
            ..SliceOptions::default()
        };
        let chart = SlicePlotter::new(options.clone())
            .slice(&model, 0)
            .unwrap()
            .chart(&options)
            .unwrap();

        let mean = chart.series(MEAN_LABEL).unwrap().points();
        assert_eq!(mean.len(), 16);
        assert_eq!(mean[0], (4.0, 0.0));
        assert!(mean[1..].iter().all(|&p| p == (0.0, 0.0)));
        assert_eq!(chart.series(KNOWN_LABEL).unwrap().points(), &[(4.0, 7.0)]);
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn options_reach_the_chart() {
        let model = three_points(0.0);
        let options = SliceOptions {
            steps: 10,
            padding: 7,
            marker_size: 2,
            hide_legend: true,
            ..SliceOptions::default()
        };
        let mut plotter = SlicePlotter::with_sink(RecordingSink::default(), options);
        plotter.render_dimension(&model, &mut Vec::new(), 0).unwrap();

        let chart = &plotter.sink().charts[0];
        assert_eq!(chart.padding, 7);
        assert!(!chart.legend);
        assert_eq!(chart.series(MEAN_LABEL).unwrap().points().len(), 10);
        assert_eq!(chart.series(KNOWN_LABEL).unwrap().kind(), SeriesKind::Markers(2));
        assert_eq!(model.calls(), 10);
    }

    #[test]
    fn renders_svg_by_default() {
        let model = three_points(0.1);
        let mut out = Vec::new();
        render_dimension(&model, &mut out, 0).unwrap();

        let svg = String::from_utf8(out).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Gaussian Process: Dimension 0/1"));
        for label in [MEAN_LABEL, UPPER_LABEL, LOWER_LABEL, KNOWN_LABEL] {
            assert!(svg.contains(label), "missing {label}");
        }
    }

    fn cube() -> MockProcess {
        MockProcess::new(
            &[&[0.0, 1.0, 2.0], &[1.0, 0.0, 3.0], &[2.0, 2.0, 1.0]],
            &[1.0, 2.0, 3.0],
            |x| Ok((x.sum(), 0.5)),
        )
    }

    #[test]
    fn batch_writes_one_file_per_dimension() {
        let model = cube();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("plots");

        let paths = SlicePlotter::default().save_all_in(&model, &target).unwrap();
        assert_eq!(
            paths,
            [target.join("0.svg"), target.join("1.svg"), target.join("2.svg")]
        );

        let mut names: Vec<_> = std::fs::read_dir(&target)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["0.svg", "1.svg", "2.svg"]);

        for (dim, path) in paths.iter().enumerate() {
            let svg = std::fs::read_to_string(path).unwrap();
            assert!(svg.contains(&format!("Dimension {dim}/3")));
        }
    }

    #[test]
    fn batch_creates_temp_directory() {
        let dir = save_all(&cube()).unwrap();
        assert!(dir
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("gp-plots")));
        for dim in 0..3 {
            assert!(dir.join(format!("{dim}.svg")).is_file());
        }
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn batch_stops_at_first_failure() {
        // Along dimension 0 the queries run from (0, 1) towards (1, 0) without
        // reaching it. Along dimension 1 the very first query is (1, 0).
        let model = MockProcess::new(&[&[0.0, 1.0], &[1.0, 0.0]], &[0.0, 0.0], |x| {
            if x[0] >= 1.0 {
                Err(x[0])
            } else {
                Ok((0.0, 0.0))
            }
        });
        let dir = tempfile::tempdir().unwrap();

        let mut plotter = SlicePlotter::with_sink(RecordingSink::default(), SliceOptions::default());
        let err = plotter.save_all_in(&model, dir.path()).unwrap_err();
        assert!(matches!(err, Error::Estimation { .. }));
        assert!(dir.path().join("0.svg").is_file());
        assert!(!dir.path().join("1.svg").exists());
        assert_eq!(plotter.sink().charts.len(), 1);
    }
}
