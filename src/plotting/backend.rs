use std::io::Write;

use crate::plotting::Chart;

pub mod svg;
pub use svg::{SvgError, SvgSink};

/// Trait for chart sinks
///
/// A sink takes a fully assembled [`Chart`] and writes an image of it to a
/// stream. It owns no files; the caller decides where the bytes go.
pub trait ChartSink {
    /// Error type for the sink
    type Error: std::error::Error + Send + Sync + 'static;

    /// Draw `chart` and write the resulting image to `out`
    ///
    /// # Errors
    /// Returns an error if the chart cannot be drawn or the output cannot be written.
    fn render<W: Write + ?Sized>(&mut self, chart: &Chart, out: &mut W) -> Result<(), Self::Error>;
}

impl<S: ChartSink + ?Sized> ChartSink for &mut S {
    type Error = S::Error;

    fn render<W: Write + ?Sized>(&mut self, chart: &Chart, out: &mut W) -> Result<(), Self::Error> {
        (**self).render(chart, out)
    }
}
