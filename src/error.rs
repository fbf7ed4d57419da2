//! Error types for slicing and rendering a Gaussian process
//!
//! This module defines the failures that can stop a single render call or a
//! batch of renders, along with a convenient `Result` alias.

/// Boxed error coming from a collaborator (the model or the chart sink)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while slicing a model or rendering a slice.
///
/// None of these are retried. A failure ends the render call that produced it,
/// and nothing is written to the output for that dimension.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested dimension does not exist in the model.
    #[error("Requested graph of dimension {requested}; only {available} dimensions")]
    OutOfRange {
        /// Dimension index that was asked for
        requested: usize,
        /// Number of input dimensions the model has
        available: usize,
    },

    /// The model has no training samples, so there is no range to slice.
    #[error("No samples available to plot")]
    NoData,

    /// The training data returned by the model is inconsistent.
    ///
    /// Either the inputs and outputs differ in length, or an input vector does
    /// not have as many coordinates as the model claims.
    #[error("Malformed training data: {0}")]
    MalformedSamples(String),

    /// The model failed to estimate a query point.
    ///
    /// `query` is the interpolated input vector that was being evaluated.
    #[error("Model estimate failed at {query}: {source}")]
    Estimation {
        /// The failing query vector, formatted
        query: String,

        /// The error reported by the model
        #[source]
        source: BoxError,
    },

    /// The chart sink failed to produce the image.
    #[error("Chart rendering failed: {0}")]
    Sink(#[source] BoxError),

    /// The output directory or an output file could not be created or written.
    #[error("Failed to write plot output: {0}")]
    Resource(#[from] std::io::Error),

    /// A value could not be represented as `f64` for charting.
    #[error("Failed to cast value to f64")]
    CastFailed,
}

/// Result type for slicing and rendering
pub type Result<T> = std::result::Result<T, Error>;
