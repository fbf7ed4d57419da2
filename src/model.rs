//! The Gaussian process as seen by the renderer
//!
//! The renderer never looks inside the model. It needs three things from it:
//! how many input dimensions it has, the samples it was trained on, and a
//! mean/variance estimate for an arbitrary input vector.
//!
//! ```rust
//! use gpslice::{model::GaussianProcess, nalgebra::DVector, statistics::Estimate};
//!
//! /// Returns the mean of the training outputs everywhere, with unit variance
//! struct Flat {
//!     inputs: Vec<DVector<f64>>,
//!     outputs: Vec<f64>,
//! }
//!
//! impl GaussianProcess for Flat {
//!     type Error = std::convert::Infallible;
//!
//!     fn dims(&self) -> usize {
//!         1
//!     }
//!
//!     fn raw_data(&self) -> (&[DVector<f64>], &[f64]) {
//!         (&self.inputs, &self.outputs)
//!     }
//!
//!     fn estimate(&self, _: &DVector<f64>) -> Result<Estimate<f64>, Self::Error> {
//!         let mean = self.outputs.iter().sum::<f64>() / self.outputs.len() as f64;
//!         Ok(Estimate::new(mean, 1.0))
//!     }
//! }
//! ```
use nalgebra::DVector;

use crate::{statistics::Estimate, value::Value};

/// A fitted Gaussian process (or any regression model with a predictive variance)
///
/// Implementations are only borrowed immutably while rendering, so a `Sync`
/// model can be rendered from several threads at once, one dimension each.
pub trait GaussianProcess<T: Value = f64> {
    /// Error returned when the model cannot produce an estimate
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of input dimensions
    fn dims(&self) -> usize;

    /// The training samples as `(inputs, outputs)`
    ///
    /// Every input vector has [`GaussianProcess::dims`] coordinates, and there
    /// is one output per input.
    fn raw_data(&self) -> (&[DVector<T>], &[T]);

    /// Predictive mean and variance at `x`
    ///
    /// # Errors
    /// Returns an error if the model cannot evaluate the given input.
    fn estimate(&self, x: &DVector<T>) -> Result<Estimate<T>, Self::Error>;
}

