//! # gpslice
//! ## Look at a Gaussian process one dimension at a time
//!
//! A Gaussian process over `D` inputs is hard to picture. This crate draws it
//! the simple way: pick one input dimension, walk along it through the training
//! data, and plot what the model predicts on the way.
//!
//! Each chart shows:
//! - The predicted mean
//! - One standard deviation above and below it
//! - The training samples, plotted against the chosen coordinate
//!
//! The crate does not fit or train anything. Bring your own model and implement
//! [`model::GaussianProcess`] for it:
//! ```rust
//! use gpslice::{model::GaussianProcess, nalgebra::DVector, statistics::Estimate};
//!
//! struct Nearest {
//!     inputs: Vec<DVector<f64>>,
//!     outputs: Vec<f64>,
//! }
//!
//! impl GaussianProcess for Nearest {
//!     type Error = std::convert::Infallible;
//!
//!     fn dims(&self) -> usize {
//!         2
//!     }
//!
//!     fn raw_data(&self) -> (&[DVector<f64>], &[f64]) {
//!         (&self.inputs, &self.outputs)
//!     }
//!
//!     fn estimate(&self, x: &DVector<f64>) -> Result<Estimate<f64>, Self::Error> {
//!         let (distance, y) = self
//!             .inputs
//!             .iter()
//!             .zip(&self.outputs)
//!             .map(|(p, y)| ((p - x).norm(), *y))
//!             .fold((f64::INFINITY, 0.0), |best, next| if next.0 < best.0 { next } else { best });
//!         Ok(Estimate::new(y, distance))
//!     }
//! }
//!
//! let model = Nearest {
//!     inputs: vec![DVector::from_vec(vec![0.0, 1.0]), DVector::from_vec(vec![2.0, 0.0])],
//!     outputs: vec![1.0, 3.0],
//! };
//!
//! let mut svg = Vec::new();
//! gpslice::render_dimension(&model, &mut svg, 1).unwrap();
//! ```
//!
//! # Core Concepts
//! - A [`slice::SliceGrid`] is the path taken through input space for one dimension.
//!     - The samples are sorted by that coordinate, and every grid point is
//!       placed between the two samples that bracket it.
//!     - The other coordinates are blended linearly between the same two samples.
//! - A [`statistics::SigmaBand`] is the mean and `mean ± sd` at one grid point.
//!     - A negative variance flips the band rather than failing.
//! - A [`plotting::ChartSink`] turns the finished [`plotting::Chart`] into bytes.
//!     - [`plotting::SvgSink`] is the default, using `plotters`.
//!
//! # Batch rendering
//! [`save_all`] writes `0.svg`, `1.svg`, ... into a fresh temporary directory
//! and logs every file it writes through the `log` facade, at `info` level.
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar

pub mod error;
pub mod model;
pub mod plotting;
pub mod slice;
pub mod statistics;
pub mod value;


pub use plotting::{render_dimension, save_all, SliceOptions, SlicePlotter};

pub use nalgebra;
