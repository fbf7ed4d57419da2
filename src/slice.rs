//! Dense evaluation grid along one input dimension
//!
//! To draw a model along dimension `dim`, we need input vectors for every
//! x-position on the chart, but the model only tells us about the points it
//! was trained on. [`SliceGrid`] fills the gaps:
//!
//! 1. The training samples are sorted by their `dim` coordinate.
//! 2. `steps` evenly spaced x-values are laid out from the smallest to the
//!    largest observed coordinate.
//! 3. Each x-value is bracketed by the two neighbouring samples around it,
//!    and the query vector is the linear blend of those two samples' *full*
//!    vectors, using the fraction along `dim`.
//!
//! Because both the grid and the sorted samples are monotonic, a single
//! forward-only pointer finds every bracket in one pass.
//!
//! If the samples run out before the grid does (fewer than two left to
//! bracket with), the scan stops. The grid keeps its full length, but the
//! x-values after the stopping point stay at zero and have no bracket.
//!
//! ```rust
//! use gpslice::{nalgebra::DVector, slice::SliceGrid};
//!
//! let inputs = vec![DVector::from_vec(vec![2.0, 20.0]), DVector::from_vec(vec![0.0, 0.0])];
//! let outputs = vec![1.0, 0.0];
//!
//! let grid = SliceGrid::build(&inputs, &outputs, 0, 2, 4).unwrap();
//! assert_eq!(grid.xs(), &[0.0, 0.5, 1.0, 1.5]);
//! assert_eq!(grid.brackets()[1].query().as_slice(), &[0.5, 5.0]);
//! ```
use std::{cmp::Ordering, ops::RangeInclusive};

use nalgebra::DVector;

use crate::{
    error::{Error, Result},
    value::Value,
};

/// A training sample borrowed from the model
#[derive(Debug, Clone, Copy)]
struct Sample<'a, T: Value> {
    x: &'a DVector<T>,
    y: T,
}
impl<T: Value> Sample<'_, T> {
    fn key(&self, dim: usize) -> T {
        self.x[dim]
    }
}

/// Forward-only search for the pair of samples around a grid value
struct BracketScanner<'s, 'a, T: Value> {
    samples: &'s [Sample<'a, T>],
    dim: usize,
    index: usize,
}
impl<'s, 'a, T: Value> BracketScanner<'s, 'a, T> {
    fn new(samples: &'s [Sample<'a, T>], dim: usize) -> Self {
        Self {
            samples,
            dim,
            index: 0,
        }
    }

    /// Advance to the first pair whose upper sample is at or past `x`.
    ///
    /// Returns `None` once fewer than two samples are left. The pointer never
    /// moves backwards, so calls must come in non-decreasing `x` order.
    fn bracket(&mut self, x: T) -> Option<(usize, usize)> {
        loop {
            let upper = self.samples.get(self.index + 1)?;
            if upper.key(self.dim) < x {
                self.index += 1;
                log::trace!(target: "gpslice::slice", "x={x:?}: advanced to sample {}", self.index);
            } else {
                return Some((self.index, self.index + 1));
            }
        }
    }
}

/// Position of one grid point between its two neighbouring samples
#[derive(Debug, Clone, PartialEq)]
pub struct Bracket<T: Value> {
    pub(crate) lower: usize,
    pub(crate) upper: usize,
    pub(crate) t: T,
    pub(crate) query: DVector<T>,
}

impl<T: Value> Bracket<T> {
    /// Index of the lower sample in [`SliceGrid::known`]
    pub fn lower(&self) -> usize {
        self.lower
    }

    /// Index of the upper sample in [`SliceGrid::known`]
    pub fn upper(&self) -> usize {
        self.upper
    }

    /// Interpolation fraction, in `[0, 1]`
    ///
    /// `0` when the two samples share the same coordinate.
    pub fn t(&self) -> T {
        self.t
    }

    /// The interpolated input vector passed to the model
    pub fn query(&self) -> &DVector<T> {
        &self.query
    }
}

/// Evaluation grid for one dimension of a model
#[derive(Debug, Clone)]
pub struct SliceGrid<T: Value> {
    dim: usize,
    known: Vec<(T, T)>,
    xs: Vec<T>,
    brackets: Vec<Bracket<T>>,
}

impl<T: Value> SliceGrid<T> {
    /// Build a grid of `steps` points across dimension `dim` of the samples.
    ///
    /// `inputs` and `outputs` are the model's training data, and `dims` the
    /// number of coordinates in each input.
    ///
    /// # Errors
    /// - [`Error::OutOfRange`] if `dim >= dims`
    /// - [`Error::NoData`] if there are no samples
    /// - [`Error::MalformedSamples`] if the inputs and outputs disagree in
    ///   length, an input does not have `dims` coordinates, or a coordinate
    ///   along `dim` is NaN
    pub fn build(
        inputs: &[DVector<T>],
        outputs: &[T],
        dim: usize,
        dims: usize,
        steps: usize,
    ) -> Result<Self> {
        if dim >= dims {
            return Err(Error::OutOfRange {
                requested: dim,
                available: dims,
            });
        }

        let mut samples = Self::validated(inputs, outputs, dim, dims)?;
        samples.sort_by(|a, b| {
            a.key(dim)
                .partial_cmp(&b.key(dim))
                .unwrap_or(Ordering::Equal)
        });

        let known: Vec<(T, T)> = samples.iter().map(|s| (s.key(dim), s.y)).collect();
        let (min, max) = match (known.first(), known.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => return Err(Error::NoData),
        };

        let step = (max - min) / T::from_positive_int(steps);
        let mut xs = vec![T::zero(); steps];
        let mut brackets = Vec::with_capacity(steps);
        let mut scanner = BracketScanner::new(&samples, dim);

        for (j, slot) in xs.iter_mut().enumerate() {
            let x = min + step * T::from_positive_int(j);
            *slot = x;

            let Some((lower, upper)) = scanner.bracket(x) else {
                log::trace!(target: "gpslice::slice", "samples exhausted at grid point {j} of {steps}");
                break;
            };

            let (lo, hi) = (&samples[lower], &samples[upper]);
            let width = hi.key(dim) - lo.key(dim);
            let t = if width == T::zero() {
                T::zero()
            } else {
                (x - lo.key(dim)) / width
            };

            brackets.push(Bracket {
                lower,
                upper,
                t,
                query: lo.x.lerp(hi.x, t),
            });
        }

        Ok(Self {
            dim,
            known,
            xs,
            brackets,
        })
    }

    fn validated<'a>(
        inputs: &'a [DVector<T>],
        outputs: &[T],
        dim: usize,
        dims: usize,
    ) -> Result<Vec<Sample<'a, T>>> {
        if inputs.is_empty() {
            return Err(Error::NoData);
        }

        if inputs.len() != outputs.len() {
            return Err(Error::MalformedSamples(format!(
                "{} inputs but {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }

        inputs
            .iter()
            .zip(outputs)
            .enumerate()
            .map(|(i, (x, &y))| {
                if x.len() != dims {
                    return Err(Error::MalformedSamples(format!(
                        "sample {i} has {} coordinates, expected {dims}",
                        x.len()
                    )));
                }
                if x[dim].is_nan() {
                    return Err(Error::MalformedSamples(format!(
                        "sample {i} has NaN in dimension {dim}"
                    )));
                }
                Ok(Sample { x, y })
            })
            .collect()
    }

    /// The dimension this grid slices along
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of grid points, covered or not
    pub fn steps(&self) -> usize {
        self.xs.len()
    }

    /// Number of grid points that found a bracket
    ///
    /// These are always the first `covered()` points of the grid.
    pub fn covered(&self) -> usize {
        self.brackets.len()
    }

    /// Grid x-values. Trailing values past an early stop are zero.
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Brackets for the covered grid points, in grid order
    pub fn brackets(&self) -> &[Bracket<T>] {
        &self.brackets
    }

    /// The training samples as `(coordinate along dim, output)`, sorted by coordinate
    pub fn known(&self) -> &[(T, T)] {
        &self.known
    }

    /// Smallest and largest observed coordinate along the sliced dimension
    pub fn x_range(&self) -> RangeInclusive<T> {
        match (self.known.first(), self.known.last()) {
            (Some(first), Some(last)) => first.0..=last.0,
            _ => T::zero()..=T::zero(),
        }
    }
}
