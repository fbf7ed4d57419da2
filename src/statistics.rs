//! Model estimates and the ±1σ band derived from them
//!
//! A Gaussian process returns a predictive mean and variance for each input.
//! The chart shows the mean plus one standard deviation either side of it.
//!
//! Variance should never be negative for a well-formed process, but numerical
//! error in the underlying solver can produce small negative values. Those are
//! not rejected: the standard deviation takes the sign of the variance, which
//! swaps the band's upper and lower curves at that point.
//!
//! ```rust
//! use gpslice::statistics::Estimate;
//!
//! let band = Estimate::new(1.0, 4.0).band();
//! assert_eq!((band.lower(), band.upper()), (-1.0, 3.0));
//!
//! // Negative variance inverts the band
//! let band = Estimate::new(1.0, -4.0).band();
//! assert_eq!((band.lower(), band.upper()), (3.0, -1.0));
//! ```
use crate::value::Value;

/// Mean and variance predicted by the model for one input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate<T: Value> {
    pub(crate) mean: T,
    pub(crate) variance: T,
}

impl<T: Value> Estimate<T> {
    /// Create a new estimate
    pub fn new(mean: T, variance: T) -> Self {
        Self { mean, variance }
    }

    /// Returns the predicted mean.
    pub fn mean(&self) -> T {
        self.mean
    }

    /// Returns the predicted variance. May be negative.
    pub fn variance(&self) -> T {
        self.variance
    }

    /// Standard deviation carrying the sign of the variance.
    ///
    /// `sqrt(|variance|)`, negated when the variance is negative.
    pub fn signed_sd(&self) -> T {
        self.variance.signed_sqrt()
    }

    /// The ±1σ band around the mean.
    pub fn band(&self) -> SigmaBand<T> {
        let sd = self.signed_sd();
        SigmaBand {
            value: self.mean,
            upper: self.mean + sd,
            lower: self.mean - sd,
        }
    }
}

/// One point of the ±1σ band
///
/// `upper` is always `mean + sd` and `lower` is always `mean - sd`, so with a
/// negative variance `upper < lower`. See [`SigmaBand::is_inverted`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaBand<T: Value> {
    pub(crate) value: T,
    pub(crate) upper: T,
    pub(crate) lower: T,
}

impl<T: Value> SigmaBand<T> {
    /// Returns the predicted mean.
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns `mean + sd`.
    pub fn upper(&self) -> T {
        self.upper
    }

    /// Returns `mean - sd`.
    pub fn lower(&self) -> T {
        self.lower
    }

    /// Returns `upper - lower`; negative when the band is inverted.
    pub fn width(&self) -> T {
        self.upper - self.lower
    }

    /// True when the variance was negative and the curves swapped sides.
    pub fn is_inverted(&self) -> bool {
        self.upper < self.lower
    }
}

impl<T: Value> Default for SigmaBand<T> {
    fn default() -> Self {
        Self {
            value: T::zero(),
            upper: T::zero(),
            lower: T::zero(),
        }
    }
}

impl<T: Value> std::fmt::Display for SigmaBand<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (lower, y, upper) = (self.lower, self.value, self.upper);
        write!(f, "{y} ({lower}, {upper}) [σ = 1]")
    }
}
