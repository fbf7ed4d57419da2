//! Numeric types used for samples, estimates and chart coordinates.
//!
//! This module defines the [`Value`] trait, which abstracts the scalar type
//! a model works in, ensuring compatibility with nalgebra vectors,
//! floating-point operations, and conversion to `f64` for charting.
//!
//! # Example
//!
//! ```rust
//! use gpslice::value::Value;
//!
//! assert_eq!(4.0_f64.signed_sqrt(), 2.0);
//! assert_eq!((-4.0_f64).signed_sqrt(), -2.0);
//! ```
use crate::error::{Error, Result};

/// Numeric type for models and slices
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }

    /// Converts the value to `f64` for plotting
    ///
    /// # Errors
    /// Returns an error if the value cannot be represented as `f64`
    fn to_plot(self) -> Result<f64> {
        num_traits::cast(self).ok_or(Error::CastFailed)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Square root of the magnitude, carrying the sign of the input.
    ///
    /// `sqrt(|v|)` for `v >= 0`, and `-sqrt(|v|)` for `v < 0`.
    #[must_use]
    fn signed_sqrt(self) -> Self {
        let root = nalgebra::ComplexField::sqrt(Value::abs(self));
        if self < Self::zero() {
            -root
        } else {
            root
        }
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Extension trait for accessing the `x` and `y` coordinates of a set of points.
///
/// # Examples
///
/// ```
/// # use gpslice::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates of the points.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates of the points.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates of the points.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates of the points.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Converts the coordinates to `f64`.
    ///
    /// # Errors
    /// Returns an error if any of the coordinates cannot be converted to `f64`.
    fn as_f64(&self) -> Result<Vec<(f64, f64)>> {
        self.x_iter()
            .zip(self.y_iter())
            .map(|(x, y)| Ok((x.to_plot()?, y.to_plot()?)))
            .collect()
    }
}
impl<T: Value> CoordExt<T> for Vec<(T, T)> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
impl<T: Value> CoordExt<T> for &[(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
