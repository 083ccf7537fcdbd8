//! Breakpoint/gain tuning curves.
//!
//! A [`TuningCurve`] maps a scheduling variable (usually vehicle speed) to a
//! gain by clamped piecewise-linear interpolation: below the first breakpoint
//! the first value is used, above the last breakpoint the last value.

use carport_errors::ProfileError;
use serde::{Deserialize, Serialize};

/// Clamped piecewise-linear interpolation.
///
/// `breakpoints` must be ascending. Pairs are formed by zipping, so surplus
/// entries in the longer slice are ignored. An empty table yields `0.0`.
///
/// # Example
///
/// ```
/// use carport_tuning::interp;
///
/// let bp = [-1.0, 0.0, 2.0];
/// let v = [1404.0, 2048.0, 3072.0];
/// assert_eq!(interp(-5.0, &bp, &v), 1404.0);
/// assert_eq!(interp(1.0, &bp, &v), 2560.0);
/// assert_eq!(interp(9.0, &bp, &v), 3072.0);
/// ```
pub fn interp(x: f64, breakpoints: &[f64], values: &[f64]) -> f64 {
    let mut points = breakpoints.iter().copied().zip(values.iter().copied());
    let Some((mut x0, mut y0)) = points.next() else {
        return 0.0;
    };
    if x <= x0 {
        return y0;
    }
    for (x1, y1) in points {
        if x <= x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return y1;
            }
            return y0 + (x - x0) * (y1 - y0) / span;
        }
        x0 = x1;
        y0 = y1;
    }
    y0
}

/// Gain schedule over a single variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningCurve {
    breakpoints: Vec<f64>,
    values: Vec<f64>,
}

impl TuningCurve {
    /// Build a curve from separate breakpoint and value vectors.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidCurve`] if the vectors are empty, differ
    /// in length, contain non-finite numbers, or the breakpoints are not
    /// ascending.
    pub fn new(
        name: &str,
        breakpoints: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, ProfileError> {
        let curve = Self {
            breakpoints,
            values,
        };
        curve.validate(name)?;
        Ok(curve)
    }

    /// Build a curve from `(breakpoint, value)` pairs.
    ///
    /// Pairs are sorted by breakpoint, so the result is always ascending.
    pub fn from_points<const N: usize>(points: [(f64, f64); N]) -> Self {
        let mut points = points;
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            breakpoints: points.iter().map(|p| p.0).collect(),
            values: points.iter().map(|p| p.1).collect(),
        }
    }

    /// A curve with a single breakpoint at zero, i.e. a constant gain.
    pub fn constant(value: f64) -> Self {
        Self::from_points([(0.0, value)])
    }

    /// Evaluate the curve at `x`.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        interp(x, &self.breakpoints, &self.values)
    }

    /// Breakpoints in ascending order.
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Values, one per breakpoint.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Check the structural invariants of the curve.
    ///
    /// # Errors
    ///
    /// See [`TuningCurve::new`].
    pub fn validate(&self, name: &str) -> Result<(), ProfileError> {
        if self.breakpoints.is_empty() {
            return Err(ProfileError::invalid_curve(name, "no breakpoints"));
        }
        if self.breakpoints.len() != self.values.len() {
            return Err(ProfileError::invalid_curve(
                name,
                format!(
                    "{} breakpoints but {} values",
                    self.breakpoints.len(),
                    self.values.len()
                ),
            ));
        }
        if self
            .breakpoints
            .iter()
            .chain(self.values.iter())
            .any(|v| !v.is_finite())
        {
            return Err(ProfileError::invalid_curve(name, "non-finite entry"));
        }
        if self.breakpoints.windows(2).any(|w| match w {
            [a, b] => a > b,
            _ => false,
        }) {
            return Err(ProfileError::invalid_curve(
                name,
                "breakpoints are not ascending",
            ));
        }
        Ok(())
    }
}

/// Lateral (steering) PID tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateralPid {
    /// Proportional gain over speed.
    pub kp: TuningCurve,
    /// Integral gain over speed.
    pub ki: TuningCurve,
    /// Feed-forward gain.
    pub kf: f64,
}

impl LateralPid {
    /// Constant proportional/integral gains with a feed-forward term.
    pub fn constant(kp: f64, ki: f64, kf: f64) -> Self {
        Self {
            kp: TuningCurve::constant(kp),
            ki: TuningCurve::constant(ki),
            kf,
        }
    }
}

/// Longitudinal (gas/brake) PID tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalPid {
    /// Proportional gain over speed.
    pub kp: TuningCurve,
    /// Integral gain over speed.
    pub ki: TuningCurve,
}
