// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Spline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Piecewise-cubic interpolation through tabulated data.
//!
//! Both schemes are stored in Hermite form (knot values plus knot slopes):
//! - `Natural`: C2 cubic with zero curvature at both ends; slopes come
//!   from the tridiagonal curvature system.
//! - `Monotone`: Fritsch-Carlson (1980) PCHIP slopes. Monotone data stays
//!   monotone between knots, so no ringing near sparse or noisy points.
//!
//! Evaluation is restricted to the knot range. Extrapolating a cubic is
//! left to the caller's own policy.

use cosmo_types::config::SplineKind;
use cosmo_types::error::{TransferError, TransferResult};

use crate::tridiag::thomas_solve;

#[derive(Debug, Clone)]
pub struct Spline {
    kind: SplineKind,
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

impl Spline {
    /// Build a spline through `(x[i], y[i])`.
    ///
    /// Requires at least two points, equal lengths, finite values and
    /// strictly increasing `x`.
    pub fn new(x: Vec<f64>, y: Vec<f64>, kind: SplineKind) -> TransferResult<Self> {
        validate_knots(&x, &y)?;
        let slopes = match kind {
            SplineKind::Natural => natural_slopes(&x, &y)?,
            SplineKind::Monotone => pchip_slopes(&x, &y),
        };
        Ok(Spline {
            kind,
            x,
            y,
            slopes,
        })
    }

    pub fn kind(&self) -> SplineKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn knots(&self) -> (&[f64], &[f64]) {
        (&self.x, &self.y)
    }

    /// Closed interval `[x_first, x_last]` on which the spline is defined.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    pub fn contains(&self, xq: f64) -> bool {
        let (lo, hi) = self.domain();
        xq >= lo && xq <= hi
    }

    /// Spline value at `xq`.
    pub fn eval(&self, xq: f64) -> TransferResult<f64> {
        let i = self.interval(xq)?;
        Ok(hermite_eval(
            self.x[i],
            self.x[i + 1],
            self.y[i],
            self.y[i + 1],
            self.slopes[i],
            self.slopes[i + 1],
            xq,
        ))
    }

    /// First derivative at `xq`.
    pub fn derivative(&self, xq: f64) -> TransferResult<f64> {
        let i = self.interval(xq)?;
        Ok(hermite_derivative(
            self.x[i],
            self.x[i + 1],
            self.y[i],
            self.y[i + 1],
            self.slopes[i],
            self.slopes[i + 1],
            xq,
        ))
    }

    fn interval(&self, xq: f64) -> TransferResult<usize> {
        if !self.contains(xq) {
            let (lo, hi) = self.domain();
            return Err(TransferError::Precondition(format!(
                "spline evaluated at {xq}, outside its domain [{lo}, {hi}]"
            )));
        }
        let idx = self.x.partition_point(|v| *v <= xq);
        Ok(idx.saturating_sub(1).min(self.x.len() - 2))
    }
}

fn validate_knots(x: &[f64], y: &[f64]) -> TransferResult<()> {
    if x.len() != y.len() {
        return Err(TransferError::Precondition(format!(
            "spline knots and values differ in length ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(TransferError::Precondition(format!(
            "spline needs at least 2 knots, got {}",
            x.len()
        )));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(TransferError::Precondition(
            "spline knots and values must be finite".to_string(),
        ));
    }
    if let Some(w) = x.windows(2).find(|w| w[1] <= w[0]) {
        return Err(TransferError::Precondition(format!(
            "spline knots must be strictly increasing ({} followed by {})",
            w[0], w[1]
        )));
    }
    Ok(())
}

/// Knot slopes of the natural cubic spline.
fn natural_slopes(x: &[f64], y: &[f64]) -> TransferResult<Vec<f64>> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let secant: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();
    if n == 2 {
        return Ok(vec![secant[0]; 2]);
    }

    // Interior curvatures M_1..M_{n-2}; M_0 = M_{n-1} = 0.
    let m = n - 2;
    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];
    let mut rhs = vec![0.0; m];
    for j in 0..m {
        let i = j + 1;
        sub[j] = h[i - 1];
        diag[j] = 2.0 * (h[i - 1] + h[i]);
        sup[j] = h[i];
        rhs[j] = 6.0 * (secant[i] - secant[i - 1]);
    }
    let interior = thomas_solve(&sub, &diag, &sup, &rhs)?;

    let mut curvature = vec![0.0; n];
    curvature[1..n - 1].copy_from_slice(&interior);

    let mut slopes = vec![0.0; n];
    for i in 0..n - 1 {
        slopes[i] = secant[i] - h[i] * (2.0 * curvature[i] + curvature[i + 1]) / 6.0;
    }
    slopes[n - 1] =
        secant[n - 2] + h[n - 2] * (curvature[n - 2] + 2.0 * curvature[n - 1]) / 6.0;
    Ok(slopes)
}

/// Fritsch-Carlson slopes with the shape-preserving three-point end rule.
fn pchip_slopes(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();
    if n == 2 {
        return vec![delta[0]; 2];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        if delta[k - 1] * delta[k] > 0.0 {
            let w1 = 2.0 * h[k] + h[k - 1];
            let w2 = h[k] + 2.0 * h[k - 1];
            d[k] = (w1 + w2) / (w1 / delta[k - 1] + w2 / delta[k]);
        }
    }
    d[0] = pchip_end_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = pchip_end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    d
}

fn pchip_end_slope(h0: f64, h1: f64, del0: f64, del1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * del0 - h0 * del1) / (h0 + h1);
    if d.signum() != del0.signum() || del0 == 0.0 {
        0.0
    } else if del0.signum() != del1.signum() && d.abs() > 3.0 * del0.abs() {
        3.0 * del0
    } else {
        d
    }
}

#[inline]
fn hermite_eval(x0: f64, x1: f64, y0: f64, y1: f64, m0: f64, m1: f64, xq: f64) -> f64 {
    let h = x1 - x0;
    let s = (xq - x0) / h;
    let s2 = s * s;
    let s3 = s2 * s;

    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    h00 * y0 + h10 * h * m0 + h01 * y1 + h11 * h * m1
}

#[inline]
fn hermite_derivative(x0: f64, x1: f64, y0: f64, y1: f64, m0: f64, m1: f64, xq: f64) -> f64 {
    let h = x1 - x0;
    let s = (xq - x0) / h;
    let s2 = s * s;

    (6.0 * s2 - 6.0 * s) * (y0 - y1) / h + (3.0 * s2 - 4.0 * s + 1.0) * m0 + (3.0 * s2 - 2.0 * s) * m1
}
