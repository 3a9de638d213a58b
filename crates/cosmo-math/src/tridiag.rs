// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Tridiag
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thomas algorithm for tridiagonal systems.
//!
//! Used by the natural cubic spline to solve for knot curvatures.

use cosmo_types::error::{TransferError, TransferResult};

/// Solve tridiagonal system Ax = d using the Thomas algorithm.
///
/// - `a`: sub-diagonal \[n\] (a\[0\] unused)
/// - `b`: main diagonal \[n\]
/// - `c`: super-diagonal \[n\] (c\[n-1\] unused)
/// - `d`: right-hand side \[n\]
///
/// Fails on mismatched lengths or a vanishing pivot. No pivoting is done,
/// so the system should be diagonally dominant.
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> TransferResult<Vec<f64>> {
    let n = d.len();
    if n == 0 {
        return Err(TransferError::Precondition(
            "tridiagonal system is empty".to_string(),
        ));
    }
    if a.len() != n || b.len() != n || c.len() != n {
        return Err(TransferError::Precondition(format!(
            "tridiagonal band lengths differ: a={}, b={}, c={}, d={n}",
            a.len(),
            b.len(),
            c.len()
        )));
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    let pivot = checked_pivot(b[0], 0)?;
    c_prime[0] = c[0] / pivot;
    d_prime[0] = d[0] / pivot;

    for i in 1..n {
        let den = checked_pivot(b[i] - a[i] * c_prime[i - 1], i)?;
        if i < n - 1 {
            c_prime[i] = c[i] / den;
        }
        d_prime[i] = (d[i] - a[i] * d_prime[i - 1]) / den;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(x)
}

fn checked_pivot(value: f64, row: usize) -> TransferResult<f64> {
    if value == 0.0 || !value.is_finite() {
        return Err(TransferError::Precondition(format!(
            "singular tridiagonal system: pivot {value} at row {row}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thomas_identity() {
        let n = 5;
        let a = vec![0.0; n];
        let b = vec![1.0; n];
        let c = vec![0.0; n];
        let d = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let x = thomas_solve(&a, &b, &c, &d).unwrap();
        for i in 0..n {
            assert!((x[i] - d[i]).abs() < 1e-12, "x[{i}] should equal d[{i}]");
        }
    }

    #[test]
    fn test_thomas_spline_pattern() {
        // Uniform-knot natural spline curvature system: [1 4 1] / 6.
        let n = 6;
        let a: Vec<f64> = (0..n).map(|i| if i > 0 { 1.0 } else { 0.0 }).collect();
        let b = vec![4.0; n];
        let c: Vec<f64> = (0..n).map(|i| if i < n - 1 { 1.0 } else { 0.0 }).collect();
        let d: Vec<f64> = (0..n).map(|i| (i as f64 * 0.4).cos()).collect();
        let x = thomas_solve(&a, &b, &c, &d).unwrap();

        for i in 0..n {
            let mut ax = b[i] * x[i];
            if i > 0 {
                ax += a[i] * x[i - 1];
            }
            if i < n - 1 {
                ax += c[i] * x[i + 1];
            }
            assert!((ax - d[i]).abs() < 1e-12, "Ax[{i}] = {ax}, expected {}", d[i]);
        }
    }

    #[test]
    fn test_thomas_rejects_singular_and_mismatched() {
        assert!(thomas_solve(&[0.0], &[0.0], &[0.0], &[1.0]).is_err());
        assert!(thomas_solve(&[0.0, 1.0], &[1.0], &[0.0, 0.0], &[1.0, 1.0]).is_err());
        assert!(thomas_solve(&[], &[], &[], &[]).is_err());
    }
}
