// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Quadrature
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Panelled adaptive Simpson quadrature.
//!
//! The interval is split into equal panels; each panel is refined by
//! bisection until the Richardson error estimate |S₂ − S₁| / 15 falls below
//! its share of the tolerance. The absolute tolerance per panel is scaled
//! from a coarse first pass over all panels, so panels that contribute
//! nothing (e.g. the far tail of a decaying integrand) converge at once.

use cosmo_types::error::{TransferError, TransferResult};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct QuadConfig {
    /// Target relative accuracy of the total.
    pub rel_tol: f64,
    /// Absolute accuracy floor of the total.
    pub abs_tol: f64,
    /// Maximum bisection depth inside a panel.
    pub max_depth: usize,
    /// Number of equal-width panels.
    pub panels: usize,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            rel_tol: 1e-8,
            abs_tol: 0.0,
            max_depth: 40,
            panels: 16,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QuadResult {
    pub value: f64,
    pub error_estimate: f64,
    pub evaluations: usize,
}

struct Simpson {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
}

/// Integrate `f` over `[a, b]`.
///
/// The integrand may fail; its error is returned unchanged. Non-finite
/// samples or a panel that cannot meet tolerance within `max_depth`
/// bisections yield `NumericalIntegration`.
pub fn integrate<F>(mut f: F, a: f64, b: f64, config: &QuadConfig) -> TransferResult<QuadResult>
where
    F: FnMut(f64) -> TransferResult<f64>,
{
    if !(a.is_finite() && b.is_finite()) || b <= a {
        return Err(TransferError::NumericalIntegration(format!(
            "invalid integration interval [{a}, {b}]"
        )));
    }
    if config.panels == 0 || config.max_depth == 0 {
        return Err(TransferError::NumericalIntegration(
            "quadrature needs at least one panel and one level".to_string(),
        ));
    }

    let mut evaluations = 0usize;
    let mut sample = |x: f64, evaluations: &mut usize| -> TransferResult<f64> {
        *evaluations += 1;
        let v = f(x)?;
        if !v.is_finite() {
            return Err(TransferError::NumericalIntegration(format!(
                "integrand is not finite at x = {x} ({v})"
            )));
        }
        Ok(v)
    };

    let width = (b - a) / config.panels as f64;
    let mut panels = Vec::with_capacity(config.panels);
    let mut fa = sample(a, &mut evaluations)?;
    for p in 0..config.panels {
        let pa = a + width * p as f64;
        let pb = if p + 1 == config.panels { b } else { pa + width };
        let fb = sample(pb, &mut evaluations)?;
        let fm = sample(0.5 * (pa + pb), &mut evaluations)?;
        panels.push(Simpson {
            a: pa,
            b: pb,
            fa,
            fm,
            fb,
            whole: simpson_rule(pa, pb, fa, fm, fb),
        });
        fa = fb;
    }

    let coarse_total: f64 = panels.iter().map(|s| s.whole.abs()).sum();
    let tol = (config.rel_tol * coarse_total).max(config.abs_tol);
    let panel_tol = tol / config.panels as f64;

    let mut value = 0.0;
    let mut error_estimate = 0.0;
    for panel in panels {
        let (v, e) = refine(
            &mut |x| sample(x, &mut evaluations),
            panel,
            panel_tol,
            config.max_depth,
        )?;
        value += v;
        error_estimate += e;
    }

    debug!(
        a,
        b,
        value,
        error_estimate,
        evaluations,
        "adaptive simpson converged"
    );
    Ok(QuadResult {
        value,
        error_estimate,
        evaluations,
    })
}

fn refine<F>(f: &mut F, s: Simpson, tol: f64, depth: usize) -> TransferResult<(f64, f64)>
where
    F: FnMut(f64) -> TransferResult<f64>,
{
    let m = 0.5 * (s.a + s.b);
    let lm = 0.5 * (s.a + m);
    let rm = 0.5 * (m + s.b);
    let flm = f(lm)?;
    let frm = f(rm)?;
    let left = simpson_rule(s.a, m, s.fa, flm, s.fm);
    let right = simpson_rule(m, s.b, s.fm, frm, s.fb);
    let delta = left + right - s.whole;
    let refined = left + right + delta / 15.0;

    if delta.abs() <= 15.0 * tol || delta.abs() <= 64.0 * f64::EPSILON * (left + right).abs() {
        return Ok((refined, delta.abs() / 15.0));
    }
    if depth == 0 {
        return Err(TransferError::NumericalIntegration(format!(
            "no convergence on [{}, {}]: error estimate {:.3e} exceeds tolerance {:.3e}",
            s.a,
            s.b,
            delta.abs() / 15.0,
            tol
        )));
    }

    let half = 0.5 * tol;
    let (lv, le) = refine(
        f,
        Simpson {
            a: s.a,
            b: m,
            fa: s.fa,
            fm: flm,
            fb: s.fm,
            whole: left,
        },
        half,
        depth - 1,
    )?;
    let (rv, re) = refine(
        f,
        Simpson {
            a: m,
            b: s.b,
            fa: s.fm,
            fm: frm,
            fb: s.fb,
            whole: right,
        },
        half,
        depth - 1,
    )?;
    Ok((lv + rv, le + re))
}

#[inline]
fn simpson_rule(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_polynomial_is_exact() {
        let r = integrate(|x| Ok(x * x * x - 2.0 * x + 1.0), 0.0, 2.0, &QuadConfig::default())
            .unwrap();
        // ∫₀² (x³ − 2x + 1) dx = 4 − 4 + 2
        assert!((r.value - 2.0).abs() < 1e-13, "value = {}", r.value);
    }

    #[test]
    fn test_gaussian() {
        let r = integrate(
            |x| Ok((-x * x).exp()),
            -10.0,
            10.0,
            &QuadConfig::default(),
        )
        .unwrap();
        assert!((r.value - PI.sqrt()).abs() < 1e-9, "value = {}", r.value);
        assert!(r.evaluations > 0);
    }

    #[test]
    fn test_oscillatory_sine() {
        let r = integrate(|x| Ok(x.sin()), 0.0, 20.0 * PI, &QuadConfig::default()).unwrap();
        assert!(r.value.abs() < 1e-6, "value = {}", r.value);
        let r = integrate(|x| Ok(x.sin()), 0.0, PI, &QuadConfig::default()).unwrap();
        assert!((r.value - 2.0).abs() < 1e-7);
    }

    #[test]
    fn test_integrand_error_propagates() {
        let r = integrate(
            |x| {
                if x > 0.5 {
                    Err(TransferError::Precondition("boom".to_string()))
                } else {
                    Ok(1.0)
                }
            },
            0.0,
            1.0,
            &QuadConfig::default(),
        );
        assert!(matches!(r, Err(TransferError::Precondition(_))));
    }

    #[test]
    fn test_non_finite_integrand_fails() {
        let r = integrate(
            |x| Ok(1.0 / (x - 0.5)),
            0.0,
            1.0,
            &QuadConfig {
                panels: 2,
                ..QuadConfig::default()
            },
        );
        assert!(matches!(r, Err(TransferError::NumericalIntegration(_))));
    }

    #[test]
    fn test_depth_exhaustion_fails() {
        let config = QuadConfig {
            rel_tol: 1e-14,
            abs_tol: 0.0,
            max_depth: 2,
            panels: 1,
        };
        let r = integrate(|x| Ok((50.0 * x).sin().abs()), 0.0, 3.0, &config);
        assert!(matches!(r, Err(TransferError::NumericalIntegration(_))));
    }

    #[test]
    fn test_invalid_interval() {
        let config = QuadConfig::default();
        assert!(integrate(|_| Ok(1.0), 1.0, 1.0, &config).is_err());
        assert!(integrate(|_| Ok(1.0), 0.0, f64::INFINITY, &config).is_err());
    }
}
