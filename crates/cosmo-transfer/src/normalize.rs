// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Normalization
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Amplitude of the linear power spectrum.
//!
//! Convention (Eisenstein & Hu 1999, eq. A1, at z = 0):
//!
//!   Δ²(k) = k³ P(k) / 2π² = δ_H² (c k / H0)^(3 + n_s) T²(k)
//!
//! and the top-hat variance σ²(R) = ∫ d ln k Δ²(k) W²(kR). σ(R) is
//! linear in δ_H, so matching a target σ8 is a single rescale of δ_H by
//! σ8_target / σ8_current; the power amplitude δ_H² moves by the square
//! of that ratio.

use std::f64::consts::PI;

use cosmo_math::quad::{integrate, QuadConfig};
use cosmo_types::config::IntegrationConfig;
use cosmo_types::constants::C_OVER_H0;
use cosmo_types::error::{TransferError, TransferResult};
use cosmo_types::params::CosmologyParams;
use tracing::debug;

/// Amplitude state of a transfer function: δ_H and the σ8 it was matched to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub delta_h: f64,
    /// Target σ8 last normalised to; `None` if δ_H came from the inputs.
    pub sigma8: Option<f64>,
}

impl Normalization {
    pub fn from_delta_h(delta_h: f64) -> TransferResult<Self> {
        check_positive("delta_h", delta_h)?;
        Ok(Normalization {
            delta_h,
            sigma8: None,
        })
    }
}

/// Fourier transform of a unit top-hat sphere, W(x) = 3 (sin x − x cos x) / x³.
pub fn top_hat_window(x: f64) -> f64 {
    if x.abs() < 1e-2 {
        let x2 = x * x;
        1.0 - x2 / 10.0 + x2 * x2 / 280.0
    } else {
        3.0 * (x.sin() - x * x.cos()) / (x * x * x)
    }
}

/// COBE-normalised δ_H for a flat universe (Bunn & White 1997).
pub fn cobe_delta_h<P: CosmologyParams + ?Sized>(params: &P) -> f64 {
    let om = params.omega0_m();
    let n_tilde = params.n_s() - 1.0;
    1.94e-5 * om.powf(-0.785 - 0.05 * om.ln()) * (-0.95 * n_tilde - 0.169 * n_tilde * n_tilde).exp()
}

/// Δ²(k) for a given T(k); k in h/Mpc.
#[inline]
pub fn dimensionless_power(k: f64, transfer: f64, n_s: f64, delta_h: f64) -> f64 {
    delta_h * delta_h * (C_OVER_H0 * k).powf(3.0 + n_s) * transfer * transfer
}

/// P(k) in (Mpc/h)³ for a given T(k); k in h/Mpc.
#[inline]
pub fn linear_power(k: f64, transfer: f64, n_s: f64, delta_h: f64) -> f64 {
    2.0 * PI * PI * dimensionless_power(k, transfer, n_s, delta_h) / (k * k * k)
}

/// Shape-only top-hat variance ∫ d ln k (c k/H0)^(3+n_s) T² W²(kR), i.e.
/// σ²(R) at δ_H = 1.
pub fn unit_variance<F>(
    mut transfer: F,
    n_s: f64,
    radius: f64,
    config: &IntegrationConfig,
) -> TransferResult<f64>
where
    F: FnMut(f64) -> TransferResult<f64>,
{
    check_positive("radius", radius)?;
    config.validate()?;

    let quad = QuadConfig {
        rel_tol: config.rel_tol,
        abs_tol: 0.0,
        max_depth: config.max_depth,
        panels: config.panels,
    };
    let result = integrate(
        |ln_k| {
            let k = ln_k.exp();
            let t = transfer(k)?;
            let w = top_hat_window(k * radius);
            Ok(dimensionless_power(k, t, n_s, 1.0) * w * w)
        },
        config.k_min.ln(),
        config.k_max.ln(),
        &quad,
    )?;

    if !(result.value.is_finite() && result.value > 0.0) {
        return Err(TransferError::NumericalIntegration(format!(
            "top-hat variance at R = {radius} Mpc/h is not positive ({})",
            result.value
        )));
    }
    debug!(
        radius,
        variance = result.value,
        error_estimate = result.error_estimate,
        evaluations = result.evaluations,
        "unit-amplitude variance"
    );
    Ok(result.value)
}

/// σ(R) for transfer function `transfer` at amplitude `delta_h`.
pub fn sigma_r<F>(
    transfer: F,
    n_s: f64,
    delta_h: f64,
    radius: f64,
    config: &IntegrationConfig,
) -> TransferResult<f64>
where
    F: FnMut(f64) -> TransferResult<f64>,
{
    check_positive("delta_h", delta_h)?;
    Ok(delta_h * unit_variance(transfer, n_s, radius, config)?.sqrt())
}

/// δ_H reproducing `target_sigma` at radius `radius`, given the σ obtained
/// at the current amplitude.
pub fn rescaled_delta_h(current_delta_h: f64, current_sigma: f64, target_sigma: f64) -> f64 {
    current_delta_h * (target_sigma / current_sigma)
}

pub(crate) fn check_positive(name: &str, value: f64) -> TransferResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(TransferError::Precondition(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmo_types::params::CosmoParams;

    #[test]
    fn test_window_limits() {
        assert_eq!(top_hat_window(0.0), 1.0);
        // Series and closed form agree across the switch.
        let x: f64 = 1e-2;
        let closed = 3.0 * (x.sin() - x * x.cos()) / (x * x * x);
        assert!((top_hat_window(x * 0.999_999) - closed).abs() < 1e-9);
        // First zero of W: tan x = x at x ≈ 4.4934.
        assert!(top_hat_window(4.493_409_457_909).abs() < 1e-10);
    }

    #[test]
    fn test_cobe_delta_h() {
        let params = CosmoParams::new(1.0, 0.05, 0.5).with_n_s(1.0);
        assert!((cobe_delta_h(&params) - 1.94e-5).abs() < 1e-12);
        let planck = cobe_delta_h(&CosmoParams::default());
        assert!(planck > 4e-5 && planck < 6e-5, "δ_H = {planck}");
    }

    #[test]
    fn test_linear_power_matches_dimensionless() {
        let (k, t, ns, dh) = (0.2, 0.1, 0.96, 5e-5);
        let p = linear_power(k, t, ns, dh);
        let d2 = dimensionless_power(k, t, ns, dh);
        assert!((p * k.powi(3) / (2.0 * PI * PI) - d2).abs() < 1e-12 * d2);
    }

    #[test]
    fn test_sigma_scales_linearly_with_delta_h() {
        let config = IntegrationConfig::default();
        let t = |k: f64| Ok(1.0 / (1.0 + (k / 0.02).powi(2)));
        let s1 = sigma_r(t, 1.0, 1e-5, 8.0, &config).unwrap();
        let s2 = sigma_r(t, 1.0, 3e-5, 8.0, &config).unwrap();
        assert!((s2 / s1 - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_transfer_fails_integration() {
        let err = unit_variance(|_| Ok(0.0), 1.0, 8.0, &IntegrationConfig::default()).unwrap_err();
        assert!(matches!(err, TransferError::NumericalIntegration(_)));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let config = IntegrationConfig::default();
        assert!(matches!(
            sigma_r(|_| Ok(1.0), 1.0, 0.0, 8.0, &config),
            Err(TransferError::Precondition(_))
        ));
        assert!(matches!(
            unit_variance(|_| Ok(1.0), 1.0, -8.0, &config),
            Err(TransferError::Precondition(_))
        ));
        assert!(Normalization::from_delta_h(f64::NAN).is_err());
    }

    #[test]
    fn test_rescale() {
        assert!((rescaled_delta_h(2e-5, 0.4, 0.8) - 4e-5).abs() < 1e-20);
    }
}
