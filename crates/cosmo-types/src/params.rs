// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Cosmological Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Read-only view of the background cosmology.
//!
//! The transfer core never owns or mutates the cosmology; it reads the
//! handful of scalars below through [`CosmologyParams`], so a full
//! cosmology engine or a test double can be injected equally.

use serde::{Deserialize, Serialize};

use crate::constants::T_CMB_DEFAULT;
use crate::error::{TransferError, TransferResult};

/// Scalar cosmological parameters consumed by the transfer functions.
pub trait CosmologyParams {
    /// Total matter density parameter Ω_m today.
    fn omega0_m(&self) -> f64;
    /// Baryon density parameter Ω_b today.
    fn omega0_b(&self) -> f64;
    /// Dimensionless Hubble parameter h = H0 / (100 km/s/Mpc).
    fn h(&self) -> f64;
    /// CMB temperature today (K).
    fn t_cmb(&self) -> f64;
    /// Primordial spectral index.
    fn n_s(&self) -> f64;

    /// Cold dark matter density parameter.
    fn omega0_cdm(&self) -> f64 {
        self.omega0_m() - self.omega0_b()
    }

    /// Baryon fraction f_b = Ω_b / Ω_m.
    fn baryon_fraction(&self) -> f64 {
        self.omega0_b() / self.omega0_m()
    }

    /// Physical matter density Ω_m h².
    fn omega_m_hh(&self) -> f64 {
        self.omega0_m() * self.h() * self.h()
    }

    /// Physical baryon density Ω_b h².
    fn omega_b_hh(&self) -> f64 {
        self.omega0_b() * self.h() * self.h()
    }
}

impl<T: CosmologyParams + ?Sized> CosmologyParams for &T {
    fn omega0_m(&self) -> f64 {
        (**self).omega0_m()
    }
    fn omega0_b(&self) -> f64 {
        (**self).omega0_b()
    }
    fn h(&self) -> f64 {
        (**self).h()
    }
    fn t_cmb(&self) -> f64 {
        (**self).t_cmb()
    }
    fn n_s(&self) -> f64 {
        (**self).n_s()
    }
}

/// Check that a parameter set can feed the fitting formulas.
pub fn validate_params<P: CosmologyParams + ?Sized>(params: &P) -> TransferResult<()> {
    let values = [
        ("omega0_m", params.omega0_m()),
        ("omega0_b", params.omega0_b()),
        ("h", params.h()),
        ("t_cmb", params.t_cmb()),
        ("n_s", params.n_s()),
    ];
    for (name, value) in values {
        if !value.is_finite() {
            return Err(TransferError::Precondition(format!(
                "cosmological parameter {name} is not finite ({value})"
            )));
        }
    }
    if params.omega0_m() <= 0.0 {
        return Err(TransferError::Precondition(format!(
            "omega0_m must be > 0, got {}",
            params.omega0_m()
        )));
    }
    if params.omega0_b() <= 0.0 || params.omega0_b() > params.omega0_m() {
        return Err(TransferError::Precondition(format!(
            "omega0_b must satisfy 0 < omega0_b <= omega0_m, got omega0_b = {}, omega0_m = {}",
            params.omega0_b(),
            params.omega0_m()
        )));
    }
    if params.h() <= 0.0 {
        return Err(TransferError::Precondition(format!(
            "h must be > 0, got {}",
            params.h()
        )));
    }
    if params.t_cmb() <= 0.0 {
        return Err(TransferError::Precondition(format!(
            "t_cmb must be > 0, got {}",
            params.t_cmb()
        )));
    }
    Ok(())
}

/// Plain parameter set, as read from a JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmoParams {
    pub omega0_m: f64,
    pub omega0_b: f64,
    pub h: f64,
    #[serde(default = "default_t_cmb")]
    pub t_cmb: f64,
    #[serde(default = "default_n_s")]
    pub n_s: f64,
}

fn default_t_cmb() -> f64 {
    T_CMB_DEFAULT
}
fn default_n_s() -> f64 {
    0.9667
}

impl Default for CosmoParams {
    /// Planck 2015 (TT,TE,EE+lowP+lensing+ext) flat ΛCDM.
    fn default() -> Self {
        CosmoParams {
            omega0_m: 0.3089,
            omega0_b: 0.0486,
            h: 0.6774,
            t_cmb: default_t_cmb(),
            n_s: default_n_s(),
        }
    }
}

impl CosmoParams {
    pub fn new(omega0_m: f64, omega0_b: f64, h: f64) -> Self {
        CosmoParams {
            omega0_m,
            omega0_b,
            h,
            ..Default::default()
        }
    }

    pub fn with_t_cmb(mut self, t_cmb: f64) -> Self {
        self.t_cmb = t_cmb;
        self
    }

    pub fn with_n_s(mut self, n_s: f64) -> Self {
        self.n_s = n_s;
        self
    }

    pub fn validate(&self) -> TransferResult<()> {
        validate_params(self)
    }
}

impl CosmologyParams for CosmoParams {
    fn omega0_m(&self) -> f64 {
        self.omega0_m
    }
    fn omega0_b(&self) -> f64 {
        self.omega0_b
    }
    fn h(&self) -> f64 {
        self.h
    }
    fn t_cmb(&self) -> f64 {
        self.t_cmb
    }
    fn n_s(&self) -> f64 {
        self.n_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let params = CosmoParams::default();
        assert!(params.validate().is_ok());
        assert!((params.omega0_cdm() - (0.3089 - 0.0486)).abs() < 1e-12);
        assert!((params.baryon_fraction() - 0.0486 / 0.3089).abs() < 1e-12);
        assert!((params.omega_m_hh() - 0.3089 * 0.6774 * 0.6774).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            CosmoParams::new(0.0, 0.0, 0.7),
            CosmoParams::new(0.3, 0.0, 0.7),
            CosmoParams::new(0.3, 0.4, 0.7),
            CosmoParams::new(0.3, 0.05, -0.7),
            CosmoParams::new(0.3, 0.05, 0.7).with_t_cmb(0.0),
            CosmoParams::new(0.3, 0.05, 0.7).with_n_s(f64::NAN),
        ];
        for params in cases {
            match params.validate() {
                Err(TransferError::Precondition(_)) => {}
                other => panic!("expected precondition failure for {params:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_reference_forwards() {
        let params = CosmoParams::new(0.25, 0.04, 0.72);
        let by_ref = &params;
        assert_eq!(by_ref.omega0_m(), 0.25);
        assert_eq!(by_ref.omega_b_hh(), params.omega_b_hh());
    }

    #[test]
    fn test_json_defaults_fill_optional_fields() {
        let params: CosmoParams =
            serde_json::from_str(r#"{"omega0_m": 0.3, "omega0_b": 0.05, "h": 0.7}"#).unwrap();
        assert_eq!(params.t_cmb, T_CMB_DEFAULT);
        assert_eq!(params.n_s, 0.9667);
    }
}
