// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Baryon Shape
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Density combinations shared by the Eisenstein & Hu fits.

use cosmo_types::constants::T_CMB_FIT_REFERENCE;
use cosmo_types::error::TransferResult;
use cosmo_types::params::{validate_params, CosmologyParams};

/// Physical densities read once from the cosmology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaryonShape {
    /// Dimensionless Hubble parameter.
    pub h: f64,
    /// Ω_m h².
    pub omhh: f64,
    /// Ω_b h².
    pub obhh: f64,
    /// Ω_b / Ω_m.
    pub f_baryon: f64,
    /// T_cmb / 2.7 K.
    pub theta_cmb: f64,
}

impl BaryonShape {
    pub fn new<P: CosmologyParams + ?Sized>(params: &P) -> TransferResult<Self> {
        validate_params(params)?;
        Ok(BaryonShape {
            h: params.h(),
            omhh: params.omega_m_hh(),
            obhh: params.omega_b_hh(),
            f_baryon: params.baryon_fraction(),
            theta_cmb: params.t_cmb() / T_CMB_FIT_REFERENCE,
        })
    }

    /// Convert k from h/Mpc to 1/Mpc.
    #[inline]
    pub fn k_mpc(&self, k_h: f64) -> f64 {
        k_h * self.h
    }

    /// α_Γ, the small-scale suppression of the effective shape (EH98 eq. 31).
    pub fn alpha_gamma(&self) -> f64 {
        let fb = self.f_baryon;
        1.0 - 0.328 * (431.0 * self.omhh).ln() * fb + 0.38 * (22.3 * self.omhh).ln() * fb * fb
    }

    /// Fitted sound horizon at the drag epoch in Mpc (EH98 eq. 26).
    pub fn sound_horizon_fit(&self) -> f64 {
        44.5 * (9.83 / self.omhh).ln() / (1.0 + 10.0 * self.obhh.powf(0.75)).sqrt()
    }
}

/// sin(x)/x, continuous at 0.
#[inline]
pub(crate) fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-8 {
        1.0 - x * x / 6.0
    } else {
        x.sin() / x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmo_types::error::TransferError;
    use cosmo_types::params::CosmoParams;

    #[test]
    fn test_shape_from_params() {
        let params = CosmoParams::new(0.3, 0.05, 0.7).with_t_cmb(2.7);
        let shape = BaryonShape::new(&params).unwrap();
        assert!((shape.omhh - 0.147).abs() < 1e-12);
        assert!((shape.obhh - 0.0245).abs() < 1e-12);
        assert!((shape.f_baryon - 0.05 / 0.3).abs() < 1e-12);
        assert!((shape.theta_cmb - 1.0).abs() < 1e-12);
        assert!((shape.k_mpc(0.1) - 0.07).abs() < 1e-12);
    }

    #[test]
    fn test_fitted_sound_horizon_near_150_mpc() {
        let shape = BaryonShape::new(&CosmoParams::default()).unwrap();
        let s = shape.sound_horizon_fit();
        assert!(s > 140.0 && s < 160.0, "s = {s}");
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = CosmoParams::new(0.3, 0.5, 0.7);
        assert!(matches!(
            BaryonShape::new(&params),
            Err(TransferError::Precondition(_))
        ));
    }

    #[test]
    fn test_sinc() {
        assert_eq!(sinc(0.0), 1.0);
        assert!((sinc(1e-9) - 1.0).abs() < 1e-16);
        assert!((sinc(std::f64::consts::PI)).abs() < 1e-15);
    }
}
