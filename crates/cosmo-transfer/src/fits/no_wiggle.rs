// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — No-Wiggle
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Eisenstein & Hu (1998) zero-baryon-oscillation fit, eq. 26–31.
//!
//! Keeps the baryon suppression of the small-scale power through a
//! scale-dependent effective shape Γ_eff(k) but drops the acoustic term.

use std::f64::consts::E;

use cosmo_types::error::{check_wavenumber, TransferResult};
use cosmo_types::params::CosmologyParams;

use super::shape::BaryonShape;

#[derive(Debug, Clone, PartialEq)]
pub struct NoWiggle {
    shape: BaryonShape,
    alpha_gamma: f64,
    /// Fitted sound horizon (Mpc).
    sound_horizon: f64,
}

impl NoWiggle {
    pub fn new<P: CosmologyParams + ?Sized>(params: &P) -> TransferResult<Self> {
        Ok(Self::from_shape(BaryonShape::new(params)?))
    }

    pub fn from_shape(shape: BaryonShape) -> Self {
        NoWiggle {
            alpha_gamma: shape.alpha_gamma(),
            sound_horizon: shape.sound_horizon_fit(),
            shape,
        }
    }

    pub fn sound_horizon(&self) -> f64 {
        self.sound_horizon
    }

    pub fn alpha_gamma(&self) -> f64 {
        self.alpha_gamma
    }

    /// Γ_eff(k) in units of Ω_m h² (Mpc⁻¹ scaling); k in h/Mpc.
    pub fn effective_shape(&self, k: f64) -> TransferResult<f64> {
        check_wavenumber(k)?;
        Ok(self.gamma_eff(self.shape.k_mpc(k)))
    }

    pub fn transfer(&self, k: f64) -> TransferResult<f64> {
        check_wavenumber(k)?;
        let k = self.shape.k_mpc(k);
        let theta2 = self.shape.theta_cmb * self.shape.theta_cmb;
        let q = k * theta2 / self.gamma_eff(k);
        let l0 = (2.0 * E + 1.8 * q).ln();
        let c0 = 14.2 + 731.0 / (1.0 + 62.5 * q);
        Ok(l0 / (l0 + c0 * q * q))
    }

    fn gamma_eff(&self, k: f64) -> f64 {
        let ag = self.alpha_gamma;
        self.shape.omhh * (ag + (1.0 - ag) / (1.0 + (0.43 * k * self.sound_horizon).powi(4)))
    }
}
