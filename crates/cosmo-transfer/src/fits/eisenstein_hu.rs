// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Eisenstein & Hu
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Eisenstein & Hu (1998) transfer function with baryon acoustic
//! oscillations, ApJ 496, 605 (astro-ph/9709112).
//!
//! T(k) = f_b T_b(k) + f_c T_c(k), with the CDM piece suppressed and
//! shifted by α_c, β_c and the baryon piece carrying the acoustic
//! oscillations, Silk damping and the node shift β_node. Every scale
//! parameter is computed once in [`EisensteinHu::new`]; evaluation is a
//! closed-form expression per k.

use std::f64::consts::E;

use cosmo_types::error::{check_wavenumber, TransferResult};
use cosmo_types::params::CosmologyParams;
use tracing::debug;

use super::shape::{sinc, BaryonShape};

#[derive(Debug, Clone, PartialEq)]
pub struct EisensteinHu {
    shape: BaryonShape,
    /// 1 + z at matter-radiation equality (eq. 2).
    z_equality: f64,
    /// Horizon scale at equality, 1/Mpc (eq. 3).
    k_equality: f64,
    /// Drag epoch redshift (eq. 4).
    z_drag: f64,
    /// Baryon-to-photon momentum ratio at drag and equality (eq. 5).
    r_drag: f64,
    r_equality: f64,
    /// Sound horizon at the drag epoch, Mpc (eq. 6).
    sound_horizon: f64,
    /// Silk damping scale, 1/Mpc (eq. 7).
    k_silk: f64,
    alpha_c: f64,
    beta_c: f64,
    alpha_b: f64,
    beta_b: f64,
    beta_node: f64,
}

impl EisensteinHu {
    pub fn new<P: CosmologyParams + ?Sized>(params: &P) -> TransferResult<Self> {
        let shape = BaryonShape::new(params)?;
        Ok(Self::from_shape(shape))
    }

    pub fn from_shape(shape: BaryonShape) -> Self {
        let omhh = shape.omhh;
        let obhh = shape.obhh;
        let fb = shape.f_baryon;
        let theta2 = shape.theta_cmb * shape.theta_cmb;
        let theta4 = theta2 * theta2;

        let z_equality = 2.50e4 * omhh / theta4;
        let k_equality = 0.0746 * omhh / theta2;

        let z_drag_b1 = 0.313 * omhh.powf(-0.419) * (1.0 + 0.607 * omhh.powf(0.674));
        let z_drag_b2 = 0.238 * omhh.powf(0.223);
        let z_drag = 1291.0 * omhh.powf(0.251) / (1.0 + 0.659 * omhh.powf(0.828))
            * (1.0 + z_drag_b1 * obhh.powf(z_drag_b2));

        let r_drag = 31.5 * obhh / theta4 * (1000.0 / (1.0 + z_drag));
        let r_equality = 31.5 * obhh / theta4 * (1000.0 / z_equality);

        let sound_horizon = 2.0 / (3.0 * k_equality)
            * (6.0 / r_equality).sqrt()
            * (((1.0 + r_drag).sqrt() + (r_drag + r_equality).sqrt())
                / (1.0 + r_equality.sqrt()))
            .ln();

        let k_silk =
            1.6 * obhh.powf(0.52) * omhh.powf(0.73) * (1.0 + (10.4 * omhh).powf(-0.95));

        let alpha_c_a1 = (46.9 * omhh).powf(0.670) * (1.0 + (32.1 * omhh).powf(-0.532));
        let alpha_c_a2 = (12.0 * omhh).powf(0.424) * (1.0 + (45.0 * omhh).powf(-0.582));
        let alpha_c = alpha_c_a1.powf(-fb) * alpha_c_a2.powf(-fb.powi(3));

        let beta_c_b1 = 0.944 / (1.0 + (458.0 * omhh).powf(-0.708));
        let beta_c_b2 = (0.395 * omhh).powf(-0.0266);
        let beta_c = 1.0 / (1.0 + beta_c_b1 * ((1.0 - fb).powf(beta_c_b2) - 1.0));

        let y = z_equality / (1.0 + z_drag);
        let sqrt_1py = (1.0 + y).sqrt();
        let alpha_b_g =
            y * (-6.0 * sqrt_1py + (2.0 + 3.0 * y) * ((sqrt_1py + 1.0) / (sqrt_1py - 1.0)).ln());
        let alpha_b = 2.07 * k_equality * sound_horizon * (1.0 + r_drag).powf(-0.75) * alpha_b_g;

        let beta_node = 8.41 * omhh.powf(0.435);
        let beta_b = 0.5 + fb + (3.0 - 2.0 * fb) * ((17.2 * omhh).powi(2) + 1.0).sqrt();

        debug!(
            omhh,
            f_baryon = fb,
            z_drag,
            sound_horizon_mpc = sound_horizon,
            k_silk,
            alpha_c,
            beta_c,
            "Eisenstein-Hu parameters"
        );

        EisensteinHu {
            shape,
            z_equality,
            k_equality,
            z_drag,
            r_drag,
            r_equality,
            sound_horizon,
            k_silk,
            alpha_c,
            beta_c,
            alpha_b,
            beta_b,
            beta_node,
        }
    }

    pub fn shape(&self) -> &BaryonShape {
        &self.shape
    }

    /// Sound horizon at the drag epoch (Mpc).
    pub fn sound_horizon(&self) -> f64 {
        self.sound_horizon
    }

    /// Silk damping wavenumber (1/Mpc).
    pub fn k_silk(&self) -> f64 {
        self.k_silk
    }

    pub fn z_drag(&self) -> f64 {
        self.z_drag
    }

    /// Equality horizon wavenumber (1/Mpc).
    pub fn k_equality(&self) -> f64 {
        self.k_equality
    }

    /// Full transfer function at k (h/Mpc).
    pub fn transfer(&self, k: f64) -> TransferResult<f64> {
        check_wavenumber(k)?;
        let k = self.shape.k_mpc(k);
        let fb = self.shape.f_baryon;
        Ok(fb * self.baryon_piece(k) + (1.0 - fb) * self.cdm_piece(k))
    }

    /// CDM piece T_c at k (h/Mpc), eq. 17–20.
    pub fn cdm_transfer(&self, k: f64) -> TransferResult<f64> {
        check_wavenumber(k)?;
        Ok(self.cdm_piece(self.shape.k_mpc(k)))
    }

    /// Baryon piece T_b at k (h/Mpc), eq. 21–24.
    pub fn baryon_transfer(&self, k: f64) -> TransferResult<f64> {
        check_wavenumber(k)?;
        Ok(self.baryon_piece(self.shape.k_mpc(k)))
    }

    #[inline]
    fn q(&self, k: f64) -> f64 {
        k / (13.41 * self.k_equality)
    }

    /// T̃_0(k, α, β), eq. 19–20.
    #[inline]
    fn t0_tilde(&self, q: f64, alpha: f64, beta: f64) -> f64 {
        let ln_term = (E + 1.8 * beta * q).ln();
        let c = 14.2 / alpha + 386.0 / (1.0 + 69.9 * q.powf(1.08));
        ln_term / (ln_term + c * q * q)
    }

    fn cdm_piece(&self, k: f64) -> f64 {
        let q = self.q(k);
        let ks = k * self.sound_horizon;
        let f = 1.0 / (1.0 + (ks / 5.4).powi(4));
        f * self.t0_tilde(q, 1.0, self.beta_c)
            + (1.0 - f) * self.t0_tilde(q, self.alpha_c, self.beta_c)
    }

    fn baryon_piece(&self, k: f64) -> f64 {
        let q = self.q(k);
        let ks = k * self.sound_horizon;
        let s_tilde = self.sound_horizon / (1.0 + (self.beta_node / ks).powi(3)).cbrt();
        let envelope = self.t0_tilde(q, 1.0, 1.0) / (1.0 + (ks / 5.2).powi(2))
            + self.alpha_b / (1.0 + (self.beta_b / ks).powi(3))
                * (-(k / self.k_silk).powf(1.4)).exp();
        sinc(k * s_tilde) * envelope
    }
}
