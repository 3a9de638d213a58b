// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — BBKS
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bardeen, Bond, Kaiser & Szalay (1986) CDM transfer function, eq. G3,
//! with the Sugiyama (1995) baryon correction to the shape parameter.

use cosmo_types::error::{check_wavenumber, TransferResult};
use cosmo_types::params::{validate_params, CosmologyParams};

#[derive(Debug, Clone, PartialEq)]
pub struct Bbks {
    /// Γ = Ω_m h exp(−Ω_b − √(2h) Ω_b/Ω_m), in h/Mpc.
    gamma: f64,
}

impl Bbks {
    pub fn new<P: CosmologyParams + ?Sized>(params: &P) -> TransferResult<Self> {
        validate_params(params)?;
        let (om, ob, h) = (params.omega0_m(), params.omega0_b(), params.h());
        Ok(Bbks {
            gamma: om * h * (-ob - (2.0 * h).sqrt() * ob / om).exp(),
        })
    }

    pub fn shape(&self) -> f64 {
        self.gamma
    }

    pub fn transfer(&self, k: f64) -> TransferResult<f64> {
        check_wavenumber(k)?;
        let q = k / self.gamma;
        let poly = 1.0
            + 3.89 * q
            + (16.1 * q).powi(2)
            + (5.46 * q).powi(3)
            + (6.71 * q).powi(4);
        Ok((2.34 * q).ln_1p() / (2.34 * q) * poly.powf(-0.25))
    }
}
